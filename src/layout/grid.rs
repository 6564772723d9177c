//! Fixed-size layout grid with copy-on-write edit operations
//!
//! A layout is always exactly [`GRID_CELL_COUNT`] cells addressed by position.
//! Every edit returns a new [`Grid`] snapshot and leaves the receiver as it
//! was, so a caller holding an older snapshot never observes a later edit.

use crate::io::configuration::{BLANK_TILE_ID, GRID_CELL_COUNT, GRID_COLUMNS};
use crate::layout::catalog;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;

/// Quarter-turn rotation of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Upright
    #[default]
    Deg0,
    /// A quarter turn clockwise
    Deg90,
    /// A half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl Rotation {
    /// All rotations in increasing order
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Exact conversion from degrees; anything but 0, 90, 180 or 270 is rejected
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// The next quarter turn, wrapping 270 back to 0
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Tile identifier as stored in a layout
///
/// Not restricted to catalog members: decoded layouts may carry ids the
/// catalog does not know, which only get substituted when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileId(String);

impl TileId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The blank tile
    pub fn blank() -> Self {
        Self::new(BLANK_TILE_ID)
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Catalog entry used to render this id
    pub fn resolve(&self) -> &'static catalog::TileEntry {
        catalog::resolve(&self.0)
    }
}

impl Default for TileId {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Contents of one grid position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Tile placed in the cell
    pub tile_id: TileId,
    /// Rotation of the tile
    pub rotation: Rotation,
}

impl Cell {
    /// Create a cell
    pub const fn new(tile_id: TileId, rotation: Rotation) -> Self {
        Self { tile_id, rotation }
    }
}

/// Validated position in a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Accept indices in `[0, GRID_CELL_COUNT)`
    pub const fn new(index: usize) -> Option<Self> {
        if index < GRID_CELL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw positional index
    pub const fn get(self) -> usize {
        self.0
    }

    /// Rendered `(row, column)` of this position
    pub const fn row_col(self) -> (usize, usize) {
        (self.0 / GRID_COLUMNS, self.0 % GRID_COLUMNS)
    }

    /// Every valid index in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_CELL_COUNT).map(Self)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered layout of exactly [`GRID_CELL_COUNT`] cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Grid with every cell blank and upright
    pub fn empty() -> Self {
        Self {
            cells: vec![Cell::default(); GRID_CELL_COUNT],
        }
    }

    /// Build a grid from cells, rejecting any length but [`GRID_CELL_COUNT`]
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        (cells.len() == GRID_CELL_COUNT).then_some(Self { cells })
    }

    /// All cells in index order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a position
    // Length is fixed at GRID_CELL_COUNT and CellIndex is bounded by it
    #[allow(clippy::indexing_slicing)]
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.get()]
    }

    /// Cells grouped by rendered row
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    /// Place `tile_id` at `index`, resetting its rotation
    #[must_use]
    pub fn painted(&self, index: CellIndex, tile_id: TileId) -> Self {
        self.with_cell(index, |cell| *cell = Cell::new(tile_id, Rotation::Deg0))
    }

    /// Turn the cell at `index` a further quarter turn
    #[must_use]
    pub fn rotated(&self, index: CellIndex) -> Self {
        self.with_cell(index, |cell| cell.rotation = cell.rotation.next())
    }

    /// Exchange the full contents of two cells
    #[must_use]
    pub fn swapped(&self, first: CellIndex, second: CellIndex) -> Self {
        let mut next = self.clone();
        if first != second {
            next.cells.swap(first.get(), second.get());
        }
        next
    }

    /// Every cell blank and upright
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::empty()
    }

    /// Independently random tile and rotation for every cell
    #[must_use]
    pub fn randomized<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let cells = (0..GRID_CELL_COUNT)
            .map(|_| {
                let tile = catalog::entries()
                    .choose(rng)
                    .unwrap_or_else(catalog::fallback);
                let rotation = Rotation::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or_default();
                Cell::new(TileId::new(tile.id), rotation)
            })
            .collect();
        Self { cells }
    }

    /// [`Grid::randomized`] with the thread-local generator; not reproducible
    #[must_use]
    pub fn randomize(&self) -> Self {
        self.randomized(&mut rand::rng())
    }

    fn with_cell(&self, index: CellIndex, edit: impl FnOnce(&mut Cell)) -> Self {
        let mut next = self.clone();
        if let Some(cell) = next.cells.get_mut(index.get()) {
            edit(cell);
        }
        next
    }
}
