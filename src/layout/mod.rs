//! Layout data: the tile catalog and the fixed-size cell grid
//!
//! Positional index is the only addressing scheme; rows and columns exist
//! only for rendering.

/// Static tile catalog and render-time fallback
pub mod catalog;
/// Grid cells, rotations and copy-on-write edits
pub mod grid;

pub use catalog::TileEntry;
pub use grid::{Cell, CellIndex, Grid, Rotation, TileId};
