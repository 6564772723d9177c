//! Layout token encoding for share links
//!
//! A token is the standard base64 encoding of the cells joined as
//! `<tileId>:<rotation>` with commas, in index order. Decoding is lenient
//! per cell (missing ids become `blank`, unreadable rotations become 0) but
//! strict about the transform itself and about the cell count.

use crate::io::configuration::{CELL_SEPARATOR, FIELD_SEPARATOR, GRID_CELL_COUNT};
use crate::layout::{Cell, Grid, Rotation, TileId};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Reasons a token does not decode to a grid
#[derive(Debug)]
pub enum DecodeError {
    /// The text is not valid base64
    Transform {
        /// Underlying base64 error
        source: base64::DecodeError,
    },

    /// The decoded bytes are not UTF-8 text
    Text {
        /// Underlying conversion error
        source: std::string::FromUtf8Error,
    },

    /// The payload does not describe exactly one full grid
    CellCount {
        /// Number of cells found
        found: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform { source } => write!(f, "Layout token is not valid base64: {source}"),
            Self::Text { source } => write!(f, "Layout token is not UTF-8 text: {source}"),
            Self::CellCount { found } => {
                write!(
                    f,
                    "Layout token has {found} cells, expected {GRID_CELL_COUNT}"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transform { source } => Some(source),
            Self::Text { source } => Some(source),
            Self::CellCount { .. } => None,
        }
    }
}

/// Serialize a grid into a layout token
pub fn encode(grid: &Grid) -> String {
    let payload = grid
        .cells()
        .iter()
        .map(|cell| format!("{}{FIELD_SEPARATOR}{}", cell.tile_id, cell.rotation))
        .collect::<Vec<_>>()
        .join(&CELL_SEPARATOR.to_string());
    STANDARD.encode(payload)
}

/// Deserialize a layout token, `None` for malformed or wrong-length tokens
pub fn decode(token: &str) -> Option<Grid> {
    decode_detailed(token).ok()
}

/// Deserialize a layout token, reporting why it was rejected
///
/// # Errors
///
/// Returns an error if:
/// - The token is not valid base64
/// - The decoded bytes are not UTF-8
/// - The payload does not hold exactly [`GRID_CELL_COUNT`] cells
pub fn decode_detailed(token: &str) -> Result<Grid, DecodeError> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|source| DecodeError::Transform { source })?;
    let payload = String::from_utf8(bytes).map_err(|source| DecodeError::Text { source })?;

    let cells: Vec<Cell> = payload.split(CELL_SEPARATOR).map(parse_cell).collect();
    let found = cells.len();
    Grid::from_cells(cells).ok_or(DecodeError::CellCount { found })
}

// Splits on the first separator only; ids are not checked against the catalog
fn parse_cell(text: &str) -> Cell {
    let (id, rotation) = text
        .split_once(FIELD_SEPARATOR)
        .map_or((text, None), |(id, rotation)| (id, Some(rotation)));

    let id = id.trim();
    let tile_id = if id.is_empty() {
        TileId::blank()
    } else {
        TileId::new(id)
    };

    Cell::new(tile_id, rotation.map_or(Rotation::Deg0, parse_rotation))
}

fn parse_rotation(text: &str) -> Rotation {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(|degrees| u16::try_from(degrees.rem_euclid(360)).ok())
        .and_then(Rotation::from_degrees)
        .unwrap_or_default()
}
