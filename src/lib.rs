//! Tile layout editor for laptop chassis mockups
//!
//! A layout is a fixed grid of 21 cells, each holding a tile id and a
//! quarter-turn rotation. Layouts are edited through paint, swap and rotate
//! tools, shared as base64 tokens in a `layout` URL parameter, exported as
//! PNG, and served to the browser by a small static server.

#![forbid(unsafe_code)]

/// Tool handling, state transitions and page-bound editing sessions
pub mod editor;
/// Codec, export, sharing, scripting, CLI and error handling
pub mod io;
/// Tile catalog and the cell grid
pub mod layout;
/// Static content server
pub mod server;

pub use io::error::{Result, TileError};
