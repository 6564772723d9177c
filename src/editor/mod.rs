//! Interactive editing on top of the layout grid
//!
//! This module contains:
//! - Tool modes and the modifier precedence table
//! - The pure state transition function
//! - Debounced page URL updates and the session tying them together

/// Editor state and transitions
pub mod controller;
/// Last-write-wins debouncing
pub mod debounce;
/// Page-bound editing sessions
pub mod session;
/// Tools and modifier keys
pub mod tool;

pub use controller::{EditorEvent, EditorState, transition};
pub use session::{EditorSession, Notice};
pub use tool::{Modifiers, ToolMode};
