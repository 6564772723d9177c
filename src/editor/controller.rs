//! Editor state and its event-driven transitions
//!
//! All interaction state lives in [`EditorState`]. [`transition`] maps a
//! state and an event to the next state without touching anything else; the
//! only outside input is the random generator used by `Randomize`.

use crate::editor::tool::{ClickAction, Modifiers, ToolMode, click_action};
use crate::layout::{CellIndex, Grid, TileId, catalog};
use rand::Rng;

/// Which gesture created a pending swap anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOrigin {
    /// A click with the swap tool active
    Tool,
    /// A Ctrl/Cmd click
    Modifier,
}

/// First cell of a pending two-click swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAnchor {
    /// Anchored cell
    pub index: CellIndex,
    /// Gesture that set it
    pub origin: AnchorOrigin,
}

/// Complete editor interaction state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Current layout snapshot
    pub grid: Grid,
    /// Tool used by unmodified clicks
    pub tool: ToolMode,
    /// Tile placed by the paint tool
    pub selected_tile: TileId,
    /// Pending swap, shared by the swap tool and Ctrl/Cmd clicks
    pub swap_anchor: Option<SwapAnchor>,
    /// Tool highlighted while a modifier key is held
    pub modifier_tool: Option<ToolMode>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Grid::empty())
    }
}

impl EditorState {
    /// Fresh state around an initial grid
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            tool: ToolMode::default(),
            selected_tile: TileId::new(catalog::fallback().id),
            swap_anchor: None,
            modifier_tool: None,
        }
    }

    /// Tool to highlight: the modifier tool while one is held, else the active tool
    pub fn highlighted_tool(&self) -> ToolMode {
        self.modifier_tool.unwrap_or(self.tool)
    }
}

/// Input delivered to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Toolbar selection
    SelectTool(ToolMode),
    /// Palette selection; unknown ids are ignored
    SelectTile(TileId),
    /// Key pressed
    KeyDown {
        /// Key name, e.g. `"p"`, `"Shift"`, `"Control"`, `"Meta"`
        key: String,
        /// Modifiers held including this key
        modifiers: Modifiers,
        /// Whether focus is inside a text input
        text_input_focused: bool,
    },
    /// Key released
    KeyUp {
        /// Modifiers still held after the release
        modifiers: Modifiers,
    },
    /// Pointer click on a cell
    CellClick {
        /// Clicked cell
        index: CellIndex,
        /// Modifiers held during the click
        modifiers: Modifiers,
    },
    /// Fill every cell at random
    Randomize,
    /// Reset every cell
    Clear,
    /// Replace the grid wholesale, e.g. from a decoded share link
    LoadGrid(Grid),
}

/// Compute the state following `event`
pub fn transition<R: Rng + ?Sized>(
    state: &EditorState,
    event: &EditorEvent,
    rng: &mut R,
) -> EditorState {
    let mut next = state.clone();
    match event {
        EditorEvent::SelectTool(tool) => select_tool(&mut next, *tool),
        EditorEvent::SelectTile(tile_id) => {
            if catalog::contains(tile_id.as_str()) {
                next.selected_tile = tile_id.clone();
            }
        }
        EditorEvent::KeyDown {
            key,
            modifiers,
            text_input_focused,
        } => key_down(&mut next, key, *modifiers, *text_input_focused),
        EditorEvent::KeyUp { modifiers } => key_up(&mut next, *modifiers),
        EditorEvent::CellClick { index, modifiers } => click(&mut next, *index, *modifiers),
        EditorEvent::Randomize => next.grid = state.grid.randomized(rng),
        EditorEvent::Clear => next.grid = state.grid.cleared(),
        EditorEvent::LoadGrid(grid) => next.grid = grid.clone(),
    }
    next
}

fn select_tool(state: &mut EditorState, tool: ToolMode) {
    state.tool = tool;
    state.swap_anchor = None;
}

fn key_down(state: &mut EditorState, key: &str, modifiers: Modifiers, text_input_focused: bool) {
    if is_modifier_key(key) {
        state.modifier_tool = modifiers.indicated_tool();
        return;
    }

    // Typing and host shortcuts such as Ctrl+S keep their meaning
    if text_input_focused || modifiers.command() {
        return;
    }
    if let Some(tool) = ToolMode::from_shortcut(key) {
        select_tool(state, tool);
    }
}

fn key_up(state: &mut EditorState, still_held: Modifiers) {
    state.modifier_tool = still_held.indicated_tool();
    if still_held.any() {
        return;
    }
    if state
        .swap_anchor
        .is_some_and(|anchor| anchor.origin == AnchorOrigin::Modifier)
    {
        state.swap_anchor = None;
    }
}

fn click(state: &mut EditorState, index: CellIndex, modifiers: Modifiers) {
    match click_action(modifiers) {
        ClickAction::Rotate => state.grid = state.grid.rotated(index),
        ClickAction::SwapProtocol => swap_step(state, index, AnchorOrigin::Modifier),
        ClickAction::ActiveTool => match state.tool {
            ToolMode::Paint => {
                state.grid = state.grid.painted(index, state.selected_tile.clone());
            }
            ToolMode::Rotate => state.grid = state.grid.rotated(index),
            ToolMode::Swap => swap_step(state, index, AnchorOrigin::Tool),
        },
    }
}

fn swap_step(state: &mut EditorState, index: CellIndex, origin: AnchorOrigin) {
    match state.swap_anchor.take() {
        None => state.swap_anchor = Some(SwapAnchor { index, origin }),
        // Second click on the anchor cancels
        Some(anchor) if anchor.index == index => {}
        Some(anchor) => state.grid = state.grid.swapped(anchor.index, index),
    }
}

fn is_modifier_key(key: &str) -> bool {
    matches!(
        key,
        "Shift" | "Control" | "Meta" | "OS" | "Command" | "shift" | "ctrl" | "meta" | "cmd"
    )
}
