//! Tests for editor state transitions

#[cfg(test)]
mod tests {
    use chassistile::editor::controller::{
        AnchorOrigin, EditorEvent, EditorState, SwapAnchor, transition,
    };
    use chassistile::editor::tool::{Modifiers, ToolMode};
    use chassistile::layout::{CellIndex, Grid, Rotation, TileId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn index(i: usize) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    fn apply(state: &EditorState, events: &[EditorEvent]) -> EditorState {
        let mut rng = StdRng::seed_from_u64(3);
        events
            .iter()
            .fold(state.clone(), |current, event| transition(&current, event, &mut rng))
    }

    fn click(i: usize) -> EditorEvent {
        EditorEvent::CellClick {
            index: index(i),
            modifiers: Modifiers::NONE,
        }
    }

    fn click_with(i: usize, modifiers: Modifiers) -> EditorEvent {
        EditorEvent::CellClick {
            index: index(i),
            modifiers,
        }
    }

    fn key(key: &str, modifiers: Modifiers, text_input_focused: bool) -> EditorEvent {
        EditorEvent::KeyDown {
            key: key.to_string(),
            modifiers,
            text_input_focused,
        }
    }

    fn patterned() -> EditorState {
        let grid = Grid::empty()
            .painted(index(3), TileId::new("amd"))
            .painted(index(5), TileId::new("intel"))
            .rotated(index(5));
        EditorState::new(grid)
    }

    // Tests the initial state defaults
    // Verified by defaulting to the swap tool
    #[test]
    fn test_default_state() {
        let state = EditorState::default();
        assert_eq!(state.tool, ToolMode::Paint);
        assert_eq!(state.selected_tile.as_str(), "black-vert");
        assert_eq!(state.swap_anchor, None);
        assert_eq!(state.modifier_tool, None);
        assert_eq!(state.grid, Grid::empty());
    }

    // Tests paint tool places the selected tile
    // Verified by painting the default tile regardless of selection
    #[test]
    fn test_paint_click_uses_selected_tile() {
        let state = apply(
            &EditorState::default(),
            &[EditorEvent::SelectTile(TileId::new("amd")), click(0)],
        );
        assert_eq!(state.grid.cell(index(0)).tile_id.as_str(), "amd");
        assert_eq!(state.grid.cell(index(1)).tile_id.as_str(), "blank");
    }

    // Tests selecting an unknown tile keeps the current selection
    // Verified by accepting any id
    #[test]
    fn test_select_unknown_tile_ignored() {
        let state = apply(
            &EditorState::default(),
            &[
                EditorEvent::SelectTile(TileId::new("linux")),
                EditorEvent::SelectTile(TileId::new("no-such-tile")),
            ],
        );
        assert_eq!(state.selected_tile.as_str(), "linux");
    }

    // Tests the rotate tool rotates on plain clicks
    // Verified by painting under the rotate tool
    #[test]
    fn test_rotate_tool_click() {
        let state = apply(
            &patterned(),
            &[EditorEvent::SelectTool(ToolMode::Rotate), click(5)],
        );
        assert_eq!(state.grid.cell(index(5)).rotation, Rotation::Deg180);
        assert_eq!(state.grid.cell(index(5)).tile_id.as_str(), "intel");
    }

    // Tests the two-click swap protocol
    // Verified by swapping on the first click
    #[test]
    fn test_swap_tool_two_clicks() {
        let start = patterned();
        let anchored = apply(&start, &[EditorEvent::SelectTool(ToolMode::Swap), click(3)]);
        assert_eq!(anchored.grid, start.grid);
        assert_eq!(
            anchored.swap_anchor,
            Some(SwapAnchor {
                index: index(3),
                origin: AnchorOrigin::Tool,
            })
        );

        let swapped = apply(&anchored, &[click(5)]);
        assert_eq!(swapped.swap_anchor, None);
        assert_eq!(swapped.grid, start.grid.swapped(index(3), index(5)));
    }

    // Tests clicking the anchor twice cancels without mutation
    // Verified by swapping the anchor with itself and keeping the anchor
    #[test]
    fn test_swap_same_cell_cancels() {
        let start = patterned();
        let state = apply(
            &start,
            &[EditorEvent::SelectTool(ToolMode::Swap), click(3), click(3)],
        );
        assert_eq!(state.grid, start.grid);
        assert_eq!(state.swap_anchor, None);
    }

    // Tests shift-click rotates even under the paint tool
    // Verified by letting the active tool win over shift
    #[test]
    fn test_shift_click_rotates_under_paint() {
        let start = patterned();
        let state = apply(&start, &[click_with(5, Modifiers::SHIFT)]);
        assert_eq!(state.tool, ToolMode::Paint);
        assert_eq!(state.grid, start.grid.rotated(index(5)));
        assert_eq!(state.grid.cell(index(5)).tile_id.as_str(), "intel");
    }

    // Tests ctrl-clicks run the swap protocol under any tool
    // Verified by rotating on ctrl-click
    #[test]
    fn test_ctrl_click_swaps_under_rotate() {
        let start = patterned();
        let state = apply(
            &start,
            &[
                EditorEvent::SelectTool(ToolMode::Rotate),
                click_with(3, Modifiers::CTRL),
                click_with(5, Modifiers::META),
            ],
        );
        assert_eq!(state.grid, start.grid.swapped(index(3), index(5)));
        assert_eq!(state.swap_anchor, None);
    }

    // Tests the swap tool and ctrl-clicks share one anchor
    // Verified by keeping a separate anchor for modifier swaps
    #[test]
    fn test_anchor_is_shared() {
        let start = patterned();
        let state = apply(
            &start,
            &[
                EditorEvent::SelectTool(ToolMode::Swap),
                click(3),
                click_with(5, Modifiers::CTRL),
            ],
        );
        assert_eq!(state.grid, start.grid.swapped(index(3), index(5)));
    }

    // Tests selecting a tool clears a pending anchor
    // Verified by leaving the anchor on tool change
    #[test]
    fn test_tool_selection_clears_anchor() {
        let state = apply(
            &patterned(),
            &[
                EditorEvent::SelectTool(ToolMode::Swap),
                click(3),
                EditorEvent::SelectTool(ToolMode::Swap),
            ],
        );
        assert_eq!(state.swap_anchor, None);
    }

    // Tests keyboard shortcuts switch tools and clear the anchor
    // Verified by ignoring uppercase shortcuts
    #[test]
    fn test_shortcut_switches_tool() {
        let state = apply(
            &patterned(),
            &[
                key("s", Modifiers::NONE, false),
                click(3),
                key("R", Modifiers::NONE, false),
            ],
        );
        assert_eq!(state.tool, ToolMode::Rotate);
        assert_eq!(state.swap_anchor, None);
    }

    // Tests shortcuts are ignored while typing in a text input
    // Verified by dropping the focus check
    #[test]
    fn test_shortcut_suppressed_in_text_input() {
        let state = apply(&patterned(), &[key("r", Modifiers::NONE, true)]);
        assert_eq!(state.tool, ToolMode::Paint);
    }

    // Tests ctrl+s stays with the host instead of selecting swap
    // Verified by dropping the command-key check
    #[test]
    fn test_shortcut_suppressed_with_command_key() {
        let state = apply(&patterned(), &[key("s", Modifiers::CTRL, false)]);
        assert_eq!(state.tool, ToolMode::Paint);
    }

    // Tests modifier presses drive the highlight indicator
    // Verified by leaving the indicator set after release
    #[test]
    fn test_modifier_indicator() {
        let shifted = apply(&patterned(), &[key("Shift", Modifiers::SHIFT, false)]);
        assert_eq!(shifted.modifier_tool, Some(ToolMode::Rotate));
        assert_eq!(shifted.highlighted_tool(), ToolMode::Rotate);

        let released = apply(
            &shifted,
            &[EditorEvent::KeyUp {
                modifiers: Modifiers::NONE,
            }],
        );
        assert_eq!(released.modifier_tool, None);
        assert_eq!(released.highlighted_tool(), ToolMode::Paint);

        let control = apply(&patterned(), &[key("Control", Modifiers::CTRL, false)]);
        assert_eq!(control.modifier_tool, Some(ToolMode::Swap));
    }

    // Tests releasing every modifier cancels a modifier-created anchor
    // Verified by keeping modifier anchors after release
    #[test]
    fn test_modifier_release_cancels_modifier_anchor() {
        let start = patterned();
        let state = apply(
            &start,
            &[
                key("Control", Modifiers::CTRL, false),
                click_with(3, Modifiers::CTRL),
                EditorEvent::KeyUp {
                    modifiers: Modifiers::NONE,
                },
                click(5),
            ],
        );
        assert_eq!(state.swap_anchor, None);
        // The later plain click paints instead of completing a swap
        assert_eq!(state.grid.cell(index(3)).tile_id.as_str(), "amd");
        assert_eq!(state.grid.cell(index(5)).tile_id.as_str(), "black-vert");
    }

    // Tests a partial release keeps the anchor and updates the indicator
    // Verified by clearing on any key release
    #[test]
    fn test_partial_release_keeps_anchor() {
        let both = Modifiers {
            shift: true,
            ctrl: true,
            meta: false,
        };
        let state = apply(
            &patterned(),
            &[
                click_with(3, Modifiers::CTRL),
                key("Shift", both, false),
                EditorEvent::KeyUp {
                    modifiers: Modifiers::CTRL,
                },
            ],
        );
        assert_eq!(state.swap_anchor.map(|a| a.index), Some(index(3)));
        assert_eq!(state.modifier_tool, Some(ToolMode::Swap));
    }

    // Tests modifier release leaves a swap-tool anchor alone
    // Verified by clearing every anchor on release
    #[test]
    fn test_modifier_release_keeps_tool_anchor() {
        let state = apply(
            &patterned(),
            &[
                EditorEvent::SelectTool(ToolMode::Swap),
                click(3),
                key("Shift", Modifiers::SHIFT, false),
                EditorEvent::KeyUp {
                    modifiers: Modifiers::NONE,
                },
            ],
        );
        assert_eq!(state.swap_anchor.map(|a| a.origin), Some(AnchorOrigin::Tool));
    }

    // Tests clear, load and randomize replace the grid
    // Verified by ignoring LoadGrid
    #[test]
    fn test_grid_wide_events() {
        let loaded_grid = Grid::empty().painted(index(9), TileId::new("gear"));
        let loaded = apply(
            &patterned(),
            &[EditorEvent::LoadGrid(loaded_grid.clone())],
        );
        assert_eq!(loaded.grid, loaded_grid);

        let cleared = apply(&loaded, &[EditorEvent::Clear]);
        assert_eq!(cleared.grid, Grid::empty());

        let randomized = apply(&cleared, &[EditorEvent::Randomize]);
        assert_eq!(randomized.grid.cells().len(), 21);
        assert_eq!(randomized.tool, cleared.tool);
    }

    // Tests transitions never mutate the input state
    // Verified by editing the input grid in place
    #[test]
    fn test_transition_is_pure() {
        let start = patterned();
        let snapshot = start.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let _next = transition(&start, &click(0), &mut rng);
        assert_eq!(start, snapshot);
    }
}
