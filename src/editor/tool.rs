//! Tool modes, modifier keys and the click precedence table

use std::fmt;
use std::str::FromStr;

/// Editing tool applied by plain clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolMode {
    /// Place the selected tile
    #[default]
    Paint,
    /// Exchange two cells over two clicks
    Swap,
    /// Turn a cell a quarter turn
    Rotate,
}

impl ToolMode {
    /// All tools in toolbar order
    pub const ALL: [Self; 3] = [Self::Paint, Self::Swap, Self::Rotate];

    /// Lowercase tool name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Swap => "swap",
            Self::Rotate => "rotate",
        }
    }

    /// Keyboard shortcut for the tool
    pub const fn shortcut(self) -> char {
        match self {
            Self::Paint => 'p',
            Self::Swap => 's',
            Self::Rotate => 'r',
        }
    }

    /// Tool bound to a shortcut key, case-insensitive
    pub fn from_shortcut(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let first = first.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == first)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == lowered)
            .or_else(|| Self::from_shortcut(&lowered))
            .ok_or_else(|| format!("unknown tool '{s}' (expected paint, swap or rotate)"))
    }
}

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift
    pub shift: bool,
    /// Control
    pub ctrl: bool,
    /// Command / Windows key
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
    };

    /// Only Shift held
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        meta: false,
    };

    /// Only Control held
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        meta: false,
    };

    /// Only Command held
    pub const META: Self = Self {
        shift: false,
        ctrl: false,
        meta: true,
    };

    /// Whether any modifier is held
    pub const fn any(self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    /// Whether Control or Command is held
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Tool highlighted while these modifiers are held, if any
    pub fn indicated_tool(self) -> Option<ToolMode> {
        MODIFIER_PRECEDENCE
            .iter()
            .find(|rule| (rule.matches)(self))
            .and_then(|rule| match rule.action {
                ClickAction::Rotate => Some(ToolMode::Rotate),
                ClickAction::SwapProtocol => Some(ToolMode::Swap),
                ClickAction::ActiveTool => None,
            })
    }
}

/// What a click on a cell does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Rotate the clicked cell
    Rotate,
    /// Advance the two-click swap
    SwapProtocol,
    /// Defer to the active tool
    ActiveTool,
}

/// One row of the precedence table
#[derive(Debug, Clone, Copy)]
pub struct PrecedenceRule {
    /// Human readable condition
    pub label: &'static str,
    /// Whether the rule applies to the held modifiers
    pub matches: fn(Modifiers) -> bool,
    /// Action taken when it applies
    pub action: ClickAction,
}

/// Click precedence, first matching row wins
///
/// Shift beats Control/Command when both are held; the last row always matches.
pub const MODIFIER_PRECEDENCE: [PrecedenceRule; 3] = [
    PrecedenceRule {
        label: "shift",
        matches: |m| m.shift,
        action: ClickAction::Rotate,
    },
    PrecedenceRule {
        label: "ctrl/cmd",
        matches: Modifiers::command,
        action: ClickAction::SwapProtocol,
    },
    PrecedenceRule {
        label: "none",
        matches: |_| true,
        action: ClickAction::ActiveTool,
    },
];

/// Resolve the modifier-level action for a click
pub fn click_action(modifiers: Modifiers) -> ClickAction {
    MODIFIER_PRECEDENCE
        .iter()
        .find(|rule| (rule.matches)(modifiers))
        .map_or(ClickAction::ActiveTool, |rule| rule.action)
}

/// Resolve the concrete tool a click runs, given the active tool
pub fn effective_tool(modifiers: Modifiers, active: ToolMode) -> ToolMode {
    match click_action(modifiers) {
        ClickAction::Rotate => ToolMode::Rotate,
        ClickAction::SwapProtocol => ToolMode::Swap,
        ClickAction::ActiveTool => active,
    }
}
