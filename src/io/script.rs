//! Line-oriented input scripts that drive an editing session
//!
//! Each non-empty line is one command; `#` starts a comment. Time only moves
//! on `wait`, so debounced URL rewrites happen at deterministic points.

use crate::editor::controller::EditorEvent;
use crate::editor::session::EditorSession;
use crate::editor::tool::{Modifiers, ToolMode};
use crate::io::configuration::EXPORT_FILENAME;
use crate::io::error::Result;
use crate::io::image::ExportOptions;
use crate::io::share::ClipboardBackend;
use crate::layout::{CellIndex, TileId};
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Modifier key named in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    /// Shift
    Shift,
    /// Control
    Ctrl,
    /// Command
    Meta,
}

impl ModifierKey {
    fn parse(text: &str) -> std::result::Result<Self, String> {
        match text.to_ascii_lowercase().as_str() {
            "shift" => Ok(Self::Shift),
            "ctrl" | "control" => Ok(Self::Ctrl),
            "meta" | "cmd" | "command" => Ok(Self::Meta),
            _ => Err(format!("unknown modifier '{text}'")),
        }
    }

    const fn key_name(self) -> &'static str {
        match self {
            Self::Shift => "Shift",
            Self::Ctrl => "Control",
            Self::Meta => "Meta",
        }
    }

    const fn set(self, modifiers: &mut Modifiers, held: bool) {
        match self {
            Self::Shift => modifiers.shift = held,
            Self::Ctrl => modifiers.ctrl = held,
            Self::Meta => modifiers.meta = held,
        }
    }
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// `tool <paint|swap|rotate>`
    Tool(ToolMode),
    /// `tile <id>`
    Tile(TileId),
    /// `press <shift|ctrl|meta>`
    Press(ModifierKey),
    /// `release <shift|ctrl|meta>`
    Release(ModifierKey),
    /// `key <key>`
    Key(String),
    /// `focus <text|canvas>`
    Focus {
        /// Whether a text input gains focus
        text_input: bool,
    },
    /// `click <index>`
    Click(CellIndex),
    /// `random`
    Randomize,
    /// `clear`
    Clear,
    /// `wait <ms>`
    Wait(Duration),
    /// `show`
    Show,
    /// `token`
    Token,
    /// `share`
    Share,
    /// `export [path]`
    Export(PathBuf),
}

impl ScriptCommand {
    /// Parse a script line; `Ok(None)` for blank lines and comments
    ///
    /// # Errors
    ///
    /// Returns a description of the problem for unknown commands or bad arguments
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let argument = words.next();
        let required = |name: &str| argument.ok_or_else(|| format!("'{command}' needs {name}"));

        let parsed = match command.to_ascii_lowercase().as_str() {
            "tool" => Self::Tool(required("a tool name")?.parse()?),
            "tile" => Self::Tile(TileId::new(required("a tile id")?)),
            "press" => Self::Press(ModifierKey::parse(required("a modifier")?)?),
            "release" => Self::Release(ModifierKey::parse(required("a modifier")?)?),
            "key" => Self::Key(required("a key")?.to_string()),
            "focus" => match required("'text' or 'canvas'")? {
                "text" => Self::Focus { text_input: true },
                "canvas" => Self::Focus { text_input: false },
                other => return Err(format!("unknown focus target '{other}'")),
            },
            "click" => {
                let raw = required("a cell index")?;
                let index = raw
                    .parse::<usize>()
                    .ok()
                    .and_then(CellIndex::new)
                    .ok_or_else(|| format!("'{raw}' is not a cell index"))?;
                Self::Click(index)
            }
            "random" => Self::Randomize,
            "clear" => Self::Clear,
            "wait" => {
                let raw = required("milliseconds")?;
                let millis = raw
                    .parse::<u64>()
                    .map_err(|error| format!("'{raw}' is not a duration: {error}"))?;
                Self::Wait(Duration::from_millis(millis))
            }
            "show" => Self::Show,
            "token" => Self::Token,
            "share" => Self::Share,
            "export" => Self::Export(
                argument.map_or_else(|| PathBuf::from(EXPORT_FILENAME), PathBuf::from),
            ),
            _ => return Err(format!("unknown command '{command}'")),
        };
        Ok(Some(parsed))
    }
}

/// Executes scripts against a session, reporting to a writer
pub struct ScriptRunner<W: Write, R: Rng> {
    session: EditorSession<R>,
    out: W,
    clock: Instant,
    held: Modifiers,
    text_input_focused: bool,
    export_options: ExportOptions,
    clipboards: Vec<Box<dyn ClipboardBackend>>,
}

impl<W: Write, R: Rng> ScriptRunner<W, R> {
    /// Create a runner around a session
    pub fn new(session: EditorSession<R>, out: W, export_options: ExportOptions) -> Self {
        Self {
            session,
            out,
            clock: Instant::now(),
            held: Modifiers::NONE,
            text_input_focused: false,
            export_options,
            clipboards: Vec::new(),
        }
    }

    /// Clipboard backends tried in order by `share`
    #[must_use]
    pub fn with_clipboards(mut self, clipboards: Vec<Box<dyn ClipboardBackend>>) -> Self {
        self.clipboards = clipboards;
        self
    }

    /// The driven session
    pub const fn session(&self) -> &EditorSession<R> {
        &self.session
    }

    /// Consume the runner, returning the session and writer
    pub fn into_parts(self) -> (EditorSession<R>, W) {
        (self.session, self.out)
    }

    /// Run every line of `input`, then flush any pending URL rewrite
    ///
    /// Bad lines are reported to the writer and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the script or writing output fails
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<()> {
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            match ScriptCommand::parse(&line) {
                Ok(Some(command)) => self.execute(&command)?,
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(line = number + 1, %reason, "skipping script line");
                    writeln!(self.out, "line {}: {reason}", number + 1)?;
                }
            }
        }

        if let Some(url) = self.session.flush() {
            writeln!(self.out, "url {url}")?;
        }
        Ok(())
    }

    /// Execute a single command at the current virtual time
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails
    pub fn execute(&mut self, command: &ScriptCommand) -> Result<()> {
        match command {
            ScriptCommand::Tool(tool) => self.dispatch(&EditorEvent::SelectTool(*tool)),
            ScriptCommand::Tile(tile_id) => {
                self.dispatch(&EditorEvent::SelectTile(tile_id.clone()))
            }
            ScriptCommand::Press(key) => {
                key.set(&mut self.held, true);
                self.dispatch(&EditorEvent::KeyDown {
                    key: key.key_name().to_string(),
                    modifiers: self.held,
                    text_input_focused: self.text_input_focused,
                });
            }
            ScriptCommand::Release(key) => {
                key.set(&mut self.held, false);
                self.dispatch(&EditorEvent::KeyUp {
                    modifiers: self.held,
                });
            }
            ScriptCommand::Key(key) => self.dispatch(&EditorEvent::KeyDown {
                key: key.clone(),
                modifiers: self.held,
                text_input_focused: self.text_input_focused,
            }),
            ScriptCommand::Focus { text_input } => self.text_input_focused = *text_input,
            ScriptCommand::Click(index) => self.dispatch(&EditorEvent::CellClick {
                index: *index,
                modifiers: self.held,
            }),
            ScriptCommand::Randomize => self.dispatch(&EditorEvent::Randomize),
            ScriptCommand::Clear => self.dispatch(&EditorEvent::Clear),
            ScriptCommand::Wait(duration) => {
                self.clock += *duration;
                if let Some(url) = self.session.tick(self.clock) {
                    writeln!(self.out, "url {url}")?;
                }
            }
            ScriptCommand::Show => self.show()?,
            ScriptCommand::Token => writeln!(self.out, "{}", self.session.token())?,
            ScriptCommand::Share => {
                let mut backends: Vec<&mut dyn ClipboardBackend> = self
                    .clipboards
                    .iter_mut()
                    .map(|backend| backend.as_mut() as &mut dyn ClipboardBackend)
                    .collect();
                let notice = self.session.share(&mut backends);
                writeln!(self.out, "{notice}")?;
            }
            ScriptCommand::Export(path) => {
                let notice = self.session.export(&self.export_options, path);
                writeln!(self.out, "{notice}")?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, event: &EditorEvent) {
        self.session.handle(event, self.clock);
    }

    fn show(&mut self) -> Result<()> {
        let state = self.session.state();
        let anchor = state.swap_anchor.map(|anchor| anchor.index.get());
        writeln!(
            self.out,
            "tool {} (highlight {}), tile {}",
            state.tool,
            state.highlighted_tool(),
            state.selected_tile
        )?;
        for (row_index, row) in state.grid.rows().enumerate() {
            let line = row
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    let index = row_index * row.len() + column;
                    let marker = if anchor == Some(index) { "*" } else { " " };
                    format!("{marker}{:<16}", format!("{}:{}", cell.tile_id, cell.rotation))
                })
                .collect::<String>();
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
