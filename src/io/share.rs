//! Share links and clipboard delivery with fallbacks
//!
//! A share link is the page origin and path with a single `layout` query
//! parameter. Copying tries each clipboard backend in order and ends with
//! handing the text back for manual copying when every backend fails.

use crate::io::configuration::LAYOUT_QUERY_PARAM;
use std::fmt;
use std::io::Write;
use url::Url;

/// Page URL with the query replaced by `?layout=<token>` and no fragment
pub fn share_url(page: &Url, token: &str) -> Url {
    let mut url = page.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(LAYOUT_QUERY_PARAM, token);
    url
}

/// The `layout` query parameter of a page URL, if present
///
/// Form decoding turns an unescaped `+` into a space; base64 never contains
/// spaces, so they are mapped back.
pub fn layout_token(page: &Url) -> Option<String> {
    page.query_pairs()
        .find(|(key, _)| key == LAYOUT_QUERY_PARAM)
        .map(|(_, value)| value.replace(' ', "+"))
}

/// Failure reported by a clipboard backend
#[derive(Debug)]
pub struct ClipboardError {
    /// Backend that failed
    pub backend: &'static str,
    /// Why it failed
    pub reason: String,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clipboard backend '{}' failed: {}", self.backend, self.reason)
    }
}

impl std::error::Error for ClipboardError {}

/// A way of placing text on the system clipboard
pub trait ClipboardBackend {
    /// Short backend name for logs and notices
    fn name(&self) -> &'static str;

    /// Place `text` on the clipboard
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or rejects the write
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Result of a share attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Text is on the clipboard
    Copied {
        /// Backend that succeeded
        backend: &'static str,
    },
    /// Every backend failed; the user must copy the text by hand
    Manual {
        /// Text to copy
        text: String,
    },
}

/// Try each backend in order until one accepts the text
pub fn copy_with_fallback(backends: &mut [&mut dyn ClipboardBackend], text: &str) -> ShareOutcome {
    for backend in backends.iter_mut() {
        match backend.write_text(text) {
            Ok(()) => {
                tracing::debug!(backend = backend.name(), "copied share link");
                return ShareOutcome::Copied {
                    backend: backend.name(),
                };
            }
            Err(error) => tracing::warn!(%error, "clipboard backend failed, trying next"),
        }
    }
    ShareOutcome::Manual {
        text: text.to_string(),
    }
}

/// Terminal clipboard using the OSC 52 escape sequence
///
/// Only attempted when the writer is an interactive terminal.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    interactive: bool,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Wrap a terminal writer
    pub const fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD;

        if !self.interactive {
            return Err(ClipboardError {
                backend: self.name(),
                reason: "output is not a terminal".to_string(),
            });
        }
        let payload = STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{payload}\x07")
            .and_then(|()| self.out.flush())
            .map_err(|error| ClipboardError {
                backend: "osc52",
                reason: error.to_string(),
            })
    }
}

/// System clipboard through `arboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Backend for the desktop clipboard
    pub const fn new() -> Self {
        Self
    }
}

impl ClipboardBackend for ArboardClipboard {
    fn name(&self) -> &'static str {
        "arboard"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let failure = |error: arboard::Error| ClipboardError {
            backend: "arboard",
            reason: error.to_string(),
        };

        let mut clipboard = arboard::Clipboard::new().map_err(failure)?;
        clipboard.set_text(text).map_err(failure)
    }
}

/// Backends worth trying from a terminal, in order: the desktop clipboard,
/// then OSC 52 on stderr when it is a terminal
pub fn system_backends() -> Vec<Box<dyn ClipboardBackend>> {
    use std::io::IsTerminal;

    let stderr = std::io::stderr();
    let interactive = stderr.is_terminal();
    vec![
        Box::new(ArboardClipboard::new()),
        Box::new(Osc52Clipboard::new(stderr, interactive)),
    ]
}
