//! An editing session bound to a page URL
//!
//! The session seeds its grid from the `layout` query parameter once, applies
//! input events through the controller, and keeps the page URL in step with
//! the grid through a debounced, non-navigating rewrite.

use crate::editor::controller::{EditorEvent, EditorState, transition};
use crate::editor::debounce::Debouncer;
use crate::io::codec;
use crate::io::configuration::URL_UPDATE_DEBOUNCE_MS;
use crate::io::image::{ExportOptions, export_grid_as_png};
use crate::io::share::{ClipboardBackend, ShareOutcome, copy_with_fallback, layout_token, share_url};
use crate::layout::Grid;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use url::Url;

/// User-facing outcome of a fire-and-forget action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Export written
    Exported {
        /// Output file
        path: PathBuf,
    },
    /// Export did not complete; the grid is unchanged
    ExportFailed {
        /// Reason shown to the user
        message: String,
    },
    /// Share link placed on the clipboard
    Copied {
        /// Clipboard backend used
        backend: &'static str,
        /// The link
        url: String,
    },
    /// No clipboard worked; the user must copy the link by hand
    ManualCopy {
        /// The link
        url: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exported { path } => write!(f, "Saved {}", path.display()),
            Self::ExportFailed { message } => write!(f, "Export failed: {message}"),
            Self::Copied { backend, url } => write!(f, "Share link copied ({backend}): {url}"),
            Self::ManualCopy { url } => write!(f, "Copy this link manually: {url}"),
        }
    }
}

/// Editor state plus the page URL it is mirrored into
pub struct EditorSession<R: Rng = ThreadRng> {
    state: EditorState,
    page_url: Url,
    url_sync: Debouncer<String>,
    rng: R,
}

impl EditorSession<ThreadRng> {
    /// Open a session on a page URL, seeding the grid from its `layout` parameter
    pub fn open(page_url: Url) -> Self {
        Self::open_with_rng(page_url, rand::rng())
    }
}

impl<R: Rng> EditorSession<R> {
    /// Open a session with an explicit random generator
    ///
    /// A missing or undecodable `layout` parameter yields the empty grid.
    pub fn open_with_rng(page_url: Url, rng: R) -> Self {
        let grid = layout_token(&page_url)
            .and_then(|token| match codec::decode_detailed(&token) {
                Ok(grid) => Some(grid),
                Err(error) => {
                    tracing::debug!(%error, "ignoring layout from page URL");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            state: EditorState::new(grid),
            page_url,
            url_sync: Debouncer::new(Duration::from_millis(URL_UPDATE_DEBOUNCE_MS)),
            rng,
        }
    }

    /// Current interaction state
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Current grid snapshot
    pub const fn grid(&self) -> &Grid {
        &self.state.grid
    }

    /// Page URL as last rewritten
    pub const fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Whether a URL rewrite is waiting for the quiet period to end
    pub const fn url_update_pending(&self) -> bool {
        self.url_sync.is_pending()
    }

    /// Apply an input event; returns whether the grid changed
    pub fn handle(&mut self, event: &EditorEvent, now: Instant) -> bool {
        let next = transition(&self.state, event, &mut self.rng);
        let changed = next.grid != self.state.grid;
        self.state = next;

        if changed {
            self.url_sync.schedule(now, codec::encode(&self.state.grid));
        }
        changed
    }

    /// Rewrite the page URL if the quiet period has passed
    pub fn tick(&mut self, now: Instant) -> Option<&Url> {
        let token = self.url_sync.poll(now)?;
        Some(self.replace_url(&token))
    }

    /// Rewrite the page URL now if an update is pending
    pub fn flush(&mut self) -> Option<&Url> {
        let token = self.url_sync.cancel()?;
        Some(self.replace_url(&token))
    }

    fn replace_url(&mut self, token: &str) -> &Url {
        self.page_url = share_url(&self.page_url, token);
        tracing::debug!(url = %self.page_url, "replaced page URL");
        &self.page_url
    }

    /// Layout token of the current grid
    pub fn token(&self) -> String {
        codec::encode(&self.state.grid)
    }

    /// Fully qualified link reproducing the current grid
    pub fn share_url(&self) -> Url {
        share_url(&self.page_url, &self.token())
    }

    /// Copy the share link, falling back through `backends` to manual copying
    pub fn share(&self, backends: &mut [&mut dyn ClipboardBackend]) -> Notice {
        let url = self.share_url().to_string();
        match copy_with_fallback(backends, &url) {
            ShareOutcome::Copied { backend } => Notice::Copied { backend, url },
            ShareOutcome::Manual { text } => Notice::ManualCopy { url: text },
        }
    }

    /// Export the current grid as PNG; failures become a notice
    pub fn export(&self, options: &ExportOptions, output_path: &Path) -> Notice {
        match export_grid_as_png(&self.state.grid, options, output_path) {
            Ok(()) => Notice::Exported {
                path: output_path.to_path_buf(),
            },
            Err(error) => {
                tracing::error!(%error, "export failed");
                Notice::ExportFailed {
                    message: error.to_string(),
                }
            }
        }
    }
}
