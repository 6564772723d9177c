//! Progress display for batch exports with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for batch exports
///
/// Shows one spinner-style bar per layout for small batches and a single
/// batch bar once the batch outgrows [`MAX_INDIVIDUAL_PROGRESS_BARS`]
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    layout_bars: Vec<ProgressBar>,
    /// Stores (`label`, `finished`) for rolling window display
    layout_states: Vec<(String, bool)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static LAYOUT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>20} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Layouts: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            layout_bars: Vec::new(),
            layout_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on layout count
    pub fn initialize(&mut self, layout_count: usize) {
        // Switch to batch mode for large sets to avoid terminal spam
        if layout_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(layout_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = layout_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let bar = ProgressBar::new(1);
            bar.set_style(LAYOUT_STYLE.clone());
            self.layout_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register the layout about to be rendered
    pub fn start_layout(&mut self, index: usize, label: &str) {
        if index >= self.layout_states.len() {
            self.layout_states.resize(index + 1, (String::new(), false));
        }
        if let Some(state) = self.layout_states.get_mut(index) {
            *state = (label.to_string(), false);
        }
        self.update_bars();
    }

    /// Mark a layout as written and advance the batch bar
    pub fn complete_layout(&mut self, index: usize, _elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.layout_states.get_mut(index) {
            state.1 = true;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All layouts exported");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recent layouts in the available bars
    fn update_bars(&self) {
        let active: Vec<&(String, bool)> = self
            .layout_states
            .iter()
            .filter(|(label, _)| !label.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, finished)) in visible.iter().enumerate() {
            if let Some(bar) = self.layout_bars.get(bar_idx) {
                bar.set_position(u64::from(*finished));
                bar.set_message(if *finished { "done" } else { "rendering" });
                bar.set_prefix(label.clone());
            }
        }

        for bar_idx in visible.len()..self.layout_bars.len() {
            if let Some(bar) = self.layout_bars.get(bar_idx) {
                bar.set_position(0);
                bar.set_message("");
                bar.set_prefix(String::new());
            }
        }
    }
}
