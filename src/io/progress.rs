//! Terminal progress display for a generation run

use crate::io::configuration::PROGRESS_REFRESH_CELLS;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over resolved cells
///
/// Redraws only every few resolved cells since a single propagation can
/// resolve none or many.
pub struct ProgressManager {
    bar: ProgressBar,
    last_drawn: usize,
}

impl ProgressManager {
    /// Create a bar for a grid of `cell_count` cells
    pub fn new(cell_count: usize, label: &str) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar, last_drawn: 0 }
    }

    /// Create a bar that never draws
    pub fn hidden(cell_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(cell_count as u64);
        Self { bar, last_drawn: 0 }
    }

    /// Report the number of resolved cells
    pub fn update(&mut self, resolved: usize) {
        if resolved >= self.last_drawn + PROGRESS_REFRESH_CELLS || resolved < self.last_drawn {
            self.bar.set_position(resolved as u64);
            self.last_drawn = resolved;
        }
    }

    /// Number of resolved cells last drawn
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish the bar with a closing message
    pub fn finish(&self, resolved: usize, message: &str) {
        self.bar.set_position(resolved as u64);
        self.bar.finish_with_message(message.to_string());
    }
}
