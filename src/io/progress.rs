//! Attempt progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the attempt budget
///
/// A quiet bar is hidden but still tracks its position.
pub struct AttemptProgress {
    bar: ProgressBar,
}

impl AttemptProgress {
    /// Create a bar for `attempts` attempts
    pub fn new(attempts: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(attempts as u64)
        };
        bar.set_length(attempts as u64);
        bar.set_style(ATTEMPT_STYLE.clone());
        bar.set_message("Attempts");
        Self { bar }
    }

    /// Record a finished attempt and its verdict
    pub fn update(&self, attempt: usize, verdict: &str) {
        self.bar.set_position(attempt as u64);
        self.bar.set_message(verdict.to_string());
    }

    /// Remove the bar from the terminal, returning the attempts recorded
    ///
    /// Clearing moves the bar to its full length, so the count is read first.
    pub fn finish(&self) -> u64 {
        let recorded = self.bar.position();
        self.bar.finish_and_clear();
        recorded
    }
}
