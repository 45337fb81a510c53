//! Row-by-row progress display for a render pass

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Rows: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks completed rows against the estimated total
///
/// The exact row count is only known once the layout terminates, so the
/// bar starts from an estimate and stretches if the render outruns it.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar sized to the estimated row count
    pub fn new(estimated_rows: u64) -> Self {
        let bar = ProgressBar::new(estimated_rows.max(1));
        bar.set_style(ROW_STYLE.clone());
        Self { bar }
    }

    /// Mark one row of tiles as completed
    pub fn complete_row(&self, tiles: usize) {
        if self.bar.position() >= self.bar.length().unwrap_or(0) {
            self.bar.set_length(self.bar.position() + 1);
        }
        self.bar.inc(1);
        self.bar.set_message(format!("{tiles} tiles"));
    }

    /// Close out the display once the render finishes
    pub fn finish(&self) {
        if let Some(length) = self.bar.length() {
            self.bar.set_position(length);
        }
        self.bar.finish_with_message("render complete");
    }
}
