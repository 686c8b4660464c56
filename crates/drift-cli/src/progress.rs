use drift_core::pipeline::{BatchState, HourSummary, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives a single indicatif bar, reset at the start of every hour.
pub struct BarReporter {
    pb: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        pb.set_style(style);
        Self { pb }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn state_changed(&self, state: BatchState) {
        self.pb.set_message(state.to_string());
    }

    fn begin_hour(&self, hour: u8, total_items: usize) {
        self.pb
            .println(format!("Processing {total_items} files at {hour:02}00 hrs."));
        self.pb.reset();
        self.pb.set_length(total_items as u64);
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_hour(&self, summary: &HourSummary) {
        if !summary.skipped.is_empty() {
            self.pb.println(format!(
                "  {} file(s) skipped at {:02}00 hrs.",
                summary.skipped.len(),
                summary.hour
            ));
        }
    }
}
