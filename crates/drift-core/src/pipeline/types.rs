use std::path::PathBuf;

use image::DynamicImage;

use crate::align::CorrelationSurface;
use crate::frame::RegistrationRecord;

/// Lifecycle of a batch run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    LoadingReferences,
    ProcessingHour(u8),
    Done,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::LoadingReferences => write!(f, "Loading references"),
            Self::ProcessingHour(h) => write!(f, "Processing {h:02}00 hrs"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Per-candidate result inside one hour. Nothing is written to disk until
/// the orchestrator consumes the outcomes in file-name order.
#[derive(Debug)]
pub(super) enum CandidateOutcome {
    Registered {
        record: RegistrationRecord,
        /// Candidate after the cyclic shift, ready to save.
        shifted: DynamicImage,
        /// Kept only when surface dumps are configured.
        surface: Option<CorrelationSurface>,
    },
    Skipped(PathBuf),
}

/// What happened in one non-empty hour bucket.
#[derive(Clone, Debug, Default)]
pub struct HourSummary {
    pub hour: u8,
    pub output_dir: PathBuf,
    /// Candidates registered and logged, in log order.
    pub records: Vec<RegistrationRecord>,
    /// Candidates left out under the `Skip` mismatch policy.
    pub skipped: Vec<PathBuf>,
}

/// Result of a completed batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub log_path: PathBuf,
    pub references_loaded: usize,
    /// Non-empty hours that were processed, ascending.
    pub hours: Vec<HourSummary>,
    /// Non-empty hours left out under the `Skip` missing-reference policy.
    pub skipped_hours: Vec<u8>,
}

impl BatchSummary {
    pub fn processed_count(&self) -> usize {
        self.hours.iter().map(|h| h.records.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.hours.iter().map(|h| h.skipped.len()).sum()
    }
}

/// Thread-safe progress reporting for a batch run.
///
/// All methods have default no-op implementations. `advance` may be called
/// from Rayon worker threads.
pub trait ProgressReporter: Send + Sync {
    /// The orchestrator entered a new state.
    fn state_changed(&self, _state: BatchState) {}

    /// A non-empty hour with `total_items` candidates has started.
    fn begin_hour(&self, _hour: u8, _total_items: usize) {}

    /// One candidate of the current hour has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current hour is finished.
    fn finish_hour(&self, _summary: &HourSummary) {}
}

/// No-op progress reporter, the orchestrator default.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
