pub mod config;
mod orchestrator;
mod types;

pub use config::{BatchConfig, FailurePolicy};
pub use orchestrator::BatchOrchestrator;
pub use types::{BatchState, BatchSummary, HourSummary, ProgressReporter};
