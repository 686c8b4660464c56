pub mod discover;
pub mod image_io;
pub mod reference_set;
pub mod run_log;

pub use reference_set::ReferenceSet;
pub use run_log::{read_log, LogLine, LogRow, RunLog};
