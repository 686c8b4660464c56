use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_JPEG_QUALITY, DEFAULT_LOG_FILE, SHIFTED_DIR_PREFIX};
use crate::error::{DriftError, Result};

/// What the orchestrator does when a candidate or an hour cannot be
/// registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log the problem, leave the item out of the run log and continue.
    Skip,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "Abort"),
            Self::Skip => write!(f, "Skip"),
        }
    }
}

/// Everything one batch run needs. Nothing outside this struct influences
/// a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding the `*HH0000.jpg` candidates.
    pub directory: PathBuf,
    /// Directory holding the per-hour reference images.
    pub standard: PathBuf,
    /// Run log destination, truncated at the start of every run.
    pub log_path: PathBuf,
    /// Parent of the `shiftedHH` directories. Defaults to `directory`.
    pub output_root: Option<PathBuf>,
    /// Register the candidates of one hour on the Rayon pool.
    pub parallel: bool,
    /// JPEG quality of the shifted images (1-100).
    pub jpeg_quality: u8,
    /// Policy for a non-empty hour that has no reference image.
    pub on_missing_reference: FailurePolicy,
    /// Policy for a candidate whose size differs from its reference.
    pub on_dimension_mismatch: FailurePolicy,
    /// When set, a rendering of every correlation surface is written here.
    pub dump_surfaces: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            standard: PathBuf::new(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            output_root: None,
            parallel: true,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            on_missing_reference: FailurePolicy::default(),
            on_dimension_mismatch: FailurePolicy::default(),
            dump_surfaces: None,
        }
    }
}

impl BatchConfig {
    pub fn new(directory: impl Into<PathBuf>, standard: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            standard: standard.into(),
            ..Default::default()
        }
    }

    /// Check the config before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(DriftError::Config("Please provide a directory.".into()));
        }
        if self.standard.as_os_str().is_empty() {
            return Err(DriftError::Config(
                "Please provide a standard image set.".into(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DriftError::Config(format!(
                "JPEG quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    pub fn output_root(&self) -> &Path {
        self.output_root.as_deref().unwrap_or(&self.directory)
    }

    /// Output directory of one hour bucket, e.g. `<root>/shifted07`.
    pub fn output_dir(&self, hour: u8) -> PathBuf {
        self.output_root()
            .join(format!("{SHIFTED_DIR_PREFIX}{hour:02}"))
    }
}
