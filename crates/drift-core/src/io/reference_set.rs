use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::{HOUR_COUNT, REFERENCE_SUFFIX};
use crate::error::{DriftError, Result};
use crate::frame::LuminanceFrame;

use super::discover::sorted_files;
use super::image_io::load_luminance;

/// Per-hour reference ("standard") images, indexed by hour of day.
///
/// Position `i` of the sorted reference directory is the reference for
/// hour `i`. Read-only once loaded.
#[derive(Clone, Debug, Default)]
pub struct ReferenceSet {
    frames: Vec<LuminanceFrame>,
    sources: Vec<PathBuf>,
}

impl ReferenceSet {
    /// Load the sorted `*jpg` files of `directory` as luminance frames.
    /// Files past the last hour bucket are ignored.
    pub fn load(directory: &Path) -> Result<Self> {
        let mut sources = sorted_files(directory, |name| name.ends_with(REFERENCE_SUFFIX))?;
        if sources.len() > HOUR_COUNT as usize {
            warn!(
                found = sources.len(),
                used = HOUR_COUNT,
                "More reference images than hour buckets; extras ignored"
            );
            sources.truncate(HOUR_COUNT as usize);
        }

        let mut frames = Vec::with_capacity(sources.len());
        for (hour, path) in sources.iter().enumerate() {
            let frame = load_luminance(path)?;
            debug!(
                hour,
                path = %path.display(),
                width = frame.width(),
                height = frame.height(),
                "Reference loaded"
            );
            frames.push(frame);
        }

        info!(count = frames.len(), directory = %directory.display(), "Reference set loaded");
        Ok(Self { frames, sources })
    }

    /// Build a set from frames already in memory, in hour order.
    pub fn from_frames(frames: Vec<LuminanceFrame>) -> Self {
        Self {
            frames,
            sources: Vec::new(),
        }
    }

    /// Reference for `hour`, or `MissingReference` if too few were loaded.
    pub fn get(&self, hour: u8) -> Result<&LuminanceFrame> {
        self.frames
            .get(hour as usize)
            .ok_or(DriftError::MissingReference {
                hour,
                available: self.frames.len(),
            })
    }

    /// File the reference for `hour` was loaded from, if any.
    pub fn source(&self, hour: u8) -> Option<&Path> {
        self.sources.get(hour as usize).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
