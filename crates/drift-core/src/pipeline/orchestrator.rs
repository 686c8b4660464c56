use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::DynamicImage;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::align::{register, render_surface, shift_image, CorrelationSurface};
use crate::consts::{HOUR_COUNT, PARALLEL_FRAME_THRESHOLD};
use crate::error::{DriftError, Result};
use crate::frame::{LuminanceFrame, RegistrationRecord};
use crate::io::discover::list_candidates;
use crate::io::image_io::{load_image, luminance, save_jpeg, save_png};
use crate::io::{ReferenceSet, RunLog};

use super::config::{BatchConfig, FailurePolicy};
use super::types::{
    BatchState, BatchSummary, CandidateOutcome, HourSummary, NoOpReporter, ProgressReporter,
};

/// Registers every candidate of a batch against the reference of its hour.
///
/// Hours run in ascending order. Inside an hour the candidates may be
/// registered in parallel, but the run log is written by this orchestrator
/// alone, in file-name order.
pub struct BatchOrchestrator {
    config: BatchConfig,
    reporter: Arc<dyn ProgressReporter>,
    state: BatchState,
}

impl BatchOrchestrator {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(NoOpReporter),
            state: BatchState::Idle,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Load the reference set from `config.standard`, then process the batch.
    pub fn run(&mut self) -> Result<BatchSummary> {
        self.config.validate()?;
        self.transition(BatchState::LoadingReferences);
        let references = ReferenceSet::load(&self.config.standard)?;
        self.process(&references)
    }

    /// Process the batch against an already loaded reference set.
    pub fn run_with_references(&mut self, references: &ReferenceSet) -> Result<BatchSummary> {
        self.config.validate()?;
        self.transition(BatchState::LoadingReferences);
        self.process(references)
    }

    fn process(&mut self, references: &ReferenceSet) -> Result<BatchSummary> {
        if let Some(ref dump_dir) = self.config.dump_surfaces {
            fs::create_dir_all(dump_dir)?;
        }

        let mut log = RunLog::create(&self.config.log_path)?;
        let mut summary = BatchSummary {
            log_path: log.path().to_path_buf(),
            references_loaded: references.len(),
            ..Default::default()
        };

        for hour in 0..HOUR_COUNT {
            let candidates = list_candidates(&self.config.directory, hour)?;
            if candidates.is_empty() {
                debug!(hour, "No candidates, hour skipped");
                continue;
            }

            let reference = match references.get(hour) {
                Ok(reference) => reference,
                Err(e) if self.config.on_missing_reference == FailurePolicy::Skip => {
                    error!(hour, files = candidates.len(), error = %e, "Hour skipped");
                    summary.skipped_hours.push(hour);
                    continue;
                }
                Err(e) => {
                    log.flush()?;
                    return Err(e);
                }
            };

            self.transition(BatchState::ProcessingHour(hour));
            info!(hour, files = candidates.len(), "Processing hour");
            debug!(
                hour,
                reference = ?references.source(hour),
                width = reference.width(),
                height = reference.height(),
                "Hour reference"
            );

            let output_dir = self.config.output_dir(hour);
            fs::create_dir_all(&output_dir)?;
            log.write_hour(hour)?;

            self.reporter.begin_hour(hour, candidates.len());
            let outcomes = self.register_hour(reference, &candidates);

            let mut hour_summary = HourSummary {
                hour,
                output_dir,
                ..Default::default()
            };
            // Outputs and rows are written here, in name order, so nothing
            // past the first failure reaches disk in either mode.
            for outcome in outcomes {
                let written = outcome.and_then(|outcome| match outcome {
                    CandidateOutcome::Registered {
                        record,
                        shifted,
                        surface,
                    } => {
                        self.save_outputs(
                            &record,
                            &shifted,
                            surface.as_ref(),
                            &hour_summary.output_dir,
                        )?;
                        log.write_record(&record)?;
                        hour_summary.records.push(record);
                        Ok(())
                    }
                    CandidateOutcome::Skipped(path) => {
                        hour_summary.skipped.push(path);
                        Ok(())
                    }
                });
                if let Err(e) = written {
                    log.flush()?;
                    return Err(e);
                }
            }
            self.reporter.finish_hour(&hour_summary);
            summary.hours.push(hour_summary);
        }

        log.finish()?;
        self.transition(BatchState::Done);
        info!(
            hours = summary.hours.len(),
            processed = summary.processed_count(),
            skipped = summary.skipped_count(),
            "Batch complete"
        );
        Ok(summary)
    }

    /// Register the candidates of one hour. Outcomes come back in the order
    /// of `candidates`; sequential runs stop after the first error.
    fn register_hour(
        &self,
        reference: &LuminanceFrame,
        candidates: &[PathBuf],
    ) -> Vec<Result<CandidateOutcome>> {
        let counter = AtomicUsize::new(0);
        let process = |path: &PathBuf| {
            let result = self.process_candidate(reference, path);
            if let Err(ref e) = result {
                error!(path = %path.display(), error = %e, "Registration failed");
            }
            let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
            self.reporter.advance(done);
            result
        };

        if self.config.parallel && candidates.len() >= PARALLEL_FRAME_THRESHOLD {
            candidates.par_iter().map(process).collect()
        } else {
            let mut outcomes = Vec::with_capacity(candidates.len());
            for path in candidates {
                let result = process(path);
                let failed = result.is_err();
                outcomes.push(result);
                if failed {
                    break;
                }
            }
            outcomes
        }
    }

    fn process_candidate(
        &self,
        reference: &LuminanceFrame,
        path: &Path,
    ) -> Result<CandidateOutcome> {
        let image = load_image(path)?;
        let candidate = luminance(&image);

        let registration = match register(reference, &candidate) {
            Ok(registration) => registration,
            Err(e @ DriftError::DimensionMismatch { .. })
                if self.config.on_dimension_mismatch == FailurePolicy::Skip =>
            {
                warn!(path = %path.display(), error = %e, "Candidate skipped");
                return Ok(CandidateOutcome::Skipped(path.to_path_buf()));
            }
            Err(e) => return Err(e),
        };

        let shift = registration.peak.shift;
        debug!(
            path = %path.display(),
            dx = shift.dx,
            dy = shift.dy,
            signed = ?shift.signed(candidate.width(), candidate.height()),
            peak_re = registration.peak.value.re,
            peak_im = registration.peak.value.im,
            "Candidate registered"
        );

        let surface = self
            .config
            .dump_surfaces
            .is_some()
            .then_some(registration.surface);

        Ok(CandidateOutcome::Registered {
            record: RegistrationRecord {
                source: path.to_path_buf(),
                peak: registration.peak.value,
                shift,
            },
            shifted: shift_image(&image, shift),
            surface,
        })
    }

    /// Write the shifted JPEG and, when configured, the surface rendering.
    fn save_outputs(
        &self,
        record: &RegistrationRecord,
        shifted: &DynamicImage,
        surface: Option<&CorrelationSurface>,
        output_dir: &Path,
    ) -> Result<()> {
        let file_name = record.source.file_name().unwrap_or_default();
        save_jpeg(shifted, &output_dir.join(file_name), self.config.jpeg_quality)?;

        if let (Some(dump_dir), Some(surface)) = (&self.config.dump_surfaces, surface) {
            let stem = record.source.file_stem().unwrap_or_default().to_string_lossy();
            save_png(
                &render_surface(surface, true),
                &dump_dir.join(format!("{stem}_corr.png")),
            )?;
        }
        Ok(())
    }

    fn transition(&mut self, next: BatchState) {
        debug!(from = %self.state, to = %next, "Batch state");
        self.state = next;
        self.reporter.state_changed(next);
    }
}
