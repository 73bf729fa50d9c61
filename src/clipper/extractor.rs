//! Dataset-driven clip extraction.
//!
//! Walks the dataset in row order, and for every row carrying the target
//! label resolves the remote video, downloads it into a per-row scratch
//! directory and writes the trimmed clip as `<row_index>.mp4`. A failing row
//! is recorded in the report and never stops the rest of the batch unless
//! fail-fast is requested.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{ClipTrimmer, TrimRange, clip_path};
use crate::dataset::{DatasetRow, load_dataset};
use crate::error::{Error, Result};
use crate::fetch::VideoFetcher;
use crate::output::progress;
use crate::output::{FailureKind, RowOutcome, RowStatus, RunReport, SkipReason};

/// Resolved settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    /// Dataset CSV.
    pub source_csv: PathBuf,
    /// Whether the CSV starts with a header line.
    pub has_headers: bool,
    /// Root of the per-row download directories.
    pub scratch_dir: PathBuf,
    /// Directory clips are written to.
    pub output_dir: PathBuf,
    /// Only rows with exactly this label are processed.
    pub target_label: String,
    /// Prefix a row's video reference is appended to.
    pub base_url: String,
    /// Log row failures at debug level only.
    pub silent: bool,
    /// Leave rows whose clip already exists untouched.
    pub skip_existing: bool,
    /// Stop at the first failed row.
    pub fail_fast: bool,
    /// Show a progress bar.
    pub show_progress: bool,
}

/// Scratch directory a row's video is downloaded into.
pub fn scratch_dir_for(scratch_root: &Path, row_index: usize) -> PathBuf {
    scratch_root.join(row_index.to_string())
}

/// Extracts labeled clips from a dataset of remote videos.
pub struct DatasetClipExtractor<F, T> {
    settings: ExtractorSettings,
    fetcher: F,
    trimmer: T,
    cancelled: Arc<AtomicBool>,
}

impl<F: VideoFetcher, T: ClipTrimmer> DatasetClipExtractor<F, T> {
    /// Create an extractor.
    pub fn new(settings: ExtractorSettings, fetcher: F, trimmer: T) -> Self {
        Self {
            settings,
            fetcher,
            trimmer,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use `flag` to request cancellation; it is checked before each row.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Load the dataset and process every row.
    ///
    /// # Errors
    ///
    /// Returns an error only if the dataset cannot be loaded. Row failures
    /// are reported in the returned [`RunReport`].
    pub fn run(&self) -> Result<RunReport> {
        let rows = load_dataset(&self.settings.source_csv, self.settings.has_headers)?;
        Ok(self.run_rows(&rows))
    }

    /// Process already loaded rows in order.
    pub fn run_rows(&self, rows: &[DatasetRow]) -> RunReport {
        let started = Instant::now();
        let settings = &self.settings;

        let mut report = RunReport::new(
            settings.source_csv.clone(),
            settings.target_label.clone(),
            settings.output_dir.clone(),
        );
        report.total_rows = rows.len();

        let matching = rows
            .iter()
            .filter(|row| row.matches_label(&settings.target_label))
            .count();
        info!(
            "{} of {} rows labeled '{}'",
            matching,
            rows.len(),
            settings.target_label
        );

        let pb = progress::create_row_progress(matching, settings.show_progress);

        for row in rows {
            if self.cancelled.load(Ordering::SeqCst) {
                warn!("Interrupted before row {}", row.row_index);
                report.cancelled = true;
                break;
            }

            let matched = row.matches_label(&settings.target_label);
            if matched {
                progress::set_message(pb.as_ref(), format!("row {}", row.row_index));
            }

            let status = self.process_row(row);
            let abort = settings.fail_fast && matches!(status, RowStatus::Failed { .. });
            report.record(RowOutcome::new(row, status));

            if matched {
                progress::inc_progress(pb.as_ref());
            }

            if abort {
                warn!("Stopping at row {} (fail-fast)", row.row_index);
                report.aborted = true;
                break;
            }
        }

        let finish_message = if report.cancelled {
            "Interrupted"
        } else if report.aborted {
            "Failed"
        } else {
            "Complete"
        };
        progress::finish_progress(pb, finish_message);

        report.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        report
    }

    /// Process a single row and describe what happened.
    pub fn process_row(&self, row: &DatasetRow) -> RowStatus {
        if !row.matches_label(&self.settings.target_label) {
            return RowStatus::Skipped {
                reason: SkipReason::LabelMismatch,
            };
        }

        match self.extract(row) {
            Ok(status) => {
                if let RowStatus::Written { output } = &status {
                    info!("Row {}: wrote {}", row.row_index, output.display());
                }
                status
            }
            Err(e) => {
                self.log_failure(row, &e);
                RowStatus::failed(&e)
            }
        }
    }

    fn extract(&self, row: &DatasetRow) -> Result<RowStatus> {
        let settings = &self.settings;

        let effective_end = row.effective_end()?;
        let range = TrimRange::new(row.start_secs()?, effective_end)?;

        let dest = clip_path(&settings.output_dir, row.row_index);
        if settings.skip_existing && dest.exists() {
            debug!("Row {}: {} exists, skipping", row.row_index, dest.display());
            return Ok(RowStatus::Skipped {
                reason: SkipReason::OutputExists,
            });
        }

        let url = row.video_url(&settings.base_url);
        let video = self.fetcher.resolve(&url)?;

        if video.duration_secs < effective_end {
            return Err(Error::DurationInsufficient {
                duration: video.duration_secs,
                required: effective_end,
            });
        }

        let scratch = scratch_dir_for(&settings.scratch_dir, row.row_index);
        create_dir(&scratch)?;
        let downloaded = self.fetcher.download(&video, &scratch)?;

        create_dir(&settings.output_dir)?;
        self.trimmer.trim(&downloaded, range, &dest)?;

        Ok(RowStatus::Written { output: dest })
    }

    fn log_failure(&self, row: &DatasetRow, error: &Error) {
        if self.settings.silent {
            debug!("Row {} ({}): {error}", row.row_index, row.video_ref);
        } else if FailureKind::of(error) == FailureKind::DurationInsufficient {
            info!("Row {} ({}): {error}", row.row_index, row.video_ref);
        } else {
            warn!("Row {} ({}): {error}", row.row_index, row.video_ref);
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::DirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_for_row() {
        assert_eq!(
            scratch_dir_for(Path::new("/data/buffer"), 3),
            PathBuf::from("/data/buffer/3")
        );
    }
}
