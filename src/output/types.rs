//! Per-row outcome and run report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::dataset::DatasetRow;
use crate::error::Error;

/// What happened to a single dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// 0-based row ordinal.
    pub row_index: usize,
    /// Row label.
    pub label: String,
    /// Remote video reference.
    pub video_ref: String,
    /// Result of processing.
    #[serde(flatten)]
    pub status: RowStatus,
}

impl RowOutcome {
    /// Outcome for `row` with the given status.
    pub fn new(row: &DatasetRow, status: RowStatus) -> Self {
        Self {
            row_index: row.row_index,
            label: row.label.clone(),
            video_ref: row.video_ref.clone(),
            status,
        }
    }
}

/// Processing status of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    /// Clip written.
    Written {
        /// Path of the written clip.
        output: PathBuf,
    },
    /// Row intentionally not processed.
    Skipped {
        /// Why the row was skipped.
        reason: SkipReason,
    },
    /// Processing failed.
    Failed {
        /// Failure category.
        kind: FailureKind,
        /// Human-readable error.
        message: String,
    },
}

impl RowStatus {
    /// Failed status built from an error.
    pub fn failed(error: &Error) -> Self {
        Self::Failed {
            kind: FailureKind::of(error),
            message: error_chain(error),
        }
    }
}

/// Error message including all sources, joined with `": "`.
fn error_chain(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Reason a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Label differs from the target label.
    LabelMismatch,
    /// Clip already present and skipping existing clips was requested.
    OutputExists,
}

/// Failure category of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Video could not be resolved or downloaded.
    RemoteFetch,
    /// Video is shorter than the clip end.
    DurationInsufficient,
    /// Directory creation or other filesystem failure.
    Filesystem,
    /// Clip range is empty, reversed or not readable from the row.
    TrimRange,
    /// Encoding the clip failed.
    Transcode,
    /// An external tool could not be started.
    ToolUnavailable,
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Categorize an error.
    pub fn of(error: &Error) -> Self {
        match error {
            Error::RemoteResolve { .. } | Error::DownloadFailed { .. } => Self::RemoteFetch,
            Error::DurationInsufficient { .. } => Self::DurationInsufficient,
            Error::DirCreateFailed { .. } | Error::Io(_) => Self::Filesystem,
            Error::InvalidTrimRange { .. } | Error::InvalidDatasetRow { .. } => Self::TrimRange,
            Error::TranscodeFailed { .. } => Self::Transcode,
            Error::ToolSpawn { .. } => Self::ToolUnavailable,
            _ => Self::Other,
        }
    }
}

/// Summary of a whole extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Dataset file.
    pub source_csv: PathBuf,
    /// Label rows were filtered by.
    pub target_label: String,
    /// Clip directory.
    pub output_dir: PathBuf,
    /// Rows in the dataset.
    pub total_rows: usize,
    /// Rows carrying the target label.
    pub matched_rows: usize,
    /// Clips written.
    pub written: usize,
    /// Matching rows skipped because their clip already existed.
    pub skipped_existing: usize,
    /// Matching rows that failed.
    pub failed: usize,
    /// Whether the run was interrupted before all rows were seen.
    pub cancelled: bool,
    /// Whether the run stopped at a failed row.
    pub aborted: bool,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Outcomes of all matching rows, in row order.
    pub rows: Vec<RowOutcome>,
}

impl RunReport {
    /// Empty report for a run.
    pub fn new(source_csv: PathBuf, target_label: String, output_dir: PathBuf) -> Self {
        Self {
            source_csv,
            target_label,
            output_dir,
            ..Self::default()
        }
    }

    /// Account for one row's outcome.
    ///
    /// Label mismatches are counted only through `total_rows`.
    pub fn record(&mut self, outcome: RowOutcome) {
        match &outcome.status {
            RowStatus::Skipped {
                reason: SkipReason::LabelMismatch,
            } => return,
            RowStatus::Written { .. } => self.written += 1,
            RowStatus::Skipped {
                reason: SkipReason::OutputExists,
            } => self.skipped_existing += 1,
            RowStatus::Failed { .. } => self.failed += 1,
        }
        self.matched_rows += 1;
        self.rows.push(outcome);
    }

    /// Row index and message of the most recent failure.
    pub fn last_failure(&self) -> Option<(usize, &str)> {
        self.rows.iter().rev().find_map(|row| match &row.status {
            RowStatus::Failed { message, .. } => Some((row.row_index, message.as_str())),
            _ => None,
        })
    }

    /// Paths of all clips written during the run.
    pub fn written_clips(&self) -> impl Iterator<Item = &PathBuf> {
        self.rows.iter().filter_map(|row| match &row.status {
            RowStatus::Written { output } => Some(output),
            _ => None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(row_index: usize) -> DatasetRow {
        DatasetRow {
            row_index,
            line: 2,
            label: "pull ups".to_string(),
            video_ref: "abc123".to_string(),
            start_time: Some("5".to_string()),
            end_time: Some("10".to_string()),
        }
    }

    #[test]
    fn test_failure_kind_of() {
        let fetch = Error::RemoteResolve {
            url: "u".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(FailureKind::of(&fetch), FailureKind::RemoteFetch);

        let short = Error::DurationInsufficient {
            duration: 3,
            required: 9,
        };
        assert_eq!(FailureKind::of(&short), FailureKind::DurationInsufficient);

        let range = Error::InvalidTrimRange { start: 5, end: 5 };
        assert_eq!(FailureKind::of(&range), FailureKind::TrimRange);

        let unreadable = Error::InvalidDatasetRow {
            line: 3,
            message: "start time: '' is not a valid number of seconds".to_string(),
        };
        assert_eq!(FailureKind::of(&unreadable), FailureKind::TrimRange);
    }

    #[test]
    fn test_record_counts() {
        let mut report = RunReport {
            total_rows: 4,
            ..RunReport::default()
        };
        report.record(RowOutcome::new(
            &row(0),
            RowStatus::Written {
                output: PathBuf::from("clips/0.mp4"),
            },
        ));
        report.record(RowOutcome::new(
            &row(1),
            RowStatus::Skipped {
                reason: SkipReason::LabelMismatch,
            },
        ));
        report.record(RowOutcome::new(
            &row(2),
            RowStatus::failed(&Error::InvalidTrimRange { start: 5, end: 5 }),
        ));
        report.record(RowOutcome::new(
            &row(3),
            RowStatus::Skipped {
                reason: SkipReason::OutputExists,
            },
        ));

        assert_eq!(report.matched_rows, 3);
        assert_eq!(report.written, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped_existing, 1);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(
            report.written_clips().collect::<Vec<_>>(),
            vec![&PathBuf::from("clips/0.mp4")]
        );
        assert_eq!(report.last_failure().map(|(idx, _)| idx), Some(2));
    }

    #[test]
    fn test_failed_message_includes_source() {
        let error = Error::DirCreateFailed {
            path: PathBuf::from("/readonly/0"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let RowStatus::Failed { kind, message } = RowStatus::failed(&error) else {
            unreachable!("failed() builds a Failed status");
        };
        assert_eq!(kind, FailureKind::Filesystem);
        assert!(message.starts_with("failed to create directory '/readonly/0'"));
        assert!(message.ends_with(": denied"));
    }

    #[test]
    fn test_outcome_serialization_is_flat() {
        let outcome = RowOutcome::new(
            &row(7),
            RowStatus::failed(&Error::DurationInsufficient {
                duration: 3,
                required: 9,
            }),
        );

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"row_index\":7"));
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"kind\":\"duration_insufficient\""));
    }
}
