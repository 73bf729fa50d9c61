//! Dataset row type.

use serde::Serialize;

use super::parse_seconds;
use crate::error::{Error, Result};

/// One labeled video segment from the dataset.
///
/// Time values are kept as written and only parsed when the row is
/// processed, so a malformed row of another label never matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    /// 0-based ordinal of the record in the CSV.
    pub row_index: usize,
    /// Line of the record in the CSV file (1-based).
    pub line: u64,
    /// Class label.
    pub label: String,
    /// Remote video identifier appended to the base URL.
    pub video_ref: String,
    /// Clip start as written, `None` if the column is missing.
    pub start_time: Option<String>,
    /// Clip end as written, `None` if the column is missing.
    pub end_time: Option<String>,
}

impl DatasetRow {
    /// Clip start in whole seconds.
    pub fn start_secs(&self) -> Result<u64> {
        self.seconds(self.start_time.as_deref(), "start time")
    }

    /// Clip end in whole seconds as stored in the dataset.
    pub fn end_secs(&self) -> Result<u64> {
        self.seconds(self.end_time.as_deref(), "end time")
    }

    /// End of the clip actually extracted (`end_time - 1`).
    ///
    /// An `end_time` of zero has no effective end and is an invalid range.
    pub fn effective_end(&self) -> Result<u64> {
        let end = self.end_secs()?;
        end.checked_sub(1).ok_or_else(|| Error::InvalidTrimRange {
            start: self.start_secs().unwrap_or_default(),
            end,
        })
    }

    /// Full URL of the referenced video.
    pub fn video_url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.video_ref)
    }

    /// Whether this row carries exactly the given label.
    pub fn matches_label(&self, target: &str) -> bool {
        self.label == target
    }

    fn seconds(&self, value: Option<&str>, what: &str) -> Result<u64> {
        let value = value.ok_or_else(|| Error::InvalidDatasetRow {
            line: self.line,
            message: format!("missing {what} column"),
        })?;

        parse_seconds(value).map_err(|message| Error::InvalidDatasetRow {
            line: self.line,
            message: format!("{what}: {message}"),
        })
    }
}
