//! JSON envelope for machine-readable run reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RunReport;
use crate::error::{Error, Result};

/// Current format version of the JSON envelope.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping report output.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// Format version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Every row was visited.
    RunCompleted,
    /// Run stopped early by Ctrl+C.
    RunCancelled,
    /// Run stopped at the first failed row.
    RunAborted,
}

/// Write `report` to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, event: EventType, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::DirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let envelope = JsonEnvelope::new(event, report);

    serde_json::to_writer_pretty(&mut writer, &envelope).map_err(|e| Error::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_envelope_serialization() {
        let report = RunReport::new(
            PathBuf::from("train.csv"),
            "pull ups".to_string(),
            PathBuf::from("clips"),
        );
        let envelope = JsonEnvelope::new(EventType::RunCompleted, &report);

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"spec_version\":\"1.0\""));
        assert!(json.contains("\"event\":\"run_completed\""));
        assert!(json.contains("\"target_label\":\"pull ups\""));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("run.json");
        let report = RunReport::default();

        write_report(&path, EventType::RunCancelled, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["event"], "run_cancelled");
        assert_eq!(value["payload"]["cancelled"], false);
    }
}
