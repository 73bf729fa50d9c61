//! Dataset CSV parsing.
//!
//! Columns are read by position, so header names do not matter and any
//! columns after the fourth are ignored. Fields are decoded lossily and time
//! values are left unparsed; only an unreadable file is an error here.

use std::path::Path;

use csv::ByteRecord;
use tracing::debug;

use super::DatasetRow;
use crate::constants::columns;
use crate::error::{Error, Result};

/// Load all rows of a dataset file in file order.
///
/// When `has_headers` is false the first line is treated as data.
/// Returns `Ok(vec![])` for an empty or header-only file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn load_dataset(path: &Path, has_headers: bool) -> Result<Vec<DatasetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::DatasetRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = Vec::new();

    for result in reader.byte_records() {
        let record = result.map_err(|e| Error::DatasetRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(row_from_record(&record, rows.len()));
    }

    debug!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

fn row_from_record(record: &ByteRecord, row_index: usize) -> DatasetRow {
    let line = record.position().map_or(0, csv::Position::line);

    if record.len() < columns::REQUIRED {
        debug!(
            "Line {line}: {} of {} columns present",
            record.len(),
            columns::REQUIRED
        );
    }

    let field = |idx: usize| {
        record
            .get(idx)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    };

    // A BOM survives on the first field when there is no header line
    let label = field(columns::LABEL)
        .map(|label| label.trim_start_matches('\u{feff}').to_string())
        .unwrap_or_default();

    DatasetRow {
        row_index,
        line,
        label,
        video_ref: field(columns::VIDEO_REF).unwrap_or_default(),
        start_time: field(columns::START),
        end_time: field(columns::END),
    }
}

/// Parse a time value in seconds.
///
/// Accepts integers and decimals (`"14"`, `"14.0"`); fractional seconds are
/// truncated toward zero, so a start of `5.5` cuts from second 5 rather than
/// 5.5. Clip boundaries are whole seconds throughout.
pub fn parse_seconds(s: &str) -> std::result::Result<u64, String> {
    if let Ok(value) = s.parse::<u64>() {
        return Ok(value);
    }

    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of seconds"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("time must be a non-negative number, got '{s}'"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value.trunc() as u64)
}
