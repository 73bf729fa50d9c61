//! Error types for clipharvest.

use std::path::PathBuf;

/// Result type alias for clipharvest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clipharvest.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Dataset CSV could not be opened or read.
    #[error("failed to read dataset '{path}'")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Dataset row is malformed.
    #[error("invalid dataset row at line {line}: {message}")]
    InvalidDatasetRow {
        /// 1-based line number in the CSV file.
        line: u64,
        /// Description of the problem.
        message: String,
    },

    /// External tool could not be started.
    #[error("failed to run '{tool}'")]
    ToolSpawn {
        /// Tool binary that failed to start.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Remote video could not be resolved.
    #[error("failed to resolve '{url}': {reason}")]
    RemoteResolve {
        /// Video URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// Remote video could not be downloaded.
    #[error("failed to download '{url}': {reason}")]
    DownloadFailed {
        /// Video URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// Remote video is shorter than the requested clip.
    #[error("video is {duration}s long, clip needs {required}s")]
    DurationInsufficient {
        /// Total duration of the remote video in seconds.
        duration: u64,
        /// Effective clip end in seconds.
        required: u64,
    },

    /// Clip time range is empty or reversed.
    #[error("invalid clip range: start {start}s, end {end}s")]
    InvalidTrimRange {
        /// Start time in seconds.
        start: u64,
        /// End time in seconds.
        end: u64,
    },

    /// Failed to create a scratch or output directory.
    #[error("failed to create directory '{path}'")]
    DirCreateFailed {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Transcoding the clip failed.
    #[error("failed to write clip '{path}': {reason}")]
    TranscodeFailed {
        /// Destination path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Failed to write the run report.
    #[error("failed to write report '{path}'")]
    ReportWrite {
        /// Path to the report file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Run stopped at a failed row because fail-fast was requested.
    #[error("stopped at row {row_index}: {message}")]
    RunAborted {
        /// Row that failed.
        row_index: usize,
        /// Error of that row.
        message: String,
    },

    /// Run was interrupted.
    #[error("interrupted")]
    Cancelled,
}
