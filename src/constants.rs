//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "clipharvest";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default URL prefix a video reference is appended to.
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// Default output directory for clips.
pub const DEFAULT_OUTPUT_DIR: &str = "clips";

/// Default root for per-row download directories.
pub const DEFAULT_SCRATCH_DIR: &str = "buffer";

/// Extension of written clips.
pub const CLIP_EXTENSION: &str = "mp4";

/// External tool defaults.
pub mod tools {
    /// yt-dlp binary name.
    pub const YTDLP: &str = "yt-dlp";

    /// ffmpeg binary name.
    pub const FFMPEG: &str = "ffmpeg";

    /// Format selector for the highest-resolution progressive stream.
    pub const DEFAULT_FORMAT: &str = "best[ext=mp4]/best";

    /// Output template passed to yt-dlp, relative to the scratch directory.
    pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

    /// Default ffmpeg video encoder.
    pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

    /// Default ffmpeg audio encoder.
    pub const DEFAULT_AUDIO_CODEC: &str = "aac";

    /// Maximum stderr characters kept in error messages.
    pub const STDERR_TAIL_CHARS: usize = 400;
}

/// Dataset column positions.
pub mod columns {
    /// Label column.
    pub const LABEL: usize = 0;
    /// Video reference column.
    pub const VIDEO_REF: usize = 1;
    /// Start time column.
    pub const START: usize = 2;
    /// End time column.
    pub const END: usize = 3;
    /// Minimum number of columns per record.
    pub const REQUIRED: usize = 4;
}

/// Exit status used after a Ctrl+C (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;
