//! Configuration type definitions.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_SCRATCH_DIR, tools};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset settings.
    pub dataset: DatasetConfig,

    /// Remote video source settings.
    pub source: SourceConfig,

    /// Working and output directories.
    pub paths: PathsConfig,

    /// Clip encoding settings.
    pub trim: TrimConfig,

    /// Reporting settings.
    pub report: ReportConfig,
}

/// Dataset file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Default dataset CSV.
    pub csv: Option<PathBuf>,

    /// Whether the CSV's first line is a header.
    pub has_headers: bool,

    /// Default label to extract.
    pub target_label: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            csv: None,
            has_headers: true,
            target_label: None,
        }
    }
}

/// Remote video source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL prefix a video reference is appended to.
    pub base_url: String,

    /// yt-dlp binary.
    pub ytdlp: String,

    /// yt-dlp format selector.
    pub format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ytdlp: tools::YTDLP.to_string(),
            format: tools::DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Working and output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of per-row download directories.
    pub scratch_dir: PathBuf,

    /// Clip output directory.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Clip encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// ffmpeg binary.
    pub ffmpeg: String,

    /// Video encoder passed to `-c:v`.
    pub video_codec: String,

    /// Audio encoder passed to `-c:a`.
    pub audio_codec: String,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            ffmpeg: tools::FFMPEG.to_string(),
            video_codec: tools::DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: tools::DEFAULT_AUDIO_CODEC.to_string(),
        }
    }
}

/// Reporting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Do not log per-row failures (debug level only).
    pub silent: bool,

    /// Write a JSON run report here.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.dataset.has_headers);
        assert!(config.dataset.target_label.is_none());
        assert_eq!(config.source.base_url, "https://www.youtube.com/watch?v=");
        assert_eq!(config.source.ytdlp, "yt-dlp");
        assert_eq!(config.paths.output_dir, PathBuf::from("clips"));
        assert_eq!(config.trim.video_codec, "libx264");
        assert!(!config.report.silent);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[dataset]
target_label = "pull ups"

[paths]
output_dir = "/data/train/pullups"
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.target_label.as_deref(), Some("pull ups"));
        assert!(config.dataset.has_headers);
        assert_eq!(config.paths.output_dir, PathBuf::from("/data/train/pullups"));
        assert_eq!(config.paths.scratch_dir, PathBuf::from("buffer"));
    }
}
