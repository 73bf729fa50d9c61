//! yt-dlp backed video fetcher.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{RemoteVideo, VideoFetcher};
use crate::constants::tools;
use crate::error::{Error, Result};
use crate::utils::process::{failure_reason, run_tool};

/// Subset of `yt-dlp --dump-single-json` output we rely on.
#[derive(Debug, Deserialize)]
struct VideoInfo {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

/// Fetches videos by shelling out to `yt-dlp`.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    /// Path or name of the yt-dlp binary.
    binary: String,
    /// Format selector passed to `-f`.
    format: String,
}

impl YtDlpFetcher {
    /// Create a fetcher using the given binary and format selector.
    #[must_use]
    pub fn new(binary: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            format: format.into(),
        }
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new(tools::YTDLP, tools::DEFAULT_FORMAT)
    }
}

impl VideoFetcher for YtDlpFetcher {
    fn resolve(&self, url: &str) -> Result<RemoteVideo> {
        let output = run_tool(
            &self.binary,
            [
                "--dump-single-json",
                "--no-playlist",
                "--skip-download",
                "--no-warnings",
                "--",
                url,
            ],
        )?;

        if !output.status.success() {
            return Err(Error::RemoteResolve {
                url: url.to_string(),
                reason: failure_reason(&output),
            });
        }

        parse_video_info(url, &output.stdout)
    }

    fn download(&self, video: &RemoteVideo, dir: &Path) -> Result<PathBuf> {
        let template = dir.join(tools::OUTPUT_TEMPLATE).to_string_lossy().into_owned();
        debug!("Downloading {} into {}", video.url, dir.display());

        let output = run_tool(
            &self.binary,
            [
                "-f",
                self.format.as_str(),
                "--no-playlist",
                "--no-warnings",
                "--force-overwrites",
                "--no-simulate",
                "--print",
                "after_move:filepath",
                "-o",
                template.as_str(),
                "--",
                video.url.as_str(),
            ],
        )?;

        if !output.status.success() {
            return Err(Error::DownloadFailed {
                url: video.url.clone(),
                reason: failure_reason(&output),
            });
        }

        let path = downloaded_path(&output.stdout).ok_or_else(|| Error::DownloadFailed {
            url: video.url.clone(),
            reason: "yt-dlp did not report an output file".to_string(),
        })?;

        if !path.is_file() {
            return Err(Error::DownloadFailed {
                url: video.url.clone(),
                reason: format!("reported file '{}' does not exist", path.display()),
            });
        }

        Ok(path)
    }
}

/// Build a [`RemoteVideo`] from yt-dlp's JSON metadata.
fn parse_video_info(url: &str, json: &[u8]) -> Result<RemoteVideo> {
    let info: VideoInfo = serde_json::from_slice(json).map_err(|e| Error::RemoteResolve {
        url: url.to_string(),
        reason: format!("unreadable metadata: {e}"),
    })?;

    let duration = info
        .duration
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| Error::RemoteResolve {
            url: url.to_string(),
            reason: "duration not available".to_string(),
        })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let duration_secs = duration.trunc() as u64;

    Ok(RemoteVideo {
        url: url.to_string(),
        id: info.id,
        title: info.title,
        duration_secs,
    })
}

/// Last non-empty stdout line, which `--print after_move:filepath` emits.
fn downloaded_path(stdout: &[u8]) -> Option<PathBuf> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const URL: &str = "https://www.youtube.com/watch?v=abc123";

    #[test]
    fn test_parse_video_info_truncates_duration() {
        let json = br#"{"id":"abc123","title":"Pull up form","duration":12.8,"formats":[]}"#;
        let video = parse_video_info(URL, json).unwrap();
        assert_eq!(video.id, "abc123");
        assert_eq!(video.title.as_deref(), Some("Pull up form"));
        assert_eq!(video.duration_secs, 12);
        assert_eq!(video.url, URL);
    }

    #[test]
    fn test_parse_video_info_without_duration_fails() {
        let json = br#"{"id":"live1","title":"Live","duration":null}"#;
        let result = parse_video_info(URL, json);
        assert!(matches!(result, Err(Error::RemoteResolve { .. })));
    }

    #[test]
    fn test_parse_video_info_rejects_garbage() {
        let result = parse_video_info(URL, b"ERROR: not json");
        assert!(matches!(result, Err(Error::RemoteResolve { .. })));
    }

    #[test]
    fn test_downloaded_path_takes_last_line() {
        let stdout = b"/tmp/buffer/0/abc123.webm\n/tmp/buffer/0/abc123.mp4\n\n";
        assert_eq!(
            downloaded_path(stdout),
            Some(PathBuf::from("/tmp/buffer/0/abc123.mp4"))
        );
        assert_eq!(downloaded_path(b"  \n"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_binary_is_spawn_error() {
        let fetcher = YtDlpFetcher::new("clipharvest-missing-yt-dlp", tools::DEFAULT_FORMAT);
        assert!(matches!(
            fetcher.resolve(URL),
            Err(Error::ToolSpawn { .. })
        ));
    }
}
