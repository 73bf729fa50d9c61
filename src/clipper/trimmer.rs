//! Clip trimming and encoding.
//!
//! Cuts a time range out of a downloaded video and writes it as a new,
//! re-encoded file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::{CLIP_EXTENSION, tools};
use crate::error::{Error, Result};
use crate::utils::process::{failure_reason, run_tool};

/// Half-open time range `[start, end)` in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRange {
    start_secs: u64,
    end_secs: u64,
}

impl TrimRange {
    /// Create a range, rejecting empty or reversed ones.
    pub fn new(start_secs: u64, end_secs: u64) -> Result<Self> {
        if end_secs <= start_secs {
            return Err(Error::InvalidTrimRange {
                start: start_secs,
                end: end_secs,
            });
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// Range start in seconds.
    pub fn start_secs(&self) -> u64 {
        self.start_secs
    }

    /// Range end in seconds (exclusive).
    pub fn end_secs(&self) -> u64 {
        self.end_secs
    }

    /// Length of the range in seconds.
    pub fn duration_secs(&self) -> u64 {
        self.end_secs - self.start_secs
    }
}

/// Writes the `[start, end)` part of a video to a new file.
pub trait ClipTrimmer {
    /// Trim `source` to `range` and write the result to `dest`.
    ///
    /// An existing file at `dest` is overwritten.
    fn trim(&self, source: &Path, range: TrimRange, dest: &Path) -> Result<()>;
}

/// Path of the clip written for a dataset row.
pub fn clip_path(output_dir: &Path, row_index: usize) -> PathBuf {
    output_dir.join(format!("{row_index}.{CLIP_EXTENSION}"))
}

/// Trims clips with `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegTrimmer {
    binary: String,
    video_codec: String,
    audio_codec: String,
}

impl FfmpegTrimmer {
    /// Create a trimmer with the given binary and encoders.
    #[must_use]
    pub fn new(
        binary: impl Into<String>,
        video_codec: impl Into<String>,
        audio_codec: impl Into<String>,
    ) -> Self {
        Self {
            binary: binary.into(),
            video_codec: video_codec.into(),
            audio_codec: audio_codec.into(),
        }
    }

    /// Command-line arguments for one trim.
    fn args(&self, source: &Path, range: TrimRange, dest: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(),
            "-ss".to_string(),
            range.start_secs().to_string(),
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-t".to_string(),
            range.duration_secs().to_string(),
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            dest.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for FfmpegTrimmer {
    fn default() -> Self {
        Self::new(
            tools::FFMPEG,
            tools::DEFAULT_VIDEO_CODEC,
            tools::DEFAULT_AUDIO_CODEC,
        )
    }
}

impl ClipTrimmer for FfmpegTrimmer {
    fn trim(&self, source: &Path, range: TrimRange, dest: &Path) -> Result<()> {
        debug!(
            "Trimming {} to {}s-{}s",
            source.display(),
            range.start_secs(),
            range.end_secs()
        );

        let output = run_tool(&self.binary, self.args(source, range, dest))?;

        if output.status.success() {
            return Ok(());
        }

        // Keep "file exists" meaning "clip complete"
        if dest.exists()
            && let Err(e) = fs::remove_file(dest)
        {
            warn!("Failed to remove partial clip {}: {e}", dest.display());
        }

        Err(Error::TranscodeFailed {
            path: dest.to_path_buf(),
            reason: failure_reason(&output),
        })
    }
}
