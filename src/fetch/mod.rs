//! Remote video resolution and download.

mod ytdlp;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

pub use ytdlp::YtDlpFetcher;

/// A resolved remote video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteVideo {
    /// URL the video was resolved from.
    pub url: String,
    /// Provider-side video identifier.
    pub id: String,
    /// Video title, if the provider reports one.
    pub title: Option<String>,
    /// Total duration in whole seconds.
    pub duration_secs: u64,
}

/// Source of remote videos.
pub trait VideoFetcher {
    /// Look up a video's metadata without downloading it.
    fn resolve(&self, url: &str) -> Result<RemoteVideo>;

    /// Download the highest-resolution stream of `video` into `dir`.
    ///
    /// Returns the path of the file written.
    fn download(&self, video: &RemoteVideo, dir: &Path) -> Result<PathBuf>;
}
