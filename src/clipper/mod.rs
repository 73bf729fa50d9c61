//! Video clip extraction from labeled datasets.
//!
//! This module provides the extraction run loop and the trimming backend
//! that cuts downloaded videos down to the labeled time range.

mod extractor;
mod trimmer;

pub use extractor::{DatasetClipExtractor, ExtractorSettings, scratch_dir_for};
pub use trimmer::{ClipTrimmer, FfmpegTrimmer, TrimRange, clip_path};
