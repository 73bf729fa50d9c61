//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Extract labeled clips from a CSV dataset of YouTube videos.
#[derive(Debug, Parser)]
#[command(name = "clipharvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Dataset CSV: label, video id, start and end seconds (overrides config).
    #[arg(env = "CLIPHARVEST_CSV")]
    pub csv: Option<PathBuf>,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "CLIPHARVEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Options for extraction.
    #[command(flatten)]
    pub extract: ExtractArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for extraction.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractArgs {
    /// Only rows with exactly this label are extracted.
    #[arg(short, long, value_parser = parse_label, env = "CLIPHARVEST_LABEL")]
    pub label: Option<String>,

    /// Output directory for clips.
    #[arg(short, long, env = "CLIPHARVEST_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Directory for per-row downloads.
    #[arg(short, long, env = "CLIPHARVEST_SCRATCH_DIR")]
    pub scratch: Option<PathBuf>,

    /// URL prefix the video id is appended to.
    #[arg(long, env = "CLIPHARVEST_BASE_URL")]
    pub base_url: Option<String>,

    /// Treat the first CSV line as a header (the default).
    #[arg(long, conflicts_with = "no_headers")]
    pub headers: bool,

    /// Treat the first CSV line as data instead of a header.
    #[arg(long, conflicts_with = "headers")]
    pub no_headers: bool,

    /// Write a JSON report of every matching row to this file.
    #[arg(long, env = "CLIPHARVEST_REPORT")]
    pub report: Option<PathBuf>,

    /// Do not report per-row failures.
    #[arg(long)]
    pub silent: bool,

    /// Leave rows whose clip already exists untouched.
    #[arg(long)]
    pub skip_existing: bool,

    /// Stop at the first row that fails.
    #[arg(long)]
    pub fail_fast: bool,

    /// yt-dlp binary.
    #[arg(long, env = "CLIPHARVEST_YTDLP")]
    pub ytdlp: Option<String>,

    /// ffmpeg binary.
    #[arg(long, env = "CLIPHARVEST_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// yt-dlp format selector.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Reject empty labels.
fn parse_label(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("label must not be empty".to_string());
    }
    Ok(s.to_string())
}
