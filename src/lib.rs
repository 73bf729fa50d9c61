//! Clipharvest - labeled video clip extraction from CSV datasets.
//!
//! This crate reads a dataset of `(label, video id, start, end)` rows,
//! downloads the referenced YouTube videos for one label and writes the
//! labeled segment of each as a separate clip.

#![warn(missing_docs)]

pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;
pub mod utils;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, ExtractArgs};
use clipper::{DatasetClipExtractor, ExtractorSettings, FfmpegTrimmer};
use config::{Config, config_file_path, load_config, save_config, validate_config};
use constants::EXIT_INTERRUPTED;
use fetch::YtDlpFetcher;
use output::{EventType, RunReport, write_report};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

pub use error::{Error, Result};

/// Main entry point for clipharvest CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.extract.verbose, cli.extract.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;
    validate_config(&config)?;

    let settings = resolve_settings(cli.csv, &cli.extract, &config)?;
    let report_path = cli.extract.report.clone().or_else(|| config.report.path.clone());

    let cancelled = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&cancelled));

    info!(
        "Extracting '{}' clips from {} into {}",
        settings.target_label,
        settings.source_csv.display(),
        settings.output_dir.display()
    );

    let extractor = DatasetClipExtractor::new(
        settings,
        build_fetcher(&cli.extract, &config),
        build_trimmer(&cli.extract, &config),
    )
    .with_cancel_flag(cancelled);

    let report = extractor.run()?;
    log_summary(&report);

    finish_run(&report, report_path.as_deref())
}

/// Combine CLI arguments and configuration into run settings.
///
/// CLI values win over the configuration file.
pub fn resolve_settings(
    csv: Option<PathBuf>,
    args: &ExtractArgs,
    config: &Config,
) -> Result<ExtractorSettings> {
    let source_csv = csv
        .or_else(|| config.dataset.csv.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no dataset CSV specified (pass a path or set dataset.csv in config)"
                .to_string(),
        })?;

    let target_label = args
        .label
        .clone()
        .or_else(|| config.dataset.target_label.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no target label specified (use -l or set dataset.target_label in config)"
                .to_string(),
        })?;

    let silent = args.silent || config.report.silent;

    Ok(ExtractorSettings {
        source_csv,
        has_headers: args.headers || (config.dataset.has_headers && !args.no_headers),
        scratch_dir: args
            .scratch
            .clone()
            .unwrap_or_else(|| config.paths.scratch_dir.clone()),
        output_dir: args
            .output
            .clone()
            .unwrap_or_else(|| config.paths.output_dir.clone()),
        target_label,
        base_url: args
            .base_url
            .clone()
            .unwrap_or_else(|| config.source.base_url.clone()),
        silent,
        skip_existing: args.skip_existing,
        fail_fast: args.fail_fast,
        show_progress: !args.quiet && !args.no_progress && !silent,
    })
}

fn build_fetcher(args: &ExtractArgs, config: &Config) -> YtDlpFetcher {
    YtDlpFetcher::new(
        args.ytdlp.clone().unwrap_or_else(|| config.source.ytdlp.clone()),
        args.format
            .clone()
            .unwrap_or_else(|| config.source.format.clone()),
    )
}

fn build_trimmer(args: &ExtractArgs, config: &Config) -> FfmpegTrimmer {
    FfmpegTrimmer::new(
        args.ffmpeg.clone().unwrap_or_else(|| config.trim.ffmpeg.clone()),
        config.trim.video_codec.clone(),
        config.trim.audio_codec.clone(),
    )
}

/// First Ctrl+C stops after the current row, a second one exits immediately.
fn install_interrupt_handler(cancelled: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        if cancelled.swap(true, Ordering::SeqCst) {
            std::process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("Stopping after the current row (Ctrl+C again to quit now)");
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }
}

fn log_summary(report: &RunReport) {
    #[allow(clippy::cast_precision_loss)]
    let secs = report.duration_ms as f64 / 1000.0;
    info!(
        "Complete: {} written, {} skipped, {} failed of {} matching rows ({} total) in {:.1}s",
        report.written,
        report.skipped_existing,
        report.failed,
        report.matched_rows,
        report.total_rows,
        secs
    );

    for clip in report.written_clips() {
        debug!("Wrote {}", clip.display());
    }

    if report.failed > 0 {
        warn!("{} row(s) produced no clip", report.failed);
    }
}

/// Write the report if requested and turn early stops into errors.
fn finish_run(report: &RunReport, report_path: Option<&Path>) -> Result<()> {
    let event = if report.cancelled {
        EventType::RunCancelled
    } else if report.aborted {
        EventType::RunAborted
    } else {
        EventType::RunCompleted
    };

    if let Some(path) = report_path {
        write_report(path, event, report)?;
        info!("Report written to {}", path.display());
    }

    match event {
        EventType::RunCancelled => Err(Error::Cancelled),
        EventType::RunAborted => {
            let (row_index, message) = report.last_failure().unwrap_or((0, "unknown error"));
            Err(Error::RunAborted {
                row_index,
                message: message.to_string(),
            })
        }
        EventType::RunCompleted => Ok(()),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config_path: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config_path),
    }
}

fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  set dataset.csv and dataset.target_label, then run: clipharvest");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("# {}", path.display());
            println!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> (Option<PathBuf>, ExtractArgs) {
        let mut full = vec!["clipharvest"];
        full.extend_from_slice(argv);
        let cli = Cli::try_parse_from(full).unwrap();
        (cli.csv, cli.extract)
    }

    #[test]
    fn test_resolve_settings_cli_overrides_config() {
        let mut config = Config::default();
        config.dataset.csv = Some(PathBuf::from("config.csv"));
        config.dataset.target_label = Some("situps".to_string());

        let (csv, extract) = args(&["cli.csv", "-l", "pull ups", "-o", "out"]);
        let settings = resolve_settings(csv, &extract, &config).unwrap();

        assert_eq!(settings.source_csv, PathBuf::from("cli.csv"));
        assert_eq!(settings.target_label, "pull ups");
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.scratch_dir, PathBuf::from("buffer"));
        assert_eq!(settings.base_url, "https://www.youtube.com/watch?v=");
        assert!(settings.has_headers);
    }

    #[test]
    fn test_resolve_settings_falls_back_to_config() {
        let mut config = Config::default();
        config.dataset.csv = Some(PathBuf::from("config.csv"));
        config.dataset.target_label = Some("situps".to_string());
        config.report.silent = true;

        let (csv, extract) = args(&["--no-headers"]);
        let settings = resolve_settings(csv, &extract, &config).unwrap();

        assert_eq!(settings.source_csv, PathBuf::from("config.csv"));
        assert_eq!(settings.target_label, "situps");
        assert!(!settings.has_headers);
        assert!(settings.silent);
        assert!(!settings.show_progress);
    }

    #[test]
    fn test_headers_flag_overrides_config() {
        let mut config = Config::default();
        config.dataset.has_headers = false;
        config.dataset.target_label = Some("situps".to_string());

        let (csv, extract) = args(&["train.csv", "--headers"]);
        let settings = resolve_settings(csv, &extract, &config).unwrap();
        assert!(settings.has_headers);

        let (csv, extract) = args(&["train.csv"]);
        let settings = resolve_settings(csv, &extract, &config).unwrap();
        assert!(!settings.has_headers);
    }

    #[test]
    fn test_resolve_settings_requires_label() {
        let (csv, extract) = args(&["train.csv"]);
        let result = resolve_settings(csv, &extract, &Config::default());
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_resolve_settings_requires_csv() {
        let (csv, extract) = args(&["-l", "pull ups"]);
        let result = resolve_settings(csv, &extract, &Config::default());
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_finish_run_cancelled_writes_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = RunReport {
            cancelled: true,
            ..RunReport::default()
        };

        let result = finish_run(&report, Some(&path));
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(path.exists());
    }

    #[test]
    fn test_finish_run_completed_is_ok() {
        assert!(finish_run(&RunReport::default(), None).is_ok());
    }
}
