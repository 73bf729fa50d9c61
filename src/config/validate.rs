//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_dataset(config)?;
    validate_tools(config)?;
    Ok(())
}

/// Validate dataset and source settings.
fn validate_dataset(config: &Config) -> Result<()> {
    if let Some(label) = &config.dataset.target_label
        && label.trim().is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "target_label must not be empty".to_string(),
        });
    }

    if config.source.base_url.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "base_url must not be empty".to_string(),
        });
    }

    if config.paths.output_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output_dir must not be empty".to_string(),
        });
    }

    if config.paths.scratch_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "scratch_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate external tool settings.
fn validate_tools(config: &Config) -> Result<()> {
    let required = [
        ("source.ytdlp", &config.source.ytdlp),
        ("source.format", &config.source.format),
        ("trim.ffmpeg", &config.trim.ffmpeg),
        ("trim.video_codec", &config.trim.video_codec),
        ("trim.audio_codec", &config.trim.audio_codec),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("{name} must not be empty"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_blank_label() {
        let mut config = Config::default();
        config.dataset.target_label = Some("  ".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = Config::default();
        config.source.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let mut config = Config::default();
        config.paths.output_dir = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_ffmpeg() {
        let mut config = Config::default();
        config.trim.ffmpeg = String::new();
        let result = validate_config(&config);
        assert!(
            matches!(result, Err(Error::ConfigValidation { message }) if message.contains("trim.ffmpeg"))
        );
    }
}
