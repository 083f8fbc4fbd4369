//! Run configuration.
//!
//! Handles loading, validating and layering `fitwidth.toml`. Values resolve
//! in three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  →  fitwidth.toml  →  command-line flags
//! ```
//!
//! ## Config File Location
//!
//! `fitwidth.toml` is read from the directory being resized. A different file
//! can be named with `--config`; a file named that way must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! max_width = 800          # Images wider than this are shrunk to it
//! filter = "lanczos3"      # lanczos3, catmull-rom, gaussian, triangle, nearest
//! on_error = "abort"       # abort | skip
//! recursive = false        # Also resize images in sub-directories
//! skip_hidden = false      # Leave out dot-files and dot-directories
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{FitParams, ResampleFilter};
use crate::scan::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the target directory.
pub const CONFIG_FILE_NAME: &str = "fitwidth.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What to do when a file fails to decode or to save.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OnError {
    /// Stop the run at the first failing file.
    #[default]
    Abort,
    /// Record the failure, log it, and move on to the next file.
    Skip,
}

/// Configuration for one resize run.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Images wider than this many pixels are shrunk to exactly this width.
    pub max_width: u32,
    /// Resampling filter.
    pub filter: ResampleFilter,
    /// Failure policy for decode and write errors.
    pub on_error: OnError,
    /// Descend into sub-directories.
    pub recursive: bool,
    /// Leave out files and directories whose name starts with a dot.
    pub skip_hidden: bool,
    /// Report what would change without writing. Command line only.
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            filter: ResampleFilter::Lanczos3,
            on_error: OnError::Abort,
            recursive: false,
            skip_hidden: false,
            dry_run: false,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_width: Option<u32>,
    pub filter: Option<ResampleFilter>,
    pub on_error: Option<OnError>,
    pub recursive: bool,
    pub skip_hidden: bool,
    pub dry_run: bool,
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::Validation(
                "max_width must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of this config.
    ///
    /// Boolean flags can only switch a setting on; a file that enables
    /// `recursive` is not turned off by omitting `--recursive`.
    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(max_width) = overrides.max_width {
            self.max_width = max_width;
        }
        if let Some(filter) = overrides.filter {
            self.filter = filter;
        }
        if let Some(on_error) = overrides.on_error {
            self.on_error = on_error;
        }
        self.recursive |= overrides.recursive;
        self.skip_hidden |= overrides.skip_hidden;
        self.dry_run |= overrides.dry_run;
        self
    }

    pub fn fit_params(&self) -> FitParams {
        FitParams {
            max_width: self.max_width,
            filter: self.filter,
            dry_run: self.dry_run,
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive,
            skip_hidden: self.skip_hidden,
        }
    }
}

/// Parse a config from TOML text and validate it.
pub fn parse_config(content: &str) -> Result<ResizeConfig, ConfigError> {
    let config: ResizeConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `fitwidth.toml` from `dir`, falling back to defaults if absent.
pub fn load_config(dir: &Path) -> Result<ResizeConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(ResizeConfig::default());
    }
    load_config_file(&config_path)
}

/// Load a config file that must exist.
pub fn load_config_file(path: &Path) -> Result<ResizeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Resolve the full config for a run: file layer, then overrides, then validation.
pub fn resolve(
    dir: &Path,
    explicit_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<ResizeConfig, ConfigError> {
    let base = match explicit_file {
        Some(path) => load_config_file(path)?,
        None => load_config(dir)?,
    };
    let config = base.apply(overrides);
    config.validate()?;
    Ok(config)
}

/// A documented `fitwidth.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r##"# fitwidth configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as fitwidth.toml in the directory you resize, or pass it
# with --config. Command-line flags override values set here.
# Unknown keys will cause an error.

# Images wider than this (in pixels) are shrunk to exactly this width.
# Height is scaled by the same ratio and rounded down.
max_width = 800

# Resampling filter used when shrinking.
# One of: lanczos3, catmull-rom, gaussian, triangle, nearest
filter = "lanczos3"

# What to do when a file cannot be decoded or written back.
#   abort: stop at the first failure
#   skip:  report the failure and continue with the next file
on_error = "abort"

# Also resize images in sub-directories.
recursive = false

# Leave out files and directories whose name starts with a dot.
# By default they are resized like any other image.
skip_hidden = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_expected_values() {
        let config = ResizeConfig::default();
        assert_eq!(config.max_width, 800);
        assert_eq!(config.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.on_error, OnError::Abort);
        assert!(!config.recursive);
        assert!(!config.skip_hidden);
        assert!(!config.dry_run);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config("max_width = 1200\n").unwrap();
        assert_eq!(config.max_width, 1200);
        assert_eq!(config.filter, ResampleFilter::Lanczos3);
    }

    #[test]
    fn parse_enums_in_kebab_case() {
        let config = parse_config("filter = \"catmull-rom\"\non_error = \"skip\"\n").unwrap();
        assert_eq!(config.filter, ResampleFilter::CatmullRom);
        assert_eq!(config.on_error, OnError::Skip);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = parse_config("max_widht = 800\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_filter_rejected() {
        let result = parse_config("filter = \"bicubic\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn dry_run_cannot_be_set_from_file() {
        let result = parse_config("dry_run = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn zero_max_width_fails_validation() {
        let result = parse_config("max_width = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn negative_max_width_is_a_parse_error() {
        let result = parse_config("max_width = -5\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, ResizeConfig::default());
    }

    #[test]
    fn load_config_reads_file_in_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "max_width = 640\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.max_width, 640);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("other.toml");
        let result = resolve(tmp.path(), Some(&missing), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn explicit_config_file_wins_over_directory_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "max_width = 640\n").unwrap();
        let other = tmp.path().join("other.toml");
        fs::write(&other, "max_width = 1024\n").unwrap();

        let config = resolve(tmp.path(), Some(&other), &Overrides::default()).unwrap();
        assert_eq!(config.max_width, 1024);
    }

    #[test]
    fn overrides_win_over_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "max_width = 640\nfilter = \"gaussian\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            max_width: Some(320),
            dry_run: true,
            ..Overrides::default()
        };
        let config = resolve(tmp.path(), None, &overrides).unwrap();
        assert_eq!(config.max_width, 320);
        assert_eq!(config.filter, ResampleFilter::Gaussian);
        assert!(config.dry_run);
    }

    #[test]
    fn zero_override_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let overrides = Overrides {
            max_width: Some(0),
            ..Overrides::default()
        };
        let result = resolve(tmp.path(), None, &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn boolean_flags_only_switch_on() {
        let config = ResizeConfig {
            recursive: true,
            ..ResizeConfig::default()
        }
        .apply(&Overrides::default());
        assert!(config.recursive);
    }

    #[test]
    fn skip_hidden_from_file_or_flag() {
        let from_file = parse_config("skip_hidden = true").unwrap();
        assert!(from_file.scan_options().skip_hidden);

        let from_flag = ResizeConfig::default().apply(&Overrides {
            skip_hidden: true,
            ..Overrides::default()
        });
        assert!(from_flag.scan_options().skip_hidden);
    }

    #[test]
    fn include_hidden_key_is_rejected() {
        assert!(matches!(
            parse_config("include_hidden = true"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn fit_params_and_scan_options_follow_config() {
        let config = ResizeConfig {
            max_width: 500,
            filter: ResampleFilter::Nearest,
            recursive: true,
            dry_run: true,
            ..ResizeConfig::default()
        };
        let params = config.fit_params();
        assert_eq!(params.max_width, 500);
        assert_eq!(params.filter, ResampleFilter::Nearest);
        assert!(params.dry_run);
        assert!(config.scan_options().recursive);
        assert!(!config.scan_options().skip_hidden);
    }

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config, ResizeConfig::default());
    }
}
