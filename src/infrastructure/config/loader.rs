use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "trendbot.yaml";
/// Local overrides, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "trendbot.local.yaml";

/// Environment variables kept from earlier deployments, with the config
/// keys they set.
const LEGACY_ENV_KEYS: [(&str, &str); 2] = [
    ("TREND_API_HOST", "backend.base_url"),
    ("SBF_API_HOST", "chat.sbf_base_url"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    EmptyUrl(&'static str),

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid poll_interval_ms: 0. Must be at least 1")]
    InvalidPollInterval,

    #[error("Invalid max_consecutive_poll_failures: 0. Must be at least 1")]
    InvalidFailureBudget,

    #[error("Invalid max_tracking_secs: 0. Omit it to track without a deadline")]
    InvalidTrackingDeadline,

    #[error("Invalid year range: start_year ({0}) is after end_year ({1})")]
    InvalidYearRange(i32, i32),

    #[error("Invalid distance: {0}. Must be a non-negative number")]
    InvalidDistance(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `trendbot.yaml`, or `path` when given
    /// 3. `trendbot.local.yaml` (optional local overrides)
    /// 4. Legacy `TREND_API_HOST` / `SBF_API_HOST` variables
    /// 5. Environment variables (`TRENDBOT_*` prefix, `__` for nesting)
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config: Config = Self::figment(path)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The layered figment used by [`ConfigLoader::load`].
    pub fn figment(path: Option<&Path>) -> Figment {
        let primary = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(primary))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::raw().only(&LEGACY_ENV_KEYS.map(|(var, _)| var)).map(|var| {
                LEGACY_ENV_KEYS
                    .iter()
                    .find(|(legacy, _)| var.as_str().eq_ignore_ascii_case(legacy))
                    .map_or_else(|| var.as_str().to_string(), |(_, key)| (*key).to_string())
                    .into()
            }))
            .merge(Env::prefixed("TRENDBOT_").split("__"))
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        // Validate backend config
        if config.backend.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("backend.base_url"));
        }
        if config.backend.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        if config.backend.max_consecutive_poll_failures == 0 {
            return Err(ConfigError::InvalidFailureBudget);
        }
        if config.backend.max_tracking_secs == Some(0) {
            return Err(ConfigError::InvalidTrackingDeadline);
        }
        if config.chat.sbf_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("chat.sbf_base_url"));
        }

        // Validate query defaults
        if config.defaults.start_year > config.defaults.end_year {
            return Err(ConfigError::InvalidYearRange(
                config.defaults.start_year,
                config.defaults.end_year,
            ));
        }
        if !config.defaults.distance.is_finite() || config.defaults.distance < 0.0 {
            return Err(ConfigError::InvalidDistance(config.defaults.distance));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
