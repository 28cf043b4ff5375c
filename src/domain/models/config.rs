use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::progress::ProgressScheme;

/// Main configuration structure for trendbot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Inbound HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Analysis backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Chat platform configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Defaults for parameters the user did not mention
    #[serde(default)]
    pub defaults: QueryDefaults,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable permissive CORS
    #[serde(default)]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5999
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: false,
        }
    }
}

/// Analysis backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// Base URL of the trend analysis API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Base URL used in links shown to users (defaults to `base_url`)
    #[serde(default)]
    pub results_base_url: Option<String>,

    /// Timeout for a single backend request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Interval between progress polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Failed polls in a row after which tracking is abandoned
    #[serde(default = "default_max_consecutive_poll_failures")]
    pub max_consecutive_poll_failures: u32,

    /// Upper bound on how long one job is tracked, in seconds (None = unbounded)
    #[serde(default = "default_max_tracking_secs")]
    pub max_tracking_secs: Option<u64>,

    /// Progress stages reported by the backend, in wire order
    #[serde(default)]
    pub progress_stages: ProgressScheme,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_max_consecutive_poll_failures() -> u32 {
    5
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_tracking_secs() -> Option<u64> {
    Some(3600)
}

impl BackendConfig {
    /// Base URL for user-facing links.
    pub fn results_base_url(&self) -> &str {
        self.results_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            results_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_consecutive_poll_failures: default_max_consecutive_poll_failures(),
            max_tracking_secs: default_max_tracking_secs(),
            progress_stages: ProgressScheme::default(),
        }
    }
}

/// Chat platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatConfig {
    /// Base URL of the bot framework manager hosting the webhooks
    #[serde(default = "default_sbf_url")]
    pub sbf_base_url: String,

    /// Messenger used when the inbound request does not name one
    #[serde(default = "default_messenger")]
    pub default_messenger: String,
}

fn default_sbf_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_messenger() -> String {
    "trenddetectionbot".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            sbf_base_url: default_sbf_url(),
            default_messenger: default_messenger(),
        }
    }
}

/// Query parameter defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueryDefaults {
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    #[serde(default = "default_end_year")]
    pub end_year: i32,

    /// Maximum embedding distance of matching publications
    #[serde(default = "default_distance")]
    pub distance: f64,

    #[serde(default)]
    pub min_citations: u32,
}

const fn default_start_year() -> i32 {
    1980
}

const fn default_end_year() -> i32 {
    2022
}

const fn default_distance() -> f64 {
    0.11
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            distance: default_distance(),
            min_citations: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stdout only when absent)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Whether to log to stdout
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

const fn default_true() -> bool {
    true
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stdout: true,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_base_url_falls_back_to_base_url() {
        let mut backend = BackendConfig {
            base_url: "http://trends:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(backend.results_base_url(), "http://trends:8000");

        backend.results_base_url = Some("https://trends.example.org".to_string());
        assert_eq!(backend.results_base_url(), "https://trends.example.org");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 7000\n").unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.backend.poll_interval_ms, 1000);
        assert_eq!(config.backend.max_tracking_secs, Some(3600));
        assert_eq!(config.chat.default_messenger, "trenddetectionbot");
    }
}
