//! Layered configuration for the bot.
//!
//! Built-in defaults are overlaid by `trendbot.yaml`, `trendbot.local.yaml`,
//! the legacy `TREND_API_HOST` / `SBF_API_HOST` variables, and finally
//! `TRENDBOT_*` variables (`__` separates nested keys).

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE, LOCAL_CONFIG_FILE};
