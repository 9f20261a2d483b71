//! Tool configuration schema.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every field has a default so an empty file is a valid configuration.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Root configuration for the descriptor tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// How descriptors are turned into deployment units.
    pub deployment: DeploymentConfig,

    /// Descriptor watch settings.
    pub watch: WatchConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Deployment processing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Descriptor section holding destination subscriptions.
    pub messaging_section: String,

    /// Name of the pool defaulted for scheduled jobs.
    pub jobs_pool_name: String,

    /// Force development mode on or off. Unset follows the application env.
    pub development_mode: Option<bool>,

    /// Directory searched for standalone `<section>.yml` files.
    pub config_dir: Option<PathBuf>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            messaging_section: "messaging".to_string(),
            jobs_pool_name: crate::pools::JOBS_POOL_NAME.to_string(),
            development_mode: None,
            config_dir: None,
        }
    }
}

/// Descriptor watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval for file change detection in seconds.
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { poll_interval_secs: 2 }
    }
}
