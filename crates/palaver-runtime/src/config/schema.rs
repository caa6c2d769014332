//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
///
/// The `plugins` map keeps the file's iteration order (serde_json is built
/// with `preserve_order`), which fixes the plugin load order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotSettings {
    /// Destination for the secondary log sink, if any.
    #[serde(default)]
    pub log: Option<PathBuf>,

    /// Log verbosity and filtering.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Messaging service credentials.
    #[serde(default)]
    pub slack: SlackSettings,

    /// Plugins to load at startup, in declaration order.
    #[serde(default)]
    pub plugins: serde_json::Map<String, serde_json::Value>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Credentials for the messaging service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SlackSettings {
    /// Token exchanged for the bot identity at startup.
    #[serde(default)]
    pub token: String,
}
