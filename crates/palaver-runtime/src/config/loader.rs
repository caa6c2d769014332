//! Configuration loader using figment.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. The JSON configuration file
//! 3. Environment variables (`PALAVER_*`, `__` as nesting separator)
//!
//! The file location is resolved once at construction time: an explicit
//! path if given, otherwise `palaver.json` in the current directory,
//! otherwise `.palaver.json` in the user's home directory. There is no
//! multi-file merging beyond this single resolution.
//!
//! # Environment variable mapping
//!
//! - `PALAVER_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `PALAVER_SLACK__TOKEN=xoxb-...` → `slack.token = "xoxb-..."`
//!
//! # Plugin ordering
//!
//! Figment's merged dictionaries are sorted, which would scramble the
//! plugin load order. The `plugins` map is therefore re-read from the JSON
//! document itself (serde_json preserves insertion order here) after the
//! merged extraction.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use tracing::{debug, info, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::BotSettings;

/// Loaded, read-only runtime settings.
///
/// Exposes both the typed schema ([`BotSettings`]) and raw dotted-path
/// lookups over the merged configuration tree.
#[derive(Debug, Clone)]
pub struct Settings {
    typed: BotSettings,
    raw: serde_json::Value,
}

impl Settings {
    /// Loads settings from the default locations.
    pub fn load() -> ConfigResult<Self> {
        ConfigLoader::new().load()
    }

    /// Loads settings from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        ConfigLoader::new().file(path).load()
    }

    /// Builds settings from an inline JSON document.
    ///
    /// Environment variables are not consulted; intended for tests and
    /// embedding.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let figment = Figment::from(Serialized::defaults(BotSettings::default()))
            .merge(Json::string(json));
        Self::extract(figment, Some(json))
    }

    /// Returns the typed configuration schema.
    pub fn typed(&self) -> &BotSettings {
        &self.typed
    }

    /// Looks up a value by dotted path (e.g. `"slack.token"`).
    ///
    /// Fails with [`ConfigError::MissingKey`] when any segment of the path
    /// is absent.
    pub fn get(&self, path: &str) -> ConfigResult<&serde_json::Value> {
        let mut current = &self.raw;
        for segment in path.split('.') {
            current = current
                .get(segment)
                .ok_or_else(|| ConfigError::MissingKey(path.to_string()))?;
        }
        Ok(current)
    }

    /// Looks up a value by dotted path, falling back to `default` when the
    /// path is absent.
    pub fn get_or<'a>(
        &'a self,
        path: &str,
        default: &'a serde_json::Value,
    ) -> &'a serde_json::Value {
        self.get(path).unwrap_or(default)
    }

    /// Looks up a string value by dotted path.
    pub fn get_str(&self, path: &str) -> ConfigResult<&str> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| ConfigError::Parse(format!("key '{path}' is not a string")))
    }

    /// Extracts settings from the merged figment, restoring plugin order
    /// from the original document when one is available.
    fn extract(figment: Figment, document: Option<&str>) -> ConfigResult<Self> {
        let mut typed: BotSettings = figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        let raw: serde_json::Value = figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(document) = document
            && let Some(plugins) = Self::ordered_plugins(document)?
        {
            typed.plugins = plugins;
        }

        debug!(level = %typed.logging.level, plugins = typed.plugins.len(), "Configuration loaded");

        Ok(Self { typed, raw })
    }

    /// Reads the `plugins` object straight from the JSON document so its
    /// declaration order survives the merge.
    fn ordered_plugins(
        document: &str,
    ) -> ConfigResult<Option<serde_json::Map<String, serde_json::Value>>> {
        let value: serde_json::Value =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        match value.get("plugins") {
            None => Ok(None),
            Some(serde_json::Value::Object(map)) => Ok(Some(map.clone())),
            Some(_) => Err(ConfigError::Parse(
                "key 'plugins' is not an object".to_string(),
            )),
        }
    }
}

/// Builder for loading [`Settings`].
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with default sources.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables environment variable overrides (default: enabled).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables environment variable overrides.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Loads and returns the settings.
    pub fn load(self) -> ConfigResult<Settings> {
        let mut figment = Figment::from(Serialized::defaults(BotSettings::default()));

        let document = match self.resolve_file()? {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                let contents = std::fs::read_to_string(&path)?;
                figment = figment.merge(Json::string(&contents));
                Some(contents)
            }
            None => {
                warn!("No configuration file found, using defaults");
                None
            }
        };

        if self.load_env {
            figment = figment.merge(Env::prefixed("PALAVER_").split("__"));
        }

        Settings::extract(figment, document.as_deref())
    }

    /// Resolves the configuration file for this loader.
    fn resolve_file(&self) -> ConfigResult<Option<PathBuf>> {
        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            return Ok(Some(path.clone()));
        }
        Ok(Self::default_file())
    }

    /// Resolves the default configuration file location.
    ///
    /// `palaver.json` in the current directory wins over `.palaver.json`
    /// in the home directory.
    fn default_file() -> Option<PathBuf> {
        if let Ok(cwd) = std::env::current_dir() {
            let local = cwd.join("palaver.json");
            if local.exists() {
                return Some(local);
            }
        }
        if let Some(home) = dirs::home_dir() {
            let user = home.join(".palaver.json");
            if user.exists() {
                return Some(user);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "log": "/var/log/palaver.log",
        "logging": { "level": "debug" },
        "slack": { "token": "xoxb-test" },
        "plugins": {
            "echo": { "greeting": "hi" },
            "karma": {},
            "dice": { "sides": 6 }
        }
    }"#;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings.typed().logging.level, "info");
        assert!(settings.typed().plugins.is_empty());
        assert!(settings.typed().log.is_none());
    }

    #[test]
    fn dotted_path_lookup() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();
        assert_eq!(settings.get_str("slack.token").unwrap(), "xoxb-test");
        assert_eq!(settings.get_str("logging.level").unwrap(), "debug");
        assert_eq!(
            settings.get("plugins.dice.sides").unwrap(),
            &serde_json::json!(6)
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();
        let err = settings.get("slack.team").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(key) if key == "slack.team"));
    }

    #[test]
    fn get_or_avoids_the_error_path() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();
        let fallback = serde_json::json!("general");
        assert_eq!(
            settings.get_or("slack.channel", &fallback),
            &serde_json::json!("general")
        );
        assert_eq!(
            settings.get_or("slack.token", &fallback),
            &serde_json::json!("xoxb-test")
        );
    }

    #[test]
    fn plugin_order_follows_the_file() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();
        let names: Vec<&str> = settings.typed().plugins.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["echo", "karma", "dice"]);
    }

    #[test]
    fn missing_explicit_file_fails() {
        let err = ConfigLoader::new()
            .file("/nonexistent/palaver.json")
            .without_env()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
