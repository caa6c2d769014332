//! Configuration module for the Palaver runtime.
//!
//! Settings are loaded once at startup from a single JSON file (plus
//! `PALAVER_*` environment overrides) and are read-only afterwards; there
//! is no hot reload.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Settings};
pub use schema::{BotSettings, LoggingSettings, SlackSettings};
