//! Palaver Runtime - Orchestration layer for the Palaver bot runtime.
//!
//! This crate provides:
//! - Configuration loading and typed access (`Settings`, `ConfigLoader`)
//! - Logging setup (`logging`)
//! - The plugin contract and registry (`Plugin`, `PluginRegistry`)
//! - The connection supervisor and lifecycle state machine (`Bot`)
//! - Quit/restart-via-replacement process supervision (`process`,
//!   `BotContext::{quit, restart}`)
//!
//! # Quick start
//!
//! ```rust,ignore
//! use palaver_runtime::{Bot, PluginRegistry, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     palaver_runtime::logging::init_from_settings(settings.typed());
//!
//!     let mut registry = PluginRegistry::new();
//!     registry.register("echo", echo_plugin);
//!
//!     let mut bot = Bot::new(settings, api, transport, registry)?;
//!     bot.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! The wire-level API client and the real-time transport are collaborators
//! implementing the contracts in `palaver-core`; this crate drives their
//! lifecycles but never touches the protocol itself.

pub mod bot;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod process;
pub mod registry;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use bot::{Bot, Shutdown};
pub use config::{BotSettings, ConfigError, ConfigLoader, ConfigResult, Settings};
pub use context::BotContext;
pub use error::{RuntimeError, RuntimeResult};
pub use plugin::{Plugin, PluginCtor, PluginError};
pub use registry::PluginRegistry;
pub use state::RuntimeState;

// Re-export tracing for use by plugins
pub use tracing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{debug, error, info, trace, warn};

    pub use crate::bot::{Bot, Shutdown};
    pub use crate::config::Settings;
    pub use crate::context::BotContext;
    pub use crate::plugin::{Plugin, PluginError};
    pub use crate::registry::PluginRegistry;
    pub use crate::state::RuntimeState;
}
