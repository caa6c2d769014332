//! Plugin contract.
//!
//! A plugin is an extension unit selected by a configuration key. Its
//! constructor receives the raw options object from the `plugins` section;
//! its [`load`](Plugin::load) hook receives the [`BotContext`] and is the
//! place to subscribe to bus events. The runtime does not interpret plugin
//! internals beyond these entry points.

use async_trait::async_trait;
use thiserror::Error;

use palaver_core::error::BoxError;

use crate::context::BotContext;

/// Errors that can occur while loading a plugin.
///
/// These are recoverable: the registry logs them and continues with the
/// remaining plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No constructor registered under this name.
    #[error("unknown plugin '{0}'")]
    Unknown(String),

    /// The options object did not match what the plugin expects.
    #[error("invalid options for plugin '{name}': {reason}")]
    InvalidOptions {
        /// The plugin's configuration key.
        name: String,
        /// What was wrong with the options.
        reason: String,
    },

    /// The plugin's own load hook failed.
    #[error("plugin '{name}' failed to load: {source}")]
    Load {
        /// The plugin's configuration key.
        name: String,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },
}

impl PluginError {
    /// Creates an invalid-options error.
    pub fn invalid_options(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidOptions {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a load-failure error.
    pub fn load(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Load {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Constructor registered for a plugin name.
///
/// Receives the plugin's options object from configuration.
pub type PluginCtor = fn(&serde_json::Value) -> Result<Box<dyn Plugin>, PluginError>;

/// A loadable extension unit.
///
/// # Example
///
/// ```rust,ignore
/// struct Echo;
///
/// #[async_trait]
/// impl Plugin for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn load(&mut self, ctx: BotContext) -> Result<(), PluginError> {
///         let reply_ctx = ctx.clone();
///         ctx.on(topics::MENTION, move |payload| {
///             let ctx = reply_ctx.clone();
///             Box::pin(async move {
///                 if let Some(msg) = payload.as_message() {
///                     ctx.say("you rang?", msg.channel()).await?;
///                 }
///                 Ok(())
///             })
///         });
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The plugin's display name.
    fn name(&self) -> &str;

    /// Called once at startup, before the connection opens.
    ///
    /// Subscribe to bus events here. Returning an error marks this plugin
    /// as failed without affecting the others.
    async fn load(&mut self, ctx: BotContext) -> Result<(), PluginError>;

    /// Called once at shutdown, after the connection closed.
    async fn unload(&mut self) {}
}
