//! # Palaver
//!
//! A plugin-driven chat-bot runtime.
//!
//! Palaver keeps a persistent connection to a real-time messaging service,
//! fans inbound messages out to subscribers over an in-process event bus,
//! and supervises its own lifecycle including restart via process
//! replacement.
//!
//! - [`palaver_core`] holds the value types, the event bus, the mention
//!   matcher, and the collaborator contracts ([`Transport`], [`ApiClient`]).
//! - [`palaver_runtime`] holds configuration, logging, the plugin registry,
//!   and the connection/process supervisors ([`Bot`], [`BotContext`]).
//!
//! ## Example
//!
//! ```rust,ignore
//! use palaver::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     palaver::logging::init_from_settings(settings.typed());
//!
//!     let mut registry = PluginRegistry::new();
//!     registry.register("echo", |_options| Ok(Box::new(EchoPlugin::default())));
//!
//!     let mut bot = Bot::new(settings, api_client, transport, registry)?;
//!     bot.run().await?;
//!     Ok(())
//! }
//! ```

pub use palaver_core::{
    ApiClient, AuthError, BotUser, BoxError, Channel, ConnectionError, EventBus, EventPayload,
    InboundMessage, MentionMatcher, Message, SendError, Transport, TransportEvent, topics,
};
pub use palaver_runtime::{
    Bot, BotContext, BotSettings, ConfigError, ConfigLoader, Plugin, PluginCtor, PluginError,
    PluginRegistry, RuntimeError, RuntimeResult, RuntimeState, Settings, Shutdown, logging,
};

/// Prelude for common imports.
pub mod prelude {
    pub use palaver_core::{
        ApiClient, BotUser, Channel, EventPayload, Message, Transport, TransportEvent, topics,
    };
    pub use palaver_runtime::prelude::*;
}
