//! # Palaver Core
//!
//! Foundation types and contracts for the Palaver bot runtime.
//!
//! This crate holds everything the orchestration layer builds on:
//!
//! - **Value types**: [`BotUser`], [`Message`], [`Channel`]
//! - **Event bus**: in-process publish/subscribe with ordered, isolated
//!   delivery ([`EventBus`])
//! - **Mention matching**: case-insensitive identity test ([`MentionMatcher`])
//! - **Collaborator contracts**: the real-time transport ([`Transport`]) and
//!   the control API ([`ApiClient`]) consumed by the runtime
//!
//! The wire protocol itself is out of scope: implementations of
//! [`Transport`] and [`ApiClient`] live elsewhere and are driven through the
//! small lifecycle contracts defined here.
//!
//! ## Event flow
//!
//! ```text
//! ┌───────────┐  mpsc   ┌────────────┐  emit   ┌──────────┐
//! │ Transport │────────▶│ Supervisor │────────▶│ EventBus │──▶ handlers
//! └───────────┘         └────────────┘         └──────────┘
//! ```
//!
//! The transport delivers inbound events through a channel; the supervisor
//! consumes them one at a time and publishes `message` (always) and
//! `mention` (when the text matches the bot's identity) on the bus.

pub mod api;
pub mod bus;
pub mod error;
pub mod mention;
pub mod message;
pub mod transport;
pub mod user;

pub use api::ApiClient;
pub use bus::{EventBus, EventPayload, topics};
pub use error::{AuthError, BoxError, ConnectionError, SendError};
pub use mention::{MentionMatcher, PatternError};
pub use message::{Channel, Message};
pub use transport::{InboundMessage, Transport, TransportEvent};
pub use user::BotUser;
