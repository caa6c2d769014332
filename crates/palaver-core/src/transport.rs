//! Real-time transport contract.
//!
//! The transport owns the live socket to the messaging service: framing,
//! keep-alive, and any reconnect/backoff strategy are its concern, not the
//! runtime's. The runtime drives it through this small lifecycle contract
//! and consumes inbound traffic from the channel returned by
//! [`Transport::connect`].
//!
//! The channel is also the concurrency seam: a transport that reads frames
//! on its own task (or thread) simply sends into it, and the supervisor's
//! single receive loop preserves total FIFO ordering of delivery.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{ConnectionError, SendError};
use crate::message::Channel;

/// Raw inbound message payload delivered by the transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Plain message text.
    pub text: String,
    /// Id of the sending user.
    pub sender: String,
    /// Channel the message arrived in.
    pub channel: Channel,
    /// Service timestamp.
    pub ts: String,
}

/// Events delivered on the inbound channel.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// An inbound chat message.
    Message(InboundMessage),
    /// The connection closed; carries the close reason when known.
    ///
    /// After this event the channel yields no further messages.
    Closed(Option<String>),
}

/// Contract for the real-time transport collaborator.
///
/// At most one connection exists per runtime instance; `connect` is called
/// once during startup. After [`disconnect`](Transport::disconnect) the
/// transport must stop delivering events and close the inbound channel so
/// the supervisor's receive loop can return.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Opens the connection and returns the inbound event stream.
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ConnectionError>;

    /// Sends a text message to a channel.
    async fn send(&self, text: &str, channel: &Channel) -> Result<(), SendError>;

    /// Closes the connection. Idempotent from the transport's perspective;
    /// the runtime additionally guarantees it is invoked at most once.
    async fn disconnect(&self);
}
