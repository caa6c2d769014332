//! Message and channel value types.
//!
//! Both types are immutable once constructed. A [`Message`] is built exactly
//! once per inbound transport event and travels through the bus behind an
//! `Arc`; a [`Channel`] is a plain destination reference passed by value to
//! outbound sends.

use serde::{Deserialize, Serialize};

use crate::transport::InboundMessage;

/// Destination reference used to address outbound sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Service-assigned channel id.
    pub id: String,
    /// Human-readable channel name.
    pub name: String,
}

impl Channel {
    /// Creates a new channel reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.name)
    }
}

/// An inbound chat message as seen by subscribers.
///
/// Wraps the raw transport payload; not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Plain message text.
    pub text: String,
    /// Id of the user that sent the message.
    pub sender: String,
    /// Channel the message arrived in.
    pub channel: Channel,
    /// Service timestamp of the message.
    pub ts: String,
}

impl Message {
    /// Builds a message value from a raw inbound transport event.
    pub fn from_inbound(inbound: InboundMessage) -> Self {
        Self {
            text: inbound.text,
            sender: inbound.sender,
            channel: inbound.channel,
            ts: inbound.ts,
        }
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the channel the message arrived in.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_inbound_preserves_fields() {
        let inbound = InboundMessage {
            text: "hello there".into(),
            sender: "U123".into(),
            channel: Channel::new("C1", "general"),
            ts: "1727000000.000100".into(),
        };

        let msg = Message::from_inbound(inbound);
        assert_eq!(msg.text(), "hello there");
        assert_eq!(msg.sender, "U123");
        assert_eq!(msg.channel().name, "general");
        assert_eq!(msg.ts, "1727000000.000100");
    }

    #[test]
    fn channel_display_uses_name() {
        let channel = Channel::new("C42", "random");
        assert_eq!(channel.to_string(), "#random");
    }
}
