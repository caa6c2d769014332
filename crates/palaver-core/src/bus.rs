//! In-process publish/subscribe for runtime-wide events.
//!
//! The bus is a mapping from event name to an ordered list of handlers.
//! Delivery guarantees:
//!
//! - Handlers run in registration order, sequentially, on the emitting task.
//! - A failing handler is logged and isolated: the remaining handlers still
//!   run, and the emitter's caller never observes the failure.
//! - No cross-task delivery: emission completes before `emit` returns.
//!
//! Registration happens during plugin load, before the connection starts
//! listening, so the handler map is effectively frozen while events flow.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use tracing::{debug, error};

use crate::error::BoxError;
use crate::message::Message;

/// Well-known event names emitted by the connection supervisor.
pub mod topics {
    /// Emitted once for every inbound message.
    pub const MESSAGE: &str = "message";
    /// Emitted when an inbound message mentions the bot.
    pub const MENTION: &str = "mention";
}

/// Payload carried by a bus event.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// An inbound chat message (`message` and `mention` events).
    Message(Arc<Message>),
    /// Arbitrary structured data for custom events.
    Value(Arc<serde_json::Value>),
}

impl EventPayload {
    /// Returns the message if this payload carries one.
    pub fn as_message(&self) -> Option<&Arc<Message>> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Value(_) => None,
        }
    }
}

impl From<Message> for EventPayload {
    fn from(msg: Message) -> Self {
        Self::Message(Arc::new(msg))
    }
}

impl From<serde_json::Value> for EventPayload {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(Arc::new(value))
    }
}

/// Type-erased async event handler.
pub type Handler =
    Arc<dyn Fn(EventPayload) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// The runtime-wide event bus.
///
/// Cheap to share: clone an `Arc<EventBus>` wherever subscribers live.
///
/// # Example
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// bus.on(topics::MENTION, |payload| {
///     Box::pin(async move {
///         if let Some(msg) = payload.as_message() {
///             println!("mentioned: {}", msg.text());
///         }
///         Ok(())
///     })
/// });
/// ```
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<HashMap<String, Vec<Handler>>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the named event.
    ///
    /// Multiple handlers per event are permitted; they run in registration
    /// order on every emission.
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(EventPayload) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync + 'static,
    {
        let event = event.into();
        let mut handlers = self.handlers.write();
        handlers.entry(event).or_default().push(Arc::new(handler));
    }

    /// Emits an event to every registered handler, in registration order.
    ///
    /// Handlers run sequentially on the calling task; a handler error is
    /// logged and does not stop the remaining handlers or propagate to the
    /// caller.
    pub async fn emit(&self, event: &str, payload: EventPayload) {
        // Snapshot outside the lock so handlers can await freely.
        let snapshot: Vec<Handler> = {
            let handlers = self.handlers.read();
            match handlers.get(event) {
                Some(list) => list.clone(),
                None => {
                    debug!(event, "No handlers registered");
                    return;
                }
            }
        };

        for (index, handler) in snapshot.iter().enumerate() {
            if let Err(e) = handler(payload.clone()).await {
                error!(event, handler = index, error = %e, "Event handler failed");
            }
        }
    }

    /// Returns the number of handlers registered for the named event.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.read().get(event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        f.debug_struct("EventBus")
            .field("events", &handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
