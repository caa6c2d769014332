//! Test doubles for the collaborator contracts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use palaver_core::api::ApiClient;
use palaver_core::error::{AuthError, ConnectionError, SendError};
use palaver_core::message::Channel;
use palaver_core::transport::{InboundMessage, Transport, TransportEvent};
use palaver_core::user::BotUser;

use crate::config::Settings;

/// Settings with just enough configuration to construct a bot.
pub fn settings_with_token() -> Settings {
    Settings::from_json_str(r#"{"slack": {"token": "xoxb-test"}}"#).unwrap()
}

/// Scripted transport: events queued before `connect` are delivered in
/// order; sends and disconnects are recorded.
pub struct MockTransport {
    sender: Mutex<Option<mpsc::Sender<TransportEvent>>>,
    receiver: Mutex<Option<mpsc::Receiver<TransportEvent>>>,
    sent: Mutex<Vec<String>>,
    pub send_count: AtomicUsize,
    disconnects: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            sender: Mutex::new(Some(tx)),
            receiver: Mutex::new(Some(rx)),
            sent: Mutex::new(Vec::new()),
            send_count: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        }
    }

    /// Queues an inbound chat message.
    pub fn script_message(&self, text: &str) {
        let event = TransportEvent::Message(InboundMessage {
            text: text.to_string(),
            sender: "U123".to_string(),
            channel: Channel::new("C1", "general"),
            ts: "1727000000.000100".to_string(),
        });
        self.sender
            .lock()
            .as_ref()
            .expect("transport already closed")
            .try_send(event)
            .expect("script buffer full");
    }

    /// Queues a server-side close, ending the scripted stream.
    pub fn script_close(&self, reason: Option<String>) {
        {
            let sender = self.sender.lock();
            sender
                .as_ref()
                .expect("transport already closed")
                .try_send(TransportEvent::Closed(reason))
                .expect("script buffer full");
        }
        self.close_after_script();
    }

    /// Ends the scripted stream without a close event (channel simply
    /// yields `None` after the queued events).
    pub fn close_after_script(&self) {
        self.sender.lock().take();
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ConnectionError> {
        self.receiver
            .lock()
            .take()
            .ok_or(ConnectionError::AlreadyConnected)
    }

    async fn send(&self, text: &str, _channel: &Channel) -> Result<(), SendError> {
        self.sent.lock().push(text.to_string());
        self.send_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.sender.lock().take();
    }
}

/// Stub API client resolving a fixed identity.
pub struct MockApi {
    user: Option<BotUser>,
    token: Option<String>,
}

impl MockApi {
    /// Resolves the given username once a token is installed.
    pub fn with_user(username: &str) -> Self {
        Self {
            user: Some(BotUser::new("U0", username)),
            token: None,
        }
    }

    /// Rejects every authentication attempt.
    pub fn rejecting() -> Self {
        Self {
            user: None,
            token: None,
        }
    }
}

#[async_trait]
impl ApiClient for MockApi {
    fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    async fn authed_user(&self) -> Result<BotUser, AuthError> {
        if self.token.is_none() {
            return Err(AuthError::Request("no token installed".to_string()));
        }
        self.user
            .clone()
            .ok_or_else(|| AuthError::rejected("invalid_auth"))
    }
}

/// Arc-wrapped failing transport for send-error tests.
pub struct FailingSendTransport(pub Arc<MockTransport>);

#[async_trait]
impl Transport for FailingSendTransport {
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ConnectionError> {
        self.0.connect().await
    }

    async fn send(&self, _text: &str, _channel: &Channel) -> Result<(), SendError> {
        Err(SendError::Transport("wire down".to_string()))
    }

    async fn disconnect(&self) {
        self.0.disconnect().await;
    }
}
