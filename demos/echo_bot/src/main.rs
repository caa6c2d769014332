//! Echo Bot Demo
//!
//! Wires the full runtime against in-process collaborators: a scripted
//! transport that plays back a short conversation, a stub API client that
//! resolves a fixed identity, and an echo plugin that answers mentions.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package echo-bot
//! ```
//!
//! The bot loads the `echo` plugin, authenticates as `palaver`, consumes
//! the scripted messages (replying to the one that mentions it), and shuts
//! down when the script asks it to quit.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::info;

use palaver::prelude::*;
use palaver::{AuthError, ConnectionError, InboundMessage, SendError};

// ============================================================================
// Scripted Collaborators
// ============================================================================

/// Transport that replays a canned conversation instead of holding a real
/// connection.
struct ScriptedTransport {
    receiver: Mutex<Option<mpsc::Receiver<TransportEvent>>>,
    sender: Mutex<Option<mpsc::Sender<TransportEvent>>>,
}

impl ScriptedTransport {
    fn with_script(lines: &[&str]) -> Self {
        let (tx, rx) = mpsc::channel(16);
        for (i, line) in lines.iter().enumerate() {
            let event = TransportEvent::Message(InboundMessage {
                text: (*line).to_string(),
                sender: "U42".to_string(),
                channel: Channel::new("C1", "general"),
                ts: format!("1727000000.{i:06}"),
            });
            let _ = tx.try_send(event);
        }
        Self {
            receiver: Mutex::new(Some(rx)),
            sender: Mutex::new(Some(tx)),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn connect(&self) -> Result<mpsc::Receiver<TransportEvent>, ConnectionError> {
        self.receiver
            .lock()
            .take()
            .ok_or(ConnectionError::AlreadyConnected)
    }

    async fn send(&self, text: &str, channel: &Channel) -> Result<(), SendError> {
        info!(%channel, %text, "(scripted wire) outbound message");
        Ok(())
    }

    async fn disconnect(&self) {
        self.sender.lock().take();
    }
}

/// API client that resolves a fixed bot identity.
struct StubApi {
    token: Option<String>,
}

#[async_trait]
impl ApiClient for StubApi {
    fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    async fn authed_user(&self) -> Result<BotUser, AuthError> {
        match self.token {
            Some(_) => Ok(BotUser::new("U0", "palaver")),
            None => Err(AuthError::Request("no token installed".to_string())),
        }
    }
}

// ============================================================================
// Echo Plugin
// ============================================================================

/// Replies to every mention with the text it was mentioned in, and quits
/// when told to.
struct EchoPlugin {
    prefix: String,
}

impl EchoPlugin {
    fn from_options(options: &serde_json::Value) -> Result<Box<dyn Plugin>, PluginError> {
        let prefix = options
            .get("prefix")
            .and_then(|v| v.as_str())
            .unwrap_or("you said: ")
            .to_string();
        Ok(Box::new(Self { prefix }))
    }
}

#[async_trait]
impl Plugin for EchoPlugin {
    fn name(&self) -> &str {
        "echo"
    }

    async fn load(&mut self, ctx: BotContext) -> Result<(), PluginError> {
        let prefix = self.prefix.clone();
        let echo_ctx = ctx.clone();
        ctx.on(topics::MENTION, move |payload| {
            let ctx = echo_ctx.clone();
            let prefix = prefix.clone();
            Box::pin(async move {
                if let Some(msg) = payload.as_message() {
                    if msg.text().contains("quit") {
                        ctx.say("goodbye!", msg.channel()).await?;
                        ctx.quit().await;
                    } else {
                        let reply = format!("{prefix}{}", msg.text());
                        ctx.say(&reply, msg.channel()).await?;
                    }
                }
                Ok(())
            })
        });
        Ok(())
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_json_str(
        r#"{
            "logging": {"level": "debug"},
            "slack": {"token": "demo-token"},
            "plugins": {"echo": {"prefix": "echo: "}}
        }"#,
    )?;
    palaver::logging::init_from_settings(settings.typed());

    let transport = Arc::new(ScriptedTransport::with_script(&[
        "morning everyone",
        "hey palaver, how are you?",
        "palaver quit",
    ]));
    let api = Box::new(StubApi { token: None });

    let mut registry = PluginRegistry::new();
    registry.register("echo", EchoPlugin::from_options);

    let mut bot = Bot::new(settings, api, transport, registry)?;
    bot.run().await?;
    Ok(())
}
