//! Runtime context handed to plugins and supervisors.
//!
//! There is no ambient global bot: every collaborator receives a
//! [`BotContext`] at construction and talks to the runtime through it.
//! Cloning is cheap (a single `Arc`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use palaver_core::bus::{EventBus, EventPayload};
use palaver_core::error::{BoxError, SendError};
use palaver_core::message::Channel;
use palaver_core::transport::Transport;

use crate::config::Settings;
use crate::state::RuntimeState;

struct ContextInner {
    settings: Settings,
    bus: EventBus,
    transport: Arc<dyn Transport>,
    state: RwLock<RuntimeState>,
    shutdown: CancellationToken,
    /// Single-shot guard: the transport's `disconnect` runs at most once.
    quit_started: AtomicBool,
    restart_requested: AtomicBool,
}

/// Shared handle to the running bot.
///
/// Exposes configuration lookup, event subscription, outbound sends, and
/// the quit/restart control surface. Logging is ambient through `tracing`.
#[derive(Clone)]
pub struct BotContext {
    inner: Arc<ContextInner>,
}

impl BotContext {
    pub(crate) fn new(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                settings,
                bus: EventBus::new(),
                transport,
                state: RwLock::new(RuntimeState::Created),
                shutdown: CancellationToken::new(),
                quit_started: AtomicBool::new(false),
                restart_requested: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Returns the runtime-wide event bus.
    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    /// Registers a handler on the event bus.
    ///
    /// Convenience forwarding to [`EventBus::on`].
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(EventPayload) -> futures::future::BoxFuture<'static, Result<(), BoxError>>
            + Send
            + Sync
            + 'static,
    {
        self.inner.bus.on(event, handler);
    }

    /// Sends a text message to a channel.
    ///
    /// The error is propagated to the caller; the runtime does not retry.
    pub async fn say(&self, text: &str, channel: &Channel) -> Result<(), SendError> {
        info!(channel = %channel, "Sending new message");
        self.inner.transport.send(text, channel).await
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RuntimeState {
        *self.inner.state.read()
    }

    pub(crate) fn set_state(&self, state: RuntimeState) {
        let mut current = self.inner.state.write();
        debug!(from = %current, to = %state, "Runtime state transition");
        *current = state;
    }

    /// Requests a graceful shutdown.
    ///
    /// Disconnects the transport and stops the receive loop. A second call
    /// before the process exits is a no-op: the transport's `disconnect`
    /// runs exactly once.
    pub async fn quit(&self) {
        if self.inner.quit_started.swap(true, Ordering::SeqCst) {
            debug!("Quit already in progress");
            return;
        }
        info!("Quitting now");
        self.set_state(RuntimeState::Disconnecting);
        self.inner.transport.disconnect().await;
        self.inner.shutdown.cancel();
    }

    /// Requests a full restart: graceful shutdown followed by replacement
    /// of the process image with the original argument vector.
    pub async fn restart(&self) {
        self.inner.restart_requested.store(true, Ordering::SeqCst);
        info!("Restart requested");
        self.quit().await;
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.inner.shutdown.clone()
    }

    pub(crate) fn restart_requested(&self) -> bool {
        self.inner.restart_requested.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("state", &self.state())
            .finish()
    }
}
