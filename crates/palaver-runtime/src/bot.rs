//! Connection supervisor.
//!
//! [`Bot`] owns the lifecycle state machine: it loads plugins,
//! authenticates against the control API, opens the transport connection,
//! and runs the receive loop that translates inbound transport events into
//! bus events. It also carries the restart-via-replacement control flow.
//!
//! # Concurrency
//!
//! One logical control task. The receive loop consumes one inbound event
//! at a time and runs classification plus bus emission to completion
//! before the next receive, so dispatch ordering is total and FIFO with
//! respect to the transport's delivery order. A multi-threaded transport
//! marshals onto this task simply by sending into the channel returned by
//! its `connect`.

use std::ffi::OsString;
use std::sync::Arc;

use tracing::{debug, info};

use palaver_core::api::ApiClient;
use palaver_core::bus::{EventPayload, topics};
use palaver_core::error::SendError;
use palaver_core::mention::MentionMatcher;
use palaver_core::message::{Channel, Message};
use palaver_core::transport::{InboundMessage, Transport, TransportEvent};
use palaver_core::user::BotUser;

use crate::config::{ConfigError, Settings};
use crate::context::BotContext;
use crate::error::{RuntimeError, RuntimeResult};
use crate::process;
use crate::registry::PluginRegistry;
use crate::state::RuntimeState;

/// How the receive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Plain quit: the process may exit.
    Quit,
    /// A restart was requested: the process image is to be replaced.
    Restart,
}

/// The bot runtime: connection supervisor plus process supervisor.
///
/// # Example
///
/// ```rust,ignore
/// let settings = Settings::load()?;
/// let mut registry = PluginRegistry::new();
/// registry.register("echo", echo_plugin);
///
/// let mut bot = Bot::new(settings, api, transport, registry)?;
/// bot.run().await?;
/// ```
pub struct Bot {
    ctx: BotContext,
    api: Box<dyn ApiClient>,
    registry: PluginRegistry,
    user: Option<BotUser>,
    matcher: Option<MentionMatcher>,
    argv: Vec<OsString>,
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("user", &self.user)
            .field("argv", &self.argv)
            .finish_non_exhaustive()
    }
}

impl Bot {
    /// Creates a bot from loaded settings and its collaborators.
    ///
    /// Installs the configured token on the API client. Fails with a
    /// [`ConfigError`] when the token is absent; that is fatal, the same
    /// as any other configuration failure.
    pub fn new(
        settings: Settings,
        mut api: Box<dyn ApiClient>,
        transport: Arc<dyn Transport>,
        registry: PluginRegistry,
    ) -> RuntimeResult<Self> {
        let token = settings.typed().slack.token.clone();
        if token.is_empty() {
            return Err(ConfigError::MissingKey("slack.token".to_string()).into());
        }
        api.set_token(token);

        let ctx = BotContext::new(settings, transport);
        ctx.set_state(RuntimeState::Configured);

        Ok(Self {
            ctx,
            api,
            registry,
            user: None,
            matcher: None,
            argv: process::current_argv(),
        })
    }

    /// Overrides the captured argument vector used for restart.
    pub fn with_argv(mut self, argv: Vec<OsString>) -> Self {
        self.argv = argv;
        self
    }

    /// Returns a cloneable handle to the runtime.
    pub fn context(&self) -> BotContext {
        self.ctx.clone()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RuntimeState {
        self.ctx.state()
    }

    /// Returns the resolved bot identity, once authenticated.
    pub fn user(&self) -> Option<&BotUser> {
        self.user.as_ref()
    }

    /// Sends a text message to a channel.
    pub async fn say(&self, text: &str, channel: &Channel) -> Result<(), SendError> {
        self.ctx.say(text, channel).await
    }

    /// Loads every configured plugin. Individual failures are logged and
    /// non-fatal; returns the number of plugins that loaded.
    pub async fn load_plugins(&mut self) -> usize {
        let entries = self.ctx.settings().typed().plugins.clone();
        let loaded = self.registry.load_all(&entries, self.ctx.clone()).await;
        info!(loaded, configured = entries.len(), "Plugins loaded");
        self.ctx.set_state(RuntimeState::PluginsLoaded);
        loaded
    }

    /// Exchanges the configured token for the bot identity and builds the
    /// mention matcher from it.
    ///
    /// Fatal on rejection: mention matching must never run against an
    /// unresolved identity.
    pub async fn authenticate(&mut self) -> RuntimeResult<()> {
        let user = self.api.authed_user().await?;
        info!(user = %user, "Bot user resolved");

        self.matcher = Some(MentionMatcher::for_user(&user)?);
        self.user = Some(user);
        self.ctx.set_state(RuntimeState::Authenticated);
        Ok(())
    }

    /// Connects the transport and runs the receive loop until quit,
    /// restart, or transport closure.
    ///
    /// This is the steady state; it returns how the loop ended so the
    /// caller can decide between exiting and replacing the process.
    pub async fn serve(&mut self) -> RuntimeResult<Shutdown> {
        let matcher = self.matcher.clone().ok_or(RuntimeError::NotAuthenticated)?;

        let mut inbound = self.ctx.transport().connect().await?;
        self.ctx.set_state(RuntimeState::Connected);
        info!("Connected to messaging service");

        self.ctx.set_state(RuntimeState::Listening);
        let shutdown = self.ctx.shutdown_token();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = inbound.recv() => match event {
                    Some(TransportEvent::Message(raw)) => self.dispatch(raw, &matcher).await,
                    Some(TransportEvent::Closed(reason)) => {
                        info!(?reason, "Transport closed the connection");
                        break;
                    }
                    None => break,
                },
            }
        }

        // Covers transport-initiated closure; a no-op when quit already ran.
        self.ctx.quit().await;

        if self.ctx.restart_requested() {
            Ok(Shutdown::Restart)
        } else {
            Ok(Shutdown::Quit)
        }
    }

    /// Translates one inbound transport message into bus events.
    ///
    /// `message` is emitted exactly once per inbound message, always before
    /// any `mention` for the same message.
    async fn dispatch(&self, raw: InboundMessage, matcher: &MentionMatcher) {
        let message = Arc::new(Message::from_inbound(raw));
        info!(text = %message.text(), channel = %message.channel(), "Noticed message");

        let payload = EventPayload::Message(Arc::clone(&message));
        self.ctx.bus().emit(topics::MESSAGE, payload.clone()).await;

        if matcher.is_match(message.text()) {
            debug!(text = %message.text(), "Mentioned in message");
            self.ctx.bus().emit(topics::MENTION, payload).await;
        }
    }

    /// Runs the full lifecycle: load plugins, authenticate, serve, then
    /// tear down. Plugin unload hooks run even when startup aborts.
    ///
    /// On a restart request the process image is replaced with the argv
    /// captured at construction; if replacement fails there is no fallback
    /// (the transport already disconnected) and the error is fatal.
    pub async fn run(&mut self) -> RuntimeResult<()> {
        self.spawn_signal_handler();

        self.load_plugins().await;

        let result = async {
            self.authenticate().await?;
            self.serve().await
        }
        .await;

        self.registry.unload_all().await;
        let shutdown = result?;

        match shutdown {
            Shutdown::Quit => {
                self.ctx.set_state(RuntimeState::Terminated);
                info!("Bot terminated");
                Ok(())
            }
            Shutdown::Restart => {
                self.ctx.set_state(RuntimeState::Restarting);
                info!("Restarting now");
                process::replace_process(&self.argv).map_err(RuntimeError::Restart)
            }
        }
    }

    /// Routes Ctrl+C (and SIGTERM on Unix) into the quit path.
    fn spawn_signal_handler(&self) {
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("Received shutdown signal");
            ctx.quit().await;
        });
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal;

    let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate());
    match sigterm {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(_) => {
            let _ = signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
