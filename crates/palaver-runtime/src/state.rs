//! Runtime lifecycle states.

/// Lifecycle phase of the bot runtime.
///
/// Transitions are driven by the connection supervisor and always move
/// forward:
///
/// ```text
/// Created → Configured → PluginsLoaded → Authenticated
///         → Connected → Listening → Disconnecting → Terminated
///                                                 ↘ Restarting
/// ```
///
/// `Restarting` is the terminal variant reached when the disconnect was
/// triggered by a restart request; it is followed by process replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    /// Runtime object exists; nothing loaded yet.
    Created,
    /// Configuration loaded successfully.
    Configured,
    /// Configured plugins attempted to load (individual failures are
    /// non-fatal).
    PluginsLoaded,
    /// Bot identity resolved; mention matching is possible.
    Authenticated,
    /// Transport connection established.
    Connected,
    /// Steady state: consuming inbound events.
    Listening,
    /// Disconnect in progress.
    Disconnecting,
    /// Runtime finished; the process may exit.
    Terminated,
    /// Runtime finished and the process image is being replaced.
    Restarting,
}

impl RuntimeState {
    /// Returns true for states after which no further events are processed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated | Self::Restarting)
    }
}

impl std::fmt::Display for RuntimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Configured => "configured",
            Self::PluginsLoaded => "plugins-loaded",
            Self::Authenticated => "authenticated",
            Self::Connected => "connected",
            Self::Listening => "listening",
            Self::Disconnecting => "disconnecting",
            Self::Terminated => "terminated",
            Self::Restarting => "restarting",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_final_states_are_terminal() {
        assert!(RuntimeState::Terminated.is_terminal());
        assert!(RuntimeState::Restarting.is_terminal());
        assert!(!RuntimeState::Created.is_terminal());
        assert!(!RuntimeState::Listening.is_terminal());
        assert!(!RuntimeState::Disconnecting.is_terminal());
    }
}
