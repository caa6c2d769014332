//! Bot identity.

use serde::{Deserialize, Serialize};

/// Identity of the running bot, resolved once at authentication time.
///
/// The username backs mention matching, so the runtime refuses to start
/// listening before this is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotUser {
    /// Service-assigned user id.
    pub id: String,
    /// Display username, as other users type it in a mention.
    pub username: String,
}

impl BotUser {
    /// Creates a new bot identity.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

impl std::fmt::Display for BotUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.username, self.id)
    }
}
