//! Control API collaborator contract.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::user::BotUser;

/// Contract for the authenticated request/response API of the messaging
/// service.
///
/// The runtime uses exactly two operations at startup: installing the
/// configured credential and resolving the bot's own identity. Everything
/// else a concrete client offers (user lookup, channel listing, ...) is
/// outside the runtime's interest.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Installs the credential used for subsequent calls.
    fn set_token(&mut self, token: String);

    /// Resolves the identity of the authenticated bot user.
    ///
    /// Fails with [`AuthError`] when the service rejects the credential;
    /// the runtime treats that as fatal since mention matching depends on
    /// the resolved identity.
    async fn authed_user(&self) -> Result<BotUser, AuthError>;
}
