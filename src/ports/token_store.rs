//! Session/refresh token store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Holds issued session and refresh tokens.
///
/// The core never reads token contents; it only revokes them in bulk after
/// a credential change.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Revoke every outstanding token for the user.
    ///
    /// Returns how many tokens were revoked. Revoking for a user with no
    /// tokens is not an error.
    async fn revoke_all(&self, user_id: &UserId) -> Result<usize, DomainError>;
}
