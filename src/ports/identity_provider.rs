//! Identity provider port.
//!
//! The identity store owns user accounts, password hashes, roles and
//! password reset tickets. The marketplace core only asks it questions and
//! relays its answers.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `Ok(None)` from the `find_*` lookups for unknown users
//! - Return `IdentityError::Rejected` with user-facing messages when a
//!   request is refused (weak password, bad token, wrong current password)
//! - Return `IdentityError::Unavailable` for transient failures
//! - Treat reset tokens as single use and time bounded

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::account::{ResetToken, UserAccount};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors reported by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The request was refused; messages are safe to show to the user.
    #[error("identity request rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// The identity store could not be reached.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

impl IdentityError {
    pub fn rejected(message: impl Into<String>) -> Self {
        IdentityError::Rejected(vec![message.into()])
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        IdentityError::Unavailable(message.into())
    }
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        DomainError::new(ErrorCode::IdentityError, err.to_string())
    }
}

/// Account, credential and reset-ticket operations of the identity store.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, IdentityError>;

    /// Look up a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserAccount>, IdentityError>;

    /// Check a password against the stored credential.
    async fn verify_password(
        &self,
        user: &UserAccount,
        password: &str,
    ) -> Result<bool, IdentityError>;

    /// Replace the password, re-checking `current` on the store side.
    async fn change_password(
        &self,
        user: &UserAccount,
        current: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;

    /// Issue a single-use, time-bounded reset token.
    async fn issue_reset_token(&self, user: &UserAccount) -> Result<ResetToken, IdentityError>;

    /// Consume a reset token and set the new password.
    async fn reset_password(
        &self,
        user: &UserAccount,
        token: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;

    /// Role names assigned to the user.
    async fn roles(&self, user: &UserAccount) -> Result<Vec<String>, IdentityError>;
}
