//! Outbound notification port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Delivers password reset links out of band (email, SMS).
///
/// Fire-and-forget from the core's point of view: a delivery failure is
/// logged by the caller and never changes the operation's outcome.
#[async_trait]
pub trait PasswordResetNotifier: Send + Sync {
    /// Send the reset link to `email`.
    async fn send_password_reset_email(&self, email: &str, reset_link: &str) -> Result<(), DomainError>;
}
