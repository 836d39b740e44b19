//! Password and reset-token value objects.
//!
//! Both wrap `secrecy::SecretString` so they print as `[REDACTED]` in debug
//! output and never end up in logs by accident.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::ValidationError;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// A new password whose confirmation field matched.
#[derive(Debug)]
pub struct ConfirmedPassword(SecretString);

impl ConfirmedPassword {
    /// Checks that the new password is present and equals its confirmation.
    ///
    /// Strength rules belong to the identity store and are not checked here.
    pub fn new(password: &SecretString, confirmation: &SecretString) -> Result<Self, ValidationError> {
        let password = password.expose_secret();
        if password.is_empty() {
            return Err(ValidationError::empty_field("new_password"));
        }
        if password != confirmation.expose_secret() {
            return Err(ValidationError::mismatch(
                "confirm_password",
                PASSWORDS_DO_NOT_MATCH,
            ));
        }
        Ok(Self(SecretString::new(password.to_string())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Opaque single-use password reset token issued by the identity store.
#[derive(Debug)]
pub struct ResetToken(SecretString);

impl ResetToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
