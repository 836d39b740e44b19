//! Account and credential-reset configuration

use serde::Deserialize;
use url::Url;

use super::error::ValidationError;
use super::server::Environment;

/// Settings for password changes and the reset-link flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Frontend page that receives `email` and `token` query parameters.
    #[serde(default = "default_password_reset_url")]
    pub password_reset_url: String,

    /// Lifetime of a reset token in minutes
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl_minutes: i64,

    /// Minimum password length enforced by the identity store
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Parsed reset page URL.
    pub fn reset_url(&self) -> Result<Url, ValidationError> {
        Url::parse(&self.password_reset_url).map_err(|_| ValidationError::InvalidResetUrl)
    }

    /// Validate credential configuration
    ///
    /// In production the reset page must be served over HTTPS since the
    /// link carries a live token.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let url = self.reset_url()?;
        if *environment == Environment::Production && url.scheme() != "https" {
            return Err(ValidationError::ResetUrlMustBeHttps);
        }
        if self.reset_token_ttl_minutes <= 0 || self.reset_token_ttl_minutes > 24 * 60 {
            return Err(ValidationError::InvalidResetTokenTtl);
        }
        if self.min_password_length < 6 {
            return Err(ValidationError::PasswordPolicyTooWeak);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_reset_url: default_password_reset_url(),
            reset_token_ttl_minutes: default_reset_token_ttl(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_password_reset_url() -> String {
    "http://localhost:3000/reset-password".to_string()
}

fn default_reset_token_ttl() -> i64 {
    60
}

fn default_min_password_length() -> usize {
    8
}
