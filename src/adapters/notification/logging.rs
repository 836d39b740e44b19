//! Notifier that writes reset events to the log instead of sending mail.
//!
//! Suitable for local development. The link itself is never logged since it
//! carries a live token; only the recipient, sender and reset host are.

use async_trait::async_trait;
use url::Url;

use crate::config::EmailConfig;
use crate::domain::foundation::DomainError;
use crate::ports::PasswordResetNotifier;

/// Logs each password reset email through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingNotifier {
    from: String,
}

impl LoggingNotifier {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            from: config.from_header(),
        }
    }
}

#[async_trait]
impl PasswordResetNotifier for LoggingNotifier {
    async fn send_password_reset_email(&self, email: &str, reset_link: &str) -> Result<(), DomainError> {
        let host = Url::parse(reset_link)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        tracing::info!(
            to = %email,
            from = %self.from,
            reset_host = %host,
            "password reset email queued"
        );
        Ok(())
    }
}
