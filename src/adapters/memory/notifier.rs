//! Recording notifier for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordResetNotifier;

/// A reset email captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentResetEmail {
    pub email: String,
    pub reset_link: String,
}

/// Keeps every reset email in memory instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentResetEmail>>>,
    delivered: Arc<Notify>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails after recording the attempt.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentResetEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Wait until at least `count` sends were attempted, for deliveries made
    /// from a spawned task. Gives up after five seconds and returns what was
    /// recorded so far.
    pub async fn wait_for_sent(&self, count: usize) -> Vec<SentResetEmail> {
        let wait = async {
            loop {
                let notified = self.delivered.notified();
                let sent = self.sent();
                if sent.len() >= count {
                    return;
                }
                notified.await;
            }
        };
        let _ = tokio::time::timeout(Duration::from_secs(5), wait).await;
        self.sent()
    }

    pub fn last_link_for(&self, email: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|s| s.email == email)
            .map(|s| s.reset_link)
    }
}

#[async_trait]
impl PasswordResetNotifier for RecordingNotifier {
    async fn send_password_reset_email(&self, email: &str, reset_link: &str) -> Result<(), DomainError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentResetEmail {
                email: email.to_string(),
                reset_link: reset_link.to_string(),
            });
        }
        self.delivered.notify_waiters();
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "Simulated delivery failure",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sent_links() {
        let notifier = RecordingNotifier::new();

        notifier
            .send_password_reset_email("ada@example.com", "https://shop/reset?token=1")
            .await
            .unwrap();

        assert_eq!(
            notifier.last_link_for("ada@example.com").as_deref(),
            Some("https://shop/reset?token=1")
        );
    }

    #[tokio::test]
    async fn wait_for_sent_sees_deliveries_from_spawned_tasks() {
        let notifier = RecordingNotifier::new();
        let sender = notifier.clone();

        tokio::spawn(async move {
            sender
                .send_password_reset_email("ada@example.com", "https://shop/reset?token=2")
                .await
        });

        let sent = notifier.wait_for_sent(1).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn failing_notifier_still_records_attempt() {
        let notifier = RecordingNotifier::failing();

        let result = notifier.send_password_reset_email("ada@example.com", "link").await;

        assert!(result.is_err());
        assert_eq!(notifier.sent().len(), 1);
    }
}
