//! RequestPasswordResetHandler - Starts the reset-link flow.
//!
//! The outcome is identical whether or not the email belongs to an account,
//! so the endpoint cannot be used to discover registered addresses. Ticket
//! issue and link delivery run on a spawned task, so the response for a known
//! email waits on nothing the unknown-email path skips.

use std::sync::Arc;

use serde::Deserialize;
use tracing::Instrument;
use url::Url;

use crate::domain::account::UserAccount;
use crate::domain::foundation::{Outcome, RequestContext};
use crate::ports::{IdentityProvider, PasswordResetNotifier};

pub const RESET_REQUESTED_MESSAGE: &str =
    "If the email exists, a password reset link has been sent.";

/// Command to request a password reset link.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestPasswordResetCommand {
    pub email: String,
}

/// Handler for reset-link requests. Always succeeds.
pub struct RequestPasswordResetHandler {
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn PasswordResetNotifier>,
    reset_url: Url,
}

impl RequestPasswordResetHandler {
    /// `reset_url` is the frontend page; `email` and `token` are appended as
    /// query parameters.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn PasswordResetNotifier>,
        reset_url: Url,
    ) -> Self {
        Self {
            identity,
            notifier,
            reset_url,
        }
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %ctx.correlation_id()))]
    pub async fn handle(&self, cmd: RequestPasswordResetCommand, ctx: &RequestContext) -> Outcome {
        let user = match self.identity.find_by_email(cmd.email.trim()).await {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(error = %err, "identity lookup failed during reset request");
                None
            }
        };

        match user {
            Some(user) => self.spawn_delivery(user),
            None => tracing::debug!("reset requested for unknown email"),
        }

        Outcome::success().with_message(RESET_REQUESTED_MESSAGE)
    }

    fn spawn_delivery(&self, user: UserAccount) {
        let delivery = ResetLinkDelivery {
            identity: self.identity.clone(),
            notifier: self.notifier.clone(),
            reset_url: self.reset_url.clone(),
        };
        tokio::spawn(async move { delivery.send(&user).await }.in_current_span());
    }
}

/// Detached half of the flow: issues the ticket and sends the link.
struct ResetLinkDelivery {
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn PasswordResetNotifier>,
    reset_url: Url,
}

impl ResetLinkDelivery {
    async fn send(self, user: &UserAccount) {
        let token = match self.identity.issue_reset_token(user).await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(user_id = %user.id, error = %err, "failed to issue reset token");
                return;
            }
        };

        let mut link = self.reset_url;
        link.query_pairs_mut()
            .append_pair("email", &user.email)
            .append_pair("token", token.expose());

        match self
            .notifier
            .send_password_reset_email(&user.email, link.as_str())
            .await
        {
            Ok(()) => tracing::info!(user_id = %user.id, "password reset link sent"),
            Err(err) => {
                tracing::error!(user_id = %user.id, error = %err, "failed to send reset email")
            }
        }
    }
}
