//! ResetPasswordHandler - Consumes a reset token and sets a new password.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::account::ConfirmedPassword;
use crate::domain::foundation::{
    DomainError, Failure, Outcome, RequestContext, VALIDATION_FAILED_MESSAGE,
};
use crate::ports::{IdentityError, IdentityProvider, TokenStore};

pub const INVALID_REQUEST: &str = "Invalid request";
pub const INVALID_EMAIL_OR_TOKEN: &str = "Invalid email or token";
pub const PASSWORD_RESET_FAILED: &str = "Password reset failed";

/// Command to complete a password reset.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordCommand {
    pub email: String,
    pub token: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Handler for the second step of the reset flow.
///
/// On success every session and refresh token of the user is revoked. If
/// that revocation fails the operation reports failure.
pub struct ResetPasswordHandler {
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<dyn TokenStore>,
}

impl ResetPasswordHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { identity, tokens }
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %ctx.correlation_id()))]
    pub async fn handle(&self, cmd: ResetPasswordCommand, ctx: &RequestContext) -> Outcome {
        let password = match ConfirmedPassword::new(&cmd.new_password, &cmd.confirm_password) {
            Ok(password) => password,
            Err(err) => return Outcome::failure_detail(VALIDATION_FAILED_MESSAGE, err.to_string()),
        };

        match self.execute(&cmd, &password, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "password reset failed");
                Outcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &ResetPasswordCommand,
        password: &ConfirmedPassword,
        ctx: &RequestContext,
    ) -> Result<Outcome, DomainError> {
        let Some(user) = self.identity.find_by_email(cmd.email.trim()).await? else {
            tracing::warn!("reset attempted for unknown email");
            return Ok(Outcome::failure_detail(INVALID_REQUEST, INVALID_EMAIL_OR_TOKEN));
        };

        ctx.cancellation().check()?;

        match self
            .identity
            .reset_password(&user, cmd.token.expose_secret(), password.expose())
            .await
        {
            Ok(()) => {}
            Err(IdentityError::Rejected(errors)) => {
                tracing::warn!(user_id = %user.id, "identity store rejected password reset");
                return Ok(Outcome::failure_with(PASSWORD_RESET_FAILED, errors));
            }
            Err(err) => return Err(err.into()),
        }

        let revoked = self.tokens.revoke_all(&user.id).await?;

        tracing::info!(user_id = %user.id, revoked, "password reset completed");
        Ok(Outcome::success().with_message("Password has been reset successfully"))
    }
}
