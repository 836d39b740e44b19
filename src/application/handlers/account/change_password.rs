//! ChangePasswordHandler - Authenticated password change.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::account::ConfirmedPassword;
use crate::domain::foundation::{
    DomainError, Failure, Outcome, RequestContext, UserId, VALIDATION_FAILED_MESSAGE,
};
use crate::ports::{IdentityError, IdentityProvider, TokenStore};

pub const INVALID_PASSWORD: &str = "Invalid password";
pub const CURRENT_PASSWORD_INCORRECT: &str = "Current password is incorrect";
pub const PASSWORD_CHANGE_FAILED: &str = "Password change failed";

/// Command to change the caller's password.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordCommand {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Handler for password changes. Revokes every session of the caller on
/// success, including the one making the request.
pub struct ChangePasswordHandler {
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<dyn TokenStore>,
}

impl ChangePasswordHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { identity, tokens }
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %ctx.correlation_id()))]
    pub async fn handle(&self, cmd: ChangePasswordCommand, ctx: &RequestContext) -> Outcome {
        let Some(user_id) = ctx.caller.user_id else {
            tracing::warn!("unauthenticated password change attempt");
            return Outcome::unauthorized();
        };

        let password = match ConfirmedPassword::new(&cmd.new_password, &cmd.confirm_password) {
            Ok(password) => password,
            Err(err) => return Outcome::failure_detail(VALIDATION_FAILED_MESSAGE, err.to_string()),
        };

        match self.execute(&cmd, &password, user_id, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "password change failed");
                Outcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &ChangePasswordCommand,
        password: &ConfirmedPassword,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> Result<Outcome, DomainError> {
        let Some(user) = self.identity.find_by_id(&user_id).await? else {
            tracing::warn!(user_id = %user_id, "authenticated caller has no account");
            return Ok(Outcome::unauthorized());
        };

        let current = cmd.current_password.expose_secret();
        if !self.identity.verify_password(&user, current).await? {
            tracing::warn!(user_id = %user_id, "current password did not verify");
            return Ok(Outcome::failure_detail(INVALID_PASSWORD, CURRENT_PASSWORD_INCORRECT));
        }

        ctx.cancellation().check()?;

        match self
            .identity
            .change_password(&user, current, password.expose())
            .await
        {
            Ok(()) => {}
            Err(IdentityError::Rejected(errors)) => {
                return Ok(Outcome::failure_with(PASSWORD_CHANGE_FAILED, errors));
            }
            Err(err) => return Err(err.into()),
        }

        let revoked = self.tokens.revoke_all(&user_id).await?;

        tracing::info!(user_id = %user_id, revoked, "password changed");
        Ok(Outcome::success().with_message("Password changed successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryIdentityProvider, InMemoryTokenStore};
    use crate::application::handlers::test_support::signed_in;
    use crate::config::AuthConfig;
    use crate::domain::account::{UserAccount, PASSWORDS_DO_NOT_MATCH};
    use crate::domain::foundation::{CancellationSignal, CANCELLED_MESSAGE};

    async fn setup() -> (ChangePasswordHandler, Arc<InMemoryIdentityProvider>, InMemoryTokenStore, UserAccount) {
        let identity = Arc::new(InMemoryIdentityProvider::new(&AuthConfig::default()));
        let user = UserAccount::new(UserId::new(), "ada@example.com");
        identity.register(user.clone(), "old-password", &[]).await;
        let tokens = InMemoryTokenStore::new();
        let handler = ChangePasswordHandler::new(identity.clone(), Arc::new(tokens.clone()));
        (handler, identity, tokens, user)
    }

    fn command(current: &str, new: &str, confirm: &str) -> ChangePasswordCommand {
        ChangePasswordCommand {
            current_password: SecretString::new(current.to_string()),
            new_password: SecretString::new(new.to_string()),
            confirm_password: SecretString::new(confirm.to_string()),
        }
    }

    #[tokio::test]
    async fn changes_password_and_revokes_sessions() {
        let (handler, identity, tokens, user) = setup().await;
        let session = tokens.issue(user.id).await;

        let outcome = handler
            .handle(command("old-password", "brand-new-pass", "brand-new-pass"), &signed_in(user.id))
            .await;

        assert_eq!(outcome.message(), Some("Password changed successfully"));
        assert!(identity.verify_password(&user, "brand-new-pass").await.unwrap());
        assert!(!tokens.is_active(&session).await);
    }

    #[tokio::test]
    async fn wrong_current_password_is_rejected() {
        let (handler, identity, tokens, user) = setup().await;
        let session = tokens.issue(user.id).await;

        let outcome = handler
            .handle(command("guess", "brand-new-pass", "brand-new-pass"), &signed_in(user.id))
            .await;

        assert_eq!(outcome, Outcome::failure_detail(INVALID_PASSWORD, CURRENT_PASSWORD_INCORRECT));
        assert!(identity.verify_password(&user, "old-password").await.unwrap());
        assert!(tokens.is_active(&session).await);
    }

    #[tokio::test]
    async fn confirmation_mismatch_is_validation_failure() {
        let (handler, _, _, user) = setup().await;

        let outcome = handler
            .handle(command("old-password", "brand-new-pass", "other-pass"), &signed_in(user.id))
            .await;

        assert_eq!(
            outcome,
            Outcome::failure_detail(VALIDATION_FAILED_MESSAGE, PASSWORDS_DO_NOT_MATCH)
        );
    }

    #[tokio::test]
    async fn policy_rejection_is_passed_through() {
        let (handler, _, _, user) = setup().await;

        let outcome = handler
            .handle(command("old-password", "short", "short"), &signed_in(user.id))
            .await;

        assert_eq!(outcome.message(), Some(PASSWORD_CHANGE_FAILED));
        assert_eq!(outcome.errors().len(), 1);
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let (handler, _, _, _) = setup().await;

        let outcome = handler
            .handle(command("old-password", "brand-new-pass", "brand-new-pass"), &RequestContext::anonymous())
            .await;

        assert_eq!(outcome, Outcome::unauthorized());
    }

    #[tokio::test]
    async fn cancelled_request_keeps_old_password() {
        let (handler, identity, _, user) = setup().await;
        let (cancel, signal) = CancellationSignal::pair();
        cancel.cancel();

        let outcome = handler
            .handle(
                command("old-password", "brand-new-pass", "brand-new-pass"),
                &signed_in(user.id).with_cancellation(signal),
            )
            .await;

        assert_eq!(outcome.message(), Some(CANCELLED_MESSAGE));
        assert!(identity.verify_password(&user, "old-password").await.unwrap());
    }
}
