//! GetCurrentUserHandler - Query handler for the caller's own account.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::account::UserAccount;
use crate::domain::foundation::{DomainError, Failure, RequestContext, TypedOutcome, UserId};
use crate::ports::IdentityProvider;

/// Account summary returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserView {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
    pub email_confirmed: bool,
    pub roles: Vec<String>,
}

impl CurrentUserView {
    fn new(account: UserAccount, roles: Vec<String>) -> Self {
        Self {
            display_name: account.display_name(),
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            email_confirmed: account.email_confirmed,
            roles,
        }
    }
}

pub struct GetCurrentUserHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl GetCurrentUserHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %ctx.correlation_id()))]
    pub async fn handle(&self, ctx: &RequestContext) -> TypedOutcome<CurrentUserView> {
        let Some(user_id) = ctx.caller.user_id else {
            return TypedOutcome::unauthorized();
        };

        match self.execute(user_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "current user lookup failed");
                TypedOutcome::from_domain_error(err)
            }
        }
    }

    async fn execute(&self, user_id: UserId) -> Result<TypedOutcome<CurrentUserView>, DomainError> {
        let Some(account) = self.identity.find_by_id(&user_id).await? else {
            return Ok(TypedOutcome::failure("User not found"));
        };
        let roles = self.identity.roles(&account).await?;

        Ok(TypedOutcome::success(CurrentUserView::new(account, roles)))
    }
}
