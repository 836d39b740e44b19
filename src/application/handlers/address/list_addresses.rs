//! ListAddressesHandler - Query handler for the caller's saved addresses.

use std::sync::Arc;

use crate::domain::address::{sort_for_listing, Address};
use crate::domain::foundation::{DomainError, Failure, RequestContext, TypedOutcome, UserId};
use crate::ports::Persistence;

/// Handler for listing addresses. Default address first, then oldest first.
pub struct ListAddressesHandler {
    persistence: Arc<dyn Persistence>,
}

impl ListAddressesHandler {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %ctx.correlation_id()))]
    pub async fn handle(&self, ctx: &RequestContext) -> TypedOutcome<Vec<Address>> {
        let Some(user_id) = ctx.caller.user_id else {
            tracing::warn!("unauthenticated address listing");
            return TypedOutcome::unauthorized();
        };

        match self.execute(user_id).await {
            Ok(addresses) => TypedOutcome::success(addresses),
            Err(err) => {
                tracing::error!(error = %err, "address listing failed");
                TypedOutcome::from_domain_error(err)
            }
        }
    }

    async fn execute(&self, user_id: UserId) -> Result<Vec<Address>, DomainError> {
        let mut tx = self.persistence.begin().await?;
        let mut addresses = tx.list_user_addresses(&user_id).await?;
        sort_for_listing(&mut addresses);

        tracing::debug!(user_id = %user_id, count = addresses.len(), "addresses listed");
        Ok(addresses)
    }
}
