//! DeleteAddressHandler - Hard-deletes one of the caller's addresses.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::{
    AddressId, DomainError, Failure, RequestContext, TypedOutcome, UserId,
};
use crate::ports::Persistence;

pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Command to delete an address.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAddressCommand {
    pub address_id: AddressId,
}

/// Handler for address deletion.
pub struct DeleteAddressHandler {
    persistence: Arc<dyn Persistence>,
}

impl DeleteAddressHandler {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    #[tracing::instrument(
        skip_all,
        fields(address_id = %cmd.address_id, correlation_id = %ctx.correlation_id())
    )]
    pub async fn handle(&self, cmd: DeleteAddressCommand, ctx: &RequestContext) -> TypedOutcome<bool> {
        let Some(user_id) = ctx.caller.user_id else {
            tracing::warn!("unauthenticated address deletion attempt");
            return TypedOutcome::unauthorized();
        };

        match self.execute(&cmd, user_id, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "address deletion failed");
                TypedOutcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &DeleteAddressCommand,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> Result<TypedOutcome<bool>, DomainError> {
        let mut tx = self.persistence.begin().await?;

        if tx.find_user_address(&cmd.address_id, &user_id).await?.is_none() {
            tracing::warn!(user_id = %user_id, "address not found for caller");
            return Ok(TypedOutcome::failure_detail(
                ADDRESS_NOT_FOUND,
                "Address does not exist or you don't have permission to delete it",
            ));
        }

        tx.remove_address(&cmd.address_id).await?;

        ctx.cancellation().check()?;
        tx.commit().await?;

        tracing::info!(user_id = %user_id, "address deleted");
        Ok(TypedOutcome::success(true).with_message("Address deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_address, signed_in, unreachable_persistence};
    use crate::domain::foundation::{CancellationSignal, CANCELLED_MESSAGE};

    fn handler(store: &InMemoryStore) -> DeleteAddressHandler {
        DeleteAddressHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn owner_removes_address() {
        let store = InMemoryStore::new();
        let owner = UserId::new();
        let address = seed_address(&store, owner, "Home", true, 0).await;

        let outcome = handler(&store)
            .handle(DeleteAddressCommand { address_id: *address.id() }, &signed_in(owner))
            .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.message(), Some("Address deleted successfully"));
        assert!(store.address(address.id()).await.is_none());
    }

    #[tokio::test]
    async fn foreign_and_missing_addresses_fail_identically() {
        let store = InMemoryStore::new();
        let owner = UserId::new();
        let intruder = UserId::new();
        let address = seed_address(&store, owner, "Home", false, 0).await;
        let handler = handler(&store);

        let foreign = handler
            .handle(DeleteAddressCommand { address_id: *address.id() }, &signed_in(intruder))
            .await;
        let missing = handler
            .handle(DeleteAddressCommand { address_id: AddressId::new() }, &signed_in(intruder))
            .await;

        assert_eq!(foreign, missing);
        assert_eq!(foreign.message(), Some(ADDRESS_NOT_FOUND));
        assert!(store.address(address.id()).await.is_some());
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let outcome = DeleteAddressHandler::new(unreachable_persistence())
            .handle(DeleteAddressCommand { address_id: AddressId::new() }, &RequestContext::anonymous())
            .await;

        assert_eq!(outcome, TypedOutcome::unauthorized());
    }

    #[tokio::test]
    async fn cancelled_request_keeps_address() {
        let store = InMemoryStore::new();
        let owner = UserId::new();
        let address = seed_address(&store, owner, "Home", false, 0).await;
        let (cancel, signal) = CancellationSignal::pair();
        cancel.cancel();

        let outcome = handler(&store)
            .handle(
                DeleteAddressCommand { address_id: *address.id() },
                &signed_in(owner).with_cancellation(signal),
            )
            .await;

        assert_eq!(outcome.message(), Some(CANCELLED_MESSAGE));
        assert!(store.address(address.id()).await.is_some());
    }
}
