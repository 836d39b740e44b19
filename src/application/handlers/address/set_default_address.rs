//! SetDefaultAddressHandler - Moves the caller's default-address flag.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::{
    AddressId, DomainError, Failure, RequestContext, TypedOutcome, UserId,
};
use crate::ports::Persistence;

use super::ADDRESS_NOT_FOUND;

/// Command to make an address the caller's default.
#[derive(Debug, Clone, Deserialize)]
pub struct SetDefaultAddressCommand {
    pub address_id: AddressId,
}

/// Handler for the default-address flag.
///
/// The chosen address is flagged and every other address of the caller is
/// cleared in the same transaction, so a user never has two defaults.
pub struct SetDefaultAddressHandler {
    persistence: Arc<dyn Persistence>,
}

impl SetDefaultAddressHandler {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    #[tracing::instrument(
        skip_all,
        fields(address_id = %cmd.address_id, correlation_id = %ctx.correlation_id())
    )]
    pub async fn handle(&self, cmd: SetDefaultAddressCommand, ctx: &RequestContext) -> TypedOutcome<bool> {
        let Some(user_id) = ctx.caller.user_id else {
            tracing::warn!("unauthenticated default address change");
            return TypedOutcome::unauthorized();
        };

        match self.execute(&cmd, user_id, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "default address change failed");
                TypedOutcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &SetDefaultAddressCommand,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> Result<TypedOutcome<bool>, DomainError> {
        let mut tx = self.persistence.begin().await?;

        if tx.find_user_address(&cmd.address_id, &user_id).await?.is_none() {
            return Ok(TypedOutcome::failure_detail(
                ADDRESS_NOT_FOUND,
                "Address does not exist or you don't have permission to modify it",
            ));
        }

        for mut address in tx.list_user_addresses(&user_id).await? {
            let was_default = address.is_default();
            let chosen = *address.id() == cmd.address_id;
            address.set_default(chosen);
            if address.is_default() != was_default {
                tx.update_address(&address).await?;
            }
        }

        ctx.cancellation().check()?;
        tx.commit().await?;

        tracing::info!(user_id = %user_id, "default address changed");
        Ok(TypedOutcome::success(true).with_message("Default address updated"))
    }
}
