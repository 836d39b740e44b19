//! DeleteProductHandler - Soft-deletes a product owned by the caller's vendor.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::{
    DomainError, Failure, ProductId, RequestContext, TypedOutcome, UserId,
};
use crate::ports::Persistence;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_NOT_FOUND_DETAIL: &str =
    "Product does not exist or you don't have permission to delete it";

/// Command to delete a product.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

/// Handler for product deletion.
///
/// Deletion is a status transition to `Deleted`; the row is kept. A missing
/// product, a product listed by another vendor and a caller with no vendor
/// all produce the same failure.
pub struct DeleteProductHandler {
    persistence: Arc<dyn Persistence>,
}

impl DeleteProductHandler {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    #[tracing::instrument(
        skip_all,
        fields(product_id = %cmd.product_id, correlation_id = %ctx.correlation_id())
    )]
    pub async fn handle(&self, cmd: DeleteProductCommand, ctx: &RequestContext) -> TypedOutcome<bool> {
        let Some(user_id) = ctx.caller.user_id else {
            tracing::warn!("unauthenticated product deletion attempt");
            return TypedOutcome::unauthorized();
        };

        match self.execute(&cmd, user_id, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "product deletion failed");
                TypedOutcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &DeleteProductCommand,
        user_id: UserId,
        ctx: &RequestContext,
    ) -> Result<TypedOutcome<bool>, DomainError> {
        let mut tx = self.persistence.begin().await?;

        let product = match tx.find_vendor_by_user(&user_id).await? {
            Some(vendor) => tx.find_vendor_product(&cmd.product_id, vendor.id()).await?,
            None => None,
        };

        let Some(mut product) = product else {
            tracing::warn!(user_id = %user_id, "product not found for caller's vendor");
            return Ok(TypedOutcome::failure_detail(
                PRODUCT_NOT_FOUND,
                PRODUCT_NOT_FOUND_DETAIL,
            ));
        };

        product.mark_deleted(ctx.caller.audit_name());
        tx.update_product(&product).await?;

        ctx.cancellation().check()?;
        tx.commit().await?;

        tracing::info!(user_id = %user_id, "product deleted");
        Ok(TypedOutcome::success(true).with_message("Product deleted successfully"))
    }
}
