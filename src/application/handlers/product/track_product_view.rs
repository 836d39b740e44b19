//! TrackProductViewHandler - Public view counter for product pages.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::{DomainError, Failure, Outcome, ProductId, RequestContext};
use crate::ports::Persistence;

use super::PRODUCT_NOT_FOUND;

/// Command to record one product page view.
///
/// The analytics fields are accepted for forward compatibility; they are
/// recorded on the tracing span only and never stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackProductViewCommand {
    pub product_id: ProductId,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl TrackProductViewCommand {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            ..Default::default()
        }
    }
}

/// Handler for view tracking. Anonymous callers are allowed.
pub struct TrackProductViewHandler {
    persistence: Arc<dyn Persistence>,
}

impl TrackProductViewHandler {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    #[tracing::instrument(
        skip_all,
        fields(
            product_id = %cmd.product_id,
            session_id = cmd.session_id.as_deref(),
            referrer = cmd.referrer.as_deref(),
        )
    )]
    pub async fn handle(&self, cmd: TrackProductViewCommand, ctx: &RequestContext) -> Outcome {
        match self.execute(&cmd, ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "product view tracking failed");
                Outcome::from_domain_error(err)
            }
        }
    }

    async fn execute(
        &self,
        cmd: &TrackProductViewCommand,
        ctx: &RequestContext,
    ) -> Result<Outcome, DomainError> {
        let mut tx = self.persistence.begin().await?;

        if tx.find_product(&cmd.product_id).await?.is_none() {
            tracing::debug!("view for unknown product");
            return Ok(Outcome::failure(PRODUCT_NOT_FOUND));
        }

        tx.increment_product_views(&cmd.product_id).await?;

        ctx.cancellation().check()?;
        tx.commit().await?;

        Ok(Outcome::success().with_message("View tracked"))
    }
}
