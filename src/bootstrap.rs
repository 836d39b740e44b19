//! Wiring from configuration to a ready `MarketplaceCore`.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::notification::LoggingNotifier;
use crate::adapters::postgres::PostgresPersistence;
use crate::application::{CorePorts, MarketplaceCore};
use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::DomainError;
use crate::ports::{IdentityProvider, Persistence, TokenStore};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("storage unavailable: {0}")]
    Storage(#[from] DomainError),
}

/// Build the core from configuration.
///
/// Persistence is Postgres when a database section is configured and the
/// in-memory store otherwise. Reset emails go to the log. The identity and
/// token stores are owned by the embedding application and passed in.
pub async fn build_core(
    config: &AppConfig,
    identity: Arc<dyn IdentityProvider>,
    tokens: Arc<dyn TokenStore>,
) -> Result<MarketplaceCore, BootstrapError> {
    config.validate()?;

    let persistence: Arc<dyn Persistence> = match &config.database {
        Some(database) => {
            tracing::info!("using postgres persistence");
            Arc::new(PostgresPersistence::connect(database).await?)
        }
        None => {
            tracing::warn!("no database configured, using in-memory persistence");
            Arc::new(InMemoryStore::new())
        }
    };

    let ports = CorePorts {
        persistence,
        identity,
        tokens,
        notifier: Arc::new(LoggingNotifier::new(&config.email)),
    };

    Ok(MarketplaceCore::new(ports, config.auth.reset_url()?))
}
