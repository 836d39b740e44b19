//! In-memory session/refresh token store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TokenStore;

#[derive(Debug, Clone)]
struct TokenEntry {
    user_id: UserId,
    revoked: bool,
}

/// In-memory implementation of [`TokenStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenEntry>>>,
    fail_revocation: bool,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `revoke_all` call fails with a `DatabaseError`.
    pub fn with_failing_revocation(mut self) -> Self {
        self.fail_revocation = true;
        self
    }

    /// Issue an opaque token for the user.
    pub async fn issue(&self, user_id: UserId) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.write().await.insert(
            token.clone(),
            TokenEntry {
                user_id,
                revoked: false,
            },
        );
        token
    }

    pub async fn is_active(&self, token: &str) -> bool {
        self.tokens
            .read()
            .await
            .get(token)
            .map(|e| !e.revoked)
            .unwrap_or(false)
    }

    pub async fn active_count(&self, user_id: &UserId) -> usize {
        self.tokens
            .read()
            .await
            .values()
            .filter(|e| e.user_id == *user_id && !e.revoked)
            .count()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn revoke_all(&self, user_id: &UserId) -> Result<usize, DomainError> {
        if self.fail_revocation {
            return Err(DomainError::database("Simulated token store failure"));
        }

        let mut tokens = self.tokens.write().await;
        let mut revoked = 0;
        for entry in tokens.values_mut() {
            if entry.user_id == *user_id && !entry.revoked {
                entry.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
