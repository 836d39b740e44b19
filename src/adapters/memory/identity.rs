//! In-memory identity store.
//!
//! Holds accounts, roles and reset tickets in process memory. Password
//! digests are plain SHA-256 and only fit for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::config::AuthConfig;
use crate::domain::account::{ResetTicket, ResetToken, TicketState, UserAccount};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{IdentityError, IdentityProvider};

/// Message returned for any unusable reset token.
pub const INVALID_RESET_TOKEN: &str = "Invalid email or token";

/// Message returned when the current password does not verify.
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";

#[derive(Debug, Clone)]
struct StoredAccount {
    account: UserAccount,
    password_digest: [u8; 32],
    roles: Vec<String>,
}

/// In-memory implementation of [`IdentityProvider`].
#[derive(Debug)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<UserId, StoredAccount>>,
    tickets: RwLock<HashMap<UserId, Vec<ResetTicket>>>,
    clock_offset_minutes: RwLock<i64>,
    force_error: RwLock<Option<IdentityError>>,
    reset_token_ttl_minutes: i64,
    min_password_length: usize,
}

impl InMemoryIdentityProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            tickets: RwLock::new(HashMap::new()),
            clock_offset_minutes: RwLock::new(0),
            force_error: RwLock::new(None),
            reset_token_ttl_minutes: config.reset_token_ttl_minutes,
            min_password_length: config.min_password_length,
        }
    }

    /// Register an account with a password and role names.
    pub async fn register(&self, account: UserAccount, password: &str, roles: &[&str]) {
        let stored = StoredAccount {
            password_digest: digest(password),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            account,
        };
        self.accounts.write().await.insert(stored.account.id, stored);
    }

    /// Make every subsequent call fail with `error`.
    pub async fn fail_with(&self, error: IdentityError) {
        *self.force_error.write().await = Some(error);
    }

    /// Move this store's clock forward, for expiry tests.
    pub async fn advance_clock(&self, minutes: i64) {
        *self.clock_offset_minutes.write().await += minutes;
    }

    /// Number of reset tickets currently held for the user.
    pub async fn outstanding_tickets(&self, user_id: &UserId) -> usize {
        self.tickets
            .read()
            .await
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    async fn now(&self) -> Timestamp {
        Timestamp::now().plus_minutes(*self.clock_offset_minutes.read().await)
    }

    async fn check_error(&self) -> Result<(), IdentityError> {
        match self.force_error.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn check_policy(&self, password: &str) -> Result<(), IdentityError> {
        if password.chars().count() < self.min_password_length {
            return Err(IdentityError::rejected(format!(
                "Passwords must be at least {} characters.",
                self.min_password_length
            )));
        }
        Ok(())
    }

    async fn set_password(&self, user_id: &UserId, password: &str) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(user_id)
            .ok_or_else(|| IdentityError::rejected("User not found."))?;
        stored.password_digest = digest(password);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, IdentityError> {
        self.check_error().await?;
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|s| s.account.email.eq_ignore_ascii_case(email))
            .map(|s| s.account.clone()))
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserAccount>, IdentityError> {
        self.check_error().await?;
        Ok(self
            .accounts
            .read()
            .await
            .get(user_id)
            .map(|s| s.account.clone()))
    }

    async fn verify_password(
        &self,
        user: &UserAccount,
        password: &str,
    ) -> Result<bool, IdentityError> {
        self.check_error().await?;
        Ok(self
            .accounts
            .read()
            .await
            .get(&user.id)
            .map(|s| bool::from(s.password_digest[..].ct_eq(&digest(password)[..])))
            .unwrap_or(false))
    }

    async fn change_password(
        &self,
        user: &UserAccount,
        current: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        if !self.verify_password(user, current).await? {
            return Err(IdentityError::rejected(INCORRECT_PASSWORD));
        }
        self.check_policy(new_password)?;
        self.set_password(&user.id, new_password).await
    }

    async fn issue_reset_token(&self, user: &UserAccount) -> Result<ResetToken, IdentityError> {
        self.check_error().await?;
        let token = uuid::Uuid::new_v4().simple().to_string();
        let now = self.now().await;
        let ticket = ResetTicket::issue(user.id, &token, now, self.reset_token_ttl_minutes);

        let mut tickets = self.tickets.write().await;
        let held = tickets.entry(user.id).or_default();
        held.retain(|t| t.state(&now) == TicketState::Issued);
        held.push(ticket);
        Ok(ResetToken::new(token))
    }

    async fn reset_password(
        &self,
        user: &UserAccount,
        token: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        self.check_error().await?;
        self.check_policy(new_password)?;

        let now = self.now().await;
        let mut tickets = self.tickets.write().await;
        let consumed = tickets
            .get_mut(&user.id)
            .map(|held| held.iter_mut().any(|t| t.consume(token, &now).is_ok()))
            .unwrap_or(false);
        if !consumed {
            return Err(IdentityError::rejected(INVALID_RESET_TOKEN));
        }

        // A successful reset invalidates every other ticket for the user.
        tickets.remove(&user.id);
        drop(tickets);

        self.set_password(&user.id, new_password).await
    }

    async fn roles(&self, user: &UserAccount) -> Result<Vec<String>, IdentityError> {
        self.check_error().await?;
        Ok(self
            .accounts
            .read()
            .await
            .get(&user.id)
            .map(|s| s.roles.clone())
            .unwrap_or_default())
    }
}

fn digest(password: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(password.as_bytes()));
    out
}
