//! Caller identity for the in-flight request.
//!
//! The identity is resolved by the authentication layer (outside this crate)
//! and handed to handlers through the `CurrentCaller` port. An identity with
//! no user id is an anonymous caller.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Who is making the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Authenticated user, or `None` for an anonymous caller.
    pub user_id: Option<UserId>,

    /// Email claim of the authenticated user, used for audit stamps.
    pub email: Option<String>,
}

impl CallerIdentity {
    /// An authenticated caller.
    pub fn authenticated(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            email: Some(email.into()),
        }
    }

    /// A caller with no resolved user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Value written to `updated_by` audit columns.
    ///
    /// Prefers the email claim and falls back to the user id.
    pub fn audit_name(&self) -> String {
        match (&self.email, &self.user_id) {
            (Some(email), _) => email.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "anonymous".to_string(),
        }
    }
}
