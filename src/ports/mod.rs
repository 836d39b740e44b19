//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Persistence` / `StoreTransaction` - Entity lookups and atomic saves
//! - `IdentityProvider` - Accounts, credentials, roles and reset tickets
//! - `TokenStore` - Bulk revocation of session/refresh tokens
//! - `CurrentCaller` - Identity of the in-flight request
//! - `PasswordResetNotifier` - Out-of-band delivery of reset links

mod current_caller;
mod identity_provider;
mod notifier;
mod persistence;
mod token_store;

pub use current_caller::CurrentCaller;
pub use identity_provider::{IdentityError, IdentityProvider};
pub use notifier::PasswordResetNotifier;
pub use persistence::{Persistence, StoreTransaction};
pub use token_store::TokenStore;
