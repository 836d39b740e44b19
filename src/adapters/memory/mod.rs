//! In-memory adapters for every port.
//!
//! Used by the test suite and for running the core without a database.

mod identity;
mod notifier;
mod store;
mod token_store;

pub use identity::{InMemoryIdentityProvider, INCORRECT_PASSWORD, INVALID_RESET_TOKEN};
pub use notifier::{RecordingNotifier, SentResetEmail};
pub use store::InMemoryStore;
pub use token_store::InMemoryTokenStore;
