//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory implementations of every port
//! - `postgres` - sqlx-backed `Persistence`
//! - `notification` - Log-only reset notifier

pub mod memory;
pub mod notification;
pub mod postgres;
