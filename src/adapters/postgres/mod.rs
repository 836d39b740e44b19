//! PostgreSQL adapters.
//!
//! Requires the tables in `migrations/`.

mod marketplace_store;

pub use marketplace_store::PostgresPersistence;
