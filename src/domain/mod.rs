//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, outcomes, caller)
//! - `account` - User accounts, passwords and reset tickets
//! - `address` - Saved addresses and their listing order
//! - `product` - Product listings and the soft-delete lifecycle
//! - `vendor` - Vendor profiles and order acceptance

pub mod account;
pub mod address;
pub mod foundation;
pub mod product;
pub mod vendor;
