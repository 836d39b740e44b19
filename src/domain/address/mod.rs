//! Address domain module.

mod aggregate;

pub use aggregate::{sort_for_listing, Address, PostalAddress};
