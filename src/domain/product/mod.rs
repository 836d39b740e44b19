//! Product domain module.
//!
//! Product listings owned by a vendor, their status lifecycle and view
//! counting.

mod aggregate;
mod status;

pub use aggregate::Product;
pub use status::ProductStatus;
