//! Persistence port.
//!
//! Every handler runs its lookup, mutation and save inside one
//! [`StoreTransaction`]. Lookups that enforce ownership take the resource id
//! and the owner id together, so "does not exist" and "belongs to someone
//! else" produce the same `None`.
//!
//! Dropping a transaction without calling [`StoreTransaction::commit`]
//! discards every write made through it.

use async_trait::async_trait;

use crate::domain::address::Address;
use crate::domain::foundation::{AddressId, DomainError, ProductId, UserId, VendorId};
use crate::domain::product::Product;
use crate::domain::vendor::Vendor;

/// Opens transaction scopes against the marketplace store.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Begin a new transaction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the store is unreachable
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError>;
}

/// Unit of work over the marketplace entities.
#[async_trait]
pub trait StoreTransaction: Send {
    // ─────────────────────────────────────────────────────────────────────────
    // Vendors
    // ─────────────────────────────────────────────────────────────────────────

    /// The vendor profile owned by `user_id`, if any.
    async fn find_vendor_by_user(&mut self, user_id: &UserId) -> Result<Option<Vendor>, DomainError>;

    /// Persist changes to an existing vendor.
    ///
    /// # Errors
    ///
    /// - `VendorNotFound` if the row no longer exists
    async fn update_vendor(&mut self, vendor: &Vendor) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    /// Product by id alone, for public operations.
    async fn find_product(&mut self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Product matching `id AND vendor_id` in one predicate.
    async fn find_vendor_product(
        &mut self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError>;

    /// Persist changes to an existing product.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the row no longer exists
    async fn update_product(&mut self, product: &Product) -> Result<(), DomainError>;

    /// Add one to the product's view counter without touching other columns.
    async fn increment_product_views(&mut self, id: &ProductId) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Addresses
    // ─────────────────────────────────────────────────────────────────────────

    /// All addresses owned by `user_id`, default first then oldest first.
    async fn list_user_addresses(&mut self, user_id: &UserId) -> Result<Vec<Address>, DomainError>;

    /// Address matching `id AND user_id` in one predicate.
    async fn find_user_address(
        &mut self,
        id: &AddressId,
        user_id: &UserId,
    ) -> Result<Option<Address>, DomainError>;

    /// Persist changes to an existing address.
    async fn update_address(&mut self, address: &Address) -> Result<(), DomainError>;

    /// Remove the address row.
    ///
    /// # Errors
    ///
    /// - `AddressNotFound` if the row no longer exists
    async fn remove_address(&mut self, id: &AddressId) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Atomically apply every write made through this transaction.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
