//! In-memory marketplace store for testing and local development.
//!
//! A transaction takes the store lock for its whole lifetime and works on a
//! private copy of the state; `commit` swaps the copy in. That gives
//! serializable isolation and makes rollback-on-drop free. Not suitable for
//! multi-process deployments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::address::{sort_for_listing, Address};
use crate::domain::foundation::{
    AddressId, DomainError, ErrorCode, OwnedByUser, OwnedByVendor, ProductId, UserId, VendorId,
};
use crate::domain::product::Product;
use crate::domain::vendor::Vendor;
use crate::ports::{Persistence, StoreTransaction};

#[derive(Debug, Default, Clone)]
struct StoreState {
    vendors: HashMap<VendorId, Vendor>,
    products: HashMap<ProductId, Product>,
    addresses: HashMap<AddressId, Address>,
}

/// In-memory implementation of [`Persistence`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    commits: Arc<AtomicUsize>,
    fail_commits: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every commit fails with a `DatabaseError` (for error-path tests).
    pub fn with_failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding and inspection
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn insert_vendor(&self, vendor: Vendor) {
        self.state.lock().await.vendors.insert(*vendor.id(), vendor);
    }

    pub async fn insert_product(&self, product: Product) {
        self.state.lock().await.products.insert(*product.id(), product);
    }

    pub async fn insert_address(&self, address: Address) {
        self.state.lock().await.addresses.insert(*address.id(), address);
    }

    pub async fn vendor(&self, id: &VendorId) -> Option<Vendor> {
        self.state.lock().await.vendors.get(id).cloned()
    }

    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.state.lock().await.products.get(id).cloned()
    }

    pub async fn address(&self, id: &AddressId) -> Option<Address> {
        self.state.lock().await.addresses.get(id).cloned()
    }

    pub async fn address_count(&self) -> usize {
        self.state.lock().await.addresses.len()
    }
}

#[async_trait]
impl Persistence for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            guard,
            working,
            commits: self.commits.clone(),
            fail_commit: self.fail_commits,
        }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
    commits: Arc<AtomicUsize>,
    fail_commit: bool,
}

fn not_found(code: ErrorCode, what: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::new(code, format!("{} not found: {}", what, id))
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn find_vendor_by_user(&mut self, user_id: &UserId) -> Result<Option<Vendor>, DomainError> {
        Ok(self
            .working
            .vendors
            .values()
            .find(|v| v.is_owner(user_id))
            .cloned())
    }

    async fn update_vendor(&mut self, vendor: &Vendor) -> Result<(), DomainError> {
        match self.working.vendors.get_mut(vendor.id()) {
            Some(slot) => {
                *slot = vendor.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::VendorNotFound, "Vendor", vendor.id())),
        }
    }

    async fn find_product(&mut self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.working.products.get(id).cloned())
    }

    async fn find_vendor_product(
        &mut self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError> {
        Ok(self
            .working
            .products
            .get(id)
            .filter(|p| p.is_listed_by(vendor_id))
            .cloned())
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), DomainError> {
        match self.working.products.get_mut(product.id()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::ProductNotFound, "Product", product.id())),
        }
    }

    async fn increment_product_views(&mut self, id: &ProductId) -> Result<(), DomainError> {
        match self.working.products.get_mut(id) {
            Some(product) => {
                product.record_view();
                Ok(())
            }
            None => Err(not_found(ErrorCode::ProductNotFound, "Product", id)),
        }
    }

    async fn list_user_addresses(&mut self, user_id: &UserId) -> Result<Vec<Address>, DomainError> {
        let mut addresses: Vec<Address> = self
            .working
            .addresses
            .values()
            .filter(|a| a.is_owner(user_id))
            .cloned()
            .collect();
        sort_for_listing(&mut addresses);
        Ok(addresses)
    }

    async fn find_user_address(
        &mut self,
        id: &AddressId,
        user_id: &UserId,
    ) -> Result<Option<Address>, DomainError> {
        Ok(self
            .working
            .addresses
            .get(id)
            .filter(|a| a.is_owner(user_id))
            .cloned())
    }

    async fn update_address(&mut self, address: &Address) -> Result<(), DomainError> {
        match self.working.addresses.get_mut(address.id()) {
            Some(slot) => {
                *slot = address.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::AddressNotFound, "Address", address.id())),
        }
    }

    async fn remove_address(&mut self, id: &AddressId) -> Result<(), DomainError> {
        self.working
            .addresses
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(ErrorCode::AddressNotFound, "Address", id))
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryTransaction {
            mut guard,
            working,
            commits,
            fail_commit,
        } = *self;

        if fail_commit {
            return Err(DomainError::database("Simulated commit failure"));
        }

        *guard = working;
        commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
