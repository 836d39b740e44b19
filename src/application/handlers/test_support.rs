//! Fixtures shared by handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::memory::InMemoryStore;
use crate::domain::address::{Address, PostalAddress};
use crate::domain::foundation::{
    AddressId, CallerIdentity, DomainError, ProductId, RequestContext, Timestamp, UserId, VendorId,
};
use crate::domain::product::Product;
use crate::domain::vendor::Vendor;
use crate::ports::{Persistence, StoreTransaction};

/// Persistence that refuses to open transactions. Handlers that must not
/// touch storage can be run against it: any lookup surfaces as a failure.
pub struct UnreachablePersistence;

#[async_trait]
impl Persistence for UnreachablePersistence {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError> {
        Err(DomainError::database("storage must not be reached"))
    }
}

pub fn unreachable_persistence() -> Arc<dyn Persistence> {
    Arc::new(UnreachablePersistence)
}

pub fn signed_in(user_id: UserId) -> RequestContext {
    RequestContext::new(CallerIdentity::authenticated(user_id, "owner@example.com"))
}

pub async fn seed_vendor(store: &InMemoryStore, owner: UserId) -> Vendor {
    let vendor = Vendor::new(VendorId::new(), owner, "Harbor Goods").unwrap();
    store.insert_vendor(vendor.clone()).await;
    vendor
}

pub async fn seed_product(store: &InMemoryStore, vendor: &Vendor) -> Product {
    let product = Product::new(ProductId::new(), *vendor.id(), "Enamel Mug")
        .unwrap()
        .with_sku("MUG-001");
    store.insert_product(product.clone()).await;
    product
}

pub fn postal(street: &str) -> PostalAddress {
    PostalAddress {
        street: street.to_string(),
        city: "Portland".to_string(),
        state: "OR".to_string(),
        zip_code: "97201".to_string(),
        country: "US".to_string(),
    }
}

/// Seeds an address whose creation time is `created_secs` after a fixed base.
pub async fn seed_address(
    store: &InMemoryStore,
    owner: UserId,
    label: &str,
    is_default: bool,
    created_secs: i64,
) -> Address {
    let created = Timestamp::from_unix_secs(1_700_000_000 + created_secs);
    let address = Address::reconstitute(
        AddressId::new(),
        owner,
        label.to_string(),
        postal("1 Main St"),
        is_default,
        created,
        created,
    );
    store.insert_address(address.clone()).await;
    address
}
