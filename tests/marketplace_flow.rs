//! Integration tests for the marketplace core.
//!
//! These tests drive `MarketplaceCore::dispatch` end to end:
//! 1. Requests arrive as tagged JSON, the way a transport would receive them
//! 2. The caller is resolved into a request context
//! 3. Handlers run against the in-memory adapters
//! 4. Responses are checked as serialized outcomes and as stored state
//!
//! Uses in-memory implementations to test without external dependencies.

use std::sync::Arc;

use serde_json::{json, Value};
use url::Url;

use marketplace::adapters::memory::{
    InMemoryIdentityProvider, InMemoryStore, InMemoryTokenStore, RecordingNotifier,
};
use marketplace::application::{CorePorts, MarketplaceCore, MarketplaceRequest, Response};
use marketplace::config::AuthConfig;
use marketplace::domain::account::UserAccount;
use marketplace::domain::address::{Address, PostalAddress};
use marketplace::domain::foundation::{
    AddressId, CallerIdentity, ProductId, RequestContext, Timestamp, UserId, VendorId,
};
use marketplace::domain::product::{Product, ProductStatus};
use marketplace::domain::vendor::Vendor;
use marketplace::ports::IdentityProvider;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    core: MarketplaceCore,
    store: InMemoryStore,
    identity: Arc<InMemoryIdentityProvider>,
    tokens: InMemoryTokenStore,
    notifier: RecordingNotifier,
}

impl Harness {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let identity = Arc::new(InMemoryIdentityProvider::new(&AuthConfig::default()));
        let tokens = InMemoryTokenStore::new();
        let notifier = RecordingNotifier::new();

        let ports = CorePorts {
            persistence: Arc::new(store.clone()),
            identity: identity.clone(),
            tokens: Arc::new(tokens.clone()),
            notifier: Arc::new(notifier.clone()),
        };
        let reset_url = Url::parse("https://shop.example.com/account/reset").unwrap();

        Self {
            core: MarketplaceCore::new(ports, reset_url),
            store,
            identity,
            tokens,
            notifier,
        }
    }

    async fn send(&self, request: Value, ctx: &RequestContext) -> Response {
        let request: MarketplaceRequest = serde_json::from_value(request).unwrap();
        self.core.dispatch(request, ctx).await
    }

    async fn register(&self, email: &str, password: &str) -> UserAccount {
        let account = UserAccount::new(UserId::new(), email);
        self.identity
            .register(account.clone(), password, &["Customer"])
            .await;
        account
    }
}

fn as_user(user_id: UserId, email: &str) -> RequestContext {
    RequestContext::new(CallerIdentity::authenticated(user_id, email))
        .with_correlation_id("it-correlation")
}

fn address(owner: UserId, label: &str, is_default: bool, created_secs: i64) -> Address {
    let created = Timestamp::from_unix_secs(1_700_000_000 + created_secs);
    Address::reconstitute(
        AddressId::new(),
        owner,
        label.to_string(),
        PostalAddress {
            street: "12 Dock St".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            zip_code: "98101".to_string(),
            country: "US".to_string(),
        },
        is_default,
        created,
        created,
    )
}

// =============================================================================
// Vendor and product flows
// =============================================================================

#[tokio::test]
async fn vendor_lifecycle_and_product_soft_delete() {
    let h = Harness::new();
    let owner = UserId::new();
    let vendor = Vendor::new(VendorId::new(), owner, "Tidewater Supply").unwrap();
    let product = Product::new(ProductId::new(), *vendor.id(), "Rope").unwrap();
    h.store.insert_vendor(vendor.clone()).await;
    h.store.insert_product(product.clone()).await;
    let ctx = as_user(owner, "owner@tidewater.example");

    let deactivated = h
        .send(json!({"operation": "deactivate_vendor", "is_active": false}), &ctx)
        .await;
    assert_eq!(deactivated.message(), Some("Vendor deactivated successfully"));
    let stored = h.store.vendor(vendor.id()).await.unwrap();
    assert!(!stored.is_active() && !stored.accept_orders());

    let deleted = h
        .send(json!({"operation": "delete_product", "product_id": product.id()}), &ctx)
        .await;
    let json = serde_json::to_value(&deleted).unwrap();
    assert_eq!(json["succeeded"], true);
    assert_eq!(json["data"], true);
    assert_eq!(json["message"], "Product deleted successfully");

    let stored = h.store.product(product.id()).await.unwrap();
    assert_eq!(stored.status(), ProductStatus::Deleted);
    assert!(!stored.is_active());
    assert_eq!(stored.updated_by(), Some("owner@tidewater.example"));
}

#[tokio::test]
async fn product_views_are_public_and_counted() {
    let h = Harness::new();
    let vendor = Vendor::new(VendorId::new(), UserId::new(), "Tidewater Supply").unwrap();
    let product = Product::new(ProductId::new(), *vendor.id(), "Rope").unwrap();
    h.store.insert_vendor(vendor).await;
    h.store.insert_product(product.clone()).await;

    let response = h
        .send(
            json!({
                "operation": "track_product_view",
                "product_id": product.id(),
                "session_id": "s-42",
                "user_agent": "Mozilla/5.0"
            }),
            &RequestContext::anonymous(),
        )
        .await;

    assert!(response.succeeded());
    assert_eq!(h.store.product(product.id()).await.unwrap().view_count(), 1);

    let missing = h
        .send(
            json!({"operation": "track_product_view", "product_id": ProductId::new()}),
            &RequestContext::anonymous(),
        )
        .await;
    assert_eq!(missing.message(), Some("Product not found"));
    assert_eq!(missing.errors(), ["Product not found".to_string()]);
}

#[tokio::test]
async fn anonymous_callers_change_nothing() {
    let h = Harness::new();
    let owner = UserId::new();
    let vendor = Vendor::new(VendorId::new(), owner, "Tidewater Supply").unwrap();
    let product = Product::new(ProductId::new(), *vendor.id(), "Rope").unwrap();
    let home = address(owner, "Home", true, 0);
    h.store.insert_vendor(vendor.clone()).await;
    h.store.insert_product(product.clone()).await;
    h.store.insert_address(home.clone()).await;
    let anon = RequestContext::anonymous();

    let requests = [
        json!({"operation": "delete_product", "product_id": product.id()}),
        json!({"operation": "deactivate_vendor", "is_active": false}),
        json!({"operation": "list_addresses"}),
        json!({"operation": "delete_address", "address_id": home.id()}),
        json!({"operation": "set_default_address", "address_id": home.id()}),
        json!({"operation": "get_current_user"}),
        json!({
            "operation": "change_password",
            "current_password": "x",
            "new_password": "long-enough-pass",
            "confirm_password": "long-enough-pass"
        }),
    ];

    for request in requests {
        let response = h.send(request, &anon).await;
        assert_eq!(response.message(), Some("Unauthorized"));
        assert_eq!(response.errors(), ["User not authenticated".to_string()]);
    }

    assert_eq!(h.store.commit_count(), 0);
    assert!(h.store.product(product.id()).await.unwrap().is_active());
    assert!(h.store.vendor(vendor.id()).await.unwrap().is_active());
    assert!(h.store.address(home.id()).await.is_some());
}

// =============================================================================
// Address flows
// =============================================================================

#[tokio::test]
async fn address_listing_default_switch_and_delete() {
    let h = Harness::new();
    let owner = UserId::new();
    let home = address(owner, "Home", true, 100);
    let office = address(owner, "Office", false, 50);
    let storage = address(owner, "Storage", false, 200);
    for a in [&home, &office, &storage] {
        h.store.insert_address(a.clone()).await;
    }
    let ctx = as_user(owner, "owner@example.com");

    let listed = serde_json::to_value(h.send(json!({"operation": "list_addresses"}), &ctx).await).unwrap();
    let labels: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["Home", "Office", "Storage"]);

    let switched = h
        .send(json!({"operation": "set_default_address", "address_id": storage.id()}), &ctx)
        .await;
    assert!(switched.succeeded());

    let listed = serde_json::to_value(h.send(json!({"operation": "list_addresses"}), &ctx).await).unwrap();
    let data = listed["data"].as_array().unwrap();
    assert_eq!(data[0]["label"], "Storage");
    assert_eq!(data.iter().filter(|a| a["is_default"] == true).count(), 1);

    let deleted = h
        .send(json!({"operation": "delete_address", "address_id": office.id()}), &ctx)
        .await;
    assert_eq!(deleted.message(), Some("Address deleted successfully"));
    assert_eq!(h.store.address_count().await, 2);

    let stranger = as_user(UserId::new(), "stranger@example.com");
    let denied = h
        .send(json!({"operation": "delete_address", "address_id": home.id()}), &stranger)
        .await;
    assert_eq!(denied.message(), Some("Address not found"));
    assert!(h.store.address(home.id()).await.is_some());
}

// =============================================================================
// Credential flows
// =============================================================================

#[tokio::test]
async fn full_password_reset_round_trip() {
    let h = Harness::new();
    let ada = h.register("ada@example.com", "old-password").await;
    let session = h.tokens.issue(ada.id).await;
    let anon = RequestContext::anonymous();

    let known = h
        .send(json!({"operation": "request_password_reset", "email": "ada@example.com"}), &anon)
        .await;
    let unknown = h
        .send(json!({"operation": "request_password_reset", "email": "ghost@example.com"}), &anon)
        .await;
    assert_eq!(
        serde_json::to_string(&known).unwrap(),
        serde_json::to_string(&unknown).unwrap()
    );

    assert_eq!(h.notifier.wait_for_sent(1).await.len(), 1);
    let link = Url::parse(&h.notifier.last_link_for("ada@example.com").unwrap()).unwrap();
    let token = link
        .query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let reset = json!({
        "operation": "reset_password",
        "email": "ada@example.com",
        "token": token,
        "new_password": "fresh-password",
        "confirm_password": "fresh-password"
    });
    let done = h.send(reset.clone(), &anon).await;
    assert_eq!(done.message(), Some("Password has been reset successfully"));
    assert!(!h.tokens.is_active(&session).await);
    assert!(h.identity.verify_password(&ada, "fresh-password").await.unwrap());

    let replay = h.send(reset, &anon).await;
    assert_eq!(replay.message(), Some("Password reset failed"));
    assert_eq!(replay.errors(), ["Invalid email or token".to_string()]);
}

#[tokio::test]
async fn change_password_then_read_profile() {
    let h = Harness::new();
    let ada = h.register("ada@example.com", "old-password").await;
    let ctx = as_user(ada.id, "ada@example.com");

    let wrong = h
        .send(
            json!({
                "operation": "change_password",
                "current_password": "not-it",
                "new_password": "fresh-password",
                "confirm_password": "fresh-password"
            }),
            &ctx,
        )
        .await;
    assert_eq!(wrong.message(), Some("Invalid password"));

    let changed = h
        .send(
            json!({
                "operation": "change_password",
                "current_password": "old-password",
                "new_password": "fresh-password",
                "confirm_password": "fresh-password"
            }),
            &ctx,
        )
        .await;
    assert_eq!(changed.message(), Some("Password changed successfully"));

    let profile = serde_json::to_value(h.send(json!({"operation": "get_current_user"}), &ctx).await).unwrap();
    assert_eq!(profile["data"]["email"], "ada@example.com");
    assert_eq!(profile["data"]["roles"], json!(["Customer"]));
}
