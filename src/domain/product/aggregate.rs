//! Product aggregate entity.
//!
//! Products are listed by a vendor. Deletion is a status transition, never a
//! row removal.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    OwnedByVendor, ProductId, Timestamp, ValidationError, VendorId,
};

use super::ProductStatus;

/// Product listing.
///
/// # Invariants
///
/// - `status == Deleted` implies `!is_active`
/// - `view_count` only ever grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    vendor_id: VendorId,
    name: String,
    sku: Option<String>,
    status: ProductStatus,
    is_active: bool,
    view_count: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
    updated_by: Option<String>,
}

impl Product {
    /// Create a new active listing.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    pub fn new(
        id: ProductId,
        vendor_id: VendorId,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            vendor_id,
            name,
            sku: None,
            status: ProductStatus::Active,
            is_active: true,
            view_count: 0,
            created_at: now,
            updated_at: now,
            updated_by: None,
        })
    }

    /// Reconstitute a product from persistence.
    ///
    /// A stored row that is `Deleted` but still flagged active is read back
    /// as inactive.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProductId,
        vendor_id: VendorId,
        name: String,
        sku: Option<String>,
        status: ProductStatus,
        is_active: bool,
        view_count: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
        updated_by: Option<String>,
    ) -> Self {
        Self {
            id,
            vendor_id,
            name,
            sku,
            status,
            is_active: is_active && !status.is_deleted(),
            view_count,
            created_at,
            updated_at,
            updated_by,
        }
    }

    /// Builder: set the stock-keeping unit.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn updated_by(&self) -> Option<&str> {
        self.updated_by.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Soft-delete the listing.
    ///
    /// Re-deleting an already deleted product re-affirms the same state and
    /// refreshes the audit stamp.
    pub fn mark_deleted(&mut self, updated_by: impl Into<String>) {
        self.status = ProductStatus::Deleted;
        self.is_active = false;
        self.touch(updated_by.into());
    }

    /// Count one view. Audit fields are left alone.
    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
    }

    fn touch(&mut self, updated_by: String) {
        self.updated_at = Timestamp::now();
        self.updated_by = Some(updated_by);
    }
}

impl OwnedByVendor for Product {
    fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }
}
