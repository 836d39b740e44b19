//! Address entity.
//!
//! Addresses belong to exactly one user and are hard-deleted by their owner.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AddressId, OwnedByUser, Timestamp, UserId, ValidationError};

/// Postal part of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl PostalAddress {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("street", &self.street),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(())
    }
}

/// Saved shipping/billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    id: AddressId,
    user_id: UserId,
    label: String,
    postal: PostalAddress,
    is_default: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Address {
    /// Create a new, non-default address.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if street, city, zip code or country is blank
    pub fn new(
        id: AddressId,
        user_id: UserId,
        label: impl Into<String>,
        postal: PostalAddress,
    ) -> Result<Self, ValidationError> {
        postal.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            label: label.into(),
            postal,
            is_default: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an address from persistence.
    pub fn reconstitute(
        id: AddressId,
        user_id: UserId,
        label: String,
        postal: PostalAddress,
        is_default: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            label,
            postal,
            is_default,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AddressId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn postal(&self) -> &PostalAddress {
        &self.postal
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Flags or unflags this address as the owner's default.
    ///
    /// No-op (and no audit stamp) when the flag already has that value.
    pub fn set_default(&mut self, is_default: bool) {
        if self.is_default != is_default {
            self.is_default = is_default;
            self.updated_at = Timestamp::now();
        }
    }

    /// Listing order: default address first, then oldest first.
    pub fn listing_order(a: &Address, b: &Address) -> Ordering {
        b.is_default
            .cmp(&a.is_default)
            .then_with(|| a.created_at.cmp(&b.created_at))
    }
}

/// Sorts addresses into listing order in place.
pub fn sort_for_listing(addresses: &mut [Address]) {
    addresses.sort_by(Address::listing_order);
}

impl OwnedByUser for Address {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
