//! Ownership trait for user-owned resources.
//!
//! Ownership is enforced at lookup time: repositories take the resource id
//! and the owner id in one predicate, so a resource owned by someone else is
//! indistinguishable from one that does not exist. `OwnedByUser` is the
//! in-memory counterpart of that predicate and the single place where the
//! comparison is spelled out.

use super::{UserId, VendorId};

/// Resources with a single owning user (vendors, addresses).
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}

/// Resources owned by a vendor (products).
pub trait OwnedByVendor {
    /// Returns the ID of the owning vendor.
    fn vendor_id(&self) -> &VendorId;

    fn is_listed_by(&self, vendor_id: &VendorId) -> bool {
        self.vendor_id() == vendor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedByUser for TestResource {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    struct TestListing {
        vendor: VendorId,
    }

    impl OwnedByVendor for TestListing {
        fn vendor_id(&self) -> &VendorId {
            &self.vendor
        }
    }

    #[test]
    fn is_owner_returns_true_for_owner() {
        let owner = UserId::new();
        let resource = TestResource { owner };
        assert!(resource.is_owner(&owner));
    }

    #[test]
    fn is_owner_returns_false_for_non_owner() {
        let resource = TestResource { owner: UserId::new() };
        assert!(!resource.is_owner(&UserId::new()));
    }

    #[test]
    fn is_listed_by_checks_vendor() {
        let vendor = VendorId::new();
        let listing = TestListing { vendor };

        assert!(listing.is_listed_by(&vendor));
        assert!(!listing.is_listed_by(&VendorId::new()));
    }
}
