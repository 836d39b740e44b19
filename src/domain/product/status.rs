//! ProductStatus enum for the listing lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle status of a product listing.
///
/// `Deleted` is the soft-delete state: the row is kept and stays reachable
/// by id, but the listing is never active again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Draft,
    #[default]
    Active,
    Inactive,
    OutOfStock,
    Deleted,
}

impl ProductStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, ProductStatus::Deleted)
    }

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::OutOfStock => "out_of_stock",
            ProductStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductStatus::Draft => "Draft",
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
            ProductStatus::OutOfStock => "Out of stock",
            ProductStatus::Deleted => "Deleted",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "out_of_stock" => Ok(ProductStatus::OutOfStock),
            "deleted" => Ok(ProductStatus::Deleted),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown product status '{}'", other),
            )),
        }
    }
}
