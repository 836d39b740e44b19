//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, the caller identity,
//! request context and the outcome envelope that form the vocabulary of the
//! marketplace domain.

mod auth;
mod cancellation;
mod context;
mod errors;
mod ids;
mod outcome;
mod ownership;
mod timestamp;

pub use auth::CallerIdentity;
pub use cancellation::{CancellationHandle, CancellationSignal};
pub use context::RequestContext;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AddressId, ProductId, UserId, VendorId};
pub use outcome::{
    Failure, Outcome, TypedOutcome, CANCELLED_DETAIL, CANCELLED_MESSAGE,
    OPERATION_FAILED_MESSAGE, UNAUTHENTICATED_DETAIL, UNAUTHORIZED_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
pub use ownership::{OwnedByUser, OwnedByVendor};
pub use timestamp::Timestamp;
