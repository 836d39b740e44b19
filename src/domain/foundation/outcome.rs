//! Outcome algebra - the uniform success/failure envelope.
//!
//! Every marketplace operation returns an [`Outcome`] or a
//! [`TypedOutcome<T>`]. Failures are values: a handler never signals a
//! business-rule violation by returning `Err` or panicking.
//!
//! # Failure taxonomy
//!
//! | Kind | Typical message |
//! |------|-----------------|
//! | Unauthorized | `"Unauthorized"` / `["User not authenticated"]` |
//! | NotFoundOrForbidden | `"Product not found"`, `"Address not found"` (one shape for both) |
//! | ValidationFailed | `"Validation failed"` with field messages |
//! | ExternalOperationFailed | collaborator error list, verbatim |
//!
//! # Payload invariant
//!
//! A failed `TypedOutcome` never carries data. The fields are private and
//! only the constructors below can build a value, so the invariant holds by
//! construction and [`TypedOutcome::data`] returns `None` on every failure.

use serde::Serialize;

use super::{DomainError, ErrorCode};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const UNAUTHENTICATED_DETAIL: &str = "User not authenticated";
pub const CANCELLED_MESSAGE: &str = "Request cancelled";
pub const CANCELLED_DETAIL: &str = "The request was cancelled before any changes were saved";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const OPERATION_FAILED_MESSAGE: &str = "Operation failed";

/// Result of an operation without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    succeeded: bool,
    message: Option<String>,
    errors: Vec<String>,
}

impl Outcome {
    /// A successful outcome with no message.
    pub fn success() -> Self {
        Self {
            succeeded: true,
            message: None,
            errors: Vec::new(),
        }
    }

    /// Builder: attach a user-facing message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn is_failure(&self) -> bool {
        !self.succeeded
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Result of an operation carrying a payload on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedOutcome<T> {
    #[serde(flatten)]
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> TypedOutcome<T> {
    /// A successful outcome carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            outcome: Outcome::success(),
            data: Some(data),
        }
    }

    /// Builder: attach a user-facing message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.outcome = self.outcome.with_message(message);
        self
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.succeeded
    }

    pub fn is_failure(&self) -> bool {
        !self.outcome.succeeded
    }

    pub fn message(&self) -> Option<&str> {
        self.outcome.message()
    }

    pub fn errors(&self) -> &[String] {
        self.outcome.errors()
    }

    /// The payload. Always `None` for a failure.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Drops the payload, keeping status, message and errors.
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Splits into the payload or the failure envelope.
    pub fn into_result(self) -> Result<T, Outcome> {
        match self.data {
            Some(data) if self.outcome.succeeded => Ok(data),
            _ => Err(self.outcome),
        }
    }

    /// Transforms the payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypedOutcome<U> {
        TypedOutcome {
            outcome: self.outcome,
            data: self.data.map(f),
        }
    }
}

/// Constructors shared by both outcome shapes.
///
/// Handlers return either `Outcome` or `TypedOutcome<T>`; this trait lets the
/// standard failures be written once and produced as whichever shape the
/// operation returns.
pub trait Failure: Sized {
    /// A failure with an explicit error list, kept verbatim.
    fn failure_with(message: impl Into<String>, errors: Vec<String>) -> Self;

    /// A failure whose error list is the message itself.
    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let errors = vec![message.clone()];
        Self::failure_with(message, errors)
    }

    /// A failure with a single detail line.
    fn failure_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::failure_with(message, vec![detail.into()])
    }

    /// The caller is not authenticated.
    fn unauthorized() -> Self {
        Self::failure_detail(UNAUTHORIZED_MESSAGE, UNAUTHENTICATED_DETAIL)
    }

    /// The caller cancelled before anything was persisted.
    fn cancelled() -> Self {
        Self::failure_detail(CANCELLED_MESSAGE, CANCELLED_DETAIL)
    }

    /// Folds a collaborator error into a failure value.
    fn from_domain_error(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => Self::unauthorized(),
            ErrorCode::Cancelled => Self::cancelled(),
            ErrorCode::ValidationFailed => {
                Self::failure_detail(VALIDATION_FAILED_MESSAGE, err.message)
            }
            _ => Self::failure_detail(OPERATION_FAILED_MESSAGE, err.message),
        }
    }
}

impl Failure for Outcome {
    fn failure_with(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            succeeded: false,
            message: Some(message.into()),
            errors,
        }
    }
}

impl<T> Failure for TypedOutcome<T> {
    fn failure_with(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            outcome: Outcome::failure_with(message, errors),
            data: None,
        }
    }
}

impl From<DomainError> for Outcome {
    fn from(err: DomainError) -> Self {
        Self::from_domain_error(err)
    }
}

impl<T> From<DomainError> for TypedOutcome<T> {
    fn from(err: DomainError) -> Self {
        Self::from_domain_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn success_has_no_errors() {
        let outcome = Outcome::success().with_message("done");

        assert!(outcome.succeeded());
        assert_eq!(outcome.message(), Some("done"));
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn failure_defaults_errors_to_message() {
        let outcome = Outcome::failure("Product not found");

        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("Product not found"));
        assert_eq!(outcome.errors(), ["Product not found".to_string()]);
    }

    #[test]
    fn failure_with_keeps_errors_verbatim() {
        let errors = vec!["too short".to_string(), "needs a digit".to_string()];
        let outcome = Outcome::failure_with("Password reset failed", errors.clone());

        assert_eq!(outcome.errors(), errors.as_slice());
    }

    #[test]
    fn failure_with_keeps_explicit_empty_list() {
        let outcome = Outcome::failure_with("Nope", Vec::new());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn typed_success_carries_data() {
        let outcome = TypedOutcome::success(true).with_message("Product deleted successfully");

        assert!(outcome.succeeded());
        assert_eq!(outcome.data(), Some(&true));
        assert_eq!(outcome.message(), Some("Product deleted successfully"));
    }

    #[test]
    fn typed_failure_never_carries_data() {
        let outcome: TypedOutcome<bool> = TypedOutcome::unauthorized();

        assert!(outcome.is_failure());
        assert!(outcome.data().is_none());
        assert_eq!(outcome.message(), Some("Unauthorized"));
        assert_eq!(outcome.errors(), ["User not authenticated".to_string()]);
    }

    #[test]
    fn into_result_splits_on_status() {
        let ok = TypedOutcome::success(7u32);
        assert_eq!(ok.into_result(), Ok(7));

        let failed: TypedOutcome<u32> = TypedOutcome::failure("Vendor not found");
        let envelope = failed.into_result().unwrap_err();
        assert_eq!(envelope.message(), Some("Vendor not found"));
    }

    #[test]
    fn map_leaves_failures_empty() {
        let failed: TypedOutcome<u32> = TypedOutcome::failure("boom");
        let mapped = failed.map(|n| n * 2);

        assert!(mapped.is_failure());
        assert!(mapped.data().is_none());
    }

    #[test]
    fn domain_errors_map_to_taxonomy() {
        let cancelled: Outcome = DomainError::new(ErrorCode::Cancelled, "stop").into();
        assert_eq!(cancelled.message(), Some(CANCELLED_MESSAGE));

        let db: Outcome = DomainError::database("connection reset").into();
        assert_eq!(db.message(), Some(OPERATION_FAILED_MESSAGE));
        assert_eq!(db.errors(), ["connection reset".to_string()]);

        let invalid: TypedOutcome<()> =
            DomainError::new(ErrorCode::ValidationFailed, "Passwords do not match").into();
        assert_eq!(invalid.message(), Some(VALIDATION_FAILED_MESSAGE));
        assert_eq!(invalid.errors(), ["Passwords do not match".to_string()]);
    }

    #[test]
    fn serializes_without_data_on_failure() {
        let failed: TypedOutcome<bool> = TypedOutcome::failure("Address not found");
        let json = serde_json::to_value(&failed).unwrap();

        assert_eq!(json["succeeded"], false);
        assert_eq!(json["message"], "Address not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn serializes_data_flattened_on_success() {
        let ok = TypedOutcome::success(true).with_message("Vendor activated successfully");
        let json = serde_json::to_value(&ok).unwrap();

        assert_eq!(json["succeeded"], true);
        assert_eq!(json["data"], true);
        assert_eq!(json["errors"], serde_json::json!([]));
    }

    proptest! {
        /// A failure built from a message alone always lists exactly that message.
        #[test]
        fn failure_error_list_is_the_message(message in ".{0,64}") {
            let outcome = Outcome::failure(message.clone());
            prop_assert_eq!(outcome.errors(), &[message.clone()][..]);
            prop_assert_eq!(outcome.message(), Some(message.as_str()));
        }

        /// No failure constructor can produce a payload.
        #[test]
        fn typed_failures_have_no_payload(message in ".{0,32}", detail in ".{0,32}") {
            let a: TypedOutcome<String> = TypedOutcome::failure(message.clone());
            let b: TypedOutcome<String> = TypedOutcome::failure_detail(message, detail);
            prop_assert!(a.data().is_none());
            prop_assert!(b.data().is_none());
        }
    }
}
