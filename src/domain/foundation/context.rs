//! Per-request context passed to every handler.
//!
//! Instead of each handler accepting the caller, a correlation id and a
//! cancellation signal separately, they accept one `RequestContext`.

use uuid::Uuid;

use super::{CallerIdentity, CancellationSignal};

/// Context for one in-flight request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The resolved caller (possibly anonymous).
    pub caller: CallerIdentity,

    /// Links log lines belonging to one request.
    correlation_id: Option<String>,

    /// Aborts the request before its persist step.
    cancellation: CancellationSignal,
}

impl RequestContext {
    /// Creates a context for the given caller with no cancellation source.
    pub fn new(caller: CallerIdentity) -> Self {
        Self {
            caller,
            correlation_id: None,
            cancellation: CancellationSignal::never(),
        }
    }

    /// Context for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::new(CallerIdentity::anonymous())
    }

    /// Builder: add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: attach a cancellation signal.
    pub fn with_cancellation(mut self, signal: CancellationSignal) -> Self {
        self.cancellation = signal;
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn cancellation(&self) -> &CancellationSignal {
        &self.cancellation
    }
}
