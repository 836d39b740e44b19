//! Current-caller port.
//!
//! The authentication layer validates the request's credentials and exposes
//! the result through this port. The core never sees tokens or cookies.

use crate::domain::foundation::{CallerIdentity, RequestContext};

/// Resolves who is making the in-flight request.
pub trait CurrentCaller: Send + Sync {
    /// The caller for this request; anonymous when nothing was presented or
    /// the credentials did not validate.
    fn resolve(&self) -> CallerIdentity;

    /// Convenience: a fresh request context for the resolved caller.
    fn request_context(&self) -> RequestContext {
        RequestContext::new(self.resolve())
    }
}

/// An already-resolved identity is its own caller source.
impl CurrentCaller for CallerIdentity {
    fn resolve(&self) -> CallerIdentity {
        self.clone()
    }
}
