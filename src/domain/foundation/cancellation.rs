//! Cooperative cancellation for in-flight requests.
//!
//! Built on a `tokio::sync::watch` channel. Handlers consult the signal only
//! up to the persist step; once a commit is initiated it runs to completion.

use std::sync::Arc;

use tokio::sync::watch;

use super::{DomainError, ErrorCode};

/// Sender half, held by whoever may abort the request.
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationHandle {
    /// Marks the request as cancelled. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiver half, carried in the request context.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    rx: watch::Receiver<bool>,
}

impl CancellationSignal {
    /// Creates a linked handle/signal pair.
    pub fn pair() -> (CancellationHandle, CancellationSignal) {
        let (tx, rx) = watch::channel(false);
        (
            CancellationHandle { tx: Arc::new(tx) },
            CancellationSignal { rx },
        )
    }

    /// A signal that can never fire.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // A closed channel keeps its last value.
        drop(tx);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Returns `Err(Cancelled)` if the request has been aborted.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            Err(DomainError::new(
                ErrorCode::Cancelled,
                "Request cancelled before persistence",
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::never()
    }
}
