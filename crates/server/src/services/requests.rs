//! In-flight request tracking for duplicate submission protection.
//!
//! Mutating admin requests may carry an `x-request-id` header. While a
//! request with a given id is being processed, a second request with the same
//! id is rejected. The set is process-local and empties on restart; it guards
//! against double-clicks and client retries racing each other, not against
//! replays across deployments.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Tracks request ids currently being processed.
#[derive(Debug, Clone, Default)]
pub struct InflightRequests {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl InflightRequests {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim a request id.
    ///
    /// Returns a guard when the id was not already in flight; the guard
    /// releases the id on drop, whether the request succeeds or fails.
    /// Returns `None` when another request holding the same id has not
    /// finished yet.
    #[must_use]
    pub fn begin(&self, request_id: &str) -> Option<InflightGuard> {
        let mut set = self.lock();
        if set.insert(request_id.to_owned()) {
            Some(InflightGuard {
                inner: Arc::clone(&self.inner),
                request_id: request_id.to_owned(),
            })
        } else {
            None
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned set only means some request panicked mid-flight; the
        // ids it held are still accurate enough to keep serving.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its request id when dropped.
#[derive(Debug)]
pub struct InflightGuard {
    inner: Arc<Mutex<HashSet<String>>>,
    request_id: String,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        let mut set = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        set.remove(&self.request_id);
    }
}
