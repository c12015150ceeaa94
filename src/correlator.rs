//! Pending-call tracking and correlation-id generation.
//!
//! Every outgoing call registers a callback under a process-unique id; the
//! matching reply resolves it exactly once and removes the entry. Entries
//! are never expired: a call with no reply stays pending for the life of
//! the process, and any timeout policy belongs to the layer driving this
//! one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::codec::RpcValue;
use crate::error::Result;

/// Callback invoked exactly once with the call's outcome.
pub type ResponseCallback = Box<dyn FnOnce(Result<Vec<RpcValue>>) + Send>;

/// Tracks pending calls by correlation id.
///
/// Ids are generated from an atomic counter, so they are unique among all
/// calls of this process; the protocol requires nothing stronger than
/// uniqueness among concurrently-pending calls.
#[derive(Default)]
pub struct CallCorrelator {
    next_id: AtomicU64,
    pending: Mutex<HashMap<String, ResponseCallback>>,
}

impl CallCorrelator {
    /// Create an empty correlator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh correlation id.
    pub fn new_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("rpc:{}", n)
    }

    /// Register a pending call under the given id.
    ///
    /// Registering the same id twice is a programming error; ids issued by
    /// [`new_id`](Self::new_id) never collide.
    pub fn register(&self, id: impl Into<String>, callback: ResponseCallback) {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), callback);
        debug_assert!(previous.is_none(), "correlation id registered twice");
    }

    /// Resolve the pending call for `id`, invoking its callback with the
    /// outcome. An unknown id is ignored: the transport only hands back
    /// replies to ids it sent, so nothing can be attributed to a caller.
    ///
    /// Returns whether a pending call was found.
    pub fn resolve(&self, id: &str, outcome: Result<Vec<RpcValue>>) -> bool {
        let callback = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => {
                tracing::debug!(id, "ignoring reply for unknown call id");
                false
            }
        }
    }

    /// Number of calls still awaiting a reply.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for CallCorrelator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallCorrelator")
            .field("pending", &self.pending_count())
            .finish()
    }
}
