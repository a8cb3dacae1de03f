use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag for aborting a running search from outside the step loop.
///
/// Clones share the same flag. The engine checks it at the start of every
/// step and clears it when a new search begins.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current search.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}
