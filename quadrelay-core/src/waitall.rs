//! N-shot completion barrier.
//!
//! `WaitAll<T>` rendezvous a fixed number of sibling completions before
//! releasing a shared payload exactly once. This is the generalized,
//! `Arc`-based translation of the continuation-passing wait-all pattern:
//! the original owns one heap record per barrier and frees it when the
//! last sibling's callback fires. Here the record is an `Arc<WaitAll<T>>`
//! whose last clone to call `arrive` gets the payload; earlier arrivals
//! get `None` and simply drop their handle.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A barrier over exactly `count` sibling completions.
///
/// Construct with [`WaitAll::new`], clone the returned `Arc` once per
/// sibling operation, and call [`WaitAll::arrive`] from each sibling's
/// completion handler. The payload is handed back to whichever arrival
/// happens to be last; every other arrival observes `None`.
pub struct WaitAll<T> {
    remaining: AtomicUsize,
    payload: T,
}

impl<T> WaitAll<T> {
    /// Build a barrier for `count` outstanding completions.
    ///
    /// `count` must be nonzero; a barrier for zero completions has no
    /// sensible caller in this codebase (see the game-start rendezvous
    /// in `Room`, which always waits on exactly two peer writes).
    #[must_use]
    pub fn new(count: usize, payload: T) -> Self {
        debug_assert!(count > 0, "WaitAll with zero sibling completions");
        Self {
            remaining: AtomicUsize::new(count),
            payload,
        }
    }

    /// Record one sibling's arrival. Returns the payload iff this was the
    /// last arrival; otherwise returns `None` and the caller should just
    /// drop its `Arc` clone.
    pub fn arrive(self: &std::sync::Arc<Self>) -> Option<&T> {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            Some(&self.payload)
        } else {
            None
        }
    }
}
