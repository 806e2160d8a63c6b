//! crates/clog/src/swap.rs
//! Atomic replace-whole-value cell shared by the key registry, sink handle,
//! formatter slot and exit hook.
//!
//! Readers load an immutable snapshot; writers build a complete replacement
//! and publish it with a single pointer swap or compare-and-swap. Snapshots
//! are reclaimed through crossbeam's epoch collector once no pinned reader
//! can still observe them.

#![allow(unsafe_code)]

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crossbeam::epoch::{self, Atomic, Owned};

/// Lock-free cell holding one `Arc<T>` snapshot at a time.
pub(crate) struct SwapCell<T> {
    current: Atomic<Arc<T>>,
}

impl<T> SwapCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            current: Atomic::new(Arc::new(value)),
        }
    }

    /// Runs `f` against the current snapshot without cloning it.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = &epoch::pin();
        let shared = self.current.load(Ordering::Acquire, guard);
        // SAFETY: the pointer is never null (set in `new`, only ever replaced
        // by owned values) and the pinned guard keeps it from being reclaimed.
        let snapshot = unsafe { shared.deref() };
        f(snapshot.as_ref())
    }

    /// Returns a shared handle to the current snapshot.
    pub(crate) fn load(&self) -> Arc<T> {
        let guard = &epoch::pin();
        let shared = self.current.load(Ordering::Acquire, guard);
        // SAFETY: see `read`.
        Arc::clone(unsafe { shared.deref() })
    }

    /// Unconditionally publishes `value`, last writer wins.
    pub(crate) fn store(&self, value: T) {
        let guard = &epoch::pin();
        let previous = self
            .current
            .swap(Owned::new(Arc::new(value)), Ordering::AcqRel, guard);
        // SAFETY: `previous` is unlinked; readers pinned before the swap still
        // hold the epoch open, so destruction is deferred past them.
        unsafe { guard.defer_destroy(previous) };
    }

    /// Copy-on-write update under a compare-and-swap retry loop.
    ///
    /// `next` receives the snapshot observed at the start of each attempt and
    /// must return a complete replacement. Returns the number of attempts.
    pub(crate) fn update(&self, mut next: impl FnMut(&T) -> T) -> usize {
        let guard = &epoch::pin();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let observed = self.current.load(Ordering::Acquire, guard);
            // SAFETY: see `read`.
            let replacement = next(unsafe { observed.deref() }.as_ref());
            match self.current.compare_exchange(
                observed,
                Owned::new(Arc::new(replacement)),
                Ordering::AcqRel,
                Ordering::Acquire,
                guard,
            ) {
                Ok(_) => {
                    // SAFETY: `observed` was unlinked by the successful exchange.
                    unsafe { guard.defer_destroy(observed) };
                    return attempts;
                }
                Err(_) => continue,
            }
        }
    }
}

impl<T> Drop for SwapCell<T> {
    fn drop(&mut self) {
        // SAFETY: `&mut self` proves no other thread can reach the cell.
        unsafe {
            let guard = epoch::unprotected();
            let current = self.current.load(Ordering::Relaxed, guard);
            if !current.is_null() {
                drop(current.into_owned());
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SwapCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|value| f.debug_tuple("SwapCell").field(value).finish())
    }
}
