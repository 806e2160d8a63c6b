//! crates/clog/src/registry.rs
//! Copy-on-write set of enabled `to!` keys.
//!
//! Key sets are small and change rarely (usually once, while parsing command
//! line flags) but are consulted on every keyed log call. Mutations therefore
//! copy the whole set and publish the copy with a compare-and-swap, while
//! lookups only pin the current snapshot and probe it.

use std::collections::HashSet;
use std::fmt;

use crate::swap::SwapCell;

/// Lock-free registry of enabled keys.
///
/// Readers always observe a complete set that existed at some point in the
/// total order of modifications. Concurrent writers never block each other;
/// a writer that loses a race rebuilds its copy from the newer snapshot and
/// tries again.
pub struct KeyRegistry {
    keys: SwapCell<HashSet<String>>,
}

impl KeyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: SwapCell::new(HashSet::new()),
        }
    }

    /// Ensures `key` is enabled.
    ///
    /// Enabling a key that is already present still publishes a fresh copy.
    pub fn enable(&self, key: &str) {
        self.keys.update(|current| {
            let mut next = HashSet::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.insert(key.to_owned());
            next
        });
    }

    /// Ensures `key` is disabled.
    pub fn disable(&self, key: &str) {
        self.keys.update(|current| {
            current
                .iter()
                .filter(|existing| existing.as_str() != key)
                .cloned()
                .collect()
        });
    }

    /// Reports whether `key` is currently enabled.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.keys.read(|keys| keys.contains(key))
    }

    /// Returns the enabled keys, sorted.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys.read(|keys| keys.iter().cloned().collect());
        keys.sort_unstable();
        keys
    }

    /// Returns the number of enabled keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.read(HashSet::len)
    }

    /// Reports whether no key is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.read(HashSet::is_empty)
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.snapshot()).finish()
    }
}
