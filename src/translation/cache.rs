//! Bounded, least-recently-used translation cache.
//!
//! Safe to share between threads; every operation takes the internal lock
//! for the duration of a single map operation and never across an `.await`.

use crate::translation::{TranslationCandidate, TranslationKey};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capacity used by `TranslationCache::new`.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

pub struct TranslationCache {
    entries: Mutex<LruCache<TranslationKey, TranslationCandidate>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached candidate and mark it most recently used.
    pub fn get(&self, key: &TranslationKey) -> Option<TranslationCandidate> {
        self.lock().get(key).cloned()
    }

    /// Insert or overwrite an entry, evicting the least recently used entry
    /// when the cache is full.
    pub fn put(&self, key: TranslationKey, candidate: TranslationCandidate) {
        self.lock().put(key, candidate);
    }

    /// Remove an entry, returning it if it was present.
    pub fn invalidate(&self, key: &TranslationKey) -> Option<TranslationCandidate> {
        self.lock().pop(key)
    }

    /// Presence check that does not touch recency.
    pub fn contains(&self, key: &TranslationKey) -> bool {
        self.lock().contains(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    // Poisoning is ignored: entries are independent and cheap to recompute.
    fn lock(&self) -> MutexGuard<'_, LruCache<TranslationKey, TranslationCandidate>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}
