//! Counters for the outcomes of the resolution protocol.
//!
//! Each resolver owns its own `TranslationMetrics`, so isolated resolvers in
//! tests never share counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,

    /// Cached entries evicted because they failed re-validation
    cache_invalidations: AtomicUsize,

    lexicon_hits: AtomicUsize,

    /// Round trips to the remote client, pivot hops and alternate sources included
    api_calls: AtomicUsize,

    /// Round trips that yielded no acceptable candidate
    api_unavailable: AtomicUsize,

    pivot_successes: AtomicUsize,

    /// Requests answered with the untranslated input
    exhausted: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::Relaxed)
}

/// `part / whole` as a percentage, 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        bump(&self.cache_hits);
    }

    pub fn record_cache_miss(&self) {
        bump(&self.cache_misses);
    }

    pub fn record_cache_invalidation(&self) {
        bump(&self.cache_invalidations);
    }

    pub fn record_lexicon_hit(&self) {
        bump(&self.lexicon_hits);
    }

    pub fn record_api_call(&self) {
        bump(&self.api_calls);
    }

    pub fn record_api_unavailable(&self) {
        bump(&self.api_unavailable);
    }

    pub fn record_pivot_success(&self) {
        bump(&self.pivot_successes);
    }

    pub fn record_exhausted(&self) {
        bump(&self.exhausted);
    }

    pub fn cache_hits(&self) -> usize {
        read(&self.cache_hits)
    }

    pub fn cache_misses(&self) -> usize {
        read(&self.cache_misses)
    }

    pub fn api_calls(&self) -> usize {
        read(&self.api_calls)
    }

    pub fn api_unavailable(&self) -> usize {
        read(&self.api_unavailable)
    }

    /// Point-in-time copy of every counter plus derived rates.
    pub fn report(&self) -> MetricsReport {
        let cache_hits = self.cache_hits();
        let cache_misses = self.cache_misses();
        let api_calls = self.api_calls();
        // Counters are read independently; never report more failures than calls
        let api_unavailable = self.api_unavailable().min(api_calls);

        MetricsReport {
            cache_hits,
            cache_misses,
            cache_hit_rate: percentage(cache_hits, cache_hits + cache_misses),
            cache_invalidations: read(&self.cache_invalidations),
            lexicon_hits: read(&self.lexicon_hits),
            api_calls,
            api_unavailable,
            api_success_rate: percentage(api_calls - api_unavailable, api_calls),
            pivot_successes: read(&self.pivot_successes),
            exhausted: read(&self.exhausted),
        }
    }
}

/// Serializable snapshot of `TranslationMetrics`. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_hit_rate: f64,
    pub cache_invalidations: usize,
    pub lexicon_hits: usize,
    pub api_calls: usize,
    pub api_unavailable: usize,
    pub api_success_rate: f64,
    pub pivot_successes: usize,
    pub exhausted: usize,
}
