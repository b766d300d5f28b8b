//! Translation metrics and observability module.
//!
//! Each registry owns its own counters, tracking table cache efficiency and
//! how often lookups degrade to the source text.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters for a single registry.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Number of lookups served from an already loaded table
    cache_hits: AtomicUsize,

    /// Number of lookups that had to resolve and load a table first
    cache_misses: AtomicUsize,

    /// Number of cache keys for which no resource could be loaded
    missing_resources: AtomicUsize,

    /// Number of lookups whose source text had no entry in the table
    missing_entries: AtomicUsize,
}

impl RegistryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup served from cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that triggered a table load.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache key with no loadable resource.
    pub fn record_missing_resource(&self) {
        self.missing_resources.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a source text with no translation entry.
    pub fn record_missing_entry(&self) {
        self.missing_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn missing_resources(&self) -> usize {
        self.missing_resources.load(Ordering::Relaxed)
    }

    pub fn missing_entries(&self) -> usize {
        self.missing_entries.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_lookups = hits + misses;
        let cache_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            missing_resources: self.missing_resources(),
            missing_entries: self.missing_entries(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.missing_resources.store(0, Ordering::Relaxed);
        self.missing_entries.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of a registry's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of cache hits
    pub cache_hits: usize,

    /// Number of cache misses
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    /// Number of cache keys without a translation resource
    pub missing_resources: usize,

    /// Number of lookups without a translation entry
    pub missing_entries: usize,
}
