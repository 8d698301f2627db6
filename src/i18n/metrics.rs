//! Catalog cache metrics, reported by the health endpoint.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for catalog cache activity.
#[derive(Debug, Default)]
pub struct CatalogMetrics {
    /// Number of times a catalog was served from the cache
    cache_hits: AtomicUsize,

    /// Number of times a catalog was not in the cache
    cache_misses: AtomicUsize,

    /// Number of catalog assets read and parsed successfully
    loads: AtomicUsize,

    /// Number of catalog loads that failed
    load_failures: AtomicUsize,
}

impl CatalogMetrics {
    /// Record a cache hit.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful asset load.
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed asset load.
    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            loads: self.loads.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of catalog cache metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Percentage (0-100)
    pub cache_hit_rate: f64,
    pub loads: usize,
    pub load_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = CatalogMetrics::default().report();
        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_misses, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let metrics = CatalogMetrics::default();
        metrics.record_cache_miss();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert!((report.cache_hit_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_counters() {
        let metrics = CatalogMetrics::default();
        metrics.record_load();
        metrics.record_load_failure();
        metrics.record_load();

        let report = metrics.report();
        assert_eq!(report.loads, 2);
        assert_eq!(report.load_failures, 1);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(CatalogMetrics::default().report()).unwrap();
        assert_eq!(json["loads"], 0);
        assert!(json.get("cache_hit_rate").is_some());
    }
}
