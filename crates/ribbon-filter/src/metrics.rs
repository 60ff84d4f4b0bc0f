//! Metrics hooks for Ribbon filter construction and lookups
//!
//! ## Usage
//!
//! ```ignore
//! use ribbon_filter::{FilterOptions, Metrics, RibbonFilter};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let options = FilterOptions::default().with_metrics(metrics.clone());
//! let filter = RibbonFilter::with_options(&["a", "b"], options)?;
//!
//! filter.might_contain(&"a");
//! assert_eq!(metrics.snapshot().lookups_performed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for Ribbon filter operations
///
/// Thread-safe counters, shareable across filters.
#[derive(Default)]
pub struct Metrics {
    /// Filters successfully built
    pub filters_built: AtomicU64,
    /// Distinct items across all built filters
    pub items_indexed: AtomicU64,
    /// Solution bytes across all built filters
    pub slots_allocated: AtomicU64,
    /// Seeds whose system turned out inconsistent
    pub attempts_failed: AtomicU64,
    /// Builds that spent their whole retry budget
    pub builds_exhausted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Lookups answered "possibly present"
    pub lookups_positive: AtomicU64,
    /// Cumulative successful build time in nanoseconds
    pub build_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful build
    pub fn record_filter_built(&self, num_slots: usize, items: usize, duration: Duration) {
        self.filters_built.fetch_add(1, Ordering::Relaxed);
        self.items_indexed.fetch_add(items as u64, Ordering::Relaxed);
        self.slots_allocated.fetch_add(num_slots as u64, Ordering::Relaxed);
        self.build_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a seed whose system was inconsistent
    pub fn record_attempt_failed(&self) {
        self.attempts_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a build that gave up
    pub fn record_build_exhausted(&self) {
        self.builds_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record lookup outcome
    pub fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_built: self.filters_built.load(Ordering::Relaxed),
            items_indexed: self.items_indexed.load(Ordering::Relaxed),
            slots_allocated: self.slots_allocated.load(Ordering::Relaxed),
            attempts_failed: self.attempts_failed.load(Ordering::Relaxed),
            builds_exhausted: self.builds_exhausted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            avg_build_ns: self.avg_build_time_ns(),
        }
    }

    /// Average successful build time in nanoseconds
    pub fn avg_build_time_ns(&self) -> u64 {
        let total = self.build_time_ns.load(Ordering::Relaxed);
        let count = self.filters_built.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives, so it only approximates the FPR when the
    /// queried items are known non-members.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_built.store(0, Ordering::Relaxed);
        self.items_indexed.store(0, Ordering::Relaxed);
        self.slots_allocated.store(0, Ordering::Relaxed);
        self.attempts_failed.store(0, Ordering::Relaxed);
        self.builds_exhausted.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.build_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default)]
pub struct MetricsSnapshot {
    pub filters_built: u64,
    pub items_indexed: u64,
    pub slots_allocated: u64,
    pub attempts_failed: u64,
    pub builds_exhausted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub avg_build_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter events to an external metrics
/// system.
pub trait MetricsRecorder: Send + Sync {
    /// Record a successful build
    fn record_filter_built(&self, num_slots: usize, items: usize, duration: Duration);

    /// Record a seed whose system was inconsistent
    fn record_attempt_failed(&self);

    /// Record a build that gave up
    fn record_build_exhausted(&self);

    /// Record lookup outcome
    fn record_lookup(&self, found: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_built(&self, _: usize, _: usize, _: Duration) {}
    fn record_attempt_failed(&self) {}
    fn record_build_exhausted(&self) {}
    fn record_lookup(&self, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_built(&self, num_slots: usize, items: usize, duration: Duration) {
        Metrics::record_filter_built(self, num_slots, items, duration);
    }

    fn record_attempt_failed(&self) {
        Metrics::record_attempt_failed(self);
    }

    fn record_build_exhausted(&self) {
        Metrics::record_build_exhausted(self);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }
}
