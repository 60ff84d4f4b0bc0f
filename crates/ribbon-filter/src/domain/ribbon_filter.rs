//! Ribbon filter
//!
//! Immutable approximate membership filter. Construction solves one XOR
//! equation per distinct key over a byte array; a query recomputes the key's
//! equation and checks it.
//!
//! INVARIANTS:
//! - INVARIANT-1: No false negatives - every item used in construction
//!   answers `might_contain() == true`
//! - INVARIANT-2: FPR ≈ 2^-8 for items never inserted
//! - INVARIANT-3: The solution array is never resized after construction

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::banded::{solve, SolveOutcome};
use super::config::RibbonConfig;
use super::hash_functions::{default_hash_fn, HashFn};
use super::parameters::{calculate_num_slots, expected_fpr};
use super::row::Row;
use super::serializer::KeySerializer;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Everything needed to build a `RibbonFilter<T>` besides the items
pub struct FilterOptions<T> {
    config: RibbonConfig,
    hasher: HashFn,
    serializer: KeySerializer<T>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<T> FilterOptions<T> {
    /// Default config, default hash, and the given serializer
    pub fn new(serializer: KeySerializer<T>) -> Self {
        Self {
            config: RibbonConfig::default(),
            hasher: default_hash_fn(),
            serializer,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Replace the construction settings
    pub fn with_config(mut self, config: RibbonConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the seeded hash function
    pub fn with_hasher<F>(mut self, hasher: F) -> Self
    where
        F: Fn(&[u8], u32) -> u32 + Send + Sync + 'static,
    {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Replace the item serializer
    pub fn with_serializer(mut self, serializer: KeySerializer<T>) -> Self {
        self.serializer = serializer;
        self
    }

    /// Report build and lookup events to `metrics`
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl<T: Serialize> Default for FilterOptions<T> {
    fn default() -> Self {
        Self::new(KeySerializer::json())
    }
}

/// Ribbon filter for probabilistic membership testing
///
/// Built once from a fixed item set, then queried any number of times. The
/// filter is `Send + Sync`; queries take `&self` and never mutate.
pub struct RibbonFilter<T> {
    /// One byte per slot; `len()` is the slot count
    solution: Box<[u8]>,
    /// Seed that produced a consistent system
    seed: u32,
    /// Number of distinct keys the filter was built from
    items: usize,
    /// Seeds tried, including the successful one
    attempts: u32,
    hasher: HashFn,
    serializer: KeySerializer<T>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<T: Serialize> RibbonFilter<T> {
    /// Build a filter with default options
    pub fn new(items: &[T]) -> Result<Self, FilterError> {
        Self::with_options(items, FilterOptions::default())
    }
}

impl<T> RibbonFilter<T> {
    /// Build a filter from `items`
    ///
    /// Duplicate items (equal keys) count once. Seeds are tried starting at
    /// `config.initial_seed` until one yields a consistent system or
    /// `config.max_attempts` seeds have failed.
    pub fn with_options(items: &[T], options: FilterOptions<T>) -> Result<Self, FilterError> {
        let FilterOptions {
            config,
            hasher,
            serializer,
            metrics,
        } = options;
        config.validate()?;

        let keys = distinct_keys(items, &serializer)?;
        let num_slots = calculate_num_slots(keys.len(), config.overhead_factor)?;

        let mut filter = Self {
            solution: Box::default(),
            seed: config.initial_seed,
            items: keys.len(),
            attempts: 0,
            hasher,
            serializer,
            metrics,
        };

        if keys.is_empty() {
            return Ok(filter);
        }

        let started = Instant::now();
        let mut seed = config.initial_seed;

        for attempt in 1..=config.max_attempts {
            let mut rows: Vec<Row> = keys
                .iter()
                .map(|key| Row::derive(&filter.hasher, key.as_bytes(), seed, num_slots))
                .collect();

            match solve(&mut rows, num_slots) {
                SolveOutcome::Solved(solution) => {
                    debug!(
                        seed = seed,
                        attempts = attempt,
                        slots = num_slots,
                        items = keys.len(),
                        "Ribbon filter constructed"
                    );
                    filter
                        .metrics
                        .record_filter_built(num_slots, keys.len(), started.elapsed());

                    filter.solution = solution.into_boxed_slice();
                    filter.seed = seed;
                    filter.attempts = attempt;
                    return Ok(filter);
                }
                SolveOutcome::Inconsistent { row_start } => {
                    debug!(
                        seed = seed,
                        attempt = attempt,
                        row_start = row_start,
                        "Inconsistent banded system, retrying with next seed"
                    );
                    filter.metrics.record_attempt_failed();
                    seed = seed.wrapping_add(1);
                }
            }
        }

        warn!(
            attempts = config.max_attempts,
            items = keys.len(),
            slots = num_slots,
            "Ribbon filter construction exhausted its retry budget"
        );
        filter.metrics.record_build_exhausted();

        Err(FilterError::ConstructionFailed {
            attempts: config.max_attempts,
            items: keys.len(),
            slots: num_slots,
        })
    }

    /// Test if an item might be in the filter
    ///
    /// Returns:
    /// - `true` if the item might be in the set (could be false positive)
    /// - `false` if the item is definitely NOT in the set
    ///
    /// An item the serializer rejects is reported absent: it could not have
    /// been part of a successful build.
    pub fn might_contain(&self, item: &T) -> bool {
        match self.serializer.serialize(item) {
            Ok(key) => self.might_contain_key(&key),
            Err(_) => {
                self.metrics.record_lookup(false);
                false
            }
        }
    }

    /// Test an already serialized key
    pub fn might_contain_key(&self, key: &str) -> bool {
        if self.solution.is_empty() {
            self.metrics.record_lookup(false);
            return false;
        }

        let row = Row::derive(&self.hasher, key.as_bytes(), self.seed, self.solution.len());
        let found = row.is_satisfied_by(&self.solution);
        self.metrics.record_lookup(found);
        found
    }

    /// Number of byte slots (0 for a filter built from no items)
    pub fn num_slots(&self) -> usize {
        self.solution.len()
    }

    /// Seed the filter was solved with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Seeds tried during construction, including the successful one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Number of distinct items the filter was built from
    pub fn len(&self) -> usize {
        self.items
    }

    /// Whether the filter was built from no items
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// The solved slot array
    pub fn solution(&self) -> &[u8] {
        &self.solution
    }

    /// Memory used by the slot array in bytes
    pub fn size_bytes(&self) -> usize {
        self.solution.len()
    }

    /// Filter bits spent per distinct item
    pub fn bits_per_item(&self) -> f64 {
        if self.items == 0 {
            return 0.0;
        }
        (self.solution.len() * 8) as f64 / self.items as f64
    }

    /// Ratio of distinct items to slots
    pub fn load_factor(&self) -> f64 {
        if self.solution.is_empty() {
            return 0.0;
        }
        self.items as f64 / self.solution.len() as f64
    }

    /// Expected false positive rate for items never inserted
    pub fn expected_fpr(&self) -> f64 {
        expected_fpr(self.solution.len())
    }
}

impl<T> Clone for RibbonFilter<T> {
    fn clone(&self) -> Self {
        Self {
            solution: self.solution.clone(),
            seed: self.seed,
            items: self.items,
            attempts: self.attempts,
            hasher: Arc::clone(&self.hasher),
            serializer: self.serializer.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<T> fmt::Debug for RibbonFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RibbonFilter")
            .field("num_slots", &self.solution.len())
            .field("seed", &self.seed)
            .field("items", &self.items)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// Serialize `items`, keeping the first occurrence of each key
fn distinct_keys<T>(items: &[T], serializer: &KeySerializer<T>) -> Result<Vec<String>, FilterError> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut keys = Vec::with_capacity(items.len());

    for item in items {
        let key = serializer.serialize(item)?;
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    Ok(keys)
}
