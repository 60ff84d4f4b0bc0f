//! # Ribbon Filter
//!
//! Immutable approximate membership filter built by banded Gaussian
//! elimination over XOR.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `Row`: the banded equation a key contributes (start, coefficients,
//!     8-bit target)
//!   - `BandedSystem`: elimination and back-substitution
//!   - `RibbonFilter`: retry driver and query evaluator
//!   - `RibbonConfig` / `RibbonConfigBuilder`: sizing and retry settings
//!   - `KeySerializer`: pluggable item → key mapping
//!
//! - **Metrics** (`metrics`): build and lookup counters
//!
//! ## Construction
//!
//! 1. Serialize items and drop duplicate keys
//! 2. Allocate `ceil(n * overhead)` byte slots (overhead ≥ 2.0 below 16 keys)
//! 3. Derive one row per key for the current seed and solve the banded system
//! 4. On an inconsistent system, increment the seed and retry, up to
//!    `max_attempts` times
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: No false negatives - every item used in construction
//!   answers `might_contain() == true`
//! - **INVARIANT-2**: FPR ≈ 1/256 for items never inserted
//! - **INVARIANT-3**: The filter is immutable once built
//!
//! ## Usage Example
//!
//! ```ignore
//! use ribbon_filter::RibbonFilter;
//!
//! let filter = RibbonFilter::new(&["apple", "banana", "cherry"])?;
//!
//! assert!(filter.might_contain(&"apple"));
//! ```
//!
//! Custom item types provide a serializer:
//!
//! ```ignore
//! use ribbon_filter::{FilterOptions, KeySerializer, RibbonFilter};
//!
//! let options = FilterOptions::new(KeySerializer::new(|p: &Point| format!("{},{}", p.x, p.y)));
//! let filter = RibbonFilter::with_options(&points, options)?;
//! ```

pub mod domain;
pub mod error;
pub mod metrics;

// Re-exports for convenience
pub use domain::{
    FilterOptions, KeySerializer, RibbonConfig, RibbonConfigBuilder, RibbonFilter,
};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
