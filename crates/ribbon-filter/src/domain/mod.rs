//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Seeded hash functions
//! - Row derivation (key -> banded equation)
//! - Banded system elimination and back-substitution
//! - Sizing parameters
//! - Configuration
//! - Item serialization
//! - The Ribbon filter itself (retry driver + query evaluator)
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod banded;
pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod ribbon_filter;
pub mod row;
pub mod serializer;

pub use banded::{solve, BandedSystem, Elimination, SolveOutcome};
pub use config::{RibbonConfig, RibbonConfigBuilder, DEFAULT_MAX_ATTEMPTS, DEFAULT_OVERHEAD_FACTOR};
pub use hash_functions::{default_hash_fn, fnv1a_hash, murmur3_hash, HashFn};
pub use parameters::{
    calculate_num_slots, effective_overhead, expected_fpr, BAND_WIDTH, FINGERPRINT_BITS, MAX_SLOTS,
    SMALL_INPUT_MIN_OVERHEAD, SMALL_INPUT_THRESHOLD,
};
pub use ribbon_filter::{FilterOptions, RibbonFilter};
pub use row::Row;
pub use serializer::{json_key, KeySerializer};
