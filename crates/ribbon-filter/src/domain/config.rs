//! Ribbon filter construction settings
//!
//! # Example
//!
//! ```ignore
//! use ribbon_filter::domain::RibbonConfigBuilder;
//!
//! let config = RibbonConfigBuilder::new()
//!     .overhead_factor(1.5)
//!     .max_attempts(32)
//!     .build()
//!     .expect("Valid config");
//! ```

use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// Default ratio of slots to distinct items
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 1.2;

/// Default number of seeds tried before construction gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Ribbon filter construction settings
///
/// The hash function and key serializer are behaviour, not data, and live in
/// `FilterOptions` instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Slots allocated per distinct item (raised to 2.0 below 16 items)
    pub overhead_factor: f64,
    /// Seeds tried before reporting `FilterError::ConstructionFailed`
    pub max_attempts: u32,
    /// First seed tried; later attempts increment it
    pub initial_seed: u32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_seed: 0,
        }
    }
}

impl RibbonConfig {
    /// Create a new configuration with validation
    pub fn new(overhead_factor: f64, max_attempts: u32, initial_seed: u32) -> Result<Self, FilterError> {
        let config = Self {
            overhead_factor,
            max_attempts,
            initial_seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.overhead_factor.is_finite() || self.overhead_factor <= 0.0 {
            return Err(FilterError::InvalidOverhead {
                overhead: self.overhead_factor,
            });
        }

        if self.max_attempts == 0 {
            return Err(FilterError::InvalidParameters(
                "max_attempts cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the overhead factor
    pub fn with_overhead_factor(mut self, overhead: f64) -> Self {
        self.overhead_factor = overhead;
        self
    }

    /// Builder-style method to set the retry budget
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Builder-style method to force the first seed
    pub fn with_initial_seed(mut self, seed: u32) -> Self {
        self.initial_seed = seed;
        self
    }
}

/// Builder for RibbonConfig with validation
#[derive(Default)]
pub struct RibbonConfigBuilder {
    overhead_factor: Option<f64>,
    max_attempts: Option<u32>,
    initial_seed: Option<u32>,
}

impl RibbonConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slots per distinct item (must be finite and > 0)
    pub fn overhead_factor(mut self, overhead: f64) -> Self {
        self.overhead_factor = Some(overhead);
        self
    }

    /// Set the number of seeds tried before giving up (must be > 0)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Set the first seed tried
    pub fn initial_seed(mut self, seed: u32) -> Self {
        self.initial_seed = Some(seed);
        self
    }

    /// Build the RibbonConfig, validating all parameters
    pub fn build(self) -> Result<RibbonConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> RibbonConfig {
        let defaults = RibbonConfig::default();

        RibbonConfig {
            overhead_factor: self.overhead_factor.unwrap_or(defaults.overhead_factor),
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            initial_seed: self.initial_seed.unwrap_or(defaults.initial_seed),
        }
    }
}
