//! Error types for the Ribbon filter crate

use thiserror::Error;

/// Errors that can occur while building a Ribbon filter
///
/// An unsolvable system for a single seed is not an error: construction
/// retries with the next seed and only reports `ConstructionFailed` once the
/// attempt budget is spent.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Failed to construct ribbon filter after {attempts} attempts ({items} items, {slots} slots)")]
    ConstructionFailed {
        attempts: u32,
        items: usize,
        slots: usize,
    },

    #[error("Invalid overhead factor: {overhead} (must be finite and > 0)")]
    InvalidOverhead { overhead: f64 },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::SerializationError(err.to_string())
    }
}
