//! Ribbon filter sizing
//!
//! Formulas:
//! - slots = ceil(n * overhead), 0 when n = 0
//! - overhead is raised to 2.0 when n < 16
//! - FPR ≈ 2^-r for an r-bit fingerprint
//! - slots never exceed `MAX_SLOTS`

use crate::error::FilterError;

/// Number of columns a single row may span (width of the band)
pub const BAND_WIDTH: usize = 64;

/// Fingerprint size in bits (one solution byte per slot)
pub const FINGERPRINT_BITS: u32 = 8;

/// Inputs with fewer distinct items than this use the small-input overhead
pub const SMALL_INPUT_THRESHOLD: usize = 16;

/// Minimum overhead applied below `SMALL_INPUT_THRESHOLD`
pub const SMALL_INPUT_MIN_OVERHEAD: f64 = 2.0;

/// Largest slot array a filter may allocate
///
/// Row starts are reduced from a 32-bit hash, so no row can begin past
/// `u32::MAX`. The pivot table also has to stay addressable.
pub const MAX_SLOTS: usize = {
    let addressable = isize::MAX as usize / 16;
    if addressable < u32::MAX as usize {
        addressable
    } else {
        u32::MAX as usize
    }
};

/// Overhead actually used for `distinct_items` keys
pub fn effective_overhead(distinct_items: usize, overhead_factor: f64) -> f64 {
    if distinct_items < SMALL_INPUT_THRESHOLD && overhead_factor < SMALL_INPUT_MIN_OVERHEAD {
        SMALL_INPUT_MIN_OVERHEAD
    } else {
        overhead_factor
    }
}

/// Number of byte slots allocated for `distinct_items` keys
///
/// Fails with `InvalidParameters` when the slot count is not finite or
/// exceeds `MAX_SLOTS`.
pub fn calculate_num_slots(distinct_items: usize, overhead_factor: f64) -> Result<usize, FilterError> {
    if distinct_items == 0 {
        return Ok(0);
    }
    let overhead = effective_overhead(distinct_items, overhead_factor);
    let slots = (distinct_items as f64 * overhead).ceil();

    if !slots.is_finite() || slots > MAX_SLOTS as f64 {
        return Err(FilterError::InvalidParameters(format!(
            "{} items with overhead {} need {} slots (max {})",
            distinct_items, overhead_factor, slots, MAX_SLOTS
        )));
    }

    Ok(slots as usize)
}

/// Largest row start that keeps a full band inside the slot array
pub fn max_start(num_slots: usize) -> usize {
    num_slots.saturating_sub(BAND_WIDTH)
}

/// Expected false positive rate of a filter with `num_slots` slots
pub fn expected_fpr(num_slots: usize) -> f64 {
    if num_slots == 0 {
        return 0.0;
    }
    1.0 / f64::from(1u32 << FINGERPRINT_BITS)
}
