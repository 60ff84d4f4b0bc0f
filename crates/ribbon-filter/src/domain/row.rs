//! Row derivation
//!
//! A key contributes one equation to the banded system: the XOR of the
//! solution bytes selected by `coeffs` (relative to `start`) must equal
//! `target`. Rows are pure functions of `(key, seed, num_slots)`, so queries
//! recompute exactly the equation construction solved.

use super::hash_functions::HashFn;
use super::parameters::{max_start, BAND_WIDTH};

// Disjoint seed offsets for the four hashes of one row
const START_SEED_OFFSET: u32 = 100;
const COEFFS_LOW_SEED_OFFSET: u32 = 200;
const COEFFS_HIGH_SEED_OFFSET: u32 = 300;
const TARGET_SEED_OFFSET: u32 = 400;

/// One equation of the banded system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Row {
    /// First column covered by the band
    pub start: usize,
    /// Bit `i` selects column `start + i`; never zero
    pub coeffs: u64,
    /// Required XOR of the selected solution bytes
    pub target: u8,
}

impl Row {
    /// Derive the row for `key` under `seed` in a filter of `num_slots` slots
    ///
    /// `num_slots` must be non-zero.
    pub fn derive(hash: &HashFn, key: &[u8], seed: u32, num_slots: usize) -> Self {
        debug_assert!(num_slots > 0, "rows need at least one slot");

        let h_start = hash(key, seed.wrapping_add(START_SEED_OFFSET));
        let h_low = hash(key, seed.wrapping_add(COEFFS_LOW_SEED_OFFSET));
        let h_high = hash(key, seed.wrapping_add(COEFFS_HIGH_SEED_OFFSET));
        let h_target = hash(key, seed.wrapping_add(TARGET_SEED_OFFSET));

        let start = (h_start as usize) % (max_start(num_slots) + 1);
        let valid_len = BAND_WIDTH.min(num_slots - start);

        let mut coeffs = ((u64::from(h_high) << 32) | u64::from(h_low)) & band_mask(valid_len);
        if coeffs == 0 {
            coeffs = 1;
        }

        Self {
            start,
            coeffs,
            target: (h_target & 0xFF) as u8,
        }
    }

    /// XOR of the solution bytes this row selects
    ///
    /// Columns past the end of `solution` are ignored.
    pub fn evaluate(&self, solution: &[u8]) -> u8 {
        let mut acc = 0u8;
        let mut rest = self.coeffs;
        while rest != 0 {
            let column = self.start + rest.trailing_zeros() as usize;
            match solution.get(column) {
                Some(byte) => acc ^= byte,
                None => break,
            }
            rest &= rest - 1;
        }
        acc
    }

    /// Whether `solution` satisfies this row's equation
    pub fn is_satisfied_by(&self, solution: &[u8]) -> bool {
        self.evaluate(solution) == self.target
    }

    /// Absolute column indices this row selects, ascending
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        let start = self.start;
        let mut rest = self.coeffs;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let bit = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(start + bit)
        })
    }
}

/// Mask with the low `len` bits set
fn band_mask(len: usize) -> u64 {
    if len >= BAND_WIDTH {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash_functions::default_hash_fn;
    use std::sync::Arc;

    #[test]
    fn test_row_derivation_deterministic() {
        let hash = default_hash_fn();
        let a = Row::derive(&hash, b"apple", 7, 1200);
        let b = Row::derive(&hash, b"apple", 7, 1200);
        assert_eq!(a, b, "Same key and seed must yield the same row");
    }

    #[test]
    fn test_seed_changes_row() {
        let hash = default_hash_fn();
        let rows: Vec<Row> = (0..8).map(|seed| Row::derive(&hash, b"apple", seed, 1200)).collect();
        let distinct: std::collections::HashSet<_> = rows.iter().collect();
        assert!(distinct.len() > 1, "Different seeds should produce different rows");
    }

    #[test]
    fn test_rows_stay_inside_slot_array() {
        let hash = default_hash_fn();
        for num_slots in [1usize, 2, 8, 63, 64, 65, 100, 1200] {
            for i in 0..200 {
                let key = format!("key_{}", i);
                let row = Row::derive(&hash, key.as_bytes(), 0, num_slots);
                assert!(row.start <= max_start(num_slots));
                assert_ne!(row.coeffs, 0, "Coefficients must never be zero");
                assert!(
                    row.columns().all(|c| c < num_slots),
                    "Row {:?} references a column >= {}",
                    row,
                    num_slots
                );
            }
        }
    }

    #[test]
    fn test_zero_coefficients_forced_to_first_column() {
        let zero: HashFn = Arc::new(|_: &[u8], _: u32| 0);
        let row = Row::derive(&zero, b"anything", 0, 10);
        assert_eq!(row.start, 0);
        assert_eq!(row.coeffs, 1);
        assert_eq!(row.target, 0);
    }

    #[test]
    fn test_seed_offsets_route_to_fields() {
        // Echo the seed so each field shows which offset produced it
        let echo: HashFn = Arc::new(|_: &[u8], seed: u32| seed);
        let row = Row::derive(&echo, b"k", 0, 1000);
        assert_eq!(row.start, 100 % (1000 - 64 + 1));
        assert_eq!(row.coeffs, (300u64 << 32) | 200);
        assert_eq!(row.target, (400 & 0xFF) as u8);
    }

    #[test]
    fn test_short_slot_array_masks_coefficients() {
        let ones: HashFn = Arc::new(|_: &[u8], _: u32| u32::MAX);
        let row = Row::derive(&ones, b"k", 0, 5);
        assert_eq!(row.start, 0);
        assert_eq!(row.coeffs, 0b11111);
    }

    #[test]
    fn test_evaluate_xors_selected_columns() {
        let row = Row {
            start: 1,
            coeffs: 0b101,
            target: 0,
        };
        let solution = [0xFF, 0x0F, 0xAA, 0xF0];
        assert_eq!(row.evaluate(&solution), 0x0F ^ 0xF0);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_evaluate_stops_at_end_of_solution() {
        let row = Row {
            start: 2,
            coeffs: 0b111,
            target: 0x03,
        };
        assert_eq!(row.evaluate(&[0, 0, 0x01, 0x02]), 0x03);
        assert!(row.is_satisfied_by(&[0, 0, 0x01, 0x02]));
    }
}
