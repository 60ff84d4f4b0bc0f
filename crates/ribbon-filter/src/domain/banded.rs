//! # Banded System Solver
//!
//! Solves the XOR system built from a filter's rows: one equation per key,
//! one byte variable per slot. Each row only touches a window of
//! `BAND_WIDTH` columns starting at `row.start`.
//!
//! ## Algorithm
//!
//! 1. Sort rows by `start`
//! 2. Eliminate: repeatedly clear the row's lowest set bit with the pivot
//!    registered at that column, until the row becomes a new pivot or
//!    vanishes
//! 3. A vanished row with a non-zero target makes the system inconsistent
//! 4. Back-substitute from the highest column down
//!
//! Sorting by start keeps every pivot inside the band of the rows processed
//! after it, so elimination costs O(n · W) and coefficients always fit in a
//! `u64`.
//!
//! ## Invariants
//!
//! - At most one pivot per column
//! - A pivot's lowest coefficient bit is its own column
//! - After a successful solve, every input row is satisfied by the solution

use super::row::Row;

/// Result of solving one seed's system
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Consistent system; one solution byte per slot
    Solved(Vec<u8>),
    /// A row reduced to `0 = target` with a non-zero target
    Inconsistent {
        /// Start of the row that could not be satisfied
        row_start: usize,
    },
}

/// What happened to a row during elimination
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elimination {
    /// The row became the pivot for this column
    Pivot(usize),
    /// The row was a combination of existing pivots with a matching target
    Redundant,
    /// The row was a combination of existing pivots with a conflicting target
    Inconsistent,
}

/// Row normalized so its lowest bit sits at its own column
#[derive(Clone, Copy, Debug)]
struct Pivot {
    coeffs: u64,
    target: u8,
}

/// Incremental elimination state for one construction attempt
#[derive(Debug)]
pub struct BandedSystem {
    pivots: Vec<Option<Pivot>>,
    last_start: usize,
}

impl BandedSystem {
    /// Create an empty system over `num_slots` columns
    pub fn new(num_slots: usize) -> Self {
        Self {
            pivots: vec![None; num_slots],
            last_start: 0,
        }
    }

    /// Number of columns
    pub fn num_slots(&self) -> usize {
        self.pivots.len()
    }

    /// Number of columns that currently hold a pivot
    pub fn pivot_count(&self) -> usize {
        self.pivots.iter().filter(|p| p.is_some()).count()
    }

    /// Eliminate `row` against the registered pivots
    ///
    /// Rows must be added in non-decreasing `start` order.
    pub fn add_row(&mut self, row: &Row) -> Elimination {
        debug_assert!(row.start >= self.last_start, "rows must be sorted by start");
        self.last_start = row.start;

        let mut coeffs = row.coeffs;
        let mut target = row.target;

        while coeffs != 0 {
            let bit = coeffs.trailing_zeros() as usize;
            let column = row.start + bit;

            let Some(slot) = self.pivots.get_mut(column) else {
                // Outside the slot array; the column does not participate
                coeffs &= coeffs - 1;
                continue;
            };

            match *slot {
                Some(pivot) => {
                    debug_assert!(pivot.coeffs.leading_zeros() as usize >= bit);
                    coeffs ^= pivot.coeffs << bit;
                    target ^= pivot.target;
                }
                None => {
                    *slot = Some(Pivot {
                        coeffs: coeffs >> bit,
                        target,
                    });
                    return Elimination::Pivot(column);
                }
            }
        }

        if target == 0 {
            Elimination::Redundant
        } else {
            Elimination::Inconsistent
        }
    }

    /// Resolve every column, highest first
    ///
    /// Columns without a pivot are free and resolve to 0.
    pub fn back_substitute(&self) -> Vec<u8> {
        let mut solution = vec![0u8; self.pivots.len()];

        for column in (0..self.pivots.len()).rev() {
            let Some(pivot) = self.pivots[column] else {
                continue;
            };

            let mut value = pivot.target;
            let mut rest = pivot.coeffs >> 1;
            while rest != 0 {
                let other = column + 1 + rest.trailing_zeros() as usize;
                if let Some(byte) = solution.get(other) {
                    value ^= byte;
                }
                rest &= rest - 1;
            }
            solution[column] = value;
        }

        solution
    }
}

/// Sort `rows` by start and solve the system they define
pub fn solve(rows: &mut [Row], num_slots: usize) -> SolveOutcome {
    rows.sort_by_key(|row| row.start);

    let mut system = BandedSystem::new(num_slots);
    for row in rows.iter() {
        if system.add_row(row) == Elimination::Inconsistent {
            return SolveOutcome::Inconsistent {
                row_start: row.start,
            };
        }
    }

    SolveOutcome::Solved(system.back_substitute())
}
