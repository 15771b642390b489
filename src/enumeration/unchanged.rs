//! Detection of prior-lattice slices untouched by newly added rows.
//!
//! A slice from a prior run whose predicate set no added row satisfies keeps
//! its prior statistics exactly. Such slices need no re-enumeration when
//! their prior size was already below minimum support: appending rows they
//! do not match cannot raise their size.

use crate::data::{contains_all, IndicatorMatrix};

use super::stats::{LatticeStats, SliceStats};

/// Untouched slices of one prior-lattice level, with their prior stats.
#[derive(Debug, Clone)]
pub struct UnchangedLevel {
    pub slices: IndicatorMatrix,
    pub stats: Vec<SliceStats>,
}

/// Per-level lists of prior-lattice slices no added row satisfies.
///
/// Levels start at 2: 1-predicate slices are re-selected wholesale by the
/// basic-slice builder and need no unchanged bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct UnchangedSlices {
    levels: Vec<UnchangedLevel>,
}

impl UnchangedSlices {
    /// No prior run: nothing is unchanged.
    pub fn none() -> Self {
        Self::default()
    }

    /// Scan the encoded prior lattice level by level against the added rows.
    ///
    /// `prev_lattice2` must be encoded in the current one-hot column space;
    /// its level boundaries come from the prior run's per-level row counts.
    /// Rows `added_start..` of `x2` are the newly added ones.
    pub fn detect(
        prev_lattice2: &IndicatorMatrix,
        prev_stats: &LatticeStats,
        x2: &IndicatorMatrix,
        added_start: usize,
    ) -> Self {
        let mut levels = Vec::new();
        for level in 2..=prev_stats.num_levels() {
            let mut slices = IndicatorMatrix::new(prev_lattice2.num_cols());
            let mut stats = Vec::new();
            for idx in prev_stats.level_rows(level) {
                let slice = prev_lattice2.row(idx);
                let touched =
                    (added_start..x2.num_rows()).any(|i| contains_all(x2.row(i), slice));
                if !touched {
                    slices.push_row(slice);
                    stats.push(prev_stats.stats()[idx]);
                }
            }
            levels.push(UnchangedLevel { slices, stats });
        }
        Self { levels }
    }

    /// Unchanged slices at the given level (2-based), if recorded.
    pub fn at_level(&self, level: usize) -> Option<&UnchangedLevel> {
        if level < 2 {
            return None;
        }
        self.levels.get(level - 2)
    }
}
