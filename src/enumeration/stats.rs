//! Per-slice statistics and the level-grouped lattice record.

use crate::data::DenseMatrix;

/// Statistics of a single slice, measured over the full dataset.
///
/// Column order when exported as a matrix row: score, total error, maximum
/// tuple error, size. All four are carried as doubles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceStats {
    /// Weighted combination of relative error lift and relative size.
    pub score: f64,
    /// Sum of errors over the rows matching the slice.
    pub total_error: f64,
    /// Maximum single-row error among the matching rows.
    pub max_error: f64,
    /// Number of rows matching the slice.
    pub size: f64,
}

impl SliceStats {
    /// A slice is valid when it meets minimum support with positive error.
    /// Only valid slices act as join parents or enter the top-k.
    #[inline]
    pub fn is_valid(&self, min_sup: usize) -> bool {
        self.size >= min_sup as f64 && self.total_error > 0.0
    }
}

/// Export stats rows as a dense 4-column matrix (score, totalError,
/// maxError, size).
pub fn stats_to_matrix(stats: &[SliceStats]) -> DenseMatrix<f64> {
    let mut data = Vec::with_capacity(stats.len() * 4);
    for s in stats {
        data.extend_from_slice(&[s.score, s.total_error, s.max_error, s.size]);
    }
    DenseMatrix::from_vec(data, stats.len(), 4)
}

/// Statistics for every slice in the lattice, grouped by level.
///
/// Stored as one flat stats sequence plus per-level row counts; level `l`
/// occupies the row range given by the cumulative counts. This composes
/// directly with row-slicing a prior lattice during unchanged-slice
/// detection.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeStats {
    stats: Vec<SliceStats>,
    level_counts: Vec<usize>,
}

impl LatticeStats {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the stats of the next level's slices.
    pub fn push_level(&mut self, level_stats: &[SliceStats]) {
        self.stats.extend_from_slice(level_stats);
        self.level_counts.push(level_stats.len());
    }

    /// All stats rows, in lattice order.
    #[inline]
    pub fn stats(&self) -> &[SliceStats] {
        &self.stats
    }

    /// Number of recorded slices.
    #[inline]
    pub fn num_slices(&self) -> usize {
        self.stats.len()
    }

    /// Number of recorded levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.level_counts.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Row range of level `level` (1-based) in the flat lattice order.
    ///
    /// # Panics
    ///
    /// Panics if the level has not been recorded.
    pub fn level_rows(&self, level: usize) -> std::ops::Range<usize> {
        assert!(
            level >= 1 && level <= self.level_counts.len(),
            "Level {} not recorded",
            level
        );
        let start: usize = self.level_counts[..level - 1].iter().sum();
        start..start + self.level_counts[level - 1]
    }
}
