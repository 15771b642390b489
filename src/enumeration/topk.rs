//! Running top-k maintenance across enumeration levels.

use std::cmp::Ordering;

use crate::data::IndicatorMatrix;

use super::stats::SliceStats;

/// The k highest-scoring slices seen so far, sorted by score descending.
///
/// Ties keep insertion order: an incumbent outranks a newcomer with the same
/// score, and earlier-enumerated candidates outrank later ones.
#[derive(Debug, Clone)]
pub struct TopK {
    slices: IndicatorMatrix,
    stats: Vec<SliceStats>,
}

impl TopK {
    /// Empty top-k over the given one-hot column space.
    pub fn new(num_cols: usize) -> Self {
        Self {
            slices: IndicatorMatrix::new(num_cols),
            stats: Vec::new(),
        }
    }

    /// Number of retained slices.
    #[inline]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Returns `true` if no slice has been retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Retained slices, highest score first.
    #[inline]
    pub fn slices(&self) -> &IndicatorMatrix {
        &self.slices
    }

    /// Stats aligned with [`slices`](Self::slices).
    #[inline]
    pub fn stats(&self) -> &[SliceStats] {
        &self.stats
    }

    /// Highest retained score, `-inf` when empty.
    pub fn max_score(&self) -> f64 {
        self.stats.first().map_or(f64::NEG_INFINITY, |s| s.score)
    }

    /// Lowest retained score, `-inf` when empty.
    pub fn min_score(&self) -> f64 {
        self.stats.last().map_or(f64::NEG_INFINITY, |s| s.score)
    }

    /// Score a candidate must reach to displace the current k-th slice.
    ///
    /// `-inf` while fewer than `k` slices are retained: an unfilled top-k
    /// admits anything, so nothing may be pruned against it.
    pub fn pruning_threshold(&self, k: usize) -> f64 {
        if self.stats.len() >= k {
            self.stats[k - 1].score
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Merge evaluated candidates into the top-k.
    ///
    /// Candidates below minimum support or without positive score are
    /// ignored; the rest compete with the incumbents for the `k` slots.
    pub fn merge(
        &mut self,
        candidates: &IndicatorMatrix,
        stats: &[SliceStats],
        k: usize,
        min_sup: usize,
    ) {
        debug_assert_eq!(candidates.num_rows(), stats.len());

        let mut merged: Vec<(Vec<u32>, SliceStats)> = self
            .slices
            .rows()
            .zip(self.stats.iter())
            .map(|(row, &s)| (row.to_vec(), s))
            .collect();
        let before = merged.len();
        for (i, row) in candidates.rows().enumerate() {
            let s = stats[i];
            if s.score > 0.0 && s.size >= min_sup as f64 {
                merged.push((row.to_vec(), s));
            }
        }
        if merged.len() == before {
            return;
        }

        merged.sort_by(|a, b| {
            b.1.score
                .partial_cmp(&a.1.score)
                .unwrap_or(Ordering::Equal)
        });
        merged.truncate(k);

        let mut slices = IndicatorMatrix::new(self.slices.num_cols());
        let mut sorted_stats = Vec::with_capacity(merged.len());
        for (row, s) in merged {
            slices.push_row(&row);
            sorted_stats.push(s);
        }
        self.slices = slices;
        self.stats = sorted_stats;
    }
}
