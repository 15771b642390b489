//! Level-1 slice construction from per-column statistics.

use crate::data::IndicatorMatrix;

use super::scoring::ScoreContext;
use super::stats::SliceStats;

/// Scored 1-predicate slices plus the column selection mask.
#[derive(Debug, Clone)]
pub struct BasicSlices {
    /// One slice per surviving one-hot column, in column order.
    pub slices: IndicatorMatrix,
    /// Stats aligned with `slices`.
    pub stats: Vec<SliceStats>,
    /// Which one-hot columns survived the selection filter.
    pub selected: Vec<bool>,
}

/// Build and score all surviving 1-predicate slices.
///
/// A column survives when it meets minimum support with positive total
/// error. On incremental runs where the added rows lowered the average error
/// (`e_avg_old > e_avg_new`, with a non-empty prior top-k and non-zero
/// `e_avg_new`), a column must additionally be touched by an added row or
/// occur in the prior top-k: untouched columns cannot improve their relative
/// error lift under a dropping average, so they cannot newly enter the
/// top-k.
///
/// Rows `added_start..` of `x2` are the newly added ones.
pub fn create_basic_slices(
    x2: &IndicatorMatrix,
    added_start: usize,
    prev_tk2: &IndicatorMatrix,
    errors: &[f64],
    ctx: &ScoreContext,
    e_avg_old: f64,
    e_avg_new: f64,
) -> BasicSlices {
    let n2 = x2.num_cols();
    let mut counts = vec![0usize; n2];
    let mut err = vec![0.0f64; n2];
    let mut merr = vec![0.0f64; n2];
    let mut added_counts = vec![0usize; n2];

    for (i, row) in x2.rows().enumerate() {
        let e = errors[i];
        for &c in row {
            let c = c as usize;
            counts[c] += 1;
            err[c] += e;
            if e > merr[c] {
                merr[c] = e;
            }
            if i >= added_start {
                added_counts[c] += 1;
            }
        }
    }

    let mut tk_cols = vec![false; n2];
    for row in prev_tk2.rows() {
        for &c in row {
            tk_cols[c as usize] = true;
        }
    }

    let tighten = e_avg_old > e_avg_new && e_avg_new != 0.0 && !prev_tk2.is_empty();

    let mut selected = vec![false; n2];
    let mut slices = IndicatorMatrix::new(n2);
    let mut stats = Vec::new();
    for c in 0..n2 {
        let base = counts[c] >= ctx.min_sup && err[c] > 0.0;
        let sel = base && (!tighten || added_counts[c] > 0 || tk_cols[c]);
        selected[c] = sel;
        if sel {
            slices.push_row(&[c as u32]);
            stats.push(SliceStats {
                score: ctx.score(counts[c] as f64, err[c]),
                total_error: err[c],
                max_error: merr[c],
                size: counts[c] as f64,
            });
        }
    }

    BasicSlices {
        slices,
        stats,
        selected,
    }
}
