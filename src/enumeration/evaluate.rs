//! Exact evaluation of candidate slices over the full dataset.

use rayon::prelude::*;

use crate::data::{contains_all, IndicatorMatrix};

use super::scoring::ScoreContext;
use super::stats::SliceStats;

/// How candidates are swept during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalStrategy {
    /// One pass over the whole candidate set.
    DataParallel,
    /// Independent blocks of `block_size` candidates. Block order does not
    /// affect results, so blocks may run on worker threads.
    TaskParallel { block_size: usize },
}

/// Measure one slice over all data rows.
///
/// A row matches iff the slice's columns are a subset of the row's set
/// columns (all predicates hold).
pub fn eval_single(
    x2: &IndicatorMatrix,
    errors: &[f64],
    slice: &[u32],
    ctx: &ScoreContext,
) -> SliceStats {
    let mut size = 0usize;
    let mut total_error = 0.0f64;
    let mut max_error = 0.0f64;
    for (row, &e) in x2.rows().zip(errors) {
        if contains_all(row, slice) {
            size += 1;
            total_error += e;
            if e > max_error {
                max_error = e;
            }
        }
    }
    SliceStats {
        score: ctx.score(size as f64, total_error),
        total_error,
        max_error,
        size: size as f64,
    }
}

fn eval_range(
    x2: &IndicatorMatrix,
    errors: &[f64],
    slices: &IndicatorMatrix,
    range: std::ops::Range<usize>,
    ctx: &ScoreContext,
) -> Vec<SliceStats> {
    range
        .map(|i| eval_single(x2, errors, slices.row(i), ctx))
        .collect()
}

/// Compute size, total error, max error, and score for every candidate.
///
/// `parallel` permits running task-parallel blocks on the current rayon
/// pool. Worker threads only pay off when there is more than one block to
/// hand out, so a candidate set that fits in a single `block_size` block is
/// always evaluated in place. Per-candidate results are independent of the
/// strategy, the block size, and the thread count; only the work
/// partitioning differs.
pub fn eval_slices(
    x2: &IndicatorMatrix,
    errors: &[f64],
    slices: &IndicatorMatrix,
    ctx: &ScoreContext,
    strategy: EvalStrategy,
    parallel: bool,
) -> Vec<SliceStats> {
    let n = slices.num_rows();
    match strategy {
        EvalStrategy::DataParallel => eval_range(x2, errors, slices, 0..n, ctx),
        EvalStrategy::TaskParallel { block_size } => {
            let block_size = block_size.max(1);
            let blocks: Vec<std::ops::Range<usize>> = (0..n)
                .step_by(block_size)
                .map(|beg| beg..(beg + block_size).min(n))
                .collect();
            if parallel && blocks.len() > 1 {
                blocks
                    .into_par_iter()
                    .map(|r| eval_range(x2, errors, slices, r, ctx))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .flatten()
                    .collect()
            } else {
                blocks
                    .into_iter()
                    .flat_map(|r| eval_range(x2, errors, slices, r, ctx))
                    .collect()
            }
        }
    }
}
