//! Candidate generation: joining level-(l-1) survivors into level-l slices.
//!
//! This is the pruning kernel of the enumeration. Candidates are formed by
//! pairwise union of compatible parents and survive only when every pruning
//! rule passes: unchanged-and-small, one value per feature, upper-bound size,
//! upper-bound score against the running threshold, and parent completeness.

use std::collections::{HashMap, HashSet};

use crate::data::{intersection_count, union_into, FeatureOffsets, IndicatorMatrix};

use super::scoring::ScoreContext;
use super::stats::SliceStats;
use super::unchanged::UnchangedSlices;

/// A deduplicated candidate with parent-derived upper bounds.
///
/// Each parent pair bounds the child's stats by the elementwise minimum over
/// the two parents (the child's rows are a subset of either parent's rows);
/// across duplicate pairs the tightest (minimum) bound wins.
struct Candidate {
    cols: Vec<u32>,
    ub_error: f64,
    ub_max_error: f64,
    ub_size: f64,
    /// Distinct parents any generating pair contributed.
    parents: Vec<u32>,
}

/// Join compatible parent slices into deduplicated, pruned level-`level`
/// candidates.
///
/// Returns the surviving candidates (in first-discovery order) and the
/// possibly raised score threshold `minsc`. `topk_threshold` is the k-th
/// score of the running top-k, `-inf` while it is not full; `minsc` never
/// decreases, and candidates are kept on `ub_score >= minsc` (not `>`) so a
/// prior top-k slice is never pruned by its own score.
#[allow(clippy::too_many_arguments)]
pub fn pair_candidates(
    parents: &IndicatorMatrix,
    parent_stats: &[SliceStats],
    level: usize,
    minsc: f64,
    topk_threshold: f64,
    ctx: &ScoreContext,
    offsets: &FeatureOffsets,
    unchanged: &UnchangedSlices,
) -> (IndicatorMatrix, f64) {
    debug_assert_eq!(parents.num_rows(), parent_stats.len());
    debug_assert!(level >= 2);

    let minsc = minsc.max(topk_threshold);

    // Only parents that are themselves valid slices can extend.
    let valid: Vec<usize> = (0..parents.num_rows())
        .filter(|&i| parent_stats[i].is_valid(ctx.min_sup))
        .collect();

    // Prior slices untouched by the added rows whose recorded size was
    // already below support: appending non-matching rows cannot lift them,
    // so equal candidates are dead on arrival.
    let small_unchanged: HashSet<&[u32]> = unchanged
        .at_level(level)
        .map(|lvl| {
            lvl.slices
                .rows()
                .zip(lvl.stats.iter())
                .filter(|(_, s)| s.size < ctx.min_sup as f64)
                .map(|(row, _)| row)
                .collect()
        })
        .unwrap_or_default();

    let mut by_cols: HashMap<Box<[u32]>, usize> = HashMap::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut union = Vec::with_capacity(level);

    for (pos, &i) in valid.iter().enumerate() {
        let row_i = parents.row(i);
        let stats_i = &parent_stats[i];
        for &j in &valid[pos + 1..] {
            let row_j = parents.row(j);
            // Parents combine only when they share all but one predicate.
            if intersection_count(row_i, row_j) != level - 2 {
                continue;
            }
            union_into(row_i, row_j, &mut union);

            // A candidate asserting two values for one feature matches
            // nothing. Same-feature columns are adjacent in sorted order.
            let conflicting = union
                .windows(2)
                .any(|w| offsets.feature_of(w[0]) == offsets.feature_of(w[1]));
            if conflicting {
                continue;
            }

            if small_unchanged.contains(union.as_slice()) {
                continue;
            }

            let stats_j = &parent_stats[j];
            let ub_error = stats_i.total_error.min(stats_j.total_error);
            let ub_max_error = stats_i.max_error.min(stats_j.max_error);
            let ub_size = stats_i.size.min(stats_j.size);

            match by_cols.get(union.as_slice()).copied() {
                Some(idx) => {
                    let cand = &mut candidates[idx];
                    cand.ub_error = cand.ub_error.min(ub_error);
                    cand.ub_max_error = cand.ub_max_error.min(ub_max_error);
                    cand.ub_size = cand.ub_size.min(ub_size);
                    for p in [i as u32, j as u32] {
                        if !cand.parents.contains(&p) {
                            cand.parents.push(p);
                        }
                    }
                }
                None => {
                    by_cols.insert(union.clone().into_boxed_slice(), candidates.len());
                    candidates.push(Candidate {
                        cols: union.clone(),
                        ub_error,
                        ub_max_error,
                        ub_size,
                        parents: vec![i as u32, j as u32],
                    });
                }
            }
        }
    }

    let mut out = IndicatorMatrix::new(parents.num_cols());
    for cand in &candidates {
        if cand.ub_size < ctx.min_sup as f64 {
            continue;
        }
        let ub_score = ctx.score_ub(cand.ub_size, cand.ub_error, cand.ub_max_error);
        if !(ub_score > 0.0 && ub_score >= minsc) {
            continue;
        }
        // Apriori completeness: a level-l slice has l distinct level-(l-1)
        // parents; a missing parent was pruned, so the child is prunable too.
        if cand.parents.len() != level {
            continue;
        }
        out.push_row(&cand.cols);
    }

    (out, minsc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::unchanged::UnchangedSlices;

    fn stats(total_error: f64, max_error: f64, size: f64) -> SliceStats {
        SliceStats {
            score: 0.0,
            total_error,
            max_error,
            size,
        }
    }

    fn ctx() -> ScoreContext {
        ScoreContext {
            e_avg: 1.0,
            alpha: 1.0,
            num_rows: 10,
            min_sup: 2,
        }
    }

    /// Two binary features -> columns 0,1 for f0 and 2,3 for f1.
    fn offsets() -> FeatureOffsets {
        FeatureOffsets::from_domains(&[2, 2])
    }

    #[test]
    fn joins_compatible_parents_only() {
        let parents = IndicatorMatrix::from_rows([[0u32], [1], [2]], 4);
        let r = [
            stats(8.0, 4.0, 4.0),
            stats(8.0, 4.0, 4.0),
            stats(8.0, 4.0, 4.0),
        ];

        let (cands, _) = pair_candidates(
            &parents,
            &r,
            2,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets(),
            &UnchangedSlices::none(),
        );

        // {0,1} is two values of f0; only {0,2} and {1,2} remain.
        assert_eq!(cands.num_rows(), 2);
        assert_eq!(cands.row(0), &[0, 2]);
        assert_eq!(cands.row(1), &[1, 2]);
    }

    #[test]
    fn invalid_parents_do_not_extend() {
        let parents = IndicatorMatrix::from_rows([[0u32], [2]], 4);
        // Second parent below support.
        let r = [stats(8.0, 4.0, 4.0), stats(8.0, 4.0, 1.0)];

        let (cands, _) = pair_candidates(
            &parents,
            &r,
            2,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets(),
            &UnchangedSlices::none(),
        );
        assert!(cands.is_empty());
    }

    #[test]
    fn missing_parent_prunes_candidate() {
        // Level 3 from parents {0,2}, {0,4}: candidate {0,2,4} needs its
        // third parent {2,4} in the survivor set.
        let offsets = FeatureOffsets::from_domains(&[2, 2, 2]);
        let parents = IndicatorMatrix::from_rows([vec![0u32, 2], vec![0, 4]], 6);
        let r = [stats(8.0, 4.0, 4.0), stats(8.0, 4.0, 4.0)];

        let (cands, _) = pair_candidates(
            &parents,
            &r,
            3,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets,
            &UnchangedSlices::none(),
        );
        assert!(cands.is_empty());

        let parents =
            IndicatorMatrix::from_rows([vec![0u32, 2], vec![0, 4], vec![2, 4]], 6);
        let r = [
            stats(8.0, 4.0, 4.0),
            stats(8.0, 4.0, 4.0),
            stats(8.0, 4.0, 4.0),
        ];
        let (cands, _) = pair_candidates(
            &parents,
            &r,
            3,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets,
            &UnchangedSlices::none(),
        );
        assert_eq!(cands.num_rows(), 1);
        assert_eq!(cands.row(0), &[0, 2, 4]);
    }

    #[test]
    fn duplicate_pairs_tighten_bounds_once() {
        // All three parents of {0,2,4} present; the candidate is built by
        // three pairs but reported once, with the tightest bounds.
        let offsets = FeatureOffsets::from_domains(&[2, 2, 2]);
        let parents =
            IndicatorMatrix::from_rows([vec![0u32, 2], vec![0, 4], vec![2, 4]], 6);
        let r = [
            stats(9.0, 3.0, 6.0),
            stats(7.0, 4.0, 5.0),
            stats(8.0, 2.0, 4.0),
        ];

        let (cands, _) = pair_candidates(
            &parents,
            &r,
            3,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets,
            &UnchangedSlices::none(),
        );
        assert_eq!(cands.num_rows(), 1);
    }

    #[test]
    fn unchanged_small_slices_are_pruned() {
        let parents = IndicatorMatrix::from_rows([[0u32], [2]], 4);
        let r = [stats(8.0, 4.0, 4.0), stats(8.0, 4.0, 4.0)];

        // Prior run recorded {0,2} with size 1 (< min_sup), untouched now.
        let mut prev_lattice = IndicatorMatrix::new(4);
        prev_lattice.push_row(&[0]);
        prev_lattice.push_row(&[0, 2]);
        let mut rl = crate::enumeration::LatticeStats::new();
        rl.push_level(&[stats(8.0, 4.0, 4.0)]);
        rl.push_level(&[stats(4.0, 4.0, 1.0)]);
        let x2 = IndicatorMatrix::from_rows([vec![1u32, 3]], 4);
        let unchanged = UnchangedSlices::detect(&prev_lattice, &rl, &x2, 0);

        let (cands, _) = pair_candidates(
            &parents,
            &r,
            2,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            &ctx(),
            &offsets(),
            &unchanged,
        );
        assert!(cands.is_empty());
    }

    #[test]
    fn threshold_keeps_equal_scores() {
        let parents = IndicatorMatrix::from_rows([[0u32], [2]], 4);
        let r = [stats(8.0, 4.0, 4.0), stats(8.0, 4.0, 4.0)];

        // ub_score of {0,2}: best probe is s=min_sup=2 capped at err 8:
        // (8/2)/1 - 1 = 3.
        let (cands, minsc) = pair_candidates(
            &parents,
            &r,
            2,
            f64::NEG_INFINITY,
            3.0,
            &ctx(),
            &offsets(),
            &UnchangedSlices::none(),
        );
        assert_eq!(minsc, 3.0);
        assert_eq!(cands.num_rows(), 1);

        // Strictly above the bound, the candidate dies.
        let (cands, _) = pair_candidates(
            &parents,
            &r,
            2,
            f64::NEG_INFINITY,
            3.0 + 1e-9,
            &ctx(),
            &offsets(),
            &UnchangedSlices::none(),
        );
        assert!(cands.is_empty());
    }
}
