//! Level-wise enumeration driver.
//!
//! Orchestrates one invocation: input validation, parameter carryover from a
//! prior run, one-hot encoding, level-1 seeding, the paired-candidate loop,
//! and decoding of the results. Incremental runs thread the outputs of the
//! previous invocation back in as a [`PriorRun`].

use rayon::ThreadPoolBuilder;

use crate::data::{decode, encode, DenseMatrix, FeatureOffsets, IndicatorMatrix};

use super::basic::create_basic_slices;
use super::evaluate::{eval_single, eval_slices, EvalStrategy};
use super::logger::ProgressLogger;
use super::pairing::pair_candidates;
use super::params::SliceFinderParams;
use super::scoring::ScoreContext;
use super::stats::{LatticeStats, SliceStats};
use super::topk::TopK;
use super::unchanged::UnchangedSlices;

/// Invocation errors.
///
/// All failures are structural preconditions and surface before any partial
/// result exists; none is retryable with the same inputs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SliceFinderError {
    /// A prior lattice was supplied without the parameters of the run that
    /// produced it. Scores and lattice shape are only comparable when the
    /// parameters carry over, so the run refuses to mix.
    #[error("prior lattice supplied without the parameters of the run that produced it")]
    MissingPriorParams,

    #[error("column count mismatch between prior data and added rows: expected {expected}, got {got}")]
    ColumnCountMismatch { expected: usize, got: usize },

    #[error("number of errors ({errors}) does not match number of rows ({rows})")]
    ErrorLenMismatch { rows: usize, errors: usize },
}

/// Outputs of a previous run threaded into an incremental continuation.
///
/// Slices are in decoded feature-value form; they are re-encoded against the
/// offsets of the grown dataset, which keeps column spaces aligned across
/// runs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorRun {
    /// Decoded lattice of the prior run (rows x features).
    pub lattice: DenseMatrix<u32>,
    /// Per-slice stats of the lattice, with level row counts.
    pub lattice_stats: LatticeStats,
    /// Decoded top-k slices of the prior run.
    pub top_k: DenseMatrix<u32>,
    /// Stats aligned with `top_k`.
    pub top_k_stats: Vec<SliceStats>,
    /// Rows accumulated up to and including the prior run.
    pub old_x: DenseMatrix<u32>,
    /// Errors aligned with `old_x`.
    pub old_e: Vec<f64>,
    /// Parameters of the prior run. Required whenever `lattice` is
    /// non-empty; they override the current finder's algorithmic parameters.
    pub params: Option<SliceFinderParams>,
}

/// One row of per-level debug statistics (collected when verbose).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDebug {
    /// Enumeration level.
    pub level: usize,
    /// Candidates evaluated at this level (level 1: one-hot columns).
    pub enumerated: usize,
    /// Evaluated candidates meeting support with positive error.
    pub valid: usize,
    /// Best top-k score after the level.
    pub tk_max: f64,
    /// Worst retained top-k score after the level.
    pub tk_min: f64,
}

/// Results of one enumeration run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceFinderOutput {
    /// Top-k slices in decoded feature-value form, best first.
    pub top_k: DenseMatrix<u32>,
    /// Stats aligned with `top_k` (score, totalError, maxError, size).
    pub top_k_stats: Vec<SliceStats>,
    /// Per-level debug stats; empty unless the run was verbose.
    pub debug: Vec<LevelDebug>,
    /// Decoded lattice: every evaluated slice, grouped by level.
    pub lattice: DenseMatrix<u32>,
    /// Stats aligned with `lattice`, with level row counts.
    pub lattice_stats: LatticeStats,
    /// The full dataset this run scored (old rows + added rows).
    pub data: DenseMatrix<u32>,
    /// Errors aligned with `data`.
    pub errors: Vec<f64>,
    /// Effective parameters of this run.
    pub params: SliceFinderParams,
}

impl SliceFinderOutput {
    /// Package this output as the prior state of the next incremental run.
    pub fn into_prior(self) -> PriorRun {
        PriorRun {
            lattice: self.lattice,
            lattice_stats: self.lattice_stats,
            top_k: self.top_k,
            top_k_stats: self.top_k_stats,
            old_x: self.data,
            old_e: self.errors,
            params: Some(self.params),
        }
    }
}

/// Incremental slice-finding engine.
///
/// Enumerates conjunctive predicates over recoded categorical features and
/// retains the k slices where the error is anomalously high relative to
/// slice size.
///
/// # Example
///
/// ```
/// use slicefinder::data::DenseMatrix;
/// use slicefinder::enumeration::{SliceFinder, SliceFinderParams};
///
/// // 4 rows, 2 features; the first row is the error outlier.
/// let x = DenseMatrix::from_vec(vec![1u32, 1, 1, 2, 2, 1, 2, 2], 4, 2);
/// let errors = vec![10.0, 1.0, 1.0, 1.0];
///
/// let params = SliceFinderParams {
///     k: 1,
///     min_sup: 1,
///     alpha: 1.0,
///     ..Default::default()
/// };
/// let out = SliceFinder::new(params).run(&x, &errors, None).unwrap();
///
/// assert_eq!(out.top_k.row_slice(0), &[1, 1]);
/// assert_eq!(out.top_k_stats[0].size, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SliceFinder {
    params: SliceFinderParams,
}

impl SliceFinder {
    /// Create a finder with the given parameters.
    pub fn new(params: SliceFinderParams) -> Self {
        Self { params }
    }

    /// Get reference to parameters.
    pub fn params(&self) -> &SliceFinderParams {
        &self.params
    }

    /// Run one enumeration over the added rows, optionally continuing a
    /// prior run.
    ///
    /// On an incremental call the prior outputs must be threaded through
    /// unmodified; the prior parameters override this finder's algorithmic
    /// parameters so results stay comparable.
    ///
    /// # Panics
    ///
    /// Panics if `n_threads > 1` and the dedicated thread pool cannot be
    /// created (rare OS-level failure).
    pub fn run(
        &self,
        added_x: &DenseMatrix<u32>,
        new_e: &[f64],
        prior: Option<&PriorRun>,
    ) -> Result<SliceFinderOutput, SliceFinderError> {
        if new_e.len() != added_x.num_rows() {
            return Err(SliceFinderError::ErrorLenMismatch {
                rows: added_x.num_rows(),
                errors: new_e.len(),
            });
        }

        let mut params = self.params.clone();
        if let Some(p) = prior {
            match &p.params {
                Some(prior_params) => params = self.params.adopt_prior(prior_params),
                None if p.lattice.num_rows() > 0 => {
                    return Err(SliceFinderError::MissingPriorParams)
                }
                None => {}
            }
            for prior_side in [&p.old_x, &p.lattice, &p.top_k] {
                if prior_side.num_rows() > 0 && prior_side.num_cols() != added_x.num_cols() {
                    return Err(SliceFinderError::ColumnCountMismatch {
                        expected: prior_side.num_cols(),
                        got: added_x.num_cols(),
                    });
                }
            }
            if p.old_e.len() != p.old_x.num_rows() {
                return Err(SliceFinderError::ErrorLenMismatch {
                    rows: p.old_x.num_rows(),
                    errors: p.old_e.len(),
                });
            }
        }

        // Threading contract:
        // - n_threads == 0: rayon's global pool
        // - n_threads == 1: strictly sequential
        // - n_threads > 1: dedicated pool for this run
        let parallel = params.n_threads != 1;
        match params.n_threads {
            0 | 1 => Ok(self.run_impl(&params, added_x, new_e, prior, parallel)),
            n => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .expect("Failed to create thread pool");
                Ok(pool.install(|| self.run_impl(&params, added_x, new_e, prior, parallel)))
            }
        }
    }

    fn run_impl(
        &self,
        params: &SliceFinderParams,
        added_x: &DenseMatrix<u32>,
        new_e: &[f64],
        prior: Option<&PriorRun>,
        parallel: bool,
    ) -> SliceFinderOutput {
        let logger = ProgressLogger::new(params.verbosity);

        let empty_x = DenseMatrix::empty(added_x.num_cols());
        let (old_x, old_e): (&DenseMatrix<u32>, &[f64]) = match prior {
            Some(p) => (&p.old_x, p.old_e.as_slice()),
            None => (&empty_x, &[]),
        };

        let new_x = old_x.vstack(added_x);
        let mut total_e = old_e.to_vec();
        total_e.extend_from_slice(new_e);

        let m = new_x.num_rows();
        if m == 0 {
            return empty_output(params.clone(), new_x, total_e);
        }
        let n = new_x.num_cols();
        let added_start = old_x.num_rows();

        let e_avg = total_e.iter().sum::<f64>() / m as f64;
        let e_avg_old = if added_start > 0 {
            old_e.iter().sum::<f64>() / added_start as f64
        } else {
            0.0
        };
        let e_avg_new = if added_x.num_rows() > 0 {
            new_e.iter().sum::<f64>() / added_x.num_rows() as f64
        } else {
            0.0
        };

        let offsets = FeatureOffsets::from_column_maxima(&new_x);
        let n2 = offsets.width();
        let mut x2 = encode(&new_x, &offsets);
        let (prev_tk2, unchanged) = match prior {
            Some(p) => (
                encode(&p.top_k, &offsets),
                if p.lattice.num_rows() > 0 {
                    let prev_lattice2 = encode(&p.lattice, &offsets);
                    UnchangedSlices::detect(&prev_lattice2, &p.lattice_stats, &x2, added_start)
                } else {
                    UnchangedSlices::none()
                },
            ),
            None => (IndicatorMatrix::new(n2), UnchangedSlices::none()),
        };

        let ctx = ScoreContext {
            e_avg,
            alpha: params.alpha,
            num_rows: m,
            min_sup: params.min_sup,
        };

        logger.info(&format!(
            "slicefinder: starting enumeration over {m} rows, {n} features ({n2} one-hot columns)"
        ));

        let basics =
            create_basic_slices(&x2, added_start, &prev_tk2, &total_e, &ctx, e_avg_old, e_avg_new);

        let mut topk = TopK::new(n2);
        topk.merge(&basics.slices, &basics.stats, params.k, params.min_sup);

        let mut lattice = basics.slices.clone();
        let mut lattice_stats = LatticeStats::new();
        lattice_stats.push_level(&basics.stats);

        // Seed the pruning threshold: every prior top-k slice will be
        // re-enumerated, so nothing scoring below the worst of them (on the
        // grown dataset) can enter the final top-k.
        let mut minsc = f64::NEG_INFINITY;
        if !prev_tk2.is_empty() {
            minsc = prev_tk2
                .rows()
                .map(|slice| eval_single(&x2, &total_e, slice, &ctx).score)
                .fold(f64::INFINITY, f64::min);
        }

        let mut debug = Vec::new();
        if logger.enabled() {
            debug.push(LevelDebug {
                level: 1,
                enumerated: n2,
                valid: basics.slices.num_rows(),
                tk_max: topk.max_score(),
                tk_min: topk.min_score(),
            });
            logger.info(&format!(
                "slicefinder: initial top-k: count={}, max={:.6}, min={:.6}",
                topk.len(),
                topk.max_score(),
                topk.min_score()
            ));
        }

        if params.sel_feat {
            x2 = x2.retain_columns(&basics.selected);
        }

        let strategy = if params.tp_eval {
            EvalStrategy::TaskParallel {
                block_size: params.tp_blksz,
            }
        } else {
            EvalStrategy::DataParallel
        };
        let max_level = if params.max_level == 0 {
            n
        } else {
            params.max_level.min(n)
        };

        let mut survivors = basics.slices;
        let mut survivor_stats = basics.stats;
        let mut level = 1;
        while !survivors.is_empty() && level < max_level {
            level += 1;

            let n_parents = survivors.num_rows();
            let (cands, raised) = pair_candidates(
                &survivors,
                &survivor_stats,
                level,
                minsc,
                topk.pruning_threshold(params.k),
                &ctx,
                &offsets,
                &unchanged,
            );
            minsc = raised;
            logger.info(&format!(
                "slicefinder: level {level}: {n_parents} parents -> {} candidates",
                cands.num_rows()
            ));
            if cands.is_empty() {
                break;
            }

            let stats = eval_slices(&x2, &total_e, &cands, &ctx, strategy, parallel);
            topk.merge(&cands, &stats, params.k, params.min_sup);
            lattice.append(&cands);
            lattice_stats.push_level(&stats);

            if logger.enabled() {
                let valid = stats.iter().filter(|s| s.is_valid(params.min_sup)).count();
                debug.push(LevelDebug {
                    level,
                    enumerated: cands.num_rows(),
                    valid,
                    tk_max: topk.max_score(),
                    tk_min: topk.min_score(),
                });
                logger.info(&format!(
                    " -- valid candidates: {valid}, top-k: count={}, max={:.6}, min={:.6}",
                    topk.len(),
                    topk.max_score(),
                    topk.min_score()
                ));
            }

            survivors = cands;
            survivor_stats = stats;
        }

        logger.info(&format!(
            "slicefinder: terminated at level {level} with {} top-k slices",
            topk.len()
        ));

        SliceFinderOutput {
            top_k: decode(topk.slices(), &offsets),
            top_k_stats: topk.stats().to_vec(),
            debug,
            lattice: decode(&lattice, &offsets),
            lattice_stats,
            data: new_x,
            errors: total_e,
            params: params.clone(),
        }
    }
}

fn empty_output(
    params: SliceFinderParams,
    data: DenseMatrix<u32>,
    errors: Vec<f64>,
) -> SliceFinderOutput {
    let n = data.num_cols();
    SliceFinderOutput {
        top_k: DenseMatrix::empty(n),
        top_k_stats: Vec::new(),
        debug: Vec::new(),
        lattice: DenseMatrix::empty(n),
        lattice_stats: LatticeStats::new(),
        data,
        errors,
        params,
    }
}
