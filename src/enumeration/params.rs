//! Enumeration parameters.

use derive_builder::Builder;

use super::logger::Verbosity;

/// Parameters for slice enumeration.
///
/// Use struct construction with `..Default::default()`, or the generated
/// builder:
///
/// ```
/// use slicefinder::enumeration::SliceFinderParams;
///
/// let params = SliceFinderParams::builder()
///     .k(8usize)
///     .min_sup(16usize)
///     .alpha(0.9)
///     .build()
///     .unwrap();
/// assert_eq!(params.k, 8);
/// ```
///
/// The algorithmic parameters (`k` through `sel_feat`) travel with the
/// outputs of a run; an incremental continuation adopts them from the prior
/// run so scores and lattice shape stay comparable. `n_threads` and
/// `verbosity` are execution knobs of the current invocation and are never
/// carried over.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceFinderParams {
    // --- Search shape ---
    /// Number of top slices to retain.
    #[builder(default = "4")]
    pub k: usize,

    /// Maximum conjunction level; `0` means unlimited (bounded by the number
    /// of features).
    #[builder(default = "0")]
    pub max_level: usize,

    /// Minimum slice size (rows a slice must match).
    #[builder(default = "32")]
    pub min_sup: usize,

    /// Score weight in `[0, 1]`: 0 = size only, 1 = error only.
    #[builder(default = "0.5")]
    pub alpha: f64,

    // --- Evaluation ---
    /// Evaluate candidates in independent blocks (task-parallel) instead of
    /// one pass over the whole candidate set.
    #[builder(default = "true")]
    pub tp_eval: bool,

    /// Candidates per task-parallel block.
    #[builder(default = "16")]
    pub tp_blksz: usize,

    /// Drop one-hot columns that fail the basic-slice filter from the
    /// encoded data before the level loop.
    #[builder(default = "false")]
    pub sel_feat: bool,

    // --- Execution environment (not carried across incremental runs) ---
    /// Number of threads for parallel evaluation.
    ///
    /// - `0`: rayon's global thread pool
    /// - `1`: strictly sequential
    /// - `n > 1`: dedicated pool with up to `n` threads
    #[builder(default = "0")]
    pub n_threads: usize,

    /// Verbosity of progress output; also enables the per-level debug
    /// statistics in the output.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl Default for SliceFinderParams {
    fn default() -> Self {
        Self {
            k: 4,
            max_level: 0,
            min_sup: 32,
            alpha: 0.5,
            tp_eval: true,
            tp_blksz: 16,
            sel_feat: false,
            n_threads: 0,
            verbosity: Verbosity::default(),
        }
    }
}

impl SliceFinderParams {
    /// Start building a parameter set.
    pub fn builder() -> SliceFinderParamsBuilder {
        SliceFinderParamsBuilder::default()
    }

    /// Adopt the algorithmic parameters of a prior run, keeping this run's
    /// execution knobs.
    pub(crate) fn adopt_prior(&self, prior: &SliceFinderParams) -> SliceFinderParams {
        SliceFinderParams {
            n_threads: self.n_threads,
            verbosity: self.verbosity,
            ..prior.clone()
        }
    }
}
