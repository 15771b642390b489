//! Level-wise slice enumeration.
//!
//! The engine runs an Apriori-style search over conjunctions of feature
//! predicates:
//!
//! - [`SliceFinder`]: the driver orchestrating levels 1..L
//! - [`SliceFinderParams`]: search and evaluation parameters
//! - [`PriorRun`] / [`SliceFinderOutput`]: the state threaded between
//!   incremental invocations
//! - [`ScoreContext`]: slice scoring and the upper bound used for pruning
//! - [`TopK`]: the running result set
//! - [`EvalStrategy`]: evaluation execution hints
//!
//! The remaining building blocks (basic slices, pair generation, unchanged
//! detection) are exposed for testing and composition but are normally
//! driven through [`SliceFinder::run`].

mod basic;
mod evaluate;
mod finder;
mod logger;
mod pairing;
mod params;
mod scoring;
mod stats;
mod topk;
mod unchanged;

pub use basic::{create_basic_slices, BasicSlices};
pub use evaluate::{eval_single, eval_slices, EvalStrategy};
pub use finder::{LevelDebug, PriorRun, SliceFinder, SliceFinderError, SliceFinderOutput};
pub use logger::{ProgressLogger, Verbosity};
pub use pairing::pair_candidates;
pub use params::{SliceFinderParams, SliceFinderParamsBuilder};
pub use scoring::ScoreContext;
pub use stats::{stats_to_matrix, LatticeStats, SliceStats};
pub use topk::TopK;
pub use unchanged::{UnchangedLevel, UnchangedSlices};
