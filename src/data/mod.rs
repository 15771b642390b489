//! Matrix primitives for recoded and one-hot encoded feature data.
//!
//! Two representations cover everything the enumeration engine needs:
//!
//! - [`DenseMatrix`]: row-major dense storage for recoded integer features
//!   and decoded slice output.
//! - [`IndicatorMatrix`]: compressed 0/1 storage (sorted column indices per
//!   row) for one-hot data rows, slice sets, and the lattice.
//!
//! [`FeatureOffsets`] maps between the two: it assigns each feature a
//! contiguous block of one-hot columns.

mod dense;
mod encoding;
mod indicator;

pub use dense::DenseMatrix;
pub use encoding::{decode, encode, FeatureOffsets};
pub use indicator::{contains_all, intersection_count, union_into, IndicatorMatrix};
