//! slicefinder: incremental slice finding for ML model debugging.
//!
//! Given a recoded (binned) categorical feature matrix and a per-row error
//! vector from a trained model, this crate enumerates conjunctive predicates
//! ("slices") over feature values and returns the top-k slices where the
//! model's error is anomalously high relative to slice size. Runs are
//! incremental: newly appended rows can be scored against the lattice and
//! top-k of a prior run instead of recomputing from scratch.
//!
//! # Example
//!
//! ```
//! use slicefinder::data::DenseMatrix;
//! use slicefinder::enumeration::{SliceFinder, SliceFinderParams};
//!
//! // 4 rows, 2 binary features; the first row carries the error mass.
//! let x = DenseMatrix::from_vec(vec![1u32, 1, 1, 2, 2, 1, 2, 2], 4, 2);
//! let errors = vec![10.0, 1.0, 1.0, 1.0];
//!
//! let params = SliceFinderParams {
//!     k: 1,
//!     min_sup: 1,
//!     alpha: 1.0,
//!     ..Default::default()
//! };
//! let out = SliceFinder::new(params).run(&x, &errors, None).unwrap();
//!
//! // The slice {f0=1, f1=1} isolates the outlier row.
//! assert_eq!(out.top_k.row_slice(0), &[1, 1]);
//! ```

pub mod data;
pub mod enumeration;
pub mod testing;
