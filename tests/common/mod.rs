//! Shared helpers for integration tests.

#![allow(dead_code)]

use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use slicefinder::data::DenseMatrix;

/// Build a recoded feature matrix from row vectors.
pub fn matrix(rows: Vec<Vec<u32>>) -> DenseMatrix<u32> {
    let num_cols = rows.first().map_or(0, |r| r.len());
    DenseMatrix::from_rows(&rows, num_cols)
}

/// Synthetic dataset with an injected error bias.
///
/// `n_rows` rows over four binary features (values 1/2); rows falling in the
/// slice {f0=1, f2=1} carry error 8.0, all others 1.0.
pub fn biased_dataset(n_rows: usize, seed: u64) -> (DenseMatrix<u32>, Vec<f64>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n_rows);
    let mut errors = Vec::with_capacity(n_rows);
    for _ in 0..n_rows {
        let row: Vec<u32> = (0..4).map(|_| rng.next_u32() % 2 + 1).collect();
        let biased = row[0] == 1 && row[2] == 1;
        errors.push(if biased { 8.0 } else { 1.0 });
        rows.push(row);
    }
    (matrix(rows), errors)
}

/// Split a dataset into a leading and trailing part at `at` rows.
pub fn split_dataset(
    x: &DenseMatrix<u32>,
    e: &[f64],
    at: usize,
) -> (DenseMatrix<u32>, Vec<f64>, DenseMatrix<u32>, Vec<f64>) {
    let head: Vec<Vec<u32>> = (0..at).map(|i| x.row_slice(i).to_vec()).collect();
    let tail: Vec<Vec<u32>> = (at..x.num_rows()).map(|i| x.row_slice(i).to_vec()).collect();
    (
        matrix(head),
        e[..at].to_vec(),
        matrix(tail),
        e[at..].to_vec(),
    )
}
