//! One-hot encoding of recoded feature matrices.
//!
//! Each feature `j` with domain size `d_j` (its maximum recoded value) owns a
//! contiguous block of `d_j` one-hot columns. The blocks are laid out by
//! cumulative sums of the domain sizes, so the column of feature `j` taking
//! value `v > 0` is `begin[j] + v - 1`. Value `0` (absent bin) encodes to no
//! column at all.
//!
//! Offsets derived from a dataset stay valid for any data whose per-feature
//! values do not exceed the recorded domains; encoding previously decoded
//! slices with offsets from a grown dataset is therefore always consistent.

use super::dense::DenseMatrix;
use super::indicator::IndicatorMatrix;

/// Per-feature one-hot column ranges.
///
/// Feature `j` owns columns `begin[j]..end[j]` (half-open). `end` is the
/// cumulative sum of the per-feature domain sizes; `begin[j] == end[j - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureOffsets {
    begin: Vec<u32>,
    end: Vec<u32>,
}

impl FeatureOffsets {
    /// Build offsets from per-feature domain sizes.
    pub fn from_domains(domains: &[u32]) -> Self {
        let mut begin = Vec::with_capacity(domains.len());
        let mut end = Vec::with_capacity(domains.len());
        let mut cum = 0u32;
        for &d in domains {
            begin.push(cum);
            cum += d;
            end.push(cum);
        }
        Self { begin, end }
    }

    /// Build offsets from the column-wise maxima of a recoded matrix.
    pub fn from_column_maxima(x: &DenseMatrix<u32>) -> Self {
        Self::from_domains(&x.col_maxs())
    }

    /// Number of features.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.begin.len()
    }

    /// Total one-hot width (number of encoded columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.end.last().copied().unwrap_or(0) as usize
    }

    /// Domain size of feature `j`.
    #[inline]
    pub fn domain(&self, j: usize) -> u32 {
        self.end[j] - self.begin[j]
    }

    /// One-hot column range of feature `j`.
    #[inline]
    pub fn feature_range(&self, j: usize) -> std::ops::Range<u32> {
        self.begin[j]..self.end[j]
    }

    /// The feature owning one-hot column `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is outside the encoded width.
    #[inline]
    pub fn feature_of(&self, col: u32) -> usize {
        let j = self.end.partition_point(|&e| e <= col);
        assert!(j < self.end.len(), "Column {} outside encoded width", col);
        j
    }

    /// One-hot column of feature `j` taking value `v` (`v >= 1`).
    #[inline]
    pub fn column(&self, j: usize, v: u32) -> u32 {
        debug_assert!(v >= 1 && v <= self.domain(j), "Value outside domain");
        self.begin[j] + v - 1
    }

    /// The `(feature, value)` pair encoded by one-hot column `col`.
    #[inline]
    pub fn decode_column(&self, col: u32) -> (usize, u32) {
        let j = self.feature_of(col);
        (j, col - self.begin[j] + 1)
    }
}

/// One-hot encode a recoded matrix.
///
/// Row `i` gets one set column per feature `j` with `x[i, j] > 0`, namely
/// `begin[j] + x[i, j] - 1`. An empty input yields an empty matrix of the
/// offsets' full width.
pub fn encode(x: &DenseMatrix<u32>, offsets: &FeatureOffsets) -> IndicatorMatrix {
    debug_assert_eq!(x.num_cols(), offsets.num_features());
    let mut out = IndicatorMatrix::new(offsets.width());
    let mut buf = Vec::with_capacity(x.num_cols());
    for i in 0..x.num_rows() {
        buf.clear();
        for (j, &v) in x.row_slice(i).iter().enumerate() {
            if v > 0 {
                buf.push(offsets.column(j, v));
            }
        }
        out.push_row(&buf);
    }
    out
}

/// Decode one-hot rows back to recoded feature-value form.
///
/// For each feature the output holds the encoded value, or `0` where the row
/// sets no column in that feature's range.
pub fn decode(m: &IndicatorMatrix, offsets: &FeatureOffsets) -> DenseMatrix<u32> {
    let n = offsets.num_features();
    let mut data = vec![0u32; m.num_rows() * n];
    for (i, row) in m.rows().enumerate() {
        for &col in row {
            let (j, v) = offsets.decode_column(col);
            data[i * n + j] = v;
        }
    }
    DenseMatrix::from_vec(data, m.num_rows(), n)
}
