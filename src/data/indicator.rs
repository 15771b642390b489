//! Sparse 0/1 matrix stored as sorted column indices per row.
//!
//! One-hot encoded data rows and slice sets are both 0/1 matrices whose rows
//! carry very few ones (at most one per feature), so they are stored
//! compressed: a flat index array plus per-row offsets, with implicit unit
//! values. Row/row operations reduce to merges of short sorted index lists.

/// Compressed 0/1 matrix with sorted column indices per row.
///
/// # Structure
///
/// - `indices`: Column indices of the ones, stored row by row, sorted within
///   each row.
/// - `offsets`: Starting position in `indices` for each row. Length is
///   `num_rows + 1`, with `offsets[num_rows] == indices.len()`.
///
/// For row `i`, the set columns are `indices[offsets[i]..offsets[i+1]]`.
///
/// # Example
///
/// ```
/// use slicefinder::data::IndicatorMatrix;
///
/// let mut m = IndicatorMatrix::new(6);
/// m.push_row(&[0, 4]);
/// m.push_row(&[2]);
///
/// assert_eq!(m.num_rows(), 2);
/// assert_eq!(m.row(0), &[0, 4]);
/// assert_eq!(m.row(1), &[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorMatrix {
    indices: Vec<u32>,
    offsets: Vec<usize>,
    num_cols: usize,
}

impl IndicatorMatrix {
    /// Create an empty matrix (zero rows) with a known column count.
    pub fn new(num_cols: usize) -> Self {
        Self {
            indices: Vec::new(),
            offsets: vec![0],
            num_cols,
        }
    }

    /// Create a matrix from per-row index lists.
    ///
    /// Each row must be sorted, duplicate-free, and within `0..num_cols`.
    pub fn from_rows<I, R>(rows: I, num_cols: usize) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u32]>,
    {
        let mut m = Self::new(num_cols);
        for row in rows {
            m.push_row(row.as_ref());
        }
        m
    }

    /// Append a row given its sorted column indices.
    pub fn push_row(&mut self, row: &[u32]) {
        debug_assert!(
            row.windows(2).all(|w| w[0] < w[1]),
            "Row indices must be strictly increasing"
        );
        debug_assert!(
            row.iter().all(|&c| (c as usize) < self.num_cols),
            "Column index out of bounds"
        );
        self.indices.extend_from_slice(row);
        self.offsets.push(self.indices.len());
    }

    /// Append all rows of another matrix.
    ///
    /// # Panics
    ///
    /// Panics if the column counts differ.
    pub fn append(&mut self, other: &IndicatorMatrix) {
        assert_eq!(
            self.num_cols, other.num_cols,
            "Column count mismatch: {} vs {}",
            self.num_cols, other.num_cols
        );
        for row in other.rows() {
            self.push_row(row);
        }
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns `true` if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Total number of ones.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// The sorted column indices of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_rows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.indices[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Iterate over rows as sorted index slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.offsets
            .windows(2)
            .map(move |w| &self.indices[w[0]..w[1]])
    }

    /// Copy of the matrix with only the columns marked in `keep`.
    ///
    /// Column indices are preserved (no reindexing), so retained entries stay
    /// comparable with index lists over the original column space.
    ///
    /// # Panics
    ///
    /// Panics if `keep.len() != num_cols`.
    pub fn retain_columns(&self, keep: &[bool]) -> IndicatorMatrix {
        assert_eq!(keep.len(), self.num_cols, "Mask length mismatch");
        let mut out = IndicatorMatrix::new(self.num_cols);
        let mut buf = Vec::new();
        for row in self.rows() {
            buf.clear();
            buf.extend(row.iter().copied().filter(|&c| keep[c as usize]));
            out.push_row(&buf);
        }
        out
    }
}

/// Number of common entries of two sorted index lists.
#[inline]
pub fn intersection_count(a: &[u32], b: &[u32]) -> usize {
    let mut count = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Returns `true` if every entry of `needle` occurs in `haystack`.
///
/// Both lists must be sorted. This is the row-matches-slice test: a data row
/// satisfies a slice iff the slice's columns are a subset of the row's.
#[inline]
pub fn contains_all(haystack: &[u32], needle: &[u32]) -> bool {
    let mut i = 0;
    for &c in needle {
        while i < haystack.len() && haystack[i] < c {
            i += 1;
        }
        if i == haystack.len() || haystack[i] != c {
            return false;
        }
        i += 1;
    }
    true
}

/// Merge two sorted index lists into their sorted union.
pub fn union_into(a: &[u32], b: &[u32], out: &mut Vec<u32>) {
    out.clear();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read_rows() {
        let mut m = IndicatorMatrix::new(5);
        m.push_row(&[1, 3]);
        m.push_row(&[]);
        m.push_row(&[0, 2, 4]);

        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.nnz(), 5);
        assert_eq!(m.row(0), &[1, 3]);
        assert_eq!(m.row(1), &[] as &[u32]);
        assert_eq!(m.row(2), &[0, 2, 4]);
    }

    #[test]
    fn append_rows() {
        let mut a = IndicatorMatrix::from_rows([[0u32], [1]], 3);
        let b = IndicatorMatrix::from_rows([[2u32]], 3);
        a.append(&b);
        assert_eq!(a.num_rows(), 3);
        assert_eq!(a.row(2), &[2]);
    }

    #[test]
    fn retain_columns_filters_entries() {
        let m = IndicatorMatrix::from_rows([vec![0u32, 2, 3], vec![1, 3]], 4);
        let kept = m.retain_columns(&[true, false, true, false]);
        assert_eq!(kept.row(0), &[0, 2]);
        assert_eq!(kept.row(1), &[] as &[u32]);
        assert_eq!(kept.num_cols(), 4);
    }

    #[test]
    fn intersection_counts() {
        assert_eq!(intersection_count(&[1, 3, 5], &[2, 3, 5]), 2);
        assert_eq!(intersection_count(&[1, 2], &[3, 4]), 0);
        assert_eq!(intersection_count(&[], &[1]), 0);
    }

    #[test]
    fn subset_test() {
        assert!(contains_all(&[0, 2, 4, 6], &[2, 6]));
        assert!(!contains_all(&[0, 2, 4], &[2, 3]));
        assert!(contains_all(&[1], &[]));
    }

    #[test]
    fn union_merges_sorted() {
        let mut out = Vec::new();
        union_into(&[1, 4], &[2, 4, 7], &mut out);
        assert_eq!(out, vec![1, 2, 4, 7]);
    }
}
