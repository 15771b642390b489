//! Dense row-major matrix for recoded feature data.

/// Row-major dense matrix.
///
/// Stores all elements contiguously in row-major order. Used for the recoded
/// (binned) integer feature matrix, where every row carries a value for every
/// feature column, and for decoded slice output.
///
/// # Value conventions
///
/// Recoded feature data uses small non-negative integers per column; `0`
/// denotes "no value / absent bin" for that row.
///
/// # Example
///
/// ```
/// use slicefinder::data::DenseMatrix;
///
/// // 2 rows, 3 features
/// let matrix = DenseMatrix::from_vec(vec![1u32, 2, 3, 1, 1, 2], 2, 3);
///
/// assert_eq!(matrix.num_rows(), 2);
/// assert_eq!(matrix.num_cols(), 3);
/// assert_eq!(matrix.get(1, 2), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseMatrix<T = f64> {
    data: Box<[T]>,
    num_rows: usize,
    num_cols: usize,
}

impl<T: Copy> DenseMatrix<T> {
    /// Create a dense matrix from a Vec, taking ownership.
    ///
    /// Data must be in row-major order: `[row0_col0, row0_col1, ..., row1_col0, ...]`
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    pub fn from_vec(data: Vec<T>, num_rows: usize, num_cols: usize) -> Self {
        assert_eq!(
            data.len(),
            num_rows * num_cols,
            "Data length {} does not match dimensions {}x{}",
            data.len(),
            num_rows,
            num_cols
        );
        Self {
            data: data.into_boxed_slice(),
            num_rows,
            num_cols,
        }
    }

    /// Create a dense matrix from row slices.
    ///
    /// # Panics
    ///
    /// Panics if any row length differs from `num_cols`.
    pub fn from_rows(rows: &[Vec<T>], num_cols: usize) -> Self {
        let mut data = Vec::with_capacity(rows.len() * num_cols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), num_cols, "Row {} has wrong length", i);
            data.extend_from_slice(row);
        }
        Self::from_vec(data, rows.len(), num_cols)
    }

    /// Create an empty matrix (zero rows) with a known column count.
    pub fn empty(num_cols: usize) -> Self {
        Self {
            data: Vec::new().into_boxed_slice(),
            num_rows: 0,
            num_cols,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns `true` if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Get a single element.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.num_rows, "Row index {} out of bounds", row);
        assert!(col < self.num_cols, "Column index {} out of bounds", col);
        self.data[row * self.num_cols + col]
    }

    /// Get a row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[inline]
    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.num_rows, "Row index {} out of bounds", row);
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Get the underlying data as a flat row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Stack two matrices vertically.
    ///
    /// # Panics
    ///
    /// Panics if the column counts differ (unless one side has no rows).
    pub fn vstack(&self, other: &DenseMatrix<T>) -> DenseMatrix<T> {
        if other.num_rows == 0 {
            return self.clone();
        }
        if self.num_rows == 0 {
            return other.clone();
        }
        assert_eq!(
            self.num_cols, other.num_cols,
            "Column count mismatch: {} vs {}",
            self.num_cols, other.num_cols
        );
        let mut data = Vec::with_capacity((self.num_rows + other.num_rows) * self.num_cols);
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        DenseMatrix::from_vec(data, self.num_rows + other.num_rows, self.num_cols)
    }
}

impl<T: Copy + Ord + Default> DenseMatrix<T> {
    /// Per-column maxima.
    ///
    /// Columns of an empty matrix report `T::default()`.
    pub fn col_maxs(&self) -> Vec<T> {
        let mut maxs = vec![T::default(); self.num_cols];
        for row in 0..self.num_rows {
            let offset = row * self.num_cols;
            for (col, max) in maxs.iter_mut().enumerate() {
                *max = (*max).max(self.data[offset + col]);
            }
        }
        maxs
    }
}
