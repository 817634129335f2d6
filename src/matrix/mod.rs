mod norm;
mod ops;
mod util;
mod vector;

pub use util::{clip, extrema};
pub use vector::Vector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Allocate a vector of `len` copies of `value`, reporting failure instead of
/// aborting.
pub(crate) fn try_vec<T: Clone>(len: usize, value: T) -> Result<Vec<T>, LinalgError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| LinalgError::AllocationFailure)?;
    v.resize(len, value);
    Ok(v)
}

/// Heap-allocated dense matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage. Dimensions are fixed for the lifetime of
/// the buffer. Implements [`MatrixRef`] and [`MatrixMut`], so every engine in
/// [`linalg`](crate::linalg) accepts it.
///
/// # Index origin
///
/// `m[(i, j)]` is zero-based. The one-based accessors [`at`](Self::at) and
/// [`at_mut`](Self::at_mut) address the first element as `(1, 1)`; they are
/// the boundary convention for callers that number rows and columns from 1.
///
/// ```
/// use numkern::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.at(1, 2), 2.0);
/// assert_eq!(a.nrows(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Fallible [`zeros`](Self::zeros): returns
    /// [`LinalgError::AllocationFailure`] when the storage cannot be reserved.
    pub fn try_zeros(nrows: usize, ncols: usize) -> Result<Self, LinalgError> {
        let len = nrows
            .checked_mul(ncols)
            .ok_or(LinalgError::AllocationFailure)?;
        Ok(Self {
            data: try_vec(len, T::zero())?,
            nrows,
            ncols,
        })
    }

    /// Create a matrix filled with `value`.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let id = Matrix::<f64>::eye(3);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in column-major order.
    ///
    /// Panics if `slice.len() != nrows * ncols`.
    pub fn from_slice(nrows: usize, ncols: usize, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            nrows,
            ncols,
        );
        Self {
            data: slice.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        let mut data = vec![T::zero(); nrows * ncols];
        for i in 0..nrows {
            for j in 0..ncols {
                data[j * nrows + i] = row_major[i * ncols + j];
            }
        }
        Self { data, nrows, ncols }
    }

    /// Create a matrix whose columns are the given vectors.
    ///
    /// Panics if the columns differ in length.
    pub fn from_columns(columns: &[Vector<T>]) -> Self {
        let nrows = columns.first().map_or(0, |c| c.len());
        let mut data = Vec::with_capacity(nrows * columns.len());
        for c in columns {
            assert_eq!(c.len(), nrows, "column length mismatch");
            data.extend_from_slice(c.as_slice());
        }
        Self {
            data,
            nrows,
            ncols: columns.len(),
        }
    }
}

impl<T> Matrix<T> {
    /// Create a matrix from an owned `Vec<T>` in column-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Column-major view of the storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable column-major view of the storage.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its column-major storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset_one_based(&self, row: usize, col: usize) -> usize {
        assert!(
            row >= 1 && col >= 1,
            "index origin is 1: got ({}, {})",
            row,
            col
        );
        assert!(
            row <= self.nrows && col <= self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );
        (col - 1) * self.nrows + (row - 1)
    }
}

impl<T: Copy> Matrix<T> {
    /// One-based element read: `at(1, 1)` is the first element.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.at(2, 1), 3.0);
    /// ```
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.data[self.offset_one_based(row, col)]
    }

    /// One-based mutable element access.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        let k = self.offset_one_based(row, col);
        &mut self.data[k]
    }

    /// Column `j` as a contiguous slice.
    #[inline]
    pub fn col_slice(&self, j: usize) -> &[T] {
        &self.data[j * self.nrows..(j + 1) * self.nrows]
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for j in 0..self.ncols {
                self.data.swap(j * self.nrows + a, j * self.nrows + b);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        if a != b {
            for i in 0..self.nrows {
                self.data.swap(a * self.nrows + i, b * self.nrows + i);
            }
        }
    }
}

// ── Row / column access ─────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Extract row `i` as a [`Vector`].
    pub fn row(&self, i: usize) -> Vector<T> {
        Vector::from_vec((0..self.ncols).map(|j| self[(i, j)]).collect())
    }

    /// Extract column `j` as a [`Vector`].
    ///
    /// ```
    /// use numkern::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.column(1);
    /// assert_eq!(c.as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn column(&self, j: usize) -> Vector<T> {
        Vector::from_slice(self.col_slice(j))
    }

    /// Overwrite row `i`.
    pub fn set_row(&mut self, i: usize, v: &Vector<T>) {
        assert_eq!(v.len(), self.ncols, "vector length mismatch");
        for j in 0..self.ncols {
            self[(i, j)] = v[j];
        }
    }

    /// Overwrite column `j`.
    pub fn set_column(&mut self, j: usize, v: &Vector<T>) {
        assert_eq!(v.len(), self.nrows, "vector length mismatch");
        let n = self.nrows;
        self.data[j * n..(j + 1) * n].copy_from_slice(v.as_slice());
    }

    /// New matrix made of the listed columns, in the listed order.
    pub fn select_columns(&self, cols: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.nrows * cols.len());
        for &j in cols {
            data.extend_from_slice(self.col_slice(j));
        }
        Self {
            data,
            nrows: self.nrows,
            ncols: cols.len(),
        }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for Matrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let start = col * self.nrows + row_start;
        let end = col * self.nrows + self.nrows;
        &self.data[start..end]
    }
}

impl<T> MatrixMut<T> for Matrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let start = col * self.nrows + row_start;
        let end = col * self.nrows + self.nrows;
        &mut self.data[start..end]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &mut self.data[col * self.nrows + row]
    }
}
