use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{try_vec, Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Cholesky decomposition in place: A = L·Lᵀ.
///
/// On return the lower triangle of `a` (diagonal included) holds L; the
/// strict upper triangle is not read and is left unchanged. Returns
/// `ln det A = 2·Σ ln L[i,i]`.
///
/// Every pivot is checked before its square root is taken: the first
/// non-positive pivot aborts with [`LinalgError::Singular`], leaving the
/// columns processed so far overwritten.
///
/// ```
/// use numkern::{Matrix, linalg::cholesky_in_place};
/// let mut a = Matrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let ln_det = cholesky_in_place(&mut a).unwrap();
/// assert!((ln_det.exp() - 8.0).abs() < 1e-12);
/// assert_eq!(a[(0, 0)], 2.0);
/// ```
pub fn cholesky_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<T, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "Cholesky decomposition requires a square matrix",
        ));
    }

    let mut ln_det = T::zero();
    for j in 0..n {
        for k in 0..j {
            let ljk = *a.get(j, k);
            let (col_j, col_k) = super::split_two_col_slices(a, j, k, j);
            for (x, &y) in col_j.iter_mut().zip(col_k.iter()) {
                *x = *x - ljk * y;
            }
        }

        let diag = *a.get(j, j);
        if !(diag > T::zero()) {
            return Err(LinalgError::Singular);
        }
        let ljj = diag.sqrt();
        *a.get_mut(j, j) = ljj;
        ln_det = ln_det + ljj.ln();

        let inv_ljj = T::one() / ljj;
        for x in a.col_as_mut_slice(j, j + 1).iter_mut() {
            *x = *x * inv_ljj;
        }
    }

    Ok(ln_det + ln_det)
}

/// Replace a lower-triangular Cholesky factor L with L⁻¹.
///
/// Only the lower triangle (diagonal included) is read and written; the
/// strict upper triangle is left intact. Returns `ln det(L·Lᵀ)`. A zero
/// diagonal element gives [`LinalgError::Singular`].
pub fn invert_lower_in_place<T: FloatScalar>(l: &mut impl MatrixMut<T>) -> Result<T, LinalgError> {
    let n = l.nrows();
    if n != l.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "triangular inverse requires a square matrix",
        ));
    }
    let mut ln_det = T::zero();
    for i in 0..n {
        let d = *l.get(i, i);
        if d == T::zero() {
            return Err(LinalgError::Singular);
        }
        ln_det = ln_det + d.abs().ln();
    }

    // Column j of L⁻¹ only depends on columns >= j of L, so columns are
    // overwritten left to right.
    for j in 0..n {
        let xjj = T::one() / *l.get(j, j);
        *l.get_mut(j, j) = xjj;
        for i in (j + 1)..n {
            let mut sum = *l.get(i, j) * xjj;
            for k in (j + 1)..i {
                sum = sum + *l.get(i, k) * *l.get(k, j);
            }
            *l.get_mut(i, j) = -sum / *l.get(i, i);
        }
    }

    Ok(ln_det + ln_det)
}

/// A⁻¹ = L⁻ᵀ·L⁻¹ from the inverse lower factor.
///
/// Reads only the lower triangle of `li`. The lower half of the result is
/// computed and mirrored, so the output is exactly symmetric.
pub fn inverse_from_lower_inverse<T: FloatScalar>(li: &Matrix<T>) -> Matrix<T> {
    let n = li.nrows();
    let mut out = Matrix::zeros(n, n);
    for j in 0..n {
        for i in j..n {
            let mut sum = T::zero();
            for k in i..n {
                sum = sum + li[(k, i)] * li[(k, j)];
            }
            out[(i, j)] = sum;
            out[(j, i)] = sum;
        }
    }
    out
}

/// Solve L·x = b by forward substitution, where L is lower triangular.
#[inline]
pub fn forward_substitute<T: FloatScalar>(l: &impl MatrixRef<T>, b: &[T], x: &mut [T]) {
    let n = l.nrows();
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - *l.get(i, j) * x[j];
        }
        x[i] = sum / *l.get(i, i);
    }
}

/// Solve Lᵀ·x = b by back substitution, where L is lower triangular.
#[inline]
pub fn back_substitute_lt<T: FloatScalar>(l: &impl MatrixRef<T>, b: &[T], x: &mut [T]) {
    let n = l.nrows();
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *l.get(j, i) * x[j];
        }
        x[i] = sum / *l.get(i, i);
    }
}

/// Cholesky decomposition of a symmetric positive-definite matrix.
///
/// # Example
///
/// ```
/// use numkern::{Matrix, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let chol = a.cholesky().unwrap();
///
/// let x = chol.solve(&Vector::from_slice(&[8.0, 7.0]));
/// assert!((x[0] - 1.25).abs() < 1e-12);
/// assert!((chol.det() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Cholesky<T> {
    l: Matrix<T>,
    ln_det: T,
}

impl<T: FloatScalar> Cholesky<T> {
    /// Decompose a symmetric positive-definite matrix. `a` is not modified.
    ///
    /// A square input whose mirrored entries differ by more than
    /// `√ε · max|A|` gives [`LinalgError::InvalidPrecondition`].
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        if a.is_square() && !a.is_symmetric(T::epsilon().sqrt() * a.max_abs()) {
            return Err(LinalgError::InvalidPrecondition(
                "Cholesky decomposition requires a symmetric matrix",
            ));
        }
        let mut l = a.clone();
        let ln_det = cholesky_in_place(&mut l)?;
        let n = l.nrows();
        for j in 1..n {
            for i in 0..j {
                l[(i, j)] = T::zero();
            }
        }
        Ok(Self { l, ln_det })
    }

    /// Lower-triangular factor L, zeros above the diagonal.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// `ln det A`.
    pub fn ln_det(&self) -> T {
        self.ln_det
    }

    /// `det A = (Π L[i,i])²`.
    pub fn det(&self) -> T {
        self.ln_det.exp()
    }

    /// Solve A·x = b.
    pub fn solve(&self, b: &Vector<T>) -> Vector<T> {
        let n = self.l.nrows();
        assert_eq!(b.len(), n, "dimension mismatch");
        let mut y = Vector::zeros(n);
        let mut x = Vector::zeros(n);
        forward_substitute(&self.l, b.as_slice(), y.as_mut_slice());
        back_substitute_lt(&self.l, y.as_slice(), x.as_mut_slice());
        x
    }

    /// L⁻¹, lower triangular, one forward substitution per column.
    pub fn lower_inverse(&self) -> Matrix<T> {
        let n = self.l.nrows();
        let mut li = Matrix::zeros(n, n);
        let mut e = vec![T::zero(); n];
        for j in 0..n {
            if j > 0 {
                e[j - 1] = T::zero();
            }
            e[j] = T::one();
            forward_substitute(&self.l, &e, li.col_as_mut_slice(j, 0));
        }
        li
    }

    /// A⁻¹ = L⁻ᵀ·L⁻¹.
    pub fn inverse(&self) -> Matrix<T> {
        inverse_from_lower_inverse(&self.lower_inverse())
    }

    /// `(x − mean)ᵀ A⁻¹ (x − mean)`, via one forward substitution.
    pub fn mahalanobis_squared(&self, x: &Vector<T>, mean: &Vector<T>) -> Result<T, LinalgError> {
        let n = self.l.nrows();
        if x.len() != n || mean.len() != n {
            return Err(LinalgError::InvalidPrecondition(
                "point and mean must match the covariance dimension",
            ));
        }
        let d: Vec<T> = x.iter().zip(mean.iter()).map(|(&a, &b)| a - b).collect();
        let mut y = try_vec(n, T::zero())?;
        forward_substitute(&self.l, &d, &mut y);
        Ok(y.iter().fold(T::zero(), |acc, &v| acc + v * v))
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Cholesky decomposition (`A = L·Lᵀ`).
    ///
    /// Returns [`LinalgError::Singular`] if the matrix is not positive definite.
    pub fn cholesky(&self) -> Result<Cholesky<T>, LinalgError> {
        Cholesky::new(self)
    }
}
