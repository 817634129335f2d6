//! Dense decompositions and the solvers built on them.
//!
//! Two layers, as elsewhere in the crate:
//!
//! - free functions (`*_in_place`) that take `&mut impl MatrixMut<T>`, may
//!   overwrite their argument and document what is left behind;
//! - owned wrappers ([`Cholesky`], [`Lu`], [`SymmetricEigen`], [`Svd`]) that
//!   copy the input, leave it untouched and expose the factors.
//!
//! | Engine | In place | Owned |
//! |---|---|---|
//! | Cholesky | [`cholesky_in_place`], [`invert_lower_in_place`] | [`Cholesky`] |
//! | LU | [`lu_in_place`], [`lu_solve`] | [`Lu`] |
//! | Gauss-Jordan | [`gauss_jordan_in_place`], [`gauss_jordan_solve_in_place`] | |
//! | Jacobi eigen | [`jacobi_eigen`] | |
//! | Tridiagonal + QL | [`tridiagonalize`], [`tql_in_place`] | [`SymmetricEigen`] |
//! | SVD | [`svd_in_place`], [`svd_solve`] | [`Svd`] |
//!
//! [`solve_equation`], [`solve_equations`] and [`pseudo_inverse`] sit on top
//! of the SVD and handle rank deficiency by truncating small singular values.

pub(crate) mod cholesky;
pub(crate) mod gauss_jordan;
pub(crate) mod jacobi;
pub(crate) mod lu;
pub(crate) mod solve;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;

pub use cholesky::{
    back_substitute_lt, cholesky_in_place, forward_substitute, inverse_from_lower_inverse,
    invert_lower_in_place, Cholesky,
};
pub use gauss_jordan::{gauss_jordan_in_place, gauss_jordan_solve_in_place};
pub use jacobi::{jacobi_eigen, JacobiEigen};
pub use lu::{lu_in_place, lu_solve, Lu};
pub use solve::{pseudo_inverse, solve_equation, solve_equations};
pub use svd::{svd_in_place, svd_solve, Svd};
pub use symmetric_eigen::{eigen_sort, tql_in_place, tridiagonalize, EigenOrder, SymmetricEigen, Tridiagonal};

use crate::traits::MatrixMut;

/// Iteration cap per singular value in the Golub-Kahan QR sweep.
pub const SVD_MAX_ITER: usize = 30;

/// Iteration cap per eigenvalue in the implicit QL sweep.
pub const QL_MAX_ITER: usize = 30;

/// Sweep cap for the cyclic Jacobi eigenvalue method.
pub const JACOBI_MAX_SWEEPS: usize = 50;

/// Get mutable references to sub-column slices of two different columns
/// simultaneously. Requires `col_a != col_b`.
///
/// Returns `(a_slice, b_slice)` where:
/// - `a_slice = &mut m[row_start..nrows, col_a]`
/// - `b_slice = &mut m[row_start..nrows, col_b]`
#[inline]
pub(crate) fn split_two_col_slices<'a, T, M: MatrixMut<T>>(
    m: &'a mut M,
    col_a: usize,
    col_b: usize,
    row_start: usize,
) -> (&'a mut [T], &'a mut [T]) {
    assert_ne!(col_a, col_b);
    // Safety: col_a and col_b are different columns, so the slices don't overlap.
    // MatrixMut guarantees column slices are contiguous and non-overlapping.
    let ptr: *mut M = m;
    let a = unsafe { &mut *ptr }.col_as_mut_slice(col_a, row_start);
    let b = unsafe { &mut *ptr }.col_as_mut_slice(col_b, row_start);
    (a, b)
}

/// Apply the plane rotation `[c s; -s c]` to two column slices:
/// `x ← c·x + s·y`, `y ← c·y − s·x`.
#[inline]
pub(crate) fn rotate_columns<T: crate::FloatScalar>(x: &mut [T], y: &mut [T], c: T, s: T) {
    for (xi, yi) in x.iter_mut().zip(y.iter_mut()) {
        let a = *xi;
        let b = *yi;
        *xi = c * a + s * b;
        *yi = c * b - s * a;
    }
}

/// `sqrt(a² + b²)` without destructive underflow or overflow.
#[inline]
pub(crate) fn pythag<T: crate::FloatScalar>(a: T, b: T) -> T {
    let aa = a.abs();
    let ab = b.abs();
    if aa > ab {
        let r = ab / aa;
        aa * (T::one() + r * r).sqrt()
    } else if ab == T::zero() {
        T::zero()
    } else {
        let r = aa / ab;
        ab * (T::one() + r * r).sqrt()
    }
}

/// Errors from linear algebra operations.
///
/// Every fallible routine in the crate returns this type; derived analyses
/// propagate the first failure unchanged.
///
/// ```
/// use numkern::{Matrix, LinalgError};
///
/// let singular = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
///
/// let not_pd = Matrix::from_rows(2, 2, &[1.0_f64, 5.0, 5.0, 1.0]);
/// assert_eq!(not_pd.cholesky().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// Working storage could not be reserved.
    #[error("working storage could not be allocated")]
    AllocationFailure,
    /// Iterative algorithm did not converge within the iteration budget.
    #[error("iterative algorithm did not converge")]
    ConvergenceFailure,
    /// Matrix is singular, or not positive definite where that is required.
    #[error("matrix is singular")]
    Singular,
    /// Input violates a documented precondition (shape, sign, variance).
    #[error("invalid input: {0}")]
    InvalidPrecondition(&'static str),
    /// A root finder was given an interval without a sign change.
    #[error("root is not bracketed by the search interval")]
    RootNotBracketed,
}
