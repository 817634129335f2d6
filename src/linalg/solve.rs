use crate::linalg::{svd_solve, LinalgError, Svd};
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Relative truncation threshold; `tol <= 0` selects `ε · max(m, n)`.
fn effective_tol<T: FloatScalar>(tol: T, m: usize, n: usize) -> T {
    if tol > T::zero() {
        tol
    } else {
        T::epsilon() * T::from_usize(m.max(n))
    }
}

fn truncated_svd<T: FloatScalar>(a: &Matrix<T>, tol: T) -> Result<Svd<T>, LinalgError> {
    let mut svd = Svd::new(a)?;
    let rank = svd.truncate(effective_tol(tol, a.nrows(), a.ncols()));
    log::debug!("truncated SVD of {}x{} matrix: rank {}", a.nrows(), a.ncols(), rank);
    Ok(svd)
}

/// Minimum-norm least-squares solution of `A·x = b` for any m×n `A`.
///
/// Singular values below `tol · max(w)` are treated as zero, so rank
/// deficient and inconsistent systems are handled. `tol <= 0` selects
/// `ε · max(m, n)`.
///
/// ```
/// use numkern::{Matrix, Vector, linalg::solve_equation};
/// // over-determined: fit y = c0 + c1·t through (0,1), (1,3), (2,5)
/// let a = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let b = Vector::from_slice(&[1.0, 3.0, 5.0]);
/// let x = solve_equation(&a, &b, 0.0).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn solve_equation<T: FloatScalar>(a: &Matrix<T>, b: &Vector<T>, tol: T) -> Result<Vector<T>, LinalgError> {
    if b.len() != a.nrows() {
        return Err(LinalgError::InvalidPrecondition(
            "right-hand side length must equal the number of rows",
        ));
    }
    truncated_svd(a, tol)?.solve(b)
}

/// [`solve_equation`] for every column of the m×k right-hand side `b`;
/// returns the n×k solution.
pub fn solve_equations<T: FloatScalar>(a: &Matrix<T>, b: &Matrix<T>, tol: T) -> Result<Matrix<T>, LinalgError> {
    if b.nrows() != a.nrows() {
        return Err(LinalgError::InvalidPrecondition(
            "right-hand side must have as many rows as the matrix",
        ));
    }
    let svd = truncated_svd(a, tol)?;
    let mut x = Matrix::try_zeros(a.ncols(), b.ncols())?;
    let n = a.ncols();
    for j in 0..b.ncols() {
        svd_solve(
            svd.u(),
            svd.singular_values().as_slice(),
            svd.v(),
            b.col_slice(j),
            &mut x.as_mut_slice()[j * n..(j + 1) * n],
        )?;
    }
    Ok(x)
}

/// Moore-Penrose pseudo-inverse `A⁺ = V·diag(1/wⱼ)·Uᵀ` (n×m), with the same
/// truncation rule as [`solve_equation`].
///
/// ```
/// use numkern::{Matrix, linalg::pseudo_inverse};
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0]);
/// let p = pseudo_inverse(&a, 1e-12).unwrap();
/// assert!((p[(0, 0)] - 0.25).abs() < 1e-12);
/// ```
pub fn pseudo_inverse<T: FloatScalar>(a: &Matrix<T>, tol: T) -> Result<Matrix<T>, LinalgError> {
    let (u, w, v) = truncated_svd(a, tol)?.into_parts();
    let mut vw = v;
    let n = vw.nrows();
    for (j, &wj) in w.iter().enumerate() {
        let s = if wj == T::zero() { T::zero() } else { T::one() / wj };
        for x in vw.as_mut_slice()[j * n..(j + 1) * n].iter_mut() {
            *x = *x * s;
        }
    }
    Ok(vw.mul_nt(&u))
}
