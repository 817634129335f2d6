use crate::linalg::{split_two_col_slices, LinalgError, JACOBI_MAX_SWEEPS};
use crate::matrix::{try_vec, Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut};

/// Result of [`jacobi_eigen`].
#[derive(Debug, Clone)]
pub struct JacobiEigen<T> {
    /// Eigenvalues, in no particular order.
    pub eigenvalues: Vector<T>,
    /// Eigenvectors as columns, `eigenvectors.column(k)` pairs with
    /// `eigenvalues[k]`.
    pub eigenvectors: Matrix<T>,
    /// Number of plane rotations applied.
    pub rotations: usize,
}

#[inline]
fn rotate<T: FloatScalar>(a: &mut impl MatrixMut<T>, s: T, tau: T, (i, j): (usize, usize), (k, l): (usize, usize)) {
    let g = *a.get(i, j);
    let h = *a.get(k, l);
    *a.get_mut(i, j) = g - s * (h + g * tau);
    *a.get_mut(k, l) = h + s * (g - h * tau);
}

/// Eigendecomposition of a real symmetric matrix by the cyclic Jacobi
/// method with a threshold strategy.
///
/// Only the strict upper triangle and the diagonal of `a` are read. The
/// strict upper triangle is destroyed; the diagonal and lower triangle are
/// left intact.
///
/// During the first three sweeps only off-diagonal elements larger than
/// `0.2 · S / n²` are rotated away (`S` is the sum of off-diagonal
/// magnitudes). After four sweeps, elements that are negligible next to
/// both diagonal entries are set to zero without a rotation. Iteration ends
/// when `S` underflows to exactly zero; more than [`JACOBI_MAX_SWEEPS`]
/// sweeps give [`LinalgError::ConvergenceFailure`].
///
/// ```
/// use numkern::{Matrix, linalg::jacobi_eigen};
/// let mut a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = jacobi_eigen(&mut a).unwrap();
/// let mut vals = eig.eigenvalues.into_vec();
/// vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((vals[0] - 1.0).abs() < 1e-12);
/// assert!((vals[1] - 3.0).abs() < 1e-12);
/// ```
pub fn jacobi_eigen<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<JacobiEigen<T>, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "Jacobi eigendecomposition requires a square matrix",
        ));
    }

    let mut v = Matrix::try_zeros(n, n)?;
    for i in 0..n {
        v[(i, i)] = T::one();
    }
    let mut b = try_vec(n, T::zero())?;
    let mut z = try_vec(n, T::zero())?;
    let mut d = Vector::from_vec(try_vec(n, T::zero())?);
    for i in 0..n {
        b[i] = *a.get(i, i);
        d[i] = b[i];
    }

    let n2 = T::from_usize(n * n);
    let hundred = T::lit(100.0);
    let half = T::lit(0.5);
    let mut rotations = 0usize;

    for sweep in 1..=JACOBI_MAX_SWEEPS {
        let mut sm = T::zero();
        for q in 1..n {
            for p in 0..q {
                sm = sm + a.get(p, q).abs();
            }
        }
        if sm == T::zero() {
            log::debug!("jacobi_eigen: n={} converged after {} sweeps, {} rotations", n, sweep - 1, rotations);
            return Ok(JacobiEigen {
                eigenvalues: d,
                eigenvectors: v,
                rotations,
            });
        }

        let tresh = if sweep < 4 { T::lit(0.2) * sm / n2 } else { T::zero() };

        for p in 0..n.saturating_sub(1) {
            for q in (p + 1)..n {
                let apq = *a.get(p, q);
                let g = hundred * apq.abs();
                if sweep > 4 && d[p].abs() + g == d[p].abs() && d[q].abs() + g == d[q].abs() {
                    *a.get_mut(p, q) = T::zero();
                } else if apq.abs() > tresh {
                    let h = d[q] - d[p];
                    let t = if h.abs() + g == h.abs() {
                        apq / h
                    } else {
                        let theta = half * h / apq;
                        let t = T::one() / (theta.abs() + (T::one() + theta * theta).sqrt());
                        if theta < T::zero() {
                            -t
                        } else {
                            t
                        }
                    };
                    let c = T::one() / (T::one() + t * t).sqrt();
                    let s = t * c;
                    let tau = s / (T::one() + c);
                    let h = t * apq;
                    z[p] = z[p] - h;
                    z[q] = z[q] + h;
                    d[p] = d[p] - h;
                    d[q] = d[q] + h;
                    *a.get_mut(p, q) = T::zero();

                    for j in 0..p {
                        rotate(a, s, tau, (j, p), (j, q));
                    }
                    for j in (p + 1)..q {
                        rotate(a, s, tau, (p, j), (j, q));
                    }
                    for j in (q + 1)..n {
                        rotate(a, s, tau, (p, j), (q, j));
                    }
                    let (vp, vq) = split_two_col_slices(&mut v, p, q, 0);
                    for (x, y) in vp.iter_mut().zip(vq.iter_mut()) {
                        let g = *x;
                        let h = *y;
                        *x = g - s * (h + g * tau);
                        *y = h + s * (g - h * tau);
                    }
                    rotations += 1;
                }
            }
        }

        // Refresh the diagonal from the accumulated updates to limit
        // rounding drift.
        for i in 0..n {
            b[i] = b[i] + z[i];
            d[i] = b[i];
            z[i] = T::zero();
        }
    }

    log::warn!("jacobi_eigen: no convergence after {} sweeps", JACOBI_MAX_SWEEPS);
    Err(LinalgError::ConvergenceFailure)
}
