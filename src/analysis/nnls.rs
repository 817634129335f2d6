use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{solve_equation, LinalgError};
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Settings for [`nonnegative_least_squares`].
#[derive(Debug, Clone, Copy)]
pub struct NnlsSettings<T> {
    /// Relative tolerance on the gradient `Aᵀ(b − A·x)` of pinned variables,
    /// scaled by `max |Aᵀb|`.
    pub tol: T,
    /// Cap on the number of active-set changes.
    pub max_iter: usize,
}

impl Default for NnlsSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iter: 500,
        }
    }
}

impl Default for NnlsSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 500,
        }
    }
}

/// `Aᵀ(b − A·x)`
fn gradient<T: FloatScalar>(a: &Matrix<T>, b: &Vector<T>, x: &Vector<T>) -> Vector<T> {
    let r = b - &(a * x);
    a.tr_mul_vec(&r)
}

/// Least squares restricted to the free columns; pinned entries are zero.
fn solve_free<T: FloatScalar>(a: &Matrix<T>, b: &Vector<T>, free: &[bool]) -> Result<Vector<T>, LinalgError> {
    let cols: Vec<usize> = (0..free.len()).filter(|&j| free[j]).collect();
    let mut z = Vector::zeros(free.len());
    if cols.is_empty() {
        return Ok(z);
    }
    let zp = solve_equation(&a.select_columns(&cols), b, T::zero())?;
    for (k, &j) in cols.iter().enumerate() {
        z[j] = zp[k];
    }
    Ok(z)
}

/// Least squares `min ‖A·x − b‖` subject to `x ≥ 0` (Lawson-Hanson).
///
/// The free set grows one variable at a time, picking the pinned variable
/// with the largest positive gradient. After every unconstrained solve on
/// the free set, variables driven non-positive are pinned back at zero by
/// stepping along the segment to the new solution and the free set is
/// solved again.
///
/// # Errors
///
/// [`LinalgError::InvalidPrecondition`] when `b` does not match the rows of
/// `a`; [`LinalgError::ConvergenceFailure`] when `max_iter` active-set
/// changes do not settle.
///
/// ```
/// use numkern::{Matrix, Vector, analysis::{nonnegative_least_squares, NnlsSettings}};
///
/// let a = Matrix::<f64>::eye(2);
/// let b = Vector::from_slice(&[1.0, -2.0]);
/// let x = nonnegative_least_squares(&a, &b, &NnlsSettings::default()).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert_eq!(x[1], 0.0);
/// ```
pub fn nonnegative_least_squares<T: FloatScalar>(
    a: &Matrix<T>,
    b: &Vector<T>,
    settings: &NnlsSettings<T>,
) -> Result<Vector<T>, LinalgError> {
    if b.len() != a.nrows() {
        return Err(LinalgError::InvalidPrecondition(
            "right-hand side length must equal the number of rows",
        ));
    }
    let n = a.ncols();
    let mut x = Vector::zeros(n);
    let mut free = vec![false; n];
    // Variables whose entry produced a non-positive solve; skipped until x moves.
    let mut blocked = vec![false; n];

    let mut w = gradient(a, b, &x);
    let scale = w.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()));
    let thresh = settings.tol * scale;
    let mut changes = 0usize;

    loop {
        let mut best: Option<(usize, T)> = None;
        for j in 0..n {
            if free[j] || blocked[j] || !(w[j] > thresh) {
                continue;
            }
            if best.map_or(true, |(_, wb)| w[j] > wb) {
                best = Some((j, w[j]));
            }
        }
        let Some((j, _)) = best else {
            log::debug!("nnls: converged after {} active-set changes", changes);
            return Ok(x);
        };

        changes += 1;
        if changes > settings.max_iter {
            log::warn!("nnls: no convergence after {} active-set changes", settings.max_iter);
            return Err(LinalgError::ConvergenceFailure);
        }
        free[j] = true;

        let mut z = solve_free(a, b, &free)?;
        if !(z[j] > T::zero()) {
            free[j] = false;
            blocked[j] = true;
            continue;
        }

        // Step back towards x until every free variable is positive.
        while (0..n).any(|i| free[i] && !(z[i] > T::zero())) {
            changes += 1;
            if changes > settings.max_iter {
                log::warn!("nnls: no convergence after {} active-set changes", settings.max_iter);
                return Err(LinalgError::ConvergenceFailure);
            }
            let mut alpha = T::infinity();
            let mut kmin = n;
            for i in 0..n {
                if free[i] && !(z[i] > T::zero()) {
                    let ai = x[i] / (x[i] - z[i]);
                    if ai < alpha {
                        alpha = ai;
                        kmin = i;
                    }
                }
            }
            for i in 0..n {
                if !free[i] {
                    continue;
                }
                x[i] = x[i] + alpha * (z[i] - x[i]);
                if i == kmin || !(x[i] > T::zero()) {
                    x[i] = T::zero();
                    free[i] = false;
                }
            }
            z = solve_free(a, b, &free)?;
        }

        x = z;
        for v in blocked.iter_mut() {
            *v = false;
        }
        w = gradient(a, b, &x);
    }
}
