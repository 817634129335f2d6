use crate::linalg::LinalgError;
use crate::matrix::Vector;
use crate::traits::{FloatScalar, MatrixRef};

/// Squared Mahalanobis distance `(x − m)ᵀ Σ⁻¹ (x − m)` given `L⁻¹`, the
/// inverse of the lower Cholesky factor of Σ.
///
/// Computed as `‖L⁻¹(x − m)‖²`; only the lower triangle of `lower_inverse`
/// is read.
///
/// ```
/// use numkern::{Matrix, Vector, analysis::mahalanobis_squared};
///
/// let cov = Matrix::from_rows(2, 2, &[4.0_f64, 0.0, 0.0, 1.0]);
/// let li = cov.cholesky().unwrap().lower_inverse();
/// let d2 = mahalanobis_squared(&li, &Vector::from_slice(&[2.0, 1.0]), &Vector::zeros(2)).unwrap();
/// assert!((d2 - 2.0).abs() < 1e-12);
/// ```
pub fn mahalanobis_squared<T: FloatScalar>(
    lower_inverse: &impl MatrixRef<T>,
    x: &Vector<T>,
    mean: &Vector<T>,
) -> Result<T, LinalgError> {
    let n = lower_inverse.nrows();
    if lower_inverse.ncols() != n {
        return Err(LinalgError::InvalidPrecondition("inverse factor must be square"));
    }
    if x.len() != n || mean.len() != n {
        return Err(LinalgError::InvalidPrecondition(
            "point and mean must match the covariance dimension",
        ));
    }
    let mut chisq = T::zero();
    for i in 0..n {
        let mut t = T::zero();
        for j in 0..=i {
            t = t + *lower_inverse.get(i, j) * (x[j] - mean[j]);
        }
        chisq = chisq + t * t;
    }
    Ok(chisq)
}

/// Squared Mahalanobis distance for a diagonal covariance, given the
/// reciprocal standard deviations `inv_sd[i] = 1/σᵢ`.
pub fn mahalanobis_squared_diagonal<T: FloatScalar>(
    inv_sd: &Vector<T>,
    x: &Vector<T>,
    mean: &Vector<T>,
) -> Result<T, LinalgError> {
    if x.len() != inv_sd.len() || mean.len() != inv_sd.len() {
        return Err(LinalgError::InvalidPrecondition(
            "point and mean must match the covariance dimension",
        ));
    }
    Ok(inv_sd
        .iter()
        .zip(x.iter().zip(mean.iter()))
        .fold(T::zero(), |acc, (&s, (&xi, &mi))| {
            let t = s * (xi - mi);
            acc + t * t
        }))
}
