use crate::linalg::{LinalgError, Svd};
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Options for [`procrustes`].
#[derive(Debug, Clone, Copy)]
pub struct ProcrustesSettings {
    /// Forbid reflections: the rotation is forced to determinant +1.
    pub proper_rotation: bool,
    /// Fit an isotropic scale factor. When false the scale is fixed at 1.
    pub scaling: bool,
    /// Fit a translation. When false the configurations are not centered and
    /// the translation is zero.
    pub translation: bool,
}

impl Default for ProcrustesSettings {
    fn default() -> Self {
        Self {
            proper_rotation: false,
            scaling: true,
            translation: true,
        }
    }
}

/// Similarity transform mapping one configuration onto another:
/// `Y ≈ s·X·T + 1·tᵀ`.
#[derive(Debug, Clone)]
pub struct Procrustes<T> {
    /// Orthogonal d×d matrix applied on the right of the row points.
    pub rotation: Matrix<T>,
    /// Translation added to every transformed row.
    pub translation: Vector<T>,
    /// Isotropic scale.
    pub scale: T,
}

impl<T: FloatScalar> Procrustes<T> {
    /// `s·X·T + 1·tᵀ` for a configuration with one point per row.
    pub fn apply(&self, x: &Matrix<T>) -> Matrix<T> {
        let mut y = x * &self.rotation;
        for j in 0..y.ncols() {
            let tj = self.translation[j];
            for i in 0..y.nrows() {
                y[(i, j)] = self.scale * y[(i, j)] + tj;
            }
        }
        y
    }
}

fn centered<T: FloatScalar>(x: &Matrix<T>, center: bool) -> (Matrix<T>, Vector<T>) {
    let mut c = x.clone();
    if center {
        let means = c.center_columns();
        (c, means)
    } else {
        (c, Vector::zeros(x.ncols()))
    }
}

/// Orthogonal Procrustes analysis with optional scale and translation.
///
/// `x` and `y` are n×d configurations with one point per row. With
/// `Ycᵀ·Xc = U·diag(w)·Vᵀ` the rotation is `T = V·Uᵀ`, the scale is
/// `Σw / tr(Xcᵀ·Xc)` and the translation `ȳ − s·x̄·T`. When a proper rotation
/// is requested and `V·Uᵀ` is a reflection, the direction of the smallest
/// singular value is flipped.
///
/// # Errors
///
/// [`LinalgError::InvalidPrecondition`] for mismatched shapes or when the
/// centered `x` has zero variance. SVD failures are propagated.
///
/// ```
/// use numkern::{Matrix, analysis::{procrustes, ProcrustesSettings}};
///
/// let x = Matrix::from_rows(3, 2, &[0.0_f64, 0.0, 1.0, 0.0, 0.0, 1.0]);
/// // rotate by 90°, scale by 2, shift by (1, 1)
/// let y = Matrix::from_rows(3, 2, &[1.0, 1.0, 1.0, 3.0, -1.0, 1.0]);
/// let p = procrustes(&x, &y, &ProcrustesSettings::default()).unwrap();
/// assert!((p.scale - 2.0).abs() < 1e-12);
/// assert!((p.rotation[(0, 1)] - 1.0).abs() < 1e-12);
/// ```
pub fn procrustes<T: FloatScalar>(
    x: &Matrix<T>,
    y: &Matrix<T>,
    settings: &ProcrustesSettings,
) -> Result<Procrustes<T>, LinalgError> {
    if x.nrows() != y.nrows() || x.ncols() != y.ncols() {
        return Err(LinalgError::InvalidPrecondition("configurations must have the same shape"));
    }
    let d = x.ncols();
    if d == 0 || x.nrows() == 0 {
        return Err(LinalgError::InvalidPrecondition("configurations must not be empty"));
    }

    let (xc, xmean) = centered(x, settings.translation);
    let (yc, ymean) = centered(y, settings.translation);

    let ssx = xc.frobenius_norm_squared();
    if !(ssx > T::zero()) {
        return Err(LinalgError::InvalidPrecondition("source configuration has zero variance"));
    }

    // C = Ycᵀ·Xc (d×d)
    let c = yc.mul_tn(&xc);
    let svd = Svd::new(&c)?;
    let (u, w, v) = svd.into_parts();

    let mut sign = T::one();
    if settings.proper_rotation && v.mul_nt(&u).det()? < T::zero() {
        sign = -T::one();
    }

    // T = V·D·Uᵀ with D = diag(1, …, 1, sign)
    let mut vd = v;
    if sign < T::zero() {
        for x in vd.as_mut_slice()[(d - 1) * d..].iter_mut() {
            *x = -*x;
        }
    }
    let rotation = vd.mul_nt(&u);

    let scale = if settings.scaling {
        let mut trace = w.sum();
        if sign < T::zero() {
            trace = trace - T::lit(2.0) * w[d - 1];
        }
        trace / ssx
    } else {
        T::one()
    };

    let translation = if settings.translation {
        let xt = rotation.tr_mul_vec(&xmean);
        Vector::from_vec(
            ymean
                .iter()
                .zip(xt.iter())
                .map(|(&ym, &xm)| ym - scale * xm)
                .collect(),
        )
    } else {
        Vector::zeros(d)
    };

    log::debug!("procrustes: scale {:?}, reflected {}", scale, sign < T::zero());
    Ok(Procrustes {
        rotation,
        translation,
        scale,
    })
}
