use crate::linalg::{Cholesky, LinalgError, SymmetricEigen};
use crate::matrix::{Matrix, Vector};
use crate::optim::{newton_bisect, RootSettings};
use crate::traits::FloatScalar;

/// Halvings allowed when stepping from the bracket centre towards a pole.
const MAX_POLE_HALVINGS: usize = 200;

/// Quadratic `α + β·x + γ·x²` with `β² = 4αγ`, i.e. a perfect square
/// `±(√|α| ± √|γ|·x)²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstrainedQuadratic<T> {
    /// Constant term.
    pub alpha: T,
    /// Linear coefficient.
    pub beta: T,
    /// Quadratic coefficient.
    pub gamma: T,
}

impl<T: FloatScalar> ConstrainedQuadratic<T> {
    /// Value of the fitted quadratic at `x`.
    pub fn eval(&self, x: T) -> T {
        self.alpha + x * (self.beta + x * self.gamma)
    }
}

/// Least-squares fit of `y ≈ α + β·x + γ·x²` under `β² = 4αγ`
/// (ten Berge, 1983).
///
/// `o` is the n×3 Vandermonde matrix with columns `1`, `xᵢ`, `xᵢ²`. Writing
/// `b = (α, β, γ)`, the constraint is `bᵀKb = 0` for an indefinite `K`.
/// Whitening with the Cholesky factor of `OᵀO` and diagonalizing the
/// transformed `K` as `diag(d)` turns the problem into the scalar equation
///
/// `Σ dᵢ zᵢ² / (1 + λdᵢ)² = 0`,
///
/// which is decreasing between the poles `−1/d_max` and `−1/d_min` and has
/// its single root there at the global minimum.
///
/// # Errors
///
/// [`LinalgError::InvalidPrecondition`] when `o` is not n×3 with `n ≥ 3` or
/// `y` has the wrong length; [`LinalgError::Singular`] when `OᵀO` is not
/// positive definite (fewer than three distinct abscissae);
/// [`LinalgError::RootNotBracketed`] for data with no component along an
/// extreme constraint axis, where the multiplier sits on a pole.
///
/// ```
/// use numkern::{Matrix, Vector, analysis::constrained_quadratic_regression};
///
/// // y = (1 + 2x)² exactly
/// let xs = [-1.0_f64, 0.0, 0.5, 1.0, 2.0];
/// let o = Matrix::from_fn(5, 3, |i, j| xs[i].powi(j as i32));
/// let y = Vector::from_vec(xs.iter().map(|&x| (1.0 + 2.0 * x).powi(2)).collect());
/// let fit = constrained_quadratic_regression(&o, &y).unwrap();
/// assert!((fit.alpha - 1.0).abs() < 1e-8);
/// assert!((fit.beta - 4.0).abs() < 1e-8);
/// assert!((fit.gamma - 4.0).abs() < 1e-8);
/// ```
pub fn constrained_quadratic_regression<T: FloatScalar>(
    o: &Matrix<T>,
    y: &Vector<T>,
) -> Result<ConstrainedQuadratic<T>, LinalgError> {
    let n = o.nrows();
    if o.ncols() != 3 || n < 3 {
        return Err(LinalgError::InvalidPrecondition(
            "design matrix must be n×3 with at least three rows",
        ));
    }
    if y.len() != n {
        return Err(LinalgError::InvalidPrecondition(
            "target length must equal the number of rows",
        ));
    }

    let two = T::lit(2.0);

    // bᵀKb = β² − 4αγ
    let mut k = Matrix::zeros(3, 3);
    k[(1, 1)] = T::one();
    k[(0, 2)] = -two;
    k[(2, 0)] = -two;

    let li = Cholesky::new(&o.mul_tn(o))?.lower_inverse();
    let c_ls = &li * &o.tr_mul_vec(y);
    let m = (&li * &k).mul_nt(&li);
    let m = (&m + &m.transpose()) * T::lit(0.5);

    // K has inertia (2, 1), and so has the congruent M.
    let (d, p) = SymmetricEigen::new(&m)?.into_parts();
    if !(d[0] < T::zero() && d[2] > T::zero()) {
        return Err(LinalgError::Singular);
    }
    let z = p.tr_mul_vec(&c_ls);

    let secular = |lambda: T| -> (T, T) {
        let mut f = T::zero();
        let mut df = T::zero();
        for i in 0..3 {
            let s = T::one() + lambda * d[i];
            let dz2 = d[i] * z[i] * z[i];
            f = f + dz2 / (s * s);
            df = df - two * d[i] * dz2 / (s * s * s);
        }
        (f, df)
    };

    let lo_pole = -T::one() / d[2];
    let hi_pole = -T::one() / d[0];
    let centre = T::lit(0.5) * (lo_pole + hi_pole);
    let f_centre = secular(centre).0;

    let lambda = if f_centre == T::zero() {
        centre
    } else {
        // Step from the centre towards the pole on the side of the root.
        let pole = if f_centre > T::zero() { hi_pole } else { lo_pole };
        let mut gap = centre - pole;
        let mut far = None;
        for _ in 0..MAX_POLE_HALVINGS {
            gap = gap * T::lit(0.5);
            let x = pole + gap;
            let fx = secular(x).0;
            if fx.is_finite() && (fx > T::zero()) != (f_centre > T::zero()) {
                far = Some(x);
                break;
            }
        }
        let far = far.ok_or(LinalgError::RootNotBracketed)?;
        let settings = RootSettings {
            x_tol: T::epsilon() * (hi_pole - lo_pole),
            f_tol: T::zero(),
            max_iter: 200,
        };
        let root = newton_bisect(secular, centre, far, &settings)?;
        log::debug!(
            "constrained quadratic: multiplier {:?} after {} iterations",
            root.x,
            root.iterations
        );
        root.x
    };

    let mut zs = Vector::zeros(3);
    for i in 0..3 {
        zs[i] = z[i] / (T::one() + lambda * d[i]);
    }
    let b = li.tr_mul_vec(&(&p * &zs));

    Ok(ConstrainedQuadratic {
        alpha: b[0],
        beta: b[1],
        gamma: b[2],
    })
}
