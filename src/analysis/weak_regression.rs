use alloc::vec::Vec;

use crate::linalg::{solve_equation, LinalgError, Svd};
use crate::matrix::{Matrix, Vector};
use crate::optim::{newton_bisect, RootSettings};
use crate::traits::FloatScalar;

/// Doublings allowed when searching for an upper bracket of the multiplier.
const MAX_BRACKET_DOUBLINGS: usize = 200;

/// Minimize `‖F·t − φ‖² + α·(tᵀt − δ)²` over `t` (ten Berge, 1991).
///
/// `f` is n×m with `n ≥ m`. Stationary points satisfy
/// `(FᵀF + μI)·t = Fᵀφ` with `μ = 2α(tᵀt − δ)`. With `F = U·diag(w)·Vᵀ` and
/// `q = diag(w)·Uᵀφ` this reduces to the scalar equation
///
/// `μ − 2α(Σ qᵢ² / (wᵢ² + μ)² − δ) = 0`,
///
/// which is increasing on `μ > −w²ₘᵢₙ` and is solved there by Newton steps
/// safeguarded with bisection. When `q` vanishes on the smallest singular
/// value and the equation has no root above `−w²ₘᵢₙ`, the solution sits at
/// `μ = −w²ₘᵢₙ` and gains a component along that singular direction.
///
/// `α = 0` reduces to ordinary minimum-norm least squares.
///
/// # Errors
///
/// [`LinalgError::InvalidPrecondition`] for `n < m`, `α < 0` or mismatched
/// lengths. SVD and root-finding failures are propagated.
///
/// ```
/// use numkern::{Matrix, Vector, analysis::weakly_constrained_regression};
///
/// // with F = I the solution is parallel to φ
/// let f = Matrix::<f64>::eye(2);
/// let phi = Vector::from_slice(&[3.0, 4.0]);
/// let t = weakly_constrained_regression(&f, &phi, 1.0, 1.0).unwrap();
/// assert!((t[1] / t[0] - 4.0 / 3.0).abs() < 1e-10);
/// assert!(t.norm() < 5.0);
/// ```
pub fn weakly_constrained_regression<T: FloatScalar>(
    f: &Matrix<T>,
    phi: &Vector<T>,
    alpha: T,
    delta: T,
) -> Result<Vector<T>, LinalgError> {
    let (n, m) = (f.nrows(), f.ncols());
    if phi.len() != n {
        return Err(LinalgError::InvalidPrecondition(
            "target length must equal the number of rows",
        ));
    }
    if n < m || m == 0 {
        return Err(LinalgError::InvalidPrecondition("matrix must have at least as many rows as columns"));
    }
    if !(alpha >= T::zero()) {
        return Err(LinalgError::InvalidPrecondition("penalty weight must be non-negative"));
    }
    if alpha == T::zero() {
        return solve_equation(f, phi, T::zero());
    }

    let (u, w, v) = Svd::new(f)?.into_parts();
    let c = u.tr_mul_vec(phi);
    let mut q: Vec<T> = w.iter().zip(c.iter()).map(|(&wi, &ci)| wi * ci).collect();
    let qmax = q.iter().fold(T::zero(), |acc, &x| acc.max(x.abs()));
    for x in q.iter_mut() {
        if x.abs() <= T::epsilon() * qmax {
            *x = T::zero();
        }
    }
    let w2: Vec<T> = w.iter().map(|&x| x * x).collect();
    let w2_min = w2[m - 1];
    let two_alpha = T::lit(2.0) * alpha;

    let norm_sq = |mu: T| -> T {
        q.iter()
            .zip(w2.iter())
            .filter(|&(&qi, _)| qi != T::zero())
            .fold(T::zero(), |acc, (&qi, &wi)| {
                let d = wi + mu;
                acc + qi * qi / (d * d)
            })
    };
    let secular = |mu: T| -> (T, T) {
        let mut s = T::zero();
        let mut ds = T::zero();
        for (&qi, &wi) in q.iter().zip(w2.iter()) {
            if qi == T::zero() {
                continue;
            }
            let d = wi + mu;
            s = s + qi * qi / (d * d);
            ds = ds + qi * qi / (d * d * d);
        }
        (mu - two_alpha * (s - delta), T::one() + T::lit(4.0) * alpha * ds)
    };

    // Singular values tied with the smallest one.
    let tie = T::epsilon() * w2[0].max(T::one());
    let first_min = (0..m).find(|&i| w2[i] - w2_min <= tie).unwrap_or(m - 1);
    let degenerate = q[first_min..].iter().all(|&x| x == T::zero());

    if degenerate {
        let at_pole = -w2_min;
        let (f_pole, _) = secular(at_pole);
        if f_pole >= T::zero() {
            // ‖t‖² = δ + μ/(2α) at μ = −w²ₘᵢₙ fixes the null-direction length.
            let gamma_sq = f_pole / two_alpha;
            let mut t = Vector::zeros(m);
            for i in 0..first_min {
                let coef = q[i] / (w2[i] + at_pole);
                for (k, &vk) in v.col_slice(i).iter().enumerate() {
                    t[k] = t[k] + coef * vk;
                }
            }
            let gamma = gamma_sq.max(T::zero()).sqrt();
            for (k, &vk) in v.col_slice(first_min).iter().enumerate() {
                t[k] = t[k] + gamma * vk;
            }
            log::debug!("weak regression: degenerate case, null component {:?}", gamma);
            return Ok(t);
        }
    }

    let lo = -w2_min;
    let mut hi = T::one().max(-two_alpha * delta);
    let mut doublings = 0;
    while secular(hi).0 <= T::zero() {
        doublings += 1;
        if doublings > MAX_BRACKET_DOUBLINGS {
            return Err(LinalgError::ConvergenceFailure);
        }
        hi = hi * T::lit(2.0);
    }

    let settings = RootSettings {
        x_tol: T::epsilon() * hi.abs().max(T::one()),
        f_tol: T::zero(),
        max_iter: 200,
    };
    let root = newton_bisect(secular, lo, hi, &settings)?;
    let mu = root.x;
    log::debug!(
        "weak regression: multiplier {:?} after {} iterations, ‖t‖² = {:?}",
        mu,
        root.iterations,
        norm_sq(mu)
    );

    let mut t = Vector::zeros(m);
    for i in 0..m {
        if q[i] == T::zero() {
            continue;
        }
        let coef = q[i] / (w2[i] + mu);
        for (k, &vk) in v.col_slice(i).iter().enumerate() {
            t[k] = t[k] + coef * vk;
        }
    }
    Ok(t)
}
