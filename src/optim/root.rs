use crate::traits::FloatScalar;

use super::{OptimError, RootResult};

/// Settings for scalar root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct RootSettings<T> {
    /// Convergence tolerance on the step or bracket width.
    pub x_tol: T,
    /// Convergence tolerance on the function value `|f(x)|`.
    pub f_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for RootSettings<f64> {
    fn default() -> Self {
        Self {
            x_tol: 1e-12,
            f_tol: 1e-12,
            max_iter: 100,
        }
    }
}

impl Default for RootSettings<f32> {
    fn default() -> Self {
        Self {
            x_tol: 1e-6,
            f_tol: 1e-6,
            max_iter: 100,
        }
    }
}

#[inline]
fn same_sign<T: FloatScalar>(a: T, b: T) -> bool {
    (a > T::zero() && b > T::zero()) || (a < T::zero() && b < T::zero())
}

/// Newton's method safeguarded by bisection.
///
/// `f_and_df` returns `(f(x), f'(x))`. A Newton step is taken whenever it
/// stays inside the current bracket and shrinks the step size fast enough;
/// otherwise the bracket is bisected. The bracket is updated after every
/// evaluation, so the iterate never leaves `[a, b]`.
///
/// # Errors
///
/// Returns [`OptimError::BracketInvalid`] if `f(a)` and `f(b)` have the same
/// strict sign, [`OptimError::NotFinite`] if `f` returns NaN, and
/// [`OptimError::MaxIterations`] if convergence is not achieved.
///
/// # Example
///
/// ```
/// use numkern::optim::{newton_bisect, RootSettings};
///
/// // Find √2 as root of x² - 2
/// let r = newton_bisect(|x| (x * x - 2.0, 2.0 * x), 0.0, 2.0, &RootSettings::default()).unwrap();
/// assert!((r.x - core::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
pub fn newton_bisect<T: FloatScalar>(
    mut f_and_df: impl FnMut(T) -> (T, T),
    a: T,
    b: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    let (fl, _) = f_and_df(a);
    let (fh, _) = f_and_df(b);
    let mut evals = 2usize;

    if fl.is_nan() || fh.is_nan() {
        return Err(OptimError::NotFinite);
    }
    if same_sign(fl, fh) {
        return Err(OptimError::BracketInvalid);
    }
    if fl == T::zero() {
        return Ok(RootResult { x: a, fx: fl, iterations: 0, evals });
    }
    if fh == T::zero() {
        return Ok(RootResult { x: b, fx: fh, iterations: 0, evals });
    }

    // Orient the bracket so that f(xl) < 0.
    let (mut xl, mut xh) = if fl < T::zero() { (a, b) } else { (b, a) };
    let half = T::lit(0.5);
    let two = T::lit(2.0);

    let mut rts = half * (a + b);
    let mut dxold = (b - a).abs();
    let mut dx = dxold;
    let (mut f, mut df) = f_and_df(rts);
    evals += 1;
    if f == T::zero() {
        return Ok(RootResult { x: rts, fx: f, iterations: 0, evals });
    }
    // The midpoint already narrows the bracket.
    if f < T::zero() {
        xl = rts;
    } else {
        xh = rts;
    }

    for iter in 0..settings.max_iter {
        if f.is_nan() || df.is_nan() {
            return Err(OptimError::NotFinite);
        }

        let out_of_range = ((rts - xh) * df - f) * ((rts - xl) * df - f) > T::zero();
        let too_slow = (two * f).abs() > (dxold * df).abs();
        if out_of_range || too_slow {
            dxold = dx;
            dx = half * (xh - xl);
            rts = xl + dx;
            if xl == rts {
                return Ok(RootResult { x: rts, fx: f, iterations: iter + 1, evals });
            }
        } else {
            dxold = dx;
            dx = f / df;
            let prev = rts;
            rts = rts - dx;
            if prev == rts {
                return Ok(RootResult { x: rts, fx: f, iterations: iter + 1, evals });
            }
        }

        let (fn_, dfn) = f_and_df(rts);
        f = fn_;
        df = dfn;
        evals += 1;

        if dx.abs() < settings.x_tol || f.abs() < settings.f_tol {
            log::debug!("newton_bisect: converged in {} iterations", iter + 1);
            return Ok(RootResult { x: rts, fx: f, iterations: iter + 1, evals });
        }

        if f < T::zero() {
            xl = rts;
        } else {
            xh = rts;
        }
    }

    Err(OptimError::MaxIterations)
}

/// Ridders' method for bracketed root finding.
///
/// Each iteration evaluates the midpoint, fits an exponential through the
/// three points and keeps the tightest sign-changing bracket. Convergence is
/// quadratic for smooth functions and never slower than bisection.
///
/// # Errors
///
/// Returns [`OptimError::BracketInvalid`] if `f(a)` and `f(b)` have the same
/// strict sign and [`OptimError::MaxIterations`] if convergence is not
/// achieved.
///
/// # Example
///
/// ```
/// use numkern::optim::{ridders, RootSettings};
///
/// let r = ridders(|x: f64| x.cos() - x, 0.0, 1.0, &RootSettings::default()).unwrap();
/// assert!((r.x - 0.7390851332151607).abs() < 1e-12);
/// ```
pub fn ridders<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    let mut fl = f(a);
    let mut fh = f(b);
    let mut evals = 2usize;

    if fl.is_nan() || fh.is_nan() {
        return Err(OptimError::NotFinite);
    }
    if same_sign(fl, fh) {
        return Err(OptimError::BracketInvalid);
    }
    if fl == T::zero() {
        return Ok(RootResult { x: a, fx: fl, iterations: 0, evals });
    }
    if fh == T::zero() {
        return Ok(RootResult { x: b, fx: fh, iterations: 0, evals });
    }

    let half = T::lit(0.5);
    let (mut xl, mut xh) = (a, b);
    let mut ans = xl;
    let mut fans = fl;

    for iter in 0..settings.max_iter {
        let xm = half * (xl + xh);
        let fm = f(xm);
        evals += 1;
        let s = (fm * fm - fl * fh).sqrt();
        if s == T::zero() {
            return Ok(RootResult { x: xm, fx: fm, iterations: iter + 1, evals });
        }
        let dir = if fl >= fh { T::one() } else { -T::one() };
        let xnew = xm + (xm - xl) * (dir * fm / s);
        if iter > 0 && (xnew - ans).abs() <= settings.x_tol {
            log::debug!("ridders: converged in {} iterations", iter + 1);
            return Ok(RootResult { x: ans, fx: fans, iterations: iter + 1, evals });
        }
        ans = xnew;
        fans = f(ans);
        evals += 1;
        if fans.is_nan() {
            return Err(OptimError::NotFinite);
        }
        if fans.abs() < settings.f_tol {
            return Ok(RootResult { x: ans, fx: fans, iterations: iter + 1, evals });
        }

        if fm.with_sign_of(fans) != fm {
            xl = xm;
            fl = fm;
            xh = ans;
            fh = fans;
        } else if fl.with_sign_of(fans) != fl {
            xh = ans;
            fh = fans;
        } else {
            xl = ans;
            fl = fans;
        }

        if (xh - xl).abs() <= settings.x_tol {
            return Ok(RootResult { x: ans, fx: fans, iterations: iter + 1, evals });
        }
    }

    Err(OptimError::MaxIterations)
}
