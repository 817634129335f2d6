use crate::traits::FloatScalar;

/// Real roots of a quadratic, smallest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots<T> {
    /// No real root, or the equation is degenerate (`a = b = 0`).
    None,
    /// A single root: a double root, or the linear case `a = 0`.
    One(T),
    /// Two distinct roots with `x1 < x2`.
    Two(T, T),
}

impl<T> QuadraticRoots<T> {
    /// Number of real roots found.
    pub fn count(&self) -> usize {
        match self {
            QuadraticRoots::None => 0,
            QuadraticRoots::One(_) => 1,
            QuadraticRoots::Two(_, _) => 2,
        }
    }
}

/// Real roots of `a·x² + b·x + c = 0`.
///
/// Uses `q = −(b + sign(b)·√(b² − 4ac))/2`, `x = q/a` and `x = c/q` so that
/// neither root suffers cancellation. With `a = 0` the linear root `−c/b`
/// is returned.
///
/// ```
/// use numkern::optim::{solve_quadratic, QuadraticRoots};
///
/// assert_eq!(solve_quadratic(1.0_f64, -3.0, 2.0), QuadraticRoots::Two(1.0, 2.0));
/// assert_eq!(solve_quadratic(1.0_f64, 0.0, 1.0), QuadraticRoots::None);
/// ```
pub fn solve_quadratic<T: FloatScalar>(a: T, b: T, c: T) -> QuadraticRoots<T> {
    if a == T::zero() {
        if b == T::zero() {
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(-c / b);
    }

    let disc = b * b - T::lit(4.0) * a * c;
    if disc < T::zero() || disc.is_nan() {
        return QuadraticRoots::None;
    }
    if disc == T::zero() {
        return QuadraticRoots::One(-b / (T::lit(2.0) * a));
    }

    let q = T::lit(-0.5) * (b + disc.sqrt().with_sign_of(b));
    let x1 = q / a;
    let x2 = c / q;
    if x1 < x2 {
        QuadraticRoots::Two(x1, x2)
    } else {
        QuadraticRoots::Two(x2, x1)
    }
}
