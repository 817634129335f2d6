use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Settings for [`dominant_eigenvector`].
#[derive(Debug, Clone, Copy)]
pub struct PowerSettings<T> {
    /// Stop when successive eigenvalue estimates differ by at most `tol`.
    pub tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for PowerSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iter: 1000,
        }
    }
}

impl Default for PowerSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 1000,
        }
    }
}

/// Power iteration on a square matrix.
///
/// Each step replaces `q` by `A·q / ‖A·q‖` and yields the Rayleigh quotient
/// `qᵀ·A·q`. The iterator is unbounded; it yields
/// `Err(LinalgError::Singular)` once if `A·q` vanishes and then stops.
///
/// ```
/// use numkern::{Matrix, Vector, analysis::PowerIteration};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
/// let mut it = PowerIteration::new(&a, Vector::from_slice(&[1.0, 1.0])).unwrap();
/// let estimates: Vec<f64> = it.by_ref().take(40).map(|r| r.unwrap()).collect();
/// assert!((estimates[39] - 2.0).abs() < 1e-10);
/// assert!(it.eigenvector()[1].abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct PowerIteration<'a, T> {
    a: &'a Matrix<T>,
    q: Vector<T>,
    aq: Vector<T>,
    lambda: T,
    done: bool,
}

impl<'a, T: FloatScalar> PowerIteration<'a, T> {
    /// Start from `q0`, which is normalized first.
    ///
    /// # Errors
    ///
    /// [`LinalgError::InvalidPrecondition`] for a non-square matrix or a
    /// starting vector of the wrong length; [`LinalgError::Singular`] for a
    /// zero starting vector.
    pub fn new(a: &'a Matrix<T>, q0: Vector<T>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::InvalidPrecondition("power iteration requires a square matrix"));
        }
        if q0.len() != a.nrows() {
            return Err(LinalgError::InvalidPrecondition(
                "starting vector length must match the matrix",
            ));
        }
        let mut q = q0;
        if q.normalize_l2() == T::zero() {
            return Err(LinalgError::Singular);
        }
        let aq = a * &q;
        let lambda = q.dot(&aq);
        Ok(Self {
            a,
            q,
            aq,
            lambda,
            done: false,
        })
    }

    /// Current unit eigenvector estimate.
    pub fn eigenvector(&self) -> &Vector<T> {
        &self.q
    }

    /// Current eigenvalue estimate.
    pub fn eigenvalue(&self) -> T {
        self.lambda
    }
}

impl<T: FloatScalar> Iterator for PowerIteration<'_, T> {
    type Item = Result<T, LinalgError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut z = core::mem::replace(&mut self.aq, Vector::zeros(0));
        if z.normalize_l2() == T::zero() {
            self.done = true;
            return Some(Err(LinalgError::Singular));
        }
        self.q = z;
        self.aq = self.a * &self.q;
        self.lambda = self.q.dot(&self.aq);
        Some(Ok(self.lambda))
    }
}

/// Dominant eigenpair of a square matrix.
#[derive(Debug, Clone)]
pub struct DominantEigen<T> {
    /// Final Rayleigh quotient `qᵀAq`.
    pub eigenvalue: T,
    /// Unit eigenvector.
    pub eigenvector: Vector<T>,
    /// Iterations performed.
    pub iterations: usize,
}

/// Run [`PowerIteration`] from `q0` until successive eigenvalue estimates
/// differ by at most `settings.tol`.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] after `settings.max_iter` steps and
/// [`LinalgError::Singular`] when an iterate is mapped to zero, besides the
/// errors of [`PowerIteration::new`].
pub fn dominant_eigenvector<T: FloatScalar>(
    a: &Matrix<T>,
    q0: Vector<T>,
    settings: &PowerSettings<T>,
) -> Result<DominantEigen<T>, LinalgError> {
    let mut it = PowerIteration::new(a, q0)?;
    let mut prev = it.eigenvalue();
    for k in 0..settings.max_iter {
        let Some(step) = it.next() else {
            break;
        };
        let lambda = step?;
        if (lambda - prev).abs() <= settings.tol {
            log::debug!("power iteration: converged in {} iterations", k + 1);
            return Ok(DominantEigen {
                eigenvalue: lambda,
                eigenvector: it.q,
                iterations: k + 1,
            });
        }
        prev = lambda;
    }
    log::warn!("power iteration: no convergence in {} iterations", settings.max_iter);
    Err(LinalgError::ConvergenceFailure)
}
