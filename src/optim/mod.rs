//! Scalar root finding.
//!
//! Both methods keep a sign-changing bracket and never leave it, so they
//! converge for any continuous function given a valid bracket.
//!
//! - [`newton_bisect`]: Newton steps with a bisection fallback, for functions
//!   whose derivative is cheap
//! - [`ridders`]: Ridders' exponential-fit method, derivative free
//! - [`solve_quadratic`]: closed-form real roots of a quadratic
//!
//! The weakly constrained regression in [`analysis`](crate::analysis) solves
//! its secular equation with [`newton_bisect`].

mod quadratic;
mod root;

#[cfg(test)]
mod tests;

pub use quadratic::{solve_quadratic, QuadraticRoots};
pub use root::{newton_bisect, ridders, RootSettings};

use crate::linalg::LinalgError;

/// Errors from root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OptimError {
    /// Maximum number of iterations exceeded.
    #[error("maximum iterations exceeded")]
    MaxIterations,
    /// Bracket endpoints do not have opposite signs.
    #[error("bracket endpoints must have opposite signs")]
    BracketInvalid,
    /// A computed value was NaN or infinity.
    #[error("computed value is NaN or infinity")]
    NotFinite,
}

impl From<OptimError> for LinalgError {
    fn from(e: OptimError) -> Self {
        match e {
            OptimError::BracketInvalid => LinalgError::RootNotBracketed,
            OptimError::MaxIterations | OptimError::NotFinite => LinalgError::ConvergenceFailure,
        }
    }
}

/// Result of a scalar root-finding algorithm.
#[derive(Debug, Clone, Copy)]
pub struct RootResult<T> {
    /// Approximate root.
    pub x: T,
    /// Function value at the root: `f(x)`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub evals: usize,
}
