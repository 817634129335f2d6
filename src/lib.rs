//! # numkern
//!
//! Pure-Rust dense linear algebra and statistics kernel, no-std compatible
//! (with `alloc`). Matrix decompositions, SVD-based solvers and the
//! statistical analyses built on them.
//!
//! ## Quick start
//!
//! ```
//! use numkern::{Matrix, Vector};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Index origin
//!
//! Storage is zero-based and column-major. `m[(i, j)]` and `v[i]` index from
//! zero; [`Matrix::at`] / [`Vector::at`] and their `_mut` variants index
//! from one, for code written against one-based formulas:
//!
//! ```
//! use numkern::Matrix;
//! let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
//! assert_eq!(m.at(2, 1), m[(1, 0)]);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated [`Matrix<T>`] and [`Vector<T>`] with
//!   arithmetic, norms, traces, centering and the generic [`extrema`] /
//!   [`clip`] helpers.
//!
//! - [`linalg`] — Cholesky, LU (partial pivoting), Gauss-Jordan (full
//!   pivoting), cyclic Jacobi and tridiagonal+QL symmetric eigensolvers and
//!   the SVD. Free functions operate on `&mut impl MatrixMut<T>` in place;
//!   wrapper structs copy their input. [`linalg::solve_equation`] and
//!   [`linalg::pseudo_inverse`] handle rank deficiency by SVD truncation.
//!
//! - [`analysis`] — PCA, Procrustes, non-negative least squares, weakly
//!   constrained and constrained quadratic regression, monotone regression,
//!   power iteration and Mahalanobis distance. Requires `analysis` feature.
//!
//! - [`optim`] — Bracketed scalar root finding ([`optim::newton_bisect`],
//!   [`optim::ridders`]) and [`optim::solve_quadratic`]. Requires `optim`
//!   feature.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats, used by every decomposition
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Errors
//!
//! Every fallible routine returns `Result<_, LinalgError>`. Iterative engines
//! log their iteration counts at `debug` level and a `warn` line before
//! reporting [`LinalgError::ConvergenceFailure`], through the [`log`] facade.
//!
//! ## Cargo features
//!
//! | Feature    | Default  | Description |
//! |------------|----------|-------------|
//! | `std`      | yes      | Hardware FPU via system libm |
//! | `analysis` | yes      | Statistical analyses (implies `optim`) |
//! | `optim`    | via analysis | Scalar root finding |
//! | `libm`     | baseline | Pure-Rust software float fallback |
//! | `all`      | no       | All features |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "analysis")]
pub mod analysis;
pub mod linalg;
pub mod matrix;
#[cfg(feature = "optim")]
pub mod optim;
pub mod traits;

pub use linalg::LinalgError;
pub use matrix::{clip, extrema, Matrix, Vector};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
