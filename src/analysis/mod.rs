//! Statistical analyses built on the decompositions in [`linalg`](crate::linalg).
//!
//! Every routine here reads its inputs and returns owned results. Failures
//! from the underlying engines are propagated unchanged.
//!
//! | Analysis | Engine |
//! |---|---|
//! | [`Pca`], [`principal_components_symmetric`], [`project_rows`] | SVD, symmetric eigen |
//! | [`procrustes`] | SVD |
//! | [`nonnegative_least_squares`] | truncated SVD solve on the free set |
//! | [`weakly_constrained_regression`] | SVD + [`newton_bisect`](crate::optim::newton_bisect) |
//! | [`constrained_quadratic_regression`] | Cholesky, symmetric eigen + [`newton_bisect`](crate::optim::newton_bisect) |
//! | [`monotone_regression`] | pool adjacent violators |
//! | [`PowerIteration`], [`dominant_eigenvector`] | matrix-vector products |
//! | [`mahalanobis_squared`] | inverse Cholesky factor |

mod constrained_quadratic;
mod mahalanobis;
mod monotone;
mod nnls;
mod pca;
mod power;
mod procrustes;
mod weak_regression;


pub use constrained_quadratic::{constrained_quadratic_regression, ConstrainedQuadratic};
pub use mahalanobis::{mahalanobis_squared, mahalanobis_squared_diagonal};
pub use monotone::{monotone_regression, monotone_regression_weighted};
pub use nnls::{nonnegative_least_squares, NnlsSettings};
pub use pca::{principal_components_symmetric, project_rows, Pca};
pub use power::{dominant_eigenvector, DominantEigen, PowerIteration, PowerSettings};
pub use procrustes::{procrustes, Procrustes, ProcrustesSettings};
pub use weak_regression::weakly_constrained_regression;
