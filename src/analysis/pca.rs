use alloc::vec::Vec;

use crate::linalg::{EigenOrder, LinalgError, Svd, SymmetricEigen};
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Principal component analysis of an observations × variables matrix.
///
/// Columns are centered, the centered data is decomposed by SVD and the
/// first `k` right singular vectors are kept. The sign of each component is
/// arbitrary.
///
/// ```
/// use numkern::{Matrix, analysis::Pca};
///
/// // points on the line y = 2x
/// let data = Matrix::from_rows(4, 2, &[0.0_f64, 0.0, 1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
/// let pca = Pca::new(&data, 1).unwrap();
/// let d = pca.directions();
/// assert!((d[(1, 0)] / d[(0, 0)] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Pca<T> {
    means: Vector<T>,
    singular_values: Vector<T>,
    directions: Matrix<T>,
    scores: Matrix<T>,
}

impl<T: FloatScalar> Pca<T> {
    /// Fit `k` components. `data` is not modified.
    ///
    /// # Errors
    ///
    /// [`LinalgError::InvalidPrecondition`] when `k == 0`, `k` exceeds the
    /// number of columns or singular values, or there are fewer than two
    /// rows. SVD failures are propagated.
    pub fn new(data: &Matrix<T>, k: usize) -> Result<Self, LinalgError> {
        if k == 0 || k > data.ncols() {
            return Err(LinalgError::InvalidPrecondition(
                "number of components must be in 1..=ncols",
            ));
        }
        if data.nrows() < 2 {
            return Err(LinalgError::InvalidPrecondition("at least two observations are required"));
        }
        let mut centered = data.clone();
        let means = centered.center_columns();
        let svd = Svd::new(&centered)?;
        if k > svd.singular_values().len() {
            return Err(LinalgError::InvalidPrecondition(
                "more components requested than singular values",
            ));
        }
        let cols: Vec<usize> = (0..k).collect();
        let directions = svd.v().select_columns(&cols);
        let singular_values = Vector::from_slice(&svd.singular_values().as_slice()[..k]);
        let scores = &centered * &directions;
        Ok(Self {
            means,
            singular_values,
            directions,
            scores,
        })
    }

    /// Column means subtracted before the decomposition.
    pub fn means(&self) -> &Vector<T> {
        &self.means
    }

    /// The `k` largest singular values of the centered data, descending.
    pub fn singular_values(&self) -> &Vector<T> {
        &self.singular_values
    }

    /// Unit principal directions as columns (ncols × k).
    pub fn directions(&self) -> &Matrix<T> {
        &self.directions
    }

    /// Directions scaled by their singular values.
    pub fn loadings(&self) -> Matrix<T> {
        let mut l = self.directions.clone();
        let n = l.nrows();
        for (j, &w) in self.singular_values.iter().enumerate() {
            for x in l.as_mut_slice()[j * n..(j + 1) * n].iter_mut() {
                *x = *x * w;
            }
        }
        l
    }

    /// Centered observations projected on the directions (nrows × k).
    pub fn scores(&self) -> &Matrix<T> {
        &self.scores
    }

    /// Variance along each component, `w² / (nrows − 1)`.
    pub fn explained_variance(&self) -> Vector<T> {
        let ndf = T::from_usize(self.scores.nrows() - 1);
        Vector::from_vec(self.singular_values.iter().map(|&w| w * w / ndf).collect())
    }

    /// Project new observations (rows) on the fitted components.
    pub fn transform(&self, data: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        if data.ncols() != self.means.len() {
            return Err(LinalgError::InvalidPrecondition(
                "data must have as many columns as the fitted data",
            ));
        }
        let mut centered = data.clone();
        for j in 0..centered.ncols() {
            let mj = self.means[j];
            for i in 0..centered.nrows() {
                centered[(i, j)] = centered[(i, j)] - mj;
            }
        }
        Ok(&centered * &self.directions)
    }
}

/// The eigenvectors of the `k` largest eigenvalues of a symmetric matrix,
/// as columns ordered by descending eigenvalue.
pub fn principal_components_symmetric<T: FloatScalar>(a: &Matrix<T>, k: usize) -> Result<Matrix<T>, LinalgError> {
    if k == 0 || k > a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "number of components must be in 1..=ncols",
        ));
    }
    let mut eig = SymmetricEigen::new(a)?;
    eig.sort(EigenOrder::Descending);
    let cols: Vec<usize> = (0..k).collect();
    Ok(eig.eigenvectors().select_columns(&cols))
}

/// Project every row of `data` on the first `k` columns of `eigenvectors`.
///
/// Returns an nrows × k matrix. The data is not centered.
pub fn project_rows<T: FloatScalar>(
    data: &Matrix<T>,
    eigenvectors: &Matrix<T>,
    k: usize,
) -> Result<Matrix<T>, LinalgError> {
    if data.ncols() != eigenvectors.nrows() {
        return Err(LinalgError::InvalidPrecondition(
            "eigenvector dimension must equal the number of data columns",
        ));
    }
    if k == 0 || k > eigenvectors.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "number of eigenvectors must be in 1..=ncols",
        ));
    }
    let mut out = Matrix::try_zeros(data.nrows(), k)?;
    for c in 0..k {
        let e = eigenvectors.col_slice(c);
        for i in 0..data.nrows() {
            let mut s = T::zero();
            for (j, &ej) in e.iter().enumerate() {
                s = s + data[(i, j)] * ej;
            }
            out[(i, c)] = s;
        }
    }
    Ok(out)
}
