use crate::linalg::{pythag, split_two_col_slices, LinalgError, QL_MAX_ITER};
use crate::matrix::{try_vec, Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Symmetric tridiagonal form `T = Qᵀ A Q` produced by [`tridiagonalize`].
#[derive(Debug, Clone)]
pub struct Tridiagonal<T> {
    /// Diagonal of `T`, length n.
    pub diag: Vector<T>,
    /// Sub-diagonal, `off_diag[i] = T[i+1, i]`. Length n; the last entry
    /// is zero so the pair can be handed straight to [`tql_in_place`].
    pub off_diag: Vector<T>,
    /// Orthogonal transform, n×n.
    pub q: Matrix<T>,
}

/// Householder tridiagonalization: reduce a symmetric matrix to tridiagonal
/// form via similarity transforms.
///
/// Returns the diagonal, the sub-diagonal and the accumulated orthogonal
/// transform Q such that `Qᵀ A Q = T`. The input is read but not modified.
pub fn tridiagonalize<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<Tridiagonal<T>, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "tridiagonalize requires a square matrix",
        ));
    }

    // Working copy of the matrix (flat row-major)
    let mut w = try_vec(n * n, T::zero())?;
    for i in 0..n {
        for j in 0..n {
            w[i * n + j] = *a.get(i, j);
        }
    }

    let mut q = Matrix::try_zeros(n, n)?;
    for i in 0..n {
        q[(i, i)] = T::one();
    }
    let mut diag = try_vec(n, T::zero())?;
    let mut off_diag = try_vec(n, T::zero())?;
    let mut p = try_vec(n, T::zero())?;
    let mut q_vec = try_vec(n, T::zero())?;

    let two = T::lit(2.0);

    for k in 0..n.saturating_sub(2) {
        // Householder vector from w[k+1:n, k]
        let wk1k = w[(k + 1) * n + k];
        let mut tail_sq = T::zero();
        for i in (k + 2)..n {
            let v = w[i * n + k];
            tail_sq = tail_sq + v * v;
        }

        // Column already tridiagonal.
        if tail_sq == T::zero() {
            off_diag[k] = wk1k;
            continue;
        }

        let norm = (wk1k * wk1k + tail_sq).sqrt();
        let sigma = norm.with_sign_of(wk1k);
        let v0 = wk1k + sigma;

        let mut v_norm_sq = v0 * v0;
        for i in (k + 2)..n {
            let vi = w[i * n + k];
            v_norm_sq = v_norm_sq + vi * vi;
        }
        let tau = two / v_norm_sq;

        let vk = |w: &[T], jj: usize| if jj == 0 { v0 } else { w[(k + 1 + jj) * n + k] };

        // p = tau * A_sub * v, where A_sub = w[k+1:n, k+1:n]
        let sub_n = n - k - 1;
        for i in 0..sub_n {
            let row = k + 1 + i;
            let mut dot = T::zero();
            for jj in 0..sub_n {
                dot = dot + w[row * n + k + 1 + jj] * vk(&w, jj);
            }
            p[i] = tau * dot;
        }

        let mut vtp = T::zero();
        for i in 0..sub_n {
            vtp = vtp + vk(&w, i) * p[i];
        }

        // q = p - (tau/2)(vᵀp) v
        let half_tau_vtp = tau / two * vtp;
        for i in 0..sub_n {
            q_vec[i] = p[i] - half_tau_vtp * vk(&w, i);
        }

        // Rank-2 update: A_sub -= v qᵀ + q vᵀ
        for i in 0..sub_n {
            let vi = vk(&w, i);
            for j in 0..sub_n {
                let vj = vk(&w, j);
                let idx = (k + 1 + i) * n + k + 1 + j;
                w[idx] = w[idx] - vi * q_vec[j] - q_vec[i] * vj;
            }
        }

        off_diag[k] = -sigma;

        // Q ← Q (I − tau v vᵀ)
        for row in 0..n {
            let mut s = T::zero();
            for m in 0..sub_n {
                s = s + q[(row, k + 1 + m)] * vk(&w, m);
            }
            s = tau * s;
            for j in 0..sub_n {
                q[(row, k + 1 + j)] = q[(row, k + 1 + j)] - s * vk(&w, j);
            }
        }
    }

    for i in 0..n {
        diag[i] = w[i * n + i];
    }
    if n >= 2 {
        off_diag[n - 2] = w[(n - 1) * n + (n - 2)];
    }

    Ok(Tridiagonal {
        diag: Vector::from_vec(diag),
        off_diag: Vector::from_vec(off_diag),
        q,
    })
}

/// Implicit-shift QL iteration on a symmetric tridiagonal matrix.
///
/// - `diag[0..n]`: diagonal, overwritten with the eigenvalues
/// - `off_diag[0..n]`: `off_diag[i]` couples `i` and `i+1`; the last entry
///   is ignored. Destroyed on return.
/// - `q`: n columns; plane rotations are accumulated into it, so passing the
///   `q` from [`tridiagonalize`] yields eigenvectors of the original matrix
///   and passing the identity yields eigenvectors of the tridiagonal one.
///
/// Eigenvalues are left in the order the iteration finds them. More than
/// [`QL_MAX_ITER`] iterations on a single eigenvalue give
/// [`LinalgError::ConvergenceFailure`].
pub fn tql_in_place<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    q: &mut impl MatrixMut<T>,
) -> Result<(), LinalgError> {
    let n = diag.len();
    if off_diag.len() != n || q.ncols() != n {
        return Err(LinalgError::InvalidPrecondition(
            "diagonal, off-diagonal and eigenvector columns must have equal length",
        ));
    }
    if n == 0 {
        return Ok(());
    }
    off_diag[n - 1] = T::zero();

    let eps = T::epsilon();
    let two = T::lit(2.0);
    let mut total = 0usize;

    for l in 0..n {
        let mut iter = 0usize;
        loop {
            // Find a negligible off-diagonal element to split the matrix.
            let mut m = l;
            while m < n - 1 {
                let dd = diag[m].abs() + diag[m + 1].abs();
                if off_diag[m].abs() <= eps * dd {
                    break;
                }
                m += 1;
            }
            if m == l {
                break;
            }

            iter += 1;
            if iter > QL_MAX_ITER {
                log::warn!("tql_in_place: eigenvalue {} not converged after {} iterations", l, QL_MAX_ITER);
                return Err(LinalgError::ConvergenceFailure);
            }
            total += 1;

            let mut g = (diag[l + 1] - diag[l]) / (two * off_diag[l]);
            let mut r = pythag(g, T::one());
            g = diag[m] - diag[l] + off_diag[l] / (g + r.with_sign_of(g));
            let mut s = T::one();
            let mut c = T::one();
            let mut p = T::zero();
            let mut underflow = false;

            for i in (l..m).rev() {
                let f = s * off_diag[i];
                let b = c * off_diag[i];
                r = pythag(f, g);
                off_diag[i + 1] = r;
                if r == T::zero() {
                    // Recover from underflow: deflate and restart this l.
                    diag[i + 1] = diag[i + 1] - p;
                    off_diag[m] = T::zero();
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = diag[i + 1] - p;
                r = (diag[i] - g) * s + two * c * b;
                p = s * r;
                diag[i + 1] = g + p;
                g = c * r - b;

                let (zi, zi1) = split_two_col_slices(q, i, i + 1, 0);
                for (x, y) in zi.iter_mut().zip(zi1.iter_mut()) {
                    let f = *y;
                    *y = s * *x + c * f;
                    *x = c * *x - s * f;
                }
            }
            if underflow {
                continue;
            }
            diag[l] = diag[l] - p;
            off_diag[l] = g;
            off_diag[m] = T::zero();
        }
    }

    log::debug!("tql_in_place: n={} converged in {} iterations", n, total);
    Ok(())
}

/// Sort direction for [`eigen_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EigenOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort eigenvalues and permute eigenvector columns to match.
///
/// Stable insertion sort by adjacent swaps: equal eigenvalues keep their
/// relative order. No allocation.
///
/// ```
/// use numkern::{Matrix, linalg::{eigen_sort, EigenOrder}};
/// let mut vals = [2.0_f64, 3.0, 1.0];
/// let mut vecs = Matrix::<f64>::eye(3);
/// eigen_sort(&mut vals, &mut vecs, EigenOrder::Descending);
/// assert_eq!(vals, [3.0, 2.0, 1.0]);
/// assert_eq!(vecs[(1, 0)], 1.0);
/// ```
pub fn eigen_sort<T: FloatScalar>(values: &mut [T], vectors: &mut impl MatrixMut<T>, order: EigenOrder) {
    let n = values.len();
    assert_eq!(vectors.ncols(), n, "one eigenvector column per eigenvalue");
    let out_of_order = |a: T, b: T| match order {
        EigenOrder::Ascending => a > b,
        EigenOrder::Descending => a < b,
    };
    for i in 1..n {
        let mut j = i;
        while j > 0 && out_of_order(values[j - 1], values[j]) {
            values.swap(j - 1, j);
            let (a, b) = split_two_col_slices(vectors, j - 1, j, 0);
            a.swap_with_slice(b);
            j -= 1;
        }
    }
}

/// Symmetric eigendecomposition by Householder tridiagonalization followed
/// by implicit QL.
///
/// # Example
///
/// ```
/// use numkern::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = a.eig_symmetric().unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vector<T>,
    eigenvectors: Matrix<T>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose a symmetric matrix. Eigenvalues are sorted ascending.
    /// `a` is not modified.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let Tridiagonal {
            mut diag,
            mut off_diag,
            mut q,
        } = tridiagonalize(a)?;
        tql_in_place(diag.as_mut_slice(), off_diag.as_mut_slice(), &mut q)?;
        eigen_sort(diag.as_mut_slice(), &mut q, EigenOrder::Ascending);
        Ok(Self {
            eigenvalues: diag,
            eigenvectors: q,
        })
    }

    /// Eigenvalues in the current order.
    pub fn eigenvalues(&self) -> &Vector<T> {
        &self.eigenvalues
    }

    /// Eigenvectors as columns, matching [`eigenvalues`](Self::eigenvalues).
    pub fn eigenvectors(&self) -> &Matrix<T> {
        &self.eigenvectors
    }

    /// Re-sort eigenvalues and eigenvectors.
    pub fn sort(&mut self, order: EigenOrder) {
        eigen_sort(self.eigenvalues.as_mut_slice(), &mut self.eigenvectors, order);
    }

    /// Consume into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vector<T>, Matrix<T>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Symmetric eigendecomposition, eigenvalues ascending.
    pub fn eig_symmetric(&self) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::jacobi_eigen;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn sample5() -> Matrix<f64> {
        Matrix::from_fn(5, 5, |i, j| {
            let (i, j) = (i as f64, j as f64);
            1.0 / (1.0 + i + j) + if i == j { i } else { 0.0 }
        })
    }

    #[test]
    fn known_2x2() {
        let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let eig = a.eig_symmetric().unwrap();
        assert_near(eig.eigenvalues()[0], 1.0, TOL, "lambda 0");
        assert_near(eig.eigenvalues()[1], 3.0, TOL, "lambda 1");
        let v0 = eig.eigenvectors().column(0);
        let v1 = eig.eigenvectors().column(1);
        let r = 0.5_f64.sqrt();
        assert_near(v0[0].abs(), r, TOL, "v0");
        assert_near(v0[0] + v0[1], 0.0, TOL, "v0 direction (1,-1)");
        assert_near(v1[0] - v1[1], 0.0, TOL, "v1 direction (1,1)");
        assert_near(v1[1].abs(), r, TOL, "v1");
    }

    #[test]
    fn tridiagonal_form() {
        let a = sample5();
        let t = tridiagonalize(&a).unwrap();
        let qtaq = t.q.mul_tn(&(&a * &t.q));
        for i in 0..5 {
            for j in 0..5 {
                let expected = if i == j {
                    t.diag[i]
                } else if i == j + 1 {
                    t.off_diag[j]
                } else if j == i + 1 {
                    t.off_diag[i]
                } else {
                    0.0
                };
                assert_near(qtaq[(i, j)], expected, TOL, &alloc::format!("QtAQ[{},{}]", i, j));
            }
        }
        assert_eq!(t.off_diag[4], 0.0);
    }

    #[test]
    fn reconstruction_and_orthogonality() {
        let a = sample5();
        let eig = a.eig_symmetric().unwrap();
        let v = eig.eigenvectors();
        let mut d = Matrix::zeros(5, 5);
        for i in 0..5 {
            d[(i, i)] = eig.eigenvalues()[i];
        }
        let rec = (v * &d).mul_nt(v);
        let vtv = v.mul_tn(v);
        for i in 0..5 {
            for j in 0..5 {
                assert_near(rec[(i, j)], a[(i, j)], TOL, "V D Vt");
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(vtv[(i, j)], expected, TOL, "Vt V");
            }
        }
        for i in 1..5 {
            assert!(eig.eigenvalues()[i - 1] <= eig.eigenvalues()[i]);
        }
    }

    #[test]
    fn agrees_with_jacobi() {
        let a = sample5();
        let ql = a.eig_symmetric().unwrap();
        let mut jac = jacobi_eigen(&mut a.clone()).unwrap();
        eigen_sort(jac.eigenvalues.as_mut_slice(), &mut jac.eigenvectors, EigenOrder::Ascending);
        for i in 0..5 {
            assert_near(ql.eigenvalues()[i], jac.eigenvalues[i], 1e-9, "same spectrum");
        }
    }

    #[test]
    fn ql_on_identity_basis() {
        // Tridiagonal [2 1 0; 1 2 1; 0 1 2]: eigenvalues 2 - √2, 2, 2 + √2
        let mut d = [2.0, 2.0, 2.0];
        let mut e = [1.0, 1.0, 0.0];
        let mut z = Matrix::<f64>::eye(3);
        tql_in_place(&mut d, &mut e, &mut z).unwrap();
        eigen_sort(&mut d, &mut z, EigenOrder::Ascending);
        let s = 2.0_f64.sqrt();
        assert_near(d[0], 2.0 - s, TOL, "d0");
        assert_near(d[1], 2.0, TOL, "d1");
        assert_near(d[2], 2.0 + s, TOL, "d2");
    }

    #[test]
    fn sort_is_stable() {
        let mut vals = [1.0, 0.0, 1.0];
        let mut vecs = Matrix::from_rows(1, 3, &[10.0, 20.0, 30.0]);
        eigen_sort(&mut vals, &mut vecs, EigenOrder::Descending);
        assert_eq!(vals, [1.0, 1.0, 0.0]);
        assert_eq!(vecs.as_slice(), &[10.0, 30.0, 20.0]);

        let mut eig = Matrix::from_rows(2, 2, &[1.0, 0.0, 0.0, 5.0]).eig_symmetric().unwrap();
        eig.sort(EigenOrder::Descending);
        assert_eq!(eig.eigenvalues()[0], 5.0);
    }

    #[test]
    fn tiny_sizes() {
        let e = Matrix::<f64>::zeros(0, 0).eig_symmetric().unwrap();
        assert!(e.eigenvalues().is_empty());
        let e = Matrix::from_rows(1, 1, &[-4.0]).eig_symmetric().unwrap();
        assert_eq!(e.eigenvalues()[0], -4.0);
        assert_eq!(e.eigenvectors()[(0, 0)], 1.0);
    }

    #[test]
    fn tiny_scale_matrix() {
        // eigenvalues {1, 1, 4}·1e-17
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0]) * 1e-17;
        let eig = a.eig_symmetric().unwrap();
        assert_near(eig.eigenvalues()[0] * 1e17, 1.0, TOL, "lambda 0");
        assert_near(eig.eigenvalues()[1] * 1e17, 1.0, TOL, "lambda 1");
        assert_near(eig.eigenvalues()[2] * 1e17, 4.0, TOL, "lambda 2");
        for k in 0..3 {
            let v = eig.eigenvectors().column(k);
            let r = &(&a * &v) - &(&v * eig.eigenvalues()[k]);
            assert!(r.norm() < 1e-27, "residual {}", r.norm());
        }
    }

    #[test]
    fn tridiagonal_input_passes_through() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 0.0, 2.0, 3.0, 4.0, 0.0, 4.0, 5.0]);
        let t = tridiagonalize(&a).unwrap();
        assert_near(t.off_diag[0].abs(), 2.0, TOL, "e0");
        assert_near(t.off_diag[1].abs(), 4.0, TOL, "e1");
    }

    #[test]
    fn f32_tiny_scale() {
        let a = Matrix::from_rows(3, 3, &[2.0_f32, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0]) * 1e-8;
        let eig = a.eig_symmetric().unwrap();
        let vals: alloc::vec::Vec<f32> = eig.eigenvalues().iter().map(|&x| x * 1e8).collect();
        assert!((vals[0] - 1.0).abs() < 1e-4, "{:?}", vals);
        assert!((vals[1] - 1.0).abs() < 1e-4, "{:?}", vals);
        assert!((vals[2] - 4.0).abs() < 1e-4, "{:?}", vals);
    }

    #[test]
    fn f32_support() {
        let a = Matrix::from_rows(2, 2, &[2.0_f32, 1.0, 1.0, 2.0]);
        let eig = a.eig_symmetric().unwrap();
        assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-5);
    }
}
