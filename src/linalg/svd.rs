use crate::linalg::{rotate_columns, split_two_col_slices, LinalgError, SVD_MAX_ITER};
use crate::matrix::{try_vec, Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

// ── Householder bidiagonalization ───────────────────────────────────

/// `(c, s)` with `[c s; -s c]·[a; b] = [r; 0]`.
#[inline]
fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Apply the left reflector stored in column `k` (rows `k+1..m`, implicit
/// leading 1) to column `j`, rows `k..m`.
#[inline]
fn apply_left_reflector<T: FloatScalar>(a: &mut impl MatrixMut<T>, k: usize, j: usize, tau: T) {
    let (vk, cj) = split_two_col_slices(a, k, j, k);
    let mut dot = cj[0];
    for (&v, &c) in vk[1..].iter().zip(cj[1..].iter()) {
        dot = dot + v * c;
    }
    dot = dot * tau;
    cj[0] = cj[0] - dot;
    for (&v, c) in vk[1..].iter().zip(cj[1..].iter_mut()) {
        *c = *c - dot * v;
    }
}

/// Reduce an m×n matrix (m ≥ n) to upper bidiagonal form `B = Q_Lᵀ A Q_R`.
///
/// Left reflectors are stored below the diagonal (column k, rows k+1..m),
/// right reflectors to the right of the superdiagonal (row k, columns
/// k+2..n), both with an implicit leading 1. `tau_l` / `tau_r` receive the
/// reflector scales; a zero scale means the identity.
fn bidiagonalize<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T],
    off_diag: &mut [T],
    tau_l: &mut [T],
    tau_r: &mut [T],
) {
    let m = a.nrows();
    let n = a.ncols();

    for k in 0..n {
        // ── Left Householder: zero out a[k+1:m, k] ──
        let norm_sq = a
            .col_as_slice(k, k)
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x);

        if norm_sq > T::zero() {
            let akk = *a.get(k, k);
            let sigma = norm_sq.sqrt().with_sign_of(akk);
            let v0 = akk + sigma;
            *a.get_mut(k, k) = v0;
            for x in a.col_as_mut_slice(k, k + 1).iter_mut() {
                *x = *x / v0;
            }
            let tau = v0 / sigma;
            tau_l[k] = tau;

            for j in (k + 1)..n {
                apply_left_reflector(a, k, j, tau);
            }
            diag[k] = -sigma;
        } else {
            tau_l[k] = T::zero();
            diag[k] = T::zero();
        }

        // ── Right Householder: zero out a[k, k+2:n] ──
        if k + 2 < n {
            let mut norm_sq = T::zero();
            for j in (k + 1)..n {
                let val = *a.get(k, j);
                norm_sq = norm_sq + val * val;
            }

            if norm_sq > T::zero() {
                let ak_k1 = *a.get(k, k + 1);
                let sigma = norm_sq.sqrt().with_sign_of(ak_k1);
                let v0 = ak_k1 + sigma;
                *a.get_mut(k, k + 1) = v0;
                for j in (k + 2)..n {
                    let val = *a.get(k, j) / v0;
                    *a.get_mut(k, j) = val;
                }
                let tau = v0 / sigma;
                tau_r[k] = tau;

                for i in (k + 1)..m {
                    let mut dot = *a.get(i, k + 1);
                    for j in (k + 2)..n {
                        dot = dot + *a.get(i, j) * *a.get(k, j);
                    }
                    dot = dot * tau;
                    *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
                    for j in (k + 2)..n {
                        let vj = *a.get(k, j);
                        *a.get_mut(i, j) = *a.get(i, j) - dot * vj;
                    }
                }
                off_diag[k] = -sigma;
            } else {
                tau_r[k] = T::zero();
                off_diag[k] = T::zero();
            }
        } else if k + 1 < n {
            tau_r[k] = T::zero();
            off_diag[k] = *a.get(k, k + 1);
        }
    }
}

/// `V = H_R0 · H_R1 ⋯` from the right reflectors left in `a`.
fn form_right_factor<T: FloatScalar>(a: &impl MatrixRef<T>, tau_r: &[T], v: &mut Matrix<T>) {
    let n = a.ncols();
    for k in 0..n.saturating_sub(2) {
        let tau = tau_r[k];
        if tau == T::zero() {
            continue;
        }
        for row in 0..n {
            let mut dot = v[(row, k + 1)];
            for j in (k + 2)..n {
                dot = dot + v[(row, j)] * *a.get(k, j);
            }
            dot = dot * tau;
            v[(row, k + 1)] = v[(row, k + 1)] - dot;
            for j in (k + 2)..n {
                v[(row, j)] = v[(row, j)] - dot * *a.get(k, j);
            }
        }
    }
}

/// Overwrite `a` with the first n columns of `Q_L = H_L0 ⋯ H_L(n-1)`,
/// accumulating the reflectors backwards so no extra storage is needed.
fn form_left_factor_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, tau_l: &[T]) {
    let n = a.ncols();
    for i in (0..n).rev() {
        let tau = tau_l[i];
        for j in (i + 1)..n {
            apply_left_reflector(a, i, j, tau);
        }
        for x in a.col_as_mut_slice(i, i + 1).iter_mut() {
            *x = -tau * *x;
        }
        *a.get_mut(i, i) = T::one() - tau;
        for x in a.col_as_mut_slice(i, 0)[..i].iter_mut() {
            *x = T::zero();
        }
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Golub-Kahan implicit-shift QR iteration on an upper bidiagonal matrix.
///
/// Rotations are accumulated into the columns of `u` (m×n) and `v` (n×n).
/// On return `diag` holds non-negative singular values sorted descending
/// and `off_diag` is zeroed.
fn bidiagonal_qr<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut Matrix<T>,
) -> Result<(), LinalgError> {
    let n = diag.len();
    let eps = T::epsilon();
    let two = T::lit(2.0);

    let mut bnorm = T::zero();
    for i in 0..n {
        let e = if i + 1 < n { off_diag[i].abs() } else { T::zero() };
        bnorm = bnorm.max(diag[i].abs() + e);
    }
    let zero_tol = eps * bnorm;

    let mut iter = 0usize;
    let mut total = 0usize;
    let mut hi = n.saturating_sub(1);

    while hi > 0 {
        let threshold = eps * (diag[hi - 1].abs() + diag[hi].abs());
        if off_diag[hi - 1].abs() <= threshold {
            off_diag[hi - 1] = T::zero();
            hi -= 1;
            iter = 0;
            continue;
        }

        // Start of the unreduced block ending at hi
        let mut lo = hi - 1;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        iter += 1;
        total += 1;
        if iter > SVD_MAX_ITER {
            log::warn!("svd: singular value {} not converged after {} iterations", hi, SVD_MAX_ITER);
            return Err(LinalgError::ConvergenceFailure);
        }

        // A zero on the diagonal decouples the block: chase the coupling
        // off-diagonal element out with plane rotations.
        if let Some(idx) = (lo..=hi).find(|&i| diag[i].abs() <= zero_tol) {
            diag[idx] = T::zero();
            if idx < hi {
                // Left rotations on rows (j, idx), moving the fill-in right.
                let mut z = off_diag[idx];
                off_diag[idx] = T::zero();
                for j in (idx + 1)..=hi {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j < hi {
                        z = -s * off_diag[j];
                        off_diag[j] = c * off_diag[j];
                    }
                    let (uj, ui) = split_two_col_slices(u, j, idx, 0);
                    rotate_columns(uj, ui, c, s);
                }
            } else {
                // Right rotations on columns (j, hi), moving the fill-in up.
                let mut z = off_diag[hi - 1];
                off_diag[hi - 1] = T::zero();
                for j in (lo..hi).rev() {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j > lo {
                        z = -s * off_diag[j - 1];
                        off_diag[j - 1] = c * off_diag[j - 1];
                    }
                    let (vj, vh) = split_two_col_slices(v, j, hi, 0);
                    rotate_columns(vj, vh, c, s);
                }
            }
            continue;
        }

        // Wilkinson shift from trailing 2×2 of BᵀB
        let d_hi = diag[hi];
        let d_hi1 = diag[hi - 1];
        let e_hi1 = off_diag[hi - 1];
        let e_hi2 = if hi >= lo + 2 { off_diag[hi - 2] } else { T::zero() };

        let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
        let t12 = d_hi1 * e_hi1;
        let t22 = d_hi * d_hi + e_hi1 * e_hi1;
        let d = (t11 - t22) / two;
        let mu = t22 - t12 * t12 / (d + (d * d + t12 * t12).sqrt().with_sign_of(d));

        // Implicit QR chase
        let mut x = diag[lo] * diag[lo] - mu;
        let mut z = diag[lo] * off_diag[lo];

        for k in lo..hi {
            // Right rotation on columns k, k+1 zeroes z
            let (c, s) = givens(x, z);
            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let dk = diag[k];
            let ek = off_diag[k];
            let dk1 = diag[k + 1];
            diag[k] = c * dk + s * ek;
            off_diag[k] = c * ek - s * dk;
            let bulge = s * dk1;
            diag[k + 1] = c * dk1;

            let (vk, vk1) = split_two_col_slices(v, k, k + 1, 0);
            rotate_columns(vk, vk1, c, s);

            // Left rotation on rows k, k+1 zeroes the bulge at B[k+1, k]
            let (c2, s2) = givens(diag[k], bulge);
            diag[k] = c2 * diag[k] + s2 * bulge;
            let old_ek = off_diag[k];
            let old_dk1 = diag[k + 1];
            off_diag[k] = c2 * old_ek + s2 * old_dk1;
            diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

            if k + 1 < hi {
                let old_ek1 = off_diag[k + 1];
                x = off_diag[k];
                z = s2 * old_ek1;
                off_diag[k + 1] = c2 * old_ek1;
            }

            let (uk, uk1) = split_two_col_slices(u, k, k + 1, 0);
            rotate_columns(uk, uk1, c2, s2);
        }
    }

    log::debug!("svd: n={} converged in {} QR sweeps", n, total);

    // Make all singular values non-negative
    for i in 0..n {
        if diag[i] < T::zero() {
            diag[i] = -diag[i];
            for x in u.col_as_mut_slice(i, 0).iter_mut() {
                *x = -*x;
            }
        }
    }

    // Sort singular values descending, permute U and V columns
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            let (a, b) = split_two_col_slices(u, i, max_idx, 0);
            a.swap_with_slice(b);
            let (a, b) = split_two_col_slices(v, i, max_idx, 0);
            a.swap_with_slice(b);
        }
    }

    Ok(())
}

/// Thin singular value decomposition in place: `A = U·diag(w)·Vᵀ`.
///
/// Requires `m ≥ n` (checked before anything is touched). On success `a` is
/// overwritten with U (m×n, orthonormal columns) and the singular values `w`
/// (length n) and right singular vectors `V` (n×n, columns) are returned.
/// Singular values are non-negative and sorted descending; U and V columns
/// are permuted to match.
///
/// More than [`SVD_MAX_ITER`] QR sweeps on a single singular value give
/// [`LinalgError::ConvergenceFailure`]; `a` then holds an unspecified
/// intermediate state.
///
/// ```
/// use numkern::{Matrix, linalg::svd_in_place};
/// let mut a = Matrix::from_rows(3, 2, &[3.0_f64, 0.0, 0.0, -2.0, 0.0, 0.0]);
/// let (w, v) = svd_in_place(&mut a).unwrap();
/// assert!((w[0] - 3.0).abs() < 1e-12);
/// assert!((w[1] - 2.0).abs() < 1e-12);
/// assert_eq!((a.nrows(), a.ncols()), (3, 2));
/// assert_eq!((v.nrows(), v.ncols()), (2, 2));
/// ```
pub fn svd_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<(Vector<T>, Matrix<T>), LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    if m < n {
        return Err(LinalgError::InvalidPrecondition(
            "SVD in place requires at least as many rows as columns",
        ));
    }

    let mut diag = try_vec(n, T::zero())?;
    let mut off_diag = try_vec(n, T::zero())?;
    let mut tau_l = try_vec(n, T::zero())?;
    let mut tau_r = try_vec(n, T::zero())?;
    let mut v = Matrix::try_zeros(n, n)?;
    for i in 0..n {
        v[(i, i)] = T::one();
    }
    if n == 0 {
        return Ok((Vector::from_vec(diag), v));
    }

    bidiagonalize(a, &mut diag, &mut off_diag, &mut tau_l, &mut tau_r);
    form_right_factor(&*a, &tau_r, &mut v);
    form_left_factor_in_place(a, &tau_l);
    bidiagonal_qr(&mut diag, &mut off_diag, a, &mut v)?;

    Ok((Vector::from_vec(diag), v))
}

/// Solve `A·x = b` from a thin SVD: `x = V·diag(1/wⱼ)·Uᵀ·b`.
///
/// Terms with `wⱼ = 0` are skipped, so zeroing small singular values
/// beforehand yields the minimum-norm least-squares solution.
/// `u` is m×k, `w` has length k, `v` is n×k, `b` has length m and `x`
/// length n.
pub fn svd_solve<T: FloatScalar>(
    u: &impl MatrixRef<T>,
    w: &[T],
    v: &impl MatrixRef<T>,
    b: &[T],
    x: &mut [T],
) -> Result<(), LinalgError> {
    let k = w.len();
    if u.ncols() != k || v.ncols() != k || b.len() != u.nrows() || x.len() != v.nrows() {
        return Err(LinalgError::InvalidPrecondition(
            "SVD factors and vectors have inconsistent dimensions",
        ));
    }
    let mut tmp = try_vec(k, T::zero())?;
    for j in 0..k {
        if w[j] != T::zero() {
            let uj = u.col_as_slice(j, 0);
            let s = uj.iter().zip(b.iter()).fold(T::zero(), |acc, (&p, &q)| acc + p * q);
            tmp[j] = s / w[j];
        }
    }
    for xi in x.iter_mut() {
        *xi = T::zero();
    }
    for j in 0..k {
        let t = tmp[j];
        if t == T::zero() {
            continue;
        }
        for (xi, &vij) in x.iter_mut().zip(v.col_as_slice(j, 0).iter()) {
            *xi = *xi + vij * t;
        }
    }
    Ok(())
}

// ── Svd wrapper ─────────────────────────────────────────────────────

/// Thin singular value decomposition of an m×n matrix of any shape.
///
/// `A = U·diag(w)·Vᵀ` with U m×k, w of length k and V n×k, k = min(m, n).
/// Wide matrices are decomposed through their transpose.
///
/// # Example
///
/// ```
/// use numkern::Matrix;
///
/// let a = Matrix::from_rows(2, 3, &[3.0_f64, 2.0, 2.0, 2.0, 3.0, -2.0]);
/// let svd = a.svd().unwrap();
/// let w = svd.singular_values();
/// assert!((w[0] - 5.0).abs() < 1e-12);
/// assert!((w[1] - 3.0).abs() < 1e-12);
/// assert_eq!(svd.v().nrows(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T> {
    u: Matrix<T>,
    w: Vector<T>,
    v: Matrix<T>,
}

impl<T: FloatScalar> Svd<T> {
    /// Compute the thin SVD. `a` is not modified.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = (a.nrows(), a.ncols());
        if m >= n {
            let mut u = a.clone();
            let (w, v) = svd_in_place(&mut u)?;
            Ok(Self { u, w, v })
        } else {
            // Aᵀ = U'·W·V'ᵀ  ⇒  A = V'·W·U'ᵀ
            let mut at = a.transpose();
            let (w, v_t) = svd_in_place(&mut at)?;
            Ok(Self { u: v_t, w, v: at })
        }
    }

    /// Left singular vectors as columns (m×k).
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Right singular vectors as columns (n×k).
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Singular values, non-negative, sorted descending.
    pub fn singular_values(&self) -> &Vector<T> {
        &self.w
    }

    fn max_singular_value(&self) -> T {
        self.w.iter().fold(T::zero(), |acc, &x| acc.max(x))
    }

    /// Zero every singular value below `tol · max(w)` and return how many
    /// remain non-zero.
    pub fn truncate(&mut self, tol: T) -> usize {
        let thresh = tol * self.max_singular_value();
        let mut rank = 0;
        for x in self.w.as_mut_slice().iter_mut() {
            if *x < thresh || *x == T::zero() {
                *x = T::zero();
            } else {
                rank += 1;
            }
        }
        rank
    }

    /// Number of singular values strictly above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.w.iter().filter(|&&s| s > tol).count()
    }

    /// `w_max / w_min`; infinite when the smallest is zero.
    pub fn condition_number(&self) -> T {
        let Some(&s_min) = self.w.as_slice().last() else {
            return T::one();
        };
        if s_min == T::zero() {
            T::infinity()
        } else {
            self.max_singular_value() / s_min
        }
    }

    /// Solve `A·x = b` using the current (possibly truncated) factors.
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        let mut x = Vector::from_vec(try_vec(self.v.nrows(), T::zero())?);
        svd_solve(&self.u, self.w.as_slice(), &self.v, b.as_slice(), x.as_mut_slice())?;
        Ok(x)
    }

    /// `U·diag(w)·Vᵀ`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let mut uw = self.u.clone();
        let m = uw.nrows();
        for (j, &wj) in self.w.iter().enumerate() {
            for x in uw.as_mut_slice()[j * m..(j + 1) * m].iter_mut() {
                *x = *x * wj;
            }
        }
        uw.mul_nt(&self.v)
    }

    /// `(U, w, V)`.
    pub fn into_parts(self) -> (Matrix<T>, Vector<T>, Matrix<T>) {
        (self.u, self.w, self.v)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Thin singular value decomposition.
    pub fn svd(&self) -> Result<Svd<T>, LinalgError> {
        Svd::new(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn assert_orthonormal_columns(q: &Matrix<f64>, name: &str) {
        let qtq = q.mul_tn(q);
        for i in 0..q.ncols() {
            for j in 0..q.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, TOL, &format!("{}ᵀ{}[({},{})]", name, name, i, j));
            }
        }
    }

    fn check_svd(a: &Matrix<f64>) -> Svd<f64> {
        let svd = a.svd().unwrap();
        let k = a.nrows().min(a.ncols());
        assert_eq!(svd.u().ncols(), k);
        assert_eq!(svd.v().ncols(), k);
        assert_orthonormal_columns(svd.u(), "U");
        assert_orthonormal_columns(svd.v(), "V");
        let rec = svd.reconstruct();
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(rec[(i, j)], a[(i, j)], TOL, &format!("A[({},{})]", i, j));
            }
        }
        let w = svd.singular_values();
        for i in 1..w.len() {
            assert!(w[i - 1] >= w[i], "sorted descending");
        }
        assert!(w.iter().all(|&x| x >= 0.0));
        svd
    }

    #[test]
    fn identity_3x3() {
        let svd = check_svd(&Matrix::eye(3));
        for i in 0..3 {
            assert_near(svd.singular_values()[i], 1.0, TOL, &format!("σ[{}]", i));
        }
    }

    #[test]
    fn diagonal_with_negative() {
        let a = Matrix::from_rows(3, 3, &[1.0, 0.0, 0.0, 0.0, -5.0, 0.0, 0.0, 0.0, 3.0]);
        let svd = check_svd(&a);
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ0");
        assert_near(svd.singular_values()[1], 3.0, TOL, "σ1");
        assert_near(svd.singular_values()[2], 1.0, TOL, "σ2");
    }

    #[test]
    fn rank_one_tall() {
        // columns are multiples of (1, 2, 3)
        let a = Matrix::from_rows(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let mut svd = check_svd(&a);
        let expected = (14.0_f64 * 5.0).sqrt();
        assert_near(svd.singular_values()[0], expected, TOL, "σ0");
        assert_near(svd.singular_values()[1], 0.0, TOL, "σ1");
        assert_eq!(svd.truncate(1e-12), 1);
        assert_eq!(svd.singular_values()[1], 0.0);
    }

    #[test]
    fn wide_and_tall_agree() {
        let a = Matrix::from_rows(2, 4, &[1.0, 2.0, 0.0, -1.0, 3.0, 1.0, 4.0, 2.0]);
        let wide = check_svd(&a);
        let tall = check_svd(&a.transpose());
        for i in 0..2 {
            assert_near(wide.singular_values()[i], tall.singular_values()[i], TOL, "same σ");
        }
    }

    #[test]
    fn reconstruction_5x3() {
        let a = Matrix::from_fn(5, 3, |i, j| ((i * 3 + j) as f64).sin() + if i == j { 2.0 } else { 0.0 });
        check_svd(&a);
    }

    #[test]
    fn zero_diagonal_in_bidiagonal() {
        // first column zero: the bidiagonal form starts with a zero diagonal
        let a = Matrix::from_rows(3, 3, &[0.0, 1.0, 2.0, 0.0, 3.0, 1.0, 0.0, 1.0, 1.0]);
        let svd = check_svd(&a);
        assert_near(svd.singular_values()[2], 0.0, TOL, "σ2");
        let b = Matrix::from_rows(3, 3, &[1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        check_svd(&b);
    }

    #[test]
    fn zero_matrix() {
        let svd = check_svd(&Matrix::zeros(3, 2));
        assert!(svd.singular_values().iter().all(|&x| x == 0.0));
        assert_eq!(svd.condition_number(), f64::INFINITY);
    }

    #[test]
    fn in_place_requires_tall() {
        let mut a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
        assert!(matches!(
            svd_in_place(&mut a),
            Err(LinalgError::InvalidPrecondition(_))
        ));
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn solve_square() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let svd = a.svd().unwrap();
        let x = svd.solve(&Vector::from_slice(&[8.0, -11.0, -3.0])).unwrap();
        assert_near(x[0], 2.0, TOL, "x0");
        assert_near(x[1], 3.0, TOL, "x1");
        assert_near(x[2], -1.0, TOL, "x2");
        assert!(svd.condition_number() > 1.0);
        assert_eq!(svd.rank(1e-10), 3);
    }

    #[test]
    fn size_1x1_negative() {
        let svd = check_svd(&Matrix::from_rows(1, 1, &[-7.0]));
        assert_near(svd.singular_values()[0], 7.0, TOL, "σ");
        assert_near(svd.u()[(0, 0)] * svd.v()[(0, 0)], -1.0, TOL, "sign carried by U");
    }

    #[test]
    fn f32_support() {
        let a = Matrix::from_rows(2, 2, &[3.0_f32, 0.0, 4.0, 5.0]);
        let svd = a.svd().unwrap();
        assert!((svd.singular_values()[0] - 45.0_f32.sqrt()).abs() < 1e-4);
        assert!((svd.singular_values()[1] - 5.0_f32.sqrt()).abs() < 1e-4);
    }
}
