use crate::traits::{FloatScalar, Scalar};

use super::{Matrix, Vector};

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Squared L2 norm. No sqrt, works with integers.
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: FloatScalar> Vector<T> {
    /// L2 (Euclidean) norm.
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// L1 norm (sum of absolute values).
    pub fn norm_l1(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x.abs())
    }

    /// Scale to unit L2 norm and return the norm before scaling.
    ///
    /// A zero vector is left unchanged and `0` is returned.
    ///
    /// ```
    /// use numkern::Vector;
    /// let mut v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert_eq!(v.normalize_l2(), 5.0);
    /// assert!((v.norm() - 1.0).abs() < 1e-15);
    /// ```
    pub fn normalize_l2(&mut self) -> T {
        let n = self.norm();
        scale_to(self.as_mut_slice(), n, T::one());
        n
    }

    /// Scale to unit L1 norm and return the norm before scaling.
    pub fn normalize_l1(&mut self) -> T {
        let n = self.norm_l1();
        scale_to(self.as_mut_slice(), n, T::one());
        n
    }
}

fn scale_to<T: FloatScalar>(x: &mut [T], current: T, target: T) {
    if current == T::zero() {
        return;
    }
    let s = target / current;
    for v in x.iter_mut() {
        *v = *v * s;
    }
}

// ── Matrix norms and traces ─────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Squared Frobenius norm. No sqrt.
    pub fn frobenius_norm_squared(&self) -> T {
        self.as_slice().iter().fold(T::zero(), |acc, &x| acc + x * x)
    }

    /// Sum of the diagonal. Panics if not square.
    pub fn trace(&self) -> T {
        assert!(self.is_square(), "trace requires a square matrix");
        (0..self.nrows()).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }

    /// `tr(A·B)` without forming the product.
    pub fn trace_nn(&self, b: &Self) -> T {
        assert!(
            self.ncols() == b.nrows() && self.nrows() == b.ncols(),
            "dimension mismatch in trace of product"
        );
        let mut sum = T::zero();
        for i in 0..self.nrows() {
            for k in 0..self.ncols() {
                sum = sum + self[(i, k)] * b[(k, i)];
            }
        }
        sum
    }

    /// `tr(A·Bᵀ)`, the sum of element-wise products.
    pub fn trace_nt(&self, b: &Self) -> T {
        assert!(
            self.nrows() == b.nrows() && self.ncols() == b.ncols(),
            "dimension mismatch in trace of product"
        );
        self.as_slice()
            .iter()
            .zip(b.as_slice().iter())
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
    }

    /// `tr(Aᵀ·B)`; equal to `trace_nt` for same-shaped operands.
    pub fn trace_tn(&self, b: &Self) -> T {
        self.trace_nt(b)
    }

    /// `tr(Aᵀ·Bᵀ)` = `tr(B·A)`.
    pub fn trace_tt(&self, b: &Self) -> T {
        b.trace_nn(self)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> T {
        self.frobenius_norm_squared().sqrt()
    }

    /// Largest absolute element; zero for an empty matrix.
    pub fn max_abs(&self) -> T {
        self.as_slice()
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }

    /// Rescale each row to L2 norm `target`. Zero rows are left alone.
    pub fn normalize_rows(&mut self, target: T) {
        for i in 0..self.nrows() {
            let mut ss = T::zero();
            for j in 0..self.ncols() {
                ss = ss + self[(i, j)] * self[(i, j)];
            }
            let n = ss.sqrt();
            if n == T::zero() {
                continue;
            }
            let s = target / n;
            for j in 0..self.ncols() {
                self[(i, j)] = self[(i, j)] * s;
            }
        }
    }

    /// Rescale each column to L2 norm `target`. Zero columns are left alone.
    pub fn normalize_columns(&mut self, target: T) {
        let m = self.nrows();
        for j in 0..self.ncols() {
            let col = &mut self.as_mut_slice()[j * m..(j + 1) * m];
            let n = col.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt();
            scale_to(col, n, target);
        }
    }

    /// Rescale the whole matrix to Frobenius norm `target`; returns the
    /// norm before scaling.
    pub fn normalize(&mut self, target: T) -> T {
        let n = self.frobenius_norm();
        scale_to(self.as_mut_slice(), n, target);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    #[test]
    fn vector_norms() {
        let mut v = Vector::from_slice(&[1.0, -2.0, 2.0]);
        assert_near(v.norm(), 3.0, TOL, "l2");
        assert_near(v.norm_l1(), 5.0, TOL, "l1");
        let old = v.normalize_l1();
        assert_near(old, 5.0, TOL, "returned l1");
        assert_near(v.norm_l1(), 1.0, TOL, "unit l1");
    }

    #[test]
    fn zero_vector_normalize_is_noop() {
        let mut v = Vector::<f64>::zeros(3);
        assert_eq!(v.normalize_l2(), 0.0);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn traces_of_products() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 2, &[1.0, 0.0, 2.0, 1.0, 0.0, 3.0]);
        assert_near(a.trace_nn(&b), (&a * &b).trace(), TOL, "nn");
        assert_near(a.trace_tt(&b), (&a.transpose() * &b.transpose()).trace(), TOL, "tt");
        let c = Matrix::from_rows(2, 3, &[0.5, 1.0, -1.0, 2.0, 0.0, 1.0]);
        assert_near(a.trace_nt(&c), (&a * &c.transpose()).trace(), TOL, "nt");
        assert_near(a.trace_tn(&c), (&a.transpose() * &c).trace(), TOL, "tn");
    }

    #[test]
    fn matrix_normalization() {
        let mut m = Matrix::from_rows(2, 2, &[3.0, 4.0, 0.0, 0.0]);
        m.normalize_rows(1.0);
        assert_near(m[(0, 0)], 0.6, TOL, "row 0");
        assert_eq!(m[(1, 1)], 0.0);

        let mut m = Matrix::from_rows(2, 2, &[3.0, 1.0, 4.0, 0.0]);
        m.normalize_columns(2.0);
        assert_near(m[(1, 0)], 1.6, TOL, "column 0");
        assert_near(m[(0, 1)], 2.0, TOL, "column 1");

        let mut m = Matrix::from_rows(1, 2, &[3.0, 4.0]);
        assert_near(m.normalize(1.0), 5.0, TOL, "old norm");
        assert_near(m.frobenius_norm(), 1.0, TOL, "new norm");
    }
}
