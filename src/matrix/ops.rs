use alloc::vec::Vec;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::{Matrix, Vector};

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} + {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Matrix::from_vec(self.nrows, self.ncols, data)
    }
}

impl<T: Scalar> Add for Matrix<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} += {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Matrix::from_vec(self.nrows, self.ncols, data)
    }
}

impl<T: Scalar> Sub for Matrix<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} -= {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        Matrix::from_vec(
            self.nrows,
            self.ncols,
            self.data.iter().map(|&x| -x).collect(),
        )
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        Matrix::from_vec(
            self.nrows,
            self.ncols,
            self.data.iter().map(|&x| x * rhs).collect(),
        )
    }
}

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, rhs: T) -> Matrix<T> {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
        self
    }
}

// ── Matrix products ─────────────────────────────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    /// `C = A * B`, accumulated column by column.
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let mut out = Matrix::zeros(m, rhs.ncols);
        for j in 0..rhs.ncols {
            for k in 0..self.ncols {
                let b = rhs.data[j * rhs.nrows + k];
                if b == T::zero() {
                    continue;
                }
                let a_col = &self.data[k * m..(k + 1) * m];
                let c_col = &mut out.data[j * m..(j + 1) * m];
                for (c, &a) in c_col.iter_mut().zip(a_col.iter()) {
                    *c = *c + a * b;
                }
            }
        }
        out
    }
}

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Matrix<T> {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(
            self.ncols,
            rhs.len(),
            "dimension mismatch: {}x{} * vector of length {}",
            self.nrows,
            self.ncols,
            rhs.len(),
        );
        let mut out = Vector::zeros(self.nrows);
        for k in 0..self.ncols {
            let b = rhs[k];
            for (i, &a) in self.col_slice(k).iter().enumerate() {
                out[i] = out[i] + a * b;
            }
        }
        out
    }
}

impl<T: Scalar> Matrix<T> {
    /// Transpose.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!((t.nrows(), t.ncols()), (3, 2));
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// `Xᵀ · Y` without forming the transpose.
    pub fn mul_tn(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.nrows, rhs.nrows,
            "dimension mismatch: ({}x{})ᵀ * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Matrix::from_fn(self.ncols, rhs.ncols, |i, j| {
            dot_slices(self.col_slice(i), rhs.col_slice(j))
        })
    }

    /// `X · Yᵀ` without forming the transpose.
    pub fn mul_nt(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.ncols, rhs.ncols,
            "dimension mismatch: {}x{} * ({}x{})ᵀ",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let mut out = Matrix::zeros(self.nrows, rhs.nrows);
        for k in 0..self.ncols {
            for j in 0..rhs.nrows {
                let b = rhs[(j, k)];
                for i in 0..self.nrows {
                    out[(i, j)] = out[(i, j)] + self[(i, k)] * b;
                }
            }
        }
        out
    }

    /// `Xᵀ · v`.
    pub fn tr_mul_vec(&self, v: &Vector<T>) -> Vector<T> {
        assert_eq!(
            self.nrows,
            v.len(),
            "dimension mismatch: ({}x{})ᵀ * vector of length {}",
            self.nrows,
            self.ncols,
            v.len(),
        );
        let data: Vec<T> = (0..self.ncols)
            .map(|j| dot_slices(self.col_slice(j), v.as_slice()))
            .collect();
        Vector::from_vec(data)
    }
}

#[inline]
pub(crate) fn dot_slices<T: Scalar>(a: &[T], b: &[T]) -> T {
    let mut sum = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        sum = sum + x * y;
    }
    sum
}

// ── Vector arithmetic ───────────────────────────────────────────────

impl<T: Scalar> Add<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        Vector::from_vec(self.iter().zip(rhs.iter()).map(|(&a, &b)| a + b).collect())
    }
}

impl<T: Scalar> Sub<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        Vector::from_vec(self.iter().zip(rhs.iter()).map(|(&a, &b)| a - b).collect())
    }
}

impl<T: Scalar> Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        Vector::from_vec(self.iter().map(|&x| x * rhs).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[4.0, 3.0, 2.0, 1.0]);
        let s = &a + &b;
        assert!(s.as_slice().iter().all(|&x| x == 5.0));
        let d = &s - &b;
        assert_eq!(d, a);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn add_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(2, 3);
        let _ = &a + &b;
    }

    #[test]
    fn matmul() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = &a * &b;
        assert_eq!(c, Matrix::from_rows(2, 2, &[58.0, 64.0, 139.0, 154.0]));
    }

    #[test]
    fn implicit_transpose_products() {
        let x = Matrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = Matrix::from_rows(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(x.mul_tn(&y), &x.transpose() * &y);
        assert_eq!(x.mul_nt(&y), &x * &y.transpose());
        let v = Vector::from_slice(&[1.0, -1.0, 2.0]);
        assert_eq!(x.tr_mul_vec(&v), &x.transpose() * &v);
    }

    #[test]
    fn matvec_and_scale() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let v = Vector::from_slice(&[1.0, 1.0]);
        assert_eq!((&a * &v).as_slice(), &[3.0, 7.0]);
        assert_eq!((&a * 2.0)[(1, 1)], 8.0);
        assert_eq!((-&a)[(0, 1)], -2.0);
    }
}
