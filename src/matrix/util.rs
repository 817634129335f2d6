use core::fmt;

use crate::traits::{FloatScalar, Scalar};

use super::{Matrix, Vector};

/// Smallest and largest element of a slice, or `None` when it is empty.
///
/// Works for any partially ordered element; incomparable values (NaN) never
/// replace the current extreme.
///
/// ```
/// use numkern::extrema;
/// assert_eq!(extrema(&[3, -1, 7, 2]), Some((-1, 7)));
/// assert_eq!(extrema::<f64>(&[]), None);
/// ```
pub fn extrema<T: PartialOrd + Copy>(x: &[T]) -> Option<(T, T)> {
    let (&first, rest) = x.split_first()?;
    let mut lo = first;
    let mut hi = first;
    for &v in rest {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    Some((lo, hi))
}

/// Clamp every element of `x` into `[lo, hi]`.
pub fn clip<T: PartialOrd + Copy>(x: &mut [T], lo: T, hi: T) {
    for v in x.iter_mut() {
        if *v < lo {
            *v = lo;
        } else if *v > hi {
            *v = hi;
        }
    }
}

// ── Column statistics ───────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Mean of every column. Zero-row matrices give zero means.
    pub fn column_means(&self) -> Vector<T> {
        let m = self.nrows();
        if m == 0 {
            return Vector::zeros(self.ncols());
        }
        let inv = T::one() / T::from_usize(m);
        Vector::from_vec(
            (0..self.ncols())
                .map(|j| self.col_slice(j).iter().fold(T::zero(), |a, &x| a + x) * inv)
                .collect(),
        )
    }

    /// Subtract the column means in place and return them.
    ///
    /// ```
    /// use numkern::Matrix;
    /// let mut x = Matrix::from_rows(2, 2, &[1.0_f64, 10.0, 3.0, 20.0]);
    /// let means = x.center_columns();
    /// assert_eq!(means.as_slice(), &[2.0, 15.0]);
    /// assert_eq!(x[(0, 1)], -5.0);
    /// ```
    pub fn center_columns(&mut self) -> Vector<T> {
        let means = self.column_means();
        let m = self.nrows();
        for j in 0..self.ncols() {
            let mu = means[j];
            for x in self.as_mut_slice()[j * m..(j + 1) * m].iter_mut() {
                *x = *x - mu;
            }
        }
        means
    }

    /// `XᵀX / (n − ndf)` for already centered data.
    ///
    /// Panics if `ndf >= nrows`.
    pub fn covariance_from_centered(&self, ndf: usize) -> Self {
        assert!(
            ndf < self.nrows(),
            "covariance needs more rows ({}) than lost degrees of freedom ({})",
            self.nrows(),
            ndf
        );
        let scale = T::one() / T::from_usize(self.nrows() - ndf);
        self.mul_tn(self) * scale
    }

    /// Whether the matrix is square and `|a_ij − a_ji| <= tol` everywhere.
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for j in 0..self.ncols() {
            for i in (j + 1)..self.nrows() {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: Scalar + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            write!(f, "[")?;
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn extrema_and_clip() {
        assert_eq!(extrema(&[2.5, -1.0, 4.0]), Some((-1.0, 4.0)));
        let mut x = [-2.0, 0.5, 3.0];
        clip(&mut x, 0.0, 1.0);
        assert_eq!(x, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn covariance() {
        let mut x = Matrix::from_rows(3, 2, &[1.0_f64, 2.0, 2.0, 4.0, 3.0, 6.0]);
        x.center_columns();
        let c = x.covariance_from_centered(1);
        assert!((c[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((c[(0, 1)] - 2.0).abs() < 1e-12);
        assert!((c[(1, 1)] - 4.0).abs() < 1e-12);
        assert!(c.is_symmetric(0.0));
    }

    #[test]
    fn symmetry_check() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0 + 1e-9, 1.0]);
        assert!(a.is_symmetric(1e-8));
        assert!(!a.is_symmetric(1e-10));
        assert!(!Matrix::<f64>::zeros(2, 3).is_symmetric(1.0));
    }

    #[test]
    fn display() {
        let a = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
        assert_eq!(format!("{}", a), "[1, 2]\n[3, 4]\n");
    }
}
