use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{split_two_col_slices, LinalgError};
use crate::matrix::{try_vec, Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm[i]` is the original row that ended up in row `i`. Returns the sign
/// of the row permutation (`+1` or `-1`).
///
/// A column with no non-zero candidate pivot makes the matrix singular:
/// [`LinalgError::Singular`] is returned and `a` is left partially
/// eliminated. Badly scaled but invertible matrices are accepted.
pub fn lu_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<T, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "LU decomposition requires a square matrix",
        ));
    }
    if perm.len() != n {
        return Err(LinalgError::InvalidPrecondition(
            "permutation length must match matrix size",
        ));
    }

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }
    let mut sign = T::one();

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let val = a.get(row, col).abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if !(max_val > T::zero()) {
            return Err(LinalgError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            for j in 0..n {
                let tmp = *a.get(col, j);
                *a.get_mut(col, j) = *a.get(max_row, j);
                *a.get_mut(max_row, j) = tmp;
            }
            sign = -sign;
        }

        // dgetf2-style elimination on contiguous column slices.
        let inv_pivot = T::one() / *a.get(col, col);
        for x in a.col_as_mut_slice(col, col + 1).iter_mut() {
            *x = *x * inv_pivot;
        }

        for j in (col + 1)..n {
            let a_col_j = *a.get(col, j);
            let (left, right) = split_two_col_slices(a, col, j, col + 1);
            for (r, &l) in right.iter_mut().zip(left.iter()) {
                *r = *r - a_col_j * l;
            }
        }
    }

    Ok(sign)
}

/// Solve Ax = b given the packed LU decomposition and permutation.
///
/// `lu` is the packed L/U matrix from [`lu_in_place`].
/// `perm` is the row permutation from [`lu_in_place`].
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Ly = Pb
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition with partial pivoting.
///
/// # Example
///
/// ```
/// use numkern::{Matrix, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu().unwrap();
///
/// let b = Vector::from_slice(&[4.0, 11.0]);
/// let x = lu.solve(&b);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Lu<T> {
    lu: Matrix<T>,
    perm: Vec<usize>,
    sign: T,
}

impl<T: FloatScalar> Lu<T> {
    /// Decompose a square matrix. `a` is not modified.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let mut lu = a.clone();
        let mut perm = try_vec(a.nrows(), 0usize)?;
        let sign = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, sign })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &Vector<T>) -> Vector<T> {
        let n = self.lu.nrows();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu, &self.perm, b.as_slice(), &mut x);
        Vector::from_vec(x)
    }

    /// Compute the matrix inverse, one column at a time.
    pub fn inverse(&self) -> Matrix<T> {
        let n = self.lu.nrows();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![T::zero(); n];

        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&self.lu, &self.perm, &e, inv.col_as_mut_slice(col, 0));
        }

        inv
    }

    /// Determinant: permutation sign times the product of U's diagonal.
    pub fn det(&self) -> T {
        (0..self.lu.nrows()).fold(self.sign, |d, i| d * self.lu[(i, i)])
    }

    /// `+1` for an even number of row interchanges, `-1` for odd.
    pub fn permutation_sign(&self) -> T {
        self.sign
    }

    /// Row permutation: row `i` of the factored matrix is row `pivots()[i]`
    /// of the input.
    pub fn pivots(&self) -> &[usize] {
        &self.perm
    }

    /// Packed L and U factors.
    pub fn factors(&self) -> &Matrix<T> {
        &self.lu
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<Lu<T>, LinalgError> {
        Lu::new(self)
    }

    /// Solve `Ax = b` for square `A` via LU decomposition.
    ///
    /// ```
    /// use numkern::{Matrix, Vector};
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
    /// let x = a.solve(&Vector::from_slice(&[4.0, 11.0])).unwrap();
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if b.len() != self.nrows() {
            return Err(LinalgError::InvalidPrecondition("rhs length mismatch"));
        }
        Ok(self.lu()?.solve(b))
    }

    /// Matrix inverse via LU decomposition.
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        Ok(self.lu()?.inverse())
    }

    /// Determinant via LU decomposition. A singular matrix has determinant
    /// zero.
    pub fn det(&self) -> Result<T, LinalgError> {
        match self.lu() {
            Ok(lu) => Ok(lu.det()),
            Err(LinalgError::Singular) => Ok(T::zero()),
            Err(e) => Err(e),
        }
    }
}
