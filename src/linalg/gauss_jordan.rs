use crate::linalg::LinalgError;
use crate::matrix::{try_vec, Matrix};
use crate::traits::{FloatScalar, MatrixMut};

/// Invert a square matrix in place by Gauss-Jordan elimination with full
/// pivoting.
///
/// On success `a` holds A⁻¹. Returns [`LinalgError::Singular`] when only
/// zero pivots remain; `a` is then partially reduced.
///
/// ```
/// use numkern::{Matrix, linalg::gauss_jordan_in_place};
/// let mut a = Matrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
/// gauss_jordan_in_place(&mut a).unwrap();
/// assert!((a[(0, 0)] - 0.6).abs() < 1e-12);
/// assert!((a[(0, 1)] + 0.7).abs() < 1e-12);
/// ```
pub fn gauss_jordan_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<(), LinalgError> {
    let mut none = Matrix::<T>::zeros(a.nrows(), 0);
    gauss_jordan_solve_in_place(a, &mut none)
}

/// Solve A·X = B for all columns of B at once, replacing `a` by A⁻¹ and `b`
/// by the solution X.
///
/// `a` must be square (n×n) and `b` must have n rows; any number of columns
/// is accepted, including zero. Shapes are checked before anything is
/// overwritten.
pub fn gauss_jordan_solve_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    b: &mut impl MatrixMut<T>,
) -> Result<(), LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::InvalidPrecondition(
            "Gauss-Jordan elimination requires a square matrix",
        ));
    }
    if b.nrows() != n {
        return Err(LinalgError::InvalidPrecondition(
            "right-hand side must have as many rows as the matrix",
        ));
    }
    let m = b.ncols();

    let mut pivoted = try_vec(n, false)?;
    let mut indxr = try_vec(n, 0usize)?;
    let mut indxc = try_vec(n, 0usize)?;

    for i in 0..n {
        // Full pivot search over rows and columns not yet used.
        let mut big = -T::one();
        let mut irow = 0;
        let mut icol = 0;
        for j in 0..n {
            if pivoted[j] {
                continue;
            }
            for k in 0..n {
                if pivoted[k] {
                    continue;
                }
                let v = a.get(j, k).abs();
                if v > big {
                    big = v;
                    irow = j;
                    icol = k;
                }
            }
        }
        if !(big > T::zero()) {
            return Err(LinalgError::Singular);
        }
        pivoted[icol] = true;

        // Move the pivot onto the diagonal; the column interchange is
        // recorded and undone at the end.
        if irow != icol {
            for l in 0..n {
                let tmp = *a.get(irow, l);
                *a.get_mut(irow, l) = *a.get(icol, l);
                *a.get_mut(icol, l) = tmp;
            }
            for l in 0..m {
                let tmp = *b.get(irow, l);
                *b.get_mut(irow, l) = *b.get(icol, l);
                *b.get_mut(icol, l) = tmp;
            }
        }
        indxr[i] = irow;
        indxc[i] = icol;

        let pivinv = T::one() / *a.get(icol, icol);
        *a.get_mut(icol, icol) = T::one();
        for l in 0..n {
            *a.get_mut(icol, l) = *a.get(icol, l) * pivinv;
        }
        for l in 0..m {
            *b.get_mut(icol, l) = *b.get(icol, l) * pivinv;
        }

        for ll in 0..n {
            if ll == icol {
                continue;
            }
            let dum = *a.get(ll, icol);
            if dum == T::zero() {
                continue;
            }
            *a.get_mut(ll, icol) = T::zero();
            for l in 0..n {
                *a.get_mut(ll, l) = *a.get(ll, l) - *a.get(icol, l) * dum;
            }
            for l in 0..m {
                *b.get_mut(ll, l) = *b.get(ll, l) - *b.get(icol, l) * dum;
            }
        }
    }

    // Unscramble the column interchanges in reverse order.
    for l in (0..n).rev() {
        if indxr[l] != indxc[l] {
            let (c1, c2) = (indxr[l], indxc[l]);
            for k in 0..n {
                let tmp = *a.get(k, c1);
                *a.get_mut(k, c1) = *a.get(k, c2);
                *a.get_mut(k, c2) = tmp;
            }
        }
    }

    Ok(())
}
