use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::Vector;
use crate::traits::FloatScalar;

struct Block<T> {
    mean: T,
    weight: T,
    len: usize,
}

/// Pool adjacent violators over `(value, weight)` pairs.
fn pava<T: FloatScalar>(x: &[T], w: impl Fn(usize) -> T) -> Vector<T> {
    let mut blocks: Vec<Block<T>> = Vec::with_capacity(x.len());
    for (i, &xi) in x.iter().enumerate() {
        let mut cur = Block {
            mean: xi,
            weight: w(i),
            len: 1,
        };
        while let Some(prev) = blocks.last() {
            if prev.mean <= cur.mean {
                break;
            }
            let weight = prev.weight + cur.weight;
            cur = Block {
                mean: (prev.mean * prev.weight + cur.mean * cur.weight) / weight,
                weight,
                len: prev.len + cur.len,
            };
            blocks.pop();
        }
        blocks.push(cur);
    }

    let mut out = Vec::with_capacity(x.len());
    for b in &blocks {
        out.extend(core::iter::repeat(b.mean).take(b.len));
    }
    Vector::from_vec(out)
}

/// Closest non-decreasing sequence to `x` in the least-squares sense.
///
/// Adjacent values that violate the ordering are pooled into their mean
/// until the sequence is non-decreasing. Already ordered input is returned
/// unchanged.
///
/// ```
/// use numkern::{Vector, analysis::monotone_regression};
///
/// let y = monotone_regression(&Vector::from_slice(&[1.0_f64, 3.0, 2.0, 4.0]));
/// assert_eq!(y.as_slice(), &[1.0, 2.5, 2.5, 4.0]);
/// ```
pub fn monotone_regression<T: FloatScalar>(x: &Vector<T>) -> Vector<T> {
    pava(x.as_slice(), |_| T::one())
}

/// Weighted variant of [`monotone_regression`]; pooled values are weighted
/// means.
///
/// # Errors
///
/// [`LinalgError::InvalidPrecondition`] when the lengths differ or a weight
/// is not strictly positive.
pub fn monotone_regression_weighted<T: FloatScalar>(x: &Vector<T>, w: &Vector<T>) -> Result<Vector<T>, LinalgError> {
    if w.len() != x.len() {
        return Err(LinalgError::InvalidPrecondition("weights must match the data length"));
    }
    if w.iter().any(|&wi| !(wi > T::zero())) {
        return Err(LinalgError::InvalidPrecondition("weights must be positive"));
    }
    Ok(pava(x.as_slice(), |i| w[i]))
}
