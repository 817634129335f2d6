use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Heap-allocated vector with a runtime length.
///
/// Zero-based `v[i]` indexing; [`at`](Self::at) / [`at_mut`](Self::at_mut)
/// are the one-based boundary accessors.
///
/// ```
/// use numkern::Vector;
///
/// let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.at(3), 3.0);
/// assert!((v.dot(&v) - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Create a vector from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    /// Create a vector filled with `value`.
    pub fn fill(n: usize, value: T) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Dot product.
    ///
    /// ```
    /// use numkern::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> T {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        let mut sum = T::zero();
        for (&a, &b) in self.data.iter().zip(rhs.data.iter()) {
            sum = sum + a * b;
        }
        sum
    }

    /// Sum of the elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }
}

impl<T> Vector<T> {
    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset_one_based(&self, i: usize) -> usize {
        assert!(i >= 1, "index origin is 1: got {}", i);
        assert!(
            i <= self.data.len(),
            "index {} out of bounds for vector of length {}",
            i,
            self.data.len()
        );
        i - 1
    }
}

impl<T: Copy> Vector<T> {
    /// One-based element read: `at(1)` is the first element.
    #[inline]
    pub fn at(&self, i: usize) -> T {
        self.data[self.offset_one_based(i)]
    }

    /// One-based mutable element access.
    #[inline]
    pub fn at_mut(&mut self, i: usize) -> &mut T {
        let k = self.offset_one_based(i);
        &mut self.data[k]
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_and_index() {
        let mut v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        v[1] = 5.0;
        assert_eq!(v.at(2), 5.0);
        *v.at_mut(3) = 0.5;
        assert_eq!(v[2], 0.5);
        assert_eq!(v.sum(), 6.5);
    }

    #[test]
    #[should_panic(expected = "index origin is 1")]
    fn one_based_rejects_zero() {
        let v = Vector::<f64>::zeros(2);
        let _ = v.at(0);
    }

    #[test]
    #[should_panic(expected = "vector length mismatch")]
    fn dot_length_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[1.0]);
        let _ = a.dot(&b);
    }
}
