use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

/// Trait for types that can be stored in a [`Matrix`](crate::Matrix) or
/// [`Vector`](crate::Vector).
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements, required by every decomposition.
///
/// Covers `f32` and `f64`. All engines in this crate are real-valued.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` literal into `Self`.
    ///
    /// Used for algorithm constants (`0.5`, `100.0`, ...). Values that cannot
    /// be represented map to NaN rather than panicking.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as NumCast>::from(x).unwrap_or_else(Self::nan)
    }

    /// Convert a count (dimension, iteration number) into `Self`.
    #[inline]
    fn from_usize(n: usize) -> Self {
        <Self as NumCast>::from(n).unwrap_or_else(Self::nan)
    }

    /// `|a|` carrying the sign of `b`.
    #[inline]
    fn with_sign_of(self, b: Self) -> Self {
        if b >= Self::zero() {
            self.abs()
        } else {
            -self.abs()
        }
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// Algorithms take `&impl MatrixRef<T>` when they only read their argument.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous view of column `col`, rows `row_start..nrows`.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Algorithms that take `&mut impl MatrixMut<T>` are authorized to overwrite
/// their argument; each documents what is left behind.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable contiguous view of column `col`, rows `row_start..nrows`.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
