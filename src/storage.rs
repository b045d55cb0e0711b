//! Backing storage for vector and matrix views.
//!
//! Views are generic over their storage so the same type covers a borrowed
//! read-only buffer (`&[T]`), a borrowed mutable buffer (`&mut [T]`), and an
//! owned allocation (`Vec<T>`). Borrowed views never copy; mutations through
//! a `&mut [T]` view write through to the caller's buffer.

use num_complex::Complex;
use num_traits::Zero;

use crate::{BlasError, Result};

/// Read access to a flat buffer of elements.
pub trait Storage {
    type Elem;

    fn as_slice(&self) -> &[Self::Elem];
}

/// Write access to a flat buffer of elements.
pub trait StorageMut: Storage {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

impl<T> Storage for Vec<T> {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> StorageMut for Vec<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Storage for &[T] {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> Storage for &mut [T] {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> StorageMut for &mut [T] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

/// Allocate a zeroed buffer holding the product of `dims` elements.
///
/// An empty `dims` yields an empty buffer.
///
/// ```
/// use num_complex::Complex64;
/// use strided_blas::allocate;
/// let buf: Vec<Complex64> = allocate(&[2, 3]);
/// assert_eq!(buf.len(), 6);
/// ```
pub fn allocate<T: Clone + Zero>(dims: &[usize]) -> Vec<T> {
    if dims.is_empty() {
        return Vec::new();
    }
    vec![T::zero(); dims.iter().product()]
}

/// Widen real values into complex values with zero imaginary part.
///
/// # Errors
/// `LengthMismatch` unless both slices have the same length.
pub fn real_to_complex<T: Clone + Zero>(real: &[T], out: &mut [Complex<T>]) -> Result<()> {
    if real.len() != out.len() {
        return Err(BlasError::LengthMismatch(real.len(), out.len()));
    }
    for (dst, re) in out.iter_mut().zip(real) {
        *dst = Complex::new(re.clone(), T::zero());
    }
    Ok(())
}
