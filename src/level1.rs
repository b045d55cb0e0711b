//! Level-1 BLAS: vector-vector and vector-scalar kernels.
//!
//! Every kernel takes an element count `n` and one `(buffer, increment)` pair
//! per vector, validates them, and walks the vectors with a
//! [`StridedAccessor`]. Negative increments are accepted where reference BLAS
//! accepts them and traverse the buffer from its end.

use crate::stride::{check_inc, check_len, StridedAccessor};
use crate::{BlasError, BlasFloat, Result};

/// Validate a two-vector kernel call and return both accessors.
///
/// Both buffers are checked for length once the increments are known good.
pub(crate) fn accessor_pair(
    n: usize,
    x_len: usize,
    incx: isize,
    y_len: usize,
    incy: isize,
) -> Result<(StridedAccessor, StridedAccessor)> {
    check_inc(incx)?;
    check_inc(incy)?;
    let ax = StridedAccessor::from_parts(n, incx);
    let ay = StridedAccessor::from_parts(n, incy);
    ax.check_buffer(x_len)?;
    ay.check_buffer(y_len)?;
    Ok((ax, ay))
}

/// Dot product `sum_i x[i] * y[i]`.
///
/// ```
/// use strided_blas::dot;
/// let x = [1.0, 2.0, 3.0];
/// let y = [4.0, 5.0, 6.0];
/// assert_eq!(dot(3, &x, 1, &y, 1).unwrap(), 32.0);
/// ```
pub fn dot<T: BlasFloat>(n: isize, x: &[T], incx: isize, y: &[T], incy: isize) -> Result<T> {
    let n = check_len(n)?;
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    let mut sum = T::zero();
    for (ix, iy) in ax.indices().zip(ay.indices()) {
        sum = sum + y[iy] * x[ix];
    }
    Ok(sum)
}

/// Euclidean norm `sqrt(sum_i x[i]^2)` without intermediate overflow.
///
/// The sum of squares is accumulated relative to the largest magnitude seen
/// so far and renormalised whenever a larger one appears. Only positive
/// increments are accepted.
///
/// ```
/// use strided_blas::nrm2;
/// assert_eq!(nrm2(2, &[3.0, 4.0], 1).unwrap(), 5.0);
/// ```
pub fn nrm2<T: BlasFloat>(n: isize, x: &[T], incx: isize) -> Result<T> {
    let acc = StridedAccessor::forward(n, incx)?;
    if acc.is_empty() {
        return Ok(T::zero());
    }
    acc.check_buffer(x.len())?;
    if acc.len() == 1 {
        return Ok(x[0].abs());
    }

    let mut scale = T::zero();
    let mut sum_squares = T::one();
    for ix in acc.indices() {
        let val = x[ix];
        if val == T::zero() {
            continue;
        }
        let absxi = val.abs();
        if scale < absxi {
            let ratio = scale / absxi;
            sum_squares = T::one() + sum_squares * ratio * ratio;
            scale = absxi;
        } else {
            let ratio = absxi / scale;
            sum_squares = sum_squares + ratio * ratio;
        }
    }
    Ok(scale * sum_squares.sqrt())
}

/// Sum of absolute values `sum_i |x[i]|`.
///
/// Unlike the other kernels, a negative increment is rejected with
/// `InvalidIncrement` instead of traversing the buffer backwards.
pub fn asum<T: BlasFloat>(n: isize, x: &[T], incx: isize) -> Result<T> {
    let n = check_len(n)?;
    if incx <= 0 {
        return Err(BlasError::InvalidIncrement(incx));
    }
    let acc = StridedAccessor::from_parts(n, incx);
    acc.check_buffer(x.len())?;
    Ok(acc
        .indices()
        .fold(T::zero(), |sum, ix| sum + x[ix].abs()))
}

/// Logical index of the largest element of `x`.
///
/// Values are compared as signed numbers and ties keep the earliest index.
/// Returns 0 for `n == 0` and `n == 1` without reading the buffer.
///
/// ```
/// use strided_blas::iamax;
/// assert_eq!(iamax(4, &[1.0, 5.0, 5.0, 2.0], 1).unwrap(), 1);
/// ```
pub fn iamax<T: BlasFloat>(n: isize, x: &[T], incx: isize) -> Result<usize> {
    let acc = StridedAccessor::forward(n, incx)?;
    if acc.len() < 2 {
        return Ok(0);
    }
    acc.check_buffer(x.len())?;

    let mut idx = 0;
    let mut max = x[0];
    for (i, ix) in acc.indices().enumerate().skip(1) {
        let v = x[ix];
        if v > max {
            max = v;
            idx = i;
        }
    }
    Ok(idx)
}

/// Exchange the elements of `x` and `y`.
pub fn swap<T: BlasFloat>(
    n: isize,
    x: &mut [T],
    incx: isize,
    y: &mut [T],
    incy: isize,
) -> Result<()> {
    let n = check_len(n)?;
    if n == 0 {
        return Ok(());
    }
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    for (ix, iy) in ax.indices().zip(ay.indices()) {
        std::mem::swap(&mut x[ix], &mut y[iy]);
    }
    Ok(())
}

/// Copy `x` into `y`.
pub fn copy<T: BlasFloat>(n: isize, x: &[T], incx: isize, y: &mut [T], incy: isize) -> Result<()> {
    let n = check_len(n)?;
    if n == 0 {
        return Ok(());
    }
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    for (ix, iy) in ax.indices().zip(ay.indices()) {
        y[iy] = x[ix];
    }
    Ok(())
}

/// `y := alpha * x + y`.
///
/// `alpha == 0` leaves `y` untouched.
pub fn axpy<T: BlasFloat>(
    n: isize,
    alpha: T,
    x: &[T],
    incx: isize,
    y: &mut [T],
    incy: isize,
) -> Result<()> {
    let n = check_len(n)?;
    if n == 0 {
        return Ok(());
    }
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    if alpha == T::zero() {
        return Ok(());
    }
    for (ix, iy) in ax.indices().zip(ay.indices()) {
        y[iy] = y[iy] + alpha * x[ix];
    }
    Ok(())
}

/// `x := alpha * x`.
///
/// Only positive increments are accepted. `alpha == 0` leaves `x` untouched,
/// so `NaN` and infinite entries are not turned into `NaN`.
pub fn scal<T: BlasFloat>(n: isize, alpha: T, x: &mut [T], incx: isize) -> Result<()> {
    let acc = StridedAccessor::forward(n, incx)?;
    if acc.is_empty() || alpha == T::zero() {
        return Ok(());
    }
    acc.check_buffer(x.len())?;
    for ix in acc.indices() {
        x[ix] = x[ix] * alpha;
    }
    Ok(())
}
