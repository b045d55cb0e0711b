//! Scalar type bounds for the Level-1 kernels and the matrix views.

use num_complex::Complex;
use num_traits::Float;
use std::fmt::Debug;

/// Real floating-point element usable with the Level-1 kernels.
///
/// Besides the usual [`Float`] operations this carries the rescaling
/// constants of the modified Givens rotation generator. The values are the
/// reference BLAS ones for both precisions; `RGAMSQ` is the rounded
/// literal `5.9604645e-8` rather than an exact `2^-24`.
pub trait BlasFloat: Float + Debug + Send + Sync + 'static {
    /// Rescaling factor applied to rows of `H`.
    const GAM: Self;
    /// `GAM * GAM`: upper bound for the scale factors `d1`, `d2`.
    const GAMSQ: Self;
    /// Lower bound for the scale factors `d1`, `d2`.
    const RGAMSQ: Self;
}

impl BlasFloat for f64 {
    const GAM: f64 = 4096.0;
    const GAMSQ: f64 = 16777216.0;
    const RGAMSQ: f64 = 5.9604645e-8;
}

impl BlasFloat for f32 {
    const GAM: f32 = 4096.0;
    const GAMSQ: f32 = 16777216.0;
    const RGAMSQ: f32 = 5.9604645e-8;
}

/// `|magnitude|` with the sign of `sign`.
#[inline]
pub(crate) fn copysign<T: Float>(magnitude: T, sign: T) -> T {
    if sign.is_sign_negative() {
        -magnitude.abs()
    } else {
        magnitude.abs()
    }
}

/// Element types that can be conjugated.
///
/// Hermitian views read the unstored triangle as the conjugate of the
/// mirrored stored element; for real types conjugation is the identity.
pub trait Conjugate: Copy {
    fn conj(self) -> Self;
}

macro_rules! impl_conjugate_real {
    ($($t:ty),*) => {
        $(
            impl Conjugate for $t {
                #[inline(always)]
                fn conj(self) -> Self { self }
            }
        )*
    };
}

impl_conjugate_real!(f32, f64);

impl<T: Float> Conjugate for Complex<T> {
    #[inline(always)]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn assert_blas_float<T: BlasFloat>() {}

    #[test]
    fn test_standard_types() {
        assert_blas_float::<f32>();
        assert_blas_float::<f64>();
    }

    #[test]
    fn test_rotation_constants() {
        assert_eq!(f64::GAM * f64::GAM, f64::GAMSQ);
        assert_eq!(f64::RGAMSQ, 5.9604645e-8);
        // RGAMSQ is not the exact reciprocal of GAMSQ.
        assert_ne!(f64::RGAMSQ, 1.0 / f64::GAMSQ);
        assert_eq!(f32::GAMSQ, 16777216.0);
    }

    #[test]
    fn test_copysign() {
        assert_eq!(copysign(5.0, -1.0), -5.0);
        assert_eq!(copysign(-5.0, 2.0), 5.0);
        assert_eq!(copysign(3.0_f64, -0.0), -3.0);
    }

    #[test]
    fn test_conj() {
        assert_eq!(Conjugate::conj(2.5_f64), 2.5);
        let z = Complex64::new(1.0, -2.0);
        assert_eq!(Conjugate::conj(z), Complex64::new(1.0, 2.0));
        assert_eq!(Conjugate::conj(-0.5_f32), -0.5);
        let w = Complex::new(0.0_f32, 3.0);
        assert_eq!(Conjugate::conj(w), Complex::new(0.0, -3.0));
    }
}
