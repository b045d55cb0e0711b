//! Plane rotations and modified (scaled) Givens rotations.
//!
//! [`rotg`] builds a rotation that zeroes the second component of `(a, b)`
//! and [`rot`] applies one to a pair of vectors. [`rotmg`] and [`rotm`] are
//! the square-root free variant: the generator carries diagonal scale
//! factors `d1`, `d2` and returns the 2x2 matrix `H` in one of several
//! compressed forms, selected by [`RotmFlag`].

use crate::level1::accessor_pair;
use crate::scalar::copysign;
use crate::stride::check_len;
use crate::{BlasError, BlasFloat, Result};

/// Output of [`rotg`].
///
/// ```text
/// [  c  s ] [ a ]   [ r ]
/// [ -s  c ] [ b ] = [ 0 ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneRotation<T> {
    /// Cosine of the rotation angle.
    pub c: T,
    /// Sine of the rotation angle.
    pub s: T,
    /// Signed length of `(a, b)`.
    pub r: T,
    /// Single-scalar encoding from which `c` and `s` can be recovered.
    pub z: T,
}

/// Generate a plane rotation for `(a, b)`.
///
/// `r` is `hypot(a, b)` carrying the sign of whichever input has the larger
/// magnitude (`b` on ties). `z` is `s` when `|a| > |b|`, `1/c` when
/// `c != 0`, and `1` otherwise. `a == b == 0` yields `c = 1, s = 0, r = a, z = 0`.
///
/// ```
/// use strided_blas::rotg;
/// let rot = rotg(3.0, 4.0);
/// assert_eq!(rot.r, 5.0);
/// assert_eq!((rot.c, rot.s), (0.6, 0.8));
/// ```
pub fn rotg<T: BlasFloat>(a: T, b: T) -> PlaneRotation<T> {
    if a == T::zero() && b == T::zero() {
        return PlaneRotation {
            c: T::one(),
            s: T::zero(),
            r: a,
            z: T::zero(),
        };
    }
    let a_gt_b = a.abs() > b.abs();
    let r = copysign(a.hypot(b), if a_gt_b { a } else { b });
    let c = a / r;
    let s = b / r;
    let z = if a_gt_b {
        s
    } else if c != T::zero() {
        T::one() / c
    } else {
        T::one()
    };
    PlaneRotation { c, s, r, z }
}

/// Apply a plane rotation to the vector pair `(x, y)`:
/// `x[i], y[i] = c*x[i] + s*y[i], c*y[i] - s*x[i]`.
pub fn rot<T: BlasFloat>(
    n: isize,
    x: &mut [T],
    incx: isize,
    y: &mut [T],
    incy: isize,
    c: T,
    s: T,
) -> Result<()> {
    let n = check_len(n)?;
    if n == 0 {
        return Ok(());
    }
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    for (ix, iy) in ax.indices().zip(ay.indices()) {
        let (xv, yv) = (x[ix], y[iy]);
        x[ix] = c * xv + s * yv;
        y[iy] = c * yv - s * xv;
    }
    Ok(())
}

/// Which entries of [`RotmParams::h`] are meaningful.
///
/// The discriminants are the BLAS `DPARAM(1)` flag codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotmFlag {
    /// `H` is the identity; the generator had nothing to do.
    Identity = -2,
    /// All four entries of `H` are used. Also reported for rejected input
    /// (negative `d1`), with `H` zeroed.
    Full = -1,
    /// `H = [[1, h12], [h21, 1]]`: only the off-diagonal entries are stored.
    OffDiagonal = 0,
    /// `H = [[h11, 1], [-1, h22]]`: only the diagonal entries are stored.
    Diagonal = 1,
}

impl RotmFlag {
    /// BLAS numeric flag code.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for RotmFlag {
    type Error = BlasError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            -2 => Ok(RotmFlag::Identity),
            -1 => Ok(RotmFlag::Full),
            0 => Ok(RotmFlag::OffDiagonal),
            1 => Ok(RotmFlag::Diagonal),
            _ => Err(BlasError::InvalidState("unknown modified rotation flag")),
        }
    }
}

/// Flag plus the 2x2 matrix `H`, stored column-major as `[h11, h21, h12, h22]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotmParams<T> {
    pub flag: RotmFlag,
    pub h: [T; 4],
}

impl<T: BlasFloat> RotmParams<T> {
    pub fn new(flag: RotmFlag, h: [T; 4]) -> Self {
        Self { flag, h }
    }

    fn zeroed(flag: RotmFlag) -> Self {
        Self {
            flag,
            h: [T::zero(); 4],
        }
    }

    #[inline]
    pub fn h11(&self) -> T {
        self.h[0]
    }

    #[inline]
    pub fn h21(&self) -> T {
        self.h[1]
    }

    #[inline]
    pub fn h12(&self) -> T {
        self.h[2]
    }

    #[inline]
    pub fn h22(&self) -> T {
        self.h[3]
    }

    /// The full matrix `H` as `[[h11, h12], [h21, h22]]`, with the implicit
    /// entries of the compressed forms filled in.
    pub fn matrix(&self) -> [[T; 2]; 2] {
        let one = T::one();
        let zero = T::zero();
        match self.flag {
            RotmFlag::Identity => [[one, zero], [zero, one]],
            RotmFlag::Full => [[self.h11(), self.h12()], [self.h21(), self.h22()]],
            RotmFlag::OffDiagonal => [[one, self.h12()], [self.h21(), one]],
            RotmFlag::Diagonal => [[self.h11(), one], [-one, self.h22()]],
        }
    }
}

/// Output of [`rotmg`]: the rotation plus the updated `d1`, `d2`, `x1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifiedRotation<T> {
    pub params: RotmParams<T>,
    pub d1: T,
    pub d2: T,
    pub x1: T,
}

/// Generate a modified Givens rotation.
///
/// Given scale factors `d1`, `d2` and the vector `(x1, y1)`, find `H` such
/// that `H * (x1, y1)^T` has a zero second component, returning the
/// rescaled `d1`, `d2` and the new `x1`.
///
/// After the form is chosen, `d1` and `d2` are each brought back into
/// `[RGAMSQ, GAMSQ]` by factors of `GAM^2`, scaling the matching row of `H`
/// by `GAM` and switching to the [`RotmFlag::Full`] form.
pub fn rotmg<T: BlasFloat>(d1: T, d2: T, x1: T, y1: T) -> ModifiedRotation<T> {
    let zero = T::zero();
    let one = T::one();
    let rejected = ModifiedRotation {
        params: RotmParams::zeroed(RotmFlag::Full),
        d1: zero,
        d2: zero,
        x1: zero,
    };

    if d1 < zero {
        return rejected;
    }

    let p2 = d2 * y1;
    if p2 == zero {
        return ModifiedRotation {
            params: RotmParams::zeroed(RotmFlag::Identity),
            d1,
            d2,
            x1,
        };
    }
    let p1 = d1 * x1;
    let q2 = p2 * y1;
    let q1 = p1 * x1;

    if q1.abs() < q2.abs() && q2 < zero {
        return rejected;
    }

    let mut p = RotmParams::zeroed(RotmFlag::Diagonal);
    if d1 == zero {
        p.h[0] = p1 / p2;
        p.h[3] = x1 / y1;
        let u = one + p.h[0] * p.h[3];
        return ModifiedRotation {
            params: p,
            d1: d2 / u,
            d2: d1 / u,
            x1: y1 / u,
        };
    }

    let (mut rd1, mut rd2, mut rx1) = if q1.abs() > q2.abs() {
        p.flag = RotmFlag::OffDiagonal;
        p.h[1] = -y1 / x1;
        p.h[2] = p2 / p1;
        // |q1| > |q2| keeps u positive
        let u = one - p.h[2] * p.h[1];
        (d1 / u, d2 / u, x1 * u)
    } else {
        p.h[0] = p1 / p2;
        p.h[3] = x1 / y1;
        let u = one + p.h[0] * p.h[3];
        (d2 / u, d1 / u, y1 * u)
    };

    let gam = T::GAM;
    let gamsq = T::GAMSQ;
    let rgamsq = T::RGAMSQ;

    // Zero and non-finite factors cannot be brought into range; skipping
    // them keeps both loops finite.
    while rd1 != zero && rd1.is_finite() && (rd1 <= rgamsq || rd1 >= gamsq) {
        reset_for_rescale(&mut p);
        if rd1 <= rgamsq {
            rd1 = rd1 * (gam * gam);
            rx1 = rx1 / gam;
            p.h[0] = p.h[0] / gam;
            p.h[2] = p.h[2] / gam;
        } else {
            rd1 = rd1 / (gam * gam);
            rx1 = rx1 * gam;
            p.h[0] = p.h[0] * gam;
            p.h[2] = p.h[2] * gam;
        }
        log::trace!("rotmg: rescaled d1 to {:?}", rd1);
    }

    while rd2 != zero && rd2.is_finite() && (rd2.abs() <= rgamsq || rd2.abs() >= gamsq) {
        reset_for_rescale(&mut p);
        if rd2.abs() <= rgamsq {
            rd2 = rd2 * (gam * gam);
            p.h[1] = p.h[1] / gam;
            p.h[3] = p.h[3] / gam;
        } else {
            rd2 = rd2 / (gam * gam);
            p.h[1] = p.h[1] * gam;
            p.h[3] = p.h[3] * gam;
        }
        log::trace!("rotmg: rescaled d2 to {:?}", rd2);
    }

    ModifiedRotation {
        params: p,
        d1: rd1,
        d2: rd2,
        x1: rx1,
    }
}

/// Materialise the implicit entries of `H` before a rescale step.
///
/// This runs on every rescale iteration, not only the first: once the flag
/// is `Full` the off-diagonal pair is reset to `(-1, 1)` again, matching the
/// reference BLAS `drotmg` bit for bit.
fn reset_for_rescale<T: BlasFloat>(p: &mut RotmParams<T>) {
    if p.flag == RotmFlag::OffDiagonal {
        p.h[0] = T::one();
        p.h[3] = T::one();
    } else {
        p.h[1] = -T::one();
        p.h[2] = T::one();
    }
    p.flag = RotmFlag::Full;
}

/// Apply a modified Givens rotation to the vector pair `(x, y)`:
/// `(x[i], y[i]) := H * (x[i], y[i])`.
///
/// # Errors
/// `InvalidState` when `p.flag` is [`RotmFlag::Identity`]; that flag is a
/// generator sentinel and is not applied.
pub fn rotm<T: BlasFloat>(
    n: isize,
    x: &mut [T],
    incx: isize,
    y: &mut [T],
    incy: isize,
    p: &RotmParams<T>,
) -> Result<()> {
    let n = check_len(n)?;
    if n == 0 {
        return Ok(());
    }
    let (ax, ay) = accessor_pair(n, x.len(), incx, y.len(), incy)?;
    if p.flag == RotmFlag::Identity {
        return Err(BlasError::InvalidState(
            "identity flag cannot be applied by rotm",
        ));
    }

    let [[h11, h12], [h21, h22]] = p.matrix();
    let apply = |w: T, z: T| -> (T, T) {
        match p.flag {
            RotmFlag::OffDiagonal => (w + z * h12, w * h21 + z),
            RotmFlag::Diagonal => (w * h11 + z, -w + h22 * z),
            _ => (w * h11 + z * h12, w * h21 + z * h22),
        }
    };

    if incx == incy && incx > 0 {
        // Both vectors share one offset sequence.
        for i in ax.indices() {
            let (w, z) = apply(x[i], y[i]);
            x[i] = w;
            y[i] = z;
        }
        return Ok(());
    }

    for (ix, iy) in ax.indices().zip(ay.indices()) {
        let (w, z) = apply(x[ix], y[iy]);
        x[ix] = w;
        y[iy] = z;
    }
    Ok(())
}
