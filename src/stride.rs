//! Index arithmetic for strided vector traversal.
//!
//! A logical vector of `n` elements lives in a buffer at physical offsets
//! `start + i * inc`. For a positive increment `start` is zero. For a
//! negative increment the logical first element is the highest touched
//! offset, `(1 - n) * inc`, so walking forward through logical indices walks
//! backward through memory and finishes at offset zero.

use crate::{BlasError, Result};

/// Physical offset of logical element 0.
///
/// Only meaningful once [`span`] has been checked against a buffer, which
/// bounds the result; unchecked inputs saturate instead of wrapping.
#[inline]
pub fn start_offset(n: usize, inc: isize) -> isize {
    if inc < 0 && n > 0 {
        let far = (n - 1).saturating_mul(inc.unsigned_abs());
        far.min(isize::MAX as usize) as isize
    } else {
        0
    }
}

/// Number of buffer elements touched by `n` elements at increment `inc`,
/// or `None` if that count overflows `usize`.
#[inline]
pub fn span(n: usize, inc: isize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    (n - 1).checked_mul(inc.unsigned_abs())?.checked_add(1)
}

/// Validate a BLAS element count.
#[inline]
pub fn check_len(n: isize) -> Result<usize> {
    if n < 0 {
        return Err(BlasError::InvalidLength(n));
    }
    Ok(n as usize)
}

/// Validate an increment that may be negative but not zero.
#[inline]
pub fn check_inc(inc: isize) -> Result<()> {
    if inc == 0 {
        return Err(BlasError::InvalidIncrement(inc));
    }
    Ok(())
}

/// Validate an increment that must be strictly positive.
#[inline]
pub fn check_forward_inc(inc: isize) -> Result<()> {
    if inc < 1 {
        if inc == 0 {
            return Err(BlasError::InvalidIncrement(inc));
        }
        return Err(BlasError::NegativeIncrement(inc));
    }
    Ok(())
}

/// A validated `(n, inc)` traversal over one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedAccessor {
    n: usize,
    inc: isize,
}

impl StridedAccessor {
    /// Accessor for a kernel that accepts negative increments.
    ///
    /// # Errors
    /// `InvalidLength` for `n < 0`, `InvalidIncrement` for `inc == 0`.
    pub fn new(n: isize, inc: isize) -> Result<Self> {
        let n = check_len(n)?;
        check_inc(inc)?;
        Ok(Self { n, inc })
    }

    /// Accessor for a kernel that only walks forward through memory.
    ///
    /// # Errors
    /// `InvalidIncrement` for `inc == 0`, `NegativeIncrement` for `inc < 0`,
    /// then `InvalidLength` for `n < 0`.
    pub fn forward(n: isize, inc: isize) -> Result<Self> {
        check_forward_inc(inc)?;
        let n = check_len(n)?;
        Ok(Self { n, inc })
    }

    /// Build from an already validated length and a non-zero increment.
    pub(crate) fn from_parts(n: usize, inc: isize) -> Self {
        debug_assert!(inc != 0);
        Self { n, inc }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn inc(&self) -> isize {
        self.inc
    }

    #[inline]
    pub fn start_offset(&self) -> isize {
        start_offset(self.n, self.inc)
    }

    /// Number of buffer elements this traversal touches, `None` on overflow.
    #[inline]
    pub fn span(&self) -> Option<usize> {
        span(self.n, self.inc)
    }

    /// Physical offset of logical element `i`.
    #[inline]
    pub fn offset(&self, i: usize) -> usize {
        (self.start_offset() + i as isize * self.inc) as usize
    }

    /// Fail with `ShortBuffer` unless a buffer of `len` elements covers the traversal.
    ///
    /// A traversal too long to count reports `needed == usize::MAX`.
    pub fn check_buffer(&self, len: usize) -> Result<()> {
        match self.span() {
            Some(needed) if needed <= len => Ok(()),
            needed => Err(BlasError::ShortBuffer {
                needed: needed.unwrap_or(usize::MAX),
                len,
            }),
        }
    }

    /// Physical offsets in logical order.
    #[inline]
    pub fn indices(&self) -> StridedIndices {
        StridedIndices {
            next: self.start_offset(),
            inc: self.inc,
            remaining: self.n,
        }
    }
}

/// Iterator over the physical offsets of a strided traversal.
#[derive(Debug, Clone)]
pub struct StridedIndices {
    next: isize,
    inc: isize,
    remaining: usize,
}

impl Iterator for StridedIndices {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += self.inc;
        }
        Some(cur as usize)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIndices {}
