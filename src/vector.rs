//! Strided vector views.
//!
//! A [`Vector`] interprets a flat buffer as `n` elements spaced `inc` apart.
//! Negative increments follow the BLAS convention: the buffer is addressed
//! from its lowest touched element and logical element 0 sits at the highest
//! one (see [`crate::stride`]).

use num_traits::Zero;

use crate::storage::{Storage, StorageMut};
use crate::stride::StridedAccessor;
use crate::{BlasError, LayoutError, Result};

/// A strided 1-D view over storage `S`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<S> {
    data: S,
    n: usize,
    inc: isize,
}

/// Read-only vector borrowing its buffer.
pub type VectorView<'a, T> = Vector<&'a [T]>;
/// Mutable vector borrowing its buffer.
pub type VectorViewMut<'a, T> = Vector<&'a mut [T]>;
/// Vector owning its buffer.
pub type OwnedVector<T> = Vector<Vec<T>>;

impl<T: Clone + Zero> Vector<Vec<T>> {
    /// `n` zeros in a freshly allocated buffer, unit increment.
    pub fn zeros(n: usize) -> Self {
        Vector::contiguous(vec![T::zero(); n])
    }
}

impl<S: Storage> Vector<S> {
    /// Create a validated view of `n` elements at increment `inc`.
    ///
    /// # Errors
    /// `InvalidLayout` if `inc == 0` or the buffer is shorter than
    /// `(n - 1) * |inc| + 1` elements.
    pub fn new(data: S, n: usize, inc: isize) -> Result<Self> {
        let v = Self { data, n, inc };
        v.check()?;
        Ok(v)
    }

    /// View the whole buffer with unit increment.
    pub fn contiguous(data: S) -> Self {
        let n = data.as_slice().len();
        Self { data, n, inc: 1 }
    }

    /// Re-validate the view against its buffer.
    pub fn check(&self) -> Result<()> {
        if self.inc == 0 {
            return Err(LayoutError::ZeroIncrement.into());
        }
        let len = self.data.as_slice().len();
        match self.accessor().span() {
            Some(needed) if needed <= len => Ok(()),
            needed => Err(LayoutError::InsufficientData {
                needed: needed.unwrap_or(usize::MAX),
                len,
            }
            .into()),
        }
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

    /// The backing buffer, starting at the lowest touched element.
    #[inline]
    pub fn data(&self) -> &[S::Elem] {
        self.data.as_slice()
    }

    pub fn into_data(self) -> S {
        self.data
    }

    #[inline]
    fn accessor(&self) -> StridedAccessor {
        StridedAccessor::from_parts(self.n, self.inc)
    }

    /// Buffer offset of logical element `i` (no bounds check).
    #[inline]
    pub fn offset(&self, i: usize) -> usize {
        self.accessor().offset(i)
    }

    /// Logical element `i`, or `None` past the end.
    pub fn get(&self, i: usize) -> Option<&S::Elem> {
        if i >= self.n {
            return None;
        }
        self.data.as_slice().get(self.offset(i))
    }

    /// Elements in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &S::Elem> + '_ {
        let data = self.data.as_slice();
        self.accessor().indices().map(move |ix| &data[ix])
    }

    pub fn to_vec(&self) -> Vec<S::Elem>
    where
        S::Elem: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> VectorView<'_, S::Elem> {
        Vector {
            data: self.data.as_slice(),
            n: self.n,
            inc: self.inc,
        }
    }

    /// Sub-vector of logical elements `l..r`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `r > len`, `InvalidRange` if `l > r`.
    pub fn slice(&self, l: usize, r: usize) -> Result<VectorView<'_, S::Elem>> {
        let offset = self.slice_offset(l, r)?;
        let data = self.data.as_slice();
        Ok(Vector {
            data: &data[offset.min(data.len())..],
            n: r - l,
            inc: self.inc,
        })
    }

    /// Buffer offset of the lowest element touched by `l..r`.
    fn slice_offset(&self, l: usize, r: usize) -> Result<usize> {
        if r > self.n {
            return Err(BlasError::IndexOutOfRange {
                index: r,
                extent: self.n,
            });
        }
        if l > r {
            return Err(BlasError::InvalidRange { start: l, end: r });
        }
        let step = self.inc.unsigned_abs();
        Ok(if l == r {
            0
        } else if self.inc > 0 {
            l * step
        } else {
            (self.n - r) * step
        })
    }

    /// `(n, buffer, inc)` in the argument form the Level-1 kernels take.
    pub fn as_blas(&self) -> (isize, &[S::Elem], isize) {
        (self.n as isize, self.data.as_slice(), self.inc)
    }
}

impl<S: StorageMut> Vector<S> {
    /// Mutable logical element `i`, or `None` past the end.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut S::Elem> {
        if i >= self.n {
            return None;
        }
        let ix = self.offset(i);
        self.data.as_mut_slice().get_mut(ix)
    }

    /// Borrow as a mutable view.
    pub fn view_mut(&mut self) -> VectorViewMut<'_, S::Elem> {
        Vector {
            data: self.data.as_mut_slice(),
            n: self.n,
            inc: self.inc,
        }
    }

    /// Mutable sub-vector of logical elements `l..r`.
    pub fn slice_mut(&mut self, l: usize, r: usize) -> Result<VectorViewMut<'_, S::Elem>> {
        let offset = self.slice_offset(l, r)?;
        let inc = self.inc;
        let data = self.data.as_mut_slice();
        let start = offset.min(data.len());
        Ok(Vector {
            data: &mut data[start..],
            n: r - l,
            inc,
        })
    }

    /// `(n, buffer, inc)` for a kernel that writes through the view.
    pub fn as_blas_mut(&mut self) -> (isize, &mut [S::Elem], isize) {
        (self.n as isize, self.data.as_mut_slice(), self.inc)
    }
}
