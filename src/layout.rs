//! Matrix storage order and triangle/diagonal selectors.
//!
//! The discriminants are the CBLAS enumeration codes, so values coming from
//! a C caller or a fixture file can be converted with `TryFrom<u32>`.

use crate::LayoutError;

/// Matrix storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Order {
    /// Row-major (C-style): element `(i, j)` at `i * stride + j`.
    #[default]
    RowMajor = 101,
    /// Column-major (Fortran-style): element `(i, j)` at `i + j * stride`.
    ColMajor = 102,
}

impl Order {
    /// Smallest leading stride for a `rows x cols` matrix, never below 1.
    #[inline]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        let ld = match self {
            Order::RowMajor => cols,
            Order::ColMajor => rows,
        };
        ld.max(1)
    }

    /// Offset of element `(i, j)` for leading stride `stride`.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, stride: usize) -> usize {
        match self {
            Order::RowMajor => i * stride + j,
            Order::ColMajor => i + j * stride,
        }
    }

    /// Detect the order of a 2D `(row_stride, col_stride)` pair.
    ///
    /// Returns the order and leading stride when one of the strides is 1 and
    /// the other covers the contiguous extent, `None` otherwise.
    pub fn detect(rows: usize, cols: usize, strides: [isize; 2]) -> Option<(Order, usize)> {
        if strides[1] == 1 && strides[0] >= cols.max(1) as isize {
            return Some((Order::RowMajor, strides[0] as usize));
        }
        if strides[0] == 1 && strides[1] >= rows.max(1) as isize {
            return Some((Order::ColMajor, strides[1] as usize));
        }
        None
    }
}

impl TryFrom<u32> for Order {
    type Error = LayoutError;

    fn try_from(code: u32) -> Result<Self, LayoutError> {
        match code {
            101 => Ok(Order::RowMajor),
            102 => Ok(Order::ColMajor),
            _ => Err(LayoutError::UnknownOrder(code)),
        }
    }
}

/// Which triangle of a square matrix is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Uplo {
    #[default]
    Upper = 121,
    Lower = 122,
}

impl Uplo {
    /// Whether `(i, j)` lies in this triangle (diagonal included).
    #[inline]
    pub fn contains(self, i: usize, j: usize) -> bool {
        match self {
            Uplo::Upper => i <= j,
            Uplo::Lower => i >= j,
        }
    }
}

impl TryFrom<u32> for Uplo {
    type Error = LayoutError;

    fn try_from(code: u32) -> Result<Self, LayoutError> {
        match code {
            121 => Ok(Uplo::Upper),
            122 => Ok(Uplo::Lower),
            _ => Err(LayoutError::UnknownUplo(code)),
        }
    }
}

/// Whether the diagonal of a triangular matrix is stored or implicitly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Diag {
    #[default]
    NonUnit = 131,
    Unit = 132,
}

impl TryFrom<u32> for Diag {
    type Error = LayoutError;

    fn try_from(code: u32) -> Result<Self, LayoutError> {
        match code {
            131 => Ok(Diag::NonUnit),
            132 => Ok(Diag::Unit),
            _ => Err(LayoutError::UnknownDiag(code)),
        }
    }
}
