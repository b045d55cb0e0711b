//! Level-1 BLAS kernels and matrix/vector views over strided buffers.
//!
//! # Kernels
//!
//! Every kernel takes an element count `n` and, per vector, a buffer and an
//! increment. A negative increment walks the buffer backwards: logical
//! element 0 sits at offset `(1 - n) * inc` and element `i` at
//! `(1 - n) * inc + i * inc`.
//!
//! - [`dot`], [`nrm2`], [`asum`], [`iamax`]: reductions
//! - [`swap`], [`copy`], [`axpy`], [`scal`]: element-wise updates
//! - [`rotg`] / [`rot`]: Givens plane rotations
//! - [`rotmg`] / [`rotm`]: modified (scaled) Givens rotations
//!
//! Kernels are generic over [`BlasFloat`] (`f32` and `f64`).
//!
//! # Views
//!
//! - [`Vector`]: `n` elements at a (possibly negative) increment
//! - [`Matrix`]: general, triangular, symmetric and Hermitian views in full,
//!   band or packed storage, tagged by [`Structure`]
//!
//! Views are generic over [`Storage`], so the same type borrows (`&[T]`,
//! `&mut [T]`) or owns (`Vec<T>`) its buffer.
//!
//! # Example
//!
//! ```rust
//! use strided_blas::{axpy, dot, Matrix, Order};
//!
//! let x = [1.0, 2.0, 3.0];
//! let mut y = [1.0, 1.0, 1.0];
//! axpy(3, 2.0, &x, 1, &mut y, 1).unwrap();
//! assert_eq!(y, [3.0, 5.0, 7.0]);
//!
//! // dot over x reversed
//! assert_eq!(dot(3, &x, -1, &[1.0, 0.0, 0.0], 1).unwrap(), 3.0);
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let a = Matrix::general(Order::RowMajor, 2, 3, &data[..]).unwrap();
//! let col = a.col(1).unwrap();
//! let (n, buf, inc) = col.as_blas();
//! assert_eq!(dot(n, buf, inc, buf, inc).unwrap(), 29.0);
//! ```

pub mod layout;
mod level1;
pub mod matrix;
mod rotation;
mod scalar;
pub mod storage;
pub mod stride;
pub mod vector;

// ============================================================================
// Level-1 kernels
// ============================================================================
pub use level1::{asum, axpy, copy, dot, iamax, nrm2, scal, swap};

// ============================================================================
// Plane rotations
// ============================================================================
pub use rotation::{
    rot, rotg, rotm, rotmg, ModifiedRotation, PlaneRotation, RotmFlag, RotmParams,
};

// ============================================================================
// Scalars
// ============================================================================
pub use scalar::{BlasFloat, Conjugate};

// ============================================================================
// Views and storage
// ============================================================================
pub use layout::{Diag, Order, Uplo};
pub use matrix::{Matrix, MatrixView, MatrixViewMut, OwnedMatrix, Structure};
pub use storage::{allocate, real_to_complex, Storage, StorageMut};
pub use stride::StridedAccessor;
pub use vector::{OwnedVector, Vector, VectorView, VectorViewMut};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised while validating a matrix or vector layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Leading stride is below the minimum for the shape and storage.
    #[error("stride {stride} is below the minimum {min}")]
    StrideTooSmall { stride: usize, min: usize },

    /// Buffer is shorter than the layout addresses.
    #[error("layout needs {needed} elements but the buffer holds {len}")]
    InsufficientData { needed: usize, len: usize },

    /// Square matrix kind requested with unequal extents.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Vector increment of zero.
    #[error("zero increment")]
    ZeroIncrement,

    /// Stride pair without a unit stride, or with overlapping lines.
    #[error("strides {strides:?} do not describe a row- or column-major matrix")]
    NotBlasCompatible { strides: [isize; 2] },

    #[error("unknown order code {0}")]
    UnknownOrder(u32),

    #[error("unknown uplo code {0}")]
    UnknownUplo(u32),

    #[error("unknown diag code {0}")]
    UnknownDiag(u32),

    /// Operation not available for this kind of view.
    #[error("operation unsupported for {0} matrices")]
    Unsupported(&'static str),
}

/// Errors returned by kernels and views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlasError {
    /// Negative element count.
    #[error("invalid length {0}")]
    InvalidLength(isize),

    /// Zero increment passed to a kernel.
    #[error("invalid increment {0}")]
    InvalidIncrement(isize),

    /// Negative increment passed to a kernel that walks forward only.
    #[error("negative increment {0}")]
    NegativeIncrement(isize),

    /// Kernel buffer shorter than `(n - 1) * |inc| + 1`.
    #[error("buffer of {len} elements is too short, {needed} needed")]
    ShortBuffer { needed: usize, len: usize },

    #[error(transparent)]
    InvalidLayout(#[from] LayoutError),

    #[error("index {index} out of range for extent {extent}")]
    IndexOutOfRange { index: usize, extent: usize },

    /// Range with `start > end`.
    #[error("invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// Write to a position the matrix structure does not store.
    #[error("element ({row}, {col}) is not stored")]
    NotStored { row: usize, col: usize },
}

/// Result type for kernels and views.
pub type Result<T> = std::result::Result<T, BlasError>;
