//! Matrix views over flat buffers.
//!
//! A [`Matrix`] couples a buffer with a storage order, logical extents, a
//! leading stride and a [`Structure`] describing which elements are
//! referenced and where they live:
//!
//! - full storage (`General`, `Triangular`, `Symmetric`, `Hermitian`):
//!   element `(i, j)` at `i * stride + j` (row-major) or `i + j * stride`
//!   (column-major);
//! - band storage (`GeneralBand`, `TriangularBand`, `HermitianBand`): one
//!   line of `kl + ku + 1` diagonals per row (row-major) or column
//!   (column-major);
//! - packed storage (`TriangularPacked`, `HermitianPacked`): the referenced
//!   triangle only, without padding.
//!
//! Specialised views are narrowed from a general one without copying; all of
//! them borrow (or own) the same buffer as the view they came from.

use num_traits::{One, Zero};

use crate::layout::{Diag, Order, Uplo};
use crate::scalar::Conjugate;
use crate::storage::{Storage, StorageMut};
use crate::vector::{Vector, VectorView, VectorViewMut};
use crate::{BlasError, LayoutError, Result};

/// The kind of a matrix view and its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Structure {
    General,
    GeneralBand { kl: usize, ku: usize },
    Triangular { uplo: Uplo, diag: Diag },
    TriangularBand { uplo: Uplo, diag: Diag, k: usize },
    TriangularPacked { uplo: Uplo, diag: Diag },
    Symmetric { uplo: Uplo },
    Hermitian { uplo: Uplo },
    HermitianBand { uplo: Uplo, k: usize },
    HermitianPacked { uplo: Uplo },
}

/// How a structure lays its elements out in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Full,
    Band { kl: usize, ku: usize },
    Packed,
}

/// Sub- and super-diagonal counts of a `k`-diagonal band on one side.
fn one_sided_band(uplo: Uplo, k: usize) -> Scheme {
    match uplo {
        Uplo::Upper => Scheme::Band { kl: 0, ku: k },
        Uplo::Lower => Scheme::Band { kl: k, ku: 0 },
    }
}

impl Structure {
    pub fn name(self) -> &'static str {
        match self {
            Structure::General => "general",
            Structure::GeneralBand { .. } => "general band",
            Structure::Triangular { .. } => "triangular",
            Structure::TriangularBand { .. } => "triangular band",
            Structure::TriangularPacked { .. } => "triangular packed",
            Structure::Symmetric { .. } => "symmetric",
            Structure::Hermitian { .. } => "hermitian",
            Structure::HermitianBand { .. } => "hermitian band",
            Structure::HermitianPacked { .. } => "hermitian packed",
        }
    }

    pub fn uplo(self) -> Option<Uplo> {
        match self {
            Structure::General | Structure::GeneralBand { .. } => None,
            Structure::Triangular { uplo, .. }
            | Structure::TriangularBand { uplo, .. }
            | Structure::TriangularPacked { uplo, .. }
            | Structure::Symmetric { uplo }
            | Structure::Hermitian { uplo }
            | Structure::HermitianBand { uplo, .. }
            | Structure::HermitianPacked { uplo } => Some(uplo),
        }
    }

    pub fn diag(self) -> Option<Diag> {
        match self {
            Structure::Triangular { diag, .. }
            | Structure::TriangularBand { diag, .. }
            | Structure::TriangularPacked { diag, .. } => Some(diag),
            _ => None,
        }
    }

    /// Whether the view is constrained to an `n x n` shape.
    pub fn is_square(self) -> bool {
        !matches!(self, Structure::General | Structure::GeneralBand { .. })
    }

    fn scheme(self) -> Scheme {
        match self {
            Structure::General
            | Structure::Triangular { .. }
            | Structure::Symmetric { .. }
            | Structure::Hermitian { .. } => Scheme::Full,
            Structure::GeneralBand { kl, ku } => Scheme::Band { kl, ku },
            Structure::TriangularBand { uplo, k, .. } | Structure::HermitianBand { uplo, k } => {
                one_sided_band(uplo, k)
            }
            Structure::TriangularPacked { .. } | Structure::HermitianPacked { .. } => {
                Scheme::Packed
            }
        }
    }

    /// Whether `(i, j)` is a referenced position of this structure.
    fn references(self, i: usize, j: usize) -> bool {
        let in_triangle = self.uplo().map_or(true, |uplo| uplo.contains(i, j));
        match self.scheme() {
            Scheme::Band { kl, ku } => in_triangle && i <= j + kl && j <= i + ku,
            Scheme::Full | Scheme::Packed => in_triangle,
        }
    }

    /// Whether the unreferenced triangle mirrors the referenced one.
    fn mirrors(self) -> bool {
        matches!(
            self,
            Structure::Symmetric { .. }
                | Structure::Hermitian { .. }
                | Structure::HermitianBand { .. }
                | Structure::HermitianPacked { .. }
        )
    }
}

/// A 2-D view over storage `S`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<S> {
    data: S,
    order: Order,
    rows: usize,
    cols: usize,
    stride: usize,
    structure: Structure,
}

/// Read-only matrix borrowing its buffer.
pub type MatrixView<'a, T> = Matrix<&'a [T]>;
/// Mutable matrix borrowing its buffer.
pub type MatrixViewMut<'a, T> = Matrix<&'a mut [T]>;
/// Matrix owning its buffer.
pub type OwnedMatrix<T> = Matrix<Vec<T>>;

impl<T: Clone + Zero> Matrix<Vec<T>> {
    /// A zeroed general matrix in a freshly allocated, tightly strided buffer.
    ///
    /// Other kinds are allocated with [`Matrix::zeros_with`].
    pub fn zeros(order: Order, rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::zero(); rows * cols],
            order,
            rows,
            cols,
            stride: order.leading_dim(rows, cols),
            structure: Structure::General,
        }
    }

    /// A zeroed matrix of any kind, in the smallest buffer its storage needs.
    ///
    /// Full storage gets the tightest leading stride, band storage one line
    /// of `kl + ku + 1` diagonals, packed storage `n(n+1)/2` elements.
    ///
    /// # Errors
    /// `InvalidLayout(NonSquare)` for a square kind with `rows != cols`,
    /// `InvalidLayout(InsufficientData)` if the size overflows `usize`.
    ///
    /// ```
    /// use strided_blas::{Matrix, Order, OwnedMatrix, Structure, Uplo};
    /// let hp: OwnedMatrix<f64> =
    ///     Matrix::zeros_with(Order::ColMajor, 4, 4, Structure::HermitianPacked { uplo: Uplo::Lower })
    ///         .unwrap();
    /// assert_eq!(hp.data().len(), 10);
    /// ```
    pub fn zeros_with(order: Order, rows: usize, cols: usize, structure: Structure) -> Result<Self> {
        if structure.is_square() && rows != cols {
            return Err(LayoutError::NonSquare { rows, cols }.into());
        }
        let mut m = Matrix {
            data: Vec::new(),
            order,
            rows,
            cols,
            stride: 0,
            structure,
        };
        m.stride = m.min_stride();
        let len = m.required_len().ok_or(LayoutError::InsufficientData {
            needed: usize::MAX,
            len: 0,
        })?;
        m.data = vec![T::zero(); len];
        Ok(m)
    }
}

impl<S: Storage> Matrix<S> {
    fn with_structure(
        data: S,
        order: Order,
        rows: usize,
        cols: usize,
        stride: usize,
        structure: Structure,
    ) -> Result<Self> {
        let m = Matrix {
            data,
            order,
            rows,
            cols,
            stride,
            structure,
        };
        if let Err(err) = m.check() {
            log::debug!("rejecting {} {}x{} view: {}", structure.name(), rows, cols, err);
            return Err(err);
        }
        Ok(m)
    }

    /// General matrix with the tightest leading stride for `order`.
    pub fn general(order: Order, rows: usize, cols: usize, data: S) -> Result<Self> {
        let stride = order.leading_dim(rows, cols);
        Self::with_structure(data, order, rows, cols, stride, Structure::General)
    }

    /// General matrix with an explicit leading stride.
    ///
    /// ```
    /// use strided_blas::{Matrix, Order};
    /// let data = [0.0; 6];
    /// assert!(Matrix::general_with_stride(Order::RowMajor, 2, 3, 2, &data[..]).is_err());
    /// assert!(Matrix::general_with_stride(Order::RowMajor, 2, 3, 3, &data[..]).is_ok());
    /// ```
    pub fn general_with_stride(
        order: Order,
        rows: usize,
        cols: usize,
        stride: usize,
        data: S,
    ) -> Result<Self> {
        Self::with_structure(data, order, rows, cols, stride, Structure::General)
    }

    /// General matrix from a `(row_stride, col_stride)` pair, one of which must be 1.
    pub fn from_strides(rows: usize, cols: usize, strides: [isize; 2], data: S) -> Result<Self> {
        let (order, stride) = Order::detect(rows, cols, strides)
            .ok_or(LayoutError::NotBlasCompatible { strides })?;
        Self::general_with_stride(order, rows, cols, stride, data)
    }

    /// General band matrix with `kl` sub- and `ku` super-diagonals.
    pub fn general_band(
        order: Order,
        rows: usize,
        cols: usize,
        kl: usize,
        ku: usize,
        stride: usize,
        data: S,
    ) -> Result<Self> {
        let structure = Structure::GeneralBand { kl, ku };
        Self::with_structure(data, order, rows, cols, stride, structure)
    }

    pub fn triangular(
        order: Order,
        n: usize,
        stride: usize,
        uplo: Uplo,
        diag: Diag,
        data: S,
    ) -> Result<Self> {
        let structure = Structure::Triangular { uplo, diag };
        Self::with_structure(data, order, n, n, stride, structure)
    }

    pub fn triangular_band(
        order: Order,
        n: usize,
        k: usize,
        stride: usize,
        uplo: Uplo,
        diag: Diag,
        data: S,
    ) -> Result<Self> {
        let structure = Structure::TriangularBand { uplo, diag, k };
        Self::with_structure(data, order, n, n, stride, structure)
    }

    pub fn triangular_packed(order: Order, n: usize, uplo: Uplo, diag: Diag, data: S) -> Result<Self> {
        let structure = Structure::TriangularPacked { uplo, diag };
        Self::with_structure(data, order, n, n, 0, structure)
    }

    pub fn symmetric(order: Order, n: usize, stride: usize, uplo: Uplo, data: S) -> Result<Self> {
        Self::with_structure(data, order, n, n, stride, Structure::Symmetric { uplo })
    }

    pub fn hermitian(order: Order, n: usize, stride: usize, uplo: Uplo, data: S) -> Result<Self> {
        Self::with_structure(data, order, n, n, stride, Structure::Hermitian { uplo })
    }

    pub fn hermitian_band(
        order: Order,
        n: usize,
        k: usize,
        stride: usize,
        uplo: Uplo,
        data: S,
    ) -> Result<Self> {
        let structure = Structure::HermitianBand { uplo, k };
        Self::with_structure(data, order, n, n, stride, structure)
    }

    pub fn hermitian_packed(order: Order, n: usize, uplo: Uplo, data: S) -> Result<Self> {
        Self::with_structure(data, order, n, n, 0, Structure::HermitianPacked { uplo })
    }

    /// Re-validate the view against its buffer.
    ///
    /// # Errors
    /// `InvalidLayout` with `StrideTooSmall` or `InsufficientData`.
    pub fn check(&self) -> Result<()> {
        self.check_stride(self.min_stride())?;
        let len = self.data.as_slice().len();
        match self.required_len() {
            Some(needed) if needed <= len => Ok(()),
            needed => Err(LayoutError::InsufficientData {
                needed: needed.unwrap_or(usize::MAX),
                len,
            }
            .into()),
        }
    }

    /// Smallest leading stride the layout accepts.
    fn min_stride(&self) -> usize {
        match self.structure.scheme() {
            Scheme::Full => self.order.leading_dim(self.rows, self.cols),
            Scheme::Band { kl, ku } => kl.saturating_add(ku).saturating_add(1),
            Scheme::Packed => 0,
        }
    }

    /// Buffer length the layout addresses, `None` if it overflows `usize`.
    fn required_len(&self) -> Option<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Some(0);
        }
        let (lines, width) = match (self.structure.scheme(), self.order) {
            (Scheme::Packed, _) => {
                let n = self.rows;
                return Some(if n % 2 == 0 {
                    (n / 2).checked_mul(n + 1)?
                } else {
                    n.checked_mul(n / 2 + 1)?
                });
            }
            (Scheme::Full, Order::RowMajor) => (self.rows, self.cols),
            (Scheme::Full, Order::ColMajor) => (self.cols, self.rows),
            (Scheme::Band { kl, ku }, order) => {
                let lines = match order {
                    Order::RowMajor => self.rows,
                    Order::ColMajor => self.cols,
                };
                (lines, kl.checked_add(ku)?.checked_add(1)?)
            }
        };
        (lines - 1).checked_mul(self.stride)?.checked_add(width)
    }

    fn check_stride(&self, min: usize) -> Result<()> {
        if self.stride < min {
            return Err(LayoutError::StrideTooSmall {
                stride: self.stride,
                min,
            }
            .into());
        }
        Ok(())
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Order of a square view (`rows`, which equals `cols` for square kinds).
    #[inline]
    pub fn n(&self) -> usize {
        self.rows
    }

    /// Leading stride; zero for packed storage, which has none.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn structure(&self) -> Structure {
        self.structure
    }

    pub fn uplo(&self) -> Option<Uplo> {
        self.structure.uplo()
    }

    pub fn diag(&self) -> Option<Diag> {
        self.structure.diag()
    }

    /// `(kl, ku)` for banded views.
    pub fn bandwidths(&self) -> Option<(usize, usize)> {
        match self.structure.scheme() {
            Scheme::Band { kl, ku } => Some((kl, ku)),
            _ => None,
        }
    }

    #[inline]
    pub fn data(&self) -> &[S::Elem] {
        self.data.as_slice()
    }

    pub fn into_data(self) -> S {
        self.data
    }

    /// Buffer offset of the stored element `(i, j)`.
    ///
    /// Pure arithmetic with no bounds check; `(i, j)` must be a position the
    /// structure stores.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        match self.structure.scheme() {
            Scheme::Full => self.order.index(i, j, self.stride),
            Scheme::Band { kl, ku } => match self.order {
                Order::RowMajor => i * self.stride + kl + j - i,
                Order::ColMajor => j * self.stride + ku + i - j,
            },
            Scheme::Packed => {
                let n = self.rows;
                let upper = self.structure.uplo() == Some(Uplo::Upper);
                match (self.order, upper) {
                    (Order::ColMajor, true) => i + j * (j + 1) / 2,
                    (Order::ColMajor, false) => i + j * (2 * n - j - 1) / 2,
                    (Order::RowMajor, true) => j + i * (2 * n - i - 1) / 2,
                    (Order::RowMajor, false) => j + i * (i + 1) / 2,
                }
            }
        }
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows {
            return Err(BlasError::IndexOutOfRange {
                index: i,
                extent: self.rows,
            });
        }
        if j >= self.cols {
            return Err(BlasError::IndexOutOfRange {
                index: j,
                extent: self.cols,
            });
        }
        Ok(())
    }

    /// Logical element `(i, j)` as the structure defines it.
    ///
    /// Positions outside a triangle or band read as zero, an implicit unit
    /// diagonal reads as one, and the unreferenced triangle of a symmetric
    /// (Hermitian) view reads as the (conjugated) mirrored element.
    pub fn get(&self, i: usize, j: usize) -> Result<S::Elem>
    where
        S::Elem: Copy + Zero + One + Conjugate,
    {
        self.check_bounds(i, j)?;
        let s = self.structure;
        if i == j && s.diag() == Some(Diag::Unit) {
            return Ok(<S::Elem as One>::one());
        }
        let data = self.data.as_slice();
        if s.references(i, j) {
            return Ok(data[self.index(i, j)]);
        }
        if s.mirrors() && s.references(j, i) {
            let v = data[self.index(j, i)];
            return Ok(match s {
                Structure::Symmetric { .. } => v,
                _ => v.conj(),
            });
        }
        Ok(<S::Elem as Zero>::zero())
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> MatrixView<'_, S::Elem> {
        Matrix {
            data: self.data.as_slice(),
            order: self.order,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            structure: self.structure,
        }
    }

    fn require_full(&self) -> Result<()> {
        if self.structure.scheme() != Scheme::Full {
            return Err(LayoutError::Unsupported(self.structure.name()).into());
        }
        Ok(())
    }

    /// `(start, len, inc)` of row `i`.
    fn row_line(&self, i: usize) -> Result<(usize, usize, isize)> {
        self.require_full()?;
        if i >= self.rows {
            return Err(BlasError::IndexOutOfRange {
                index: i,
                extent: self.rows,
            });
        }
        Ok(match self.order {
            Order::RowMajor => (i * self.stride, self.cols, 1),
            Order::ColMajor => (i, self.cols, self.stride as isize),
        })
    }

    /// `(start, len, inc)` of column `j`.
    fn col_line(&self, j: usize) -> Result<(usize, usize, isize)> {
        self.require_full()?;
        if j >= self.cols {
            return Err(BlasError::IndexOutOfRange {
                index: j,
                extent: self.cols,
            });
        }
        Ok(match self.order {
            Order::RowMajor => (j, self.rows, self.stride as isize),
            Order::ColMajor => (j * self.stride, self.rows, 1),
        })
    }

    /// Row `i` as a vector sharing this view's buffer.
    pub fn row(&self, i: usize) -> Result<VectorView<'_, S::Elem>> {
        let (start, n, inc) = self.row_line(i)?;
        let data = self.data.as_slice();
        Vector::new(&data[start.min(data.len())..], n, inc)
    }

    /// Column `j` as a vector sharing this view's buffer.
    pub fn col(&self, j: usize) -> Result<VectorView<'_, S::Elem>> {
        let (start, n, inc) = self.col_line(j)?;
        let data = self.data.as_slice();
        Vector::new(&data[start.min(data.len())..], n, inc)
    }

    /// Start offset of the `r x c` block anchored at `(i, j)`.
    fn sub_offset(&self, i: usize, j: usize, r: usize, c: usize) -> Result<usize> {
        if self.structure != Structure::General {
            return Err(LayoutError::Unsupported(self.structure.name()).into());
        }
        self.check_bounds(i, j)?;
        let (row_end, col_end) = (i.saturating_add(r), j.saturating_add(c));
        if row_end > self.rows {
            return Err(BlasError::IndexOutOfRange {
                index: row_end,
                extent: self.rows,
            });
        }
        if col_end > self.cols {
            return Err(BlasError::IndexOutOfRange {
                index: col_end,
                extent: self.cols,
            });
        }
        Ok(self.index(i, j))
    }

    /// The `r x c` sub-matrix anchored at `(i, j)`, with the same order and stride.
    pub fn sub(&self, i: usize, j: usize, r: usize, c: usize) -> Result<MatrixView<'_, S::Elem>> {
        let offset = self.sub_offset(i, j, r, c)?;
        Matrix::general_with_stride(self.order, r, c, self.stride, &self.data.as_slice()[offset..])
    }

    fn narrow(self, structure: Structure) -> Result<Self> {
        if self.structure != Structure::General {
            return Err(LayoutError::Unsupported(self.structure.name()).into());
        }
        let n = self.rows.min(self.cols);
        Ok(Matrix {
            rows: n,
            cols: n,
            structure,
            ..self
        })
    }

    /// Reinterpret a general view as triangular over its leading `n x n`
    /// block, `n = min(rows, cols)`.
    pub fn to_triangular(self, uplo: Uplo, diag: Diag) -> Result<Self> {
        self.narrow(Structure::Triangular { uplo, diag })
    }

    /// Reinterpret a general view as symmetric over its leading square block.
    pub fn to_symmetric(self, uplo: Uplo) -> Result<Self> {
        self.narrow(Structure::Symmetric { uplo })
    }

    /// Reinterpret a general view as Hermitian over its leading square block.
    pub fn to_hermitian(self, uplo: Uplo) -> Result<Self> {
        self.narrow(Structure::Hermitian { uplo })
    }
}

impl<S: StorageMut> Matrix<S> {
    #[inline]
    pub fn data_mut(&mut self) -> &mut [S::Elem] {
        self.data.as_mut_slice()
    }

    /// Mutable reference to the stored element `(i, j)`.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside the extents, `NotStored` for positions the
    /// structure does not reference.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut S::Elem> {
        self.check_bounds(i, j)?;
        if !self.structure.references(i, j) {
            return Err(BlasError::NotStored { row: i, col: j });
        }
        let ix = self.index(i, j);
        Ok(&mut self.data.as_mut_slice()[ix])
    }

    /// Borrow as a mutable view.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, S::Elem> {
        Matrix {
            data: self.data.as_mut_slice(),
            order: self.order,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            structure: self.structure,
        }
    }

    /// Mutable row `i`.
    pub fn row_mut(&mut self, i: usize) -> Result<VectorViewMut<'_, S::Elem>> {
        let (start, n, inc) = self.row_line(i)?;
        let data = self.data.as_mut_slice();
        let start = start.min(data.len());
        Vector::new(&mut data[start..], n, inc)
    }

    /// Mutable column `j`.
    pub fn col_mut(&mut self, j: usize) -> Result<VectorViewMut<'_, S::Elem>> {
        let (start, n, inc) = self.col_line(j)?;
        let data = self.data.as_mut_slice();
        let start = start.min(data.len());
        Vector::new(&mut data[start..], n, inc)
    }

    /// Mutable `r x c` sub-matrix anchored at `(i, j)`.
    pub fn sub_mut(
        &mut self,
        i: usize,
        j: usize,
        r: usize,
        c: usize,
    ) -> Result<MatrixViewMut<'_, S::Elem>> {
        let offset = self.sub_offset(i, j, r, c)?;
        let (order, stride) = (self.order, self.stride);
        Matrix::general_with_stride(order, r, c, stride, &mut self.data.as_mut_slice()[offset..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use std::collections::HashSet;

    fn seq(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_row_major_stride_validation() {
        let data = seq(6);
        let err = Matrix::general_with_stride(Order::RowMajor, 2, 3, 2, &data[..]).unwrap_err();
        assert_eq!(
            err,
            BlasError::InvalidLayout(LayoutError::StrideTooSmall { stride: 2, min: 3 })
        );
        assert!(Matrix::general_with_stride(Order::RowMajor, 2, 3, 3, &data[..]).is_ok());
    }

    #[test]
    fn test_insufficient_data() {
        let data = seq(7);
        let err = Matrix::general_with_stride(Order::ColMajor, 3, 2, 5, &data[..]).unwrap_err();
        assert_eq!(
            err,
            BlasError::InvalidLayout(LayoutError::InsufficientData { needed: 8, len: 7 })
        );
    }

    #[test]
    fn test_overflowing_layout_is_rejected() {
        let data = [0.0_f64];
        assert_eq!(
            Matrix::general_with_stride(Order::RowMajor, 3, 1, 1 << 63, &data[..]).unwrap_err(),
            BlasError::InvalidLayout(LayoutError::InsufficientData {
                needed: usize::MAX,
                len: 1
            })
        );
        assert_eq!(
            Matrix::general_band(Order::ColMajor, 2, 2, usize::MAX, 1, usize::MAX, &data[..])
                .unwrap_err(),
            BlasError::InvalidLayout(LayoutError::InsufficientData {
                needed: usize::MAX,
                len: 1
            })
        );
        assert!(matches!(
            Matrix::hermitian_packed(Order::RowMajor, usize::MAX, Uplo::Upper, &data[..]),
            Err(BlasError::InvalidLayout(LayoutError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn test_sub_extent_does_not_overflow() {
        let data = seq(4);
        let a = Matrix::general(Order::RowMajor, 2, 2, &data[..]).unwrap();
        assert_eq!(
            a.sub(1, 0, usize::MAX, 1).unwrap_err(),
            BlasError::IndexOutOfRange {
                index: usize::MAX,
                extent: 2
            }
        );
    }

    #[test]
    fn test_zeros_with_sizes() {
        let b: OwnedMatrix<f64> =
            Matrix::zeros_with(Order::RowMajor, 4, 5, Structure::GeneralBand { kl: 1, ku: 2 })
                .unwrap();
        assert_eq!((b.stride(), b.data().len()), (4, 16));
        assert_eq!(b.get(3, 4).unwrap(), 0.0);

        let structure = Structure::TriangularBand {
            uplo: Uplo::Lower,
            diag: Diag::Unit,
            k: 2,
        };
        let t: OwnedMatrix<f64> = Matrix::zeros_with(Order::ColMajor, 3, 3, structure).unwrap();
        assert_eq!((t.stride(), t.data().len()), (3, 9));
        assert_eq!(t.get(1, 1).unwrap(), 1.0);

        let structure = Structure::TriangularPacked {
            uplo: Uplo::Upper,
            diag: Diag::NonUnit,
        };
        let mut p: OwnedMatrix<f64> = Matrix::zeros_with(Order::RowMajor, 5, 5, structure).unwrap();
        assert_eq!((p.stride(), p.data().len()), (0, 15));
        *p.get_mut(4, 4).unwrap() = 2.0;
        assert_eq!(p.data()[14], 2.0);

        let h: OwnedMatrix<Complex64> =
            Matrix::zeros_with(Order::ColMajor, 0, 0, Structure::Hermitian { uplo: Uplo::Upper })
                .unwrap();
        assert!(h.data().is_empty());
    }

    #[test]
    fn test_zeros_with_rejects_non_square() {
        let err = Matrix::<Vec<f64>>::zeros_with(
            Order::RowMajor,
            2,
            3,
            Structure::Symmetric { uplo: Uplo::Upper },
        )
        .unwrap_err();
        assert_eq!(
            err,
            BlasError::InvalidLayout(LayoutError::NonSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_empty_extents_need_no_data() {
        let data: [f64; 0] = [];
        assert!(Matrix::general(Order::RowMajor, 0, 5, &data[..]).is_ok());
        assert!(Matrix::general(Order::ColMajor, 4, 0, &data[..]).is_ok());
    }

    #[test]
    fn test_index_by_order() {
        let data = seq(12);
        let a = Matrix::general_with_stride(Order::RowMajor, 2, 3, 4, &data[..]).unwrap();
        assert_eq!(a.index(1, 2), 6);
        let b = Matrix::general_with_stride(Order::ColMajor, 2, 3, 4, &data[..]).unwrap();
        assert_eq!(b.index(1, 2), 9);
    }

    #[test]
    fn test_from_strides() {
        let data = seq(6);
        let a = Matrix::from_strides(2, 3, [1, 2], &data[..]).unwrap();
        assert_eq!(a.order(), Order::ColMajor);
        assert_eq!(a.stride(), 2);
        assert_eq!(
            Matrix::from_strides(2, 3, [2, 2], &data[..]).unwrap_err(),
            BlasError::InvalidLayout(LayoutError::NotBlasCompatible { strides: [2, 2] })
        );
    }

    #[test]
    fn test_row_and_col_row_major() {
        let data = seq(8);
        // [[0, 1, 2], [4, 5, 6]] with stride 4
        let a = Matrix::general_with_stride(Order::RowMajor, 2, 3, 4, &data[..]).unwrap();
        let r = a.row(1).unwrap();
        assert_eq!(r.inc(), 1);
        assert_eq!(r.to_vec(), vec![4.0, 5.0, 6.0]);
        let c = a.col(2).unwrap();
        assert_eq!(c.inc(), 4);
        assert_eq!(c.to_vec(), vec![2.0, 6.0]);
    }

    #[test]
    fn test_row_and_col_col_major() {
        let data = seq(9);
        // columns [0, 1], [3, 4], [6, 7] with stride 3
        let a = Matrix::general_with_stride(Order::ColMajor, 2, 3, 3, &data[..]).unwrap();
        let r = a.row(1).unwrap();
        assert_eq!(r.inc(), 3);
        assert_eq!(r.to_vec(), vec![1.0, 4.0, 7.0]);
        let c = a.col(1).unwrap();
        assert_eq!(c.inc(), 1);
        assert_eq!(c.to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_row_out_of_range() {
        let data = seq(6);
        let a = Matrix::general(Order::RowMajor, 2, 3, &data[..]).unwrap();
        assert_eq!(
            a.row(2).unwrap_err(),
            BlasError::IndexOutOfRange { index: 2, extent: 2 }
        );
        assert_eq!(
            a.col(3).unwrap_err(),
            BlasError::IndexOutOfRange { index: 3, extent: 3 }
        );
    }

    #[test]
    fn test_row_mut_writes_through() {
        let mut data = seq(6);
        {
            let mut a = Matrix::general(Order::ColMajor, 2, 3, &mut data[..]).unwrap();
            let mut r = a.row_mut(0).unwrap();
            *r.get_mut(2).unwrap() = -1.0;
        }
        assert_eq!(data[4], -1.0);
    }

    #[test]
    fn test_sub() {
        let data = seq(12);
        // 3x4 row-major
        let a = Matrix::general(Order::RowMajor, 3, 4, &data[..]).unwrap();
        let s = a.sub(1, 1, 2, 2).unwrap();
        assert_eq!(s.stride(), 4);
        assert_eq!(s.get(0, 0).unwrap(), 5.0);
        assert_eq!(s.get(1, 1).unwrap(), 10.0);
        assert!(a.sub(3, 0, 0, 0).is_err());
        assert!(a.sub(2, 2, 2, 1).is_err());
    }

    #[test]
    fn test_sub_mut() {
        let mut m: OwnedMatrix<f64> = Matrix::zeros(Order::ColMajor, 3, 3);
        {
            let mut s = m.sub_mut(1, 1, 2, 2).unwrap();
            *s.get_mut(1, 0).unwrap() = 7.0;
        }
        assert_eq!(m.get(2, 1).unwrap(), 7.0);
    }

    #[test]
    fn test_narrow_to_triangular() {
        let data = seq(6);
        let a = Matrix::general(Order::RowMajor, 2, 3, &data[..]).unwrap();
        let t = a.to_triangular(Uplo::Upper, Diag::Unit).unwrap();
        assert_eq!((t.rows(), t.cols()), (2, 2));
        assert_eq!(t.stride(), 3);
        assert_eq!(t.diag(), Some(Diag::Unit));
        assert_eq!(t.get(0, 0).unwrap(), 1.0);
        assert_eq!(t.get(0, 1).unwrap(), 1.0);
        assert_eq!(t.get(1, 0).unwrap(), 0.0);
        assert!(t.to_hermitian(Uplo::Lower).is_err());
    }

    #[test]
    fn test_symmetric_mirror() {
        let data = vec![1.0, 2.0, 0.0, 3.0];
        let s = Matrix::symmetric(Order::RowMajor, 2, 2, Uplo::Upper, &data[..]).unwrap();
        assert_eq!(s.get(1, 0).unwrap(), 2.0);
        assert_eq!(s.get(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_hermitian_conjugate_mirror() {
        let z = Complex64::new(1.0, 2.0);
        let zero = Complex64::new(0.0, 0.0);
        let data = vec![Complex64::new(4.0, 0.0), zero, z, Complex64::new(5.0, 0.0)];
        let a = Matrix::general(Order::RowMajor, 2, 2, &data[..]).unwrap();
        let h = a.to_hermitian(Uplo::Lower).unwrap();
        assert_eq!(h.get(1, 0).unwrap(), z);
        assert_eq!(h.get(0, 1).unwrap(), z.conj());
    }

    #[test]
    fn test_get_mut_not_stored() {
        let mut data = seq(4);
        let mut t =
            Matrix::triangular(Order::RowMajor, 2, 2, Uplo::Lower, Diag::NonUnit, &mut data[..])
                .unwrap();
        assert_eq!(
            t.get_mut(0, 1).unwrap_err(),
            BlasError::NotStored { row: 0, col: 1 }
        );
        *t.get_mut(1, 0).unwrap() = 9.0;
        assert_eq!(data[2], 9.0);
    }

    #[test]
    fn test_general_band_index() {
        // 4x4 tridiagonal, row-major band storage, kl = ku = 1, stride 3:
        // row i holds (a[i][i-1], a[i][i], a[i][i+1])
        let data = vec![
            0.0, 1.0, 2.0, //
            3.0, 4.0, 5.0, //
            6.0, 7.0, 8.0, //
            9.0, 10.0, 0.0,
        ];
        let b = Matrix::general_band(Order::RowMajor, 4, 4, 1, 1, 3, &data[..]).unwrap();
        assert_eq!(b.get(0, 0).unwrap(), 1.0);
        assert_eq!(b.get(0, 1).unwrap(), 2.0);
        assert_eq!(b.get(1, 0).unwrap(), 3.0);
        assert_eq!(b.get(3, 3).unwrap(), 10.0);
        assert_eq!(b.get(0, 3).unwrap(), 0.0);
        assert_eq!(b.bandwidths(), Some((1, 1)));
        assert!(Matrix::general_band(Order::RowMajor, 4, 4, 1, 1, 2, &data[..]).is_err());
    }

    #[test]
    fn test_col_major_band_index() {
        // 3x3 upper triangular band, k = 1, column-major:
        // column j holds (a[j-1][j], a[j][j])
        let data = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let t = Matrix::triangular_band(Order::ColMajor, 3, 1, 2, Uplo::Upper, Diag::NonUnit, &data[..])
            .unwrap();
        assert_eq!(t.get(0, 0).unwrap(), 1.0);
        assert_eq!(t.get(0, 1).unwrap(), 2.0);
        assert_eq!(t.get(1, 1).unwrap(), 3.0);
        assert_eq!(t.get(1, 2).unwrap(), 4.0);
        assert_eq!(t.get(2, 2).unwrap(), 5.0);
        assert_eq!(t.get(0, 2).unwrap(), 0.0);
        assert_eq!(t.get(1, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_hermitian_band_mirror() {
        // lower, k = 1, row-major: row i holds (a[i][i-1], a[i][i])
        let data = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let h = Matrix::hermitian_band(Order::RowMajor, 3, 1, 2, Uplo::Lower, &data[..]).unwrap();
        assert_eq!(h.get(1, 0).unwrap(), 2.0);
        assert_eq!(h.get(0, 1).unwrap(), 2.0);
        assert_eq!(h.get(2, 0).unwrap(), 0.0);
        assert_eq!(h.get(0, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_packed_indices_are_dense() {
        let n = 5;
        let len = n * (n + 1) / 2;
        let data = seq(len);
        for order in [Order::RowMajor, Order::ColMajor] {
            for uplo in [Uplo::Upper, Uplo::Lower] {
                let p = Matrix::triangular_packed(order, n, uplo, Diag::NonUnit, &data[..]).unwrap();
                let mut seen = HashSet::new();
                for i in 0..n {
                    for j in 0..n {
                        if uplo.contains(i, j) {
                            let ix = p.index(i, j);
                            assert!(ix < len, "{:?} {:?} ({}, {}) -> {}", order, uplo, i, j, ix);
                            assert!(seen.insert(ix));
                        }
                    }
                }
                assert_eq!(seen.len(), len);
            }
        }
    }

    #[test]
    fn test_packed_layouts() {
        // upper 3x3: [[a, b, c], [_, d, e], [_, _, f]]
        let data = seq(6);
        let cu = Matrix::triangular_packed(Order::ColMajor, 3, Uplo::Upper, Diag::NonUnit, &data[..])
            .unwrap();
        // column-major upper stores a, b, d, c, e, f
        assert_eq!(cu.get(0, 2).unwrap(), 3.0);
        assert_eq!(cu.get(1, 1).unwrap(), 2.0);
        let ru = Matrix::triangular_packed(Order::RowMajor, 3, Uplo::Upper, Diag::NonUnit, &data[..])
            .unwrap();
        // row-major upper stores a, b, c, d, e, f
        assert_eq!(ru.get(0, 2).unwrap(), 2.0);
        assert_eq!(ru.get(1, 1).unwrap(), 3.0);
        assert_eq!(ru.get(2, 0).unwrap(), 0.0);
        assert!(Matrix::hermitian_packed(Order::RowMajor, 4, Uplo::Upper, &data[..]).is_err());
    }

    #[test]
    fn test_row_unsupported_for_packed() {
        let data = seq(3);
        let p = Matrix::hermitian_packed(Order::ColMajor, 2, Uplo::Lower, &data[..]).unwrap();
        assert_eq!(
            p.row(0).unwrap_err(),
            BlasError::InvalidLayout(LayoutError::Unsupported("hermitian packed"))
        );
        assert_eq!(p.stride(), 0);
    }

    #[test]
    fn test_zeros() {
        let m: OwnedMatrix<Complex64> = Matrix::zeros(Order::RowMajor, 2, 3);
        assert_eq!(m.data().len(), 6);
        assert_eq!(m.stride(), 3);
        assert!(m.check().is_ok());
    }
}
