//! One-indexed matrices with interchangeable representations
//!
//! A [`Matrix`] is a reference-counted handle over one of:
//!
//! - **Dense**: flat backing [`Vector`] addressed row- or column-major
//! - **Sparse**: row -> column -> nonzero value map
//! - **Tabular**: generating function `f(i, j)` memoized per cell
//! - **View**: index translation into another matrix (aliases its values)
//! - structured variants (see [`structured`]): Diagonal, Constant-diagonal,
//!   Lower/Upper-triangular, Symmetric, Permutation and Outer-product
//!
//! Reads outside `[1, nrow] x [1, ncol]` return `0.0`; writes there fail.
//! Structured matrices only accept nonzero writes inside their support.
//!
//! A matrix caches the first solver requested from it (see
//! [`Matrix::get_solver`]). The cache is never invalidated, so a matrix must
//! not be modified after it has been solved against.

pub mod structured;
mod traverse;

use crate::error::{LinalgError, Result};
use crate::permutation::Permutation;
use crate::traits::Solver;
use crate::vector::Vector;
use ndarray::{Array1, Array2};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Index translation of a matrix view
pub(crate) type CellMap = Rc<dyn Fn(usize, usize) -> (usize, usize)>;

/// Layout of dense storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageOrder {
    /// `(i, j)` lives at `(i - 1) * ncol + j`
    #[default]
    RowMajor,
    /// `(i, j)` lives at `(j - 1) * nrow + i`
    ColumnMajor,
}

impl StorageOrder {
    /// 1-based flat index of cell `(i, j)` in an `nrow x ncol` matrix
    pub fn to_index(self, i: usize, j: usize, nrow: usize, ncol: usize) -> usize {
        match self {
            StorageOrder::RowMajor => (i - 1) * ncol + j,
            StorageOrder::ColumnMajor => (j - 1) * nrow + i,
        }
    }

    fn flipped(self) -> Self {
        match self {
            StorageOrder::RowMajor => StorageOrder::ColumnMajor,
            StorageOrder::ColumnMajor => StorageOrder::RowMajor,
        }
    }
}

/// Representation tag of a [`Matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    Dense,
    Sparse,
    Tabular,
    View,
    Diagonal,
    ConstDiagonal,
    LowerTriangular,
    UpperTriangular,
    Symmetric,
    Permutation,
    Outer,
}

impl MatrixKind {
    /// Human-readable name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            MatrixKind::Dense => "dense",
            MatrixKind::Sparse => "sparse",
            MatrixKind::Tabular => "tabular",
            MatrixKind::View => "view",
            MatrixKind::Diagonal => "diagonal",
            MatrixKind::ConstDiagonal => "constant-diagonal",
            MatrixKind::LowerTriangular => "lower-triangular",
            MatrixKind::UpperTriangular => "upper-triangular",
            MatrixKind::Symmetric => "symmetric",
            MatrixKind::Permutation => "permutation",
            MatrixKind::Outer => "outer-product",
        }
    }

    /// Representations that can never be written to
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            MatrixKind::ConstDiagonal | MatrixKind::Permutation | MatrixKind::Outer
        )
    }

    /// Representations whose support is an algebraic pattern
    pub fn is_structured(self) -> bool {
        !matches!(
            self,
            MatrixKind::Dense | MatrixKind::Sparse | MatrixKind::Tabular | MatrixKind::View
        )
    }
}

pub(crate) enum MatrixRepr {
    Dense {
        values: Vector,
        order: StorageOrder,
    },
    Sparse(BTreeMap<usize, BTreeMap<usize, f64>>),
    /// Row-major tabular backing vector
    Tabular {
        values: Vector,
    },
    View {
        target: Matrix,
        index: CellMap,
    },
    Diagonal(Vector),
    ConstDiagonal(f64),
    /// Packed rows, `(i, j)` with `i >= j` at `i (i - 1) / 2 + j`
    LowerTriangular(Vector),
    /// Packed columns, `(i, j)` with `i <= j` at `j (j - 1) / 2 + i`
    UpperTriangular(Vector),
    /// Upper-packed storage shared by `(i, j)` and `(j, i)`
    Symmetric(Vector),
    Permutation {
        perm: Permutation,
        scale: f64,
    },
    Outer {
        u: Vector,
        v: Vector,
    },
}

impl MatrixRepr {
    fn kind(&self) -> MatrixKind {
        match self {
            MatrixRepr::Dense { .. } => MatrixKind::Dense,
            MatrixRepr::Sparse(_) => MatrixKind::Sparse,
            MatrixRepr::Tabular { .. } => MatrixKind::Tabular,
            MatrixRepr::View { .. } => MatrixKind::View,
            MatrixRepr::Diagonal(_) => MatrixKind::Diagonal,
            MatrixRepr::ConstDiagonal(_) => MatrixKind::ConstDiagonal,
            MatrixRepr::LowerTriangular(_) => MatrixKind::LowerTriangular,
            MatrixRepr::UpperTriangular(_) => MatrixKind::UpperTriangular,
            MatrixRepr::Symmetric(_) => MatrixKind::Symmetric,
            MatrixRepr::Permutation { .. } => MatrixKind::Permutation,
            MatrixRepr::Outer { .. } => MatrixKind::Outer,
        }
    }
}

/// Packed index of `(i, j)`, `i >= j`, in row-packed lower storage
pub(crate) fn lower_index(i: usize, j: usize) -> usize {
    i * (i - 1) / 2 + j
}

/// Packed index of `(i, j)`, `i <= j`, in column-packed upper storage
pub(crate) fn upper_index(i: usize, j: usize) -> usize {
    j * (j - 1) / 2 + i
}

struct MatrixInner {
    nrow: usize,
    ncol: usize,
    mutable: Cell<bool>,
    repr: RefCell<MatrixRepr>,
    solver: RefCell<Option<Rc<dyn Solver>>>,
}

/// One-indexed `nrow x ncol` matrix of `f64`
#[derive(Clone)]
pub struct Matrix {
    inner: Rc<MatrixInner>,
}

impl Matrix {
    pub(crate) fn from_repr(nrow: usize, ncol: usize, repr: MatrixRepr) -> Self {
        Self {
            inner: Rc::new(MatrixInner {
                nrow,
                ncol,
                mutable: Cell::new(false),
                repr: RefCell::new(repr),
                solver: RefCell::new(None),
            }),
        }
    }

    /// Dense `nrow x ncol` matrix from a flat buffer laid out in `order`
    pub fn from_flat(
        values: Vec<f64>,
        nrow: usize,
        ncol: usize,
        order: StorageOrder,
    ) -> Result<Self> {
        if nrow == 0 || ncol == 0 {
            return Err(LinalgError::construction(
                "dense matrix needs at least one row and one column",
            ));
        }
        if values.len() != nrow * ncol {
            return Err(LinalgError::construction(format!(
                "{} values cannot fill a {}x{} matrix",
                values.len(),
                nrow,
                ncol
            )));
        }
        Ok(Self::from_repr(
            nrow,
            ncol,
            MatrixRepr::Dense {
                values: Vector::from_array1(Array1::from_vec(values)),
                order,
            },
        ))
    }

    /// Dense matrix from nested arrays: rows for [`StorageOrder::RowMajor`],
    /// columns for [`StorageOrder::ColumnMajor`].
    pub fn from_nested(data: &[Vec<f64>], order: StorageOrder) -> Result<Self> {
        let inner_len = data.first().map(Vec::len).unwrap_or(0);
        if inner_len == 0 {
            return Err(LinalgError::construction("nested data is empty"));
        }
        if let Some(bad) = data.iter().find(|line| line.len() != inner_len) {
            return Err(LinalgError::construction(format!(
                "ragged nested data: expected {} values per line, got {}",
                inner_len,
                bad.len()
            )));
        }
        let flat: Vec<f64> = data.iter().flatten().copied().collect();
        let (nrow, ncol) = match order {
            StorageOrder::RowMajor => (data.len(), inner_len),
            StorageOrder::ColumnMajor => (inner_len, data.len()),
        };
        Self::from_flat(flat, nrow, ncol, order)
    }

    /// Dense `nrow x ncol` matrix of zeros
    pub fn zeros(nrow: usize, ncol: usize) -> Self {
        Self::from_repr(
            nrow,
            ncol,
            MatrixRepr::Dense {
                values: Vector::zeros(nrow * ncol),
                order: StorageOrder::RowMajor,
            },
        )
    }

    /// Dense copy of an ndarray matrix
    pub fn from_array2(array: &Array2<f64>) -> Self {
        let (nrow, ncol) = array.dim();
        let values: Array1<f64> = array.iter().copied().collect();
        Self::from_repr(
            nrow,
            ncol,
            MatrixRepr::Dense {
                values: Vector::from_array1(values),
                order: StorageOrder::RowMajor,
            },
        )
    }

    /// Sparse matrix from `(row, col, value)` triplets. Zeros are dropped and
    /// repeated cells keep the last value.
    pub fn sparse<I>(entries: I, nrow: usize, ncol: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut rows: BTreeMap<usize, BTreeMap<usize, f64>> = BTreeMap::new();
        for (i, j, v) in entries {
            if i == 0 || i > nrow || j == 0 || j > ncol {
                return Err(LinalgError::construction(format!(
                    "sparse cell ({}, {}) outside {}x{}",
                    i, j, nrow, ncol
                )));
            }
            if v != 0.0 {
                rows.entry(i).or_default().insert(j, v);
            } else if let Some(row) = rows.get_mut(&i) {
                row.remove(&j);
            }
        }
        rows.retain(|_, row| !row.is_empty());
        Ok(Self::from_repr(nrow, ncol, MatrixRepr::Sparse(rows)))
    }

    /// Sparse matrix from a row -> column -> value map.
    pub fn from_key_map(
        map: &BTreeMap<usize, BTreeMap<usize, f64>>,
        nrow: usize,
        ncol: usize,
    ) -> Result<Self> {
        let entries = map
            .iter()
            .flat_map(|(&i, row)| row.iter().map(move |(&j, &v)| (i, j, v)));
        Self::sparse(entries, nrow, ncol)
    }

    /// Lazily computed matrix: cell `(i, j)` is `f(i, j)`, evaluated at most once.
    pub fn tabular<F>(nrow: usize, ncol: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> f64 + 'static,
    {
        if nrow == 0 || ncol == 0 {
            return Err(LinalgError::construction(
                "tabular matrix needs nonzero row and column counts",
            ));
        }
        let values = Vector::tabular(nrow * ncol, move |k| {
            let i = (k - 1) / ncol + 1;
            let j = (k - 1) % ncol + 1;
            f(i, j)
        });
        Ok(Self::from_repr(nrow, ncol, MatrixRepr::Tabular { values }))
    }

    /// Returns `m` itself (same handle, no copy).
    pub fn from_matrix(m: &Matrix) -> Self {
        m.clone()
    }

    /// Number of rows
    pub fn nrow(&self) -> usize {
        self.inner.nrow
    }

    /// Number of columns
    pub fn ncol(&self) -> usize {
        self.inner.ncol
    }

    pub fn is_square(&self) -> bool {
        self.inner.nrow == self.inner.ncol
    }

    /// Representation tag
    pub fn kind(&self) -> MatrixKind {
        self.inner.repr.borrow().kind()
    }

    /// `true` when both handles refer to the same matrix
    pub fn ptr_eq(&self, other: &Matrix) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn in_range(&self, i: usize, j: usize) -> bool {
        i >= 1 && i <= self.nrow() && j >= 1 && j <= self.ncol()
    }

    /// Cell `(i, j)` (1-based); `0.0` outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if !self.in_range(i, j) {
            return 0.0;
        }
        let (nrow, ncol) = (self.nrow(), self.ncol());
        match &*self.inner.repr.borrow() {
            MatrixRepr::Dense { values, order } => values.get(order.to_index(i, j, nrow, ncol)),
            MatrixRepr::Sparse(rows) => rows
                .get(&i)
                .and_then(|row| row.get(&j))
                .copied()
                .unwrap_or(0.0),
            MatrixRepr::Tabular { values } => values.get((i - 1) * ncol + j),
            MatrixRepr::View { target, index } => {
                let (ti, tj) = index(i, j);
                target.get(ti, tj)
            }
            MatrixRepr::Diagonal(d) => {
                if i == j {
                    d.get(i)
                } else {
                    0.0
                }
            }
            MatrixRepr::ConstDiagonal(c) => {
                if i == j {
                    *c
                } else {
                    0.0
                }
            }
            MatrixRepr::LowerTriangular(values) => {
                if i >= j {
                    values.get(lower_index(i, j))
                } else {
                    0.0
                }
            }
            MatrixRepr::UpperTriangular(values) => {
                if i <= j {
                    values.get(upper_index(i, j))
                } else {
                    0.0
                }
            }
            MatrixRepr::Symmetric(values) => values.get(upper_index(i.min(j), i.max(j))),
            MatrixRepr::Permutation { perm, scale } => {
                if perm.get(i) == j {
                    *scale
                } else {
                    0.0
                }
            }
            MatrixRepr::Outer { u, v } => u.get(i) * v.get(j),
        }
    }

    /// Whether `(i, j)` may hold a nonzero value in this representation
    pub fn in_support(&self, i: usize, j: usize) -> bool {
        if !self.in_range(i, j) {
            return false;
        }
        match &*self.inner.repr.borrow() {
            MatrixRepr::Diagonal(_) | MatrixRepr::ConstDiagonal(_) => i == j,
            MatrixRepr::LowerTriangular(_) => i >= j,
            MatrixRepr::UpperTriangular(_) => i <= j,
            MatrixRepr::Permutation { perm, .. } => perm.get(i) == j,
            MatrixRepr::Outer { u, v } => u.get(i) != 0.0 && v.get(j) != 0.0,
            MatrixRepr::Sparse(rows) => rows.get(&i).is_some_and(|row| row.contains_key(&j)),
            _ => true,
        }
    }

    /// Set cell `(i, j)`. Requires mutability, an in-range cell, and for
    /// structured matrices a cell inside the support (zero writes outside
    /// the support are accepted and ignored).
    pub fn set(&self, i: usize, j: usize, value: f64) -> Result<()> {
        if !self.is_mutable() {
            return Err(LinalgError::Immutable {
                what: self.kind().name(),
            });
        }
        if i == 0 || i > self.nrow() {
            return Err(LinalgError::OutOfBounds {
                index: i,
                extent: self.nrow(),
            });
        }
        if j == 0 || j > self.ncol() {
            return Err(LinalgError::OutOfBounds {
                index: j,
                extent: self.ncol(),
            });
        }
        self.write(i, j, value)
    }

    /// Store without checking the mutable flag. `(i, j)` must be in range.
    pub(crate) fn write(&self, i: usize, j: usize, value: f64) -> Result<()> {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let mut repr = self.inner.repr.borrow_mut();
        let kind = repr.kind();
        let outside = |ok: bool| -> Result<bool> {
            match (ok, value == 0.0) {
                (true, _) => Ok(true),
                (false, true) => Ok(false),
                (false, false) => Err(LinalgError::OutOfStructure {
                    row: i,
                    col: j,
                    structure: kind.name(),
                }),
            }
        };
        let forward = match &mut *repr {
            MatrixRepr::Dense { values, order } => {
                return values.write(order.to_index(i, j, nrow, ncol), value);
            }
            MatrixRepr::Sparse(rows) => {
                if value == 0.0 {
                    if let Some(row) = rows.get_mut(&i) {
                        row.remove(&j);
                        if row.is_empty() {
                            rows.remove(&i);
                        }
                    }
                } else {
                    rows.entry(i).or_default().insert(j, value);
                }
                return Ok(());
            }
            MatrixRepr::Tabular { values } => return values.write((i - 1) * ncol + j, value),
            MatrixRepr::View { target, index } => (target.clone(), index.clone()),
            MatrixRepr::Diagonal(d) => {
                if outside(i == j)? {
                    d.write(i, value)?;
                }
                return Ok(());
            }
            MatrixRepr::LowerTriangular(values) => {
                if outside(i >= j)? {
                    values.write(lower_index(i, j), value)?;
                }
                return Ok(());
            }
            MatrixRepr::UpperTriangular(values) => {
                if outside(i <= j)? {
                    values.write(upper_index(i, j), value)?;
                }
                return Ok(());
            }
            MatrixRepr::Symmetric(values) => {
                return values.write(upper_index(i.min(j), i.max(j)), value);
            }
            MatrixRepr::ConstDiagonal(_)
            | MatrixRepr::Permutation { .. }
            | MatrixRepr::Outer { .. } => {
                return Err(LinalgError::Immutable { what: kind.name() });
            }
        };
        drop(repr);
        let (target, index) = forward;
        let (ti, tj) = index(i, j);
        target.set(ti, tj, value)
    }

    /// Effective mutability. Views also require their target to be mutable;
    /// Constant-diagonal, Permutation and Outer-product never are.
    pub fn is_mutable(&self) -> bool {
        if !self.inner.mutable.get() {
            return false;
        }
        match &*self.inner.repr.borrow() {
            MatrixRepr::View { target, .. } => target.is_mutable(),
            repr => !repr.kind().is_read_only(),
        }
    }

    /// Flip the mutable flag. Read-only representations refuse `true`.
    pub fn set_mutable(&self, mutable: bool) -> Result<()> {
        let kind = self.kind();
        if mutable && kind.is_read_only() {
            return Err(LinalgError::Immutable { what: kind.name() });
        }
        self.inner.mutable.set(mutable);
        Ok(())
    }

    /// Builder-style [`Matrix::set_mutable`]
    pub fn with_mutable(self, mutable: bool) -> Result<Self> {
        self.set_mutable(mutable)?;
        Ok(self)
    }

    /// Rows as nested vectors
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (1..=self.nrow())
            .map(|i| (1..=self.ncol()).map(|j| self.get(i, j)).collect())
            .collect()
    }

    /// Dense ndarray copy
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.nrow(), self.ncol()), |(r, c)| self.get(r + 1, c + 1))
    }

    /// Aliasing sub-matrix: cell `(a, b)` of the view is cell
    /// `(rows[a - 1], cols[b - 1])` of `self`.
    pub fn view(&self, rows: &[usize], cols: &[usize]) -> Matrix {
        let (rows, cols) = (rows.to_vec(), cols.to_vec());
        let (nrow, ncol) = (rows.len(), cols.len());
        self.view_fn(nrow, ncol, move |a, b| (rows[a - 1], cols[b - 1]))
    }

    /// Aliasing `nrow x ncol` view translating `(a, b)` to `index(a, b)`.
    pub fn view_fn<F>(&self, nrow: usize, ncol: usize, index: F) -> Matrix
    where
        F: Fn(usize, usize) -> (usize, usize) + 'static,
    {
        let view = Self::from_repr(
            nrow,
            ncol,
            MatrixRepr::View {
                target: self.clone(),
                index: Rc::new(index),
            },
        );
        view.inner.mutable.set(true);
        view
    }

    /// Vector view of row `i`
    pub fn row_view(&self, i: usize) -> Vector {
        Vector::matrix_view(self, self.ncol(), move |k| (i, k))
    }

    /// Vector view of column `j`
    pub fn col_view(&self, j: usize) -> Vector {
        Vector::matrix_view(self, self.nrow(), move |k| (k, j))
    }

    /// Vector view of the main diagonal
    pub fn diag_view(&self) -> Vector {
        Vector::matrix_view(self, self.nrow().min(self.ncol()), |k| (k, k))
    }

    /// Evaluate every pending cell of a tabular matrix and switch it to a
    /// dense row-major representation. No-op for other representations.
    pub fn force(&self) {
        let values = match &*self.inner.repr.borrow() {
            MatrixRepr::Tabular { values } => values.clone(),
            _ => return,
        };
        values.force();
        *self.inner.repr.borrow_mut() = MatrixRepr::Dense {
            values,
            order: StorageOrder::RowMajor,
        };
    }

    /// Independent copy. A faithful copy keeps the representation (a view
    /// copy is a new view of the same target); otherwise the copy is dense.
    pub fn deep_clone(&self, faithful: bool) -> Matrix {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let repr = if faithful {
            match &*self.inner.repr.borrow() {
                MatrixRepr::Dense { values, order } => MatrixRepr::Dense {
                    values: values.deep_clone(true),
                    order: *order,
                },
                MatrixRepr::Sparse(rows) => MatrixRepr::Sparse(rows.clone()),
                MatrixRepr::Tabular { values } => MatrixRepr::Tabular {
                    values: values.deep_clone(true),
                },
                MatrixRepr::View { target, index } => MatrixRepr::View {
                    target: target.clone(),
                    index: index.clone(),
                },
                MatrixRepr::Diagonal(d) => MatrixRepr::Diagonal(d.deep_clone(true)),
                MatrixRepr::ConstDiagonal(c) => MatrixRepr::ConstDiagonal(*c),
                MatrixRepr::LowerTriangular(values) => {
                    MatrixRepr::LowerTriangular(values.deep_clone(true))
                }
                MatrixRepr::UpperTriangular(values) => {
                    MatrixRepr::UpperTriangular(values.deep_clone(true))
                }
                MatrixRepr::Symmetric(values) => MatrixRepr::Symmetric(values.deep_clone(true)),
                MatrixRepr::Permutation { perm, scale } => MatrixRepr::Permutation {
                    perm: perm.clone(),
                    scale: *scale,
                },
                MatrixRepr::Outer { u, v } => MatrixRepr::Outer {
                    u: u.deep_clone(true),
                    v: v.deep_clone(true),
                },
            }
        } else {
            MatrixRepr::Dense {
                values: Vector::from_array1(self.to_array2().iter().copied().collect()),
                order: StorageOrder::RowMajor,
            }
        };
        let copy = Self::from_repr(nrow, ncol, repr);
        copy.inner
            .mutable
            .set(self.inner.mutable.get() && !copy.kind().is_read_only());
        copy
    }

    /// `true` when both matrices have the same shape and every pair of
    /// cells differs by at most `tolerance`.
    pub fn equals(&self, other: &Matrix, tolerance: f64) -> bool {
        if self.nrow() != other.nrow() || self.ncol() != other.ncol() {
            return false;
        }
        (1..=self.nrow()).all(|i| {
            (1..=self.ncol()).all(|j| (self.get(i, j) - other.get(i, j)).abs() <= tolerance)
        })
    }

    /// Frobenius norm
    pub fn norm(&self) -> f64 {
        self.reduce(0.0, |acc, _, _, v| acc + v * v).sqrt()
    }

    /// Largest absolute entry, 0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.reduce(0.0, |acc, _, _, v| acc.max(v.abs()))
    }

    pub(crate) fn repr(&self) -> std::cell::Ref<'_, MatrixRepr> {
        self.inner.repr.borrow()
    }

    pub(crate) fn cached_solver(&self) -> Option<Rc<dyn Solver>> {
        self.inner.solver.borrow().clone()
    }

    pub(crate) fn cache_solver(&self, solver: Rc<dyn Solver>) {
        *self.inner.solver.borrow_mut() = Some(solver);
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("kind", &self.kind())
            .field("nrow", &self.nrow())
            .field("ncol", &self.ncol())
            .field("mutable", &self.is_mutable())
            .field("rows", &self.to_nested())
            .finish()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 1..=self.nrow() {
            write!(f, "[")?;
            for j in 1..=self.ncol() {
                if j > 1 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.get(i, j))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl From<&Array2<f64>> for Matrix {
    fn from(array: &Array2<f64>) -> Self {
        Matrix::from_array2(array)
    }
}
