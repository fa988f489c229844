//! One-indexed vectors with interchangeable representations
//!
//! A [`Vector`] is a reference-counted handle. Cloning the handle aliases the
//! same storage (`Vector::ptr_eq` is true), while [`Vector::deep_clone`]
//! copies it. The representations are:
//!
//! - **Dense**: contiguous `Array1<f64>`
//! - **Sparse**: ordered map from index to nonzero value
//! - **Tabular**: generating function `f(i)`, memoized per index on first read
//! - **Constant**: every entry equals one value; never mutable
//! - **View**: index translation into another vector or into a matrix row,
//!   column or diagonal
//!
//! Indices run from 1 to `len`. Reads outside that range return `0.0`.
//!
//! # Views and lifetimes
//!
//! A view owns no values: reads and writes are translated and forwarded to
//! its target. The view holds a handle to the target, so the target lives at
//! least as long as any view onto it, and writes through either side are
//! observed by the other.

mod ops;

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use ndarray::Array1;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Index function of a tabular vector
pub(crate) type VectorFn = Rc<dyn Fn(usize) -> f64>;

/// Representation tag of a [`Vector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Dense,
    Sparse,
    Tabular,
    Constant,
    View,
}

/// Target of a vector view
#[derive(Clone)]
pub(crate) enum ViewTarget {
    Vector {
        target: Vector,
        index: Rc<dyn Fn(usize) -> usize>,
    },
    Matrix {
        target: Matrix,
        index: Rc<dyn Fn(usize) -> (usize, usize)>,
    },
}

pub(crate) enum VectorRepr {
    Dense(Array1<f64>),
    Sparse(BTreeMap<usize, f64>),
    Tabular {
        f: VectorFn,
        cache: Vec<Option<f64>>,
    },
    Constant(f64),
    View(ViewTarget),
}

enum Pending {
    Compute(VectorFn),
    Forward(ViewTarget),
}

struct VectorInner {
    len: usize,
    mutable: Cell<bool>,
    repr: RefCell<VectorRepr>,
}

/// Fixed-length, one-indexed vector of `f64`
#[derive(Clone)]
pub struct Vector {
    inner: Rc<VectorInner>,
}

impl Vector {
    fn from_repr(len: usize, repr: VectorRepr) -> Self {
        Self {
            inner: Rc::new(VectorInner {
                len,
                mutable: Cell::new(false),
                repr: RefCell::new(repr),
            }),
        }
    }

    /// Dense vector from values. Empty input is rejected; use
    /// [`Vector::zeros`] with length 0 to build an empty vector on purpose.
    pub fn dense(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(LinalgError::construction(
                "dense vector needs at least one value (use Vector::zeros(0) for an empty vector)",
            ));
        }
        Ok(Self::from_array1(Array1::from_vec(values)))
    }

    /// Dense vector of `len` zeros
    pub fn zeros(len: usize) -> Self {
        Self::from_array1(Array1::zeros(len))
    }

    /// Dense vector taking ownership of an ndarray buffer
    pub fn from_array1(values: Array1<f64>) -> Self {
        Self::from_repr(values.len(), VectorRepr::Dense(values))
    }

    /// Sparse vector from `(index, value)` pairs. Zero values are not stored;
    /// repeated indices keep the last value.
    pub fn sparse<I>(entries: I, len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut map = BTreeMap::new();
        for (i, v) in entries {
            if i == 0 || i > len {
                return Err(LinalgError::construction(format!(
                    "sparse index {} outside 1..={}",
                    i, len
                )));
            }
            if v != 0.0 {
                map.insert(i, v);
            } else {
                map.remove(&i);
            }
        }
        Ok(Self::from_repr(len, VectorRepr::Sparse(map)))
    }

    /// Lazily computed vector: entry `i` is `f(i)`, evaluated at most once.
    pub fn tabular<F>(len: usize, f: F) -> Self
    where
        F: Fn(usize) -> f64 + 'static,
    {
        Self::from_repr(
            len,
            VectorRepr::Tabular {
                f: Rc::new(f),
                cache: vec![None; len],
            },
        )
    }

    /// Vector whose entries all equal `value`
    pub fn constant(value: f64, len: usize) -> Self {
        Self::from_repr(len, VectorRepr::Constant(value))
    }

    /// Returns `v` itself (same handle, no copy).
    pub fn from_vector(v: &Vector) -> Self {
        v.clone()
    }

    pub(crate) fn matrix_view<F>(target: &Matrix, len: usize, index: F) -> Self
    where
        F: Fn(usize) -> (usize, usize) + 'static,
    {
        let v = Self::from_repr(
            len,
            VectorRepr::View(ViewTarget::Matrix {
                target: target.clone(),
                index: Rc::new(index),
            }),
        );
        v.inner.mutable.set(true);
        v
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.len
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Representation tag
    pub fn kind(&self) -> VectorKind {
        match &*self.inner.repr.borrow() {
            VectorRepr::Dense(_) => VectorKind::Dense,
            VectorRepr::Sparse(_) => VectorKind::Sparse,
            VectorRepr::Tabular { .. } => VectorKind::Tabular,
            VectorRepr::Constant(_) => VectorKind::Constant,
            VectorRepr::View(_) => VectorKind::View,
        }
    }

    /// `true` when both handles refer to the same vector
    pub fn ptr_eq(&self, other: &Vector) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Entry `i` (1-based); `0.0` outside `[1, len]`.
    pub fn get(&self, i: usize) -> f64 {
        if i == 0 || i > self.len() {
            return 0.0;
        }
        let pending = {
            let repr = self.inner.repr.borrow();
            match &*repr {
                VectorRepr::Dense(values) => return values[i - 1],
                VectorRepr::Sparse(map) => return map.get(&i).copied().unwrap_or(0.0),
                VectorRepr::Constant(value) => return *value,
                VectorRepr::Tabular { f, cache } => match cache[i - 1] {
                    Some(value) => return value,
                    None => Pending::Compute(f.clone()),
                },
                VectorRepr::View(target) => Pending::Forward(target.clone()),
            }
        };
        match pending {
            Pending::Compute(f) => {
                let value = f(i);
                if let VectorRepr::Tabular { cache, .. } = &mut *self.inner.repr.borrow_mut() {
                    cache[i - 1] = Some(value);
                }
                value
            }
            Pending::Forward(ViewTarget::Vector { target, index }) => target.get(index(i)),
            Pending::Forward(ViewTarget::Matrix { target, index }) => {
                let (row, col) = index(i);
                target.get(row, col)
            }
        }
    }

    /// All entries as a `Vec`
    pub fn to_vec(&self) -> Vec<f64> {
        (1..=self.len()).map(|i| self.get(i)).collect()
    }

    /// All entries as an ndarray vector
    pub fn to_array1(&self) -> Array1<f64> {
        Array1::from_vec(self.to_vec())
    }

    /// Set entry `i`. Requires the vector to be mutable and `i` in `[1, len]`.
    pub fn set(&self, i: usize, value: f64) -> Result<()> {
        if !self.is_mutable() {
            return Err(LinalgError::Immutable { what: "vector" });
        }
        if i == 0 || i > self.len() {
            return Err(LinalgError::OutOfBounds {
                index: i,
                extent: self.len(),
            });
        }
        self.write(i, value)
    }

    /// Store without checking the mutable flag. Used when filling freshly
    /// built results and the backing storage of matrices.
    pub(crate) fn write(&self, i: usize, value: f64) -> Result<()> {
        let mut repr = self.inner.repr.borrow_mut();
        let target = match &mut *repr {
            VectorRepr::Dense(values) => {
                values[i - 1] = value;
                return Ok(());
            }
            VectorRepr::Sparse(map) => {
                if value == 0.0 {
                    map.remove(&i);
                } else {
                    map.insert(i, value);
                }
                return Ok(());
            }
            VectorRepr::Tabular { cache, .. } => {
                cache[i - 1] = Some(value);
                return Ok(());
            }
            VectorRepr::Constant(_) => {
                return Err(LinalgError::Immutable {
                    what: "constant vector",
                });
            }
            VectorRepr::View(target) => target.clone(),
        };
        drop(repr);
        match target {
            ViewTarget::Vector { target, index } => target.set(index(i), value),
            ViewTarget::Matrix { target, index } => {
                let (row, col) = index(i);
                target.set(row, col, value)
            }
        }
    }

    /// Effective mutability. A view is mutable only when its target is.
    pub fn is_mutable(&self) -> bool {
        if !self.inner.mutable.get() {
            return false;
        }
        match &*self.inner.repr.borrow() {
            VectorRepr::Constant(_) => false,
            VectorRepr::View(ViewTarget::Vector { target, .. }) => target.is_mutable(),
            VectorRepr::View(ViewTarget::Matrix { target, .. }) => target.is_mutable(),
            _ => true,
        }
    }

    /// Flip the mutable flag. Constant vectors refuse to become mutable.
    pub fn set_mutable(&self, mutable: bool) -> Result<()> {
        if mutable && self.kind() == VectorKind::Constant {
            return Err(LinalgError::Immutable {
                what: "constant vector",
            });
        }
        self.inner.mutable.set(mutable);
        Ok(())
    }

    /// Builder-style [`Vector::set_mutable`]
    pub fn with_mutable(self, mutable: bool) -> Result<Self> {
        self.set_mutable(mutable)?;
        Ok(self)
    }

    /// Stored entries of a sparse vector, `None` for other representations.
    pub(crate) fn sparse_entries(&self) -> Option<Vec<(usize, f64)>> {
        match &*self.inner.repr.borrow() {
            VectorRepr::Sparse(map) => Some(map.iter().map(|(&i, &v)| (i, v)).collect()),
            _ => None,
        }
    }

    pub(crate) fn constant_value(&self) -> Option<f64> {
        match &*self.inner.repr.borrow() {
            VectorRepr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of nonzero entries
    pub fn nnz(&self) -> usize {
        match self.sparse_entries() {
            Some(entries) => entries.len(),
            None => (1..=self.len()).filter(|&i| self.get(i) != 0.0).count(),
        }
    }

    /// Call `f(i, value)` for every entry. With `skip_zeros`, zero entries are
    /// skipped and sparse vectors only visit their stored entries.
    pub fn each<F>(&self, skip_zeros: bool, mut f: F)
    where
        F: FnMut(usize, f64),
    {
        if skip_zeros {
            if let Some(entries) = self.sparse_entries() {
                for (i, v) in entries {
                    f(i, v);
                }
                return;
            }
        }
        for i in 1..=self.len() {
            let v = self.get(i);
            if skip_zeros && v == 0.0 {
                continue;
            }
            f(i, v);
        }
    }

    /// New vector with entries `f(i, value)`. With `skip_zeros`, zero entries
    /// stay zero and a sparse input produces a sparse result.
    pub fn map<F>(&self, skip_zeros: bool, mut f: F) -> Vector
    where
        F: FnMut(usize, f64) -> f64,
    {
        if skip_zeros {
            if let Some(entries) = self.sparse_entries() {
                let map = entries
                    .into_iter()
                    .map(|(i, v)| (i, f(i, v)))
                    .filter(|&(_, v)| v != 0.0)
                    .collect();
                return Self::from_repr(self.len(), VectorRepr::Sparse(map));
            }
        }
        let values = (1..=self.len())
            .map(|i| {
                let v = self.get(i);
                if skip_zeros && v == 0.0 { 0.0 } else { f(i, v) }
            })
            .collect::<Vec<_>>();
        Self::from_array1(Array1::from_vec(values))
    }

    /// Fold `f(acc, i, value)` over the entries, in index order.
    pub fn reduce<F>(&self, skip_zeros: bool, init: f64, mut f: F) -> f64
    where
        F: FnMut(f64, usize, f64) -> f64,
    {
        let mut acc = init;
        self.each(skip_zeros, |i, v| acc = f(acc, i, v));
        acc
    }

    /// Aliasing view: entry `k` of the view is entry `indices[k - 1]` of `self`.
    pub fn view(&self, indices: &[usize]) -> Vector {
        let indices = indices.to_vec();
        self.view_fn(indices.len(), move |k| indices[k - 1])
    }

    /// Aliasing view of length `len` translating view index `k` to `index(k)`.
    pub fn view_fn<F>(&self, len: usize, index: F) -> Vector
    where
        F: Fn(usize) -> usize + 'static,
    {
        let v = Self::from_repr(
            len,
            VectorRepr::View(ViewTarget::Vector {
                target: self.clone(),
                index: Rc::new(index),
            }),
        );
        v.inner.mutable.set(true);
        v
    }

    /// Evaluate every pending entry of a tabular vector and switch it to a
    /// dense representation. Observable values do not change.
    pub fn force(&self) {
        let (f, cache) = match &*self.inner.repr.borrow() {
            VectorRepr::Tabular { f, cache } => (f.clone(), cache.clone()),
            _ => return,
        };
        let values = cache
            .iter()
            .enumerate()
            .map(|(k, cached)| cached.unwrap_or_else(|| f(k + 1)))
            .collect::<Vec<_>>();
        *self.inner.repr.borrow_mut() = VectorRepr::Dense(Array1::from_vec(values));
    }

    /// Independent copy. A faithful copy keeps the representation (a view
    /// copy is a new view of the same target); otherwise the copy is dense.
    pub fn deep_clone(&self, faithful: bool) -> Vector {
        let repr = if faithful {
            match &*self.inner.repr.borrow() {
                VectorRepr::Dense(values) => VectorRepr::Dense(values.clone()),
                VectorRepr::Sparse(map) => VectorRepr::Sparse(map.clone()),
                VectorRepr::Tabular { f, cache } => VectorRepr::Tabular {
                    f: f.clone(),
                    cache: cache.clone(),
                },
                VectorRepr::Constant(value) => VectorRepr::Constant(*value),
                VectorRepr::View(target) => VectorRepr::View(target.clone()),
            }
        } else {
            VectorRepr::Dense(self.to_array1())
        };
        let copy = Self::from_repr(self.len(), repr);
        copy.inner
            .mutable
            .set(self.inner.mutable.get() && copy.kind() != VectorKind::Constant);
        copy
    }

    /// `true` when both vectors have the same length and every pair of
    /// entries differs by at most `tolerance`.
    pub fn equals(&self, other: &Vector, tolerance: f64) -> bool {
        self.len() == other.len()
            && (1..=self.len()).all(|i| (self.get(i) - other.get(i)).abs() <= tolerance)
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .field("mutable", &self.is_mutable())
            .field("values", &self.to_vec())
            .finish()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 1..=self.len() {
            if i > 1 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.get(i))?;
        }
        write!(f, "]")
    }
}

impl From<Array1<f64>> for Vector {
    fn from(values: Array1<f64>) -> Self {
        Vector::from_array1(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    #[test]
    fn test_out_of_range_reads_zero() {
        let dense = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();
        let sparse = Vector::sparse([(2, 5.0)], 3).unwrap();
        let tabular = Vector::tabular(3, |i| i as f64);
        let constant = Vector::constant(7.0, 3);
        let view = dense.view(&[3, 1]);

        for v in [&dense, &sparse, &tabular, &constant, &view] {
            assert_eq!(v.get(0), 0.0);
            assert_eq!(v.get(v.len() + 1), 0.0);
            assert_eq!(v.get(100), 0.0);
        }
    }

    #[test]
    fn test_empty_dense_rejected() {
        assert!(matches!(
            Vector::dense(vec![]),
            Err(LinalgError::Construction { .. })
        ));
        assert_eq!(Vector::zeros(0).len(), 0);
    }

    #[test]
    fn test_from_vector_identity() {
        let v = Vector::dense(vec![1.0, 2.0]).unwrap();
        let w = Vector::from_vector(&v);
        assert!(v.ptr_eq(&w));
        assert!(!v.ptr_eq(&v.deep_clone(true)));
    }

    #[test]
    fn test_set_requires_mutable() {
        let v = Vector::dense(vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            v.set(1, 3.0),
            Err(LinalgError::Immutable { .. })
        ));
        v.set_mutable(true).unwrap();
        v.set(1, 3.0).unwrap();
        assert_eq!(v.get(1), 3.0);
        assert!(matches!(
            v.set(3, 1.0),
            Err(LinalgError::OutOfBounds { index: 3, extent: 2 })
        ));
    }

    #[test]
    fn test_constant_never_mutable() {
        let c = Vector::constant(2.0, 4);
        assert!(c.set_mutable(true).is_err());
        assert!(!c.is_mutable());
        assert!(c.set(1, 1.0).is_err());
    }

    #[test]
    fn test_sparse_zero_write_removes_entry() {
        let v = Vector::sparse([(1, 1.0), (3, 2.0)], 4)
            .unwrap()
            .with_mutable(true)
            .unwrap();
        assert_eq!(v.nnz(), 2);
        v.set(1, 0.0).unwrap();
        assert_eq!(v.nnz(), 1);
        assert_eq!(v.kind(), VectorKind::Sparse);
    }

    #[test]
    fn test_tabular_memoizes() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let v = Vector::tabular(4, move |i| {
            counter.set(counter.get() + 1);
            (i * i) as f64
        });
        assert_eq!(v.get(3), 9.0);
        assert_eq!(v.get(3), 9.0);
        assert_eq!(calls.get(), 1);

        v.force();
        assert_eq!(v.kind(), VectorKind::Dense);
        assert_eq!(v.to_vec(), vec![1.0, 4.0, 9.0, 16.0]);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_view_aliases_target() {
        let v = Vector::dense(vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_mutable(true)
            .unwrap();
        let view = v.view(&[4, 2]);
        assert_eq!(view.to_vec(), vec![4.0, 2.0]);

        view.set(1, 40.0).unwrap();
        assert_eq!(v.get(4), 40.0);

        v.set(2, 20.0).unwrap();
        assert_eq!(view.get(2), 20.0);

        v.set_mutable(false).unwrap();
        assert!(!view.is_mutable());
        assert!(view.set(1, 1.0).is_err());
    }

    #[test]
    fn test_each_skips_sparse_zeros() {
        let v = Vector::sparse([(2, 1.5), (5, -2.0)], 6).unwrap();
        let mut visited = Vec::new();
        v.each(true, |i, _| visited.push(i));
        assert_eq!(visited, vec![2, 5]);

        let mut count = 0;
        v.each(false, |_, _| count += 1);
        assert_eq!(count, 6);
    }

    #[test]
    fn test_map_keeps_sparse() {
        let v = Vector::sparse([(1, 2.0), (4, 3.0)], 5).unwrap();
        let doubled = v.map(true, |_, x| 2.0 * x);
        assert_eq!(doubled.kind(), VectorKind::Sparse);
        assert_eq!(doubled.to_vec(), vec![4.0, 0.0, 0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_reduce() {
        let v = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();
        let weighted = v.reduce(false, 0.0, |acc, i, x| acc + i as f64 * x);
        assert_relative_eq!(weighted, 14.0);
    }

    #[test]
    fn test_deep_clone_modes() {
        let v = Vector::sparse([(2, 1.0)], 3).unwrap();
        assert_eq!(v.deep_clone(true).kind(), VectorKind::Sparse);
        assert_eq!(v.deep_clone(false).kind(), VectorKind::Dense);
        assert!(v.deep_clone(false).equals(&v, 0.0));
    }
}
