//! Structured matrix variants
//!
//! | Variant | Storage | Mutable | Transpose |
//! |---|---|---|---|
//! | Diagonal | `n` values | yes | itself |
//! | Constant-diagonal | one scalar | never | itself |
//! | Lower-triangular | `n (n + 1) / 2` packed rows | yes | Upper-triangular |
//! | Upper-triangular | `n (n + 1) / 2` packed columns | yes | Lower-triangular |
//! | Symmetric | upper-packed, writes mirror | yes | itself |
//! | Permutation | a [`Permutation`] and a scale | never | inverse permutation |
//! | Outer-product `u vᵗ` | two vectors | never | `v uᵗ` |
//!
//! Row-packed lower storage and column-packed upper storage share the same
//! layout under transposition, so transposing a triangular matrix only
//! relabels a copy of its values.

use super::{Matrix, MatrixKind, MatrixRepr, StorageOrder, lower_index, upper_index};
use crate::error::{LinalgError, Result};
use crate::permutation::Permutation;
use crate::vector::Vector;
use ndarray::Array1;
use std::collections::BTreeMap;

fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

impl Matrix {
    /// Diagonal matrix with the given diagonal entries
    pub fn diagonal(values: Vec<f64>) -> Result<Self> {
        let d = Vector::dense(values)?;
        Ok(Self::diagonal_from(&d))
    }

    /// Diagonal matrix holding a copy of `d`
    pub fn diagonal_from(d: &Vector) -> Self {
        Self::from_repr(d.len(), d.len(), MatrixRepr::Diagonal(d.deep_clone(false)))
    }

    /// `value * I` of size `n`
    pub fn const_diagonal(value: f64, n: usize) -> Self {
        Self::from_repr(n, n, MatrixRepr::ConstDiagonal(value))
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        Self::const_diagonal(1.0, n)
    }

    /// Lower-triangular `n x n` matrix with `(i, j) = f(i, j)` for `i >= j`
    pub fn lower_triangular<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut values = Array1::zeros(packed_len(n));
        for i in 1..=n {
            for j in 1..=i {
                values[lower_index(i, j) - 1] = f(i, j);
            }
        }
        Self::from_repr(n, n, MatrixRepr::LowerTriangular(Vector::from_array1(values)))
    }

    /// Upper-triangular `n x n` matrix with `(i, j) = f(i, j)` for `i <= j`
    pub fn upper_triangular<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut values = Array1::zeros(packed_len(n));
        for j in 1..=n {
            for i in 1..=j {
                values[upper_index(i, j) - 1] = f(i, j);
            }
        }
        Self::from_repr(n, n, MatrixRepr::UpperTriangular(Vector::from_array1(values)))
    }

    /// Symmetric `n x n` matrix; `f` is evaluated on the upper triangle
    /// (`i <= j`) and mirrored.
    pub fn symmetric<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut values = Array1::zeros(packed_len(n));
        for j in 1..=n {
            for i in 1..=j {
                values[upper_index(i, j) - 1] = f(i, j);
            }
        }
        Self::from_repr(n, n, MatrixRepr::Symmetric(Vector::from_array1(values)))
    }

    /// Permutation matrix of size `n` with `(i, perm(i)) = 1`
    pub fn permutation(perm: Permutation, n: usize) -> Result<Self> {
        Self::scaled_permutation(perm, 1.0, n)
    }

    pub(crate) fn scaled_permutation(perm: Permutation, scale: f64, n: usize) -> Result<Self> {
        if perm.max_index() > n {
            return Err(LinalgError::construction(format!(
                "permutation moves index {} beyond size {}",
                perm.max_index(),
                n
            )));
        }
        Ok(Self::from_repr(n, n, MatrixRepr::Permutation { perm, scale }))
    }

    /// Outer product `u vᵗ` over copies of `u` and `v`
    pub fn outer(u: &Vector, v: &Vector) -> Self {
        Self::from_repr(
            u.len(),
            v.len(),
            MatrixRepr::Outer {
                u: u.deep_clone(true),
                v: v.deep_clone(true),
            },
        )
    }

    /// The permutation and scale of a permutation matrix
    pub fn as_permutation(&self) -> Option<(Permutation, f64)> {
        match &*self.repr() {
            MatrixRepr::Permutation { perm, scale } => Some((perm.clone(), *scale)),
            _ => None,
        }
    }

    /// Scalar of a constant-diagonal matrix
    pub(crate) fn const_diagonal_value(&self) -> Option<f64> {
        match &*self.repr() {
            MatrixRepr::ConstDiagonal(c) => Some(*c),
            _ => None,
        }
    }

    /// Factors of an outer-product matrix
    pub(crate) fn outer_factors(&self) -> Option<(Vector, Vector)> {
        match &*self.repr() {
            MatrixRepr::Outer { u, v } => Some((u.clone(), v.clone())),
            _ => None,
        }
    }

    /// Sparse map of a sparse matrix
    pub(crate) fn sparse_rows(&self) -> Option<BTreeMap<usize, BTreeMap<usize, f64>>> {
        match &*self.repr() {
            MatrixRepr::Sparse(rows) => Some(rows.clone()),
            _ => None,
        }
    }

    /// Cells that may hold a nonzero value, in row-major order. Dense,
    /// tabular, view and symmetric matrices report every cell.
    pub fn support_cells(&self) -> Vec<(usize, usize)> {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let all = || {
            (1..=nrow)
                .flat_map(|i| (1..=ncol).map(move |j| (i, j)))
                .collect::<Vec<_>>()
        };
        match &*self.repr() {
            MatrixRepr::Sparse(rows) => rows
                .iter()
                .flat_map(|(&i, row)| row.keys().map(move |&j| (i, j)))
                .collect(),
            MatrixRepr::Diagonal(_) | MatrixRepr::ConstDiagonal(_) => {
                (1..=nrow.min(ncol)).map(|k| (k, k)).collect()
            }
            MatrixRepr::LowerTriangular(_) => (1..=nrow)
                .flat_map(|i| (1..=i).map(move |j| (i, j)))
                .collect(),
            MatrixRepr::UpperTriangular(_) => (1..=nrow)
                .flat_map(|i| (i..=ncol).map(move |j| (i, j)))
                .collect(),
            MatrixRepr::Permutation { perm, .. } => (1..=nrow).map(|i| (i, perm.get(i))).collect(),
            MatrixRepr::Outer { u, v } => {
                let mut rows = Vec::new();
                u.each(true, |i, _| rows.push(i));
                let mut cols = Vec::new();
                v.each(true, |j, _| cols.push(j));
                rows.iter()
                    .flat_map(|&i| cols.iter().map(move |&j| (i, j)))
                    .collect()
            }
            _ => all(),
        }
    }

    /// Build a matrix of representation `kind` whose supported cells hold
    /// `f(i, j)`. Representations that cannot be filled cell by cell
    /// (constant-diagonal, permutation, outer-product, tabular, view) fall
    /// back to dense.
    pub(crate) fn build<F>(kind: MatrixKind, nrow: usize, ncol: usize, f: F) -> Matrix
    where
        F: Fn(usize, usize) -> f64,
    {
        let square = nrow == ncol;
        match kind {
            MatrixKind::Diagonal if square => {
                let d = Vector::from_array1((1..=nrow).map(|k| f(k, k)).collect());
                Self::from_repr(nrow, ncol, MatrixRepr::Diagonal(d))
            }
            MatrixKind::LowerTriangular if square => Self::lower_triangular(nrow, f),
            MatrixKind::UpperTriangular if square => Self::upper_triangular(nrow, f),
            MatrixKind::Symmetric if square => Self::symmetric(nrow, f),
            MatrixKind::Sparse => {
                let rows = (1..=nrow)
                    .filter_map(|i| {
                        let row: BTreeMap<usize, f64> = (1..=ncol)
                            .map(|j| (j, f(i, j)))
                            .filter(|&(_, v)| v != 0.0)
                            .collect();
                        (!row.is_empty()).then_some((i, row))
                    })
                    .collect();
                Self::from_repr(nrow, ncol, MatrixRepr::Sparse(rows))
            }
            _ => Self::dense_from_fn(nrow, ncol, f),
        }
    }

    /// Row-major dense matrix with `(i, j) = f(i, j)`
    pub(crate) fn dense_from_fn<F>(nrow: usize, ncol: usize, f: F) -> Matrix
    where
        F: Fn(usize, usize) -> f64,
    {
        let values: Array1<f64> = (1..=nrow)
            .flat_map(|i| (1..=ncol).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self::from_repr(
            nrow,
            ncol,
            MatrixRepr::Dense {
                values: Vector::from_array1(values),
                order: StorageOrder::RowMajor,
            },
        )
    }

    /// Sparse matrix from already validated, nonzero triplets
    pub(crate) fn sparse_from_cells<I>(cells: I, nrow: usize, ncol: usize) -> Matrix
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut rows: BTreeMap<usize, BTreeMap<usize, f64>> = BTreeMap::new();
        for (i, j, v) in cells {
            if v != 0.0 {
                rows.entry(i).or_default().insert(j, v);
            }
        }
        Self::from_repr(nrow, ncol, MatrixRepr::Sparse(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_support() {
        let d = Matrix::diagonal(vec![1.0, 2.0, 3.0])
            .unwrap()
            .with_mutable(true)
            .unwrap();
        assert_eq!(d.get(2, 2), 2.0);
        assert_eq!(d.get(1, 2), 0.0);

        d.set(3, 3, 5.0).unwrap();
        assert_eq!(d.get(3, 3), 5.0);

        // zero off the diagonal is a no-op, nonzero is rejected
        d.set(1, 3, 0.0).unwrap();
        assert!(matches!(
            d.set(1, 3, 1.0),
            Err(LinalgError::OutOfStructure { row: 1, col: 3, .. })
        ));
    }

    #[test]
    fn test_triangular_layouts() {
        let l = Matrix::lower_triangular(3, |i, j| (10 * i + j) as f64);
        let u = Matrix::upper_triangular(3, |i, j| (10 * i + j) as f64);
        assert_eq!(l.get(3, 2), 32.0);
        assert_eq!(l.get(2, 3), 0.0);
        assert_eq!(u.get(2, 3), 23.0);
        assert_eq!(u.get(3, 2), 0.0);

        let l = l.with_mutable(true).unwrap();
        assert!(l.set(1, 2, 1.0).is_err());
        l.set(2, 1, 7.0).unwrap();
        assert_eq!(l.get(2, 1), 7.0);
    }

    #[test]
    fn test_symmetric_writes_mirror() {
        let s = Matrix::symmetric(3, |i, j| (i + j) as f64)
            .with_mutable(true)
            .unwrap();
        assert_eq!(s.get(3, 1), s.get(1, 3));
        s.set(3, 2, -4.0).unwrap();
        assert_eq!(s.get(2, 3), -4.0);
    }

    #[test]
    fn test_read_only_kinds() {
        let p = Matrix::permutation(Permutation::from_cycle(&[1, 2]).unwrap(), 3).unwrap();
        let c = Matrix::identity(3);
        let u = Vector::dense(vec![1.0, 2.0]).unwrap();
        let o = Matrix::outer(&u, &u);
        for m in [&p, &c, &o] {
            assert!(m.set_mutable(true).is_err());
            assert!(m.set(1, 1, 1.0).is_err());
        }
        assert_eq!(p.get(1, 2), 1.0);
        assert_eq!(p.get(3, 3), 1.0);
        assert_eq!(o.get(2, 1), 2.0);
    }

    #[test]
    fn test_permutation_too_small() {
        let p = Permutation::from_cycle(&[1, 5]).unwrap();
        assert!(Matrix::permutation(p, 3).is_err());
    }

    #[test]
    fn test_support_cells() {
        assert_eq!(Matrix::identity(2).support_cells(), vec![(1, 1), (2, 2)]);
        assert_eq!(
            Matrix::upper_triangular(2, |_, _| 1.0).support_cells(),
            vec![(1, 1), (1, 2), (2, 2)]
        );
        let u = Vector::sparse([(2, 1.0)], 3).unwrap();
        let v = Vector::dense(vec![1.0, 0.0]).unwrap();
        assert_eq!(Matrix::outer(&u, &v).support_cells(), vec![(2, 1)]);
    }
}
