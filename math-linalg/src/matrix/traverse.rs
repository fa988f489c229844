//! Iteration, mapping and transposition
//!
//! `each`, `reduce` and `map` only visit the structural support of sparse
//! and structured matrices; `each_dense` visits every cell.

use super::{Matrix, MatrixKind, MatrixRepr, StorageOrder};
use crate::error::{LinalgError, Result};
use crate::vector::Vector;
use ndarray::Array1;
use std::collections::BTreeMap;

impl Matrix {
    /// Call `f(i, j, value)` for every cell of the structural support.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, f64),
    {
        for (i, j) in self.support_cells() {
            f(i, j, self.get(i, j));
        }
    }

    /// Call `f(i, j, value)` for every cell, in row-major order.
    pub fn each_dense<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, f64),
    {
        for i in 1..=self.nrow() {
            for j in 1..=self.ncol() {
                f(i, j, self.get(i, j));
            }
        }
    }

    /// Call `f(i, row)` with a view of each row.
    pub fn each_row<F>(&self, mut f: F)
    where
        F: FnMut(usize, Vector),
    {
        for i in 1..=self.nrow() {
            f(i, self.row_view(i));
        }
    }

    /// Call `f(j, col)` with a view of each column.
    pub fn each_col<F>(&self, mut f: F)
    where
        F: FnMut(usize, Vector),
    {
        for j in 1..=self.ncol() {
            f(j, self.col_view(j));
        }
    }

    /// Fold `f(acc, i, j, value)` over the structural support.
    pub fn reduce<F>(&self, init: f64, mut f: F) -> f64
    where
        F: FnMut(f64, usize, usize, f64) -> f64,
    {
        let mut acc = init;
        self.each(|i, j, v| acc = f(acc, i, j, v));
        acc
    }

    /// Per-row fold of `f(acc, j, value)` over the support; one entry per row.
    pub fn reduce_row<F>(&self, init: f64, mut f: F) -> Vector
    where
        F: FnMut(f64, usize, f64) -> f64,
    {
        let mut acc = Array1::from_elem(self.nrow(), init);
        self.each(|i, j, v| acc[i - 1] = f(acc[i - 1], j, v));
        Vector::from_array1(acc)
    }

    /// Per-column fold of `f(acc, i, value)` over the support; one entry per column.
    pub fn reduce_col<F>(&self, init: f64, mut f: F) -> Vector
    where
        F: FnMut(f64, usize, f64) -> f64,
    {
        let mut acc = Array1::from_elem(self.ncol(), init);
        self.each(|i, j, v| acc[j - 1] = f(acc[j - 1], i, v));
        Vector::from_array1(acc)
    }

    /// New matrix with `f(i, j, value)` on the structural support; cells
    /// outside the support stay zero. Diagonal, triangular, symmetric and
    /// sparse inputs keep their representation (a symmetric input evaluates
    /// `f` on its upper triangle); read-only structured inputs become sparse
    /// and everything else dense.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(usize, usize, f64) -> f64,
    {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        match self.kind() {
            MatrixKind::Sparse | MatrixKind::ConstDiagonal | MatrixKind::Permutation | MatrixKind::Outer => {
                let cells = self
                    .support_cells()
                    .into_iter()
                    .map(|(i, j)| (i, j, f(i, j, self.get(i, j))));
                Matrix::sparse_from_cells(cells, nrow, ncol)
            }
            kind => Matrix::build(kind, nrow, ncol, |i, j| f(i, j, self.get(i, j))),
        }
    }

    /// Dense matrix whose row `i` is `f(i, row_i)`. Every produced row must
    /// have the same length.
    pub fn map_row<F>(&self, mut f: F) -> Result<Matrix>
    where
        F: FnMut(usize, &Vector) -> Vector,
    {
        let lines = (1..=self.nrow())
            .map(|i| f(i, &self.row_view(i)).to_vec())
            .collect::<Vec<_>>();
        Matrix::from_lines(lines, StorageOrder::RowMajor)
    }

    /// Dense matrix whose column `j` is `f(j, col_j)`. Every produced column
    /// must have the same length.
    pub fn map_col<F>(&self, mut f: F) -> Result<Matrix>
    where
        F: FnMut(usize, &Vector) -> Vector,
    {
        let lines = (1..=self.ncol())
            .map(|j| f(j, &self.col_view(j)).to_vec())
            .collect::<Vec<_>>();
        Matrix::from_lines(lines, StorageOrder::ColumnMajor)
    }

    fn from_lines(lines: Vec<Vec<f64>>, order: StorageOrder) -> Result<Matrix> {
        if lines.iter().any(|line| line.len() != lines[0].len()) {
            return Err(LinalgError::construction(
                "mapped rows/columns have different lengths",
            ));
        }
        Matrix::from_nested(&lines, order)
    }

    /// Transpose. Diagonal, constant-diagonal and symmetric matrices return
    /// the same handle; triangular matrices swap kind over a copy of their
    /// packed values; permutations invert; outer products swap factors.
    /// Views are materialized as dense copies.
    pub fn transpose(&self) -> Matrix {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let repr = match &*self.repr() {
            MatrixRepr::Diagonal(_) | MatrixRepr::ConstDiagonal(_) | MatrixRepr::Symmetric(_) => {
                return self.clone();
            }
            MatrixRepr::Dense { values, order } => MatrixRepr::Dense {
                values: values.deep_clone(true),
                order: order.flipped(),
            },
            MatrixRepr::Sparse(rows) => {
                let mut swapped: BTreeMap<usize, BTreeMap<usize, f64>> = BTreeMap::new();
                for (&i, row) in rows {
                    for (&j, &v) in row {
                        swapped.entry(j).or_default().insert(i, v);
                    }
                }
                MatrixRepr::Sparse(swapped)
            }
            MatrixRepr::Tabular { .. } => {
                let source = self.clone();
                let values = Vector::tabular(nrow * ncol, move |k| {
                    let i = (k - 1) / nrow + 1;
                    let j = (k - 1) % nrow + 1;
                    source.get(j, i)
                });
                MatrixRepr::Tabular { values }
            }
            MatrixRepr::View { .. } => {
                return Matrix::dense_from_fn(ncol, nrow, |i, j| self.get(j, i));
            }
            MatrixRepr::LowerTriangular(values) => {
                MatrixRepr::UpperTriangular(values.deep_clone(true))
            }
            MatrixRepr::UpperTriangular(values) => {
                MatrixRepr::LowerTriangular(values.deep_clone(true))
            }
            MatrixRepr::Permutation { perm, scale } => MatrixRepr::Permutation {
                perm: perm.inverse(),
                scale: *scale,
            },
            MatrixRepr::Outer { u, v } => MatrixRepr::Outer {
                u: v.clone(),
                v: u.clone(),
            },
        };
        Matrix::from_repr(ncol, nrow, repr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::Permutation;

    fn all_kinds() -> Vec<Matrix> {
        let u = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();
        let v = Vector::dense(vec![4.0, 5.0]).unwrap();
        vec![
            Matrix::from_flat((1..=6).map(f64::from).collect(), 2, 3, StorageOrder::RowMajor).unwrap(),
            Matrix::from_flat((1..=6).map(f64::from).collect(), 2, 3, StorageOrder::ColumnMajor)
                .unwrap(),
            Matrix::sparse([(1, 3, 2.0), (2, 1, -1.0)], 2, 3).unwrap(),
            Matrix::tabular(2, 3, |i, j| (i * 10 + j) as f64).unwrap(),
            Matrix::zeros(4, 4).view(&[1, 2], &[2, 3, 4]),
            Matrix::diagonal(vec![1.0, 2.0, 3.0]).unwrap(),
            Matrix::const_diagonal(2.5, 3),
            Matrix::lower_triangular(3, |i, j| (i + 2 * j) as f64),
            Matrix::upper_triangular(3, |i, j| (i * j) as f64),
            Matrix::symmetric(3, |i, j| (i + j) as f64),
            Matrix::permutation(Permutation::from_cycle(&[1, 3, 2]).unwrap(), 3).unwrap(),
            Matrix::outer(&u, &v),
        ]
    }

    #[test]
    fn test_double_transpose() {
        for m in all_kinds() {
            let t = m.transpose();
            assert_eq!((t.nrow(), t.ncol()), (m.ncol(), m.nrow()), "{:?}", m.kind());
            for i in 1..=m.nrow() {
                for j in 1..=m.ncol() {
                    assert_eq!(t.get(j, i), m.get(i, j), "{:?}", m.kind());
                }
            }
            assert!(t.transpose().equals(&m, 1e-12), "{:?}", m.kind());
        }
    }

    #[test]
    fn test_transpose_kinds() {
        let l = Matrix::lower_triangular(2, |_, _| 1.0);
        assert_eq!(l.transpose().kind(), MatrixKind::UpperTriangular);
        let d = Matrix::diagonal(vec![1.0, 2.0]).unwrap();
        assert!(d.transpose().ptr_eq(&d));
        let p = Matrix::permutation(Permutation::from_cycle(&[1, 2, 3]).unwrap(), 3).unwrap();
        let (inv, _) = p.transpose().as_permutation().unwrap();
        assert_eq!(inv.get(2), 1);
    }

    #[test]
    fn test_each_restricts_to_support() {
        let mut count = 0;
        Matrix::lower_triangular(4, |_, _| 1.0).each(|_, _, _| count += 1);
        assert_eq!(count, 10);

        count = 0;
        Matrix::sparse([(1, 1, 1.0), (3, 2, 2.0)], 3, 3)
            .unwrap()
            .each(|_, _, _| count += 1);
        assert_eq!(count, 2);

        count = 0;
        Matrix::identity(3).each_dense(|_, _, _| count += 1);
        assert_eq!(count, 9);
    }

    #[test]
    fn test_reduce_rows_and_cols() {
        let m = Matrix::from_nested(&[vec![1.0, 2.0], vec![3.0, 4.0]], StorageOrder::RowMajor)
            .unwrap();
        assert_eq!(m.reduce(0.0, |acc, _, _, v| acc + v), 10.0);
        assert_eq!(m.reduce_row(0.0, |acc, _, v| acc + v).to_vec(), vec![3.0, 7.0]);
        assert_eq!(m.reduce_col(0.0, |acc, _, v| acc + v).to_vec(), vec![4.0, 6.0]);
    }

    #[test]
    fn test_map_preserves_structure() {
        let l = Matrix::lower_triangular(3, |i, j| (i + j) as f64);
        let doubled = l.map(|_, _, v| 2.0 * v);
        assert_eq!(doubled.kind(), MatrixKind::LowerTriangular);
        assert_eq!(doubled.get(3, 1), 8.0);

        let p = Matrix::permutation(Permutation::from_cycle(&[1, 2]).unwrap(), 2).unwrap();
        let mapped = p.map(|_, _, v| v + 1.0);
        assert_eq!(mapped.kind(), MatrixKind::Sparse);
        assert_eq!(mapped.get(1, 2), 2.0);
        assert_eq!(mapped.get(1, 1), 0.0);
    }

    #[test]
    fn test_map_row_and_col() {
        let m = Matrix::from_nested(&[vec![1.0, 2.0], vec![3.0, 4.0]], StorageOrder::RowMajor)
            .unwrap();
        let scaled = m.map_row(|i, row| row.s_mult(i as f64)).unwrap();
        assert_eq!(scaled.to_nested(), vec![vec![1.0, 2.0], vec![6.0, 8.0]]);

        let cols = m.map_col(|_, col| col.diff()).unwrap();
        assert_eq!((cols.nrow(), cols.ncol()), (1, 2));
        assert_eq!(cols.to_nested(), vec![vec![2.0, 2.0]]);
    }
}
