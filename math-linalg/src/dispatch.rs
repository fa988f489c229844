//! Operation dispatch for sums, scalar multiples and products
//!
//! For every pair of operand representations the dispatch picks the
//! narrowest representation that can hold the result exactly. The lattice
//! used to combine two structured operands is
//!
//! ```text
//!                    Dense (generic)
//!         /              |              \
//!   Symmetric    LowerTriangular   UpperTriangular
//!         \              |              /
//!                     Diagonal
//!                        |
//!                  ConstDiagonal
//! ```
//!
//! Every other representation (sparse, tabular, view, permutation, outer
//! product) only shares the generic class with the rest.

use crate::error::{LinalgError, Result};
use crate::matrix::{Matrix, MatrixKind, MatrixRepr};
use crate::permutation::Permutation;
use crate::vector::Vector;
use ndarray::Array1;
use std::collections::BTreeMap;
use std::ops::Mul;

/// Either operand of a product
#[derive(Debug, Clone)]
pub enum Operand {
    Matrix(Matrix),
    Vector(Vector),
}

impl Operand {
    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Operand::Matrix(m) => Some(m),
            Operand::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Operand::Vector(v) => Some(v),
            Operand::Matrix(_) => None,
        }
    }
}

impl From<Matrix> for Operand {
    fn from(m: Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl From<Vector> for Operand {
    fn from(v: Vector) -> Self {
        Operand::Vector(v)
    }
}

impl MatrixKind {
    /// Structural classes this representation belongs to, most specific first.
    pub fn ancestors(self) -> &'static [MatrixKind] {
        use MatrixKind::*;
        match self {
            ConstDiagonal => &[
                ConstDiagonal,
                Diagonal,
                Symmetric,
                LowerTriangular,
                UpperTriangular,
                Dense,
            ],
            Diagonal => &[Diagonal, Symmetric, LowerTriangular, UpperTriangular, Dense],
            Symmetric => &[Symmetric, Dense],
            LowerTriangular => &[LowerTriangular, Dense],
            UpperTriangular => &[UpperTriangular, Dense],
            _ => &[Dense],
        }
    }
}

/// Most specific class shared by `a` and `b`; `Dense` stands for the
/// generic matrix.
pub fn common_ancestor(a: MatrixKind, b: MatrixKind) -> MatrixKind {
    let theirs = b.ancestors();
    a.ancestors()
        .iter()
        .copied()
        .find(|kind| theirs.contains(kind))
        .unwrap_or(MatrixKind::Dense)
}

/// Product of two operands. A vector operand routes to the matrix-vector
/// product on the matching side; two vectors are rejected.
pub fn product(lhs: &Operand, rhs: &Operand) -> Result<Operand> {
    match (lhs, rhs) {
        (Operand::Matrix(a), Operand::Matrix(b)) => a.mult(b).map(Operand::Matrix),
        (Operand::Matrix(a), Operand::Vector(x)) => a.mult_vec(x).map(Operand::Vector),
        (Operand::Vector(x), Operand::Matrix(a)) => x.mult_matrix(a).map(Operand::Vector),
        (Operand::Vector(_), Operand::Vector(_)) => Err(LinalgError::InvalidOperation {
            reason: "product of two vectors is ambiguous; use dot or Matrix::outer".into(),
        }),
    }
}

/// Dot product of two vectors already known to have the same length
fn dot_same_len(a: &Vector, b: &Vector) -> f64 {
    a.reduce(true, 0.0, |acc, i, v| acc + v * b.get(i))
}

impl Matrix {
    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.nrow() != other.nrow() {
            return Err(LinalgError::mismatch(op, self.nrow(), other.nrow()));
        }
        if self.ncol() != other.ncol() {
            return Err(LinalgError::mismatch(op, self.ncol(), other.ncol()));
        }
        Ok(())
    }

    /// `self + k * other` in the narrowest representation both operands share.
    pub fn plus(&self, other: &Matrix, k: f64) -> Result<Matrix> {
        self.check_same_shape("plus", other)?;
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let (a, b) = (self.kind(), other.kind());

        if a == MatrixKind::Sparse && b == MatrixKind::Sparse {
            let mut cells = self.support_cells();
            cells.extend(other.support_cells());
            cells.sort_unstable();
            cells.dedup();
            let entries = cells
                .into_iter()
                .map(|(i, j)| (i, j, self.get(i, j) + k * other.get(i, j)));
            return Ok(Matrix::sparse_from_cells(entries, nrow, ncol));
        }

        if let (Some(ca), Some(cb)) = (self.const_diagonal_value(), other.const_diagonal_value()) {
            return Ok(Matrix::const_diagonal(ca + k * cb, nrow));
        }

        let kind = common_ancestor(a, b);
        log::trace!("plus: {:?} + {:?} -> {:?}", a, b, kind);
        Ok(Matrix::build(kind, nrow, ncol, |i, j| {
            self.get(i, j) + k * other.get(i, j)
        }))
    }

    /// `self - other`
    pub fn minus(&self, other: &Matrix) -> Result<Matrix> {
        self.plus(other, -1.0)
    }

    /// `k * self`, keeping the representation. Views are materialized.
    pub fn scale(&self, k: f64) -> Matrix {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let repr = match &*self.repr() {
            MatrixRepr::Dense { values, order } => MatrixRepr::Dense {
                values: values.s_mult(k),
                order: *order,
            },
            MatrixRepr::Sparse(rows) => MatrixRepr::Sparse(
                rows.iter()
                    .filter(|_| k != 0.0)
                    .map(|(&i, row)| {
                        let scaled = row.iter().map(|(&j, &v)| (j, k * v));
                        (i, scaled.collect::<BTreeMap<_, _>>())
                    })
                    .collect(),
            ),
            MatrixRepr::Tabular { values } => MatrixRepr::Tabular {
                values: values.s_mult(k),
            },
            MatrixRepr::View { .. } => {
                return Matrix::dense_from_fn(nrow, ncol, |i, j| k * self.get(i, j));
            }
            MatrixRepr::Diagonal(d) => MatrixRepr::Diagonal(d.s_mult(k)),
            MatrixRepr::ConstDiagonal(c) => MatrixRepr::ConstDiagonal(k * c),
            MatrixRepr::LowerTriangular(values) => MatrixRepr::LowerTriangular(values.s_mult(k)),
            MatrixRepr::UpperTriangular(values) => MatrixRepr::UpperTriangular(values.s_mult(k)),
            MatrixRepr::Symmetric(values) => MatrixRepr::Symmetric(values.s_mult(k)),
            MatrixRepr::Permutation { perm, scale } => MatrixRepr::Permutation {
                perm: perm.clone(),
                scale: k * scale,
            },
            MatrixRepr::Outer { u, v } => MatrixRepr::Outer {
                u: u.s_mult(k),
                v: v.clone(),
            },
        };
        Matrix::from_repr(nrow, ncol, repr)
    }

    /// Matrix-vector product `A x`
    pub fn mult_vec(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.ncol() {
            return Err(LinalgError::mismatch("mult_vec", self.ncol(), x.len()));
        }
        if let Some((perm, scale)) = self.as_permutation() {
            return Ok(Vector::from_array1(
                (1..=self.nrow())
                    .map(|i| scale * x.get(perm.get(i)))
                    .collect(),
            ));
        }
        if let Some(c) = self.const_diagonal_value() {
            return Ok(x.s_mult(c));
        }
        if self.kind() == MatrixKind::Diagonal {
            return self.diag_view().p_mult(x);
        }
        if let Some((u, v)) = self.outer_factors() {
            return Ok(u.s_mult(v.dot(x)?));
        }
        if let Some(rows) = self.sparse_rows() {
            let mut y = Array1::zeros(self.nrow());
            for (i, row) in rows {
                y[i - 1] = row.iter().map(|(&j, &a)| a * x.get(j)).sum();
            }
            return Ok(Vector::from_array1(y));
        }
        Ok(Vector::from_array1(
            (1..=self.nrow())
                .map(|i| dot_same_len(&self.row_view(i), x))
                .collect(),
        ))
    }

    /// Matrix product `self * other` in the narrowest valid representation.
    pub fn mult(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncol() != other.nrow() {
            return Err(LinalgError::mismatch("mult", self.ncol(), other.nrow()));
        }
        let (a, b) = (self.kind(), other.kind());
        let (n, m) = (self.nrow(), other.ncol());
        log::trace!("mult: {:?} x {:?}", a, b);

        match (self.as_permutation(), other.as_permutation()) {
            (Some((p, s)), Some((q, t))) => {
                return Matrix::scaled_permutation(p.compose(&q), s * t, n);
            }
            (Some((p, s)), None) => return Ok(other.permute_rows(&p, s)),
            (None, Some((q, t))) => return Ok(self.permute_cols(&q, t)),
            (None, None) => {}
        }

        if let (Some(ra), Some(rb)) = (self.sparse_rows(), other.sparse_rows()) {
            return Ok(sparse_product(&ra, &rb, n, m));
        }

        if let Some(c) = self.const_diagonal_value() {
            return Ok(other.scale(c));
        }
        if let Some(c) = other.const_diagonal_value() {
            return Ok(self.scale(c));
        }

        if a == MatrixKind::Diagonal {
            return Ok(other.scale_rows(&self.diag_view()));
        }
        if b == MatrixKind::Diagonal {
            return Ok(self.scale_cols(&other.diag_view()));
        }
        if let Some((u, v)) = self.outer_factors() {
            if let Some((u2, v2)) = other.outer_factors() {
                return Ok(Matrix::outer(&u.s_mult(v.dot(&u2)?), &v2));
            }
            return Ok(Matrix::outer(&u, &v.mult_matrix(other)?));
        }
        if let Some((u, v)) = other.outer_factors() {
            return Ok(Matrix::outer(&self.mult_vec(&u)?, &v));
        }

        let inner = self.ncol();
        let banded = |i: usize, j: usize, ks: std::ops::RangeInclusive<usize>| -> f64 {
            ks.map(|k| self.get(i, k) * other.get(k, j)).sum()
        };
        match (a, b) {
            (MatrixKind::LowerTriangular, MatrixKind::UpperTriangular) => {
                return Ok(Matrix::dense_from_fn(n, m, |i, j| banded(i, j, 1..=i.min(j))));
            }
            (MatrixKind::UpperTriangular, MatrixKind::LowerTriangular) => {
                return Ok(Matrix::dense_from_fn(n, m, |i, j| {
                    banded(i, j, i.max(j)..=inner)
                }));
            }
            (MatrixKind::LowerTriangular, MatrixKind::LowerTriangular) => {
                return Ok(Matrix::build(MatrixKind::LowerTriangular, n, m, |i, j| {
                    banded(i, j, j..=i)
                }));
            }
            (MatrixKind::UpperTriangular, MatrixKind::UpperTriangular) => {
                return Ok(Matrix::build(MatrixKind::UpperTriangular, n, m, |i, j| {
                    banded(i, j, i..=j)
                }));
            }
            _ => {}
        }

        // Every remaining pair only shares the generic class; symmetric
        // products are not symmetric in general
        Ok(Matrix::from_array2(
            &self.to_array2().dot(&other.to_array2()),
        ))
    }

    /// `(P B)(i, j) = s * B(p(i), j)` without a dense product
    fn permute_rows(&self, p: &Permutation, s: f64) -> Matrix {
        let (pull, inv) = (p.clone(), p.inverse());
        self.reindexed(s, move |i, j| (pull.get(i), j), move |r, c| (inv.get(r), c))
    }

    /// `(B Q)(i, j) = t * B(i, q⁻¹(j))` without a dense product
    fn permute_cols(&self, q: &Permutation, t: f64) -> Matrix {
        let (inv, push) = (q.inverse(), q.clone());
        self.reindexed(t, move |i, j| (i, inv.get(j)), move |r, c| (r, push.get(c)))
    }

    /// Re-index cells: result `(i, j)` reads `s * self(pull(i, j))`, and a
    /// stored cell `(r, c)` of `self` moves to `push(r, c)`.
    fn reindexed<P, Q>(&self, s: f64, pull: P, push: Q) -> Matrix
    where
        P: Fn(usize, usize) -> (usize, usize) + 'static,
        Q: Fn(usize, usize) -> (usize, usize),
    {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        match self.kind() {
            MatrixKind::Sparse | MatrixKind::Diagonal | MatrixKind::ConstDiagonal => {
                let cells = self.support_cells().into_iter().map(|(r, c)| {
                    let (i, j) = push(r, c);
                    (i, j, s * self.get(r, c))
                });
                Matrix::sparse_from_cells(cells, nrow, ncol)
            }
            MatrixKind::Tabular => {
                let source = self.clone();
                let values = Vector::tabular(nrow * ncol, move |k| {
                    let (i, j) = ((k - 1) / ncol + 1, (k - 1) % ncol + 1);
                    let (r, c) = pull(i, j);
                    s * source.get(r, c)
                });
                Matrix::from_repr(nrow, ncol, MatrixRepr::Tabular { values })
            }
            _ => Matrix::dense_from_fn(nrow, ncol, |i, j| {
                let (r, c) = pull(i, j);
                s * self.get(r, c)
            }),
        }
    }

    /// `diag(d) * self`
    fn scale_rows(&self, d: &Vector) -> Matrix {
        if let Some((u, v)) = self.outer_factors() {
            return Matrix::outer(&scaled(d, &u), &v);
        }
        self.scaled_cells(|i, _| d.get(i))
    }

    /// `self * diag(d)`
    fn scale_cols(&self, d: &Vector) -> Matrix {
        if let Some((u, v)) = self.outer_factors() {
            return Matrix::outer(&u, &scaled(d, &v));
        }
        self.scaled_cells(|_, j| d.get(j))
    }

    fn scaled_cells<F>(&self, factor: F) -> Matrix
    where
        F: Fn(usize, usize) -> f64,
    {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        let kind = self.kind();
        match kind {
            MatrixKind::Sparse => {
                let cells = self
                    .support_cells()
                    .into_iter()
                    .map(|(i, j)| (i, j, factor(i, j) * self.get(i, j)));
                Matrix::sparse_from_cells(cells, nrow, ncol)
            }
            MatrixKind::Diagonal | MatrixKind::LowerTriangular | MatrixKind::UpperTriangular => {
                Matrix::build(kind, nrow, ncol, |i, j| factor(i, j) * self.get(i, j))
            }
            _ => Matrix::dense_from_fn(nrow, ncol, |i, j| factor(i, j) * self.get(i, j)),
        }
    }
}

/// Pointwise product `d ∘ x` for vectors of equal length
fn scaled(d: &Vector, x: &Vector) -> Vector {
    x.map(true, |i, v| d.get(i) * v)
}

fn sparse_product(
    a: &BTreeMap<usize, BTreeMap<usize, f64>>,
    b: &BTreeMap<usize, BTreeMap<usize, f64>>,
    nrow: usize,
    ncol: usize,
) -> Matrix {
    let mut acc: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (&i, row) in a {
        for (&k, &a_ik) in row {
            if let Some(b_row) = b.get(&k) {
                for (&j, &b_kj) in b_row {
                    *acc.entry((i, j)).or_insert(0.0) += a_ik * b_kj;
                }
            }
        }
    }
    Matrix::sparse_from_cells(acc.into_iter().map(|((i, j), v)| (i, j, v)), nrow, ncol)
}

impl Vector {
    /// Left product `xᵗ A`
    pub fn mult_matrix(&self, a: &Matrix) -> Result<Vector> {
        if self.len() != a.nrow() {
            return Err(LinalgError::mismatch("mult_matrix", a.nrow(), self.len()));
        }
        if let Some((perm, scale)) = a.as_permutation() {
            let inv = perm.inverse();
            return Ok(Vector::from_array1(
                (1..=a.ncol()).map(|j| scale * self.get(inv.get(j))).collect(),
            ));
        }
        if let Some(c) = a.const_diagonal_value() {
            return Ok(self.s_mult(c));
        }
        if a.kind() == MatrixKind::Diagonal {
            return a.diag_view().p_mult(self);
        }
        if let Some((u, v)) = a.outer_factors() {
            return Ok(v.s_mult(self.dot(&u)?));
        }
        if let Some(rows) = a.sparse_rows() {
            let mut y = Array1::zeros(a.ncol());
            for (i, row) in rows {
                let xi = self.get(i);
                for (j, v) in row {
                    y[j - 1] += xi * v;
                }
            }
            return Ok(Vector::from_array1(y));
        }
        Ok(Vector::from_array1(
            (1..=a.ncol())
                .map(|j| dot_same_len(&a.col_view(j), self))
                .collect(),
        ))
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, k: f64) -> Matrix {
        self.scale(k)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.s_mult(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::StorageOrder;
    use approx::assert_relative_eq;

    fn dense3() -> Matrix {
        Matrix::from_nested(
            &[
                vec![4.0, 6.0, 7.0],
                vec![2.0, 1.0, 3.0],
                vec![5.0, 7.53, 9.95],
            ],
            StorageOrder::ColumnMajor,
        )
        .unwrap()
    }

    fn assert_same(actual: &Matrix, expected: &Matrix) {
        assert!(
            actual.equals(expected, 1e-10),
            "{:?}\n!=\n{:?}",
            actual.to_nested(),
            expected.to_nested()
        );
    }

    /// Reference product computed cell by cell
    fn naive(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix::dense_from_fn(a.nrow(), b.ncol(), |i, j| {
            (1..=a.ncol()).map(|k| a.get(i, k) * b.get(k, j)).sum()
        })
    }

    #[test]
    fn test_common_ancestor_table() {
        use MatrixKind::*;
        assert_eq!(common_ancestor(Diagonal, ConstDiagonal), Diagonal);
        assert_eq!(common_ancestor(ConstDiagonal, Diagonal), Diagonal);
        assert_eq!(common_ancestor(Diagonal, LowerTriangular), LowerTriangular);
        assert_eq!(common_ancestor(UpperTriangular, Diagonal), UpperTriangular);
        assert_eq!(common_ancestor(Symmetric, Diagonal), Symmetric);
        assert_eq!(common_ancestor(Symmetric, LowerTriangular), Dense);
        assert_eq!(common_ancestor(Sparse, Diagonal), Dense);
        assert_eq!(common_ancestor(Outer, MatrixKind::Permutation), Dense);
    }

    #[test]
    fn test_sum_structure_laws() {
        let d1 = Matrix::diagonal(vec![1.0, 2.0, 3.0]).unwrap();
        let d2 = Matrix::diagonal(vec![4.0, 5.0, 6.0]).unwrap();
        let c1 = Matrix::const_diagonal(2.0, 3);
        let c2 = Matrix::const_diagonal(3.0, 3);
        let s1 = Matrix::sparse([(1, 2, 1.0)], 3, 3).unwrap();
        let s2 = Matrix::sparse([(3, 1, 2.0)], 3, 3).unwrap();
        let y1 = Matrix::symmetric(3, |i, j| (i + j) as f64);
        let y2 = Matrix::symmetric(3, |i, j| (i * j) as f64);

        assert_eq!(d1.plus(&d2, 1.0).unwrap().kind(), MatrixKind::Diagonal);
        assert_eq!(d1.plus(&c1, 1.0).unwrap().kind(), MatrixKind::Diagonal);
        assert_eq!(c1.plus(&c2, 1.0).unwrap().kind(), MatrixKind::ConstDiagonal);
        assert_eq!(s1.plus(&s2, 1.0).unwrap().kind(), MatrixKind::Sparse);
        assert_eq!(y1.plus(&y2, 1.0).unwrap().kind(), MatrixKind::Symmetric);

        let sum = d1.plus(&c1, 2.0).unwrap();
        assert_relative_eq!(sum.get(3, 3), 7.0);
        assert_relative_eq!(c1.plus(&c2, -1.0).unwrap().get(2, 2), -1.0);
    }

    #[test]
    fn test_sum_values_match_entrywise() {
        let a = dense3();
        let pairs = [
            (a.clone(), Matrix::lower_triangular(3, |i, j| (i - j + 1) as f64)),
            (Matrix::diagonal(vec![1.0, 2.0, 3.0]).unwrap(), Matrix::upper_triangular(3, |i, j| (i + j) as f64)),
            (Matrix::sparse([(2, 3, 4.0)], 3, 3).unwrap(), Matrix::identity(3)),
        ];
        for (x, y) in pairs {
            let sum = x.plus(&y, 0.5).unwrap();
            for i in 1..=3 {
                for j in 1..=3 {
                    assert_relative_eq!(sum.get(i, j), x.get(i, j) + 0.5 * y.get(i, j));
                }
            }
        }
        let mixed = Matrix::diagonal(vec![1.0, 2.0, 3.0])
            .unwrap()
            .plus(&Matrix::upper_triangular(3, |_, _| 1.0), 1.0)
            .unwrap();
        assert_eq!(mixed.kind(), MatrixKind::UpperTriangular);
    }

    #[test]
    fn test_sum_shape_mismatch() {
        let err = Matrix::zeros(2, 3).plus(&Matrix::zeros(3, 3), 1.0).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_scale_scenario() {
        let a = dense3();
        let k = 2.5;
        let scaled = a.scale(k);
        for i in 1..=3 {
            for j in 1..=3 {
                assert_relative_eq!(a.get(i, j) * k, scaled.get(i, j));
            }
        }
        assert_same(&(&a * k), &scaled);
    }

    #[test]
    fn test_scale_tabular_is_a_snapshot() {
        let m = Matrix::tabular(2, 2, |i, j| (i * j) as f64)
            .unwrap()
            .with_mutable(true)
            .unwrap();
        let scaled = m.scale(3.0);
        m.set(2, 2, 100.0).unwrap();
        assert_eq!(scaled.kind(), MatrixKind::Tabular);
        assert_eq!(scaled.get(2, 2), 12.0);
        assert_eq!(m.get(2, 2), 100.0);
    }

    #[test]
    fn test_scale_preserves_kind() {
        let u = Vector::dense(vec![1.0, 2.0]).unwrap();
        let structured = [
            Matrix::diagonal(vec![1.0, 2.0]).unwrap(),
            Matrix::const_diagonal(3.0, 2),
            Matrix::lower_triangular(2, |i, j| (i + j) as f64),
            Matrix::upper_triangular(2, |i, j| (i + j) as f64),
            Matrix::symmetric(2, |i, j| (i + j) as f64),
            Matrix::permutation(Permutation::transposition(1, 2).unwrap(), 2).unwrap(),
            Matrix::outer(&u, &u),
            Matrix::sparse([(1, 2, 1.0)], 2, 2).unwrap(),
            Matrix::tabular(2, 2, |i, j| (i * j) as f64).unwrap(),
        ];
        for m in structured {
            let scaled = m.scale(-2.0);
            assert_eq!(scaled.kind(), m.kind());
            assert_same(&scaled, &Matrix::dense_from_fn(2, 2, |i, j| -2.0 * m.get(i, j)));
        }
    }

    #[test]
    fn test_product_matches_naive() {
        let u = Vector::dense(vec![1.0, -1.0, 2.0]).unwrap();
        let v = Vector::dense(vec![0.5, 3.0, 1.0]).unwrap();
        let perm = Permutation::from_cycle(&[1, 3, 2]).unwrap();
        let operands = vec![
            dense3(),
            Matrix::sparse([(1, 1, 2.0), (2, 3, -1.0), (3, 2, 4.0)], 3, 3).unwrap(),
            Matrix::tabular(3, 3, |i, j| (i as f64) - (j as f64) * 0.5).unwrap(),
            Matrix::diagonal(vec![2.0, -3.0, 0.5]).unwrap(),
            Matrix::const_diagonal(1.5, 3),
            Matrix::lower_triangular(3, |i, j| (i + j) as f64),
            Matrix::upper_triangular(3, |i, j| (2 * i + j) as f64),
            Matrix::symmetric(3, |i, j| (i * j) as f64 + 1.0),
            Matrix::permutation(perm.clone(), 3).unwrap(),
            Matrix::permutation(perm.inverse(), 3).unwrap().scale(2.0),
            Matrix::outer(&u, &v),
            dense3().view(&[3, 1, 2], &[2, 3, 1]),
        ];
        for a in &operands {
            for b in &operands {
                let product = a.mult(b).unwrap();
                assert_same(&product, &naive(a, b));
            }
        }
    }

    #[test]
    fn test_product_kinds() {
        let p = Matrix::permutation(Permutation::from_cycle(&[1, 2, 3]).unwrap(), 3).unwrap();
        let q = Matrix::permutation(Permutation::transposition(1, 3).unwrap(), 3).unwrap();
        let d = Matrix::diagonal(vec![1.0, 2.0, 3.0]).unwrap();
        let c = Matrix::const_diagonal(2.0, 3);
        let l = Matrix::lower_triangular(3, |_, _| 1.0);
        let u = Matrix::upper_triangular(3, |_, _| 1.0);
        let y = Matrix::symmetric(3, |_, _| 1.0);
        let s = Matrix::sparse([(1, 2, 1.0)], 3, 3).unwrap();
        let x = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();
        let o = Matrix::outer(&x, &x);

        assert_eq!(p.mult(&q).unwrap().kind(), MatrixKind::Permutation);
        assert_eq!(p.mult(&dense3()).unwrap().kind(), MatrixKind::Dense);
        assert_eq!(p.mult(&s).unwrap().kind(), MatrixKind::Sparse);
        assert_eq!(s.mult(&s).unwrap().kind(), MatrixKind::Sparse);
        assert_eq!(c.mult(&l).unwrap().kind(), MatrixKind::LowerTriangular);
        assert_eq!(d.mult(&d).unwrap().kind(), MatrixKind::Diagonal);
        assert_eq!(d.mult(&u).unwrap().kind(), MatrixKind::UpperTriangular);
        assert_eq!(o.mult(&dense3()).unwrap().kind(), MatrixKind::Outer);
        assert_eq!(o.mult(&o).unwrap().kind(), MatrixKind::Outer);
        assert_eq!(l.mult(&l).unwrap().kind(), MatrixKind::LowerTriangular);
        assert_eq!(u.mult(&u).unwrap().kind(), MatrixKind::UpperTriangular);
        assert_eq!(y.mult(&y).unwrap().kind(), MatrixKind::Dense);
        assert_eq!(l.mult(&u).unwrap().kind(), MatrixKind::Dense);
        assert_eq!(y.mult(&l).unwrap().kind(), MatrixKind::Dense);
        assert_eq!(u.mult(&y).unwrap().kind(), MatrixKind::Dense);
        let yl = y.mult(&l).unwrap();
        assert_eq!(yl.to_nested(), vec![vec![3.0, 2.0, 1.0]; 3]);
    }

    #[test]
    fn test_product_dimension_mismatch() {
        let err = Matrix::zeros(2, 3).mult(&Matrix::zeros(2, 3)).unwrap_err();
        assert!(matches!(
            err,
            LinalgError::DimensionMismatch { op: "mult", expected: 3, got: 2 }
        ));
    }

    #[test]
    fn test_matrix_vector_routing() {
        let a = dense3();
        let x = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();

        let ax = product(&a.clone().into(), &x.clone().into())
            .unwrap()
            .into_vector()
            .unwrap();
        let xa = product(&x.clone().into(), &a.clone().into())
            .unwrap()
            .into_vector()
            .unwrap();
        for i in 1..=3 {
            let row: f64 = (1..=3).map(|k| a.get(i, k) * x.get(k)).sum();
            let col: f64 = (1..=3).map(|k| x.get(k) * a.get(k, i)).sum();
            assert_relative_eq!(ax.get(i), row, epsilon = 1e-12);
            assert_relative_eq!(xa.get(i), col, epsilon = 1e-12);
        }
        assert!(product(&x.clone().into(), &x.into()).is_err());
    }

    #[test]
    fn test_structured_matrix_vector() {
        let x = Vector::dense(vec![1.0, -2.0, 3.0]).unwrap();
        let u = Vector::dense(vec![2.0, 0.0, 1.0]).unwrap();
        let matrices = [
            Matrix::permutation(Permutation::from_cycle(&[1, 2, 3]).unwrap(), 3).unwrap(),
            Matrix::identity(3).scale(4.0),
            Matrix::diagonal(vec![1.0, 2.0, 3.0]).unwrap(),
            Matrix::outer(&u, &x),
            Matrix::sparse([(3, 1, 5.0)], 3, 3).unwrap(),
            Matrix::symmetric(3, |i, j| (i + j) as f64),
        ];
        for m in matrices {
            let dense = Matrix::from_array2(&m.to_array2());
            assert!(m.mult_vec(&x).unwrap().equals(&dense.mult_vec(&x).unwrap(), 1e-12));
            assert!(x.mult_matrix(&m).unwrap().equals(&x.mult_matrix(&dense).unwrap(), 1e-12));
        }
    }
}
