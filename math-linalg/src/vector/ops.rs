//! Pointwise and scalar vector arithmetic
//!
//! Result representations follow the operands: two sparse operands give a
//! sparse result, two constant operands a constant one, and anything else
//! a dense vector.

use super::{Vector, VectorKind, VectorRepr};
use crate::error::{LinalgError, Result};
use ndarray::Array1;
use std::collections::BTreeMap;

/// Which stored entries of two sparse operands can produce a nonzero
#[derive(Clone, Copy)]
enum SparseSupport {
    Union,
    Intersection,
}

impl Vector {
    fn check_len(&self, op: &'static str, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinalgError::mismatch(op, self.len(), other.len()));
        }
        Ok(())
    }

    fn pointwise<F>(
        &self,
        op: &'static str,
        other: &Vector,
        support: Option<SparseSupport>,
        f: F,
    ) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_len(op, other)?;
        let len = self.len();

        if let (Some(a), Some(b)) = (self.constant_value(), other.constant_value()) {
            return Ok(Vector::constant(f(a, b), len));
        }

        if let Some(support) = support {
            let (lhs, rhs) = (self.sparse_entries(), other.sparse_entries());
            let keys: Option<Vec<usize>> = match (support, &lhs, &rhs) {
                (SparseSupport::Union, Some(a), Some(b)) => {
                    let mut keys: Vec<usize> = a.iter().chain(b.iter()).map(|&(i, _)| i).collect();
                    keys.sort_unstable();
                    keys.dedup();
                    Some(keys)
                }
                (SparseSupport::Intersection, Some(a), _) => Some(a.iter().map(|&(i, _)| i).collect()),
                (SparseSupport::Intersection, None, Some(b)) => {
                    Some(b.iter().map(|&(i, _)| i).collect())
                }
                _ => None,
            };
            if let Some(keys) = keys {
                let map: BTreeMap<usize, f64> = keys
                    .into_iter()
                    .map(|i| (i, f(self.get(i), other.get(i))))
                    .filter(|&(_, v)| v != 0.0)
                    .collect();
                return Ok(Vector::from_repr(len, VectorRepr::Sparse(map)));
            }
        }

        let values = (1..=len)
            .map(|i| f(self.get(i), other.get(i)))
            .collect::<Vec<_>>();
        Ok(Vector::from_array1(Array1::from_vec(values)))
    }

    /// Pointwise sum
    pub fn p_add(&self, other: &Vector) -> Result<Vector> {
        self.pointwise("p_add", other, Some(SparseSupport::Union), |a, b| a + b)
    }

    /// Pointwise difference
    pub fn p_sub(&self, other: &Vector) -> Result<Vector> {
        self.pointwise("p_sub", other, Some(SparseSupport::Union), |a, b| a - b)
    }

    /// Pointwise (Hadamard) product. Sparse if either operand is sparse.
    pub fn p_mult(&self, other: &Vector) -> Result<Vector> {
        self.pointwise("p_mult", other, Some(SparseSupport::Intersection), |a, b| {
            a * b
        })
    }

    /// Pointwise quotient. Division by zero follows IEEE rules.
    pub fn p_div(&self, other: &Vector) -> Result<Vector> {
        self.pointwise("p_div", other, None, |a, b| a / b)
    }

    /// Scalar multiple, keeping the representation. Tabular vectors stay
    /// lazy by wrapping a snapshot of their function and cache, so later
    /// writes to `self` do not reach the result. Views are materialized.
    pub fn s_mult(&self, k: f64) -> Vector {
        let len = self.len();
        match self.kind() {
            VectorKind::Constant => Vector::constant(k * self.get(1), len),
            VectorKind::Sparse => self.map(true, |_, v| k * v),
            VectorKind::Tabular => {
                let source = self.deep_clone(true);
                Vector::tabular(len, move |i| k * source.get(i))
            }
            VectorKind::Dense | VectorKind::View => self.map(false, |_, v| k * v),
        }
    }

    /// Dot product. Sparse operands only visit their stored entries.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len("dot", other)?;
        let (driver, partner) = if other.kind() == VectorKind::Sparse {
            (other, self)
        } else {
            (self, other)
        };
        Ok(driver.reduce(true, 0.0, |acc, i, v| acc + v * partner.get(i)))
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.reduce(true, 0.0, |acc, _, v| acc + v * v).sqrt()
    }

    /// Sum of the entries
    pub fn sum(&self) -> f64 {
        if let Some(value) = self.constant_value() {
            return value * self.len() as f64;
        }
        self.reduce(true, 0.0, |acc, _, v| acc + v)
    }

    /// Consecutive differences `v[i + 1] - v[i]`. Empty and single-entry
    /// vectors give an empty result.
    pub fn diff(&self) -> Vector {
        let len = self.len().saturating_sub(1);
        let values = (1..=len)
            .map(|i| self.get(i + 1) - self.get(i))
            .collect::<Vec<_>>();
        Vector::from_array1(Array1::from_vec(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sparse_sum_stays_sparse() {
        let a = Vector::sparse([(1, 1.0), (3, 2.0)], 4).unwrap();
        let b = Vector::sparse([(3, -2.0), (4, 5.0)], 4).unwrap();
        let sum = a.p_add(&b).unwrap();
        assert_eq!(sum.kind(), VectorKind::Sparse);
        assert_eq!(sum.to_vec(), vec![1.0, 0.0, 0.0, 5.0]);
        // cancelled entry is not stored
        assert_eq!(sum.nnz(), 2);
    }

    #[test]
    fn test_mixed_sum_is_dense() {
        let a = Vector::sparse([(2, 1.0)], 3).unwrap();
        let b = Vector::dense(vec![1.0, 1.0, 1.0]).unwrap();
        let sum = a.p_add(&b).unwrap();
        assert_eq!(sum.kind(), VectorKind::Dense);
        assert_eq!(sum.to_vec(), vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sparse_product_uses_intersection() {
        let a = Vector::sparse([(2, 3.0)], 3).unwrap();
        let b = Vector::dense(vec![4.0, 5.0, 6.0]).unwrap();
        let product = b.p_mult(&a).unwrap();
        assert_eq!(product.kind(), VectorKind::Sparse);
        assert_eq!(product.to_vec(), vec![0.0, 15.0, 0.0]);
    }

    #[test]
    fn test_constant_ops() {
        let a = Vector::constant(2.0, 3);
        let b = Vector::constant(4.0, 3);
        let q = a.p_div(&b).unwrap();
        assert_eq!(q.kind(), VectorKind::Constant);
        assert_relative_eq!(q.get(2), 0.5);
        assert_eq!(a.s_mult(3.0).kind(), VectorKind::Constant);
        assert_relative_eq!(a.sum(), 6.0);
    }

    #[test]
    fn test_length_mismatch() {
        let a = Vector::dense(vec![1.0, 2.0]).unwrap();
        let b = Vector::dense(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(a.p_sub(&b).unwrap_err().is_dimension_error());
        assert!(a.dot(&b).is_err());
    }

    #[test]
    fn test_s_mult_preserves_kind() {
        let tabular = Vector::tabular(3, |i| i as f64);
        let scaled = tabular.s_mult(2.0);
        assert_eq!(scaled.kind(), VectorKind::Tabular);
        assert_eq!(scaled.to_vec(), vec![2.0, 4.0, 6.0]);

        let sparse = Vector::sparse([(3, 1.0)], 3).unwrap();
        assert_eq!(sparse.s_mult(-1.0).kind(), VectorKind::Sparse);
    }

    #[test]
    fn test_s_mult_tabular_ignores_later_writes() {
        let source = Vector::tabular(3, |i| i as f64).with_mutable(true).unwrap();
        source.set(1, 10.0).unwrap();
        let scaled = source.s_mult(2.0);
        source.set(2, -1.0).unwrap();
        assert_eq!(scaled.kind(), VectorKind::Tabular);
        assert_eq!(scaled.to_vec(), vec![20.0, 4.0, 6.0]);
    }

    #[test]
    fn test_dot_and_norm() {
        let a = Vector::dense(vec![3.0, 4.0]).unwrap();
        let b = Vector::sparse([(2, 2.0)], 2).unwrap();
        assert_relative_eq!(a.norm(), 5.0);
        assert_relative_eq!(a.dot(&b).unwrap(), 8.0);
        assert_relative_eq!(b.dot(&a).unwrap(), 8.0);
    }

    #[test]
    fn test_diff_edge_cases() {
        assert_eq!(Vector::zeros(0).diff().len(), 0);
        assert_eq!(Vector::dense(vec![1.0]).unwrap().diff().len(), 0);
        let v = Vector::dense(vec![1.0, 4.0, 9.0]).unwrap();
        assert_eq!(v.diff().to_vec(), vec![3.0, 5.0]);
    }
}
