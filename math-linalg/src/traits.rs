//! Core traits
//!
//! - [`LinearOperator`]: matrix-like objects that apply to ndarray vectors
//! - [`Solver`]: a direct solver bound to one coefficient matrix

use crate::error::{LinalgError, Result};
use crate::matrix::{Matrix, StorageOrder};
use crate::vector::Vector;
use ndarray::Array1;

/// Kind of direct solver selected for a coefficient matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Diagonal,
    LowerTriangular,
    UpperTriangular,
    Plu,
    Cholesky,
}

/// Linear operators that can perform matrix-vector products on ndarray data.
///
/// Lets code written against plain `Array1<f64>` use any [`Matrix`]
/// representation without converting it to a dense `Array2` first.
pub trait LinearOperator {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Array1<f64>) -> Result<Array1<f64>>;

    /// Apply the transpose: y = A^T * x
    fn apply_transpose(&self, x: &Array1<f64>) -> Result<Array1<f64>>;

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

impl LinearOperator for Matrix {
    fn num_rows(&self) -> usize {
        self.nrow()
    }

    fn num_cols(&self) -> usize {
        self.ncol()
    }

    fn apply(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        let x = Vector::from_array1(x.clone());
        Ok(self.mult_vec(&x)?.to_array1())
    }

    fn apply_transpose(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        let x = Vector::from_array1(x.clone());
        Ok(x.mult_matrix(self)?.to_array1())
    }
}

/// A direct solver bound to one coefficient matrix.
///
/// Solvers are built once per matrix and never change afterwards;
/// [`Matrix::get_solver`] caches them.
pub trait Solver {
    /// Which algorithm this solver runs
    fn kind(&self) -> SolverKind;

    /// Order of the (square) coefficient matrix
    fn dim(&self) -> usize;

    /// Whether the coefficient matrix was found singular (or, for Cholesky,
    /// not positive definite) within tolerance
    fn is_singular(&self) -> bool;

    /// Solve `A x = b`
    fn solve(&self, b: &Vector) -> Result<Vector>;

    /// Determinant of the coefficient matrix from its factorization
    fn determinant(&self) -> f64;

    /// Solve `A X = B` column by column
    fn solve_matrix(&self, b: &Matrix) -> Result<Matrix> {
        if b.nrow() != self.dim() {
            return Err(LinalgError::mismatch("solve_matrix", self.dim(), b.nrow()));
        }
        let columns = (1..=b.ncol())
            .map(|j| self.solve(&b.col_view(j)).map(|x| x.to_vec()))
            .collect::<Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Ok(Matrix::zeros(self.dim(), 0));
        }
        Matrix::from_nested(&columns, StorageOrder::ColumnMajor)
    }
}

/// `true` if `value` is NaN or within `tolerance` of zero
pub(crate) fn is_negligible(value: f64, tolerance: f64) -> bool {
    value.is_nan() || value.abs() <= tolerance
}
