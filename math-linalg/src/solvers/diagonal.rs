//! Diagonal solver: `x_i = b_i / d_i`

use crate::config::SolverConfig;
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::traits::{Solver, SolverKind, is_negligible};
use crate::vector::Vector;

/// Solver for diagonal and constant-diagonal matrices. Only the main
/// diagonal of the coefficient matrix is read.
#[derive(Debug, Clone)]
pub struct DiagonalSolver {
    diag: Vector,
    singular: bool,
}

impl DiagonalSolver {
    pub fn new(matrix: &Matrix, config: &SolverConfig) -> Result<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::NotSquare {
                nrow: matrix.nrow(),
                ncol: matrix.ncol(),
            });
        }
        let diag = matrix.diag_view().deep_clone(false);
        let threshold = config.tolerance * matrix.max_abs();
        let singular = diag.to_vec().iter().any(|&d| is_negligible(d, threshold));
        if singular {
            log::warn!("diagonal solver: zero on the diagonal of a {0}x{0} matrix", diag.len());
        }
        Ok(Self { diag, singular })
    }
}

impl Solver for DiagonalSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Diagonal
    }

    fn dim(&self) -> usize {
        self.diag.len()
    }

    fn is_singular(&self) -> bool {
        self.singular
    }

    fn solve(&self, b: &Vector) -> Result<Vector> {
        if self.singular {
            return Err(LinalgError::Singular { solver: "diagonal" });
        }
        if b.len() != self.dim() {
            return Err(LinalgError::mismatch("solve", self.dim(), b.len()));
        }
        b.p_div(&self.diag)
    }

    fn determinant(&self) -> f64 {
        self.diag.to_vec().iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_solve() {
        let m = Matrix::diagonal(vec![2.0, -4.0, 0.5]).unwrap();
        let solver = DiagonalSolver::new(&m, &SolverConfig::default()).unwrap();
        let x = solver.solve(&Vector::dense(vec![1.0, 2.0, 3.0]).unwrap()).unwrap();
        assert_eq!(x.to_vec(), vec![0.5, -0.5, 6.0]);
        assert_relative_eq!(solver.determinant(), -4.0);
    }

    #[test]
    fn test_const_diagonal() {
        let m = Matrix::const_diagonal(4.0, 2);
        let solver = DiagonalSolver::new(&m, &SolverConfig::default()).unwrap();
        let x = solver.solve(&Vector::constant(2.0, 2)).unwrap();
        assert_eq!(x.to_vec(), vec![0.5, 0.5]);
        assert_relative_eq!(solver.determinant(), 16.0);
    }

    #[test]
    fn test_zero_on_diagonal() {
        let m = Matrix::diagonal(vec![1.0, 0.0]).unwrap();
        let solver = DiagonalSolver::new(&m, &SolverConfig::default()).unwrap();
        assert!(solver.is_singular());
        let err = solver.solve(&Vector::zeros(2)).unwrap_err();
        assert_eq!(err, LinalgError::Singular { solver: "diagonal" });
    }

    #[test]
    fn test_rhs_length() {
        let m = Matrix::identity(3);
        let solver = DiagonalSolver::new(&m, &SolverConfig::default()).unwrap();
        assert!(solver.solve(&Vector::zeros(2)).unwrap_err().is_dimension_error());
    }
}
