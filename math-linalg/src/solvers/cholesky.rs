//! Cholesky decomposition `A = G Gᵗ` for symmetric positive-definite matrices
//!
//! Only the lower triangle of the coefficient matrix is read. A radicand at
//! or below tolerance stops the factorization and marks the solver as not
//! positive definite; [`Solver::is_singular`] reports it and `solve` fails.

use super::triangular::{LowerTriangularSolver, UpperTriangularSolver};
use crate::config::SolverConfig;
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::traits::{Solver, SolverKind, is_negligible};
use crate::vector::Vector;

#[derive(Debug, Clone)]
pub struct CholeskySolver {
    n: usize,
    factor: Matrix,
    lower: LowerTriangularSolver,
    upper: UpperTriangularSolver,
    positive_definite: bool,
}

impl CholeskySolver {
    pub fn new(matrix: &Matrix, config: &SolverConfig) -> Result<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::NotSquare {
                nrow: matrix.nrow(),
                ncol: matrix.ncol(),
            });
        }
        let n = matrix.nrow();
        let mut g = matrix.to_array2();
        let threshold = config.tolerance * matrix.max_abs();
        let mut positive_definite = true;

        for j in 0..n {
            for k in 0..j {
                for i in j..n {
                    let update = g[[j, k]] * g[[i, k]];
                    g[[i, j]] -= update;
                }
            }
            let radicand = g[[j, j]];
            if radicand < 0.0 || is_negligible(radicand, threshold) {
                log::warn!("Cholesky: radicand {radicand:e} in column {} of a {n}x{n} matrix; not positive definite", j + 1);
                positive_definite = false;
                break;
            }
            let root = radicand.sqrt();
            for i in j..n {
                g[[i, j]] /= root;
            }
        }

        if positive_definite {
            log::debug!("Cholesky: factorized {n}x{n} matrix");
        }

        let factor = Matrix::lower_triangular(n, |i, j| g[[i - 1, j - 1]]);
        let lower = LowerTriangularSolver::with_threshold(&factor, 0.0)?;
        let upper = UpperTriangularSolver::with_threshold(&factor.transpose(), 0.0)?;
        Ok(Self {
            n,
            factor,
            lower,
            upper,
            positive_definite,
        })
    }

    /// Lower-triangular factor `G`. Columns past the failing one are
    /// meaningless when the matrix is not positive definite.
    pub fn factor(&self) -> &Matrix {
        &self.factor
    }

    pub fn is_positive_definite(&self) -> bool {
        self.positive_definite
    }
}

impl Solver for CholeskySolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Cholesky
    }

    fn dim(&self) -> usize {
        self.n
    }

    fn is_singular(&self) -> bool {
        !self.positive_definite
    }

    fn solve(&self, b: &Vector) -> Result<Vector> {
        if !self.positive_definite {
            return Err(LinalgError::Singular { solver: "cholesky" });
        }
        if b.len() != self.n {
            return Err(LinalgError::mismatch("solve", self.n, b.len()));
        }
        let y = self.lower.solve(b)?;
        self.upper.solve(&y)
    }

    /// `det(A) = det(G)²`; NaN when the matrix is not positive definite.
    fn determinant(&self) -> f64 {
        if !self.positive_definite {
            return f64::NAN;
        }
        let det_g = self.lower.determinant();
        det_g * det_g
    }
}
