//! Direct solvers and solver selection
//!
//! - [`DiagonalSolver`]: elementwise division
//! - [`LowerTriangularSolver`] / [`UpperTriangularSolver`]: substitution
//! - [`PluSolver`]: Doolittle PLU with partial or complete pivoting
//! - [`CholeskySolver`]: `G Gᵗ` factorization for symmetric positive-definite matrices
//!
//! [`select_solver`] picks the most specific solver for a matrix:
//! diagonal and constant-diagonal matrices divide, triangular matrices
//! substitute, symmetric matrices try Cholesky and fall back to PLU, and
//! everything else goes through PLU.

mod cholesky;
mod diagonal;
mod plu;
mod triangular;

pub use cholesky::CholeskySolver;
pub use diagonal::DiagonalSolver;
pub use plu::PluSolver;
pub use triangular::{LowerTriangularSolver, UpperTriangularSolver};

use crate::config::SolverConfig;
use crate::error::{LinalgError, Result};
use crate::matrix::{Matrix, MatrixKind};
use crate::traits::Solver;
use crate::vector::Vector;
use std::rc::Rc;

/// Build the most specific solver for `matrix`.
pub fn select_solver(matrix: &Matrix, config: &SolverConfig) -> Result<Rc<dyn Solver>> {
    config.validate()?;
    if !matrix.is_square() {
        return Err(LinalgError::NotSquare {
            nrow: matrix.nrow(),
            ncol: matrix.ncol(),
        });
    }
    let kind = matrix.kind();
    let solver: Rc<dyn Solver> = match kind {
        MatrixKind::Diagonal | MatrixKind::ConstDiagonal => {
            Rc::new(DiagonalSolver::new(matrix, config)?)
        }
        MatrixKind::LowerTriangular => Rc::new(LowerTriangularSolver::new(matrix, config)?),
        MatrixKind::UpperTriangular => Rc::new(UpperTriangularSolver::new(matrix, config)?),
        MatrixKind::Symmetric if config.try_cholesky => {
            let cholesky = CholeskySolver::new(matrix, config)?;
            if cholesky.is_positive_definite() {
                Rc::new(cholesky)
            } else {
                log::debug!("symmetric matrix is not positive definite, falling back to PLU");
                Rc::new(PluSolver::new(matrix, config)?)
            }
        }
        _ => Rc::new(PluSolver::new(matrix, config)?),
    };
    log::debug!(
        "selected {:?} solver for {}x{} {} matrix",
        solver.kind(),
        matrix.nrow(),
        matrix.ncol(),
        kind.name()
    );
    Ok(solver)
}

impl Matrix {
    /// Cached solver, built with the default configuration on first use.
    pub fn get_solver(&self) -> Result<Rc<dyn Solver>> {
        self.get_solver_with(&SolverConfig::default())
    }

    /// Cached solver, built with `config` on first use. Once a solver is
    /// cached it is returned as is and `config` is ignored.
    pub fn get_solver_with(&self, config: &SolverConfig) -> Result<Rc<dyn Solver>> {
        if let Some(solver) = self.cached_solver() {
            return Ok(solver);
        }
        let solver = select_solver(self, config)?;
        self.cache_solver(solver.clone());
        Ok(solver)
    }

    /// Solve `A x = b` with the cached solver.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        self.get_solver()?.solve(b)
    }

    /// Solve `A X = B` column by column with the cached solver.
    pub fn solve_matrix(&self, b: &Matrix) -> Result<Matrix> {
        self.get_solver()?.solve_matrix(b)
    }

    /// `A⁻¹`, as a dense matrix
    pub fn inverse(&self) -> Result<Matrix> {
        let solver = self.get_solver()?;
        solver.solve_matrix(&Matrix::identity(solver.dim()))
    }

    pub fn determinant(&self) -> Result<f64> {
        Ok(self.get_solver()?.determinant())
    }
}
