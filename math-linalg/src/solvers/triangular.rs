//! Forward and back substitution
//!
//! Both solvers keep their own copy of the coefficient matrix, so a solver
//! cached on that matrix never keeps it alive. The lower solver only looks
//! at `i >= j`, the upper solver at `i <= j`.

use crate::config::SolverConfig;
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::traits::{Solver, SolverKind, is_negligible};
use crate::vector::Vector;
use ndarray::Array1;

fn check_square(matrix: &Matrix) -> Result<()> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(LinalgError::NotSquare {
            nrow: matrix.nrow(),
            ncol: matrix.ncol(),
        })
    }
}

fn any_negligible_pivot(matrix: &Matrix, threshold: f64) -> bool {
    (1..=matrix.nrow()).any(|k| is_negligible(matrix.get(k, k), threshold))
}

/// Forward substitution for `L x = b`
#[derive(Debug, Clone)]
pub struct LowerTriangularSolver {
    matrix: Matrix,
    unit_diagonal: bool,
    singular: bool,
}

impl LowerTriangularSolver {
    pub fn new(matrix: &Matrix, config: &SolverConfig) -> Result<Self> {
        Self::with_threshold(matrix, config.tolerance * matrix.max_abs())
    }

    /// Solver that treats the diagonal as all ones without reading it, as
    /// for the `L` factor of a PLU decomposition.
    pub fn unit(matrix: &Matrix) -> Result<Self> {
        check_square(matrix)?;
        Ok(Self {
            matrix: matrix.deep_clone(true),
            unit_diagonal: true,
            singular: false,
        })
    }

    /// Solver whose pivots count as zero at or below the absolute `threshold`
    pub(crate) fn with_threshold(matrix: &Matrix, threshold: f64) -> Result<Self> {
        check_square(matrix)?;
        let singular = any_negligible_pivot(matrix, threshold);
        if singular {
            log::warn!("lower triangular solver: negligible diagonal entry");
        }
        Ok(Self {
            matrix: matrix.deep_clone(true),
            unit_diagonal: false,
            singular,
        })
    }

    pub fn has_unit_diagonal(&self) -> bool {
        self.unit_diagonal
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

impl Solver for LowerTriangularSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::LowerTriangular
    }

    fn dim(&self) -> usize {
        self.matrix.nrow()
    }

    fn is_singular(&self) -> bool {
        self.singular
    }

    fn solve(&self, b: &Vector) -> Result<Vector> {
        if self.singular {
            return Err(LinalgError::Singular {
                solver: "lower triangular",
            });
        }
        let n = self.dim();
        if b.len() != n {
            return Err(LinalgError::mismatch("solve", n, b.len()));
        }
        let a = &self.matrix;
        let mut x = Array1::<f64>::zeros(n);
        for i in 1..=n {
            let mut sum = b.get(i);
            for j in 1..i {
                sum -= a.get(i, j) * x[j - 1];
            }
            x[i - 1] = if self.unit_diagonal {
                sum
            } else {
                sum / a.get(i, i)
            };
        }
        Ok(Vector::from_array1(x))
    }

    fn determinant(&self) -> f64 {
        if self.unit_diagonal {
            return 1.0;
        }
        (1..=self.dim()).map(|k| self.matrix.get(k, k)).product()
    }
}

/// Back substitution for `U x = b`
#[derive(Debug, Clone)]
pub struct UpperTriangularSolver {
    matrix: Matrix,
    singular: bool,
}

impl UpperTriangularSolver {
    pub fn new(matrix: &Matrix, config: &SolverConfig) -> Result<Self> {
        Self::with_threshold(matrix, config.tolerance * matrix.max_abs())
    }

    pub(crate) fn with_threshold(matrix: &Matrix, threshold: f64) -> Result<Self> {
        check_square(matrix)?;
        let singular = any_negligible_pivot(matrix, threshold);
        if singular {
            log::warn!("upper triangular solver: negligible or NaN diagonal entry");
        }
        Ok(Self {
            matrix: matrix.deep_clone(true),
            singular,
        })
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

impl Solver for UpperTriangularSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::UpperTriangular
    }

    fn dim(&self) -> usize {
        self.matrix.nrow()
    }

    fn is_singular(&self) -> bool {
        self.singular
    }

    fn solve(&self, b: &Vector) -> Result<Vector> {
        if self.singular {
            return Err(LinalgError::Singular {
                solver: "upper triangular",
            });
        }
        let n = self.dim();
        if b.len() != n {
            return Err(LinalgError::mismatch("solve", n, b.len()));
        }
        let a = &self.matrix;
        let mut x = Array1::<f64>::zeros(n);
        for i in (1..=n).rev() {
            let mut sum = b.get(i);
            for j in (i + 1)..=n {
                sum -= a.get(i, j) * x[j - 1];
            }
            x[i - 1] = sum / a.get(i, i);
        }
        Ok(Vector::from_array1(x))
    }

    fn determinant(&self) -> f64 {
        (1..=self.dim()).map(|k| self.matrix.get(k, k)).product()
    }
}
