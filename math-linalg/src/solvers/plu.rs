//! PLU decomposition solver
//!
//! Doolittle elimination with row pivoting (`PA = LU`) or complete pivoting
//! (`PAQ = LU`). `L` is unit lower triangular and stored implicitly below
//! the diagonal of the eliminated matrix; `U` is the upper triangle.
//! The row permutation maps position `i` of the pivoted system to the
//! original row `rows(i)`, so `(Pb)_i = b_rows(i)`.

use super::triangular::{LowerTriangularSolver, UpperTriangularSolver};
use crate::config::{PivotStrategy, SolverConfig};
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::permutation::Permutation;
use crate::traits::{Solver, SolverKind, is_negligible};
use crate::vector::Vector;
use ndarray::{Array1, Array2};

/// Factorization `PAQ = LU` of a square matrix
#[derive(Debug, Clone)]
pub struct PluSolver {
    n: usize,
    pivoting: PivotStrategy,
    rows: Permutation,
    cols: Permutation,
    lower: LowerTriangularSolver,
    upper: UpperTriangularSolver,
    swaps: usize,
    singular: bool,
}

impl PluSolver {
    pub fn new(matrix: &Matrix, config: &SolverConfig) -> Result<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::NotSquare {
                nrow: matrix.nrow(),
                ncol: matrix.ncol(),
            });
        }
        let n = matrix.nrow();
        let mut lu = matrix.to_array2();
        let threshold = config.tolerance * lu.iter().fold(0.0_f64, |m, v| m.max(v.abs()));

        let mut rows = Permutation::identity();
        let mut cols = Permutation::identity();
        let mut swaps = 0;
        let mut singular = false;

        for k in 0..n {
            let (pivot_row, pivot_col) = find_pivot(&lu, k, config.pivoting);

            if pivot_row != k {
                swap_rows(&mut lu, k, pivot_row);
                rows = Permutation::transposition(k + 1, pivot_row + 1)?.compose(&rows);
                swaps += 1;
            }
            if pivot_col != k {
                swap_cols(&mut lu, k, pivot_col);
                cols = Permutation::transposition(k + 1, pivot_col + 1)?.compose(&cols);
                swaps += 1;
            }

            let pivot = lu[[k, k]];
            if is_negligible(pivot, threshold) {
                singular = true;
                continue;
            }

            // Store multipliers in the L part and update the trailing block
            for i in (k + 1)..n {
                let mult = lu[[i, k]] / pivot;
                lu[[i, k]] = mult;
                for j in (k + 1)..n {
                    let update = mult * lu[[k, j]];
                    lu[[i, j]] -= update;
                }
            }
        }

        if singular {
            log::warn!("PLU: {n}x{n} matrix is singular within tolerance {threshold:e}");
        } else {
            log::debug!("PLU: factorized {n}x{n} matrix with {swaps} exchanges ({:?})", config.pivoting);
        }

        let l = Matrix::lower_triangular(n, |i, j| if i == j { 1.0 } else { lu[[i - 1, j - 1]] });
        let u = Matrix::upper_triangular(n, |i, j| lu[[i - 1, j - 1]]);
        let lower = LowerTriangularSolver::unit(&l)?;
        let upper = UpperTriangularSolver::with_threshold(&u, threshold)?;

        Ok(Self {
            n,
            pivoting: config.pivoting,
            rows,
            cols,
            lower,
            upper,
            swaps,
            singular,
        })
    }

    /// Unit lower-triangular factor `L`
    pub fn lower(&self) -> &Matrix {
        self.lower.matrix()
    }

    /// Upper-triangular factor `U`
    pub fn upper(&self) -> &Matrix {
        self.upper.matrix()
    }

    /// Row order of the pivoted system
    pub fn row_permutation(&self) -> &Permutation {
        &self.rows
    }

    /// Column order of the pivoted system; the identity under partial pivoting
    pub fn col_permutation(&self) -> &Permutation {
        &self.cols
    }

    pub fn pivoting(&self) -> PivotStrategy {
        self.pivoting
    }
}

/// Pivot position for elimination step `k` (0-based)
fn find_pivot(lu: &Array2<f64>, k: usize, strategy: PivotStrategy) -> (usize, usize) {
    let n = lu.nrows();
    let mut best = (k, k);
    let mut max_val = lu[[k, k]].abs();
    let col_range = match strategy {
        PivotStrategy::Partial => k..k + 1,
        PivotStrategy::Complete => k..n,
    };
    for j in col_range {
        for i in k..n {
            let val = lu[[i, j]].abs();
            if val > max_val {
                max_val = val;
                best = (i, j);
            }
        }
    }
    best
}

fn swap_rows(a: &mut Array2<f64>, r1: usize, r2: usize) {
    for j in 0..a.ncols() {
        a.swap([r1, j], [r2, j]);
    }
}

fn swap_cols(a: &mut Array2<f64>, c1: usize, c2: usize) {
    for i in 0..a.nrows() {
        a.swap([i, c1], [i, c2]);
    }
}

impl Solver for PluSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Plu
    }

    fn dim(&self) -> usize {
        self.n
    }

    fn is_singular(&self) -> bool {
        self.singular
    }

    fn solve(&self, b: &Vector) -> Result<Vector> {
        if self.singular {
            return Err(LinalgError::Singular { solver: "plu" });
        }
        if b.len() != self.n {
            return Err(LinalgError::mismatch("solve", self.n, b.len()));
        }
        let pb = Vector::from_array1((1..=self.n).map(|i| b.get(self.rows.get(i))).collect());
        let y = self.lower.solve(&pb)?;
        let z = self.upper.solve(&y)?;

        let mut x = Array1::<f64>::zeros(self.n);
        for j in 1..=self.n {
            x[self.cols.get(j) - 1] = z.get(j);
        }
        Ok(Vector::from_array1(x))
    }

    fn determinant(&self) -> f64 {
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.upper.determinant()
    }
}
