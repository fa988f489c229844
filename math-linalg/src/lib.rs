//! Structured vectors and matrices with structure-aware direct solvers
//!
//! This crate provides one-indexed [`Vector`] and [`Matrix`] handles whose
//! storage can be dense, sparse, lazily computed or an aliasing view of
//! another object, plus a family of structured matrix representations.
//! Arithmetic keeps results in the narrowest representation that holds them
//! exactly, and solving a system picks the cheapest direct method the
//! matrix structure allows.
//!
//! # Features
//!
//! - **Vectors**: dense, sparse, tabular (memoized `f(i)`), constant, views
//! - **Matrices**: dense (row/column-major), sparse, tabular, views,
//!   diagonal, constant-diagonal, lower/upper triangular, symmetric,
//!   permutation and outer-product
//! - **Dispatch**: structure-preserving sums, scalar multiples and products
//! - **Direct Solvers**: diagonal, forward/back substitution, PLU with
//!   partial or complete pivoting, Cholesky
//! - **ndarray interop**: conversions and [`LinearOperator`]
//!
//! # Example
//!
//! ```
//! use math_audio_linalg::{Matrix, StorageOrder, Vector};
//!
//! let a = Matrix::from_nested(
//!     &[vec![4.0, 6.0, 7.0], vec![2.0, 1.0, 3.0], vec![5.0, 7.53, 9.95]],
//!     StorageOrder::ColumnMajor,
//! )?;
//! let b = Vector::dense(vec![1.0, 2.0, 3.0])?;
//! let x = a.solve(&b)?;
//! assert!(a.mult_vec(&x)?.equals(&b, 1e-6));
//! # Ok::<(), math_audio_linalg::LinalgError>(())
//! ```
//!
//! Handles are reference counted and not thread safe. Cloning a handle
//! shares the underlying storage; use `deep_clone` for an independent copy.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod permutation;
pub mod solvers;
pub mod traits;
pub mod vector;

// Re-export main types
pub use config::{PivotStrategy, SolverConfig};
pub use dispatch::{Operand, common_ancestor, product};
pub use error::{LinalgError, Result};
pub use matrix::{Matrix, MatrixKind, StorageOrder};
pub use permutation::Permutation;
pub use traits::{LinearOperator, Solver, SolverKind};
pub use vector::{Vector, VectorKind};

// Re-export solvers
pub use solvers::{
    CholeskySolver, DiagonalSolver, LowerTriangularSolver, PluSolver, UpperTriangularSolver,
    select_solver,
};
