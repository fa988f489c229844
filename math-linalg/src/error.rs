//! Error types for vector, matrix and solver operations.
//!
//! Every variant describes a programmer or input error reported by the call
//! that triggered it. Out-of-range reads never produce an error: they read
//! as zero.

use thiserror::Error;

/// Errors that can occur while building, mutating, combining or solving
/// vectors and matrices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    /// Construction inputs are inconsistent (empty data, ragged rows,
    /// declared dimensions that do not match the data).
    #[error("invalid construction: {reason}")]
    Construction {
        /// What was wrong with the inputs
        reason: String,
    },

    /// Operands of a pointwise operation, product or solve do not line up.
    #[error("dimension mismatch in {op}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Operation that detected the mismatch
        op: &'static str,
        /// Expected length / row count
        expected: usize,
        /// Length / row count actually provided
        got: usize,
    },

    /// Write attempted on an immutable vector or matrix, or an attempt to
    /// make a never-mutable representation mutable.
    #[error("cannot modify immutable {what}")]
    Immutable {
        /// Kind of object that refused the write
        what: &'static str,
    },

    /// Nonzero write outside the support of a structured matrix.
    #[error("cell ({row}, {col}) is outside the support of a {structure} matrix")]
    OutOfStructure {
        /// Row index (1-based)
        row: usize,
        /// Column index (1-based)
        col: usize,
        /// Name of the structured representation
        structure: &'static str,
    },

    /// Write index outside `[1, len]` or `[1, nrow] x [1, ncol]`.
    #[error("index {index} out of bounds for extent {extent}")]
    OutOfBounds {
        /// Offending index (1-based)
        index: usize,
        /// Valid extent along that axis
        extent: usize,
    },

    /// Operation requires a square matrix.
    #[error("matrix must be square, got {nrow}x{ncol}")]
    NotSquare {
        /// Number of rows
        nrow: usize,
        /// Number of columns
        ncol: usize,
    },

    /// The coefficient matrix is singular (or not positive definite for
    /// Cholesky) within the solver tolerance.
    #[error("matrix is singular or nearly singular ({solver} solver)")]
    Singular {
        /// Solver that detected the singularity
        solver: &'static str,
    },

    /// Permutation input is not a bijection on `{1, 2, ...}`.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation {
        /// Why the input was rejected
        reason: String,
    },

    /// The operation is not defined for the given operands.
    #[error("invalid operation: {reason}")]
    InvalidOperation {
        /// Description of the unsupported combination
        reason: String,
    },

    /// Solver configuration could not be parsed or is out of range.
    #[error("invalid solver configuration: {reason}")]
    Config {
        /// Parse or validation failure
        reason: String,
    },
}

/// A specialized `Result` type for linear-algebra operations.
pub type Result<T> = std::result::Result<T, LinalgError>;

impl LinalgError {
    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        LinalgError::Construction {
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(op: &'static str, expected: usize, got: usize) -> Self {
        LinalgError::DimensionMismatch { op, expected, got }
    }

    /// Returns `true` if this error was caused by incompatible shapes.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            LinalgError::DimensionMismatch { .. } | LinalgError::NotSquare { .. }
        )
    }

    /// Returns `true` if this error was raised by a rejected write.
    ///
    /// This includes `Immutable`, `OutOfStructure` and `OutOfBounds`.
    pub fn is_mutation_error(&self) -> bool {
        matches!(
            self,
            LinalgError::Immutable { .. }
                | LinalgError::OutOfStructure { .. }
                | LinalgError::OutOfBounds { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LinalgError::mismatch("dot", 3, 4);
        assert_eq!(
            err.to_string(),
            "dimension mismatch in dot: expected 3, got 4"
        );
    }

    #[test]
    fn test_structure_error_display() {
        let err = LinalgError::OutOfStructure {
            row: 1,
            col: 2,
            structure: "diagonal",
        };
        assert!(err.to_string().contains("(1, 2)"));
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn test_error_categories() {
        let immutable = LinalgError::Immutable { what: "vector" };
        let square = LinalgError::NotSquare { nrow: 2, ncol: 3 };

        assert!(immutable.is_mutation_error());
        assert!(!immutable.is_dimension_error());
        assert!(square.is_dimension_error());
        assert!(!square.is_mutation_error());
    }
}
