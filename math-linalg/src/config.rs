//! Solver configuration
//!
//! `SolverConfig` controls the singularity tolerance, the pivoting strategy
//! used by the PLU decomposition and whether symmetric matrices try a
//! Cholesky factorization first. It can be built in code or loaded from JSON.

use crate::error::{LinalgError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Row/column pivoting used by the PLU decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotStrategy {
    /// Row exchanges only (`PA = LU`)
    #[default]
    Partial,
    /// Row and column exchanges (`PAQ = LU`)
    Complete,
}

/// Direct solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance below which a pivot or diagonal entry counts as zero.
    /// Scaled by the largest absolute entry of the coefficient matrix.
    pub tolerance: f64,
    /// Pivoting strategy for the PLU decomposition
    pub pivoting: PivotStrategy,
    /// Try Cholesky before PLU for symmetric matrices
    pub try_cholesky: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            pivoting: PivotStrategy::Partial,
            try_cholesky: true,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SolverConfig =
            serde_json::from_str(json).map_err(|e| LinalgError::Config {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| LinalgError::Config {
            reason: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_json(&content)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LinalgError::Config {
            reason: e.to_string(),
        })
    }

    /// Check that the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(LinalgError::Config {
                reason: format!("tolerance must be finite and >= 0, got {}", self.tolerance),
            });
        }
        Ok(())
    }

    /// Builder-style setter for the pivoting strategy.
    pub fn with_pivoting(mut self, pivoting: PivotStrategy) -> Self {
        self.pivoting = pivoting;
        self
    }

    /// Builder-style setter for the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
