//! User-facing solver options.

use crate::error::{SolverError, SolverResult};
use serde::{Deserialize, Serialize};

/// Solver options recognized by every solver in this crate.
///
/// Only `tolerance` is user-configurable; iteration caps and line-search
/// factors are derived from it (see [`NewtonConfig`](crate::NewtonConfig)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Convergence tolerance on the residual norm.
    pub tolerance: f64,
}

impl SolverConfig {
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "tolerance must be positive and finite",
            });
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}
