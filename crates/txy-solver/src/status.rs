//! Structured solve outcome.

use std::fmt;

/// Overall state of the solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Ok,
    Warning,
    Error,
    Aborted,
}

/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCondition {
    Optimal,
    MaxIterations,
    Infeasible,
    NumericalFailure,
}

/// Result of one `solve` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStatus {
    pub solver_status: SolverStatus,
    pub termination_condition: TerminationCondition,
    pub iterations: usize,
    pub residual_norm: f64,
}

impl SolveStatus {
    pub fn new(
        solver_status: SolverStatus,
        termination_condition: TerminationCondition,
        iterations: usize,
        residual_norm: f64,
    ) -> Self {
        Self {
            solver_status,
            termination_condition,
            iterations,
            residual_norm,
        }
    }

    /// Only `(Ok, Optimal)` counts as a usable solution.
    pub fn is_optimal(&self) -> bool {
        self.solver_status == SolverStatus::Ok
            && self.termination_condition == TerminationCondition::Optimal
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

impl fmt::Display for TerminationCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::MaxIterations => write!(f, "maxIterations"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::NumericalFailure => write!(f, "numericalFailure"),
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} after {} iterations (|r| = {:.3e})",
            self.solver_status, self.termination_condition, self.iterations, self.residual_norm
        )
    }
}
