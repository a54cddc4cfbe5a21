//! Error types for solver operations.

use thiserror::Error;
use txy_thermo::ThermoError;

/// Hard solver failures. Non-convergence is reported through
/// [`SolveStatus`](crate::SolveStatus) instead.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Model error: {0}")]
    Model(#[from] ThermoError),
}

pub type SolverResult<T> = Result<T, SolverError>;
