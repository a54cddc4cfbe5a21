//! Error types for sweeps, containers and diagrams.

use thiserror::Error;
use txy_solver::SolverError;
use txy_thermo::ThermoError;

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Inconsistent T-x-y data: {what}")]
    Inconsistent { what: String },

    #[error("Model error: {0}")]
    Thermo(#[from] ThermoError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Plot error: {message}")]
    Plot { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type DiagramResult<T> = Result<T, DiagramError>;
