//! Thermodynamic model errors.

use thiserror::Error;
use txy_core::TxyError;

/// Result type for model operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised by mixture models.
///
/// All of these are structural: they describe a malformed model or request,
/// never a numerical non-convergence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Component identifier not present in the model's component list.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// Non-physical values (negative fraction, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the valid range of a correlation.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A state variable was left unfixed before initialization or solve.
    #[error("State variable not fixed: {what}")]
    Unfixed { what: String },

    #[error(transparent)]
    Core(#[from] TxyError),
}
