//! Nonlinear solvers for mixture state blocks.
//!
//! A solver drives a model's [`EquationSystem`](txy_thermo::EquationSystem)
//! to a root and reports a structured [`SolveStatus`]. Non-convergence is a
//! status, not an error; `Err` is reserved for malformed problems.

pub mod config;
pub mod error;
pub mod jacobian;
pub mod newton;
pub mod solve;
pub mod status;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonOutcome, NewtonResult};
pub use solve::{NewtonSolver, Solver};
pub use status::{SolveStatus, SolverStatus, TerminationCondition};
