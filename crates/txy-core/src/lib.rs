//! txy-core: shared foundation for the T-x-y workspace.
//!
//! Contains:
//! - units (uom SI types, constructors and label symbols)
//! - numeric (Real, tolerances, float helpers, linspace)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TxyError, TxyResult};
pub use numeric::*;
pub use units::*;
