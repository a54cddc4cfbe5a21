//! txy-thermo: mixture models for phase-equilibrium sweeps.
//!
//! Provides:
//! - Species catalog with Antoine vapor-pressure data
//! - Mole-fraction vectors over a fixed component list
//! - `MixtureModel` / `EquationSystem` traits (the model seam used by solvers
//!   and sweeps)
//! - `IdealMixture`, a Raoult's-law state block
//!
//! # Example
//!
//! ```
//! use txy_thermo::{IdealMixture, MixtureModel, Species};
//! use txy_core::units::{k, pa, temperature_k};
//!
//! let mut model = IdealMixture::new(vec![Species::Benzene, Species::Toluene]).unwrap();
//! model.fix_mole_frac(Species::Benzene, 0.4).unwrap();
//! model.fix_mole_frac(Species::Toluene, 0.6).unwrap();
//! model.fix_flow_mol(1.0).unwrap();
//! model.fix_temperature(k(298.15)).unwrap();
//! model.fix_pressure(pa(101_325.0)).unwrap();
//! model.initialize(1e-6).unwrap();
//!
//! assert!(temperature_k(model.temperature_bubble()) < temperature_k(model.temperature_dew()));
//! ```

pub mod composition;
pub mod error;
pub mod ideal;
pub mod model;
pub mod species;

// Re-exports for ergonomics
pub use composition::{FractionVar, MoleFractions};
pub use error::{ThermoError, ThermoResult};
pub use ideal::IdealMixture;
pub use model::{EquationSystem, FlashModel, MixtureModel};
pub use species::{Antoine, Species};
