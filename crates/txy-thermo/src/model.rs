//! Mixture model traits and validation helpers.

use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use txy_core::units::{PRESSURE_SYMBOL, Pressure, TEMPERATURE_SYMBOL, Temperature};

/// A state block for a multi-component mixture at fixed conditions.
///
/// The block owns the defining state (mole fractions, total flow,
/// temperature, pressure) and exposes bubble and dew temperatures of the
/// vapor–liquid pair once solved. Callers fix the state, run
/// [`MixtureModel::initialize`] once, and then hand the model to a solver.
pub trait MixtureModel {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Ordered component list.
    fn components(&self) -> &[Species];

    /// Fix the mole fraction of one component.
    ///
    /// Fails with [`ThermoError::UnknownComponent`] if `species` is not in
    /// [`MixtureModel::components`].
    fn fix_mole_frac(&mut self, species: Species, value: f64) -> ThermoResult<()>;

    /// Current mole fraction of one component.
    fn mole_frac(&self, species: Species) -> ThermoResult<f64>;

    /// Fix the total molar flow [mol/s].
    fn fix_flow_mol(&mut self, flow: f64) -> ThermoResult<()>;

    fn fix_temperature(&mut self, t: Temperature) -> ThermoResult<()>;

    fn fix_pressure(&mut self, p: Pressure) -> ThermoResult<()>;

    fn temperature(&self) -> Temperature;

    fn pressure(&self) -> Pressure;

    /// Warm-start the unknowns from the current fixed state.
    fn initialize(&mut self, tolerance: f64) -> ThermoResult<()>;

    /// Bubble temperature of the vapor–liquid pair at the current solution.
    fn temperature_bubble(&self) -> Temperature;

    /// Dew temperature of the vapor–liquid pair at the current solution.
    fn temperature_dew(&self) -> Temperature;

    /// Unit symbol of [`MixtureModel::pressure`].
    fn pressure_unit(&self) -> &'static str {
        PRESSURE_SYMBOL
    }

    /// Unit symbol of the temperature variables.
    fn temperature_unit(&self) -> &'static str {
        TEMPERATURE_SYMBOL
    }
}

/// Square nonlinear system `r(x) = 0` over a model's unknowns.
///
/// Residuals may be non-finite for trial points far from the solution;
/// solvers treat that as a rejected step, not an error.
pub trait EquationSystem {
    /// Current values of the unknowns.
    fn unknowns(&self) -> Vec<f64>;

    /// Residuals at `x` (same length as `x`).
    fn residuals(&self, x: &[f64]) -> ThermoResult<Vec<f64>>;

    /// Store `x` as the model's current solution.
    fn set_unknowns(&mut self, x: &[f64]) -> ThermoResult<()>;

    /// Check that the defining state is fully fixed and physical.
    fn check_well_posed(&self) -> ThermoResult<()>;
}

/// Anything a solver can drive and a sweep can read back.
pub trait FlashModel: MixtureModel + EquationSystem {}

impl<T: MixtureModel + EquationSystem + ?Sized> FlashModel for T {}

/// Validation helpers for state variables.
pub(crate) mod validation {
    use super::*;
    use txy_core::units::{pressure_pa, temperature_k};

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> ThermoResult<()> {
        let value = pressure_pa(p);
        if !value.is_finite() || value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> ThermoResult<()> {
        let value = temperature_k(t);
        if !value.is_finite() || value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure molar flow is positive and finite.
    pub fn validate_flow(flow: f64) -> ThermoResult<()> {
        if !flow.is_finite() || flow <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "flow must be positive and finite",
            });
        }
        Ok(())
    }
}
