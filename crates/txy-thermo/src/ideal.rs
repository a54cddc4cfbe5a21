//! Ideal vapor–liquid mixture (Raoult's law with Antoine vapor pressures).
//!
//! Unknowns are `[T_bubble, T_dew]` in kelvin. The residuals are written in
//! log form so both are O(1) near the solution:
//!
//! - bubble: `ln( Σ z_i Psat_i(T_bubble) / P )`
//! - dew:    `ln( Σ z_i P / Psat_i(T_dew) )`

use crate::composition::MoleFractions;
use crate::error::{ThermoError, ThermoResult};
use crate::model::{EquationSystem, MixtureModel, validation};
use crate::species::Species;
use txy_core::units::{
    ATMOSPHERE_PA, Pressure, Temperature, k, pa, pressure_pa, temperature_k,
};

const DEFAULT_TEMPERATURE_K: f64 = 298.15;
const MAX_BISECTION_ITERS: usize = 200;

/// Ideal mixture state block over a fixed component list.
#[derive(Debug, Clone)]
pub struct IdealMixture {
    mole_frac: MoleFractions,
    flow_mol: Option<f64>,
    temperature_k: Option<f64>,
    pressure_pa: Option<f64>,
    t_bubble_k: f64,
    t_dew_k: f64,
}

impl IdealMixture {
    /// Build an uninitialized block; nothing is fixed yet.
    pub fn new(components: Vec<Species>) -> ThermoResult<Self> {
        Ok(Self {
            mole_frac: MoleFractions::new(components)?,
            flow_mol: None,
            temperature_k: None,
            pressure_pa: None,
            t_bubble_k: DEFAULT_TEMPERATURE_K,
            t_dew_k: DEFAULT_TEMPERATURE_K,
        })
    }

    pub fn flow_mol(&self) -> Option<f64> {
        self.flow_mol
    }

    fn fixed_pressure_pa(&self) -> ThermoResult<f64> {
        self.pressure_pa.ok_or_else(|| ThermoError::Unfixed {
            what: "pressure".to_string(),
        })
    }

    fn bubble_residual(&self, t_k: f64, p_pa: f64) -> f64 {
        let sum: f64 = self
            .mole_frac
            .iter()
            .map(|(s, z)| z * s.antoine().psat_pa(t_k))
            .sum();
        (sum / p_pa).ln()
    }

    fn dew_residual(&self, t_k: f64, p_pa: f64) -> f64 {
        let sum: f64 = self
            .mole_frac
            .iter()
            .map(|(s, z)| z * p_pa / s.antoine().psat_pa(t_k))
            .sum();
        sum.ln()
    }

    /// Bracket of pure-component saturation temperatures at `p_pa` over the
    /// components actually present.
    fn saturation_bracket(&self, p_pa: f64) -> ThermoResult<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (species, z) in self.mole_frac.iter() {
            if z <= 0.0 {
                continue;
            }
            let tsat = species.antoine().tsat_k(p_pa)?;
            lo = lo.min(tsat);
            hi = hi.max(tsat);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "no component with positive mole fraction",
            });
        }
        Ok((lo, hi))
    }
}

/// Root of a monotonic `f` on `[lo, hi]` by bisection.
///
/// `f(lo)` and `f(hi)` must not share a strict sign; the closer end is
/// returned if they do.
fn bisect<F: Fn(f64) -> f64>(f: F, mut lo: f64, mut hi: f64, rel_tol: f64) -> f64 {
    let f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 || hi <= lo {
        return lo;
    }
    if f_hi == 0.0 {
        return hi;
    }
    if f_lo.signum() == f_hi.signum() {
        return if f_lo.abs() < f_hi.abs() { lo } else { hi };
    }

    let rising = f_lo < 0.0;
    for _ in 0..MAX_BISECTION_ITERS {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= rel_tol * mid.abs().max(1.0) {
            break;
        }
        let f_mid = f(mid);
        if (f_mid < 0.0) == rising {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

impl MixtureModel for IdealMixture {
    fn name(&self) -> &str {
        "ideal-raoult"
    }

    fn components(&self) -> &[Species] {
        self.mole_frac.components()
    }

    fn fix_mole_frac(&mut self, species: Species, value: f64) -> ThermoResult<()> {
        self.mole_frac.fix(species, value)
    }

    fn mole_frac(&self, species: Species) -> ThermoResult<f64> {
        self.mole_frac.get(species)
    }

    fn fix_flow_mol(&mut self, flow: f64) -> ThermoResult<()> {
        validation::validate_flow(flow)?;
        self.flow_mol = Some(flow);
        Ok(())
    }

    fn fix_temperature(&mut self, t: Temperature) -> ThermoResult<()> {
        validation::validate_temperature(t)?;
        self.temperature_k = Some(temperature_k(t));
        Ok(())
    }

    fn fix_pressure(&mut self, p: Pressure) -> ThermoResult<()> {
        validation::validate_pressure(p)?;
        self.pressure_pa = Some(pressure_pa(p));
        Ok(())
    }

    fn temperature(&self) -> Temperature {
        k(self.temperature_k.unwrap_or(DEFAULT_TEMPERATURE_K))
    }

    fn pressure(&self) -> Pressure {
        pa(self.pressure_pa.unwrap_or(ATMOSPHERE_PA))
    }

    fn initialize(&mut self, tolerance: f64) -> ThermoResult<()> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ThermoError::InvalidArg {
                what: "initialization tolerance must be positive",
            });
        }
        self.check_well_posed()?;

        let p = self.fixed_pressure_pa()?;
        let (lo, hi) = self.saturation_bracket(p)?;
        self.t_bubble_k = bisect(|t| self.bubble_residual(t, p), lo, hi, tolerance);
        self.t_dew_k = bisect(|t| self.dew_residual(t, p), lo, hi, tolerance);
        Ok(())
    }

    fn temperature_bubble(&self) -> Temperature {
        k(self.t_bubble_k)
    }

    fn temperature_dew(&self) -> Temperature {
        k(self.t_dew_k)
    }
}

impl EquationSystem for IdealMixture {
    fn unknowns(&self) -> Vec<f64> {
        vec![self.t_bubble_k, self.t_dew_k]
    }

    fn residuals(&self, x: &[f64]) -> ThermoResult<Vec<f64>> {
        if x.len() != 2 {
            return Err(ThermoError::InvalidArg {
                what: "ideal mixture has exactly two unknowns",
            });
        }
        let p = self.fixed_pressure_pa()?;
        Ok(vec![self.bubble_residual(x[0], p), self.dew_residual(x[1], p)])
    }

    fn set_unknowns(&mut self, x: &[f64]) -> ThermoResult<()> {
        match x {
            [t_bubble, t_dew] => {
                self.t_bubble_k = *t_bubble;
                self.t_dew_k = *t_dew;
                Ok(())
            }
            _ => Err(ThermoError::InvalidArg {
                what: "ideal mixture has exactly two unknowns",
            }),
        }
    }

    fn check_well_posed(&self) -> ThermoResult<()> {
        self.mole_frac.check_closed()?;
        if self.flow_mol.is_none() {
            return Err(ThermoError::Unfixed {
                what: "flow_mol".to_string(),
            });
        }
        if self.temperature_k.is_none() {
            return Err(ThermoError::Unfixed {
                what: "temperature".to_string(),
            });
        }
        self.fixed_pressure_pa()?;
        Ok(())
    }
}
