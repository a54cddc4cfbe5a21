//! Mole-fraction vectors over a fixed, ordered component list.

use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use txy_core::numeric::{Tolerances, ensure_finite, nearly_equal};

/// Mole fraction of one component, together with its fixed flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionVar {
    pub value: f64,
    pub fixed: bool,
}

/// Mole fractions indexed by component.
///
/// Unlike a normalized composition, entries are fixed one at a time and the
/// sum is only checked when the whole vector is consumed (see
/// [`MoleFractions::check_closed`]).
#[derive(Debug, Clone, PartialEq)]
pub struct MoleFractions {
    components: Vec<Species>,
    values: Vec<FractionVar>,
}

impl MoleFractions {
    /// Create an unfixed, uniform vector over `components`.
    ///
    /// Rejects empty and duplicated component lists.
    pub fn new(components: Vec<Species>) -> ThermoResult<Self> {
        if components.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty component list",
            });
        }
        for (i, species) in components.iter().enumerate() {
            if components[..i].contains(species) {
                return Err(ThermoError::InvalidArg {
                    what: "duplicated component",
                });
            }
        }

        let guess = 1.0 / components.len() as f64;
        let values = vec![
            FractionVar {
                value: guess,
                fixed: false,
            };
            components.len()
        ];
        Ok(Self { components, values })
    }

    /// Ordered component list.
    pub fn components(&self) -> &[Species] {
        &self.components
    }

    /// Position of `species` in the component list.
    pub fn index_of(&self, species: Species) -> ThermoResult<usize> {
        self.components
            .iter()
            .position(|s| *s == species)
            .ok_or_else(|| ThermoError::UnknownComponent {
                name: species.key().to_string(),
            })
    }

    /// Fix the mole fraction of `species`.
    pub fn fix(&mut self, species: Species, value: f64) -> ThermoResult<()> {
        let index = self.index_of(species)?;
        let value = ensure_finite(value, "mole fraction")?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ThermoError::NonPhysical {
                what: "mole fraction outside [0, 1]",
            });
        }
        self.values[index] = FractionVar { value, fixed: true };
        Ok(())
    }

    /// Current mole fraction of `species`.
    pub fn get(&self, species: Species) -> ThermoResult<f64> {
        Ok(self.values[self.index_of(species)?].value)
    }

    /// Iterate over all components with their current fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.components
            .iter()
            .copied()
            .zip(self.values.iter().map(|v| v.value))
    }

    /// Sum of all current fractions.
    pub fn sum(&self) -> f64 {
        self.values.iter().map(|v| v.value).sum()
    }

    /// First component whose fraction is not fixed, if any.
    pub fn first_unfixed(&self) -> Option<Species> {
        self.components
            .iter()
            .zip(&self.values)
            .find(|(_, v)| !v.fixed)
            .map(|(s, _)| *s)
    }

    /// Ensure every fraction is fixed and the vector sums to one.
    pub fn check_closed(&self) -> ThermoResult<()> {
        if let Some(species) = self.first_unfixed() {
            return Err(ThermoError::Unfixed {
                what: format!("mole_frac_comp[{}]", species),
            });
        }
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        if !nearly_equal(self.sum(), 1.0, tol) {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions do not sum to one",
            });
        }
        Ok(())
    }
}
