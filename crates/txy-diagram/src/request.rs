//! YAML request files describing one diagram.

use crate::error::{DiagramError, DiagramResult};
use crate::plot::DiagramOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use txy_core::units::{Pressure, pa};
use txy_solver::SolverConfig;
use txy_thermo::{IdealMixture, Species};

/// A complete diagram request.
///
/// ```yaml
/// component_1: water
/// component_2: ethanol
/// pressure_pa: 101325.0
/// num_points: 21
/// solver:
///   tolerance: 1.0e-8
/// diagram:
///   figure_name: water_ethanol
///   include_pressure: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxyRequest {
    pub component_1: String,
    pub component_2: String,
    pub pressure_pa: f64,
    pub num_points: usize,
    /// Full model component list; defaults to the studied pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub diagram: DiagramOptions,
}

impl TxyRequest {
    pub fn new(
        component_1: Species,
        component_2: Species,
        pressure_pa: f64,
        num_points: usize,
    ) -> Self {
        Self {
            component_1: component_1.key().to_string(),
            component_2: component_2.key().to_string(),
            pressure_pa,
            num_points,
            components: None,
            solver: SolverConfig::default(),
            diagram: DiagramOptions::default(),
        }
    }

    /// Parse the studied pair.
    pub fn pair(&self) -> DiagramResult<(Species, Species)> {
        Ok((self.component_1.parse()?, self.component_2.parse()?))
    }

    /// Model component list, with the pair first when defaulted.
    pub fn model_components(&self) -> DiagramResult<Vec<Species>> {
        let (c1, c2) = self.pair()?;
        let Some(names) = &self.components else {
            return Ok(vec![c1, c2]);
        };

        let components = names
            .iter()
            .map(|name| name.parse::<Species>())
            .collect::<Result<Vec<_>, _>>()?;
        for species in [c1, c2] {
            if !components.contains(&species) {
                return Err(DiagramError::InvalidArg {
                    what: format!("component list does not contain {species}"),
                });
            }
        }
        Ok(components)
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn validate(&self) -> DiagramResult<()> {
        let (c1, c2) = self.pair()?;
        if c1 == c2 {
            return Err(DiagramError::InvalidArg {
                what: format!("component_1 and component_2 are both {c1}"),
            });
        }
        if self.num_points == 0 {
            return Err(DiagramError::InvalidArg {
                what: "num_points must be at least 1".to_string(),
            });
        }
        if !self.pressure_pa.is_finite() || self.pressure_pa <= 0.0 {
            return Err(DiagramError::InvalidArg {
                what: format!("pressure_pa must be positive, got {}", self.pressure_pa),
            });
        }
        self.model_components()?;
        self.solver.validate()?;
        Ok(())
    }

    /// Ideal Raoult's-law model over [`TxyRequest::model_components`].
    pub fn build_model(&self) -> DiagramResult<IdealMixture> {
        Ok(IdealMixture::new(self.model_components()?)?)
    }
}

pub fn load_yaml(path: &Path) -> DiagramResult<TxyRequest> {
    let content = std::fs::read_to_string(path)?;
    let request: TxyRequest = serde_yaml::from_str(&content)?;
    request.validate()?;
    Ok(request)
}

pub fn save_yaml(path: &Path, request: &TxyRequest) -> DiagramResult<()> {
    request.validate()?;
    let content = serde_yaml::to_string(request)?;
    std::fs::write(path, content)?;
    Ok(())
}
