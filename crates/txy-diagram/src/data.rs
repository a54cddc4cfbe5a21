//! T-x-y result container.

use crate::error::{DiagramError, DiagramResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bubble and dew temperatures of a binary at fixed pressure.
///
/// The three sequences are index-aligned. They only grow through
/// [`TxyData::push_point`], which appends to all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxyData {
    pub component_1: String,
    pub component_2: String,
    /// Sweep pressure, in `pressure_unit`
    pub pressure: f64,
    pub pressure_unit: String,
    pub temperature_unit: String,
    composition_sequence: Vec<f64>,
    bubble_temperature_sequence: Vec<f64>,
    dew_temperature_sequence: Vec<f64>,
}

impl TxyData {
    /// Empty container carrying identity metadata.
    pub fn new(
        component_1: impl Into<String>,
        component_2: impl Into<String>,
        pressure: f64,
        pressure_unit: impl Into<String>,
        temperature_unit: impl Into<String>,
    ) -> Self {
        Self {
            component_1: component_1.into(),
            component_2: component_2.into(),
            pressure,
            pressure_unit: pressure_unit.into(),
            temperature_unit: temperature_unit.into(),
            composition_sequence: Vec::new(),
            bubble_temperature_sequence: Vec::new(),
            dew_temperature_sequence: Vec::new(),
        }
    }

    /// Append one solved point.
    pub fn push_point(&mut self, composition: f64, t_bubble: f64, t_dew: f64) {
        self.composition_sequence.push(composition);
        self.bubble_temperature_sequence.push(t_bubble);
        self.dew_temperature_sequence.push(t_dew);
    }

    /// Mole fractions of component 1, in sweep order.
    pub fn composition_sequence(&self) -> &[f64] {
        &self.composition_sequence
    }

    pub fn bubble_temperature_sequence(&self) -> &[f64] {
        &self.bubble_temperature_sequence
    }

    pub fn dew_temperature_sequence(&self) -> &[f64] {
        &self.dew_temperature_sequence
    }

    pub fn len(&self) -> usize {
        self.composition_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composition_sequence.is_empty()
    }

    /// `(x, T_bubble)` pairs for plotting.
    pub fn bubble_curve(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.composition_sequence
            .iter()
            .copied()
            .zip(self.bubble_temperature_sequence.iter().copied())
    }

    /// `(x, T_dew)` pairs for plotting.
    pub fn dew_curve(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.composition_sequence
            .iter()
            .copied()
            .zip(self.dew_temperature_sequence.iter().copied())
    }

    /// Smallest and largest temperature over both curves.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.bubble_temperature_sequence
            .iter()
            .chain(&self.dew_temperature_sequence)
            .copied()
            .filter(|t| t.is_finite())
            .fold(None, |range, t| match range {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }

    /// Check the index-alignment invariant.
    ///
    /// Only data that bypassed `push_point` (deserialized files) can fail.
    pub fn validate(&self) -> DiagramResult<()> {
        let n = self.composition_sequence.len();
        if self.bubble_temperature_sequence.len() != n || self.dew_temperature_sequence.len() != n
        {
            return Err(DiagramError::Inconsistent {
                what: format!(
                    "{} compositions, {} bubble temperatures, {} dew temperatures",
                    n,
                    self.bubble_temperature_sequence.len(),
                    self.dew_temperature_sequence.len()
                ),
            });
        }
        Ok(())
    }

    pub fn save_json(&self, path: &Path) -> DiagramResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> DiagramResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let data: TxyData = serde_json::from_str(&content)?;
        data.validate()?;
        Ok(data)
    }
}
