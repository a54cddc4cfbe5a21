//! Chemical species definitions.

use crate::error::{ThermoError, ThermoResult};
use txy_core::units::{CELSIUS_OFFSET_K, MMHG_PA};

/// Volatile species available to the built-in mixture models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Water (H₂O)
    Water,
    /// Ethanol (C₂H₅OH)
    Ethanol,
    /// Methanol (CH₃OH)
    Methanol,
    /// Acetone
    Acetone,
    /// Benzene
    Benzene,
    /// Toluene
    Toluene,
    /// n-Hexane
    NHexane,
    /// n-Heptane
    NHeptane,
}

/// Antoine vapor-pressure coefficients.
///
/// `log10(Psat [mmHg]) = A - B / (C + T [°C])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Antoine {
    /// Saturation pressure [Pa] at `t_k` [K].
    ///
    /// Not guarded: below the correlation's pole (`T = -C` °C) the result is
    /// meaningless and callers must check finiteness.
    pub fn psat_pa(&self, t_k: f64) -> f64 {
        let t_c = t_k - CELSIUS_OFFSET_K;
        10f64.powf(self.a - self.b / (self.c + t_c)) * MMHG_PA
    }

    /// Saturation temperature [K] at `p_pa` [Pa].
    pub fn tsat_k(&self, p_pa: f64) -> ThermoResult<f64> {
        if !p_pa.is_finite() || p_pa <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        let denom = self.a - (p_pa / MMHG_PA).log10();
        if denom <= 0.0 {
            return Err(ThermoError::OutOfRange {
                what: "pressure above Antoine correlation range",
            });
        }
        Ok(self.b / denom - self.c + CELSIUS_OFFSET_K)
    }
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Water,
        Species::Ethanol,
        Species::Methanol,
        Species::Acetone,
        Species::Benzene,
        Species::Toluene,
        Species::NHexane,
        Species::NHeptane,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Water => "water",
            Species::Ethanol => "ethanol",
            Species::Methanol => "methanol",
            Species::Acetone => "acetone",
            Species::Benzene => "benzene",
            Species::Toluene => "toluene",
            Species::NHexane => "hexane",
            Species::NHeptane => "heptane",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Water => "Water",
            Species::Ethanol => "Ethanol",
            Species::Methanol => "Methanol",
            Species::Acetone => "Acetone",
            Species::Benzene => "Benzene",
            Species::Toluene => "Toluene",
            Species::NHexane => "n-Hexane",
            Species::NHeptane => "n-Heptane",
        }
    }

    /// Get molar mass [kg/kmol] for this species.
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::Water => 18.015,
            Species::Ethanol => 46.069,
            Species::Methanol => 32.042,
            Species::Acetone => 58.080,
            Species::Benzene => 78.114,
            Species::Toluene => 92.141,
            Species::NHexane => 86.178,
            Species::NHeptane => 100.205,
        }
    }

    /// Antoine coefficients (mmHg, °C), roughly valid between the
    /// melting point and a little above the normal boiling point.
    pub fn antoine(&self) -> Antoine {
        let (a, b, c) = match self {
            Species::Water => (8.07131, 1730.63, 233.426),
            Species::Ethanol => (8.20417, 1642.89, 230.300),
            Species::Methanol => (8.08097, 1582.271, 239.726),
            Species::Acetone => (7.02447, 1161.0, 224.0),
            Species::Benzene => (6.90565, 1211.033, 220.790),
            Species::Toluene => (6.95464, 1344.8, 219.482),
            Species::NHexane => (6.87601, 1171.17, 224.41),
            Species::NHeptane => (6.89677, 1264.90, 216.54),
        };
        Antoine { a, b, c }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WATER" | "H2O" => Ok(Species::Water),
            "ETHANOL" | "ETOH" | "C2H5OH" => Ok(Species::Ethanol),
            "METHANOL" | "MEOH" | "CH3OH" => Ok(Species::Methanol),
            "ACETONE" | "PROPANONE" => Ok(Species::Acetone),
            "BENZENE" | "C6H6" => Ok(Species::Benzene),
            "TOLUENE" | "C7H8" => Ok(Species::Toluene),
            "HEXANE" | "NHEXANE" | "N-HEXANE" => Ok(Species::NHexane),
            "HEPTANE" | "NHEPTANE" | "N-HEPTANE" => Ok(Species::NHeptane),
            _ => Err(ThermoError::UnknownComponent {
                name: s.trim().to_string(),
            }),
        }
    }
}
