// txy-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Symbol of the canonical pressure unit, used for labels.
pub const PRESSURE_SYMBOL: &str = "Pa";

/// Symbol of the canonical temperature unit, used for labels.
pub const TEMPERATURE_SYMBOL: &str = "K";

/// Standard atmosphere [Pa].
pub const ATMOSPHERE_PA: f64 = 101_325.0;

/// One millimetre of mercury [Pa].
pub const MMHG_PA: f64 = 133.322_387_415;

/// Offset between kelvin and degree Celsius.
pub const CELSIUS_OFFSET_K: f64 = 273.15;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn pressure_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn temperature_k(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
    }

    #[test]
    fn accessors_return_si_values() {
        assert_eq!(pressure_pa(pa(ATMOSPHERE_PA)), ATMOSPHERE_PA);
        assert_eq!(temperature_k(k(298.15)), 298.15);
    }
}
