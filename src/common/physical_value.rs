//! The `PhysicalValue` triple (multiplier/value/unit) used throughout the
//! ISO 15118-2 and DIN SPEC 70121 schemas for every numeric quantity on the
//! wire (voltage, current, power, energy).

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// A single physical quantity as transmitted on the wire: `value * 10^multiplier`
/// in the given `unit`. Kept as one shared struct (rather than one distinct
/// Rust type per XSD type name such as `PVEVSEPresentVoltage`) since the unit
/// already disambiguates the quantity and Rust's type system gains nothing
/// from the extra XSD-derived names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalValue {
    /// Power-of-ten multiplier applied to `value`. XSD range is -3..=3.
    pub multiplier: i8,
    pub value: i32,
    pub unit: UnitSymbol,
}

impl PhysicalValue {
    /// A zero-valued placeholder carrying the correct unit tag, as used by
    /// the failed-response registry.
    pub const fn zero(unit: UnitSymbol) -> Self {
        PhysicalValue { multiplier: 0, value: 0, unit }
    }

    pub fn as_f64(&self) -> f64 {
        self.value as f64 * 10f64.powi(self.multiplier as i32)
    }
}

/// Unit symbols used by [`PhysicalValue`], per Table 68 of ISO 15118-2.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnitSymbol {
    #[serde(rename = "h")]
    #[strum(serialize = "h")]
    Hours,
    #[serde(rename = "m")]
    #[strum(serialize = "m")]
    Minutes,
    #[serde(rename = "s")]
    #[strum(serialize = "s")]
    Seconds,
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Ampere,
    #[serde(rename = "Wh")]
    #[strum(serialize = "Wh")]
    WattHours,
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    Watt,
    #[serde(rename = "V")]
    #[strum(serialize = "V")]
    Voltage,
    #[serde(rename = "Celsius")]
    #[strum(serialize = "Celsius")]
    Celsius,
    #[serde(rename = "VA")]
    #[strum(serialize = "VA")]
    VoltAmpere,
    #[serde(rename = "var")]
    #[strum(serialize = "var")]
    VoltAmpereReactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_f64_applies_the_multiplier() {
        let value = PhysicalValue { multiplier: 2, value: 40, unit: UnitSymbol::WattHours };
        assert_eq!(value.as_f64(), 4000.0);
    }

    #[test]
    fn negative_multiplier_divides() {
        let value = PhysicalValue { multiplier: -1, value: 125, unit: UnitSymbol::Ampere };
        assert_eq!(value.as_f64(), 12.5);
    }

    #[test]
    fn zero_keeps_the_unit() {
        let value = PhysicalValue::zero(UnitSymbol::Voltage);
        assert_eq!(value.as_f64(), 0.0);
        assert_eq!(value.unit, UnitSymbol::Voltage);
    }
}
