//! `ChargingProfile`, carried by `PowerDeliveryReq` when `charge_progress ==
//! Start` (`spec.md` §3 invariant, §4.4 `PowerDelivery`): a list of entries
//! bounding the power the EV may draw starting at a relative offset.
//!
//! ISO 15118-2's `ChargingProfile` is flatter than its OCPP namesake (no
//! purpose/kind/recurrency/stack-level — those are Charge-Point-side
//! concepts); the builder below keeps the teacher's staged, chainable style
//! but drops the typestate parameters that had no counterpart here.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::physical_value::PhysicalValue;

/// One entry of a `ChargingProfile`: from `entry_start` seconds (relative to
/// the start of charging) until the next entry's `entry_start`, the EV must
/// not draw more than `max_power` over `max_phases_in_use` phases.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargingProfileEntry {
    pub entry_start: u32,
    pub entry_max_power: PhysicalValue,
    pub entry_max_number_of_phases_in_use: Option<i8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChargingProfile {
    pub entries: Vec<ChargingProfileEntry>,
}

impl ChargingProfile {
    pub fn builder() -> ChargingProfileBuilder {
        ChargingProfileBuilder { entries: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChargingProfileBuilder {
    entries: Vec<ChargingProfileEntry>,
}

impl ChargingProfileBuilder {
    pub fn add_entry(mut self, entry_start: u32, entry_max_power: PhysicalValue, entry_max_number_of_phases_in_use: Option<i8>) -> Self {
        self.entries.push(ChargingProfileEntry { entry_start, entry_max_power, entry_max_number_of_phases_in_use });
        self
    }

    pub fn build(self) -> ChargingProfile {
        ChargingProfile { entries: self.entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::physical_value::UnitSymbol;

    #[test]
    fn builder_preserves_entry_order() {
        let profile = ChargingProfile::builder()
            .add_entry(0, PhysicalValue { multiplier: 0, value: 32, unit: UnitSymbol::Ampere }, None)
            .add_entry(600, PhysicalValue { multiplier: 0, value: 16, unit: UnitSymbol::Ampere }, Some(3))
            .build();
        assert_eq!(profile.entries.len(), 2);
        assert_eq!(profile.entries[0].entry_start, 0);
        assert_eq!(profile.entries[1].entry_start, 600);
    }

    #[test]
    fn empty_profile_reports_empty() {
        assert!(ChargingProfile::builder().build().is_empty());
    }
}
