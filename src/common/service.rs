//! Service descriptors exchanged during `ServiceDiscovery` / `ServiceDetail`:
//! which value-added services (charging, certificate installation, ...) the
//! SECC offers and how the EVCC requests their parameter sets.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use serde_with::skip_serializing_none;
use strum_macros::Display;

use crate::common::enums::EnergyTransferMode;

/// See ISO 15118-2 §8.4.3.3.2 / DIN SPEC 70121 Annex C.6.
#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ServiceId {
    Charging = 1,
    Certificate = 2,
    Internet = 3,
    Custom = 4,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ServiceCategory {
    #[serde(rename = "EVCharging")]
    #[strum(serialize = "EVCharging")]
    Charging,
    #[serde(rename = "ContractCertificate")]
    #[strum(serialize = "ContractCertificate")]
    Certificate,
    #[serde(rename = "Internet")]
    #[strum(serialize = "Internet")]
    Internet,
    #[serde(rename = "OtherCustom")]
    #[strum(serialize = "OtherCustom")]
    Custom,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    pub service_id: ServiceId,
    pub service_name: Option<String>,
    pub service_category: ServiceCategory,
    pub service_scope: Option<String>,
}

/// One entry of `offered_services` in the session context: a value-added
/// service plus whether it is free and which parameter sets (if any) it
/// exposes for a follow-up `ServiceDetailReq`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferedService {
    pub service_details: ServiceDetails,
    pub free_service: bool,
}

/// A single named/valued parameter inside a `ParameterSet`, e.g. the
/// `"Installation"` parameter set of the Certificate service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ParameterValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    PhysicalValue(crate::common::physical_value::PhysicalValue),
    StrValue(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub parameter_set_id: i16,
    pub parameter: Vec<Parameter>,
}

impl ParameterSet {
    /// The sole parameter set exposed by the Certificate service, per
    /// `spec.md` §4.4 ("Only Certificate service has a parameter set
    /// (\"Installation\")").
    pub fn installation() -> Self {
        ParameterSet {
            parameter_set_id: 1,
            parameter: vec![Parameter {
                name: "Service".to_string(),
                value: ParameterValue::StrValue("Installation".to_string()),
            }],
        }
    }
}

/// `EnergyTransferModeList`, as carried by ISO 15118-2's `ChargeService`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnergyTransferModeList {
    pub energy_modes: Vec<EnergyTransferMode>,
}
