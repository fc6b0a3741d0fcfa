use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::enums::EnergyTransferMode;
use crate::common::physical_value::PhysicalValue;
use crate::common::schedule::SaScheduleTuple;
use crate::common::status::{AcEvseChargeParameter, DcEvseChargeParameter};
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcEvChargeParameter {
    pub departure_time: Option<i64>,
    pub e_amount: PhysicalValue,
    pub ev_max_voltage: PhysicalValue,
    pub ev_max_current: PhysicalValue,
    pub ev_min_current: PhysicalValue,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcEvChargeParameter {
    pub departure_time: Option<i64>,
    pub ev_maximum_current_limit: PhysicalValue,
    pub ev_maximum_power_limit: Option<PhysicalValue>,
    pub ev_maximum_voltage_limit: PhysicalValue,
    pub ev_energy_capacity: Option<PhysicalValue>,
    pub ev_energy_request: Option<PhysicalValue>,
    pub full_soc: Option<u8>,
    pub bulk_soc: Option<u8>,
    pub de_s_o_c: Option<u8>,
}

/// One of `ac_ev_charge_parameter`/`dc_ev_charge_parameter` is populated,
/// mirroring the EVCC's requested `EnergyTransferMode`.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeParameterDiscoveryRequest {
    pub requested_energy_transfer_mode: EnergyTransferMode,
    pub ac_ev_charge_parameter: Option<AcEvChargeParameter>,
    pub dc_ev_charge_parameter: Option<DcEvChargeParameter>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeParameterDiscoveryResponse {
    pub response_code: ResponseCode,
    pub evse_processing: crate::common::enums::EvseProcessing,
    pub ac_evse_charge_parameter: Option<AcEvseChargeParameter>,
    pub dc_evse_charge_parameter: Option<DcEvseChargeParameter>,
    pub sa_schedule_list: Option<Vec<SaScheduleTuple>>,
}
