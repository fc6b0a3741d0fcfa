use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::physical_value::PhysicalValue;
use crate::common::schedule::SaScheduleTuple;
use crate::common::status::DcEvseChargeParameter;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeParameterDiscoveryRequest {
    pub departure_time: Option<i64>,
    pub ev_maximum_current_limit: PhysicalValue,
    pub ev_maximum_power_limit: Option<PhysicalValue>,
    pub ev_maximum_voltage_limit: PhysicalValue,
    pub ev_energy_capacity: Option<PhysicalValue>,
    pub ev_energy_request: Option<PhysicalValue>,
    pub full_soc: Option<u8>,
    pub bulk_soc: Option<u8>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeParameterDiscoveryResponse {
    pub response_code: ResponseCode,
    pub evse_processing: crate::common::enums::EvseProcessing,
    pub dc_evse_charge_parameter: DcEvseChargeParameter,
    pub sa_schedule_list: Option<Vec<SaScheduleTuple>>,
}
