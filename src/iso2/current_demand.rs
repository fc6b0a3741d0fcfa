use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::physical_value::PhysicalValue;
use crate::common::status::DcEvseStatus;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDemandRequest {
    pub ev_target_voltage: PhysicalValue,
    pub ev_target_current: PhysicalValue,
    pub ev_maximum_voltage_limit: Option<PhysicalValue>,
    pub ev_maximum_current_limit: Option<PhysicalValue>,
    pub ev_maximum_power_limit: Option<PhysicalValue>,
    pub bulk_charging_complete: Option<bool>,
    pub charging_complete: bool,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDemandResponse {
    pub response_code: ResponseCode,
    pub dc_evse_status: DcEvseStatus,
    pub evse_present_voltage: PhysicalValue,
    pub evse_present_current: PhysicalValue,
    pub evse_current_limit_achieved: bool,
    pub evse_voltage_limit_achieved: bool,
    pub evse_power_limit_achieved: bool,
    pub evse_maximum_voltage_limit: Option<PhysicalValue>,
    pub evse_maximum_current_limit: Option<PhysicalValue>,
    pub evse_maximum_power_limit: Option<PhysicalValue>,
}
