use serde::{Deserialize, Serialize};

use crate::common::physical_value::PhysicalValue;
use crate::common::status::DcEvseStatus;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreChargeRequest {
    pub ev_target_voltage: PhysicalValue,
    pub ev_target_current: PhysicalValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreChargeResponse {
    pub response_code: ResponseCode,
    pub dc_evse_status: DcEvseStatus,
    pub evse_present_voltage: PhysicalValue,
}
