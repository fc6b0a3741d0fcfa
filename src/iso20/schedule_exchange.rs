use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::header::MessageHeader;
use crate::common::enums::EvseProcessing;
use crate::common::physical_value::PhysicalValue;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleExchangeRequest {
    pub header: MessageHeader,
    pub departure_time: Option<i64>,
    pub ev_target_energy_request: Option<PhysicalValue>,
    pub ev_max_energy_request: Option<PhysicalValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleExchangeResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
    pub power_schedule_entries: Vec<PhysicalValue>,
}
