use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::status::AcEvseStatus;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStatusRequest;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStatusResponse {
    pub response_code: ResponseCode,
    pub evse_id: String,
    pub sa_schedule_tuple_id: u8,
    pub ac_evse_status: AcEvseStatus,
    pub meter_id: Option<String>,
    pub meter_reading: Option<u64>,
    pub receipt_required: bool,
}
