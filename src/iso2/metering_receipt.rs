use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::status::MeterInfo;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeteringReceiptRequest {
    pub id: String,
    pub signature: Option<Vec<u8>>,
    pub sa_schedule_tuple_id: u8,
    pub meter_info: MeterInfo,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeteringReceiptResponse {
    pub response_code: ResponseCode,
}
