use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::header::MessageHeader;
use crate::common::status::MeterInfo;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeteringConfirmationRequest {
    pub header: MessageHeader,
    pub meter_info: MeterInfo,
    pub signature: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeteringConfirmationResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}
