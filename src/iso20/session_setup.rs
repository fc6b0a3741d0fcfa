use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupRequest {
    pub header: MessageHeader,
    pub evcc_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_id: String,
}
