use serde::{Deserialize, Serialize};

use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupRequest {
    pub evcc_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupResponse {
    pub response_code: ResponseCode,
    pub evse_id: String,
    pub evse_timestamp: i64,
}
