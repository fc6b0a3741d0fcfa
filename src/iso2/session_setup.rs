use serde::{Deserialize, Serialize};

use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupRequest {
    /// MAC-like identifier supplied by the EV (`spec.md` §3).
    pub evcc_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetupResponse {
    pub response_code: ResponseCode,
    pub evse_id: String,
    pub evse_timestamp: i64,
}
