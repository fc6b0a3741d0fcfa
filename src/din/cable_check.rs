use serde::{Deserialize, Serialize};

use crate::common::status::DcEvseStatus;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CableCheckRequest {
    pub dc_ev_status: crate::common::enums::IsolationLevel,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CableCheckResponse {
    pub response_code: ResponseCode,
    pub dc_evse_status: DcEvseStatus,
    pub evse_processing: crate::common::enums::EvseProcessing,
}
