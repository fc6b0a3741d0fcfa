use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::enums::ChargingSession;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStopRequest {
    pub header: MessageHeader,
    pub charging_session: ChargingSession,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStopResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}
