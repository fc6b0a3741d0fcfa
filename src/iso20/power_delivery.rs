use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::enums::ChargeProgress;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PowerDeliveryRequest {
    pub header: MessageHeader,
    pub charge_progress: ChargeProgress,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PowerDeliveryResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}
