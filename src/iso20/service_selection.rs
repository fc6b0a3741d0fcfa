use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::enums::EnergyTransferMode;
use crate::common::service::ServiceId;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelectionRequest {
    pub header: MessageHeader,
    pub selected_energy_transfer_service: EnergyTransferMode,
    pub selected_va_services: Vec<ServiceId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelectionResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
}
