use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::service::OfferedService;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDiscoveryRequest {
    pub header: MessageHeader,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDiscoveryResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub service_renegotiation_supported: bool,
    pub energy_transfer_service_list: Vec<OfferedService>,
    pub va_service_list: Vec<OfferedService>,
}
