use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::header::MessageHeader;
use crate::common::enums::{AuthOption, EvseProcessing};
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub header: MessageHeader,
    pub selected_authorization_service: AuthOption,
    pub id: Option<String>,
    pub signature: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}
