use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::enums::AuthOption;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationSetupRequest {
    pub header: MessageHeader,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationSetupResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub auth_services: Vec<AuthOption>,
    pub eim_as_fallback: bool,
}
