use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::enums::EvseProcessing;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    /// Present for PnC only: signature over `id` verified against the
    /// contract leaf certificate stored from `PaymentDetails`.
    pub id: Option<String>,
    pub gen_challenge: Option<[u8; 16]>,
    pub signature: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResponse {
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}
