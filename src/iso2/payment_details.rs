use serde::{Deserialize, Serialize};

use crate::common::certificate::{CertificateChain, Emaid};
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsRequest {
    pub emaid: Emaid,
    pub contract_signature_cert_chain: CertificateChain,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsResponse {
    pub response_code: ResponseCode,
    /// Fresh 16-byte challenge, stored in the session context and reused by
    /// `Authorization` to verify the EVCC's PnC signature.
    pub gen_challenge: [u8; 16],
}
