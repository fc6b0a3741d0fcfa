//! DIN SPEC 70121's `ContractAuthentication` plays the role ISO 15118-2
//! splits into `PaymentDetails`+`Authorization`: EIM-only, so it is just a
//! polled authorization decision (`spec.md` §4.4: "loops until `FINISHED`").

use serde::{Deserialize, Serialize};

use crate::common::enums::EvseProcessing;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAuthenticationRequest;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractAuthenticationResponse {
    pub response_code: ResponseCode,
    pub evse_processing: EvseProcessing,
}
