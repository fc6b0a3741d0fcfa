use serde::{Deserialize, Serialize};

use crate::common::enums::AuthOption;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePaymentSelectionRequest {
    pub selected_payment_option: AuthOption,
    pub selected_service_list: Vec<u16>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePaymentSelectionResponse {
    pub response_code: ResponseCode,
}
