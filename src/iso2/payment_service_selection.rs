use serde::{Deserialize, Serialize};

use crate::common::enums::AuthOption;
use crate::common::service::ServiceId;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedService {
    pub service_id: ServiceId,
    pub parameter_set_id: Option<i16>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentServiceSelectionRequest {
    pub selected_payment_option: AuthOption,
    pub selected_service_list: Vec<SelectedService>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentServiceSelectionResponse {
    pub response_code: ResponseCode,
}
