use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::header::MessageHeader;
use crate::common::service::{ParameterSet, ServiceId};
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailRequest {
    pub header: MessageHeader,
    pub service_id: ServiceId,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub service_id: ServiceId,
    pub service_parameter_list: Option<Vec<ParameterSet>>,
}
