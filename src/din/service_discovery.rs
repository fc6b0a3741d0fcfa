//! DIN SPEC 70121's `ServiceDiscovery` offers only External Identification
//! Means and a single DC charge service (`spec.md` §4.4: "Only External
//! Identification is offered as auth option. DC-only.").

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::enums::AuthOption;
use crate::common::service::EnergyTransferModeList;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDiscoveryRequest {
    pub service_scope: Option<String>,
    pub service_category: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDiscoveryResponse {
    pub response_code: ResponseCode,
    pub payment_option_list: Vec<AuthOption>,
    pub charge_service: ChargeService,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeService {
    pub service_id: u16,
    pub free_service: bool,
    pub energy_transfer_mode_list: EnergyTransferModeList,
}
