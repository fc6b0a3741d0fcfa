use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::charging_profile::ChargingProfile;
use crate::common::enums::ChargeProgress;
use crate::common::status::DcEvseStatus;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerDeliveryRequest {
    pub charge_progress: ChargeProgress,
    pub sa_schedule_tuple_id: u8,
    pub charging_profile: Option<ChargingProfile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerDeliveryResponse {
    pub response_code: ResponseCode,
    pub dc_evse_status: DcEvseStatus,
}
