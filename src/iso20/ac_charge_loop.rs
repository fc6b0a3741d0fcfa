//! `ACChargeLoop`, the AC energy-transfer loop (`spec.md` §9 resolution:
//! the DC equivalent is intentionally out of scope for ISO 15118-20).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::header::MessageHeader;
use crate::common::physical_value::PhysicalValue;
use crate::response_code::ResponseCode;

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcChargeLoopRequest {
    pub header: MessageHeader,
    pub ev_present_active_power: PhysicalValue,
    pub charging_complete: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcChargeLoopResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_present_active_power: PhysicalValue,
}
