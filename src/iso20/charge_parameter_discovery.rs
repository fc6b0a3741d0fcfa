//! AC and DC `ChargeParameterDiscovery` for ISO 15118-20. Kept as two
//! payload types (`spec.md` §4.4's abridged ISO-20 sequence names them as a
//! slash pair) since AC and DC charge parameters are structurally distinct,
//! unlike ISO 15118-2 where one message carries an optional sub-record for
//! each.

use serde::{Deserialize, Serialize};

use super::header::MessageHeader;
use crate::common::physical_value::PhysicalValue;
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcChargeParameterDiscoveryRequest {
    pub header: MessageHeader,
    pub ev_max_charge_power: PhysicalValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcChargeParameterDiscoveryResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_max_charge_power: PhysicalValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcChargeParameterDiscoveryRequest {
    pub header: MessageHeader,
    pub ev_max_charge_power: PhysicalValue,
    pub ev_max_charge_current: PhysicalValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcChargeParameterDiscoveryResponse {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_max_charge_power: PhysicalValue,
    pub evse_max_charge_current: PhysicalValue,
}
