//! Secondary-Actor (SA) schedule datatypes: a P-max schedule bounding power
//! draw over time, with an optional sales tariff, offered by the SECC in
//! `ChargeParameterDiscoveryRes` and selected by the EVCC in `PowerDeliveryReq`.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::physical_value::PhysicalValue;

/// A relative time window, seconds from the start of the schedule.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelativeTimeInterval {
    pub start: u32,
    pub duration: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PMaxScheduleEntry {
    pub relative_time_interval: RelativeTimeInterval,
    pub p_max: PhysicalValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PMaxSchedule {
    pub entries: Vec<PMaxScheduleEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesTariffEntry {
    pub relative_time_interval: RelativeTimeInterval,
    pub e_price_level: u8,
}

/// Optional per-schedule pricing information. The enclosing
/// [`SaScheduleTuple::sales_tariff_signature`] is populated by
/// `security::signature::create_signature` when the CPS signing key is
/// available; signing failure here is non-fatal per `spec.md` §7 — the
/// schedule is still sent, unsigned.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesTariff {
    pub sales_tariff_id: u8,
    pub sales_tariff_description: Option<String>,
    pub num_e_price_levels: Option<u8>,
    pub sales_tariff_entry: Vec<SalesTariffEntry>,
}

/// One entry of the `SAScheduleList` returned by
/// `EvseController::get_sa_schedule_list`.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaScheduleTuple {
    pub sa_schedule_tuple_id: u8,
    pub p_max_schedule: PMaxSchedule,
    pub sales_tariff: Option<SalesTariff>,
    pub sales_tariff_signature: Option<Vec<u8>>,
}
