//! AC/DC EVSE status and charge-parameter records, as returned by the
//! `EvseController` and embedded in `ChargingStatusRes`, `CurrentDemandRes`,
//! `CableCheckRes`, `PreChargeRes` and the failed-response registry.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::common::enums::{DcEvseStatusCode, EvseNotification, IsolationLevel};
use crate::common::physical_value::PhysicalValue;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AcEvseStatus {
    pub notification_max_delay: u16,
    pub evse_notification: EvseNotification,
    /// Residual current device status: `true` if a fault is detected.
    pub rcd: bool,
}

impl AcEvseStatus {
    pub const fn placeholder() -> Self {
        AcEvseStatus { notification_max_delay: 0, evse_notification: EvseNotification::None, rcd: false }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DcEvseStatus {
    pub notification_max_delay: u16,
    pub evse_notification: EvseNotification,
    pub evse_isolation_status: IsolationLevel,
    pub evse_status_code: DcEvseStatusCode,
}

impl DcEvseStatus {
    /// The minimal-but-valid placeholder used throughout the failed-response
    /// registry: not ready to charge, isolation not yet confirmed.
    pub const fn not_ready() -> Self {
        DcEvseStatus {
            notification_max_delay: 1000,
            evse_notification: EvseNotification::StopCharging,
            evse_isolation_status: IsolationLevel::Invalid,
            evse_status_code: DcEvseStatusCode::EvseNotReady,
        }
    }

    pub const fn ready() -> Self {
        DcEvseStatus {
            notification_max_delay: 0,
            evse_notification: EvseNotification::None,
            evse_isolation_status: IsolationLevel::Valid,
            evse_status_code: DcEvseStatusCode::EvseReady,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcEvseChargeParameter {
    pub ac_evse_status: AcEvseStatus,
    pub evse_nominal_voltage: PhysicalValue,
    pub evse_max_current: PhysicalValue,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcEvseChargeParameter {
    pub dc_evse_status: DcEvseStatus,
    pub evse_maximum_power_limit: PhysicalValue,
    pub evse_maximum_current_limit: PhysicalValue,
    pub evse_maximum_voltage_limit: PhysicalValue,
    pub evse_minimum_current_limit: PhysicalValue,
    pub evse_minimum_voltage_limit: PhysicalValue,
    pub evse_current_regulation_tolerance: Option<PhysicalValue>,
    pub evse_peak_current_ripple: PhysicalValue,
    pub evse_energy_to_be_delivered: Option<PhysicalValue>,
}

/// Meter reading snapshot, as returned by `EvseController::get_meter_info`
/// and echoed/verified in `MeteringReceiptReq`.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeterInfo {
    pub meter_id: String,
    pub meter_reading: Option<u64>,
    pub sig_meter_reading: Option<Vec<u8>>,
    pub meter_status: Option<i16>,
    pub t_meter: Option<i64>,
}
