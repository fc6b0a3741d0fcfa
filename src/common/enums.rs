//! Enumerations shared across protocol versions: energy-transfer modes,
//! authorization options, EVSE processing/notification codes, and isolation
//! levels.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Energy transfer modes offered in `ChargeService` / requested in
/// `ChargeParameterDiscoveryReq`. DIN SPEC 70121 only ever uses
/// `DcExtended`; ISO 15118-2 uses the full set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EnergyTransferMode {
    #[serde(rename = "AC_single_phase_core")]
    #[strum(serialize = "AC_single_phase_core")]
    AcSinglePhaseCore,
    #[serde(rename = "AC_three_phase_core")]
    #[strum(serialize = "AC_three_phase_core")]
    AcThreePhaseCore,
    #[serde(rename = "DC_core")]
    #[strum(serialize = "DC_core")]
    DcCore,
    #[serde(rename = "DC_extended")]
    #[strum(serialize = "DC_extended")]
    DcExtended,
    #[serde(rename = "DC_combo_core")]
    #[strum(serialize = "DC_combo_core")]
    DcComboCore,
    #[serde(rename = "DC_unique")]
    #[strum(serialize = "DC_unique")]
    DcUnique,
}

impl EnergyTransferMode {
    pub fn is_dc(self) -> bool {
        matches!(
            self,
            EnergyTransferMode::DcCore
                | EnergyTransferMode::DcExtended
                | EnergyTransferMode::DcComboCore
                | EnergyTransferMode::DcUnique
        )
    }
}

/// Authentication options offered during `ServiceDiscovery` and selected in
/// `PaymentServiceSelection` / `AuthorizationSetup`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AuthOption {
    #[serde(rename = "ExternalPayment")]
    #[strum(serialize = "ExternalPayment")]
    Eim,
    #[serde(rename = "Contract")]
    #[strum(serialize = "Contract")]
    Pnc,
}

/// `EVSEProcessing` as carried by `ChargeParameterDiscoveryRes`,
/// `AuthorizationRes`, and the ISO-20 equivalents: whether the SECC needs
/// another request/response round before it can finish the current step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvseProcessing {
    Ongoing,
    Finished,
}

/// Outcome of `EvseController::is_authorised`. The source the spec is
/// grounded on only returns a boolean; this crate resolves the documented
/// open question by making the in-progress/rejected distinction explicit so
/// the `Authorization` state can emit a specific `FAILED_*` code instead of
/// looping forever on a rejected identity. See `SPEC_FULL.md` §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Ongoing,
    Accepted,
    Rejected,
}

/// `IsolationLevel` reported in `DCEVSEStatus` per ISO 15118-2 Table 54.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IsolationLevel {
    Invalid,
    Valid,
    Warning,
    Fault,
    #[serde(rename = "No_IMD")]
    #[strum(serialize = "No_IMD")]
    NoImd,
}

/// `EVSENotification`, surfaced in both AC and DC status records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvseNotification {
    None,
    StopCharging,
    ReNegotiation,
}

/// `DCEVSEStatusCode` per ISO 15118-2 Table 53 / DIN SPEC 70121 Annex C.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DcEvseStatusCode {
    #[serde(rename = "EVSE_NotReady")]
    #[strum(serialize = "EVSE_NotReady")]
    EvseNotReady,
    #[serde(rename = "EVSE_Ready")]
    #[strum(serialize = "EVSE_Ready")]
    EvseReady,
    #[serde(rename = "EVSE_Shutdown")]
    #[strum(serialize = "EVSE_Shutdown")]
    EvseShutdown,
    #[serde(rename = "EVSE_UtilityInterruptEvent")]
    #[strum(serialize = "EVSE_UtilityInterruptEvent")]
    EvseUtilityInterruptEvent,
    #[serde(rename = "EVSE_IsolationMonitoringActive")]
    #[strum(serialize = "EVSE_IsolationMonitoringActive")]
    EvseIsolationMonitoringActive,
    #[serde(rename = "EVSE_EmergencyShutdown")]
    #[strum(serialize = "EVSE_EmergencyShutdown")]
    EvseEmergencyShutdown,
    #[serde(rename = "EVSE_Malfunction")]
    #[strum(serialize = "EVSE_Malfunction")]
    EvseMalfunction,
}

/// `ChargeProgress` value requested in `PowerDeliveryReq`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChargeProgress {
    Start,
    Stop,
    Renegotiate,
}

/// Negotiated protocol version for a session, decided by `SupportedAppProtocol`
/// handshake before the state machine in this crate ever runs; carried in
/// `SessionContext` so states can branch DIN vs ISO-2 vs ISO-20 behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    Unknown,
    DinSpec70121,
    Iso15118_2,
    Iso15118_20Ac,
    Iso15118_20Dc,
}

/// DC charging session termination semantics, as read by `SessionStopReq`'s
/// `ChargingSession` field: whether the EV intends to resume this session or
/// is done with it for good.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChargingSession {
    Terminate,
    Pause,
}
