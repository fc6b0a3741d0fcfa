//! `SessionContext`: the mutable record a `SessionHandler` owns for the
//! lifetime of one TCP connection and passes to every state.

use std::collections::HashSet;
use std::net::SocketAddr;

use rand::RngCore;

use crate::common::certificate::CertificateChain;
use crate::common::enums::{AuthOption, ChargeProgress, EnergyTransferMode, ProtocolVersion};
use crate::common::schedule::SaScheduleTuple;
use crate::common::service::OfferedService;
use crate::common::status::MeterInfo;
use crate::security::certs::Certificate;

/// 8-byte session identifier, always transported as an upper-hex string
/// (`spec.md` §3 / §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub [u8; 8]);

impl SessionId {
    pub const ZERO: SessionId = SessionId([0u8; 8]);

    pub fn new_random() -> Self {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);
        SessionId(bytes)
    }

    pub fn to_hex(self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 8] = bytes.try_into().ok()?;
        Some(SessionId(arr))
    }

    pub fn is_zero(self) -> bool {
        self.0 == [0u8; 8]
    }
}

/// Why a session ended, surfaced as a `StopNotification` per `spec.md` §5
/// ("cancellation is observable only as a terminal state and a
/// `StopNotification` carrying peer address and reason").
#[derive(Debug, Clone)]
pub struct StopReason {
    pub peer: SocketAddr,
    pub normal: bool,
    pub message: String,
}

/// The mutable, per-connection state threaded through the state machine.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: SessionId,
    pub is_new_session: bool,
    pub evcc_id: Option<String>,
    pub protocol_version: ProtocolVersion,
    pub is_tls: bool,

    pub offered_auth_options: Vec<AuthOption>,
    pub selected_auth_option: Option<AuthOption>,

    pub offered_services: Vec<OfferedService>,
    pub offered_schedules: Vec<SaScheduleTuple>,

    pub selected_energy_mode: Option<EnergyTransferMode>,
    pub selected_schedule: Option<u8>,
    pub charge_progress: Option<ChargeProgress>,

    pub contract_cert_chain: Option<CertificateChain>,
    pub contract_leaf_cert: Option<Certificate>,
    pub contract_sub_cas: Vec<Certificate>,
    pub gen_challenge: Option<[u8; 16]>,

    pub charge_progress_started: bool,
    pub sent_meter_info: Option<MeterInfo>,

    pub stop_reason: Option<StopReason>,

    /// Tracks which states have already been visited once, for the
    /// "first-visit" replay guard described in `spec.md` §4.4 (e.g.
    /// `ServiceDiscovery` only accepts `ServiceDetailReq` after the initial
    /// `ServiceDiscoveryReq`).
    visited: HashSet<&'static str>,
}

impl SessionContext {
    pub fn new() -> Self {
        SessionContext {
            session_id: SessionId::ZERO,
            is_new_session: true,
            evcc_id: None,
            protocol_version: ProtocolVersion::Unknown,
            is_tls: false,
            offered_auth_options: Vec::new(),
            selected_auth_option: None,
            offered_services: Vec::new(),
            offered_schedules: Vec::new(),
            selected_energy_mode: None,
            selected_schedule: None,
            charge_progress: None,
            contract_cert_chain: None,
            contract_leaf_cert: None,
            contract_sub_cas: Vec::new(),
            gen_challenge: None,
            charge_progress_started: false,
            sent_meter_info: None,
            stop_reason: None,
            visited: HashSet::new(),
        }
    }

    /// Implements the `SessionSetup` id-resolution invariant from
    /// `spec.md` §3: all-zero id means "new session"; a matching non-zero
    /// id known to `known_session` means "resume"; anything else gets a
    /// freshly generated id and is treated as new.
    pub fn resolve_session_id(&mut self, requested: SessionId, known_session: Option<SessionId>) -> bool {
        if requested.is_zero() {
            self.session_id = SessionId::new_random();
            self.is_new_session = true;
            return true;
        }
        if Some(requested) == known_session {
            self.session_id = requested;
            self.is_new_session = false;
            return false;
        }
        self.session_id = SessionId::new_random();
        self.is_new_session = true;
        true
    }

    pub fn mark_visited(&mut self, state: &'static str) {
        self.visited.insert(state);
    }

    pub fn has_visited(&self, state: &'static str) -> bool {
        self.visited.contains(state)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_id_always_starts_a_new_session() {
        let mut ctx = SessionContext::new();
        let is_new = ctx.resolve_session_id(SessionId::ZERO, Some(SessionId([9; 8])));
        assert!(is_new);
        assert!(ctx.is_new_session);
        assert!(!ctx.session_id.is_zero());
    }

    #[test]
    fn matching_known_id_resumes() {
        let mut ctx = SessionContext::new();
        let known = SessionId([1, 2, 3, 4, 5, 6, 7, 8]);
        let is_new = ctx.resolve_session_id(known, Some(known));
        assert!(!is_new);
        assert!(!ctx.is_new_session);
        assert_eq!(ctx.session_id, known);
    }

    #[test]
    fn unknown_non_zero_id_starts_fresh_and_is_not_echoed() {
        let mut ctx = SessionContext::new();
        let stale = SessionId([0xAA; 8]);
        let is_new = ctx.resolve_session_id(stale, None);
        assert!(is_new);
        assert_ne!(ctx.session_id, stale);
    }

    #[test]
    fn mismatched_known_id_starts_fresh() {
        let mut ctx = SessionContext::new();
        let requested = SessionId([1; 8]);
        let known = SessionId([2; 8]);
        let is_new = ctx.resolve_session_id(requested, Some(known));
        assert!(is_new);
        assert_ne!(ctx.session_id, requested);
    }

    #[test]
    fn visited_tracking_is_first_visit_only() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.has_visited("ServiceDiscovery"));
        ctx.mark_visited("ServiceDiscovery");
        assert!(ctx.has_visited("ServiceDiscovery"));
        assert!(!ctx.has_visited("CableCheck"));
    }

    #[test]
    fn hex_round_trips() {
        let id = SessionId([0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04]);
        let hex = id.to_hex();
        assert_eq!(SessionId::from_hex(&hex), Some(id));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert_eq!(SessionId::from_hex("AABB"), None);
    }
}
