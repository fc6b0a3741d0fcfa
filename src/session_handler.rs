//! Session Handler (`spec.md` §2 item 7, §5): owns the transport
//! read/dispatch/write loop for one accepted connection, drives the state
//! machine, applies sequence timeouts, and disposes the session on any
//! terminal transition.
//!
//! One `run_*` function per protocol, mirroring the per-protocol split of
//! `engine::{din_states, iso2_states, iso20_states}` rather than a single
//! generic loop — each protocol's request/response enums and
//! `process_*` signature differ enough (DIN/ISO-2 carry the session id
//! alongside the message, ISO-20 carries it inside `MessageHeader` and
//! needs a `Namespace`/`ISOV20PayloadTypes` pair on every reply) that
//! forcing a shared abstraction would cost more than it saves.

use std::net::SocketAddr;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::din::message::{DinRequest, DinResponse};
use crate::engine::din_states::{process_din, DinState};
use crate::engine::iso20_states::{process_iso20, Iso20State};
use crate::engine::iso2_states::{process_iso2, Iso2State};
use crate::engine::Outcome;
use crate::error::SeccError;
use crate::evse_controller::EvseController;
use crate::iso20::message::{Iso20Request, Iso20Response};
use crate::iso20::{ISOV20PayloadTypes, Namespace};
use crate::iso2::message::{Iso2Request, Iso2Response};
use crate::security::pki::PkiMaterial;
use crate::session::context::{SessionContext, SessionId, StopReason};
use crate::timeouts::V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT;

/// The seam where the external EXI codec and TCP/TLS transport plug in
/// (`spec.md` §6): `recv`/`send` operate on already-decoded message enums,
/// never on raw bytes. `Res` is the full reply envelope a given protocol
/// needs to hand the codec — for ISO-20 that includes the namespace/payload
/// tag pair, for DIN/ISO-2 it's just the response body.
///
/// `recv` also hands back the session id carried by the message's V2G
/// wrapper, since DIN/ISO-2 bodies don't embed it the way ISO-20's
/// `MessageHeader` does — only `SessionSetup` consults it.
#[async_trait]
pub trait Transport<Req, Res>: Send {
    async fn recv(&mut self) -> Result<(SessionId, Req), SeccError>;
    async fn send(&mut self, response: Res) -> Result<(), SeccError>;
    fn peer_addr(&self) -> SocketAddr;
}

/// Runs one DIN SPEC 70121 session to completion and returns why it ended.
pub async fn run_din_session(transport: &mut dyn Transport<DinRequest, DinResponse>, evse: &dyn EvseController, known_session: Option<SessionId>) -> StopReason {
    let peer = transport.peer_addr();
    let mut ctx = SessionContext::new();
    let mut state = DinState::SessionSetup;
    let mut budget = V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT;

    loop {
        let (requested_session_id, inbound) = match tokio::time::timeout(budget, transport.recv()).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                warn!(?peer, ?err, "session ended on transport error");
                return StopReason { peer, normal: false, message: err.to_string() };
            }
            Err(_) => {
                warn!(?peer, "din session timed out waiting for next request");
                return StopReason { peer, normal: false, message: "sequence timeout".to_string() };
            }
        };

        let type_name = inbound.type_name();
        let outcome = process_din(state, &mut ctx, evse, inbound, known_session, requested_session_id).await;

        match outcome {
            Outcome::Reply { response, next_state, timeout } => {
                if let Err(err) = transport.send(response).await {
                    warn!(?peer, ?err, "failed to write din response");
                    return StopReason { peer, normal: false, message: err.to_string() };
                }
                if next_state == DinState::Terminate {
                    info!(?peer, "din session reached SessionStop");
                    return StopReason { peer, normal: true, message: "session stopped".to_string() };
                }
                state = next_state;
                budget = timeout;
            }
            Outcome::Remain => continue,
            Outcome::Abort { response } => {
                let _ = transport.send(response).await;
                warn!(?peer, message_type = type_name, "din session aborted");
                return StopReason { peer, normal: false, message: format!("aborted after {type_name}") };
            }
        }
    }
}

/// Runs one ISO 15118-2 session to completion and returns why it ended.
/// `is_tls` reflects whether the accepted connection was TLS-wrapped —
/// decided by the listener before the session starts — and gates whether
/// PnC is offered at all (`spec.md` §4.2: PnC requires TLS). `pki` is the
/// loaded PKI material `CertificateInstallation`/`PaymentDetails` need;
/// `None` for deployments that don't offer PnC at all.
pub async fn run_iso2_session(
    transport: &mut dyn Transport<Iso2Request, Iso2Response>,
    evse: &dyn EvseController,
    known_session: Option<SessionId>,
    is_tls: bool,
    pki: Option<&PkiMaterial>,
) -> StopReason {
    let peer = transport.peer_addr();
    let mut ctx = SessionContext::new();
    ctx.is_tls = is_tls;
    let mut state = Iso2State::SessionSetup;
    let mut budget = V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT;

    loop {
        let (requested_session_id, inbound) = match tokio::time::timeout(budget, transport.recv()).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                warn!(?peer, ?err, "session ended on transport error");
                return StopReason { peer, normal: false, message: err.to_string() };
            }
            Err(_) => {
                warn!(?peer, "iso-2 session timed out waiting for next request");
                return StopReason { peer, normal: false, message: "sequence timeout".to_string() };
            }
        };

        let type_name = inbound.type_name();
        let outcome = process_iso2(state, &mut ctx, evse, inbound, known_session, requested_session_id, pki).await;

        match outcome {
            Outcome::Reply { response, next_state, timeout } => {
                if let Err(err) = transport.send(response).await {
                    warn!(?peer, ?err, "failed to write iso-2 response");
                    return StopReason { peer, normal: false, message: err.to_string() };
                }
                if next_state == Iso2State::Terminate {
                    info!(?peer, "iso-2 session reached SessionStop");
                    return StopReason { peer, normal: true, message: "session stopped".to_string() };
                }
                state = next_state;
                budget = timeout;
            }
            Outcome::Remain => continue,
            Outcome::Abort { response } => {
                let _ = transport.send(response).await;
                warn!(?peer, message_type = type_name, "iso-2 session aborted");
                return StopReason { peer, normal: false, message: format!("aborted after {type_name}") };
            }
        }
    }
}

/// Runs one ISO 15118-20 session (AC-loop scope only) and returns why it
/// ended. Every reply is tagged with a namespace/payload-type pair so the
/// external codec knows which XSD to encode against. `is_tls` gates PnC the
/// same way it does for ISO 15118-2.
pub async fn run_iso20_session(transport: &mut dyn Transport<Iso20Request, (Iso20Response, Namespace, ISOV20PayloadTypes)>, evse: &dyn EvseController, known_session: Option<SessionId>, is_tls: bool) -> StopReason {
    let peer = transport.peer_addr();
    let mut ctx = SessionContext::new();
    ctx.is_tls = is_tls;
    let mut state = Iso20State::SessionSetup;
    let mut budget = V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT;

    loop {
        let (_envelope_session_id, inbound) = match tokio::time::timeout(budget, transport.recv()).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                warn!(?peer, ?err, "session ended on transport error");
                return StopReason { peer, normal: false, message: err.to_string() };
            }
            Err(_) => {
                warn!(?peer, "iso-20 session timed out waiting for next request");
                return StopReason { peer, normal: false, message: "sequence timeout".to_string() };
            }
        };

        let type_name = inbound.type_name();
        let outcome = process_iso20(state, &mut ctx, evse, inbound, known_session).await;

        match outcome {
            Outcome::Reply { response, next_state, timeout } => {
                let envelope = envelope_for(&response);
                if let Err(err) = transport.send((response, envelope.0, envelope.1)).await {
                    warn!(?peer, ?err, "failed to write iso-20 response");
                    return StopReason { peer, normal: false, message: err.to_string() };
                }
                if next_state == Iso20State::Terminate {
                    info!(?peer, "iso-20 session reached SessionStop");
                    return StopReason { peer, normal: true, message: "session stopped".to_string() };
                }
                state = next_state;
                budget = timeout;
            }
            Outcome::Remain => continue,
            Outcome::Abort { response } => {
                let envelope = envelope_for(&response);
                let _ = transport.send((response, envelope.0, envelope.1)).await;
                warn!(?peer, message_type = type_name, "iso-20 session aborted");
                return StopReason { peer, normal: false, message: format!("aborted after {type_name}") };
            }
        }
    }
}

/// Maps an outbound ISO-20 response to the namespace/payload tag pair the
/// codec needs to encode it — AC messages route through the AC namespace,
/// everything else (common envelope messages) through CommonMessages.
fn envelope_for(response: &Iso20Response) -> (Namespace, ISOV20PayloadTypes) {
    match response {
        Iso20Response::SessionSetup(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::SessionSetupRes),
        Iso20Response::AuthorizationSetup(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::AuthorizationSetupRes),
        Iso20Response::Authorization(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::AuthorizationRes),
        Iso20Response::ServiceDiscovery(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::ServiceDiscoveryRes),
        Iso20Response::ServiceDetail(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::ServiceDetailRes),
        Iso20Response::ServiceSelection(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::ServiceSelectionRes),
        Iso20Response::ScheduleExchange(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::ScheduleExchangeRes),
        Iso20Response::AcChargeParameterDiscovery(_) => (Namespace::Ac, ISOV20PayloadTypes::AcChargeParameterDiscoveryRes),
        Iso20Response::DcChargeParameterDiscovery(_) => (Namespace::Dc, ISOV20PayloadTypes::DcChargeParameterDiscoveryRes),
        Iso20Response::PowerDelivery(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::PowerDeliveryRes),
        Iso20Response::AcChargeLoop(_) => (Namespace::Ac, ISOV20PayloadTypes::AcChargeLoopRes),
        Iso20Response::MeteringConfirmation(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::MeteringConfirmationRes),
        Iso20Response::SessionStop(_) => (Namespace::CommonMessages, ISOV20PayloadTypes::SessionStopRes),
    }
}
