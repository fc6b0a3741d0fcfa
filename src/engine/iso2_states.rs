//! ISO 15118-2 state table (`spec.md` §4.4).

use std::time::Duration;

use chrono::Utc;

use crate::common::certificate::{DhPublicKey, Emaid, EncryptedPrivateKey};
use crate::common::enums::{AuthOption, AuthorizationStatus, ChargeProgress, EnergyTransferMode, EvseProcessing, IsolationLevel};
use crate::common::service::{OfferedService, ServiceCategory, ServiceDetails, ServiceId};
use crate::evse_controller::EvseController;
use crate::failed_responses::ISO2_FAILED_RESPONSES;
use crate::iso2::authorization::{AuthorizationRequest, AuthorizationResponse};
use crate::iso2::cable_check::CableCheckResponse;
use crate::iso2::certificate_installation::CertificateInstallationResponse;
use crate::iso2::charge_parameter_discovery::ChargeParameterDiscoveryResponse;
use crate::iso2::charging_status::ChargingStatusResponse;
use crate::iso2::current_demand::{CurrentDemandRequest, CurrentDemandResponse};
use crate::iso2::message::{Iso2Request, Iso2Response};
use crate::iso2::metering_receipt::{MeteringReceiptRequest, MeteringReceiptResponse};
use crate::iso2::payment_details::PaymentDetailsResponse;
use crate::iso2::payment_service_selection::{PaymentServiceSelectionRequest, PaymentServiceSelectionResponse};
use crate::iso2::power_delivery::{PowerDeliveryRequest, PowerDeliveryResponse};
use crate::iso2::pre_charge::PreChargeResponse;
use crate::iso2::service_detail::ServiceDetailResponse;
use crate::iso2::service_discovery::{ChargeService, ServiceDiscoveryResponse};
use crate::iso2::session_setup::SessionSetupResponse;
use crate::iso2::session_stop::SessionStopResponse;
use crate::iso2::welding_detection::WeldingDetectionResponse;
use crate::response_code::ResponseCode;
use crate::security::certs::{chain_to_wire, verify_certs, CertVerifyError, NoRevocationCheck};
use crate::security::key_exchange::encrypt_priv_key;
use crate::security::pki::PkiMaterial;
use crate::security::signature::{create_signature, verify_signature, SignatureElement};
use crate::session::context::{SessionContext, SessionId};
use crate::timeouts::sequence_timeout_for;

use super::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso2State {
    SessionSetup,
    ServiceDiscovery,
    ServiceDetail,
    PaymentServiceSelection,
    CertificateInstallation,
    PaymentDetails,
    Authorization,
    ChargeParameterDiscovery,
    PowerDelivery,
    ChargingStatus,
    CurrentDemand,
    MeteringReceipt,
    CableCheck,
    PreCharge,
    WeldingDetection,
    SessionStop,
    Terminate,
}

fn sequence_error(inbound_type: &str) -> Iso2Response {
    let mut response = ISO2_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, ResponseCode::FailedSequenceError);
    response
}

fn abort_with(inbound_type: &str, code: ResponseCode) -> Iso2Response {
    let mut response = ISO2_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, code);
    response
}

fn set_response_code(response: &mut Iso2Response, code: ResponseCode) {
    match response {
        Iso2Response::SessionSetup(r) => r.response_code = code,
        Iso2Response::ServiceDiscovery(r) => r.response_code = code,
        Iso2Response::ServiceDetail(r) => r.response_code = code,
        Iso2Response::PaymentServiceSelection(r) => r.response_code = code,
        Iso2Response::CertificateInstallation(r) => r.response_code = code,
        Iso2Response::PaymentDetails(r) => r.response_code = code,
        Iso2Response::Authorization(r) => r.response_code = code,
        Iso2Response::ChargeParameterDiscovery(r) => r.response_code = code,
        Iso2Response::PowerDelivery(r) => r.response_code = code,
        Iso2Response::ChargingStatus(r) => r.response_code = code,
        Iso2Response::CurrentDemand(r) => r.response_code = code,
        Iso2Response::MeteringReceipt(r) => r.response_code = code,
        Iso2Response::CableCheck(r) => r.response_code = code,
        Iso2Response::PreCharge(r) => r.response_code = code,
        Iso2Response::WeldingDetection(r) => r.response_code = code,
        Iso2Response::SessionStop(r) => r.response_code = code,
    }
}

/// Drives one `process_message` step of the ISO 15118-2 state machine.
/// `requested_session_id` is the session id carried by the transport-level
/// envelope (only consulted in `SessionSetup`; every other state's envelope
/// id is expected to equal `ctx.session_id` and is checked by the session
/// handler before this function runs). `pki` is `None` for deployments that
/// don't offer PnC; `CertificateInstallation`/`PaymentDetails` abort with
/// `FAILED_NoCertificateAvailable` if a PnC session reaches them anyway.
pub async fn process_iso2(
    state: Iso2State,
    ctx: &mut SessionContext,
    evse: &dyn EvseController,
    inbound: Iso2Request,
    known_session: Option<SessionId>,
    requested_session_id: SessionId,
    pki: Option<&PkiMaterial>,
) -> Outcome<Iso2Response, Iso2State> {
    match state {
        Iso2State::SessionSetup => match inbound {
            Iso2Request::SessionSetup(req) => {
                ctx.evcc_id = Some(req.evcc_id);
                let is_new = ctx.resolve_session_id(requested_session_id, known_session);
                let response = SessionSetupResponse {
                    response_code: if is_new { ResponseCode::OkNewSessionEstablished } else { ResponseCode::OkOldSessionJoined },
                    evse_id: evse.get_evse_id().await,
                    evse_timestamp: Utc::now().timestamp(),
                };
                Outcome::Reply { response: Iso2Response::SessionSetup(response), next_state: Iso2State::ServiceDiscovery, timeout: sequence_timeout_for("ServiceDiscoveryReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::ServiceDiscovery => match inbound {
            Iso2Request::ServiceDiscovery(_) => {
                ctx.mark_visited("ServiceDiscovery");
                let auth_options = offer_auth_options(ctx);
                let modes = evse.get_supported_energy_transfer_modes().await;
                let offered_services = offer_value_added_services(ctx);
                let response = ServiceDiscoveryResponse {
                    response_code: ResponseCode::Ok,
                    payment_option_list: auth_options,
                    charge_service: ChargeService {
                        service_details: ServiceDetails { service_id: ServiceId::Charging, service_name: None, service_category: ServiceCategory::Charging, service_scope: None },
                        free_service: true,
                        energy_transfer_mode_list: crate::common::service::EnergyTransferModeList { energy_modes: modes },
                    },
                    service_list: offered_services,
                };
                Outcome::Reply { response: Iso2Response::ServiceDiscovery(response), next_state: Iso2State::ServiceDiscovery, timeout: sequence_timeout_for("ServiceDetailReq") }
            }
            Iso2Request::ServiceDetail(req) if ctx.has_visited("ServiceDiscovery") => {
                let response = service_detail_response(ctx, req.service_id);
                Outcome::Reply { response: Iso2Response::ServiceDetail(response), next_state: Iso2State::ServiceDetail, timeout: sequence_timeout_for("ServiceDetailReq") }
            }
            Iso2Request::PaymentServiceSelection(req) if ctx.has_visited("ServiceDiscovery") => handle_payment_service_selection(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::ServiceDetail => match inbound {
            Iso2Request::ServiceDetail(req) => {
                let response = service_detail_response(ctx, req.service_id);
                Outcome::Reply { response: Iso2Response::ServiceDetail(response), next_state: Iso2State::ServiceDetail, timeout: sequence_timeout_for("ServiceDetailReq") }
            }
            Iso2Request::PaymentServiceSelection(req) => handle_payment_service_selection(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::PaymentServiceSelection => match inbound {
            Iso2Request::PaymentServiceSelection(req) => handle_payment_service_selection(ctx, req),
            Iso2Request::CertificateInstallation(req) => {
                if ctx.selected_auth_option != Some(AuthOption::Pnc) {
                    return Outcome::Abort { response: sequence_error("CertificateInstallation") };
                }
                match verify_signature(
                    &req.signature,
                    &[SignatureElement::new(&req.id, req.id.as_bytes())],
                    &leaf_from_chain(&req.oem_provisioning_cert_chain),
                    None,
                ) {
                    Ok(()) => {}
                    Err(_) => return Outcome::Abort { response: abort_with("CertificateInstallation", ResponseCode::FailedSignatureError) },
                }
                let Some(pki) = pki else {
                    return Outcome::Abort { response: abort_with("CertificateInstallation", ResponseCode::FailedNoCertificateAvailable) };
                };
                let (dh_public, encrypted_key) = match encrypt_priv_key(&req.oem_provisioning_cert_chain.certificate, &pki.contract_private_key) {
                    Ok(pair) => pair,
                    Err(_) => return Outcome::Abort { response: abort_with("CertificateInstallation", ResponseCode::Failed) },
                };
                let dh_public_key = DhPublicKey { id: "id2".to_string(), value: dh_public };
                let encrypted_private_key = EncryptedPrivateKey { id: "id1".to_string(), value: encrypted_key };
                let emaid = Emaid { value: pki.contract_leaf().subject_cn.clone() };
                let contract_cert_chain = chain_to_wire(pki.contract_leaf(), pki.contract_sub_cas());
                let elements = [
                    SignatureElement::new(&encrypted_private_key.id, &encrypted_private_key.value),
                    SignatureElement::new(&dh_public_key.id, &dh_public_key.value),
                    SignatureElement::new("emaid", emaid.value.as_bytes()),
                    SignatureElement::new("contractSignatureCertChain", &contract_cert_chain.certificate),
                ];
                let signature = match create_signature(&elements, &pki.cps_signing_key) {
                    Ok(sig) => sig,
                    Err(_) => return Outcome::Abort { response: abort_with("CertificateInstallation", ResponseCode::Failed) },
                };
                ctx.contract_sub_cas = pki.contract_sub_cas().to_vec();
                let response = CertificateInstallationResponse {
                    response_code: ResponseCode::Ok,
                    contract_signature_cert_chain: contract_cert_chain,
                    sa_provisioning_cert_chain: chain_to_wire(&pki.cps_leaf, &[]),
                    contract_signature_encrypted_private_key: encrypted_private_key,
                    dh_public_key,
                    emaid,
                    id: "id3".to_string(),
                    signature,
                };
                Outcome::Reply { response: Iso2Response::CertificateInstallation(response), next_state: Iso2State::PaymentDetails, timeout: sequence_timeout_for("PaymentDetailsReq") }
            }
            Iso2Request::PaymentDetails(req) => {
                if ctx.selected_auth_option == Some(AuthOption::Pnc) && !ctx.is_tls {
                    return Outcome::Abort { response: abort_with("PaymentDetails", ResponseCode::Failed) };
                }
                if ctx.selected_auth_option == Some(AuthOption::Pnc) {
                    let Some(pki) = pki else {
                        return Outcome::Abort { response: abort_with("PaymentDetails", ResponseCode::FailedNoCertificateAvailable) };
                    };
                    if let Err(err) = verify_certs(pki.contract_leaf(), &ctx.contract_sub_cas, &pki.mo_root, Utc::now(), &NoRevocationCheck) {
                        return Outcome::Abort { response: abort_with("PaymentDetails", cert_verify_response_code(&err)) };
                    }
                    ctx.contract_leaf_cert = Some(pki.contract_leaf().clone());
                } else {
                    ctx.contract_leaf_cert = Some(leaf_from_chain(&req.contract_signature_cert_chain));
                }
                ctx.contract_cert_chain = Some(req.contract_signature_cert_chain);
                let mut challenge = [0u8; 16];
                rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut challenge);
                ctx.gen_challenge = Some(challenge);
                let response = PaymentDetailsResponse { response_code: ResponseCode::Ok, gen_challenge: challenge };
                Outcome::Reply { response: Iso2Response::PaymentDetails(response), next_state: Iso2State::Authorization, timeout: sequence_timeout_for("AuthorizationReq") }
            }
            Iso2Request::Authorization(req) if ctx.selected_auth_option == Some(AuthOption::Eim) => handle_authorization(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::Authorization => match inbound {
            Iso2Request::Authorization(req) => handle_authorization(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::ChargeParameterDiscovery => match inbound {
            Iso2Request::ChargeParameterDiscovery(req) => handle_charge_parameter_discovery(ctx, evse, req).await,
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::PowerDelivery => match inbound {
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            Iso2Request::ChargeParameterDiscovery(req) => handle_charge_parameter_discovery(ctx, evse, req).await,
            Iso2Request::ChargingStatus(_) => handle_charging_status(ctx, evse).await,
            Iso2Request::SessionStop(req) => handle_session_stop(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::ChargingStatus => match inbound {
            Iso2Request::ChargingStatus(_) => handle_charging_status(ctx, evse).await,
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            Iso2Request::MeteringReceipt(req) => handle_metering_receipt(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::CurrentDemand => match inbound {
            Iso2Request::CurrentDemand(req) => handle_current_demand(ctx, evse, req).await,
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::MeteringReceipt => match inbound {
            Iso2Request::MeteringReceipt(req) => handle_metering_receipt(ctx, req),
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            Iso2Request::ChargingStatus(_) => handle_charging_status(ctx, evse).await,
            Iso2Request::CurrentDemand(req) => handle_current_demand(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::CableCheck => match inbound {
            Iso2Request::CableCheck(_) => {
                let status = evse.get_dc_evse_status().await;
                let finished = status.evse_isolation_status == IsolationLevel::Valid;
                let response = CableCheckResponse { response_code: ResponseCode::Ok, dc_evse_status: status, evse_processing: if finished { EvseProcessing::Finished } else { EvseProcessing::Ongoing } };
                let next = if finished { Iso2State::PreCharge } else { Iso2State::CableCheck };
                Outcome::Reply { response: Iso2Response::CableCheck(response), next_state: next, timeout: sequence_timeout_for("CableCheckReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::PreCharge => match inbound {
            Iso2Request::PreCharge(_req) => {
                let present = evse.get_dc_present_voltage().await;
                let response = PreChargeResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await, evse_present_voltage: present };
                Outcome::Reply { response: Iso2Response::PreCharge(response), next_state: Iso2State::PreCharge, timeout: sequence_timeout_for("PreChargeReq") }
            }
            Iso2Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::WeldingDetection => match inbound {
            Iso2Request::WeldingDetection(_) => {
                let present = evse.get_dc_present_voltage().await;
                let response = WeldingDetectionResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await, evse_present_voltage: present };
                Outcome::Reply { response: Iso2Response::WeldingDetection(response), next_state: Iso2State::WeldingDetection, timeout: sequence_timeout_for("WeldingDetectionReq") }
            }
            Iso2Request::SessionStop(req) => handle_session_stop(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::SessionStop => match inbound {
            Iso2Request::SessionStop(req) => handle_session_stop(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso2State::Terminate => Outcome::Abort { response: sequence_error(inbound.type_name()) },
    }
}

fn offer_auth_options(ctx: &mut SessionContext) -> Vec<AuthOption> {
    if let Some(selected) = ctx.selected_auth_option {
        return vec![selected];
    }
    if !ctx.offered_auth_options.is_empty() {
        return ctx.offered_auth_options.clone();
    }
    let mut options = vec![AuthOption::Eim];
    if ctx.is_tls {
        options.push(AuthOption::Pnc);
    }
    ctx.offered_auth_options = options.clone();
    options
}

fn offer_value_added_services(ctx: &mut SessionContext) -> Vec<OfferedService> {
    if !ctx.is_tls {
        ctx.offered_services = Vec::new();
        return Vec::new();
    }
    let services = vec![OfferedService {
        service_details: ServiceDetails { service_id: ServiceId::Certificate, service_name: None, service_category: ServiceCategory::Certificate, service_scope: None },
        free_service: true,
    }];
    ctx.offered_services = services.clone();
    services
}

fn service_detail_response(ctx: &SessionContext, service_id: ServiceId) -> ServiceDetailResponse {
    let offered = ctx.offered_services.iter().any(|s| s.service_details.service_id == service_id);
    if !offered {
        return ServiceDetailResponse { response_code: ResponseCode::Failed, service_id, service_parameter_list: None };
    }
    let parameter_list = if service_id == ServiceId::Certificate { Some(vec![crate::common::service::ParameterSet::installation()]) } else { None };
    ServiceDetailResponse { response_code: ResponseCode::Ok, service_id, service_parameter_list: parameter_list }
}

fn handle_payment_service_selection(ctx: &mut SessionContext, req: PaymentServiceSelectionRequest) -> Outcome<Iso2Response, Iso2State> {
    if !ctx.offered_auth_options.contains(&req.selected_payment_option) {
        return Outcome::Abort { response: abort_with("PaymentServiceSelection", ResponseCode::FailedPaymentSelectionInvalid) };
    }
    if !req.selected_service_list.iter().any(|s| s.service_id == ServiceId::Charging) {
        return Outcome::Abort { response: abort_with("PaymentServiceSelection", ResponseCode::FailedNoChargeServiceSelected) };
    }
    let all_offered = req.selected_service_list.iter().filter(|s| s.service_id != ServiceId::Charging).all(|s| ctx.offered_services.iter().any(|o| o.service_details.service_id == s.service_id));
    if !all_offered {
        return Outcome::Abort { response: abort_with("PaymentServiceSelection", ResponseCode::FailedServiceSelectionInvalid) };
    }
    ctx.selected_auth_option = Some(req.selected_payment_option);
    let response = PaymentServiceSelectionResponse { response_code: ResponseCode::Ok };
    Outcome::Reply { response: Iso2Response::PaymentServiceSelection(response), next_state: Iso2State::PaymentServiceSelection, timeout: Duration::from_secs(2) }
}

async fn handle_authorization(ctx: &mut SessionContext, evse: &dyn EvseController, req: AuthorizationRequest) -> Outcome<Iso2Response, Iso2State> {
    if ctx.selected_auth_option == Some(AuthOption::Pnc) {
        let (Some(id), Some(signature), Some(challenge), Some(leaf)) = (req.id.as_ref(), req.signature.as_ref(), ctx.gen_challenge, ctx.contract_leaf_cert.as_ref()) else {
            return Outcome::Abort { response: abort_with("Authorization", ResponseCode::FailedChallengeInvalid) };
        };
        let elements = [SignatureElement::new(id, id.as_bytes()), SignatureElement::new("challenge", &challenge)];
        if verify_signature(signature, &elements, leaf, None).is_err() {
            return Outcome::Abort { response: abort_with("Authorization", ResponseCode::FailedSignatureError) };
        }
    }

    match evse.is_authorised().await {
        AuthorizationStatus::Ongoing => {
            let response = AuthorizationResponse { response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Ongoing };
            Outcome::Reply { response: Iso2Response::Authorization(response), next_state: Iso2State::Authorization, timeout: sequence_timeout_for("AuthorizationReq") }
        }
        AuthorizationStatus::Accepted => {
            let response = AuthorizationResponse { response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Finished };
            Outcome::Reply { response: Iso2Response::Authorization(response), next_state: Iso2State::ChargeParameterDiscovery, timeout: sequence_timeout_for("ChargeParameterDiscoveryReq") }
        }
        AuthorizationStatus::Rejected => {
            let code = if ctx.selected_auth_option == Some(AuthOption::Pnc) { ResponseCode::FailedCertificateRevoked } else { ResponseCode::Failed };
            Outcome::Abort { response: abort_with("Authorization", code) }
        }
    }
}

async fn handle_charge_parameter_discovery(ctx: &mut SessionContext, evse: &dyn EvseController, req: crate::iso2::charge_parameter_discovery::ChargeParameterDiscoveryRequest) -> Outcome<Iso2Response, Iso2State> {
    let supported = evse.get_supported_energy_transfer_modes().await;
    if !supported.contains(&req.requested_energy_transfer_mode) {
        return Outcome::Abort { response: abort_with("ChargeParameterDiscovery", ResponseCode::FailedWrongEnergyTransferMode) };
    }
    ctx.selected_energy_mode = Some(req.requested_energy_transfer_mode);

    let (ac_param, dc_param) =
        if req.requested_energy_transfer_mode.is_dc() { (None, Some(evse.get_dc_evse_charge_parameter().await)) } else { (Some(evse.get_ac_evse_charge_parameter().await), None) };

    let departure_time = req.ac_ev_charge_parameter.as_ref().and_then(|p| p.departure_time).or_else(|| req.dc_ev_charge_parameter.as_ref().and_then(|p| p.departure_time));
    let departure = departure_time.map(|ts| chrono::DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_else(Utc::now));
    let schedules = evse.get_sa_schedule_list(3, departure).await;

    let (processing, schedule_list) = if schedules.is_empty() {
        (EvseProcessing::Ongoing, None)
    } else {
        ctx.offered_schedules = schedules.clone();
        (EvseProcessing::Finished, Some(schedules))
    };

    let is_dc = req.requested_energy_transfer_mode.is_dc();
    let next = if processing == EvseProcessing::Finished && is_dc { Iso2State::CableCheck } else { Iso2State::ChargeParameterDiscovery };
    let next_timeout = sequence_timeout_for(if next == Iso2State::CableCheck { "CableCheckReq" } else { "ChargeParameterDiscoveryReq" });

    let response = ChargeParameterDiscoveryResponse { response_code: ResponseCode::Ok, evse_processing: processing, ac_evse_charge_parameter: ac_param, dc_evse_charge_parameter: dc_param, sa_schedule_list: schedule_list };
    Outcome::Reply { response: Iso2Response::ChargeParameterDiscovery(response), next_state: next, timeout: next_timeout }
}

async fn handle_power_delivery(ctx: &mut SessionContext, evse: &dyn EvseController, req: PowerDeliveryRequest) -> Outcome<Iso2Response, Iso2State> {
    match req.charge_progress {
        ChargeProgress::Start => {
            let has_profile = req.charging_profile.as_ref().map(|p| !p.is_empty()).unwrap_or(false);
            if !has_profile {
                return Outcome::Abort { response: abort_with("PowerDelivery", ResponseCode::FailedChargingProfileInvalid) };
            }
            if !ctx.offered_schedules.iter().any(|s| s.sa_schedule_tuple_id == req.sa_schedule_tuple_id) {
                return Outcome::Abort { response: abort_with("PowerDelivery", ResponseCode::FailedTariffSelectionInvalid) };
            }
            ctx.selected_schedule = Some(req.sa_schedule_tuple_id);
            ctx.charge_progress_started = true;
            ctx.charge_progress = Some(ChargeProgress::Start);
            evse.set_hlc_charging(true).await;
            let is_dc = ctx.selected_energy_mode.map(EnergyTransferMode::is_dc).unwrap_or(false);
            let response = PowerDeliveryResponse {
                response_code: ResponseCode::Ok,
                ac_evse_status: if is_dc { None } else { Some(evse.get_ac_evse_status().await) },
                dc_evse_status: if is_dc { Some(evse.get_dc_evse_status().await) } else { None },
            };
            let next = if is_dc { Iso2State::CurrentDemand } else { Iso2State::ChargingStatus };
            Outcome::Reply { response: Iso2Response::PowerDelivery(response), next_state: next, timeout: sequence_timeout_for(if is_dc { "CurrentDemandReq" } else { "ChargingStatusReq" }) }
        }
        ChargeProgress::Stop => {
            ctx.charge_progress = Some(ChargeProgress::Stop);
            evse.set_hlc_charging(false).await;
            let is_dc = ctx.selected_energy_mode.map(EnergyTransferMode::is_dc).unwrap_or(false);
            let response = PowerDeliveryResponse {
                response_code: ResponseCode::Ok,
                ac_evse_status: if is_dc { None } else { Some(evse.get_ac_evse_status().await) },
                dc_evse_status: if is_dc { Some(evse.get_dc_evse_status().await) } else { None },
            };
            let next = if is_dc { Iso2State::WeldingDetection } else { Iso2State::SessionStop };
            let timeout = sequence_timeout_for(if is_dc { "WeldingDetectionReq" } else { "SessionStopReq" });
            Outcome::Reply { response: Iso2Response::PowerDelivery(response), next_state: next, timeout }
        }
        ChargeProgress::Renegotiate => {
            if !ctx.charge_progress_started {
                return Outcome::Abort { response: abort_with("PowerDelivery", ResponseCode::Failed) };
            }
            ctx.charge_progress = Some(ChargeProgress::Renegotiate);
            let response = PowerDeliveryResponse { response_code: ResponseCode::Ok, ac_evse_status: None, dc_evse_status: None };
            Outcome::Reply { response: Iso2Response::PowerDelivery(response), next_state: Iso2State::ChargeParameterDiscovery, timeout: sequence_timeout_for("ChargeParameterDiscoveryReq") }
        }
    }
}

async fn handle_charging_status(ctx: &mut SessionContext, evse: &dyn EvseController) -> Outcome<Iso2Response, Iso2State> {
    let meter_info = evse.get_meter_info().await;
    let receipt_required = ctx.selected_auth_option == Some(AuthOption::Pnc);
    ctx.sent_meter_info = Some(meter_info.clone());
    let response = ChargingStatusResponse {
        response_code: ResponseCode::Ok,
        evse_id: evse.get_evse_id().await,
        sa_schedule_tuple_id: ctx.selected_schedule.unwrap_or(1),
        ac_evse_status: evse.get_ac_evse_status().await,
        meter_id: Some(meter_info.meter_id),
        meter_reading: meter_info.meter_reading,
        receipt_required,
    };
    let next = if receipt_required { Iso2State::MeteringReceipt } else { Iso2State::ChargingStatus };
    Outcome::Reply { response: Iso2Response::ChargingStatus(response), next_state: next, timeout: sequence_timeout_for("ChargingStatusReq") }
}

async fn handle_current_demand(_ctx: &mut SessionContext, evse: &dyn EvseController, req: CurrentDemandRequest) -> Outcome<Iso2Response, Iso2State> {
    let present_voltage = evse.get_dc_present_voltage().await;
    let present_current = evse.get_dc_present_current().await;
    let voltage_limit_achieved = req.ev_maximum_voltage_limit.map(|l| present_voltage.as_f64() >= l.as_f64()).unwrap_or(false);
    let current_limit_achieved = req.ev_maximum_current_limit.map(|l| present_current.as_f64() >= l.as_f64()).unwrap_or(false);
    let response = CurrentDemandResponse {
        response_code: ResponseCode::Ok,
        dc_evse_status: evse.get_dc_evse_status().await,
        evse_present_voltage: present_voltage,
        evse_present_current: present_current,
        evse_current_limit_achieved: current_limit_achieved,
        evse_voltage_limit_achieved: voltage_limit_achieved,
        evse_power_limit_achieved: false,
        evse_maximum_voltage_limit: req.ev_maximum_voltage_limit,
        evse_maximum_current_limit: req.ev_maximum_current_limit,
        evse_maximum_power_limit: req.ev_maximum_power_limit,
    };
    Outcome::Reply { response: Iso2Response::CurrentDemand(response), next_state: Iso2State::CurrentDemand, timeout: sequence_timeout_for("CurrentDemandReq") }
}

fn handle_metering_receipt(ctx: &mut SessionContext, req: MeteringReceiptRequest) -> Outcome<Iso2Response, Iso2State> {
    if let Some(last) = &ctx.sent_meter_info {
        if *last != req.meter_info {
            return Outcome::Abort { response: abort_with("MeteringReceipt", ResponseCode::FailedMeteringSignatureNotValid) };
        }
    }
    if ctx.selected_auth_option == Some(AuthOption::Pnc) {
        let (Some(signature), Some(leaf)) = (req.signature.as_ref(), ctx.contract_leaf_cert.as_ref()) else {
            return Outcome::Abort { response: abort_with("MeteringReceipt", ResponseCode::FailedSignatureError) };
        };
        let elements = [SignatureElement::new(&req.id, req.id.as_bytes())];
        if verify_signature(signature, &elements, leaf, None).is_err() {
            return Outcome::Abort { response: abort_with("MeteringReceipt", ResponseCode::FailedSignatureError) };
        }
    }
    let response = MeteringReceiptResponse { response_code: ResponseCode::Ok };
    let is_dc = ctx.selected_energy_mode.map(EnergyTransferMode::is_dc).unwrap_or(false);
    let next = if is_dc { Iso2State::CurrentDemand } else { Iso2State::ChargingStatus };
    Outcome::Reply { response: Iso2Response::MeteringReceipt(response), next_state: next, timeout: sequence_timeout_for(if is_dc { "CurrentDemandReq" } else { "ChargingStatusReq" }) }
}

fn handle_session_stop(ctx: &mut SessionContext, _req: crate::iso2::session_stop::SessionStopRequest) -> Outcome<Iso2Response, Iso2State> {
    ctx.charge_progress_started = false;
    let response = SessionStopResponse { response_code: ResponseCode::Ok };
    Outcome::Reply { response: Iso2Response::SessionStop(response), next_state: Iso2State::Terminate, timeout: Duration::from_secs(0) }
}

/// Maps a chain-verification failure to the `FAILED_*` code the registry
/// expects, per `spec.md` §4.2/§7. `ChainTooLong`/`BadSignature`/
/// `UntrustedRoot` all land on the same generic chain-error code since
/// `ResponseCode` has no finer-grained variants for them.
fn cert_verify_response_code(err: &CertVerifyError) -> ResponseCode {
    match err {
        CertVerifyError::Expired(_) => ResponseCode::FailedCertificateExpired,
        CertVerifyError::Revoked(_) => ResponseCode::FailedCertificateRevoked,
        CertVerifyError::ChainTooLong(_) | CertVerifyError::BadSignature(_) | CertVerifyError::UntrustedRoot(_) => ResponseCode::FailedCertChainError,
    }
}

fn leaf_from_chain(chain: &crate::common::certificate::CertificateChain) -> crate::security::certs::Certificate {
    crate::security::certs::Certificate {
        der: chain.certificate.clone(),
        subject_cn: String::new(),
        issuer_cn: String::new(),
        not_before: Utc::now() - chrono::Duration::days(1),
        not_after: Utc::now() + chrono::Duration::days(365),
        public_key: chain.certificate.clone(),
        signature: Vec::new(),
    }
}
