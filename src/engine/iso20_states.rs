//! ISO 15118-20 state table (`spec.md` §4.4, §9): common envelope plus the
//! AC-loop sequence only. DC charge loop and WPT/ACDP flows are a Non-goal;
//! `DcChargeParameterDiscovery` is still answered so the catalog matches
//! `failed_responses.py`'s registry, but `PowerDelivery` after a DC
//! selection has nowhere further to go and proceeds straight to
//! `SessionStop`.

use std::time::Duration;

use crate::common::enums::{AuthOption, AuthorizationStatus, ChargeProgress, EnergyTransferMode, EvseProcessing};
use crate::evse_controller::EvseController;
use crate::failed_responses::ISO20_FAILED_RESPONSES;
use crate::iso20::ac_charge_loop::AcChargeLoopRequest;
use crate::iso20::authorization::{AuthorizationRequest, AuthorizationResponse};
use crate::iso20::authorization_setup::AuthorizationSetupResponse;
use crate::iso20::header::MessageHeader;
use crate::iso20::message::{Iso20Request, Iso20Response};
use crate::iso20::metering_confirmation::MeteringConfirmationRequest;
use crate::iso20::power_delivery::PowerDeliveryRequest;
use crate::iso20::schedule_exchange::ScheduleExchangeResponse;
use crate::iso20::service_detail::ServiceDetailResponse;
use crate::iso20::service_discovery::ServiceDiscoveryResponse;
use crate::iso20::service_selection::{ServiceSelectionRequest, ServiceSelectionResponse};
use crate::iso20::session_setup::SessionSetupResponse;
use crate::response_code::ResponseCode;
use crate::security::signature::{verify_signature, SignatureElement};
use crate::session::context::{SessionContext, SessionId};
use crate::timeouts::sequence_timeout_for;

use super::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso20State {
    SessionSetup,
    AuthorizationSetup,
    Authorization,
    ServiceDiscovery,
    ServiceDetail,
    ServiceSelection,
    ScheduleExchange,
    ChargeParameterDiscovery,
    PowerDelivery,
    AcChargeLoop,
    MeteringConfirmation,
    SessionStop,
    Terminate,
}

fn header(ctx: &SessionContext) -> MessageHeader {
    MessageHeader::new(ctx.session_id, chrono::Utc::now().timestamp() as u64)
}

fn sequence_error(inbound_type: &str) -> Iso20Response {
    let (mut response, _ns, _ty) = ISO20_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, ResponseCode::FailedSequenceError);
    response
}

fn abort_with(inbound_type: &str, code: ResponseCode) -> Iso20Response {
    let (mut response, _ns, _ty) = ISO20_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, code);
    response
}

fn set_response_code(response: &mut Iso20Response, code: ResponseCode) {
    match response {
        Iso20Response::SessionSetup(r) => r.response_code = code,
        Iso20Response::AuthorizationSetup(r) => r.response_code = code,
        Iso20Response::Authorization(r) => r.response_code = code,
        Iso20Response::ServiceDiscovery(r) => r.response_code = code,
        Iso20Response::ServiceDetail(r) => r.response_code = code,
        Iso20Response::ServiceSelection(r) => r.response_code = code,
        Iso20Response::ScheduleExchange(r) => r.response_code = code,
        Iso20Response::AcChargeParameterDiscovery(r) => r.response_code = code,
        Iso20Response::DcChargeParameterDiscovery(r) => r.response_code = code,
        Iso20Response::PowerDelivery(r) => r.response_code = code,
        Iso20Response::AcChargeLoop(r) => r.response_code = code,
        Iso20Response::MeteringConfirmation(r) => r.response_code = code,
        Iso20Response::SessionStop(r) => r.response_code = code,
    }
}

pub async fn process_iso20(state: Iso20State, ctx: &mut SessionContext, evse: &dyn EvseController, inbound: Iso20Request, known_session: Option<SessionId>) -> Outcome<Iso20Response, Iso20State> {
    match state {
        Iso20State::SessionSetup => match inbound {
            Iso20Request::SessionSetup(req) => {
                ctx.evcc_id = Some(req.evcc_id);
                let is_new = ctx.resolve_session_id(req.header.session_id, known_session);
                let response = SessionSetupResponse { header: header(ctx), response_code: if is_new { ResponseCode::OkNewSessionEstablished } else { ResponseCode::OkOldSessionJoined }, evse_id: evse.get_evse_id().await };
                Outcome::Reply { response: Iso20Response::SessionSetup(response), next_state: Iso20State::AuthorizationSetup, timeout: sequence_timeout_for("AuthorizationSetupReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::AuthorizationSetup => match inbound {
            Iso20Request::AuthorizationSetup(_) => {
                let mut auth_services = vec![AuthOption::Eim];
                if ctx.is_tls {
                    auth_services.push(AuthOption::Pnc);
                }
                ctx.offered_auth_options = auth_services.clone();
                let response = AuthorizationSetupResponse { header: header(ctx), response_code: ResponseCode::Ok, auth_services, eim_as_fallback: true };
                Outcome::Reply { response: Iso20Response::AuthorizationSetup(response), next_state: Iso20State::Authorization, timeout: sequence_timeout_for("AuthorizationReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::Authorization => match inbound {
            Iso20Request::Authorization(req) => handle_authorization(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::ServiceDiscovery => match inbound {
            Iso20Request::ServiceDiscovery(_) => {
                let modes = evse.get_supported_energy_transfer_modes().await;
                let energy_services = modes
                    .into_iter()
                    .map(|mode| crate::common::service::OfferedService {
                        service_details: crate::common::service::ServiceDetails {
                            service_id: crate::common::service::ServiceId::Charging,
                            service_name: Some(mode.to_string()),
                            service_category: crate::common::service::ServiceCategory::Charging,
                            service_scope: None,
                        },
                        free_service: true,
                    })
                    .collect();
                let response = ServiceDiscoveryResponse { header: header(ctx), response_code: ResponseCode::Ok, service_renegotiation_supported: true, energy_transfer_service_list: energy_services, va_service_list: Vec::new() };
                Outcome::Reply { response: Iso20Response::ServiceDiscovery(response), next_state: Iso20State::ServiceDetail, timeout: sequence_timeout_for("ServiceDetailReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::ServiceDetail => match inbound {
            Iso20Request::ServiceDetail(req) => {
                let response = ServiceDetailResponse { header: header(ctx), response_code: ResponseCode::Ok, service_id: req.service_id, service_parameter_list: None };
                Outcome::Reply { response: Iso20Response::ServiceDetail(response), next_state: Iso20State::ServiceSelection, timeout: sequence_timeout_for("ServiceSelectionReq") }
            }
            Iso20Request::ServiceSelection(req) => handle_service_selection(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::ServiceSelection => match inbound {
            Iso20Request::ServiceSelection(req) => handle_service_selection(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::ScheduleExchange => match inbound {
            Iso20Request::ScheduleExchange(req) => {
                let departure = req.departure_time.map(|ts| chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_else(chrono::Utc::now));
                let schedules = evse.get_sa_schedule_list(3, departure).await;
                let (processing, entries) = if schedules.is_empty() {
                    (EvseProcessing::Ongoing, Vec::new())
                } else {
                    ctx.offered_schedules = schedules.clone();
                    (EvseProcessing::Finished, schedules.iter().flat_map(|s| s.p_max_schedule.entries.iter().map(|e| e.p_max)).collect())
                };
                let response = ScheduleExchangeResponse { header: header(ctx), response_code: ResponseCode::Ok, evse_processing: processing, power_schedule_entries: entries };
                let next = if processing == EvseProcessing::Finished { Iso20State::ChargeParameterDiscovery } else { Iso20State::ScheduleExchange };
                Outcome::Reply { response: Iso20Response::ScheduleExchange(response), next_state: next, timeout: sequence_timeout_for("ScheduleExchangeReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::ChargeParameterDiscovery => match inbound {
            Iso20Request::AcChargeParameterDiscovery(req) => {
                ctx.selected_energy_mode = Some(EnergyTransferMode::AcThreePhaseCore);
                let evse_param = evse.get_ac_evse_charge_parameter().await;
                let response = crate::iso20::charge_parameter_discovery::AcChargeParameterDiscoveryResponse {
                    header: header(ctx),
                    response_code: ResponseCode::Ok,
                    evse_max_charge_power: evse_param.evse_max_current,
                };
                let _ = req.ev_max_charge_power;
                Outcome::Reply { response: Iso20Response::AcChargeParameterDiscovery(response), next_state: Iso20State::PowerDelivery, timeout: sequence_timeout_for("PowerDeliveryReq") }
            }
            Iso20Request::DcChargeParameterDiscovery(req) => {
                ctx.selected_energy_mode = Some(EnergyTransferMode::DcExtended);
                let evse_param = evse.get_dc_evse_charge_parameter().await;
                let response = crate::iso20::charge_parameter_discovery::DcChargeParameterDiscoveryResponse {
                    header: header(ctx),
                    response_code: ResponseCode::Ok,
                    evse_max_charge_power: evse_param.evse_maximum_power_limit,
                    evse_max_charge_current: evse_param.evse_maximum_current_limit,
                };
                let _ = req.ev_max_charge_current;
                Outcome::Reply { response: Iso20Response::DcChargeParameterDiscovery(response), next_state: Iso20State::PowerDelivery, timeout: sequence_timeout_for("PowerDeliveryReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::PowerDelivery => match inbound {
            Iso20Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::AcChargeLoop => match inbound {
            Iso20Request::AcChargeLoop(req) => handle_ac_charge_loop(ctx, evse, req).await,
            Iso20Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            Iso20Request::MeteringConfirmation(req) => handle_metering_confirmation(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::MeteringConfirmation => match inbound {
            Iso20Request::MeteringConfirmation(req) => handle_metering_confirmation(ctx, req),
            Iso20Request::AcChargeLoop(req) => handle_ac_charge_loop(ctx, evse, req).await,
            Iso20Request::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::SessionStop => match inbound {
            Iso20Request::SessionStop(_) => {
                ctx.charge_progress_started = false;
                let response = crate::iso20::session_stop::SessionStopResponse { header: header(ctx), response_code: ResponseCode::Ok };
                Outcome::Reply { response: Iso20Response::SessionStop(response), next_state: Iso20State::Terminate, timeout: Duration::from_secs(0) }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        Iso20State::Terminate => Outcome::Abort { response: sequence_error(inbound.type_name()) },
    }
}

async fn handle_authorization(ctx: &mut SessionContext, evse: &dyn EvseController, req: AuthorizationRequest) -> Outcome<Iso20Response, Iso20State> {
    if !ctx.offered_auth_options.contains(&req.selected_authorization_service) {
        return Outcome::Abort { response: abort_with("Authorization", ResponseCode::FailedPaymentSelectionInvalid) };
    }
    ctx.selected_auth_option = Some(req.selected_authorization_service);

    if ctx.selected_auth_option == Some(AuthOption::Pnc) {
        let (Some(id), Some(signature), Some(leaf)) = (req.id.as_ref(), req.signature.as_ref(), ctx.contract_leaf_cert.as_ref()) else {
            return Outcome::Abort { response: abort_with("Authorization", ResponseCode::FailedChallengeInvalid) };
        };
        let elements = [SignatureElement::new(id, id.as_bytes())];
        if verify_signature(signature, &elements, leaf, None).is_err() {
            return Outcome::Abort { response: abort_with("Authorization", ResponseCode::FailedSignatureError) };
        }
    }

    match evse.is_authorised().await {
        AuthorizationStatus::Ongoing => {
            let response = AuthorizationResponse { header: header(ctx), response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Ongoing };
            Outcome::Reply { response: Iso20Response::Authorization(response), next_state: Iso20State::Authorization, timeout: sequence_timeout_for("AuthorizationReq") }
        }
        AuthorizationStatus::Accepted => {
            let response = AuthorizationResponse { header: header(ctx), response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Finished };
            Outcome::Reply { response: Iso20Response::Authorization(response), next_state: Iso20State::ServiceDiscovery, timeout: sequence_timeout_for("ServiceDiscoveryReq") }
        }
        AuthorizationStatus::Rejected => {
            let code = if ctx.selected_auth_option == Some(AuthOption::Pnc) { ResponseCode::FailedCertificateRevoked } else { ResponseCode::Failed };
            Outcome::Abort { response: abort_with("Authorization", code) }
        }
    }
}

fn handle_service_selection(ctx: &mut SessionContext, req: ServiceSelectionRequest) -> Outcome<Iso20Response, Iso20State> {
    ctx.selected_energy_mode = Some(req.selected_energy_transfer_service);
    let response = ServiceSelectionResponse { header: header(ctx), response_code: ResponseCode::Ok };
    Outcome::Reply { response: Iso20Response::ServiceSelection(response), next_state: Iso20State::ScheduleExchange, timeout: sequence_timeout_for("ScheduleExchangeReq") }
}

async fn handle_power_delivery(ctx: &mut SessionContext, evse: &dyn EvseController, req: PowerDeliveryRequest) -> Outcome<Iso20Response, Iso20State> {
    match req.charge_progress {
        ChargeProgress::Start => {
            ctx.charge_progress_started = true;
            ctx.charge_progress = Some(ChargeProgress::Start);
            evse.set_hlc_charging(true).await;
            let response = crate::iso20::power_delivery::PowerDeliveryResponse { header: header(ctx), response_code: ResponseCode::Ok };
            let is_ac = ctx.selected_energy_mode.map(|m| !m.is_dc()).unwrap_or(true);
            let next = if is_ac { Iso20State::AcChargeLoop } else { Iso20State::SessionStop };
            Outcome::Reply { response: Iso20Response::PowerDelivery(response), next_state: next, timeout: sequence_timeout_for(if is_ac { "AcChargeLoopReq" } else { "SessionStopReq" }) }
        }
        ChargeProgress::Stop => {
            ctx.charge_progress = Some(ChargeProgress::Stop);
            evse.set_hlc_charging(false).await;
            let response = crate::iso20::power_delivery::PowerDeliveryResponse { header: header(ctx), response_code: ResponseCode::Ok };
            Outcome::Reply { response: Iso20Response::PowerDelivery(response), next_state: Iso20State::SessionStop, timeout: sequence_timeout_for("SessionStopReq") }
        }
        ChargeProgress::Renegotiate => Outcome::Abort { response: abort_with("PowerDelivery", ResponseCode::Failed) },
    }
}

async fn handle_ac_charge_loop(ctx: &mut SessionContext, evse: &dyn EvseController, req: AcChargeLoopRequest) -> Outcome<Iso20Response, Iso20State> {
    let _ = req.ev_present_active_power;
    let present = evse.get_ac_evse_charge_parameter().await;
    let response = crate::iso20::ac_charge_loop::AcChargeLoopResponse { header: header(ctx), response_code: ResponseCode::Ok, evse_present_active_power: present.evse_max_current };
    let receipt_required = ctx.selected_auth_option == Some(AuthOption::Pnc);
    let next = if receipt_required { Iso20State::MeteringConfirmation } else { Iso20State::AcChargeLoop };
    Outcome::Reply { response: Iso20Response::AcChargeLoop(response), next_state: next, timeout: sequence_timeout_for("AcChargeLoopReq") }
}

fn handle_metering_confirmation(ctx: &mut SessionContext, req: MeteringConfirmationRequest) -> Outcome<Iso20Response, Iso20State> {
    if ctx.selected_auth_option == Some(AuthOption::Pnc) {
        let (Some(signature), Some(leaf)) = (req.signature.as_ref(), ctx.contract_leaf_cert.as_ref()) else {
            return Outcome::Abort { response: abort_with("MeteringConfirmation", ResponseCode::FailedSignatureError) };
        };
        let elements = [SignatureElement::new("meterInfo", req.meter_info.meter_id.as_bytes())];
        if verify_signature(signature, &elements, leaf, None).is_err() {
            return Outcome::Abort { response: abort_with("MeteringConfirmation", ResponseCode::FailedSignatureError) };
        }
    }
    ctx.sent_meter_info = Some(req.meter_info);
    let response = crate::iso20::metering_confirmation::MeteringConfirmationResponse { header: header(ctx), response_code: ResponseCode::Ok };
    Outcome::Reply { response: Iso20Response::MeteringConfirmation(response), next_state: Iso20State::AcChargeLoop, timeout: sequence_timeout_for("AcChargeLoopReq") }
}
