//! DIN SPEC 70121 state table (`spec.md` §4.4): EIM-only, DC-only, with
//! `ContractAuthentication` playing the role ISO 15118-2 splits into
//! `PaymentDetails` + `Authorization`.

use std::time::Duration;

use chrono::Utc;

use crate::common::enums::{AuthOption, AuthorizationStatus, ChargeProgress, EvseProcessing, IsolationLevel};
use crate::din::cable_check::CableCheckResponse;
use crate::din::charge_parameter_discovery::ChargeParameterDiscoveryResponse;
use crate::din::contract_authentication::ContractAuthenticationResponse;
use crate::din::current_demand::{CurrentDemandRequest, CurrentDemandResponse};
use crate::din::message::{DinRequest, DinResponse};
use crate::din::power_delivery::PowerDeliveryRequest;
use crate::din::pre_charge::PreChargeResponse;
use crate::din::service_discovery::{ChargeService, ServiceDiscoveryResponse};
use crate::din::service_payment_selection::{ServicePaymentSelectionRequest, ServicePaymentSelectionResponse};
use crate::din::session_setup::SessionSetupResponse;
use crate::din::welding_detection::WeldingDetectionResponse;
use crate::evse_controller::EvseController;
use crate::failed_responses::DIN_FAILED_RESPONSES;
use crate::response_code::ResponseCode;
use crate::session::context::{SessionContext, SessionId};
use crate::timeouts::sequence_timeout_for;

use super::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DinState {
    SessionSetup,
    ServiceDiscovery,
    ServicePaymentSelection,
    ContractAuthentication,
    ChargeParameterDiscovery,
    CableCheck,
    PreCharge,
    PowerDelivery,
    CurrentDemand,
    WeldingDetection,
    SessionStop,
    Terminate,
}

fn sequence_error(inbound_type: &str) -> DinResponse {
    let mut response = DIN_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, ResponseCode::FailedSequenceError);
    response
}

fn abort_with(inbound_type: &str, code: ResponseCode) -> DinResponse {
    let mut response = DIN_FAILED_RESPONSES.get(inbound_type).cloned().unwrap_or_else(|| panic!("failed-response registry missing entry for {inbound_type}"));
    set_response_code(&mut response, code);
    response
}

fn set_response_code(response: &mut DinResponse, code: ResponseCode) {
    match response {
        DinResponse::SessionSetup(r) => r.response_code = code,
        DinResponse::ServiceDiscovery(r) => r.response_code = code,
        DinResponse::ServicePaymentSelection(r) => r.response_code = code,
        DinResponse::ContractAuthentication(r) => r.response_code = code,
        DinResponse::ChargeParameterDiscovery(r) => r.response_code = code,
        DinResponse::CableCheck(r) => r.response_code = code,
        DinResponse::PreCharge(r) => r.response_code = code,
        DinResponse::PowerDelivery(r) => r.response_code = code,
        DinResponse::CurrentDemand(r) => r.response_code = code,
        DinResponse::WeldingDetection(r) => r.response_code = code,
        DinResponse::SessionStop(r) => r.response_code = code,
    }
}

pub async fn process_din(state: DinState, ctx: &mut SessionContext, evse: &dyn EvseController, inbound: DinRequest, known_session: Option<SessionId>, requested_session_id: SessionId) -> Outcome<DinResponse, DinState> {
    match state {
        DinState::SessionSetup => match inbound {
            DinRequest::SessionSetup(req) => {
                ctx.evcc_id = Some(req.evcc_id);
                let is_new = ctx.resolve_session_id(requested_session_id, known_session);
                let response = SessionSetupResponse {
                    response_code: if is_new { ResponseCode::OkNewSessionEstablished } else { ResponseCode::OkOldSessionJoined },
                    evse_id: evse.get_evse_id().await,
                    evse_timestamp: Utc::now().timestamp(),
                };
                Outcome::Reply { response: DinResponse::SessionSetup(response), next_state: DinState::ServiceDiscovery, timeout: sequence_timeout_for("ServiceDiscoveryReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::ServiceDiscovery => match inbound {
            DinRequest::ServiceDiscovery(_) => {
                ctx.offered_auth_options = vec![AuthOption::Eim];
                let response = ServiceDiscoveryResponse {
                    response_code: ResponseCode::Ok,
                    payment_option_list: vec![AuthOption::Eim],
                    charge_service: ChargeService {
                        service_id: 1,
                        free_service: true,
                        energy_transfer_mode_list: crate::common::service::EnergyTransferModeList { energy_modes: vec![crate::common::enums::EnergyTransferMode::DcExtended] },
                    },
                };
                Outcome::Reply { response: DinResponse::ServiceDiscovery(response), next_state: DinState::ServiceDiscovery, timeout: sequence_timeout_for("ServicePaymentSelectionReq") }
            }
            DinRequest::ServicePaymentSelection(req) => handle_service_payment_selection(ctx, req),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::ServicePaymentSelection => match inbound {
            DinRequest::ServicePaymentSelection(req) => handle_service_payment_selection(ctx, req),
            DinRequest::ContractAuthentication(_) => handle_contract_authentication(evse).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::ContractAuthentication => match inbound {
            DinRequest::ContractAuthentication(_) => handle_contract_authentication(evse).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::ChargeParameterDiscovery => match inbound {
            DinRequest::ChargeParameterDiscovery(req) => handle_charge_parameter_discovery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::CableCheck => match inbound {
            DinRequest::CableCheck(_) => {
                let status = evse.get_dc_evse_status().await;
                let finished = status.evse_isolation_status == IsolationLevel::Valid;
                let response = CableCheckResponse { response_code: ResponseCode::Ok, dc_evse_status: status, evse_processing: if finished { EvseProcessing::Finished } else { EvseProcessing::Ongoing } };
                let next = if finished { DinState::PreCharge } else { DinState::CableCheck };
                Outcome::Reply { response: DinResponse::CableCheck(response), next_state: next, timeout: sequence_timeout_for("CableCheckReq") }
            }
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::PreCharge => match inbound {
            DinRequest::PreCharge(_req) => {
                let present = evse.get_dc_present_voltage().await;
                let response = PreChargeResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await, evse_present_voltage: present };
                Outcome::Reply { response: DinResponse::PreCharge(response), next_state: DinState::PreCharge, timeout: sequence_timeout_for("PreChargeReq") }
            }
            DinRequest::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::PowerDelivery => match inbound {
            DinRequest::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::CurrentDemand => match inbound {
            DinRequest::CurrentDemand(req) => handle_current_demand(evse, req).await,
            DinRequest::PowerDelivery(req) => handle_power_delivery(ctx, evse, req).await,
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::WeldingDetection => match inbound {
            DinRequest::WeldingDetection(_) => {
                let present = evse.get_dc_present_voltage().await;
                let response = WeldingDetectionResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await, evse_present_voltage: present };
                Outcome::Reply { response: DinResponse::WeldingDetection(response), next_state: DinState::WeldingDetection, timeout: sequence_timeout_for("WeldingDetectionReq") }
            }
            DinRequest::SessionStop(_) => handle_session_stop(ctx),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::SessionStop => match inbound {
            DinRequest::SessionStop(_) => handle_session_stop(ctx),
            other => Outcome::Abort { response: sequence_error(other.type_name()) },
        },

        DinState::Terminate => Outcome::Abort { response: sequence_error(inbound.type_name()) },
    }
}

fn handle_service_payment_selection(ctx: &mut SessionContext, req: ServicePaymentSelectionRequest) -> Outcome<DinResponse, DinState> {
    if req.selected_payment_option != AuthOption::Eim {
        return Outcome::Abort { response: abort_with("ServicePaymentSelection", ResponseCode::FailedPaymentSelectionInvalid) };
    }
    if !req.selected_service_list.contains(&1) {
        return Outcome::Abort { response: abort_with("ServicePaymentSelection", ResponseCode::FailedNoChargeServiceSelected) };
    }
    ctx.selected_auth_option = Some(AuthOption::Eim);
    let response = ServicePaymentSelectionResponse { response_code: ResponseCode::Ok };
    Outcome::Reply { response: DinResponse::ServicePaymentSelection(response), next_state: DinState::ServicePaymentSelection, timeout: sequence_timeout_for("ContractAuthenticationReq") }
}

async fn handle_contract_authentication(evse: &dyn EvseController) -> Outcome<DinResponse, DinState> {
    match evse.is_authorised().await {
        AuthorizationStatus::Ongoing => {
            let response = ContractAuthenticationResponse { response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Ongoing };
            Outcome::Reply { response: DinResponse::ContractAuthentication(response), next_state: DinState::ContractAuthentication, timeout: sequence_timeout_for("ContractAuthenticationReq") }
        }
        AuthorizationStatus::Accepted => {
            let response = ContractAuthenticationResponse { response_code: ResponseCode::Ok, evse_processing: EvseProcessing::Finished };
            Outcome::Reply { response: DinResponse::ContractAuthentication(response), next_state: DinState::ChargeParameterDiscovery, timeout: sequence_timeout_for("ChargeParameterDiscoveryReq") }
        }
        AuthorizationStatus::Rejected => Outcome::Abort { response: abort_with("ContractAuthentication", ResponseCode::Failed) },
    }
}

async fn handle_charge_parameter_discovery(ctx: &mut SessionContext, evse: &dyn EvseController, req: crate::din::charge_parameter_discovery::ChargeParameterDiscoveryRequest) -> Outcome<DinResponse, DinState> {
    let departure = req.departure_time.map(|ts| chrono::DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_else(Utc::now));
    let schedules = evse.get_sa_schedule_list(3, departure).await;
    let dc_param = evse.get_dc_evse_charge_parameter().await;

    let (processing, schedule_list) = if schedules.is_empty() {
        (EvseProcessing::Ongoing, None)
    } else {
        ctx.offered_schedules = schedules.clone();
        (EvseProcessing::Finished, Some(schedules))
    };

    let response = ChargeParameterDiscoveryResponse { response_code: ResponseCode::Ok, evse_processing: processing, dc_evse_charge_parameter: dc_param, sa_schedule_list: schedule_list };
    let next = if processing == EvseProcessing::Finished { DinState::CableCheck } else { DinState::ChargeParameterDiscovery };
    Outcome::Reply { response: DinResponse::ChargeParameterDiscovery(response), next_state: next, timeout: sequence_timeout_for(if processing == EvseProcessing::Finished { "CableCheckReq" } else { "ChargeParameterDiscoveryReq" }) }
}

async fn handle_power_delivery(ctx: &mut SessionContext, evse: &dyn EvseController, req: PowerDeliveryRequest) -> Outcome<DinResponse, DinState> {
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
            let response = crate::din::power_delivery::PowerDeliveryResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await };
            Outcome::Reply { response: DinResponse::PowerDelivery(response), next_state: DinState::CurrentDemand, timeout: sequence_timeout_for("CurrentDemandReq") }
        }
        ChargeProgress::Stop => {
            ctx.charge_progress = Some(ChargeProgress::Stop);
            evse.set_hlc_charging(false).await;
            let response = crate::din::power_delivery::PowerDeliveryResponse { response_code: ResponseCode::Ok, dc_evse_status: evse.get_dc_evse_status().await };
            Outcome::Reply { response: DinResponse::PowerDelivery(response), next_state: DinState::WeldingDetection, timeout: sequence_timeout_for("WeldingDetectionReq") }
        }
        ChargeProgress::Renegotiate => Outcome::Abort { response: abort_with("PowerDelivery", ResponseCode::Failed) },
    }
}

async fn handle_current_demand(evse: &dyn EvseController, req: CurrentDemandRequest) -> Outcome<DinResponse, DinState> {
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
        evse_maximum_voltage_limit: req.ev_maximum_voltage_limit,
        evse_maximum_current_limit: req.ev_maximum_current_limit,
    };
    Outcome::Reply { response: DinResponse::CurrentDemand(response), next_state: DinState::CurrentDemand, timeout: sequence_timeout_for("CurrentDemandReq") }
}

fn handle_session_stop(ctx: &mut SessionContext) -> Outcome<DinResponse, DinState> {
    ctx.charge_progress_started = false;
    let response = crate::din::session_stop::SessionStopResponse { response_code: ResponseCode::Ok };
    Outcome::Reply { response: DinResponse::SessionStop(response), next_state: DinState::Terminate, timeout: Duration::from_secs(0) }
}
