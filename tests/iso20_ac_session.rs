//! ISO 15118-20 AC-loop seed scenario (`spec.md` §4.4, §9): the common
//! envelope through `AcChargeLoop`/`SessionStop`, plus the
//! `AuthorizationReq`-carried `selected_authorization_service` invariant.

mod support;

use iso15118_secc::common::enums::{AuthOption, ChargingSession, EnergyTransferMode};
use iso15118_secc::common::physical_value::{PhysicalValue, UnitSymbol};
use iso15118_secc::common::service::ServiceId;
use iso15118_secc::iso20::ac_charge_loop::AcChargeLoopRequest;
use iso15118_secc::iso20::authorization::AuthorizationRequest;
use iso15118_secc::iso20::authorization_setup::AuthorizationSetupRequest;
use iso15118_secc::iso20::charge_parameter_discovery::AcChargeParameterDiscoveryRequest;
use iso15118_secc::iso20::header::MessageHeader;
use iso15118_secc::iso20::message::{Iso20Request, Iso20Response};
use iso15118_secc::iso20::power_delivery::PowerDeliveryRequest;
use iso15118_secc::iso20::schedule_exchange::ScheduleExchangeRequest;
use iso15118_secc::iso20::service_discovery::ServiceDiscoveryRequest;
use iso15118_secc::iso20::service_selection::ServiceSelectionRequest;
use iso15118_secc::iso20::service_detail::ServiceDetailRequest;
use iso15118_secc::iso20::session_setup::SessionSetupRequest;
use iso15118_secc::iso20::session_stop::SessionStopRequest;
use iso15118_secc::common::enums::ChargeProgress;
use iso15118_secc::response_code::ResponseCode;
use iso15118_secc::session::context::SessionId;
use iso15118_secc::session_handler::run_iso20_session;

use support::{LoopbackTransport, MockEvse};

fn zero_header() -> MessageHeader {
    MessageHeader::new(SessionId::ZERO, 0)
}

fn ac_evse() -> MockEvse {
    MockEvse { supported_modes: vec![EnergyTransferMode::AcThreePhaseCore], ..MockEvse::default() }
}

fn watt(v: i32) -> PhysicalValue {
    PhysicalValue { multiplier: 0, value: v, unit: UnitSymbol::Watt }
}

fn requests_through_schedule_exchange(selected_auth: AuthOption) -> Vec<Iso20Request> {
    vec![
        Iso20Request::SessionSetup(SessionSetupRequest { header: zero_header(), evcc_id: "EVCC-20-AC".to_string() }),
        Iso20Request::AuthorizationSetup(AuthorizationSetupRequest { header: zero_header() }),
        Iso20Request::Authorization(AuthorizationRequest { header: zero_header(), selected_authorization_service: selected_auth, id: None, signature: None }),
        Iso20Request::ServiceDiscovery(ServiceDiscoveryRequest { header: zero_header() }),
        Iso20Request::ServiceDetail(ServiceDetailRequest { header: zero_header(), service_id: ServiceId::Charging }),
        Iso20Request::ServiceSelection(ServiceSelectionRequest { header: zero_header(), selected_energy_transfer_service: EnergyTransferMode::AcThreePhaseCore, selected_va_services: Vec::new() }),
        Iso20Request::ScheduleExchange(ScheduleExchangeRequest { header: zero_header(), departure_time: None, ev_target_energy_request: None, ev_max_energy_request: None }),
    ]
}

#[tokio::test]
async fn eim_ac_session_runs_through_to_session_stop() {
    let evse = ac_evse();
    let mut requests = requests_through_schedule_exchange(AuthOption::Eim);
    requests.push(Iso20Request::AcChargeParameterDiscovery(AcChargeParameterDiscoveryRequest { header: zero_header(), ev_max_charge_power: watt(7000) }));
    requests.push(Iso20Request::PowerDelivery(PowerDeliveryRequest { header: zero_header(), charge_progress: ChargeProgress::Start }));
    requests.push(Iso20Request::AcChargeLoop(AcChargeLoopRequest { header: zero_header(), ev_present_active_power: watt(7000), charging_complete: false }));
    requests.push(Iso20Request::PowerDelivery(PowerDeliveryRequest { header: zero_header(), charge_progress: ChargeProgress::Stop }));
    requests.push(Iso20Request::SessionStop(SessionStopRequest { header: zero_header(), charging_session: ChargingSession::Terminate }));

    let mut transport: LoopbackTransport<Iso20Request, _> = LoopbackTransport::new(requests);
    let stop = run_iso20_session(&mut transport, &evse, None, false).await;

    assert!(stop.normal, "session should end cleanly: {}", stop.message);
    match transport.sent.last().unwrap() {
        (Iso20Response::SessionStop(r), _, _) => assert_eq!(r.response_code, ResponseCode::Ok),
        other => panic!("expected SessionStopRes, got {other:?}"),
    }
}

#[tokio::test]
async fn authorization_rejects_a_service_the_secc_never_offered() {
    // AuthorizationSetup only ever offers EIM here (no TLS), so a PnC
    // selection must be refused rather than silently accepted.
    let evse = ac_evse();
    let requests = requests_through_schedule_exchange(AuthOption::Pnc);

    let mut transport: LoopbackTransport<Iso20Request, _> = LoopbackTransport::new(requests);
    let stop = run_iso20_session(&mut transport, &evse, None, false).await;

    assert!(!stop.normal);
    match transport.sent.get(2).unwrap() {
        (Iso20Response::Authorization(r), _, _) => assert_eq!(r.response_code, ResponseCode::FailedPaymentSelectionInvalid),
        other => panic!("expected AuthorizationRes, got {other:?}"),
    }
}
