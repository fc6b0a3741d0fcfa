//! End-to-end EIM/DC charging session over ISO 15118-2: every seed scenario
//! from the state table in one straight run, asserting each reply's
//! `response_code` and the final `StopReason`.

mod support;

use iso15118_secc::common::charging_profile::ChargingProfile;
use iso15118_secc::common::enums::{AuthOption, EnergyTransferMode};
use iso15118_secc::common::physical_value::{PhysicalValue, UnitSymbol};
use iso15118_secc::common::service::ServiceId;
use iso15118_secc::iso2::authorization::AuthorizationRequest;
use iso15118_secc::iso2::cable_check::CableCheckRequest;
use iso15118_secc::iso2::charge_parameter_discovery::{ChargeParameterDiscoveryRequest, DcEvChargeParameter};
use iso15118_secc::iso2::current_demand::CurrentDemandRequest;
use iso15118_secc::iso2::message::{Iso2Request, Iso2Response};
use iso15118_secc::iso2::payment_service_selection::{PaymentServiceSelectionRequest, SelectedService};
use iso15118_secc::iso2::power_delivery::PowerDeliveryRequest;
use iso15118_secc::iso2::pre_charge::PreChargeRequest;
use iso15118_secc::iso2::service_discovery::ServiceDiscoveryRequest;
use iso15118_secc::iso2::session_setup::SessionSetupRequest;
use iso15118_secc::iso2::session_stop::SessionStopRequest;
use iso15118_secc::iso2::welding_detection::WeldingDetectionRequest;
use iso15118_secc::common::enums::{ChargeProgress, ChargingSession, IsolationLevel};
use iso15118_secc::response_code::ResponseCode;
use iso15118_secc::session_handler::run_iso2_session;

use support::{LoopbackTransport, MockEvse};

fn volt(v: i32) -> PhysicalValue {
    PhysicalValue { multiplier: 0, value: v, unit: UnitSymbol::Voltage }
}

fn amp(v: i32) -> PhysicalValue {
    PhysicalValue { multiplier: 0, value: v, unit: UnitSymbol::Ampere }
}

#[tokio::test]
async fn eim_dc_session_runs_to_completion() {
    let evse = MockEvse::default();

    let profile = ChargingProfile::builder().add_entry(0, amp(32), None).build();

    let requests = vec![
        Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-AA-BB-CC".to_string() }),
        Iso2Request::ServiceDiscovery(ServiceDiscoveryRequest { service_scope: None, service_category: None }),
        Iso2Request::PaymentServiceSelection(PaymentServiceSelectionRequest {
            selected_payment_option: AuthOption::Eim,
            selected_service_list: vec![SelectedService { service_id: ServiceId::Charging, parameter_set_id: None }],
        }),
        Iso2Request::Authorization(AuthorizationRequest { id: None, gen_challenge: None, signature: None }),
        Iso2Request::ChargeParameterDiscovery(ChargeParameterDiscoveryRequest {
            requested_energy_transfer_mode: EnergyTransferMode::DcExtended,
            ac_ev_charge_parameter: None,
            dc_ev_charge_parameter: Some(DcEvChargeParameter {
                departure_time: None,
                ev_maximum_current_limit: amp(125),
                ev_maximum_power_limit: None,
                ev_maximum_voltage_limit: volt(500),
                ev_energy_capacity: None,
                ev_energy_request: None,
                full_soc: None,
                bulk_soc: None,
                de_s_o_c: None,
            }),
        }),
        Iso2Request::CableCheck(CableCheckRequest { dc_ev_status: IsolationLevel::Valid }),
        Iso2Request::PreCharge(PreChargeRequest { ev_target_voltage: volt(400), ev_target_current: amp(0) }),
        Iso2Request::PowerDelivery(PowerDeliveryRequest { charge_progress: ChargeProgress::Start, sa_schedule_tuple_id: 1, charging_profile: Some(profile) }),
        Iso2Request::CurrentDemand(CurrentDemandRequest {
            ev_target_voltage: volt(400),
            ev_target_current: amp(10),
            ev_maximum_voltage_limit: Some(volt(500)),
            ev_maximum_current_limit: Some(amp(125)),
            ev_maximum_power_limit: None,
            bulk_charging_complete: Some(false),
            charging_complete: false,
        }),
        Iso2Request::CurrentDemand(CurrentDemandRequest {
            ev_target_voltage: volt(400),
            ev_target_current: amp(10),
            ev_maximum_voltage_limit: Some(volt(500)),
            ev_maximum_current_limit: Some(amp(125)),
            ev_maximum_power_limit: None,
            bulk_charging_complete: Some(true),
            charging_complete: true,
        }),
        Iso2Request::PowerDelivery(PowerDeliveryRequest { charge_progress: ChargeProgress::Stop, sa_schedule_tuple_id: 1, charging_profile: None }),
        Iso2Request::WeldingDetection(WeldingDetectionRequest { dc_ev_status: IsolationLevel::Valid }),
        Iso2Request::SessionStop(SessionStopRequest { charging_session: ChargingSession::Terminate }),
    ];

    let mut transport = LoopbackTransport::new(requests);
    let stop = run_iso2_session(&mut transport, &evse, None, false, None).await;

    assert!(stop.normal, "session should end normally: {}", stop.message);
    assert_eq!(transport.sent.len(), 13);

    for response in &transport.sent {
        let code = match response {
            Iso2Response::SessionSetup(r) => r.response_code,
            Iso2Response::ServiceDiscovery(r) => r.response_code,
            Iso2Response::PaymentServiceSelection(r) => r.response_code,
            Iso2Response::Authorization(r) => r.response_code,
            Iso2Response::ChargeParameterDiscovery(r) => r.response_code,
            Iso2Response::CableCheck(r) => r.response_code,
            Iso2Response::PreCharge(r) => r.response_code,
            Iso2Response::PowerDelivery(r) => r.response_code,
            Iso2Response::CurrentDemand(r) => r.response_code,
            Iso2Response::WeldingDetection(r) => r.response_code,
            Iso2Response::SessionStop(r) => r.response_code,
            other => panic!("unexpected response in happy path: {other:?}"),
        };
        assert!(code.is_ok(), "expected an OK* response code, got {code:?}");
    }

    match &transport.sent[0] {
        Iso2Response::SessionSetup(r) => assert_eq!(r.response_code, ResponseCode::OkNewSessionEstablished),
        other => panic!("expected SessionSetupRes, got {other:?}"),
    }
}
