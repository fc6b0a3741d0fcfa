//! Failed-Response Registry (`spec.md` §4.1): a static table mapping each
//! request type to a pre-built, schema-valid response carrying
//! `response_code = Failed` and XSD-mandatory placeholder fields. Built once
//! at startup with `lazy_static`, mirroring how the teacher crate's static
//! tables are constructed; callers clone the entry and override the
//! response code with the most specific `FAILED_*` variant before sending.
//!
//! Placeholder values (`evse_id = "1234567"`, zeroed physical values with
//! correct unit tags, `DCEVSEStatus::not_ready()`, a zeroed 16-byte
//! `gen_challenge`, the 14-character placeholder EMAID) are grounded on
//! `examples/original_source/iso15118/shared/messages/din_spec/failed_responses.py`.

use std::collections::HashMap;

use crate::common::certificate::{CertificateChain, DhPublicKey, Emaid, EncryptedPrivateKey};
use crate::common::enums::EvseProcessing;
use crate::common::physical_value::{PhysicalValue, UnitSymbol};
use crate::common::status::DcEvseStatus;
use crate::response_code::ResponseCode;
use crate::{din, iso2, iso20};

const PLACEHOLDER_EVSE_ID: &str = "1234567";

fn zero(unit: UnitSymbol) -> PhysicalValue {
    PhysicalValue::zero(unit)
}

lazy_static! {
    pub static ref DIN_FAILED_RESPONSES: HashMap<&'static str, din::DinResponse> = build_din_failed_responses();
    pub static ref ISO2_FAILED_RESPONSES: HashMap<&'static str, iso2::Iso2Response> = build_iso2_failed_responses();
    pub static ref ISO20_FAILED_RESPONSES: HashMap<&'static str, (iso20::Iso20Response, iso20::Namespace, iso20::ISOV20PayloadTypes)> = build_iso20_failed_responses();
}

fn build_din_failed_responses() -> HashMap<&'static str, din::DinResponse> {
    use din::*;
    let mut m = HashMap::new();
    m.insert(
        "SessionSetup",
        DinResponse::SessionSetup(session_setup::SessionSetupResponse { response_code: ResponseCode::Failed, evse_id: PLACEHOLDER_EVSE_ID.to_string(), evse_timestamp: 0 }),
    );
    m.insert(
        "ServiceDiscovery",
        DinResponse::ServiceDiscovery(service_discovery::ServiceDiscoveryResponse {
            response_code: ResponseCode::Failed,
            payment_option_list: vec![crate::common::enums::AuthOption::Eim],
            charge_service: service_discovery::ChargeService {
                service_id: 1,
                free_service: false,
                energy_transfer_mode_list: crate::common::service::EnergyTransferModeList { energy_modes: vec![crate::common::enums::EnergyTransferMode::DcExtended] },
            },
        }),
    );
    m.insert(
        "ServicePaymentSelection",
        DinResponse::ServicePaymentSelection(service_payment_selection::ServicePaymentSelectionResponse { response_code: ResponseCode::Failed }),
    );
    m.insert(
        "ContractAuthentication",
        DinResponse::ContractAuthentication(contract_authentication::ContractAuthenticationResponse { response_code: ResponseCode::Failed, evse_processing: EvseProcessing::Finished }),
    );
    m.insert(
        "ChargeParameterDiscovery",
        DinResponse::ChargeParameterDiscovery(charge_parameter_discovery::ChargeParameterDiscoveryResponse {
            response_code: ResponseCode::Failed,
            evse_processing: EvseProcessing::Finished,
            dc_evse_charge_parameter: crate::common::status::DcEvseChargeParameter {
                dc_evse_status: DcEvseStatus::not_ready(),
                evse_maximum_power_limit: zero(UnitSymbol::Watt),
                evse_maximum_current_limit: zero(UnitSymbol::Ampere),
                evse_maximum_voltage_limit: zero(UnitSymbol::Voltage),
                evse_minimum_current_limit: zero(UnitSymbol::Ampere),
                evse_minimum_voltage_limit: zero(UnitSymbol::Voltage),
                evse_current_regulation_tolerance: None,
                evse_peak_current_ripple: zero(UnitSymbol::Ampere),
                evse_energy_to_be_delivered: None,
            },
            sa_schedule_list: None,
        }),
    );
    m.insert(
        "CableCheck",
        DinResponse::CableCheck(cable_check::CableCheckResponse { response_code: ResponseCode::Failed, dc_evse_status: DcEvseStatus::not_ready(), evse_processing: EvseProcessing::Finished }),
    );
    m.insert(
        "PreCharge",
        DinResponse::PreCharge(pre_charge::PreChargeResponse { response_code: ResponseCode::Failed, dc_evse_status: DcEvseStatus::not_ready(), evse_present_voltage: zero(UnitSymbol::Voltage) }),
    );
    m.insert(
        "PowerDelivery",
        DinResponse::PowerDelivery(power_delivery::PowerDeliveryResponse { response_code: ResponseCode::Failed, dc_evse_status: DcEvseStatus::not_ready() }),
    );
    m.insert(
        "CurrentDemand",
        DinResponse::CurrentDemand(current_demand::CurrentDemandResponse {
            response_code: ResponseCode::Failed,
            dc_evse_status: DcEvseStatus::not_ready(),
            evse_present_voltage: zero(UnitSymbol::Voltage),
            evse_present_current: zero(UnitSymbol::Ampere),
            evse_current_limit_achieved: false,
            evse_voltage_limit_achieved: false,
            evse_maximum_voltage_limit: None,
            evse_maximum_current_limit: None,
        }),
    );
    m.insert(
        "WeldingDetection",
        DinResponse::WeldingDetection(welding_detection::WeldingDetectionResponse {
            response_code: ResponseCode::Failed,
            dc_evse_status: DcEvseStatus::not_ready(),
            evse_present_voltage: zero(UnitSymbol::Voltage),
        }),
    );
    m.insert("SessionStop", DinResponse::SessionStop(session_stop::SessionStopResponse { response_code: ResponseCode::Failed }));
    m
}

fn build_iso2_failed_responses() -> HashMap<&'static str, iso2::Iso2Response> {
    use iso2::*;
    let mut m = HashMap::new();
    m.insert(
        "SessionSetup",
        Iso2Response::SessionSetup(session_setup::SessionSetupResponse { response_code: ResponseCode::Failed, evse_id: PLACEHOLDER_EVSE_ID.to_string(), evse_timestamp: 0 }),
    );
    m.insert(
        "ServiceDiscovery",
        Iso2Response::ServiceDiscovery(service_discovery::ServiceDiscoveryResponse {
            response_code: ResponseCode::Failed,
            payment_option_list: vec![crate::common::enums::AuthOption::Eim],
            charge_service: service_discovery::ChargeService {
                service_details: crate::common::service::ServiceDetails {
                    service_id: crate::common::service::ServiceId::Charging,
                    service_name: None,
                    service_category: crate::common::service::ServiceCategory::Charging,
                    service_scope: None,
                },
                free_service: false,
                energy_transfer_mode_list: crate::common::service::EnergyTransferModeList { energy_modes: vec![crate::common::enums::EnergyTransferMode::DcExtended] },
            },
            service_list: Vec::new(),
        }),
    );
    m.insert(
        "ServiceDetail",
        Iso2Response::ServiceDetail(service_detail::ServiceDetailResponse { response_code: ResponseCode::Failed, service_id: crate::common::service::ServiceId::Charging, service_parameter_list: None }),
    );
    m.insert(
        "PaymentServiceSelection",
        Iso2Response::PaymentServiceSelection(payment_service_selection::PaymentServiceSelectionResponse { response_code: ResponseCode::Failed }),
    );
    m.insert(
        "CertificateInstallation",
        Iso2Response::CertificateInstallation(certificate_installation::CertificateInstallationResponse {
            response_code: ResponseCode::Failed,
            contract_signature_cert_chain: CertificateChain::leaf_only(Vec::new()),
            sa_provisioning_cert_chain: CertificateChain::leaf_only(Vec::new()),
            contract_signature_encrypted_private_key: EncryptedPrivateKey { id: "id1".to_string(), value: Vec::new() },
            dh_public_key: DhPublicKey { id: "id2".to_string(), value: Vec::new() },
            emaid: Emaid::placeholder(),
            id: "id3".to_string(),
            signature: Vec::new(),
        }),
    );
    m.insert(
        "PaymentDetails",
        Iso2Response::PaymentDetails(payment_details::PaymentDetailsResponse { response_code: ResponseCode::Failed, gen_challenge: [0u8; 16] }),
    );
    m.insert(
        "Authorization",
        Iso2Response::Authorization(authorization::AuthorizationResponse { response_code: ResponseCode::Failed, evse_processing: EvseProcessing::Finished }),
    );
    m.insert(
        "ChargeParameterDiscovery",
        Iso2Response::ChargeParameterDiscovery(charge_parameter_discovery::ChargeParameterDiscoveryResponse {
            response_code: ResponseCode::Failed,
            evse_processing: EvseProcessing::Finished,
            ac_evse_charge_parameter: None,
            dc_evse_charge_parameter: Some(crate::common::status::DcEvseChargeParameter {
                dc_evse_status: DcEvseStatus::not_ready(),
                evse_maximum_power_limit: zero(UnitSymbol::Watt),
                evse_maximum_current_limit: zero(UnitSymbol::Ampere),
                evse_maximum_voltage_limit: zero(UnitSymbol::Voltage),
                evse_minimum_current_limit: zero(UnitSymbol::Ampere),
                evse_minimum_voltage_limit: zero(UnitSymbol::Voltage),
                evse_current_regulation_tolerance: None,
                evse_peak_current_ripple: zero(UnitSymbol::Ampere),
                evse_energy_to_be_delivered: None,
            }),
            sa_schedule_list: None,
        }),
    );
    m.insert(
        "PowerDelivery",
        Iso2Response::PowerDelivery(power_delivery::PowerDeliveryResponse { response_code: ResponseCode::Failed, ac_evse_status: None, dc_evse_status: Some(DcEvseStatus::not_ready()) }),
    );
    m.insert(
        "ChargingStatus",
        Iso2Response::ChargingStatus(charging_status::ChargingStatusResponse {
            response_code: ResponseCode::Failed,
            evse_id: PLACEHOLDER_EVSE_ID.to_string(),
            sa_schedule_tuple_id: 1,
            ac_evse_status: crate::common::status::AcEvseStatus::placeholder(),
            meter_id: None,
            meter_reading: None,
            receipt_required: false,
        }),
    );
    m.insert(
        "CurrentDemand",
        Iso2Response::CurrentDemand(current_demand::CurrentDemandResponse {
            response_code: ResponseCode::Failed,
            dc_evse_status: DcEvseStatus::not_ready(),
            evse_present_voltage: zero(UnitSymbol::Voltage),
            evse_present_current: zero(UnitSymbol::Ampere),
            evse_current_limit_achieved: false,
            evse_voltage_limit_achieved: false,
            evse_power_limit_achieved: false,
            evse_maximum_voltage_limit: None,
            evse_maximum_current_limit: None,
            evse_maximum_power_limit: None,
        }),
    );
    m.insert("MeteringReceipt", Iso2Response::MeteringReceipt(metering_receipt::MeteringReceiptResponse { response_code: ResponseCode::Failed }));
    m.insert(
        "CableCheck",
        Iso2Response::CableCheck(cable_check::CableCheckResponse { response_code: ResponseCode::Failed, dc_evse_status: DcEvseStatus::not_ready(), evse_processing: EvseProcessing::Finished }),
    );
    m.insert(
        "PreCharge",
        Iso2Response::PreCharge(pre_charge::PreChargeResponse { response_code: ResponseCode::Failed, dc_evse_status: DcEvseStatus::not_ready(), evse_present_voltage: zero(UnitSymbol::Voltage) }),
    );
    m.insert(
        "WeldingDetection",
        Iso2Response::WeldingDetection(welding_detection::WeldingDetectionResponse {
            response_code: ResponseCode::Failed,
            dc_evse_status: DcEvseStatus::not_ready(),
            evse_present_voltage: zero(UnitSymbol::Voltage),
        }),
    );
    m.insert("SessionStop", Iso2Response::SessionStop(session_stop::SessionStopResponse { response_code: ResponseCode::Failed }));
    m
}

fn build_iso20_failed_responses() -> HashMap<&'static str, (iso20::Iso20Response, iso20::Namespace, iso20::ISOV20PayloadTypes)> {
    use iso20::*;
    let header = MessageHeader::new(crate::session::context::SessionId::ZERO, 0);
    let mut m = HashMap::new();
    m.insert(
        "SessionSetup",
        (
            Iso20Response::SessionSetup(session_setup::SessionSetupResponse { header, response_code: ResponseCode::Failed, evse_id: PLACEHOLDER_EVSE_ID.to_string() }),
            Namespace::CommonMessages,
            ISOV20PayloadTypes::SessionSetupRes,
        ),
    );
    m.insert(
        "AuthorizationSetup",
        (
            Iso20Response::AuthorizationSetup(authorization_setup::AuthorizationSetupResponse {
                header,
                response_code: ResponseCode::Failed,
                auth_services: vec![crate::common::enums::AuthOption::Eim],
                eim_as_fallback: true,
            }),
            Namespace::CommonMessages,
            ISOV20PayloadTypes::AuthorizationSetupRes,
        ),
    );
    m.insert(
        "Authorization",
        (Iso20Response::Authorization(authorization::AuthorizationResponse { header, response_code: ResponseCode::Failed, evse_processing: EvseProcessing::Finished }), Namespace::CommonMessages, ISOV20PayloadTypes::AuthorizationRes),
    );
    m.insert(
        "ServiceDiscovery",
        (
            Iso20Response::ServiceDiscovery(service_discovery::ServiceDiscoveryResponse {
                header,
                response_code: ResponseCode::Failed,
                service_renegotiation_supported: false,
                energy_transfer_service_list: Vec::new(),
                va_service_list: Vec::new(),
            }),
            Namespace::CommonMessages,
            ISOV20PayloadTypes::ServiceDiscoveryRes,
        ),
    );
    m.insert(
        "ServiceDetail",
        (Iso20Response::ServiceDetail(service_detail::ServiceDetailResponse { header, response_code: ResponseCode::Failed, service_id: crate::common::service::ServiceId::Charging, service_parameter_list: None }), Namespace::CommonMessages, ISOV20PayloadTypes::ServiceDetailRes),
    );
    m.insert(
        "ServiceSelection",
        (Iso20Response::ServiceSelection(service_selection::ServiceSelectionResponse { header, response_code: ResponseCode::Failed }), Namespace::CommonMessages, ISOV20PayloadTypes::ServiceSelectionRes),
    );
    m.insert(
        "ScheduleExchange",
        (
            Iso20Response::ScheduleExchange(schedule_exchange::ScheduleExchangeResponse { header, response_code: ResponseCode::Failed, evse_processing: EvseProcessing::Finished, power_schedule_entries: Vec::new() }),
            Namespace::CommonMessages,
            ISOV20PayloadTypes::ScheduleExchangeRes,
        ),
    );
    m.insert(
        "AcChargeParameterDiscovery",
        (
            Iso20Response::AcChargeParameterDiscovery(charge_parameter_discovery::AcChargeParameterDiscoveryResponse { header, response_code: ResponseCode::Failed, evse_max_charge_power: zero(UnitSymbol::Watt) }),
            Namespace::Ac,
            ISOV20PayloadTypes::AcChargeParameterDiscoveryRes,
        ),
    );
    m.insert(
        "DcChargeParameterDiscovery",
        (
            Iso20Response::DcChargeParameterDiscovery(charge_parameter_discovery::DcChargeParameterDiscoveryResponse {
                header,
                response_code: ResponseCode::Failed,
                evse_max_charge_power: zero(UnitSymbol::Watt),
                evse_max_charge_current: zero(UnitSymbol::Ampere),
            }),
            Namespace::Dc,
            ISOV20PayloadTypes::DcChargeParameterDiscoveryRes,
        ),
    );
    m.insert(
        "PowerDelivery",
        (Iso20Response::PowerDelivery(power_delivery::PowerDeliveryResponse { header, response_code: ResponseCode::Failed }), Namespace::CommonMessages, ISOV20PayloadTypes::PowerDeliveryRes),
    );
    m.insert(
        "AcChargeLoop",
        (Iso20Response::AcChargeLoop(ac_charge_loop::AcChargeLoopResponse { header, response_code: ResponseCode::Failed, evse_present_active_power: zero(UnitSymbol::Watt) }), Namespace::Ac, ISOV20PayloadTypes::AcChargeLoopRes),
    );
    m.insert(
        "MeteringConfirmation",
        (Iso20Response::MeteringConfirmation(metering_confirmation::MeteringConfirmationResponse { header, response_code: ResponseCode::Failed }), Namespace::CommonMessages, ISOV20PayloadTypes::MeteringConfirmationRes),
    );
    m.insert(
        "SessionStop",
        (Iso20Response::SessionStop(session_stop::SessionStopResponse { header, response_code: ResponseCode::Failed }), Namespace::CommonMessages, ISOV20PayloadTypes::SessionStopRes),
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_din_entry_carries_failed_code() {
        for (_, response) in DIN_FAILED_RESPONSES.iter() {
            let code = match response {
                din::DinResponse::SessionSetup(r) => r.response_code,
                din::DinResponse::ServiceDiscovery(r) => r.response_code,
                din::DinResponse::ServicePaymentSelection(r) => r.response_code,
                din::DinResponse::ContractAuthentication(r) => r.response_code,
                din::DinResponse::ChargeParameterDiscovery(r) => r.response_code,
                din::DinResponse::CableCheck(r) => r.response_code,
                din::DinResponse::PreCharge(r) => r.response_code,
                din::DinResponse::PowerDelivery(r) => r.response_code,
                din::DinResponse::CurrentDemand(r) => r.response_code,
                din::DinResponse::WeldingDetection(r) => r.response_code,
                din::DinResponse::SessionStop(r) => r.response_code,
            };
            assert_eq!(code, ResponseCode::Failed);
        }
    }

    #[test]
    fn iso2_registry_has_an_entry_per_request_type() {
        let expected = [
            "SessionSetup",
            "ServiceDiscovery",
            "ServiceDetail",
            "PaymentServiceSelection",
            "CertificateInstallation",
            "PaymentDetails",
            "Authorization",
            "ChargeParameterDiscovery",
            "PowerDelivery",
            "ChargingStatus",
            "CurrentDemand",
            "MeteringReceipt",
            "CableCheck",
            "PreCharge",
            "WeldingDetection",
            "SessionStop",
        ];
        for name in expected {
            assert!(ISO2_FAILED_RESPONSES.contains_key(name), "missing failed-response entry for {name}");
        }
    }

    #[test]
    fn iso20_entries_carry_namespace_and_payload_type() {
        let (_, ns, _) = ISO20_FAILED_RESPONSES.get("SessionSetup").unwrap();
        assert_eq!(*ns, iso20::Namespace::CommonMessages);
    }
}
