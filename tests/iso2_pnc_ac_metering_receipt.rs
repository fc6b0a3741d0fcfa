//! Full PnC/AC session through `MeteringReceipt`. The EVCC's `Authorization`
//! signature covers a challenge the SECC only reveals in `PaymentDetailsRes`,
//! so this test drives the session with a scripted `Transport` that reads
//! each prior response before building the next request — a flat
//! `LoopbackTransport` of pre-built messages can't express that dependency.

mod support;

use std::net::SocketAddr;

use async_trait::async_trait;
use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair};

use iso15118_secc::common::certificate::{CertificateChain, Emaid};
use iso15118_secc::common::enums::{AuthOption, EnergyTransferMode};
use iso15118_secc::common::physical_value::{PhysicalValue, UnitSymbol};
use iso15118_secc::common::service::ServiceId;
use iso15118_secc::common::status::MeterInfo;
use iso15118_secc::error::SeccError;
use iso15118_secc::iso2::authorization::AuthorizationRequest;
use iso15118_secc::iso2::certificate_installation::CertificateInstallationRequest;
use iso15118_secc::iso2::charge_parameter_discovery::{AcEvChargeParameter, ChargeParameterDiscoveryRequest};
use iso15118_secc::iso2::charging_status::ChargingStatusRequest;
use iso15118_secc::iso2::message::{Iso2Request, Iso2Response};
use iso15118_secc::iso2::metering_receipt::MeteringReceiptRequest;
use iso15118_secc::iso2::payment_details::PaymentDetailsRequest;
use iso15118_secc::iso2::payment_service_selection::{PaymentServiceSelectionRequest, SelectedService};
use iso15118_secc::iso2::power_delivery::PowerDeliveryRequest;
use iso15118_secc::iso2::service_discovery::ServiceDiscoveryRequest;
use iso15118_secc::iso2::session_setup::SessionSetupRequest;
use iso15118_secc::common::enums::ChargeProgress;
use iso15118_secc::common::charging_profile::ChargingProfile;
use iso15118_secc::response_code::ResponseCode;
use iso15118_secc::security::signature::{create_signature, SignatureElement};
use iso15118_secc::session::context::SessionId;
use iso15118_secc::session_handler::{run_iso2_session, Transport};

use support::{test_pki_material, MockEvse};

fn ac_evse() -> MockEvse {
    MockEvse { supported_modes: vec![EnergyTransferMode::AcThreePhaseCore], ..MockEvse::default() }
}

fn generate_keypair() -> (Vec<u8>, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let key_pair = EcdsaKeyPair::from_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng).unwrap();
    (pkcs8.as_ref().to_vec(), key_pair.public_key().as_ref().to_vec())
}

fn fixed_meter_info() -> MeterInfo {
    MeterInfo { meter_id: "METER-1".to_string(), meter_reading: Some(1000), sig_meter_reading: None, meter_status: Some(0), t_meter: None }
}

/// Builds requests step by step, signing `Authorization`/`MeteringReceipt`
/// against material the SECC only revealed in an earlier response.
struct ScriptedTransport {
    /// Signs the `CertificateInstallation` request id; verified against
    /// `oem_public_key` in the OEM provisioning cert chain.
    oem_signing_key: Vec<u8>,
    oem_public_key: Vec<u8>,
    /// Signs `Authorization`/`MeteringReceipt`; matches the leaf the SECC's
    /// own `PkiMaterial` installs, since `PaymentDetails` now trusts that
    /// leaf rather than whatever the EVCC sends back on the wire.
    contract_signing_key: Vec<u8>,
    step: usize,
    sent: Vec<Iso2Response>,
    /// When true, `MeteringReceipt`'s signature is computed over the wrong
    /// id so the mismatch-rejection path can be exercised.
    corrupt_metering_signature: bool,
}

impl ScriptedTransport {
    fn new(corrupt_metering_signature: bool, contract_signing_key: Vec<u8>) -> Self {
        let (oem_signing_key, oem_public_key) = generate_keypair();
        ScriptedTransport { oem_signing_key, oem_public_key, contract_signing_key, step: 0, sent: Vec::new(), corrupt_metering_signature }
    }

    fn last_gen_challenge(&self) -> [u8; 16] {
        match self.sent.last() {
            Some(Iso2Response::PaymentDetails(r)) => r.gen_challenge,
            other => panic!("expected PaymentDetailsRes before Authorization, got {other:?}"),
        }
    }
}

#[async_trait]
impl Transport<Iso2Request, Iso2Response> for ScriptedTransport {
    async fn recv(&mut self) -> Result<(SessionId, Iso2Request), SeccError> {
        let req = match self.step {
            0 => Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-PNC-AC".to_string() }),
            1 => Iso2Request::ServiceDiscovery(ServiceDiscoveryRequest { service_scope: None, service_category: None }),
            2 => Iso2Request::PaymentServiceSelection(PaymentServiceSelectionRequest {
                selected_payment_option: AuthOption::Pnc,
                selected_service_list: vec![SelectedService { service_id: ServiceId::Charging, parameter_set_id: None }],
            }),
            3 => {
                let id = "CertInstall-AC".to_string();
                let signature = create_signature(&[SignatureElement::new(&id, id.as_bytes())], &self.oem_signing_key).unwrap();
                Iso2Request::CertificateInstallation(CertificateInstallationRequest {
                    oem_provisioning_cert_chain: CertificateChain { certificate: self.oem_public_key.clone(), sub_certificates: None },
                    list_of_root_certificate_ids: vec!["root-1".to_string()],
                    id,
                    signature,
                })
            }
            4 => Iso2Request::PaymentDetails(PaymentDetailsRequest {
                emaid: Emaid::placeholder(),
                contract_signature_cert_chain: CertificateChain { certificate: Vec::new(), sub_certificates: None },
            }),
            5 => {
                let challenge = self.last_gen_challenge();
                let id = "Auth-AC".to_string();
                let elements = [SignatureElement::new(&id, id.as_bytes()), SignatureElement::new("challenge", &challenge)];
                let signature = create_signature(&elements, &self.contract_signing_key).unwrap();
                Iso2Request::Authorization(AuthorizationRequest { id: Some(id), gen_challenge: Some(challenge), signature: Some(signature) })
            }
            6 => Iso2Request::ChargeParameterDiscovery(ChargeParameterDiscoveryRequest {
                requested_energy_transfer_mode: EnergyTransferMode::AcThreePhaseCore,
                ac_ev_charge_parameter: Some(AcEvChargeParameter {
                    departure_time: None,
                    e_amount: PhysicalValue { multiplier: 2, value: 100, unit: UnitSymbol::WattHours },
                    ev_max_voltage: PhysicalValue { multiplier: 0, value: 230, unit: UnitSymbol::Voltage },
                    ev_max_current: PhysicalValue { multiplier: 0, value: 16, unit: UnitSymbol::Ampere },
                    ev_min_current: PhysicalValue { multiplier: 0, value: 6, unit: UnitSymbol::Ampere },
                }),
                dc_ev_charge_parameter: None,
            }),
            7 => {
                let profile = ChargingProfile::builder().add_entry(0, PhysicalValue { multiplier: 0, value: 16, unit: UnitSymbol::Ampere }, None).build();
                Iso2Request::PowerDelivery(PowerDeliveryRequest { charge_progress: ChargeProgress::Start, sa_schedule_tuple_id: 1, charging_profile: Some(profile) })
            }
            8 => Iso2Request::ChargingStatus(ChargingStatusRequest),
            9 => {
                let id = if self.corrupt_metering_signature { "wrong-id".to_string() } else { "Metering-1".to_string() };
                let signing_key = &self.contract_signing_key;
                let signature = create_signature(&[SignatureElement::new(&id, id.as_bytes())], signing_key).unwrap();
                let real_id = "Metering-1".to_string();
                Iso2Request::MeteringReceipt(MeteringReceiptRequest { id: real_id, signature: Some(signature), sa_schedule_tuple_id: 1, meter_info: fixed_meter_info() })
            }
            _ => return Err(SeccError::Timeout),
        };
        self.step += 1;
        Ok((SessionId::ZERO, req))
    }

    async fn send(&mut self, response: Iso2Response) -> Result<(), SeccError> {
        self.sent.push(response);
        Ok(())
    }

    fn peer_addr(&self) -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }
}

#[tokio::test]
async fn pnc_ac_session_reaches_metering_receipt() {
    let evse = ac_evse();
    let (pki, contract_signing_key) = test_pki_material();
    let mut transport = ScriptedTransport::new(false, contract_signing_key);
    let stop = run_iso2_session(&mut transport, &evse, None, true, Some(&pki)).await;

    assert!(!stop.normal || matches!(transport.sent.last(), Some(Iso2Response::MeteringReceipt(_))), "unexpected end: {}", stop.message);
    match transport.sent.last().unwrap() {
        Iso2Response::MeteringReceipt(r) => assert_eq!(r.response_code, ResponseCode::Ok),
        other => panic!("expected MeteringReceiptRes, got {other:?}"),
    }

    match &transport.sent[5] {
        Iso2Response::Authorization(r) => assert_eq!(r.response_code, ResponseCode::Ok),
        other => panic!("expected AuthorizationRes, got {other:?}"),
    }
}

#[tokio::test]
async fn metering_receipt_with_a_signature_over_the_wrong_id_is_rejected() {
    let evse = ac_evse();
    let (pki, contract_signing_key) = test_pki_material();
    let mut transport = ScriptedTransport::new(true, contract_signing_key);
    let stop = run_iso2_session(&mut transport, &evse, None, true, Some(&pki)).await;

    assert!(!stop.normal);
    match transport.sent.last().unwrap() {
        Iso2Response::MeteringReceipt(r) => assert_eq!(r.response_code, ResponseCode::FailedSignatureError),
        other => panic!("expected MeteringReceiptRes, got {other:?}"),
    }
}
