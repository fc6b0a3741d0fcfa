//! Shared test fixtures: a scriptable mock `EvseController` and an
//! in-memory loopback `Transport`, used by the end-to-end scenario tests
//! in this directory (`spec.md` §8's seed scenarios).

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair};

use iso15118_secc::common::enums::{AuthorizationStatus, EnergyTransferMode};
use iso15118_secc::common::physical_value::{PhysicalValue, UnitSymbol};
use iso15118_secc::common::schedule::{PMaxSchedule, PMaxScheduleEntry, RelativeTimeInterval, SaScheduleTuple};
use iso15118_secc::common::status::{AcEvseChargeParameter, AcEvseStatus, DcEvseChargeParameter, DcEvseStatus, MeterInfo};
use iso15118_secc::error::SeccError;
use iso15118_secc::evse_controller::EvseController;
use iso15118_secc::security::certs::Certificate;
use iso15118_secc::security::pki::PkiMaterial;
use iso15118_secc::session::context::SessionId;
use iso15118_secc::session_handler::Transport;

/// A controller whose answers are fixed at construction time, standing in
/// for the physical EVSE controller `spec.md` §4.3 describes as external.
pub struct MockEvse {
    pub evse_id: String,
    pub supported_modes: Vec<EnergyTransferMode>,
    pub schedules_ready: bool,
    pub authorization: AuthorizationStatus,
    pub dc_status_ready: bool,
    pub present_voltage: Mutex<PhysicalValue>,
    pub target_voltage: PhysicalValue,
}

impl Default for MockEvse {
    fn default() -> Self {
        MockEvse {
            evse_id: "EVSE-TEST-0001".to_string(),
            supported_modes: vec![EnergyTransferMode::DcExtended],
            schedules_ready: true,
            authorization: AuthorizationStatus::Accepted,
            dc_status_ready: true,
            present_voltage: Mutex::new(PhysicalValue { multiplier: 0, value: 400, unit: UnitSymbol::Voltage }),
            target_voltage: PhysicalValue { multiplier: 0, value: 400, unit: UnitSymbol::Voltage },
        }
    }
}

#[async_trait]
impl EvseController for MockEvse {
    async fn get_evse_id(&self) -> String {
        self.evse_id.clone()
    }

    async fn get_supported_energy_transfer_modes(&self) -> Vec<EnergyTransferMode> {
        self.supported_modes.clone()
    }

    async fn get_ac_evse_charge_parameter(&self) -> AcEvseChargeParameter {
        AcEvseChargeParameter {
            ac_evse_status: AcEvseStatus::placeholder(),
            evse_nominal_voltage: PhysicalValue::zero(UnitSymbol::Voltage),
            evse_max_current: PhysicalValue { multiplier: 0, value: 32, unit: UnitSymbol::Ampere },
        }
    }

    async fn get_dc_evse_charge_parameter(&self) -> DcEvseChargeParameter {
        DcEvseChargeParameter {
            dc_evse_status: if self.dc_status_ready { DcEvseStatus::ready() } else { DcEvseStatus::not_ready() },
            evse_maximum_power_limit: PhysicalValue { multiplier: 2, value: 500, unit: UnitSymbol::Watt },
            evse_maximum_current_limit: PhysicalValue { multiplier: 0, value: 125, unit: UnitSymbol::Ampere },
            evse_maximum_voltage_limit: PhysicalValue { multiplier: 0, value: 500, unit: UnitSymbol::Voltage },
            evse_minimum_current_limit: PhysicalValue::zero(UnitSymbol::Ampere),
            evse_minimum_voltage_limit: PhysicalValue::zero(UnitSymbol::Voltage),
            evse_current_regulation_tolerance: None,
            evse_peak_current_ripple: PhysicalValue::zero(UnitSymbol::Ampere),
            evse_energy_to_be_delivered: None,
        }
    }

    async fn get_ac_evse_status(&self) -> iso15118_secc::common::status::AcEvseStatus {
        AcEvseStatus::placeholder()
    }

    async fn get_dc_evse_status(&self) -> DcEvseStatus {
        if self.dc_status_ready { DcEvseStatus::ready() } else { DcEvseStatus::not_ready() }
    }

    async fn get_sa_schedule_list(&self, _max_entries: u8, _departure_time: Option<DateTime<Utc>>) -> Vec<SaScheduleTuple> {
        if !self.schedules_ready {
            return Vec::new();
        }
        vec![SaScheduleTuple {
            sa_schedule_tuple_id: 1,
            p_max_schedule: PMaxSchedule {
                entries: vec![PMaxScheduleEntry {
                    relative_time_interval: RelativeTimeInterval { start: 0, duration: Some(3600) },
                    p_max: PhysicalValue { multiplier: 2, value: 500, unit: UnitSymbol::Watt },
                }],
            },
            sales_tariff: None,
            sales_tariff_signature: None,
        }]
    }

    async fn is_authorised(&self) -> AuthorizationStatus {
        self.authorization
    }

    async fn get_meter_info(&self) -> MeterInfo {
        MeterInfo { meter_id: "METER-1".to_string(), meter_reading: Some(1000), sig_meter_reading: None, meter_status: Some(0), t_meter: None }
    }

    async fn set_hlc_charging(&self, _active: bool) {}

    async fn get_dc_present_voltage(&self) -> PhysicalValue {
        *self.present_voltage.lock().unwrap()
    }

    async fn get_dc_present_current(&self) -> PhysicalValue {
        PhysicalValue { multiplier: 0, value: 10, unit: UnitSymbol::Ampere }
    }

    async fn get_dc_target_voltage(&self) -> PhysicalValue {
        self.target_voltage
    }
}

/// An in-memory stand-in for the TCP/TLS transport and EXI codec
/// (`spec.md` §6's external collaborators): a queue of already-decoded
/// inbound messages to `recv`, and a log of everything `send` wrote.
pub struct LoopbackTransport<Req, Res> {
    pub inbound: VecDeque<Req>,
    pub sent: Vec<Res>,
    session_id: SessionId,
    peer: SocketAddr,
}

impl<Req, Res> LoopbackTransport<Req, Res> {
    /// Every queued message is tagged with the all-zero session id, as if
    /// the EVCC were opening a brand new session.
    pub fn new(inbound: Vec<Req>) -> Self {
        LoopbackTransport { inbound: inbound.into(), sent: Vec::new(), session_id: SessionId::ZERO, peer: "127.0.0.1:0".parse().unwrap() }
    }

    /// Tags every queued message with `session_id`, for exercising the
    /// session-resume path.
    pub fn new_with_session_id(inbound: Vec<Req>, session_id: SessionId) -> Self {
        LoopbackTransport { inbound: inbound.into(), sent: Vec::new(), session_id, peer: "127.0.0.1:0".parse().unwrap() }
    }
}

#[async_trait]
impl<Req: Send, Res: Send> Transport<Req, Res> for LoopbackTransport<Req, Res> {
    async fn recv(&mut self) -> Result<(SessionId, Req), SeccError> {
        let req = self.inbound.pop_front().ok_or(SeccError::Timeout)?;
        Ok((self.session_id, req))
    }

    async fn send(&mut self, response: Res) -> Result<(), SeccError> {
        self.sent.push(response);
        Ok(())
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

/// Generates an ECDSA P-256 key pair and returns `(pkcs8_bytes,
/// raw_public_key_bytes)`.
fn generate_keypair() -> (Vec<u8>, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let key_pair = EcdsaKeyPair::from_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng).unwrap();
    (pkcs8.as_ref().to_vec(), key_pair.public_key().as_ref().to_vec())
}

fn signed_cert(subject_cn: &str, issuer_cn: &str, issuer_key_pair: &EcdsaKeyPair, public_key: Vec<u8>) -> Certificate {
    let der = format!("{subject_cn}-tbs").into_bytes();
    let signature = issuer_key_pair.sign(&SystemRandom::new(), &der).unwrap().as_ref().to_vec();
    Certificate {
        der,
        subject_cn: subject_cn.to_string(),
        issuer_cn: issuer_cn.to_string(),
        not_before: Utc::now() - chrono::Duration::days(1),
        not_after: Utc::now() + chrono::Duration::days(365),
        public_key,
        signature,
    }
}

/// Builds a self-consistent MO-root -> contract-leaf chain plus a
/// self-signed CPS leaf, for exercising the PnC crypto path
/// (`CertificateInstallation`/`PaymentDetails`) end to end. Returns the
/// material plus the PKCS8 signing key matching the contract leaf's public
/// key, which a PnC test signs its `AuthorizationReq`/`MeteringReceiptReq`
/// with, standing in for the EVCC's own copy of the installed contract key.
pub fn test_pki_material() -> (PkiMaterial, Vec<u8>) {
    let rng = SystemRandom::new();
    let mo_root_signing_key = EcdsaKeyPair::generate_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let mo_root_key_pair = EcdsaKeyPair::from_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, mo_root_signing_key.as_ref(), &rng).unwrap();
    let mo_root = Certificate {
        der: b"mo-root-tbs".to_vec(),
        subject_cn: "MO Root CA".to_string(),
        issuer_cn: "MO Root CA".to_string(),
        not_before: Utc::now() - chrono::Duration::days(1),
        not_after: Utc::now() + chrono::Duration::days(3650),
        public_key: mo_root_key_pair.public_key().as_ref().to_vec(),
        signature: Vec::new(),
    };

    let (contract_signing_key, contract_public_key) = generate_keypair();
    let contract_leaf = signed_cert("EMAID-TEST-0001", "MO Root CA", &mo_root_key_pair, contract_public_key);

    let (cps_signing_key, cps_public_key) = generate_keypair();
    let cps_leaf = Certificate {
        der: b"cps-leaf-tbs".to_vec(),
        subject_cn: "CPS".to_string(),
        issuer_cn: "CPS".to_string(),
        not_before: Utc::now() - chrono::Duration::days(1),
        not_after: Utc::now() + chrono::Duration::days(365),
        public_key: cps_public_key,
        signature: Vec::new(),
    };

    let pki = PkiMaterial {
        mo_root,
        cps_leaf,
        cps_signing_key,
        contract_cert_chain: vec![contract_leaf],
        contract_private_key: b"contract-private-key-bytes".to_vec(),
    };
    (pki, contract_signing_key)
}
