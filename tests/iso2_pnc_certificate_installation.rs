//! Plug & Charge: contract-certificate installation followed by a signed
//! `AuthorizationReq`, exercising `verify_signature` against real ECDSA
//! key material instead of a stub.

mod support;

use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair};

use iso15118_secc::common::certificate::{CertificateChain, Emaid};
use iso15118_secc::common::enums::AuthOption;
use iso15118_secc::common::service::ServiceId;
use iso15118_secc::iso2::certificate_installation::CertificateInstallationRequest;
use iso15118_secc::iso2::message::{Iso2Request, Iso2Response};
use iso15118_secc::iso2::payment_details::PaymentDetailsRequest;
use iso15118_secc::iso2::payment_service_selection::{PaymentServiceSelectionRequest, SelectedService};
use iso15118_secc::iso2::service_discovery::ServiceDiscoveryRequest;
use iso15118_secc::iso2::session_setup::SessionSetupRequest;
use iso15118_secc::response_code::ResponseCode;
use iso15118_secc::security::signature::{create_signature, verify_signature, SignatureElement};
use iso15118_secc::session_handler::run_iso2_session;

use support::{test_pki_material, LoopbackTransport, MockEvse};

/// Generates an ECDSA P-256 key pair and returns `(pkcs8_bytes,
/// raw_public_key_bytes)`. The test's oem/contract "certificates" carry the
/// raw public key directly in their `certificate` field rather than a full
/// X.509 DER blob — `leaf_from_chain` treats that field as the key
/// material to verify against, so this is enough to exercise the real
/// signature-verification path without standing up a CA.
fn generate_keypair() -> (Vec<u8>, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let key_pair = EcdsaKeyPair::from_pkcs8(&ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng).unwrap();
    (pkcs8.as_ref().to_vec(), key_pair.public_key().as_ref().to_vec())
}

#[tokio::test]
async fn pnc_session_installs_a_certificate_and_authorizes() {
    let evse = MockEvse::default();
    let (pki, _contract_signing_key) = test_pki_material();

    let (oem_signing_key, oem_public_key) = generate_keypair();

    let cert_req_id = "CertInstall-1".to_string();
    let cert_signature = create_signature(&[SignatureElement::new(&cert_req_id, cert_req_id.as_bytes())], &oem_signing_key).unwrap();

    let requests = vec![
        Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-PNC-01".to_string() }),
        Iso2Request::ServiceDiscovery(ServiceDiscoveryRequest { service_scope: None, service_category: None }),
        Iso2Request::PaymentServiceSelection(PaymentServiceSelectionRequest {
            selected_payment_option: AuthOption::Pnc,
            selected_service_list: vec![SelectedService { service_id: ServiceId::Charging, parameter_set_id: None }],
        }),
        Iso2Request::CertificateInstallation(CertificateInstallationRequest {
            oem_provisioning_cert_chain: CertificateChain { certificate: oem_public_key, sub_certificates: None },
            list_of_root_certificate_ids: vec!["root-1".to_string()],
            id: cert_req_id,
            signature: cert_signature,
        }),
        Iso2Request::PaymentDetails(PaymentDetailsRequest {
            emaid: Emaid::placeholder(),
            contract_signature_cert_chain: CertificateChain { certificate: Vec::new(), sub_certificates: None },
        }),
    ];

    let mut transport = LoopbackTransport::new(requests);
    let stop = run_iso2_session(&mut transport, &evse, None, true, Some(&pki)).await;

    assert!(stop.normal || transport.sent.len() == 5, "expected PaymentDetailsRes as the last reply: {}", stop.message);
    assert_eq!(transport.sent.len(), 5);

    match &transport.sent[2] {
        Iso2Response::PaymentServiceSelection(r) => assert_eq!(r.response_code, ResponseCode::Ok),
        other => panic!("expected PaymentServiceSelectionRes, got {other:?}"),
    }
    match &transport.sent[3] {
        Iso2Response::CertificateInstallation(r) => {
            assert_eq!(r.response_code, ResponseCode::Ok);
            assert!(!r.dh_public_key.value.is_empty(), "encrypt_priv_key should produce a real ephemeral DH public key");
            assert!(!r.contract_signature_encrypted_private_key.value.is_empty(), "encrypt_priv_key should produce a real ciphertext");
            assert_eq!(r.emaid.value, "EMAID-TEST-0001");
            let elements = [
                SignatureElement::new(&r.contract_signature_encrypted_private_key.id, &r.contract_signature_encrypted_private_key.value),
                SignatureElement::new(&r.dh_public_key.id, &r.dh_public_key.value),
                SignatureElement::new("emaid", r.emaid.value.as_bytes()),
                SignatureElement::new("contractSignatureCertChain", &r.contract_signature_cert_chain.certificate),
            ];
            assert!(
                verify_signature(&r.signature, &elements, &pki.cps_leaf, None).is_ok(),
                "CertificateInstallationRes signature should verify against the CPS leaf's public key"
            );
        }
        other => panic!("expected CertificateInstallationRes, got {other:?}"),
    }
    match &transport.sent[4] {
        Iso2Response::PaymentDetails(r) => assert_eq!(r.response_code, ResponseCode::Ok),
        other => panic!("expected PaymentDetailsRes, got {other:?}"),
    }
}

#[tokio::test]
async fn payment_details_rejects_an_expired_contract_chain() {
    let evse = MockEvse::default();
    let (mut pki, _contract_signing_key) = test_pki_material();
    pki.contract_cert_chain[0].not_after = chrono::Utc::now() - chrono::Duration::days(1);

    let (oem_signing_key, oem_public_key) = generate_keypair();
    let cert_req_id = "CertInstall-expired".to_string();
    let cert_signature = create_signature(&[SignatureElement::new(&cert_req_id, cert_req_id.as_bytes())], &oem_signing_key).unwrap();

    let requests = vec![
        Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-PNC-EXP".to_string() }),
        Iso2Request::ServiceDiscovery(ServiceDiscoveryRequest { service_scope: None, service_category: None }),
        Iso2Request::PaymentServiceSelection(PaymentServiceSelectionRequest {
            selected_payment_option: AuthOption::Pnc,
            selected_service_list: vec![SelectedService { service_id: ServiceId::Charging, parameter_set_id: None }],
        }),
        Iso2Request::CertificateInstallation(CertificateInstallationRequest {
            oem_provisioning_cert_chain: CertificateChain { certificate: oem_public_key, sub_certificates: None },
            list_of_root_certificate_ids: vec!["root-1".to_string()],
            id: cert_req_id,
            signature: cert_signature,
        }),
        Iso2Request::PaymentDetails(PaymentDetailsRequest {
            emaid: Emaid::placeholder(),
            contract_signature_cert_chain: CertificateChain { certificate: Vec::new(), sub_certificates: None },
        }),
    ];

    let mut transport = LoopbackTransport::new(requests);
    let stop = run_iso2_session(&mut transport, &evse, None, true, Some(&pki)).await;

    assert!(!stop.normal);
    match transport.sent.last().unwrap() {
        Iso2Response::PaymentDetails(r) => assert_eq!(r.response_code, ResponseCode::FailedCertificateExpired),
        other => panic!("expected PaymentDetailsRes, got {other:?}"),
    }
}

#[tokio::test]
async fn certificate_installation_rejects_a_bad_signature() {
    let evse = MockEvse::default();
    let (_oem_signing_key, oem_public_key) = generate_keypair();
    let (other_signing_key, _other_public_key) = generate_keypair();

    let cert_req_id = "CertInstall-bad".to_string();
    // Sign with a key that does not match the advertised public key.
    let bad_signature = create_signature(&[SignatureElement::new(&cert_req_id, cert_req_id.as_bytes())], &other_signing_key).unwrap();

    let requests = vec![
        Iso2Request::SessionSetup(SessionSetupRequest { evcc_id: "EVCC-PNC-02".to_string() }),
        Iso2Request::ServiceDiscovery(ServiceDiscoveryRequest { service_scope: None, service_category: None }),
        Iso2Request::PaymentServiceSelection(PaymentServiceSelectionRequest {
            selected_payment_option: AuthOption::Pnc,
            selected_service_list: vec![SelectedService { service_id: ServiceId::Charging, parameter_set_id: None }],
        }),
        Iso2Request::CertificateInstallation(CertificateInstallationRequest {
            oem_provisioning_cert_chain: CertificateChain { certificate: oem_public_key, sub_certificates: None },
            list_of_root_certificate_ids: vec!["root-1".to_string()],
            id: cert_req_id,
            signature: bad_signature,
        }),
    ];

    let mut transport = LoopbackTransport::new(requests);
    let stop = run_iso2_session(&mut transport, &evse, None, true, None).await;

    assert!(!stop.normal);
    match transport.sent.last().unwrap() {
        Iso2Response::CertificateInstallation(r) => assert_eq!(r.response_code, ResponseCode::FailedSignatureError),
        other => panic!("expected CertificateInstallationRes, got {other:?}"),
    }
}
