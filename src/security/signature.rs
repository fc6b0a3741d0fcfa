//! Message-element signing, used for `CertificateInstallationRes`'s signed
//! contract/DH/EMAID elements and for the per-request-id signatures used in
//! `AuthorizationReq` (PnC) and `MeteringReceiptReq`.

use ring::rand::SystemRandom;
use ring::signature::{self, EcdsaKeyPair, KeyPair, UnparsedPublicKey};
use thiserror::Error;

use crate::security::certs::Certificate;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("signing key rejected by the crypto backend")]
    BadSigningKey,
    #[error("signature verification failed")]
    Invalid,
    #[error("chain verification failed: {0}")]
    ChainInvalid(#[from] crate::security::certs::CertVerifyError),
}

/// One element of the digest the EXI layer would canonicalize and sign: an
/// XML element id plus its EXI-encoded bytes. The core does not perform EXI
/// encoding itself (external codec), so callers pass the already-encoded
/// bytes for each element named in the signature's reference list.
pub struct SignatureElement<'a> {
    pub id: &'a str,
    pub exi_bytes: &'a [u8],
}

fn canonical_digest(elements: &[SignatureElement<'_>]) -> Vec<u8> {
    let mut buf = Vec::new();
    for element in elements {
        buf.extend_from_slice(element.id.as_bytes());
        buf.extend_from_slice(element.exi_bytes);
    }
    ring::digest::digest(&ring::digest::SHA256, &buf).as_ref().to_vec()
}

/// Signs the canonical digest of `elements` with `signing_key` (a PKCS#8
/// ECDSA P-256 private key, as held by the CPS for contract-certificate
/// installation or by the SECC for sales-tariff signing).
pub fn create_signature(
    elements: &[SignatureElement<'_>],
    signing_key_pkcs8: &[u8],
) -> Result<Vec<u8>, SignatureError> {
    let key_pair = EcdsaKeyPair::from_pkcs8(
        &signature::ECDSA_P256_SHA256_ASN1_SIGNING,
        signing_key_pkcs8,
        &SystemRandom::new(),
    )
    .map_err(|_| SignatureError::BadSigningKey)?;
    let digest = canonical_digest(elements);
    let sig = key_pair
        .sign(&SystemRandom::new(), &digest)
        .map_err(|_| SignatureError::BadSigningKey)?;
    Ok(sig.as_ref().to_vec())
}

/// Verifies `signature` over `elements` using `leaf_cert`'s public key. When
/// `sub_ca_certs` and `root` are supplied, the leaf is also chain-verified
/// first (`spec.md` §4.2: "When sub-CA/root are supplied the leaf is also
/// chain-verified").
pub fn verify_signature(
    sig: &[u8],
    elements: &[SignatureElement<'_>],
    leaf_cert: &Certificate,
    chain: Option<(&[Certificate], &Certificate)>,
) -> Result<(), SignatureError> {
    if let Some((sub_cas, root)) = chain {
        crate::security::certs::verify_certs(
            leaf_cert,
            sub_cas,
            root,
            chrono::Utc::now(),
            &crate::security::certs::NoRevocationCheck,
        )?;
    }

    let digest = canonical_digest(elements);
    let key = UnparsedPublicKey::new(&signature::ECDSA_P256_SHA256_ASN1, &leaf_cert.public_key);
    key.verify(&digest, sig).map_err(|_| SignatureError::Invalid)
}

impl<'a> SignatureElement<'a> {
    pub fn new(id: &'a str, exi_bytes: &'a [u8]) -> Self {
        SignatureElement { id, exi_bytes }
    }
}
