//! Certificate-chain verification.
//!
//! The certificate and key *store* (loading DER bytes from disk, tracking a
//! revocation list) is an external collaborator per `spec.md` §1; this
//! module consumes already-parsed [`Certificate`] values from that store and
//! performs the protocol-level checks the SECC core is responsible for:
//! chain length, per-certificate signature-to-issuer, validity window, and a
//! revocation hook.

use chrono::{DateTime, Utc};
use ring::signature::{self, UnparsedPublicKey};
use thiserror::Error;

use crate::common::certificate::CertificateChain;

/// A certificate as handed to the Security Services by the (external) PKI
/// store: DER bytes for wire transport plus the fields this crate needs to
/// verify the chain, extracted once at load time rather than re-parsed here.
#[derive(Debug, Clone)]
pub struct Certificate {
    pub der: Vec<u8>,
    pub subject_cn: String,
    pub issuer_cn: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// SubjectPublicKeyInfo bytes, uncompressed point form, suitable for
    /// `ring::signature::UnparsedPublicKey` with `ECDSA_P256_SHA256_ASN1`.
    pub public_key: Vec<u8>,
    /// ASN.1 DER signature over `der`'s TBSCertificate, produced by `issuer_cn`'s key.
    pub signature: Vec<u8>,
}

/// A callback the engine uses to ask the (external) PKI store whether a
/// certificate has been revoked, keyed by subject CN. Kept as a trait object
/// rather than a concrete OCSP/CRL client since the revocation source is out
/// of scope for this crate.
pub trait RevocationCheck {
    fn is_revoked(&self, subject_cn: &str) -> bool;
}

/// A revocation check that never reports a revocation; used in tests and by
/// deployments that do not wire up a revocation source.
pub struct NoRevocationCheck;
impl RevocationCheck for NoRevocationCheck {
    fn is_revoked(&self, _subject_cn: &str) -> bool {
        false
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CertVerifyError {
    #[error("certificate chain has {0} sub-CAs, maximum is 2")]
    ChainTooLong(usize),
    #[error("certificate for {0} is not yet valid or has expired")]
    Expired(String),
    #[error("certificate for {0} has been revoked")]
    Revoked(String),
    #[error("signature verification failed for certificate issued to {0}")]
    BadSignature(String),
    #[error("chain does not terminate at the expected root ({0})")]
    UntrustedRoot(String),
}

/// Verifies `leaf` up through `sub_cas` (leaf-first) to `root`, checking
/// chain length, each signature, each validity window against `now`, and
/// revocation via `revocation`.
///
/// Mirrors `spec.md` §4.2's `verify_certs(leaf, sub_cas, root_cert_path)`;
/// here `root` is an already-loaded `Certificate` rather than a path, since
/// loading PKI material from disk belongs to the external store.
pub fn verify_certs(
    leaf: &Certificate,
    sub_cas: &[Certificate],
    root: &Certificate,
    now: DateTime<Utc>,
    revocation: &dyn RevocationCheck,
) -> Result<(), CertVerifyError> {
    if sub_cas.len() > 2 {
        return Err(CertVerifyError::ChainTooLong(sub_cas.len()));
    }

    let chain: Vec<&Certificate> = std::iter::once(leaf).chain(sub_cas.iter()).collect();

    for cert in &chain {
        check_validity(cert, now)?;
        if revocation.is_revoked(&cert.subject_cn) {
            return Err(CertVerifyError::Revoked(cert.subject_cn.clone()));
        }
    }

    for i in 0..chain.len() {
        let issuer = if i + 1 < chain.len() { chain[i + 1] } else { root };
        if chain[i].issuer_cn != issuer.subject_cn {
            return Err(CertVerifyError::UntrustedRoot(root.subject_cn.clone()));
        }
        verify_issued_by(chain[i], issuer)?;
    }

    let last = chain.last().unwrap();
    if last.issuer_cn != root.subject_cn {
        return Err(CertVerifyError::UntrustedRoot(root.subject_cn.clone()));
    }

    Ok(())
}

fn check_validity(cert: &Certificate, now: DateTime<Utc>) -> Result<(), CertVerifyError> {
    if now < cert.not_before || now > cert.not_after {
        return Err(CertVerifyError::Expired(cert.subject_cn.clone()));
    }
    Ok(())
}

fn verify_issued_by(cert: &Certificate, issuer: &Certificate) -> Result<(), CertVerifyError> {
    let key = UnparsedPublicKey::new(&signature::ECDSA_P256_SHA256_ASN1, &issuer.public_key);
    key.verify(&cert.der, &cert.signature)
        .map_err(|_| CertVerifyError::BadSignature(cert.subject_cn.clone()))
}

/// `CertificateChain` carries DER bytes only (the wire form); convenience
/// wiring for call sites that parsed the chain into [`Certificate`] values
/// through the external store but still need to round-trip the wire form.
pub fn chain_to_wire(leaf: &Certificate, sub_cas: &[Certificate]) -> CertificateChain {
    CertificateChain {
        certificate: leaf.der.clone(),
        sub_certificates: if sub_cas.is_empty() {
            None
        } else {
            Some(crate::common::certificate::SubCertificates {
                certificates: sub_cas.iter().map(|c| c.der.clone()).collect(),
            })
        },
    }
}
