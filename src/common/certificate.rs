//! Certificate-chain and key-exchange datatypes used by the PnC
//! (Plug & Charge) sub-protocol: `CertificateInstallation`, `PaymentDetails`.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// DER-encoded leaf certificate plus an ordered list of DER-encoded
/// sub-CA certificates, as exchanged in `CertificateInstallationRes` and
/// `PaymentDetailsReq`. The chain is leaf-first.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateChain {
    pub certificate: Vec<u8>,
    pub sub_certificates: Option<SubCertificates>,
}

impl CertificateChain {
    pub fn leaf_only(certificate: Vec<u8>) -> Self {
        CertificateChain { certificate, sub_certificates: None }
    }

    /// Chain length excluding the leaf, i.e. the number of sub-CAs. Used by
    /// `security::certs::verify_certs` to enforce the `<= 2 sub-CAs` limit.
    pub fn sub_ca_count(&self) -> usize {
        self.sub_certificates.as_ref().map_or(0, |s| s.certificates.len())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubCertificates {
    pub certificates: Vec<Vec<u8>>,
}

/// Diffie-Hellman public key sent alongside an encrypted contract private
/// key in `CertificateInstallationRes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DhPublicKey {
    pub id: String,
    pub value: Vec<u8>,
}

/// Contract private key, encrypted to the OEM leaf certificate's public key
/// via ECDH, as produced by `security::key_exchange::encrypt_priv_key`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKey {
    pub id: String,
    pub value: Vec<u8>,
}

/// E-Mobility Account Identifier, read from the contract certificate's
/// Common Name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Emaid {
    pub value: String,
}

impl Emaid {
    /// 14-character placeholder used by the failed-response registry.
    pub fn placeholder() -> Self {
        Emaid { value: "123456789ABCDE".to_string() }
    }
}
