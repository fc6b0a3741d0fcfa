use serde::{Deserialize, Serialize};

use crate::common::certificate::{CertificateChain, DhPublicKey, EncryptedPrivateKey};
use crate::response_code::ResponseCode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInstallationRequest {
    pub oem_provisioning_cert_chain: CertificateChain,
    pub list_of_root_certificate_ids: Vec<String>,
    /// Signature over this request's id, verified against
    /// `oem_provisioning_cert_chain`'s leaf before the response is built.
    pub id: String,
    pub signature: Vec<u8>,
}

/// `CertificateInstallationRes` carries four signed elements per `spec.md`
/// §4.4: contract cert chain, SA-provider (CPS) cert chain, the encrypted
/// contract private key, and the DH public key used to derive its wrapping
/// key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInstallationResponse {
    pub response_code: ResponseCode,
    pub contract_signature_cert_chain: CertificateChain,
    pub sa_provisioning_cert_chain: CertificateChain,
    pub contract_signature_encrypted_private_key: EncryptedPrivateKey,
    pub dh_public_key: DhPublicKey,
    pub emaid: crate::common::certificate::Emaid,
    pub id: String,
    pub signature: Vec<u8>,
}
