//! Loaded PKI material for the PnC (Plug & Charge) security services
//! (`spec.md` §4.2, §4.4).
//!
//! Turning the paths named by [`crate::config::PkiPaths`] into parsed
//! certificates and key bytes — and, for the contract certificate, fetching
//! a freshly MO-backend-issued one per EVCC — is the external PKI store's
//! job (`security::certs` module doc: "the certificate and key *store* ...
//! is an external collaborator"). `PkiMaterial` is the shape that store
//! hands the engine once it has done so; `run_iso2_session` only ever
//! borrows it.

use super::certs::Certificate;

#[derive(Debug, Clone)]
pub struct PkiMaterial {
    pub mo_root: Certificate,
    /// The CPS's own leaf certificate, sent back as the
    /// `SAProvisioningCertificateChain` so the EVCC can verify `cps_signing_key`'s
    /// signature over `CertificateInstallationRes`'s signed elements.
    pub cps_leaf: Certificate,
    /// PKCS#8 ECDSA P-256 private key matching `cps_leaf`'s public key.
    pub cps_signing_key: Vec<u8>,
    /// Leaf-first: the contract certificate this CPS currently has on hand
    /// to install, chaining to `mo_root`.
    pub contract_cert_chain: Vec<Certificate>,
    /// The contract certificate's private key, encrypted to the OEM leaf
    /// certificate's public key by `security::key_exchange::encrypt_priv_key`
    /// before it goes out on the wire.
    pub contract_private_key: Vec<u8>,
}

impl PkiMaterial {
    pub fn contract_leaf(&self) -> &Certificate {
        &self.contract_cert_chain[0]
    }

    pub fn contract_sub_cas(&self) -> &[Certificate] {
        &self.contract_cert_chain[1..]
    }
}
