//! Security Services: certificate-chain verification, message signing, and
//! contract private-key encryption for Plug & Charge (`spec.md` §4.2).

pub mod certs;
pub mod key_exchange;
pub mod pki;
pub mod signature;

pub use certs::{verify_certs, CertVerifyError};
pub use key_exchange::{encrypt_priv_key, KeyExchangeError};
pub use pki::PkiMaterial;
pub use signature::{create_signature, verify_signature, SignatureElement, SignatureError};

use thiserror::Error;

/// Discriminated error kind for all Security Services operations, letting
/// the state machine choose the most specific `FAILED_*` response code
/// (`spec.md` §4.2 / §7).
#[derive(Error, Debug)]
pub enum SecurityError {
    #[error(transparent)]
    CertVerify(#[from] CertVerifyError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    KeyExchange(#[from] KeyExchangeError),
}
