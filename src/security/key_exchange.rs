//! ECDH-based encryption of the contract private key for
//! `CertificateInstallationRes`, per `spec.md` §4.2.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::agreement::{agree_ephemeral, EphemeralPrivateKey, UnparsedPublicKey, ECDH_P256};
use ring::hkdf::{Salt, HKDF_SHA256};
use ring::error::Unspecified;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyExchangeError {
    #[error("failed to generate an ephemeral DH keypair")]
    EncryptionError,
    #[error("could not read the contract private key to encrypt")]
    PrivateKeyReadError,
}

/// Encrypts `contract_private_key` to `oem_leaf_cert_public_key` via an
/// ephemeral ECDH P-256 key agreement: derives a symmetric key with HKDF-
/// SHA256 and seals the private key with AES-256-GCM. Returns
/// `(dh_public_key_bytes, encrypted_private_key_bytes)` where the encrypted
/// bytes are `nonce || ciphertext || tag`.
pub fn encrypt_priv_key(
    oem_leaf_cert_public_key: &[u8],
    contract_private_key: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), KeyExchangeError> {
    if contract_private_key.is_empty() {
        return Err(KeyExchangeError::PrivateKeyReadError);
    }

    let rng = SystemRandom::new();
    let ephemeral_private = EphemeralPrivateKey::generate(&ECDH_P256, &rng)
        .map_err(|_| KeyExchangeError::EncryptionError)?;
    let dh_public_key = ephemeral_private
        .compute_public_key()
        .map_err(|_| KeyExchangeError::EncryptionError)?;

    let peer_public_key = UnparsedPublicKey::new(&ECDH_P256, oem_leaf_cert_public_key);

    let encrypted = agree_ephemeral(ephemeral_private, &peer_public_key, |shared_secret| {
        let salt = Salt::new(HKDF_SHA256, b"iso15118-secc-contract-key");
        let prk = salt.extract(shared_secret);
        let okm = prk.expand(&[b"contract-private-key-wrap"], HKDF_SHA256)?;
        let mut key_bytes = [0u8; 32];
        okm.fill(&mut key_bytes)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill(&mut nonce_bytes)?;

        let unbound = UnboundKey::new(&AES_256_GCM, &key_bytes)?;
        let key = LessSafeKey::new(unbound);
        let mut in_out = contract_private_key.to_vec();
        key.seal_in_place_append_tag(Nonce::assume_unique_for_key(nonce_bytes), Aad::empty(), &mut in_out)?;

        let mut out = nonce_bytes.to_vec();
        out.extend_from_slice(&in_out);
        Ok::<Vec<u8>, Unspecified>(out)
    })
    .map_err(|_| KeyExchangeError::EncryptionError)?;

    Ok((dh_public_key.as_ref().to_vec(), encrypted.map_err(|_| KeyExchangeError::EncryptionError)?))
}
