//! AES-256-GCM sealing with HKDF-SHA256 key derivation.
//!
//! Each sealed payload gets its own random salt, so the master key is never
//! used directly as a cipher key. The item key is bound in as associated data:
//! a payload copied under another key fails to open.

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

const NONCE_SIZE: usize = 12;
const SALT_SIZE: usize = 32;

/// Length of the master key in bytes.
pub const KEY_SIZE: usize = 32;

/// HKDF info string used to domain-separate derived keys.
const HKDF_INFO: &[u8] = b"oktakey-file-backend-v1";

/// Output of [`seal`]: `nonce || ciphertext_with_tag` and the HKDF salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub payload: Vec<u8>,
    pub salt: Vec<u8>,
}

fn derive_key(master_key: &[u8], salt: &[u8]) -> Zeroizing<[u8; KEY_SIZE]> {
    let hk = Hkdf::<Sha256>::new(Some(salt), master_key);
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    // expand cannot fail when output length <= 255 * hash-length
    hk.expand(HKDF_INFO, &mut okm[..])
        .expect("HKDF expand should not fail for 32-byte output");
    okm
}

/// Encrypt `plaintext` for storage under `item_key`.
pub fn seal(master_key: &[u8], item_key: &str, plaintext: &[u8]) -> Result<Sealed> {
    let mut salt = vec![0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(master_key, &salt);
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| SecretError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: item_key.as_bytes(),
            },
        )
        .map_err(|e| SecretError::EncryptionFailed(e.to_string()))?;

    let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);

    Ok(Sealed { payload, salt })
}

/// Decrypt a payload produced by [`seal`] for the same `item_key`.
pub fn open(master_key: &[u8], item_key: &str, sealed: &Sealed) -> Result<Vec<u8>> {
    if sealed.payload.len() < NONCE_SIZE {
        return Err(SecretError::DecryptionFailed(
            "ciphertext too short".to_string(),
        ));
    }

    let (nonce_bytes, ciphertext) = sealed.payload.split_at(NONCE_SIZE);

    let key = derive_key(master_key, &sealed.salt);
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| SecretError::DecryptionFailed(e.to_string()))?;

    cipher
        .decrypt(
            Nonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad: item_key.as_bytes(),
            },
        )
        .map_err(|_| {
            SecretError::DecryptionFailed(format!(
                "'{item_key}' could not be authenticated (wrong master key or tampered file)"
            ))
        })
}

/// Generate a new random 256-bit master key.
pub fn generate_master_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_SIZE]);
    rand::thread_rng().fill_bytes(&mut key[..]);
    key
}
