//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce from
//! the OS CSPRNG and returns it alongside the ciphertext.  The nonce
//! is stored as a separate record field (`iv`), not prepended to the
//! ciphertext.  Nonce reuse under the same key breaks confidentiality
//! for that key, so the nonce is never supplied by the caller.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{GlossaError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `(ciphertext, nonce)`.  The ciphertext carries the 16-byte
/// GCM authentication tag, so its length is plaintext length + 16.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| GlossaError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| GlossaError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok((ciphertext, nonce.to_vec()))
}

/// Decrypt data that was produced by `encrypt`.
///
/// Fails with `DecryptionFailed` if the nonce has the wrong length or
/// the authentication tag does not verify (wrong key, corrupted data,
/// or tampering).
pub fn decrypt(key: &[u8], ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(GlossaError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| GlossaError::DecryptionFailed)?;

    let nonce = Nonce::from_slice(nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| GlossaError::DecryptionFailed)
}
