//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The store key is derived from the installation identifier combined
//! with a fixed application constant, run against a persisted random
//! salt.  The iteration count makes derivation deliberately slow to
//! resist brute-force if the salt and identifier were ever exposed
//! separately from the ciphertext.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;

use crate::errors::{GlossaError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
const PBKDF2_ROUNDS: u32 = 100_000;

/// Application constant mixed into the key material alongside the
/// installation identifier, versioned so a future scheme change can
/// derive a different key from the same inputs.
const KDF_CONTEXT: &str = "glossa-credential-store-v1";

/// Derive the 32-byte store key from an installation identifier and salt.
///
/// The same identifier + salt always produce the same key.  Derivation
/// is pure and deterministic, so failures are never retried.
pub fn derive_store_key(installation_id: &str, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    if installation_id.is_empty() {
        return Err(GlossaError::KeyDerivationFailed(
            "installation identifier must not be empty".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(GlossaError::KeyDerivationFailed(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }

    let mut material = String::with_capacity(installation_id.len() + KDF_CONTEXT.len());
    material.push_str(installation_id);
    material.push_str(KDF_CONTEXT);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(material.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
///
/// The salt is not secret; it is persisted unencrypted next to the
/// records it protects.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| GlossaError::KeyDerivationFailed(format!("OS entropy source failed: {e}")))?;
    Ok(salt)
}
