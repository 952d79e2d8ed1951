//! In-memory key material handling.

use zeroize::Zeroize;

use crate::crypto::kdf::KEY_LEN;

/// A wrapper around the 32-byte derived store key that zeroes its
/// memory when dropped.
///
/// The key is owned exclusively by the operation that derived it: it
/// is re-derived from the installation identifier + salt on every
/// encrypt/decrypt call and never cached or persisted.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes produced by the KDF.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
