//! Encrypted record layout.
//!
//! Each stored credential is a `{data, iv}` pair: the AES-GCM
//! ciphertext (with its authentication tag) and the nonce used for
//! that one encryption.  Byte fields serialize as base64 strings in
//! the JSON store rather than raw byte arrays.

use serde::{Deserialize, Serialize};

/// A single encrypted credential as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// Ciphertext bytes, including the 16-byte GCM tag.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub data: Vec<u8>,

    /// The 12-byte nonce generated for this encryption.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub iv: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
