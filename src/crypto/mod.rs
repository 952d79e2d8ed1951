//! Cryptographic primitives for the credential store.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 key derivation (`kdf`)
//! - Zeroize-on-drop key material wrapper (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_store_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_store_key, generate_salt};
pub use keys::DerivedKey;
