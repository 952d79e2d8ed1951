//! Encrypted credential store.
//!
//! `SecretStore` keeps one encrypted record per provider in the local
//! store, under namespaced `secret:<provider>` keys.  The encryption
//! key is re-derived on every operation from the installation
//! identifier + persisted salt; it never leaves the call that derived
//! it.
//!
//! A record that fails to decrypt (bad tag, bad nonce, invalid UTF-8,
//! malformed JSON shape) is purged and reported as absent.  Corrupt
//! and missing records are indistinguishable to callers; both surface
//! as "no credentials configured".

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::distr::Alphanumeric;
use rand::Rng;
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_store_key, generate_salt, SALT_LEN};
use crate::crypto::keys::DerivedKey;
use crate::errors::{GlossaError, Result};
use crate::provider::Provider;
use crate::storage::LocalStore;

use super::record::EncryptedRecord;

/// Store key under which the KDF salt is persisted (not secret).
const SALT_KEY: &str = "encryption_salt";

/// Store key for the stable per-installation identifier.
const INSTALLATION_ID_KEY: &str = "installation_id";

/// Namespace prefix for per-provider encrypted records.
const SECRET_PREFIX: &str = "secret:";

/// Unnamespaced key releases before 0.2 used for the plaintext API key.
const LEGACY_API_KEY: &str = "api_key";

/// Length of the generated installation identifier.
const INSTALLATION_ID_LEN: usize = 32;

/// The credential store handle.  Open one per invocation with
/// [`SecretStore::open`] and pass it to whatever needs credentials.
pub struct SecretStore {
    store: LocalStore,
}

impl SecretStore {
    /// Open the credential store backed by the file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let store = LocalStore::open(path)?;
        Ok(Self { store })
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Store an API key for `provider`, encrypted at rest.
    ///
    /// A `None` or empty value deletes any existing record instead.
    pub fn store_secret(&mut self, provider: Provider, secret: Option<&str>) -> Result<()> {
        let record_key = Self::record_key(provider);

        match secret {
            None | Some("") => {
                if self.store.remove(&record_key) {
                    self.store.save()?;
                }
                Ok(())
            }
            Some(value) => {
                let key = self.derive_key()?;
                let (data, iv) = encrypt(key.as_bytes(), value.as_bytes())?;

                self.store
                    .insert(&record_key, &EncryptedRecord { data, iv })?;
                self.store.save()
            }
        }
    }

    /// Decrypt and return the API key stored for `provider`.
    ///
    /// Returns `None` if no record exists.  A record that fails to
    /// decrypt is deleted and also reported as `None`; there is no
    /// recovery path for corrupted ciphertext.
    pub fn get_secret(&mut self, provider: Provider) -> Result<Option<String>> {
        let record_key = Self::record_key(provider);

        let record: EncryptedRecord = match self.store.get_as(&record_key) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            // The record exists but does not even parse as {data, iv}.
            Err(_) => return self.purge_corrupt(&record_key),
        };

        let key = self.derive_key()?;

        let plaintext = match decrypt(key.as_bytes(), &record.data, &record.iv) {
            Ok(plaintext) => plaintext,
            Err(GlossaError::DecryptionFailed) => return self.purge_corrupt(&record_key),
            Err(e) => return Err(e),
        };

        match String::from_utf8(plaintext) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let mut bad_bytes = e.into_bytes();
                bad_bytes.zeroize();
                self.purge_corrupt(&record_key)
            }
        }
    }

    /// Returns `true` if a record exists for `provider`.
    ///
    /// This is a metadata-only check — no decryption is performed.
    pub fn has_secret(&self, provider: Provider) -> bool {
        self.store.contains(&Self::record_key(provider))
    }

    /// Delete every stored credential.  Returns how many were removed.
    ///
    /// The salt and installation identifier are left in place, so keys
    /// stored after a future re-population decrypt with the same
    /// derived key.  Salt rotation is a separate, unimplemented
    /// concern.
    pub fn clear_all(&mut self) -> Result<usize> {
        let keys = self.store.keys_with_prefix(SECRET_PREFIX);
        for key in &keys {
            self.store.remove(key);
        }
        if !keys.is_empty() {
            self.store.save()?;
        }
        Ok(keys.len())
    }

    /// One-time migration of a credential stored in plaintext by
    /// releases before 0.2.
    ///
    /// If the legacy unnamespaced key is present, its provider is
    /// determined from the co-located endpoint configuration, the
    /// value is re-stored encrypted under the new scheme, and the
    /// plaintext original is removed.  Returns whether a migration
    /// occurred.  Idempotent: once the legacy key is gone, repeated
    /// calls are no-ops.
    pub fn migrate_legacy_secret(&mut self, configured_endpoint: &str) -> Result<bool> {
        let Some(value) = self.store.get(LEGACY_API_KEY) else {
            return Ok(false);
        };

        let plaintext = value.as_str().unwrap_or_default().to_string();

        if plaintext.is_empty() {
            // Nothing worth migrating; still drop the stale entry.
            self.store.remove(LEGACY_API_KEY);
            self.store.save()?;
            return Ok(false);
        }

        let provider = Provider::detect(configured_endpoint);
        self.store_secret(provider, Some(&plaintext))?;

        self.store.remove(LEGACY_API_KEY);
        self.store.save()?;

        Ok(true)
    }

    // ------------------------------------------------------------------
    // Key material
    // ------------------------------------------------------------------

    /// Derive the store key from the installation identifier + salt.
    ///
    /// Both inputs are created (and persisted) on first use; afterwards
    /// they never change.  The derived key lives only as long as the
    /// returned handle.
    fn derive_key(&mut self) -> Result<DerivedKey> {
        let installation_id = self.installation_id()?;
        let salt = self.salt()?;
        let key = derive_store_key(&installation_id, &salt)?;
        Ok(DerivedKey::new(key))
    }

    /// Load the persisted salt, creating it exactly once if absent.
    ///
    /// Losing the salt invalidates every stored record irreversibly,
    /// which is why it is written to disk the moment it is generated.
    fn salt(&mut self) -> Result<[u8; SALT_LEN]> {
        if let Some(encoded) = self.store.get_as::<String>(SALT_KEY)? {
            let bytes = BASE64
                .decode(&encoded)
                .map_err(|e| GlossaError::InvalidStoreFormat(format!("stored salt: {e}")))?;
            return bytes.as_slice().try_into().map_err(|_| {
                GlossaError::InvalidStoreFormat(format!(
                    "stored salt has wrong length {} (expected {SALT_LEN})",
                    bytes.len()
                ))
            });
        }

        let salt = generate_salt()?;
        self.store.insert(SALT_KEY, &BASE64.encode(salt))?;
        self.store.save()?;
        Ok(salt)
    }

    /// Load the installation identifier, creating it once if absent.
    ///
    /// The identifier is a random alphanumeric string; it is stable for
    /// the lifetime of the store file and is not a secret.
    fn installation_id(&mut self) -> Result<String> {
        if let Some(id) = self.store.get_as::<String>(INSTALLATION_ID_KEY)? {
            if !id.is_empty() {
                return Ok(id);
            }
        }

        let id: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(INSTALLATION_ID_LEN)
            .map(char::from)
            .collect();

        self.store.insert(INSTALLATION_ID_KEY, &id)?;
        self.store.save()?;
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn record_key(provider: Provider) -> String {
        format!("{SECRET_PREFIX}{}", provider.id())
    }

    /// Drop a record that failed decryption and report it as absent.
    fn purge_corrupt(&mut self, record_key: &str) -> Result<Option<String>> {
        if self.store.remove(record_key) {
            self.store.save()?;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn store_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join("store.json")
    }

    fn open(tmp: &TempDir) -> SecretStore {
        SecretStore::open(&store_path(tmp)).unwrap()
    }

    #[test]
    fn round_trips_a_secret() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store
            .store_secret(Provider::OpenAi, Some("sk-abc123"))
            .unwrap();

        assert_eq!(
            store.get_secret(Provider::OpenAi).unwrap().as_deref(),
            Some("sk-abc123")
        );
    }

    #[test]
    fn round_trips_for_every_provider() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        for provider in Provider::ALL {
            let value = format!("key-for-{provider}");
            store.store_secret(provider, Some(&value)).unwrap();
            assert_eq!(store.get_secret(provider).unwrap().as_deref(), Some(value.as_str()));
        }
    }

    #[test]
    fn round_trips_non_ascii_values() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store
            .store_secret(Provider::Gemini, Some("鍵🔑-ключ"))
            .unwrap();

        assert_eq!(
            store.get_secret(Provider::Gemini).unwrap().as_deref(),
            Some("鍵🔑-ключ")
        );
    }

    #[test]
    fn absent_provider_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        assert_eq!(store.get_secret(Provider::Claude).unwrap(), None);
    }

    #[test]
    fn secrets_survive_reopening_the_store() {
        let tmp = TempDir::new().unwrap();
        {
            let mut store = open(&tmp);
            store
                .store_secret(Provider::Ollama, Some("local-token"))
                .unwrap();
        }

        let mut reopened = open(&tmp);
        assert_eq!(
            reopened.get_secret(Provider::Ollama).unwrap().as_deref(),
            Some("local-token")
        );
    }

    #[test]
    fn storing_empty_or_none_deletes_the_record() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store.store_secret(Provider::OpenAi, Some("sk-1")).unwrap();
        store.store_secret(Provider::OpenAi, None).unwrap();
        assert_eq!(store.get_secret(Provider::OpenAi).unwrap(), None);
        assert!(!store.has_secret(Provider::OpenAi));

        store.store_secret(Provider::OpenAi, Some("sk-2")).unwrap();
        store.store_secret(Provider::OpenAi, Some("")).unwrap();
        assert!(!store.has_secret(Provider::OpenAi));
    }

    #[test]
    fn has_secret_does_not_require_decryption() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        store.store_secret(Provider::OpenAi, Some("sk-1")).unwrap();

        // Corrupt the record on disk; existence must still report true.
        flip_record_byte(&store_path(&tmp), "secret:openai", "data");
        let store = open(&tmp);
        assert!(store.has_secret(Provider::OpenAi));
    }

    #[test]
    fn salt_is_created_once_and_reused() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store.store_secret(Provider::OpenAi, Some("sk-abc123")).unwrap();
        let salt_before = read_entry(&store_path(&tmp), "encryption_salt");

        store.store_secret(Provider::Gemini, Some("other")).unwrap();
        let salt_after = read_entry(&store_path(&tmp), "encryption_salt");

        assert_eq!(salt_before, salt_after);
    }

    // The scenario from the store contract: first write creates the
    // salt, the stored provider reads back, others stay absent.
    #[test]
    fn first_store_creates_salt_and_isolates_providers() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store
            .store_secret(Provider::OpenAi, Some("sk-abc123"))
            .unwrap();

        assert!(read_entry(&store_path(&tmp), "encryption_salt").is_string());
        assert_eq!(
            store.get_secret(Provider::OpenAi).unwrap().as_deref(),
            Some("sk-abc123")
        );
        assert_eq!(store.get_secret(Provider::Gemini).unwrap(), None);
    }

    #[test]
    fn tampered_data_purges_the_record() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        store.store_secret(Provider::OpenAi, Some("sk-1")).unwrap();

        flip_record_byte(&store_path(&tmp), "secret:openai", "data");

        let mut store = open(&tmp);
        assert_eq!(store.get_secret(Provider::OpenAi).unwrap(), None);
        // The corrupt record was deleted, not just skipped.
        assert!(!store.has_secret(Provider::OpenAi));
    }

    #[test]
    fn tampered_iv_purges_the_record() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        store.store_secret(Provider::Claude, Some("sk-1")).unwrap();

        flip_record_byte(&store_path(&tmp), "secret:claude", "iv");

        let mut store = open(&tmp);
        assert_eq!(store.get_secret(Provider::Claude).unwrap(), None);
        assert!(!store.has_secret(Provider::Claude));
    }

    #[test]
    fn malformed_record_shape_purges_the_record() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        store.store_secret(Provider::OpenAi, Some("sk-1")).unwrap();

        rewrite_entry(
            &store_path(&tmp),
            "secret:openai",
            serde_json::json!({"unexpected": true}),
        );

        let mut store = open(&tmp);
        assert_eq!(store.get_secret(Provider::OpenAi).unwrap(), None);
        assert!(!store.has_secret(Provider::OpenAi));
    }

    #[test]
    fn clear_all_removes_secrets_but_keeps_salt() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);

        store.store_secret(Provider::OpenAi, Some("a")).unwrap();
        store.store_secret(Provider::Gemini, Some("b")).unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(!store.has_secret(Provider::OpenAi));
        assert!(!store.has_secret(Provider::Gemini));
        assert!(read_entry(&store_path(&tmp), "encryption_salt").is_string());

        // Clearing an already-empty store is a clean no-op.
        assert_eq!(store.clear_all().unwrap(), 0);
    }

    #[test]
    fn migrates_legacy_plaintext_key_once() {
        let tmp = TempDir::new().unwrap();
        rewrite_entry(
            &store_path(&tmp),
            "api_key",
            Value::String("legacy-sk-9".into()),
        );

        let mut store = open(&tmp);
        let endpoint = "https://api.openai.com/v1/chat/completions";

        assert!(store.migrate_legacy_secret(endpoint).unwrap());
        assert_eq!(
            store.get_secret(Provider::OpenAi).unwrap().as_deref(),
            Some("legacy-sk-9")
        );
        assert!(read_entry(&store_path(&tmp), "api_key").is_null());

        // Second call: legacy key is gone, nothing changes.
        assert!(!store.migrate_legacy_secret(endpoint).unwrap());
        assert_eq!(
            store.get_secret(Provider::OpenAi).unwrap().as_deref(),
            Some("legacy-sk-9")
        );
    }

    #[test]
    fn migration_uses_the_configured_endpoint_for_detection() {
        let tmp = TempDir::new().unwrap();
        rewrite_entry(&store_path(&tmp), "api_key", Value::String("g-key".into()));

        let mut store = open(&tmp);
        assert!(store
            .migrate_legacy_secret("https://generativelanguage.googleapis.com/v1beta/models")
            .unwrap());

        assert!(store.has_secret(Provider::Gemini));
        assert!(!store.has_secret(Provider::OpenAi));
    }

    #[test]
    fn migration_with_unconfigured_endpoint_lands_in_default_bucket() {
        let tmp = TempDir::new().unwrap();
        rewrite_entry(&store_path(&tmp), "api_key", Value::String("k".into()));

        let mut store = open(&tmp);
        assert!(store.migrate_legacy_secret("").unwrap());
        assert!(store.has_secret(Provider::Custom));
    }

    #[test]
    fn migration_drops_an_empty_legacy_entry_without_migrating() {
        let tmp = TempDir::new().unwrap();
        rewrite_entry(&store_path(&tmp), "api_key", Value::String(String::new()));

        let mut store = open(&tmp);
        assert!(!store.migrate_legacy_secret("").unwrap());
        assert!(read_entry(&store_path(&tmp), "api_key").is_null());
    }

    #[test]
    fn migration_on_a_fresh_store_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(&tmp);
        assert!(!store.migrate_legacy_secret("https://api.openai.com").unwrap());
    }

    // ------------------------------------------------------------------
    // Raw store-file manipulation helpers
    // ------------------------------------------------------------------

    fn read_file(path: &std::path::Path) -> Value {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap(),
            Err(_) => serde_json::json!({
                "version": 1,
                "created_at": "2024-01-01T00:00:00Z",
                "entries": {}
            }),
        }
    }

    fn read_entry(path: &std::path::Path, key: &str) -> Value {
        read_file(path)["entries"]
            .get(key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn rewrite_entry(path: &std::path::Path, key: &str, value: Value) {
        let mut file = read_file(path);
        file["entries"][key] = value;
        fs::write(path, serde_json::to_string_pretty(&file).unwrap()).unwrap();
    }

    /// Flip one bit of a base64-encoded record field on disk.
    fn flip_record_byte(path: &std::path::Path, record_key: &str, field: &str) {
        let record = read_entry(path, record_key);
        let mut bytes = BASE64.decode(record[field].as_str().unwrap()).unwrap();
        bytes[0] ^= 0x01;

        let mut record = record;
        record[field] = Value::String(BASE64.encode(&bytes));
        rewrite_entry(path, record_key, record);
    }
}
