//! Library-level tests for the credential store contract.

use glossa::provider::Provider;
use glossa::secrets::SecretStore;
use tempfile::TempDir;

fn open(tmp: &TempDir) -> SecretStore {
    SecretStore::open(&tmp.path().join("store.json")).unwrap()
}

#[test]
fn store_then_get_returns_exactly_what_was_stored() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(&tmp);

    let samples = [
        "sk-abc123",
        "a",
        "with spaces and\ttabs",
        "trailing-newline\n",
        "ключ-鍵-🔐",
        "0123456789012345678901234567890123456789012345678901234567890123",
    ];

    for (i, sample) in samples.iter().enumerate() {
        let provider = Provider::ALL[i % Provider::ALL.len()];
        store.store_secret(provider, Some(sample)).unwrap();
        assert_eq!(
            store.get_secret(provider).unwrap().as_deref(),
            Some(*sample),
            "round trip failed for sample {i}"
        );
    }
}

#[test]
fn fresh_install_scenario() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store.json");

    // No store file exists yet.
    assert!(!path.exists());

    let mut store = SecretStore::open(&path).unwrap();
    store
        .store_secret(Provider::OpenAi, Some("sk-abc123"))
        .unwrap();

    // The salt was created and persisted on first use.
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("encryption_salt"));

    assert_eq!(
        store.get_secret(Provider::OpenAi).unwrap().as_deref(),
        Some("sk-abc123")
    );
    assert_eq!(store.get_secret(Provider::Gemini).unwrap(), None);
}

#[test]
fn two_writes_to_the_same_provider_keep_the_last() {
    let tmp = TempDir::new().unwrap();
    let mut store = open(&tmp);

    store.store_secret(Provider::Claude, Some("first")).unwrap();
    store.store_secret(Provider::Claude, Some("second")).unwrap();

    assert_eq!(
        store.get_secret(Provider::Claude).unwrap().as_deref(),
        Some("second")
    );
}

#[test]
fn records_decrypt_across_separate_store_handles() {
    let tmp = TempDir::new().unwrap();

    {
        let mut store = open(&tmp);
        store.store_secret(Provider::Ollama, Some("token")).unwrap();
    }

    // A second handle re-derives the same key from the persisted
    // identifier + salt.
    let mut store = open(&tmp);
    assert_eq!(
        store.get_secret(Provider::Ollama).unwrap().as_deref(),
        Some("token")
    );
}
