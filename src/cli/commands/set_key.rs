//! `glossa set-key` — store a provider API key, encrypted at rest.

use crate::cli::output;
use crate::cli::{load_settings, open_secret_store, read_secret_value, Cli};
use crate::errors::Result;
use crate::provider::Provider;

/// Execute the `set-key` command.
pub fn execute(cli: &Cli, value: Option<&str>, provider_flag: Option<Provider>) -> Result<()> {
    let settings = load_settings(cli)?;
    let provider = provider_flag.unwrap_or_else(|| settings.resolved_provider());

    let secret = read_secret_value(provider, value)?;

    let mut store = open_secret_store(cli)?;

    // An empty value removes the stored key — same contract as the
    // settings form it replaces.
    if secret.is_empty() {
        if store.has_secret(provider) {
            store.store_secret(provider, None)?;
            output::success(&format!("Removed stored API key for '{provider}'"));
        } else {
            output::info(&format!("No API key stored for '{provider}'."));
        }
        return Ok(());
    }

    store.store_secret(provider, Some(&secret))?;

    output::success(&format!("API key for '{provider}' encrypted and stored"));
    output::tip("The key never leaves this machine. Translate with `glossa translate`.");

    Ok(())
}
