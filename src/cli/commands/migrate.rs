//! `glossa migrate` — re-encrypt a credential stored in plaintext by
//! releases before 0.2.
//!
//! Safe to run any number of times; once the legacy entry is gone this
//! is a no-op.

use crate::cli::output;
use crate::cli::{load_settings, open_secret_store, Cli};
use crate::errors::Result;
use crate::provider::Provider;

/// Execute the `migrate` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let mut store = open_secret_store(cli)?;

    let provider = Provider::detect(&settings.api_endpoint);

    if store.migrate_legacy_secret(&settings.api_endpoint)? {
        output::success(&format!(
            "Legacy plaintext API key re-encrypted under provider '{provider}'"
        ));
    } else {
        output::info("No legacy plaintext credential found — nothing to migrate.");
    }

    Ok(())
}
