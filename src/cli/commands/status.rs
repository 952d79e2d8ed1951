//! `glossa status` — show providers and which keys are saved.
//!
//! Key presence comes from the record-existence check only; plaintext
//! is never decrypted for display.

use crate::cli::output::{self, ProviderRow};
use crate::cli::{load_settings, open_secret_store, Cli};
use crate::errors::Result;
use crate::provider::Provider;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = open_secret_store(cli)?;

    let active = settings.resolved_provider();
    let source = if settings.provider.is_some() {
        "pinned in config"
    } else {
        "detected from endpoint"
    };

    output::info(&format!("Active provider: {active} ({source})"));

    if settings.api_endpoint.is_empty() {
        output::warning("No API endpoint configured — run `glossa configure`.");
    }

    let rows: Vec<ProviderRow> = Provider::ALL
        .iter()
        .map(|&p| ProviderRow {
            id: p.id(),
            active: p == active,
            key_saved: store.has_secret(p),
            endpoint: if p == active && !settings.api_endpoint.is_empty() {
                settings.api_endpoint.clone()
            } else {
                p.default_endpoint().unwrap_or("\u{2014}").to_string()
            },
            model: if p == active {
                settings.model().to_string()
            } else {
                p.default_model().to_string()
            },
        })
        .collect();

    output::print_provider_table(&rows);

    Ok(())
}
