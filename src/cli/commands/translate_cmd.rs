//! `glossa translate` — translate text with the configured provider.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::{config_dir, open_secret_store, Cli};
use crate::config::Settings;
use crate::errors::{GlossaError, Result};
use crate::provider::Provider;
use crate::translate::Translator;

/// Execute the `translate` command.
pub fn execute(cli: &Cli, text: Option<&str>, provider_flag: Option<Provider>) -> Result<()> {
    let text = match text {
        Some(t) => t.to_string(),
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        None => {
            return Err(GlossaError::CommandFailed(
                "no text to translate — pass TEXT or pipe stdin".into(),
            ))
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(GlossaError::CommandFailed("nothing to translate".into()));
    }

    let dir = config_dir(cli)?;
    let mut settings = Settings::load(&dir)?;
    if let Some(p) = provider_flag {
        settings.provider = Some(p);
    }

    if settings.api_endpoint.is_empty() {
        return Err(GlossaError::NotConfigured);
    }

    let mut store = open_secret_store(cli)?;

    // Transparently finish any pending migration from a pre-0.2 store.
    store.migrate_legacy_secret(&settings.api_endpoint)?;

    let provider = settings.resolved_provider();
    let api_key = store
        .get_secret(provider)?
        .map(Zeroizing::new)
        .ok_or(GlossaError::NotConfigured)?;

    let translator = Translator::new(&settings);
    let translation = translator.translate(text, &api_key)?;

    println!("{translation}");

    Ok(())
}
