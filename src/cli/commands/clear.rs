//! `glossa clear` — delete every stored API key.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_secret_store, Cli};
use crate::errors::{GlossaError, Result};

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Delete all stored API keys?")
            .default(false)
            .interact()
            .map_err(|e| GlossaError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut store = open_secret_store(cli)?;
    let removed = store.clear_all()?;

    if removed == 0 {
        output::info("No stored API keys to remove.");
    } else {
        output::success(&format!("Removed {removed} stored API key(s)"));
    }

    Ok(())
}
