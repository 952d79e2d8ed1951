//! `glossa completions` — generate shell completion scripts.
//!
//! Usage:
//!   glossa completions bash > ~/.bash_completion.d/glossa
//!   glossa completions zsh
//!   glossa completions fish

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{GlossaError, Result};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "glossa", &mut io::stdout());
    Ok(())
}

/// Parse a shell name string into a `Shell` enum.
fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "ps" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        other => Err(GlossaError::CommandFailed(format!(
            "unknown shell '{other}' — supported: bash, zsh, fish, powershell, elvish"
        ))),
    }
}
