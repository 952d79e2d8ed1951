//! CLI module — Clap argument parser, output helpers, and command
//! implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{Settings, TranslationStyle};
use crate::errors::{GlossaError, Result};
use crate::provider::Provider;
use crate::secrets::SecretStore;

/// Glossa CLI: LLM-backed translation with encrypted API key storage.
#[derive(Parser)]
#[command(
    name = "glossa",
    about = "Translate text with pluggable LLM providers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for the config file and credential store
    /// (default: ~/.config/glossa)
    #[arg(long, global = true, env = "GLOSSA_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show or update configuration
    Configure(ConfigureArgs),

    /// Store a provider API key (encrypted at rest)
    SetKey {
        /// The API key (omit for interactive prompt; empty removes it)
        value: Option<String>,

        /// Store the key for this provider instead of the configured one
        #[arg(long)]
        provider: Option<Provider>,
    },

    /// Show providers, the active configuration, and which keys are saved
    Status,

    /// Delete every stored API key
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Re-encrypt a credential stored in plaintext by releases before 0.2
    Migrate,

    /// Translate text (from the argument or stdin)
    Translate {
        /// Text to translate (omit to read from stdin)
        text: Option<String>,

        /// Use this provider for the request instead of the configured one
        #[arg(long)]
        provider: Option<Provider>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Arguments for `glossa configure`.
#[derive(clap::Args)]
pub struct ConfigureArgs {
    /// Apply a provider preset (fills the endpoint and model defaults)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// API endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Primary target language
    #[arg(long)]
    pub first_language: Option<String>,

    /// Fallback target when the text is already in the first language
    #[arg(long)]
    pub second_language: Option<String>,

    /// Translation style: balanced, literal, or natural
    #[arg(long)]
    pub style: Option<TranslationStyle>,

    /// Pin the provider explicitly, bypassing endpoint detection
    #[arg(long)]
    pub force_provider: Option<Provider>,

    /// Remove a pinned provider and return to endpoint detection
    #[arg(long)]
    pub clear_forced_provider: bool,
}

impl ConfigureArgs {
    /// `true` when no flag was passed at all (show-only invocation).
    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.endpoint.is_none()
            && self.model.is_none()
            && self.first_language.is_none()
            && self.second_language.is_none()
            && self.style.is_none()
            && self.force_provider.is_none()
            && !self.clear_forced_provider
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the config directory from the CLI arguments.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    crate::config::config_dir(cli.config_dir.as_deref())
}

/// Load settings from the resolved config directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&config_dir(cli)?)
}

/// Open the credential store in the resolved config directory.
pub fn open_secret_store(cli: &Cli) -> Result<SecretStore> {
    let dir = config_dir(cli)?;
    SecretStore::open(&crate::config::store_path(&dir))
}

/// Get an API key value, trying in order:
/// 1. Inline value on the command line (shell-history warning)
/// 2. Piped input (stdin is not a terminal)
/// 3. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn read_secret_value(provider: Provider, value: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    let key = dialoguer::Password::new()
        .with_prompt(format!("Enter API key for {provider}"))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| GlossaError::CommandFailed(format!("input prompt: {e}")))?;

    Ok(Zeroizing::new(key))
}
