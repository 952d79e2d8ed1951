//! Configuration — settings file and config-directory resolution.

pub mod settings;

pub use settings::{Settings, TranslationStyle};

use std::path::{Path, PathBuf};

use crate::errors::{GlossaError, Result};

/// Name of the credential store file inside the config directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Resolve the Glossa config directory.
///
/// An explicit override (from `--config-dir` or `GLOSSA_CONFIG_DIR`)
/// wins; otherwise `$HOME/.config/glossa` on all platforms, with
/// `%USERPROFILE%` as the Windows fallback.
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| {
            GlossaError::ConfigError(
                "could not determine home directory — set GLOSSA_CONFIG_DIR".into(),
            )
        })?;

    Ok(PathBuf::from(home).join(".config").join("glossa"))
}

/// Path of the credential store file inside `config_dir`.
pub fn store_path(config_dir: &Path) -> PathBuf {
    config_dir.join(STORE_FILE_NAME)
}
