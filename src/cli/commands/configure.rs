//! `glossa configure` — show or update the non-sensitive settings.
//!
//! API keys are handled by `set-key`; this command never touches the
//! credential store.

use crate::cli::output;
use crate::cli::{config_dir, Cli, ConfigureArgs};
use crate::config::Settings;
use crate::errors::{GlossaError, Result};

/// Execute the `configure` command.
pub fn execute(cli: &Cli, args: &ConfigureArgs) -> Result<()> {
    let dir = config_dir(cli)?;
    let mut settings = Settings::load(&dir)?;

    if args.is_empty() {
        print_current(&settings, &dir);
        return Ok(());
    }

    // A provider preset fills the endpoint and model defaults, unless
    // explicit values were passed alongside it.
    if let Some(preset) = args.provider {
        if args.endpoint.is_none() {
            let endpoint = preset.default_endpoint().ok_or_else(|| {
                GlossaError::CommandFailed(
                    "provider 'default' has no preset endpoint — pass --endpoint".into(),
                )
            })?;
            settings.api_endpoint = endpoint.to_string();
        }
        if args.model.is_none() {
            settings.api_model = preset.default_model().to_string();
        }
    }

    if let Some(endpoint) = &args.endpoint {
        settings.api_endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        settings.api_model = model.clone();
    }
    if let Some(lang) = &args.first_language {
        settings.first_language = lang.clone();
    }
    if let Some(lang) = &args.second_language {
        settings.second_language = lang.clone();
    }
    if let Some(style) = args.style {
        settings.translation_style = style;
    }

    if args.clear_forced_provider {
        settings.provider = None;
    }
    if let Some(forced) = args.force_provider {
        settings.provider = Some(forced);
    }

    settings.save(&dir)?;

    output::success(&format!(
        "Configuration saved to {}",
        dir.join(Settings::FILE_NAME).display()
    ));
    output::tip("Store an API key with `glossa set-key`, then check `glossa status`.");

    Ok(())
}

/// Print the active configuration.
fn print_current(settings: &Settings, dir: &std::path::Path) {
    let provider = settings.resolved_provider();
    let source = if settings.provider.is_some() {
        "pinned"
    } else {
        "detected from endpoint"
    };

    let endpoint = if settings.api_endpoint.is_empty() {
        "(not set)"
    } else {
        settings.api_endpoint.as_str()
    };

    output::info(&format!("Config file: {}", dir.join(Settings::FILE_NAME).display()));
    println!("  provider:          {provider} ({source})");
    println!("  endpoint:          {endpoint}");
    println!("  model:             {}", settings.model());
    println!("  first language:    {}", settings.first_language);
    println!("  second language:   {}", settings.second_language);
    println!("  translation style: {}", settings.translation_style);
}
