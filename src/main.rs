use clap::Parser;
use glossa::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Configure(ref args) => glossa::cli::commands::configure::execute(&cli, args),
        Commands::SetKey {
            ref value,
            provider,
        } => glossa::cli::commands::set_key::execute(&cli, value.as_deref(), provider),
        Commands::Status => glossa::cli::commands::status::execute(&cli),
        Commands::Clear { force } => glossa::cli::commands::clear::execute(&cli, force),
        Commands::Migrate => glossa::cli::commands::migrate::execute(&cli),
        Commands::Translate { ref text, provider } => {
            glossa::cli::commands::translate_cmd::execute(&cli, text.as_deref(), provider)
        }
        Commands::Completions { ref shell } => {
            glossa::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        glossa::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
