//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// One row of the `status` provider table.
pub struct ProviderRow {
    pub id: &'static str,
    pub active: bool,
    pub key_saved: bool,
    pub endpoint: String,
    pub model: String,
}

/// Print the provider overview table (Provider, API key, Endpoint, Model).
///
/// The key column only says whether a record exists — plaintext is
/// never read back for display.
pub fn print_provider_table(rows: &[ProviderRow]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Provider", "API key", "Endpoint", "Model"]);

    for row in rows {
        let name = if row.active {
            format!("{} (active)", row.id)
        } else {
            row.id.to_string()
        };
        let key = if row.key_saved { "saved" } else { "\u{2014}" };

        table.add_row(vec![name, key.to_string(), row.endpoint.clone(), row.model.clone()]);
    }

    println!("{table}");
}
