//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so every
//! command styles its messages the same way.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::EntryMetadata;

/// Print a green success message.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the credential names known to the index.
pub fn print_names_table(names: &[String]) {
    if names.is_empty() {
        info("No credentials stored yet.");
        tip("Run `credkeep set <NAME>` to add the first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name"]);
    for name in names {
        table.add_row(vec![name.clone()]);
    }

    println!("{table}");
}

/// Print credential metadata (Name, Created, Updated) from the vault.
pub fn print_detail_table(entries: &[EntryMetadata]) {
    if entries.is_empty() {
        info("No credentials stored yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Created", "Updated"]);

    for e in entries {
        table.add_row(vec![
            e.name.clone(),
            e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}
