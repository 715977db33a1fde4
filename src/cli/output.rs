//! Terminal output with colors
//!
//! Status lines go to stdout except errors. Rendered documents are printed
//! uncolored through [`info`]. `colored` honors NO_COLOR and CLICOLOR.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// One entry persisted by `write`, e.g. `  ✓ logging:level = debug`.
pub fn entry_written(key: &str, value: &str) {
    println!("  {} {} = {}", "✓".green(), key.bold(), value);
}

/// Final line of `write` naming the target file.
pub fn document_written(path: &Path, entries: usize) {
    println!(
        "{}: {} ({} entries)",
        "Written".green(),
        path.display(),
        entries
    );
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Plain output for documents, trees and TOML.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
