//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;

use crate::error::CliResult;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Prints a labelled value.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", format!("{label}:").dimmed(), value);
}

/// Prints a value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
