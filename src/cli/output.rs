//! Shared CLI output helpers.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Display;

const RULE_WIDTH: usize = 48;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<18} {value}");
}

pub fn warn(message: &str) {
    println!("⚠ {message}");
}

pub fn note(message: &str) {
    println!("{message}");
}

/// Print any serializable result as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{text}");
    Ok(())
}

/// Probability (0..1) as a two-decimal percentage.
pub fn percent(prob: f64) -> String {
    format!("{:.2}%", prob * 100.0)
}

/// Money amount with two decimals.
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
