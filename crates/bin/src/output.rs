//! Output formatting helpers for human-readable and JSON output.

use clap::ValueEnum;
use keyarray::Value;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print key/value entries as two columns, keys padded to the widest key.
pub fn print_entries<'a>(entries: impl IntoIterator<Item = (String, &'a Value)>) {
    for line in entry_lines(entries) {
        println!("{line}");
    }
}

fn entry_lines<'a>(entries: impl IntoIterator<Item = (String, &'a Value)>) -> Vec<String> {
    let entries: Vec<(String, String)> = entries
        .into_iter()
        .map(|(key, value)| (key, render_value(value)))
        .collect();
    let width = entries
        .iter()
        .map(|(key, _)| key.chars().count())
        .chain(std::iter::once("KEY".len()))
        .max()
        .unwrap_or(0);

    std::iter::once(("KEY".to_string(), "VALUE".to_string()))
        .chain(entries)
        .map(|(key, value)| format!("{key:<width$}  {value}"))
        .collect()
}

/// Strings print bare, everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
