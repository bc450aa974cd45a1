//! CLI output formatting utilities.

use std::fmt::Write as _;

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &Value) { println!("{}", highlight_json(value)); }

/// Renders `value` as indented, colored JSON.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    render(value, 0, &mut out);
    out
}

fn render(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(flag) => out.push_str(&flag.to_string().magenta().to_string()),
        Value::Number(number) => out.push_str(&number.to_string().yellow().to_string()),
        Value::String(text) => out.push_str(&quoted(text).green().to_string()),
        Value::Array(items) => {
            let entries = items.iter().map(|item| (None, item));
            render_container(('[', ']'), entries, items.len(), depth, out);
        }
        Value::Object(map) => {
            let entries = map.iter().map(|(key, item)| (Some(key.as_str()), item));
            render_container(('{', '}'), entries, map.len(), depth, out);
        }
    }
}

fn render_container<'a>(
    (open, close): (char, char),
    entries: impl Iterator<Item = (Option<&'a str>, &'a Value)>,
    len: usize,
    depth: usize,
    out: &mut String,
) {
    out.push_str(&open.to_string().white().bold().to_string());
    if len == 0 {
        out.push_str(&close.to_string().white().bold().to_string());
        return;
    }

    for (index, (key, item)) in entries.enumerate() {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth + 1));
        if let Some(key) = key {
            let _ = write!(out, "{}{} ", quoted(key).cyan(), ":".white());
        }
        render(item, depth + 1, out);
        if index + 1 < len {
            out.push_str(&",".white().to_string());
        }
    }

    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&close.to_string().white().bold().to_string());
}

/// JSON-escapes and quotes `text`.
fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
