//! Null-tolerant lookups into the property document and the text helpers
//! every projection step leans on.

use serde_json::Value;

/// Walk a dotted path through nested JSON.
///
/// Numeric segments index into arrays (`"sections.0.hero"`). Returns `None`
/// at the first segment that is missing or `null`.
pub fn safe_get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root).filter(|v| !v.is_null());
    }

    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// String at `path`, if present and non-blank.
pub fn get_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    safe_get(root, path)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Visible marker used instead of blank output for missing optional content.
pub fn placeholder(label: &str) -> String {
    format!("[{label}]")
}

/// `value` when it is a non-blank string, otherwise the placeholder for `label`.
pub fn sanitize_text(value: Option<&str>, label: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => placeholder(label),
    }
}

/// Escape text for insertion as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape `text` and turn its newlines into `<br>` markup.
///
/// Empty input gets the same placeholder as [`sanitize_text`].
pub fn format_multiline(text: Option<&str>, label: &str) -> String {
    let text = sanitize_text(text, label);
    text.lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// First non-blank line, trimmed. Used for short metadata descriptions.
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Display text for scalars that documents store as either string or number.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Labels from a list of plain strings or `{ "name": ... }` objects.
pub fn labels(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Object(map) => map.get("name").and_then(value_text),
            other => value_text(other),
        })
        .collect()
}
