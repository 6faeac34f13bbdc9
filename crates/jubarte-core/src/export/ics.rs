//! RFC 5545 text primitives: timestamps, TEXT escaping, line folding.

use chrono::{DateTime, Utc};

/// Maximum characters per physical line before folding.
pub const FOLD_LIMIT: usize = 75;

/// Line terminator mandated by the format.
pub const CRLF: &str = "\r\n";

/// Render a UTC timestamp as `YYYYMMDDTHHMMSSZ`.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value.
///
/// Backslashes are doubled first, every newline variant becomes a literal
/// `\n`, and commas and semicolons are backslash-escaped.
pub fn escape_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            other => out.push(other),
        }
    }
    out
}

/// Fold a content line longer than `limit` characters.
///
/// The line is cut into `limit`-character chunks; every chunk after the
/// first starts on a new line with a single leading space. Chunks are
/// counted in characters so multi-byte text is never split mid code point.
pub fn fold_line(line: &str, limit: usize) -> String {
    if limit == 0 || line.chars().count() <= limit {
        return line.to_string();
    }

    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(&format!("{CRLF} "))
}

/// Build a `NAME:value` line, escaping the value and folding the result.
pub fn text_property(name: &str, value: &str) -> String {
    fold_line(&format!("{name}:{}", escape_text(value)), FOLD_LIMIT)
}

/// Build a `NAME:timestamp` line.
pub fn timestamp_property(name: &str, value: DateTime<Utc>) -> String {
    fold_line(&format!("{name}:{}", format_timestamp(value)), FOLD_LIMIT)
}
