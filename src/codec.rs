//! Line framing and field coercion for the interface's JSON stream.
//!
//! The interface separates messages with CRLF (sometimes bare LF), and a
//! single TCP read may carry several messages or a message with no trailing
//! newline at all. Each chunk is framed independently; see [`split_lines`].

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Line framing
// ---------------------------------------------------------------------------

/// Split a received chunk into candidate JSON lines.
///
/// Splits on LF and strips a trailing CR from each piece. The empty tail
/// after a terminating newline is dropped; interior empty lines are kept
/// (they fail decode and get reported like any other bad line).
///
/// No partial-line state is carried between chunks. A message split across
/// two reads decodes as two bad lines rather than one record — a known
/// best-effort limitation, accepted because the interface may also send a
/// complete message with no newline terminator, which buffering would
/// strand until the next message arrives.
pub fn split_lines(chunk: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = chunk
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Fetch a string field, falling back to `default` when the field is
/// absent or not a string.
pub fn get_str(obj: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Fetch a numeric field, coercing numeric strings (`"142.5"` → 142.5).
/// Falls back to `default` when the field is absent, non-numeric, or
/// unparsable — a bad field never rejects the whole record.
pub fn get_f64(obj: Option<&Map<String, Value>>, key: &str, default: f64) -> f64 {
    match obj.and_then(|o| o.get(key)) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

/// Stringify a numeric value the way the interface expects: decimal text,
/// never a native JSON number.
pub fn wire_number(value: f64) -> Value {
    Value::String(format!("{value}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
