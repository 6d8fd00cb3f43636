use thiserror::Error;

/// Errors arising from decoding interface JSON lines.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("undecodable JSON line: {source}{}", format_line_suffix(line))]
    Json {
        /// Offending line (truncated) for diagnostics.
        line: String,
        source: serde_json::Error,
    },

    #[error("line is not a JSON object{}", format_line_suffix(line))]
    NotAnObject { line: String },
}

impl WireError {
    /// Create a `Json` error, keeping a truncated copy of the offending line.
    pub(crate) fn json(line: &[u8], source: serde_json::Error) -> Self {
        Self::Json { line: line_excerpt(line), source }
    }

    /// Create a `NotAnObject` error for a line that parsed but is no object.
    pub(crate) fn not_an_object(line: &[u8]) -> Self {
        Self::NotAnObject { line: line_excerpt(line) }
    }
}

/// Format a stored line as a suffix like ` | {"data":...` (empty if blank).
fn format_line_suffix(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    format!(" | {line}")
}

/// Lossy, truncated copy of a wire line for error context.
fn line_excerpt(line: &[u8]) -> String {
    const LIMIT: usize = 120;
    let mut text = String::from_utf8_lossy(line).into_owned();
    if text.len() > LIMIT {
        let mut end = LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("...");
    }
    text
}

pub type Result<T> = std::result::Result<T, WireError>;
