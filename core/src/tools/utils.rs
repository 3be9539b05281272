//! Helpers shared by tools and the round log

use crate::error::{Error, ToolError};

/// Return at most `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Collapse every run of whitespace into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wrap a failed lookup as a tool error; HTTP timeouts stay distinguishable
pub fn tool_failure(name: &str, err: Error) -> Error {
    match err {
        Error::Http(e) if e.is_timeout() => ToolError::Timeout {
            name: name.to_string(),
        }
        .into(),
        other => ToolError::ExecutionFailed {
            name: name.to_string(),
            message: other.to_string(),
        }
        .into(),
    }
}
