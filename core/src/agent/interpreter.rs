//! Classify raw model text as a tool request or a final answer

use crate::tools::ToolCall;
use serde_json::Value;

/// What the model asked for in one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// Run a tool and report back
    ToolCall(ToolCall),
    /// Answer for the user, exactly as the model wrote it
    FinalAnswer { text: String },
}

impl ParsedResponse {
    pub fn is_final(&self) -> bool {
        matches!(self, ParsedResponse::FinalAnswer { .. })
    }
}

/// Interpret raw model output.
///
/// The span from the first `{` to the last `}` is parsed as JSON. An object carrying both
/// `tool` and `input` is a tool call; anything else, including text with no braces or a
/// span that does not parse, is returned unaltered as the final answer.
pub fn interpret(raw_text: &str) -> ParsedResponse {
    match extract_tool_call(raw_text) {
        Some(call) => ParsedResponse::ToolCall(call),
        None => ParsedResponse::FinalAnswer {
            text: raw_text.to_string(),
        },
    }
}

fn extract_tool_call(raw_text: &str) -> Option<ToolCall> {
    let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    if start >= end {
        return None;
    }

    let value: Value = serde_json::from_str(&raw_text[start..=end]).ok()?;
    let object = value.as_object()?;

    let tool = field_text(object.get("tool")?);
    let input = field_text(object.get("input")?);

    Some(ToolCall::new(tool, input))
}

/// Strings verbatim, anything else as compact JSON
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
