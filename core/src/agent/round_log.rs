//! Append-only record of what happened in each round of a task

use crate::tools::utils::truncate_chars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one round that did not end the task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundRecord {
    /// The tool ran; only an excerpt of its output is kept
    ToolSuccess {
        tool: String,
        input: String,
        output_excerpt: String,
    },
    /// The tool ran and returned an error
    ToolFailure {
        tool: String,
        input: String,
        error: String,
    },
    /// The model named a tool that is not registered
    UnknownTool { tool: String },
}

impl RoundRecord {
    /// Build a success record, keeping at most `excerpt_chars` characters of output
    pub fn success(tool: &str, input: &str, output: &str, excerpt_chars: usize) -> Self {
        RoundRecord::ToolSuccess {
            tool: tool.to_string(),
            input: input.to_string(),
            output_excerpt: truncate_chars(output, excerpt_chars).to_string(),
        }
    }

    pub fn failure(tool: &str, input: &str, error: impl fmt::Display) -> Self {
        RoundRecord::ToolFailure {
            tool: tool.to_string(),
            input: input.to_string(),
            error: error.to_string(),
        }
    }

    pub fn unknown(tool: &str) -> Self {
        RoundRecord::UnknownTool {
            tool: tool.to_string(),
        }
    }

    pub fn tool(&self) -> &str {
        match self {
            RoundRecord::ToolSuccess { tool, .. }
            | RoundRecord::ToolFailure { tool, .. }
            | RoundRecord::UnknownTool { tool } => tool,
        }
    }
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundRecord::ToolSuccess {
                tool,
                input,
                output_excerpt,
            } => write!(f, "Used {}('{}') → {}...", tool, input, output_excerpt),
            RoundRecord::ToolFailure { tool, error, .. } => {
                write!(f, "Tried {} but got error: {}", tool, error)
            }
            RoundRecord::UnknownTool { tool } => {
                write!(f, "Tried to use {} but it doesn't exist", tool)
            }
        }
    }
}

/// Ordered round summaries for one task invocation
///
/// Records can only be appended; nothing is ever edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLog {
    records: Vec<RoundRecord>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render every record as a `- ` bullet, one per line, each line newline-terminated
    pub fn to_bullets(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("- {}\n", record))
            .collect()
    }
}
