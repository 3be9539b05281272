//! Base tool traits and structures

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for all tools
///
/// A tool takes one free-form string input and produces a string result. Failures are
/// returned as errors; the orchestrator records them and keeps going.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of the tool
    fn name(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// Execute the tool with the given input
    async fn execute(&self, input: &str) -> Result<String>;

    /// Get examples of how to use this tool
    fn examples(&self) -> Vec<ToolExample> {
        Vec::new()
    }
}

/// A request to run a tool, as emitted by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool: String,

    /// Input passed verbatim to the tool
    pub input: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new<S: Into<String>>(tool: S, input: S) -> Self {
        Self {
            tool: tool.into(),
            input: input.into(),
        }
    }
}

/// Example usage of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolExample {
    /// Description of what this example does
    pub description: String,

    /// Example input
    pub input: String,

    /// Expected result description
    pub expected_result: String,
}

impl ToolExample {
    pub fn new<S: Into<String>>(description: S, input: S, expected_result: S) -> Self {
        Self {
            description: description.into(),
            input: input.into(),
            expected_result: expected_result.into(),
        }
    }
}
