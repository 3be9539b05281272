//! Output abstraction layer for the agent loop
//!
//! The orchestrator reports its progress as [`AgentEvent`]s. Front ends decide how
//! to present them: the CLI prints coloured lines, the HTTP server discards them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type returned by output handlers
pub type OutputError = Box<dyn std::error::Error + Send + Sync>;

/// Null output handler that discards all events
pub struct NullOutput;

#[async_trait]
impl AgentOutput for NullOutput {
    async fn emit_event(&self, _event: AgentEvent) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Events that can be emitted during a task invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A task invocation started
    TaskStarted {
        task_id: String,
        prompt: String,
        max_iterations: usize,
    },
    /// A new round is about to ask the model
    RoundStarted { round: usize, max_iterations: usize },
    /// The model asked for a registered tool
    ToolDispatched {
        round: usize,
        tool: String,
        input: String,
    },
    /// A tool returned output; `excerpt` is what the round log keeps
    ToolCompleted {
        round: usize,
        tool: String,
        excerpt: String,
    },
    /// A tool returned an error
    ToolFailed {
        round: usize,
        tool: String,
        error: String,
    },
    /// The model asked for a tool that is not registered
    UnknownTool { round: usize, tool: String },
    /// The round budget ran out; one last answer-only round follows
    ForcedFinal { rounds: usize },
    /// The invocation produced its answer
    TaskCompleted {
        task_id: String,
        rounds: usize,
        forced_final: bool,
        duration_ms: u64,
    },
    /// General message or log
    Message { level: MessageLevel, content: String },
}

/// Message severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Abstract output interface for agent execution
#[async_trait]
pub trait AgentOutput: Send + Sync {
    /// Emit an agent event
    async fn emit_event(&self, event: AgentEvent) -> Result<(), OutputError>;

    /// Emit a message with specified level
    async fn emit_message(&self, level: MessageLevel, content: &str) -> Result<(), OutputError> {
        self.emit_event(AgentEvent::Message {
            level,
            content: content.to_string(),
        })
        .await
    }

    async fn debug(&self, content: &str) -> Result<(), OutputError> {
        self.emit_message(MessageLevel::Debug, content).await
    }

    async fn info(&self, content: &str) -> Result<(), OutputError> {
        self.emit_message(MessageLevel::Info, content).await
    }

    async fn warning(&self, content: &str) -> Result<(), OutputError> {
        self.emit_message(MessageLevel::Warning, content).await
    }

    async fn error(&self, content: &str) -> Result<(), OutputError> {
        self.emit_message(MessageLevel::Error, content).await
    }

    /// Flush any buffered output
    async fn flush(&self) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collecting(Mutex<Vec<AgentEvent>>);

    #[async_trait]
    impl AgentOutput for Collecting {
        async fn emit_event(&self, event: AgentEvent) -> Result<(), OutputError> {
            self.0.lock().unwrap().push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_level_helpers_wrap_messages() {
        let output = Collecting::default();
        output.warning("careful").await.unwrap();

        let events = output.0.lock().unwrap();
        assert_eq!(
            events[0],
            AgentEvent::Message {
                level: MessageLevel::Warning,
                content: "careful".to_string(),
            }
        );
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let event = AgentEvent::UnknownTool {
            round: 1,
            tool: "teleporter".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "unknown_tool");
        assert_eq!(json["tool"], "teleporter");
    }

    #[tokio::test]
    async fn test_null_output_accepts_everything() {
        let output = NullOutput;
        assert!(output
            .emit_event(AgentEvent::ForcedFinal { rounds: 3 })
            .await
            .is_ok());
        assert!(output.flush().await.is_ok());
    }
}
