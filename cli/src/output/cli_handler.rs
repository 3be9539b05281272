//! CLI output handler implementation

use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use tracing::{debug, error, info, warn};
use wayfinder_core::output::{AgentEvent, AgentOutput, MessageLevel, OutputError};

/// CLI output configuration
#[derive(Debug, Clone)]
pub struct CliOutputConfig {
    /// Show round headers and run statistics
    pub show_progress: bool,
}

impl Default for CliOutputConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// CLI output handler that formats events for terminal display
pub struct CliOutputHandler {
    config: CliOutputConfig,
}

impl CliOutputHandler {
    /// Create a new CLI output handler
    pub fn new(config: CliOutputConfig) -> Self {
        Self { config }
    }

    /// Turn an event into the line printed on stdout, if any
    pub fn render(&self, event: &AgentEvent) -> Option<String> {
        match event {
            AgentEvent::RoundStarted {
                round,
                max_iterations,
            } if self.config.show_progress => {
                Some(format!("Round {}/{}", round, max_iterations).dimmed().to_string())
            }
            AgentEvent::ToolDispatched { tool, input, .. } => {
                Some(format!("{} {}({})", "●".white(), tool.bold(), input))
            }
            AgentEvent::ToolCompleted { excerpt, .. } => {
                Some(format!("  {} {}", "⎿".green(), excerpt.dimmed()))
            }
            AgentEvent::ToolFailed { tool, error, .. } => {
                Some(format!("  {} {} failed: {}", "⎿".red(), tool, error.red()))
            }
            AgentEvent::UnknownTool { tool, .. } => Some(format!(
                "{} {}",
                "●".yellow(),
                format!("Unknown tool '{}'", tool).yellow()
            )),
            AgentEvent::ForcedFinal { rounds } => Some(
                format!("Used all {} rounds, asking for a final answer", rounds)
                    .yellow()
                    .to_string(),
            ),
            AgentEvent::TaskCompleted {
                rounds,
                duration_ms,
                ..
            } if self.config.show_progress => Some(format!(
                "📈 {} round(s) in {:.2}s",
                rounds,
                *duration_ms as f64 / 1000.0
            )),
            _ => None,
        }
    }
}

impl Default for CliOutputHandler {
    fn default() -> Self {
        Self::new(CliOutputConfig::default())
    }
}

#[async_trait]
impl AgentOutput for CliOutputHandler {
    async fn emit_event(&self, event: AgentEvent) -> Result<(), OutputError> {
        match &event {
            AgentEvent::TaskStarted {
                task_id, prompt, ..
            } => {
                debug!("🚀 Starting task {}", task_id);
                debug!("📝 Task: {}", prompt);
            }
            AgentEvent::Message { level, content } => match level {
                MessageLevel::Debug => debug!("🐛 Debug: {}", content),
                MessageLevel::Info => info!("ℹ️  {}", content),
                MessageLevel::Warning => warn!("⚠️  Warning: {}", content),
                MessageLevel::Error => error!("❌ Error: {}", content),
            },
            _ => {}
        }

        if let Some(line) = self.render(&event) {
            println!("{}", line);
        }

        Ok(())
    }

    async fn flush(&self) -> Result<(), OutputError> {
        std::io::stdout().flush().map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_lines_carry_name_and_input() {
        let handler = CliOutputHandler::default();

        let dispatched = handler
            .render(&AgentEvent::ToolDispatched {
                round: 1,
                tool: "calculator".to_string(),
                input: "144/12".to_string(),
            })
            .unwrap();
        assert!(dispatched.contains("calculator"));
        assert!(dispatched.contains("(144/12)"));

        let failed = handler
            .render(&AgentEvent::ToolFailed {
                round: 1,
                tool: "fetch_url".to_string(),
                error: "Access to localhost is not allowed".to_string(),
            })
            .unwrap();
        assert!(failed.contains("fetch_url failed"));
        assert!(failed.contains("Access to localhost is not allowed"));
    }

    #[test]
    fn test_progress_lines_follow_config() {
        let quiet = CliOutputHandler::new(CliOutputConfig {
            show_progress: false,
        });
        let round = AgentEvent::RoundStarted {
            round: 2,
            max_iterations: 3,
        };
        assert!(quiet.render(&round).is_none());

        let chatty = CliOutputHandler::default();
        assert!(chatty.render(&round).unwrap().contains("Round 2/3"));
    }

    #[test]
    fn test_messages_only_go_to_the_log() {
        let handler = CliOutputHandler::default();
        let event = AgentEvent::Message {
            level: MessageLevel::Info,
            content: "hello".to_string(),
        };
        assert!(handler.render(&event).is_none());
    }
}
