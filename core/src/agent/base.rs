//! Base agent trait

use super::config::AgentConfig;
use super::execution::AgentExecution;
use crate::error::Result;
use async_trait::async_trait;

/// Result type for agent operations
pub type AgentResult<T> = Result<T>;

/// Base trait for all agents
///
/// Methods take `&self`: per-task state lives in the call, so one agent can serve
/// concurrent requests.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Execute a task, returning the full execution record
    async fn execute_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> AgentResult<AgentExecution>;

    /// Execute a task and always return text for the user
    async fn run_task(
        &self,
        user_prompt: &str,
        system_instructions: Option<&str>,
        model: Option<&str>,
    ) -> String;

    /// Get the agent's configuration
    fn config(&self) -> &AgentConfig;

    /// Get the agent's name/type
    fn agent_type(&self) -> &str;
}
