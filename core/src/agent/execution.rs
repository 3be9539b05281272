//! Agent execution result structures

use super::round_log::RoundLog;
use serde::{Deserialize, Serialize};

/// Result of one task invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentExecution {
    /// Identifier used in logs and events for this invocation
    pub task_id: String,

    /// Text returned to the caller
    pub final_answer: String,

    /// Regular rounds that asked the model, not counting the forced final round
    pub rounds: usize,

    /// Whether the answer came from the forced final round
    pub forced_final: bool,

    /// Everything recorded along the way
    pub round_log: RoundLog,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl AgentExecution {
    /// Tools that were actually dispatched, in order
    pub fn tools_used(&self) -> Vec<&str> {
        use super::round_log::RoundRecord;

        self.round_log
            .records()
            .iter()
            .filter(|r| !matches!(r, RoundRecord::UnknownTool { .. }))
            .map(|r| r.tool())
            .collect()
    }
}
