//! Agent loop: prompt building, response interpretation and tool dispatch

pub mod base;
pub mod config;
pub mod core;
pub mod execution;
pub mod interpreter;
pub mod prompt;
pub mod round_log;

pub use base::{Agent, AgentResult};
pub use config::{AgentBuilder, AgentConfig};
pub use self::core::AgentCore;
pub use execution::AgentExecution;
pub use interpreter::{interpret, ParsedResponse};
pub use prompt::{build_system_prompt, FORCED_FINAL_SYSTEM_PROMPT};
pub use round_log::{RoundLog, RoundRecord};
