//! CLI command implementations

pub mod interactive;
pub mod run;
pub mod serve;
pub mod tools;

pub use interactive::interactive_command;
pub use run::run_command;
pub use serve::serve_command;
pub use tools::tools_command;

use crate::config::CliConfigLoader;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use wayfinder_core::{AgentBuilder, AgentCore, AgentOutput};

/// Agent settings shared by every command that runs tasks
#[derive(Debug, Clone, Default)]
pub struct AgentOptions {
    pub max_iterations: Option<usize>,
    pub system_prompt: Option<String>,
}

/// Load the model configuration and build an agent around it
pub async fn build_agent(
    config_loader: &CliConfigLoader,
    options: &AgentOptions,
    output: Arc<dyn AgentOutput>,
) -> Result<AgentCore> {
    let llm_config = config_loader.load().await?;
    info!("🤖 Using protocol: {}", llm_config.protocol.as_str());
    info!("🤖 Using model: {}", llm_config.model);

    let mut builder =
        AgentBuilder::new(llm_config).with_system_prompt(options.system_prompt.clone());
    if let Some(max_iterations) = options.max_iterations {
        builder = builder.with_max_iterations(max_iterations);
    }

    builder
        .build_with_output(output)
        .context("Failed to build agent")
}
