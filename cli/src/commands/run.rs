//! Single task execution command

use super::{build_agent, AgentOptions};
use crate::config::CliConfigLoader;
use crate::output::CliOutputHandler;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Execute a single task and print the answer
pub async fn run_command(
    task: String,
    config_loader: CliConfigLoader,
    options: AgentOptions,
) -> Result<()> {
    info!("Executing task: {}", task);

    let output = Arc::new(CliOutputHandler::default());
    let agent = build_agent(&config_loader, &options, output).await?;
    let answer = agent.run_task(&task, None, None).await;

    println!("\n{}", answer);

    Ok(())
}
