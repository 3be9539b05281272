//! # wayfinder CLI
//!
//! Command-line interface for Wayfinder - a small tool-using LLM agent.
//!
//! ## Usage
//!
//! - `wayfinder` - Start interactive mode
//! - `wayfinder "question"` - Answer a single question
//! - `wayfinder tools` - Show available tools
//! - `wayfinder serve` - Serve the agent over HTTP

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{interactive_command, run_command, serve_command, tools_command, AgentOptions};
use config::CliConfigLoader;

/// wayfinder - A small tool-using LLM agent
#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A small tool-using LLM agent written in Rust")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Protocol to use (openai_compat, gateway)
    #[arg(long, global = true)]
    protocol: Option<String>,

    /// API key override
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name override
    #[arg(long, global = true)]
    model: Option<String>,

    /// Maximum number of tool rounds before the final answer
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Replace the default system prompt
    #[arg(long, global = true)]
    system: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The question to answer (if provided, runs in single-task mode)
    task: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available tools
    Tools,

    /// Serve the agent over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: String,

        /// Allowed CORS origins, comma separated
        #[arg(long, default_value = "*")]
        cors_origins: String,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_insecure(cli.insecure);

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(protocol) = &cli.protocol {
        loader = loader.with_protocol_override(protocol.clone());
    }

    if let Some(api_key) = &cli.api_key {
        loader = loader.with_api_key_override(api_key.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(model) = &cli.model {
        loader = loader.with_model_override(model.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config_loader = build_config_loader(&cli);
    let options = AgentOptions {
        max_iterations: cli.max_iterations,
        system_prompt: cli.system.clone(),
    };

    match (cli.task, cli.command) {
        (Some(task), None) => run_command(task, config_loader, options).await,
        (Some(_), Some(_)) => {
            tracing::error!("Error: Cannot specify both a task and a subcommand");
            std::process::exit(1);
        }
        (None, Some(Commands::Tools)) => tools_command().await,
        (None, Some(Commands::Serve { addr, cors_origins })) => {
            serve_command(addr, cors_origins, config_loader, options).await
        }
        (None, None) => interactive_command(config_loader, options).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["wayfinder", "serve"]);
        match cli.command {
            Some(Commands::Serve { addr, cors_origins }) => {
                assert_eq!(addr, "0.0.0.0:8000");
                assert_eq!(cors_origins, "*");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_task_with_global_flags() {
        let cli = Cli::parse_from([
            "wayfinder",
            "--max-iterations",
            "5",
            "--model",
            "gpt-4o",
            "-v",
            "What is 144 / 12?",
        ]);
        assert_eq!(cli.task.as_deref(), Some("What is 144 / 12?"));
        assert_eq!(cli.max_iterations, Some(5));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
