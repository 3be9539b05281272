//! # Wayfinder Core
//!
//! Core library for Wayfinder - a small agent loop that lets a language model pick
//! tools, runs them, and feeds the results back until it can answer.
//!
//! The loop lives in [`agent::AgentCore`]; model clients in [`llm`]; built-in tools and
//! the registry in [`tools`]. Configuration arrives fully resolved from the caller.

// Core modules
pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod output;
pub mod tools;

// Re-export commonly used types
pub use agent::{Agent, AgentBuilder, AgentConfig, AgentCore, AgentExecution};
pub use config::{ModelParams, Protocol, ResolvedLlmConfig, TransportConfig};
pub use error::{Error, Result};
pub use output::{AgentEvent, AgentOutput, NullOutput};
pub use tools::{Tool, ToolRegistry};

/// Current version of the wayfinder-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library, honouring `RUST_LOG`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
