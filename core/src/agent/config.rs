//! Agent configuration structures

use crate::config::{ResolvedLlmConfig, TransportConfig};
use crate::error::{ConfigError, Result};
use crate::llm::{create_client, LlmClient};
use crate::output::{AgentOutput, NullOutput};
use crate::tools::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the agent loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of tool rounds before the forced final answer
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Characters of tool output kept in the round log
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Sampling temperature for every model call
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Custom system prompt (optional)
    /// If not provided, the default prompt listing the registered tools is used
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_max_iterations() -> usize {
    3
}

fn default_excerpt_chars() -> usize {
    100
}

fn default_temperature() -> f32 {
    0.2
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            excerpt_chars: default_excerpt_chars(),
            temperature: default_temperature(),
            system_prompt: None,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature".to_string(),
                value: self.temperature.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

enum LlmSource {
    Config(ResolvedLlmConfig),
    Client(Arc<dyn LlmClient>),
}

/// Builder for creating agents
pub struct AgentBuilder {
    llm: LlmSource,
    agent_config: AgentConfig,
    registry: Option<Arc<ToolRegistry>>,
}

impl AgentBuilder {
    /// Create a new agent builder with LLM configuration
    pub fn new(llm_config: ResolvedLlmConfig) -> Self {
        Self {
            llm: LlmSource::Config(llm_config),
            agent_config: AgentConfig::default(),
            registry: None,
        }
    }

    /// Create a builder around an existing model client
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self {
            llm: LlmSource::Client(client),
            agent_config: AgentConfig::default(),
            registry: None,
        }
    }

    /// Set agent configuration
    pub fn with_agent_config(mut self, agent_config: AgentConfig) -> Self {
        self.agent_config = agent_config;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.agent_config.max_iterations = max_iterations;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.agent_config.system_prompt = system_prompt;
        self
    }

    /// Use this registry instead of the built-in tools
    pub fn with_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the agent with the given output handler
    pub fn build_with_output(self, output: Arc<dyn AgentOutput>) -> Result<super::AgentCore> {
        self.agent_config.validate()?;

        let (llm_client, transport) = match self.llm {
            LlmSource::Config(config) => {
                config.validate()?;
                (create_client(&config)?, config.transport.clone())
            }
            LlmSource::Client(client) => (client, TransportConfig::default()),
        };

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(ToolRegistry::with_builtin_tools(&transport)?),
        };

        Ok(super::AgentCore::new(
            self.agent_config,
            llm_client,
            registry,
            output,
        ))
    }

    /// Build the agent with null output
    pub fn build(self) -> Result<super::AgentCore> {
        self.build_with_output(Arc::new(NullOutput))
    }
}
