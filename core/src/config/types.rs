//! Minimal configuration types for Wayfinder core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use super::TransportConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default scope requested when exchanging client credentials
pub const DEFAULT_GATEWAY_SCOPE: &str = "api://llm-gateway/.default";

/// Supported LLM protocols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// OpenAI-compatible API authenticated with a static API key
    #[serde(rename = "openai_compat")]
    OpenAICompat,
    /// OpenAI-compatible gateway authenticated with OAuth2 client credentials
    #[serde(rename = "gateway")]
    Gateway,
}

impl Protocol {
    /// Get the protocol name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OpenAICompat => "openai_compat",
            Protocol::Gateway => "gateway",
        }
    }

    /// Parse a protocol name, accepting the short aliases used on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "openai" | "openai_compat" => Some(Protocol::OpenAICompat),
            "gateway" | "llm_gateway" => Some(Protocol::Gateway),
            _ => None,
        }
    }

    /// Get the default base URL for this protocol
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Protocol::OpenAICompat => Some("https://api.openai.com/v1"),
            Protocol::Gateway => None, // Requires a deployment-specific endpoint
        }
    }
}

/// Model parameters for LLM requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
}

/// OAuth2 client-credentials settings for gateway authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Token endpoint
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Requested scope
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    DEFAULT_GATEWAY_SCOPE.to_string()
}

impl CredentialsConfig {
    /// Build the Azure AD v2 token endpoint for a tenant
    pub fn tenant_token_url(tenant_id: &str) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            tenant_id
        )
    }
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// The protocol to use
    pub protocol: Protocol,
    /// Base URL for the API
    pub base_url: String,
    /// API key for authentication (static bearer for the gateway protocol)
    #[serde(default)]
    pub api_key: String,
    /// Default model name/identifier
    pub model: String,
    /// Client credentials for the gateway protocol
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
    /// Model parameters
    #[serde(default)]
    pub params: ModelParams,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// HTTP transport settings
    #[serde(default)]
    pub transport: TransportConfig,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(protocol: Protocol, base_url: String, api_key: String, model: String) -> Self {
        Self {
            protocol,
            base_url,
            api_key,
            model,
            credentials: None,
            params: ModelParams::default(),
            headers: HashMap::new(),
            transport: TransportConfig::default(),
        }
    }

    /// Set model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Set client credentials
    pub fn with_credentials(mut self, credentials: CredentialsConfig) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set transport settings
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        // Validate URL format
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        match self.protocol {
            Protocol::OpenAICompat => {
                if self.api_key.is_empty() {
                    return Err("API key cannot be empty".to_string());
                }
            }
            Protocol::Gateway => {
                if self.api_key.is_empty() && self.credentials.is_none() {
                    return Err(
                        "Gateway protocol needs client credentials or a static token".to_string(),
                    );
                }
                if let Some(creds) = &self.credentials {
                    if creds.client_id.is_empty() || creds.client_secret.is_empty() {
                        return Err("Client id and secret cannot be empty".to_string());
                    }
                }
            }
        }

        // Validate temperature range
        if let Some(temp) = self.params.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        // Validate top_p range
        if let Some(top_p) = self.params.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err("Top-p must be between 0.0 and 1.0".to_string());
            }
        }

        if self.transport.timeout_secs == 0 {
            return Err("Transport timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_config() -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            Protocol::Gateway,
            "https://gateway.internal".to_string(),
            String::new(),
            "gpt-4o-mini".to_string(),
        )
    }

    #[test]
    fn test_openai_requires_api_key() {
        let config = ResolvedLlmConfig::new(
            Protocol::OpenAICompat,
            "https://api.openai.com/v1".to_string(),
            String::new(),
            "gpt-4o".to_string(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gateway_requires_credentials_or_token() {
        assert!(gateway_config().validate().is_err());

        let with_creds = gateway_config().with_credentials(CredentialsConfig {
            token_url: CredentialsConfig::tenant_token_url("tenant"),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            scope: DEFAULT_GATEWAY_SCOPE.to_string(),
        });
        assert!(with_creds.validate().is_ok());

        let mut with_token = gateway_config();
        with_token.api_key = "token".to_string();
        assert!(with_token.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_temperature() {
        let mut config = gateway_config();
        config.api_key = "token".to_string();
        config.params.temperature = Some(3.5);
        assert_eq!(
            config.validate().unwrap_err(),
            "Temperature must be between 0.0 and 2.0"
        );
    }

    #[test]
    fn test_protocol_aliases() {
        assert_eq!(Protocol::parse("openai"), Some(Protocol::OpenAICompat));
        assert_eq!(Protocol::parse("gateway"), Some(Protocol::Gateway));
        assert_eq!(Protocol::parse("anthropic"), None);
    }

    #[test]
    fn test_tenant_token_url() {
        assert_eq!(
            CredentialsConfig::tenant_token_url("abc"),
            "https://login.microsoftonline.com/abc/oauth2/v2.0/token"
        );
    }
}
