//! CLI configuration loader for Wayfinder
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./wayfinder.json or ./.wayfinder/config.json
//! 3. Git repository root: <repo_root>/.wayfinder/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/wayfinder/config.json or ~/.config/wayfinder/config.json
//! 5. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wayfinder_core::config::types::DEFAULT_GATEWAY_SCOPE;
use wayfinder_core::config::CredentialsConfig;
use wayfinder_core::{ModelParams, Protocol, ResolvedLlmConfig, TransportConfig};

/// Header carrying the optional gateway subscription key
pub const GATEWAY_KEY_HEADER: &str = "X-LLM-Gateway-Key";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PROFILE: &str = "dev";

/// Environment lookup; injected so resolution can be tested without touching the process
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Client credentials as written in a config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCredentials {
    /// Token endpoint; derived from `tenant_id` when absent
    pub token_url: Option<String>,
    pub tenant_id: Option<String>,
    /// Client id (can be "env:VAR_NAME")
    pub client_id: String,
    /// Client secret (can be "env:VAR_NAME")
    pub client_secret: String,
    pub scope: Option<String>,
}

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// Protocol to use: openai_compat or gateway
    pub protocol: String,
    /// API key (can be "env:VAR_NAME" for environment variable)
    #[serde(default)]
    pub api_key: String,
    /// Base URL (optional, uses protocol default if not specified)
    pub base_url: Option<String>,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Gateway client credentials (optional)
    #[serde(default)]
    pub credentials: Option<RawCredentials>,
    /// Gateway subscription key (optional, can be "env:VAR_NAME")
    #[serde(default)]
    pub gateway_key: Option<String>,
    /// Model parameters (optional)
    #[serde(default)]
    pub params: ModelParams,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// HTTP transport settings (optional)
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// CLI configuration loader
#[derive(Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    protocol_override: Option<String>,
    api_key_override: Option<String>,
    base_url_override: Option<String>,
    model_override: Option<String>,
    insecure: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set protocol override
    pub fn with_protocol_override(mut self, protocol: String) -> Self {
        self.protocol_override = Some(protocol);
        self
    }

    /// Set API key override
    pub fn with_api_key_override(mut self, api_key: String) -> Self {
        self.api_key_override = Some(api_key);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set model override
    pub fn with_model_override(mut self, model: String) -> Self {
        self.model_override = Some(model);
        self
    }

    /// Skip TLS certificate verification for every outgoing request
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedLlmConfig> {
        // Step 1: Find and load base configuration
        let config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides and resolve
        self.resolve_config(self.apply_overrides(config), &process_env)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let cwd = std::env::current_dir()?;

        for candidate in [
            cwd.join("wayfinder.json"),
            cwd.join(".wayfinder").join("config.json"),
        ] {
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        if let Some(git_root) = find_git_root(&cwd) {
            let config_path = git_root.join(".wayfinder").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        if let Some(config_dir) = xdg_config_dir() {
            let config_path = config_dir.join("wayfinder").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        tracing::debug!("No config file found, reading environment");
        self.load_env_only(&process_env)
    }

    /// Build a configuration from environment variables alone.
    ///
    /// Gateway settings win when a gateway base URL is present; otherwise an
    /// `OPENAI_API_KEY` selects the OpenAI-compatible protocol.
    pub fn load_env_only(&self, env: EnvLookup<'_>) -> Result<RawConfig> {
        let profile = env("WAYFINDER_PROFILE")
            .map(|p| p.to_lowercase())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let prefix = profile.to_uppercase();
        let profiled = |name: &str, fallbacks: &[&str]| -> Option<String> {
            env(format!("{}_{}", prefix, name).as_str())
                .or_else(|| fallbacks.iter().find_map(|f| env(*f)))
        };

        let model = env("LLM_MODEL").unwrap_or_else(default_model);

        if let Some(base_url) = profiled("BASE_URL", &["LLM_GATEWAY_BASE_URL", "LLM_GATEWAY_URL"]) {
            let client_id = profiled("CLIENT_ID", &["CLIENT_ID"]);
            let client_secret = profiled("CLIENT_SECRET", &["CLIENT_SECRET"]);
            let tenant_id = env("TENANT_ID");

            let credentials = match (client_id, client_secret, tenant_id) {
                (Some(client_id), Some(client_secret), Some(tenant_id)) => Some(RawCredentials {
                    token_url: None,
                    tenant_id: Some(tenant_id),
                    client_id,
                    client_secret,
                    scope: env("AAD_SCOPE"),
                }),
                _ if self.api_key_override.is_some() => None,
                _ => {
                    return Err(anyhow!(
                        "Missing TENANT_ID / CLIENT_ID / CLIENT_SECRET (profile={})",
                        profile
                    ))
                }
            };

            let mut headers = HashMap::new();
            if let Some(extra) = env("LLM_EXTRA_HEADERS") {
                match serde_json::from_str::<HashMap<String, String>>(&extra) {
                    Ok(extra) => headers.extend(extra),
                    Err(_) => tracing::warn!("LLM_EXTRA_HEADERS is not valid JSON; ignoring."),
                }
            }

            return Ok(RawConfig {
                protocol: Protocol::Gateway.as_str().to_string(),
                api_key: String::new(),
                base_url: Some(base_url),
                model,
                credentials,
                gateway_key: profiled("GATEWAY_KEY", &["LLM_GATEWAY_KEY"]),
                params: ModelParams::default(),
                headers,
                transport: TransportConfig::default(),
            });
        }

        if let Some(api_key) = env("OPENAI_API_KEY") {
            return Ok(RawConfig {
                protocol: Protocol::OpenAICompat.as_str().to_string(),
                api_key,
                base_url: env("OPENAI_BASE_URL"),
                model: env("OPENAI_MODEL").unwrap_or(model),
                credentials: None,
                gateway_key: None,
                params: ModelParams::default(),
                headers: HashMap::new(),
                transport: TransportConfig::default(),
            });
        }

        Err(anyhow!(
            "No configuration found. Please create a wayfinder.json file or set LLM_GATEWAY_URL / OPENAI_API_KEY"
        ))
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        let path = expanded.as_path();

        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        tracing::debug!("Loading config from {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn apply_overrides(&self, mut config: RawConfig) -> RawConfig {
        if let Some(protocol) = &self.protocol_override {
            config.protocol = protocol.clone();
        }
        if let Some(api_key) = &self.api_key_override {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(model) = &self.model_override {
            config.model = model.clone();
        }
        if self.insecure {
            config.transport.verify_tls = false;
        }
        config
    }

    /// Resolve raw config to ResolvedLlmConfig
    pub fn resolve_config(&self, config: RawConfig, env: EnvLookup<'_>) -> Result<ResolvedLlmConfig> {
        let protocol = Protocol::parse(&config.protocol).ok_or_else(|| {
            anyhow!(
                "Unknown protocol '{}'. Expected openai_compat or gateway",
                config.protocol
            )
        })?;

        let api_key = resolve_secret(&config.api_key, env)?;

        let base_url = match config.base_url {
            Some(url) => url,
            None => protocol
                .default_base_url()
                .ok_or_else(|| anyhow!("Protocol '{}' requires a base_url", protocol.as_str()))?
                .to_string(),
        };

        let mut resolved = ResolvedLlmConfig::new(protocol, base_url, api_key, config.model)
            .with_params(config.params)
            .with_headers(config.headers)
            .with_transport(config.transport);

        if let Some(creds) = config.credentials {
            let token_url = match (creds.token_url, creds.tenant_id) {
                (Some(url), _) => url,
                (None, Some(tenant)) => CredentialsConfig::tenant_token_url(&tenant),
                (None, None) => {
                    return Err(anyhow!("Credentials need either token_url or tenant_id"))
                }
            };
            resolved = resolved.with_credentials(CredentialsConfig {
                token_url,
                client_id: resolve_secret(&creds.client_id, env)?,
                client_secret: resolve_secret(&creds.client_secret, env)?,
                scope: creds
                    .scope
                    .unwrap_or_else(|| DEFAULT_GATEWAY_SCOPE.to_string()),
            });
        }

        if let Some(key) = config.gateway_key {
            let key = resolve_secret(&key, env)?;
            if !key.is_empty() {
                resolved = resolved.with_header(GATEWAY_KEY_HEADER.to_string(), key);
            }
        }

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

/// Resolve `env:VAR` references; other values are returned as written
fn resolve_secret(value: &str, env: EnvLookup<'_>) -> Result<String> {
    match value.strip_prefix("env:") {
        Some(var_name) => {
            env(var_name).with_context(|| format!("Environment variable not found: {}", var_name))
        }
        None => Ok(value.to_string()),
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Get XDG config directory
fn xdg_config_dir() -> Option<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
        _ => dirs::home_dir().map(|home| home.join(".config")),
    }
}
