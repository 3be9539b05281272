//! Client for OpenAI-compatible LLM gateways that authenticate with bearer tokens

use crate::config::{ModelParams, Protocol, ResolvedLlmConfig};
use crate::error::{Error, LlmError, Result};
use crate::llm::credentials::{ClientCredentialsProvider, CredentialProvider, StaticToken};
use crate::llm::{ChatOptions, FinishReason, LlmClient, LlmMessage, LlmResponse, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Gateway client
pub struct GatewayClient {
    client: Client,
    base_url: String,
    model: String,
    params: ModelParams,
    headers: HashMap<String, String>,
    credentials: Arc<dyn CredentialProvider>,
}

/// Normalize a gateway base URL so that it always ends in `/v1`
pub fn normalize_base_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        base.to_string()
    } else {
        format!("{}/v1", base)
    }
}

impl GatewayClient {
    /// Create a new gateway client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.protocol != Protocol::Gateway {
            return Err(LlmError::InvalidRequest {
                message: format!(
                    "Gateway client cannot serve protocol '{}'",
                    config.protocol.as_str()
                ),
            }
            .into());
        }

        let client = config.transport.build_client()?;

        let credentials: Arc<dyn CredentialProvider> = match &config.credentials {
            Some(creds) => Arc::new(ClientCredentialsProvider::new(
                client.clone(),
                creds.clone(),
            )),
            None if !config.api_key.is_empty() => Arc::new(StaticToken::new(&config.api_key)),
            None => {
                return Err(Error::Llm(LlmError::Authentication {
                    message: "No credentials configured for the gateway".to_string(),
                }))
            }
        };

        Ok(Self::with_credentials(config, client, credentials))
    }

    /// Create a gateway client with an explicit credential provider
    pub fn with_credentials(
        config: &ResolvedLlmConfig,
        client: Client,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            base_url: normalize_base_url(&config.base_url),
            model: config.model.clone(),
            params: config.params.clone(),
            headers: config.headers.clone(),
            credentials,
        }
    }

    fn build_request(&self, messages: Vec<LlmMessage>, options: ChatOptions) -> GatewayRequest {
        let options = options.merged_with(&self.params);
        GatewayRequest {
            model: options.model.unwrap_or_else(|| self.model.clone()),
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
        }
    }

    fn convert_response(&self, response: GatewayResponse) -> Result<LlmResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        Ok(LlmResponse {
            text: choice.message.content.unwrap_or_default(),
            model: response.model.unwrap_or_else(|| self.model.clone()),
            usage: response.usage,
            finish_reason: choice.finish_reason.as_deref().map(FinishReason::from_openai),
        })
    }
}

fn status_error(status: u16, message: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Authentication { message },
        429 => LlmError::RateLimit,
        _ => LlmError::ApiError { status, message },
    }
}

#[async_trait]
impl LlmClient for GatewayClient {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let request = self.build_request(messages, options.unwrap_or_default());
        let token = self.credentials.token().await?;

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(token)
            .json(&request);
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gateway returned {}: {}", status, error_text);
            return Err(status_error(status, error_text).into());
        }

        let gateway_response: GatewayResponse =
            response.json().await.map_err(|e| LlmError::Network {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.convert_response(gateway_response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "gateway"
    }
}

#[derive(Debug, Serialize)]
struct GatewayRequest {
    model: String,
    messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    model: Option<String>,
    choices: Vec<GatewayChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct GatewayChoice {
    message: GatewayMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayMessage {
    content: Option<String>,
}
