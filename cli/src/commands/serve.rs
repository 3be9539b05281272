//! HTTP server command
//!
//! - `GET  /healthz` returns `{"status": "ok"}`
//! - `POST /prompt` takes `{prompt, model?, system?}` and returns `{output}`

use super::{build_agent, AgentOptions};
use crate::config::CliConfigLoader;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use wayfinder_core::{AgentCore, NullOutput};

/// Shared by every request; each request still gets its own task invocation
#[derive(Clone)]
pub struct AppState {
    agent: Arc<AgentCore>,
}

impl AppState {
    pub fn new(agent: Arc<AgentCore>) -> Self {
        Self { agent }
    }
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub output: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "prompt must not be empty" })),
        ));
    }

    let output = state
        .agent
        .run_task(
            &request.prompt,
            request.system.as_deref(),
            request.model.as_deref(),
        )
        .await;

    Ok(Json(PromptResponse { output }))
}

/// Build the CORS layer from a comma separated origin list; `*` allows any origin
pub fn cors_layer(origins: &str) -> Result<CorsLayer> {
    let origins: Vec<&str> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.contains(&"*") {
        return Ok(layer.allow_origin(Any));
    }

    let values = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(values)))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/prompt", post(prompt))
        .with_state(state)
        .layer(cors)
}

/// Serve the agent over HTTP until the process is stopped
pub async fn serve_command(
    addr: String,
    cors_origins: String,
    config_loader: CliConfigLoader,
    options: AgentOptions,
) -> Result<()> {
    let cors = cors_layer(&cors_origins)?;
    let agent = build_agent(&config_loader, &options, Arc::new(NullOutput)).await?;
    let app = router(AppState::new(Arc::new(agent)), cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🌐 Wayfinder server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wayfinder_core::llm::{ChatOptions, LlmClient, LlmMessage, LlmResponse};
    use wayfinder_core::{AgentBuilder, ToolRegistry};

    /// Answers every prompt by echoing the model it was asked to use
    struct EchoModel;

    #[async_trait]
    impl LlmClient for EchoModel {
        async fn chat_completion(
            &self,
            _messages: Vec<LlmMessage>,
            options: Option<ChatOptions>,
        ) -> wayfinder_core::Result<LlmResponse> {
            let model = options
                .and_then(|o| o.model)
                .unwrap_or_else(|| "default".to_string());
            Ok(LlmResponse::text(format!("answered by {}", model), model))
        }

        fn model_name(&self) -> &str {
            "echo"
        }

        fn provider_name(&self) -> &str {
            "mock"
        }
    }

    fn state() -> AppState {
        let agent = AgentBuilder::with_client(Arc::new(EchoModel))
            .with_registry(Arc::new(ToolRegistry::new()))
            .build()
            .unwrap();
        AppState::new(Arc::new(agent))
    }

    #[tokio::test]
    async fn test_healthz() {
        let Json(body) = healthz().await;
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_prompt_returns_output() {
        let request: PromptRequest =
            serde_json::from_str(r#"{"prompt": "hi", "model": "gpt-4o"}"#).unwrap();

        let Json(response) = prompt(State(state()), Json(request)).await.unwrap();
        assert_eq!(response.output, "answered by gpt-4o");
    }

    #[tokio::test]
    async fn test_optional_fields_may_be_omitted() {
        let request: PromptRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
        assert!(request.model.is_none());
        assert!(request.system.is_none());

        let Json(response) = prompt(State(state()), Json(request)).await.unwrap();
        assert_eq!(response.output, "answered by default");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_bad_request() {
        let request = PromptRequest {
            prompt: "   ".to_string(),
            model: None,
            system: None,
        };

        let (status, _) = prompt(State(state()), Json(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_origins() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("").is_ok());
        assert!(cors_layer("http://localhost:3000, https://example.com").is_ok());
        assert!(cors_layer("http://bad\norigin").is_err());
    }
}
