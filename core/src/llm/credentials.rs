//! Bearer token providers for authenticated model endpoints

use crate::config::CredentialsConfig;
use crate::error::{LlmError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before they actually expire
const REFRESH_SKEW: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Source of bearer tokens for a model client
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return a currently valid token
    async fn token(&self) -> Result<String>;
}

/// A fixed token that never expires
pub struct StaticToken(String);

impl StaticToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    /// A lifetime too large to represent falls back to the default
    fn new(value: String, expires_in: u64, now: Instant) -> Self {
        let expires_at = now
            .checked_add(Duration::from_secs(expires_in))
            .unwrap_or(now + Duration::from_secs(DEFAULT_EXPIRES_IN));
        Self { value, expires_at }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_SKEW < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
}

/// OAuth2 client-credentials flow with in-memory caching
pub struct ClientCredentialsProvider {
    http: reqwest::Client,
    config: CredentialsConfig,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(http: reqwest::Client, config: CredentialsConfig) -> Self {
        Self {
            http,
            config,
            cached: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<TokenResponse> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| LlmError::Authentication {
                message: format!("Token request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Authentication {
                message: format!("Token endpoint returned {}: {}", status, body),
            }
            .into());
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| LlmError::Authentication {
                message: format!("Invalid token response: {}", e),
            })?;

        Ok(token)
    }
}

#[async_trait]
impl CredentialProvider for ClientCredentialsProvider {
    async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Instant::now()) {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!("Requesting new access token from {}", self.config.token_url);
        let response = self.fetch().await?;
        let token = CachedToken::new(
            response.access_token,
            response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            Instant::now(),
        );
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.token().await.unwrap(), "abc");
    }

    #[test]
    fn test_cached_token_freshness() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_string(), 3600, now);
        assert!(token.is_fresh(now));
        assert!(token.is_fresh(now + Duration::from_secs(3500)));
        // Inside the refresh window
        assert!(!token.is_fresh(now + Duration::from_secs(3550)));
        assert!(!token.is_fresh(now + Duration::from_secs(4000)));
    }

    #[test]
    fn test_short_lived_token_is_never_fresh() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_string(), 30, now);
        assert!(!token.is_fresh(now));
    }

    #[test]
    fn test_absurd_lifetime_uses_default() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_string(), u64::MAX, now);
        assert_eq!(token.expires_at, now + Duration::from_secs(DEFAULT_EXPIRES_IN));
        assert!(token.is_fresh(now));
    }

    #[test]
    fn test_token_response_defaults() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"xyz","token_type":"Bearer"}"#).unwrap();
        assert_eq!(parsed.access_token, "xyz");
        assert!(parsed.expires_in.is_none());
    }
}
