//! HTTP transport settings shared by the model clients and the network tools

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scoped transport configuration.
///
/// Every collaborator that talks HTTP builds its client from one of these, so TLS
/// verification and timeouts are decided per deployment rather than process-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Verify TLS certificates
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("wayfinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_tls: default_verify_tls(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    /// Disable certificate verification for this transport only
    pub fn insecure(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a reqwest client honouring these settings
    pub fn build_client(&self) -> Result<reqwest::Client> {
        if !self.verify_tls {
            tracing::warn!("TLS certificate verification is disabled for this transport");
        }

        let client = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout())
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_verify_tls() {
        let transport = TransportConfig::default();
        assert!(transport.verify_tls);
        assert_eq!(transport.timeout_secs, 30);
        assert!(transport.user_agent.starts_with("wayfinder/"));
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let transport: TransportConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert!(transport.verify_tls);
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_insecure_builds_client() {
        let transport = TransportConfig::default().insecure().with_timeout(3);
        assert!(!transport.verify_tls);
        assert!(transport.build_client().is_ok());
    }
}
