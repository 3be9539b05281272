//! Minimal configuration module for Wayfinder core
//!
//! Only exports pure data types. All discovery and loading logic is in the CLI layer.

pub mod transport;
pub mod types;

pub use transport::TransportConfig;
pub use types::{CredentialsConfig, ModelParams, Protocol, ResolvedLlmConfig};
