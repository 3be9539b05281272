//! LLM client abstractions and implementations

pub mod client;
pub mod credentials;
pub mod message;
pub mod providers;

pub use client::{ChatOptions, FinishReason, LlmClient, LlmResponse, Usage};
pub use credentials::{ClientCredentialsProvider, CredentialProvider, StaticToken};
pub use message::{LlmMessage, MessageRole};
pub use providers::*;
