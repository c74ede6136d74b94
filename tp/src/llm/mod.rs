//! LLM client module
//!
//! Provider-agnostic completion types plus one client per supported provider.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod gemini;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};

use crate::config::{LlmConfig, ResolvedLlmConfig};

/// Create an LLM client based on the provider specified in config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    let resolved = config
        .resolve()
        .map_err(|_| LlmError::UnknownProvider(config.provider.clone()))?;

    create_client_from_resolved(&resolved)
}

/// Create an LLM client from a resolved configuration
pub fn create_client_from_resolved(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client_from_resolved: called");
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_config(config)?)),
        "openai" => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        "anthropic" => Ok(Arc::new(AnthropicClient::from_config(config)?)),
        other => Err(LlmError::UnknownProvider(other.to_string())),
    }
}

/// HTTP client shared by the providers; no timeout unless configured
pub(crate) fn build_http(timeout_ms: Option<u64>) -> Result<Client, LlmError> {
    let mut builder = Client::builder().user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")));
    if let Some(ms) = timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn resolved(provider: &str, env: &str) -> ResolvedLlmConfig {
        ResolvedLlmConfig {
            provider: provider.to_string(),
            model: "m".to_string(),
            api_key_env: env.to_string(),
            base_url: "http://localhost".to_string(),
            max_tokens: 100,
            timeout_ms: Some(1000),
        }
    }

    #[test]
    #[serial]
    fn test_create_client_missing_key() {
        let err = create_client_from_resolved(&resolved("gemini", "TRIPPLANNER_TEST_NO_SUCH_KEY"))
            .err()
            .unwrap();
        assert!(matches!(err, LlmError::MissingApiKey { ref env } if env == "TRIPPLANNER_TEST_NO_SUCH_KEY"));
    }

    #[test]
    #[serial]
    fn test_create_client_each_provider() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var("TRIPPLANNER_TEST_PROVIDER_KEY", "k");
        }

        let results: Vec<bool> = ["gemini", "openai", "anthropic"]
            .iter()
            .map(|p| create_client_from_resolved(&resolved(p, "TRIPPLANNER_TEST_PROVIDER_KEY")).is_ok())
            .collect();

        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::remove_var("TRIPPLANNER_TEST_PROVIDER_KEY");
        }

        assert_eq!(results, vec![true, true, true]);
    }

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "llama".to_string(),
            ..LlmConfig::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, LlmError::UnknownProvider(ref p) if p == "llama"));
    }
}
