//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not set: export {env}")]
    MissingApiKey { env: String },

    #[error("Unknown LLM provider: '{0}'. Supported: gemini, openai, anthropic")]
    UnknownProvider(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Whether the provider rejected the request because of rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::ApiError { status: 429, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = LlmError::ApiError {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API error 400: API key not valid");
        assert!(!err.is_rate_limit());
    }

    #[test]
    fn test_rate_limit_detection() {
        let err = LlmError::ApiError {
            status: 429,
            message: "Resource exhausted".to_string(),
        };
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let err = LlmError::MissingApiKey {
            env: "GEMINI_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
