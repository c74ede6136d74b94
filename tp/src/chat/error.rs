//! Chat error types

use thiserror::Error;

use crate::llm::LlmError;

/// Failures that end a `send` without a final answer
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("No final answer after {0} model turns")]
    MaxTurns(u32),

    #[error("The model returned an empty response")]
    EmptyReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_is_transparent() {
        let err: ChatError = LlmError::ApiError {
            status: 401,
            message: "bad key".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "API error 401: bad key");
    }

    #[test]
    fn test_max_turns_message() {
        assert!(ChatError::MaxTurns(10).to_string().contains("10"));
    }
}
