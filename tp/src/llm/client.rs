//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call carries the full conversation
///
/// Conversation state lives in the caller (see `ChatSession`); a client only
/// turns one request into one response.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the whole response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
