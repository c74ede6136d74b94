//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::context::ToolContext;

/// A travel lookup the model can call
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the model's function-call name)
    fn name(&self) -> &'static str;

    /// Natural-language purpose shown to the model
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool. Never fails: every failure is encoded in the result
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult;
}

/// How a lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Found something
    Success,
    /// Ran fine but nothing matched
    Empty,
    /// Bad input, missing credential or a failed request
    Error,
}

/// Result of a tool execution
///
/// `content` is the exact text handed back to the model; `outcome` lets
/// callers branch without matching on that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub outcome: ToolOutcome,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            outcome: ToolOutcome::Success,
        }
    }

    /// Create a no-results result
    pub fn empty(content: impl Into<String>) -> Self {
        debug!("ToolResult::empty: called");
        Self {
            content: content.into(),
            outcome: ToolOutcome::Empty,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            outcome: ToolOutcome::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome == ToolOutcome::Error
    }
}
