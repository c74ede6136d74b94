//! Tool error types

use thiserror::Error;

/// Errors raised while turning a model tool call into a [`ToolRequest`](super::ToolRequest)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Missing required argument '{arg}' for {tool}")]
    MissingArgument { tool: String, arg: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
