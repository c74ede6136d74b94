//! Tool system for the travel assistant
//!
//! Tools are total functions from their arguments to a [`ToolResult`]: bad
//! input, failed requests and empty searches all come back as text the model
//! can read, never as an error that escapes into the chat loop.

mod context;
mod error;
mod executor;
mod request;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use request::{FIND_ACTIVITIES, SEARCH_FLIGHTS, SEARCH_HOTELS, ToolRequest};
pub use traits::{Tool, ToolOutcome, ToolResult};
