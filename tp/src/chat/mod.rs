//! Chat orchestration
//!
//! A [`ChatSession`] drives the model/tool loop: the model decides which
//! tools to call, the session runs them one at a time and feeds each result
//! back verbatim until the model produces a final answer.

mod error;
mod session;

pub use error::ChatError;
pub use session::{ChatReply, ChatSession, ChatSettings, ToolCallRecord};
