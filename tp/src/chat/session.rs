//! ChatSession - stateful conversation with automatic tool execution

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::{
    self, CompletionRequest, CompletionResponse, ContentBlock, LlmClient, Message, StopReason, TokenUsage,
    ToolDefinition,
};
use crate::prompts::{PromptContext, PromptLoader};
use crate::tools::{ToolContext, ToolExecutor, ToolRequest, ToolResult};

use super::ChatError;

const CONTINUE_PROMPT: &str = "Continue from where you left off. Your previous response was truncated.";

/// Limits for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    /// Model calls allowed per `send`
    pub max_turns: u32,
    pub max_tokens: u32,
}

impl ChatSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_turns: config.chat.max_turns,
            max_tokens: config.llm.max_tokens,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_turns: 10,
            max_tokens: 4096,
        }
    }
}

/// One tool invocation made while answering
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRecord {
    pub name: String,
    pub input: Value,
    pub result: ToolResult,
}

impl ToolCallRecord {
    /// Human-readable trace line, e.g. "Searching for hotels in Goa for 5 nights"
    pub fn describe(&self) -> String {
        match ToolRequest::from_call(&self.name, &self.input) {
            Ok(request) => request.to_string(),
            Err(_) => format!("{}({})", self.name, self.input),
        }
    }
}

/// The model's final answer plus what it took to get there
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Final model text, verbatim
    pub text: String,
    /// Tool calls in execution order
    pub tool_calls: Vec<ToolCallRecord>,
    pub usage: TokenUsage,
}

/// A conversation that keeps its history across `send` calls
pub struct ChatSession {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    ctx: ToolContext,
    system_prompt: String,
    settings: ChatSettings,
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        executor: ToolExecutor,
        ctx: ToolContext,
        system_prompt: impl Into<String>,
        settings: ChatSettings,
    ) -> Self {
        debug!(?settings, "ChatSession::new: called");
        Self {
            llm,
            executor,
            ctx,
            system_prompt: system_prompt.into(),
            settings,
            messages: Vec::new(),
        }
    }

    /// Build a session from configuration: validated credentials, the
    /// configured provider, the real aggregators and the rendered system prompt
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        debug!("ChatSession::from_config: called");
        config.validate()?;
        let llm = llm::create_client(&config.llm)?;
        let executor = ToolExecutor::from_config(config)?;
        let ctx = ToolContext::new(config.search.clone());
        let system_prompt = PromptLoader::new().system_prompt(&PromptContext::new(ctx.today(), &config.search))?;
        Ok(Self::new(llm, executor, ctx, system_prompt, ChatSettings::from_config(config)))
    }

    /// Conversation so far
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Forget the conversation, keeping tools and prompt
    pub fn reset(&mut self) {
        debug!(message_count = self.messages.len(), "ChatSession::reset: called");
        self.messages.clear();
    }

    /// Send a user message and run the model/tool loop to a final answer
    ///
    /// On failure the history is rolled back to what it was before this call.
    pub async fn send(&mut self, text: &str) -> Result<ChatReply, ChatError> {
        debug!(text_len = text.len(), history = self.messages.len(), "ChatSession::send: called");
        let checkpoint = self.messages.len();
        self.messages.push(Message::user(text));

        let result = self.run_loop().await;
        if result.is_err() {
            debug!(checkpoint, "ChatSession::send: rolling back history");
            self.messages.truncate(checkpoint);
        }
        result
    }

    async fn run_loop(&mut self) -> Result<ChatReply, ChatError> {
        let tool_defs: Vec<ToolDefinition> = self.executor.definitions();
        let mut tool_calls = Vec::new();
        let mut usage = TokenUsage::default();
        let mut partial = String::new();

        for turn in 1..=self.settings.max_turns {
            debug!(turn, max_turns = self.settings.max_turns, "run_loop: turn start");
            let request = CompletionRequest {
                system_prompt: self.system_prompt.clone(),
                messages: self.messages.clone(),
                tools: tool_defs.clone(),
                max_tokens: self.settings.max_tokens,
            };

            let response = self.llm.complete(request).await?;
            debug!(turn, stop_reason = ?response.stop_reason, tool_calls = response.tool_calls.len(), "run_loop: response received");
            usage.add(&response.usage);
            if let Some(message) = build_assistant_message(&response) {
                self.messages.push(message);
            }

            // Requested calls always run, even when the turn was cut short
            match response.stop_reason {
                _ if !response.tool_calls.is_empty() => {
                    partial.clear();
                    let results = self.executor.execute_all(&response.tool_calls, &self.ctx).await;
                    for (call, (_, result)) in response.tool_calls.iter().zip(results.iter()) {
                        info!(tool = %call.name, outcome = ?result.outcome, "Tool call finished");
                        tool_calls.push(ToolCallRecord {
                            name: call.name.clone(),
                            input: call.input.clone(),
                            result: result.clone(),
                        });
                    }
                    self.messages.push(build_tool_result_message(&results));
                }
                StopReason::MaxTokens => {
                    debug!(turn, "run_loop: output truncated, asking to continue");
                    if let Some(text) = &response.content {
                        partial.push_str(text);
                    }
                    self.messages.push(Message::user(CONTINUE_PROMPT));
                }
                _ => {
                    if let Some(text) = &response.content {
                        partial.push_str(text);
                    }
                    if partial.trim().is_empty() {
                        return Err(ChatError::EmptyReply);
                    }
                    info!(turn, tool_calls = tool_calls.len(), tokens = usage.total(), "Chat turn complete");
                    return Ok(ChatReply {
                        text: partial,
                        tool_calls,
                        usage,
                    });
                }
            }
        }

        warn!("Max turns ({}) reached without a final answer", self.settings.max_turns);
        Err(ChatError::MaxTurns(self.settings.max_turns))
    }
}

/// Assistant message echoing the model's text and tool calls, `None` when there is neither
fn build_assistant_message(response: &CompletionResponse) -> Option<Message> {
    let mut blocks = Vec::new();

    if let Some(text) = &response.content {
        blocks.push(ContentBlock::text(text));
    }

    for call in &response.tool_calls {
        blocks.push(ContentBlock::ToolUse {
            id: call.id.clone(),
            name: call.name.clone(),
            input: call.input.clone(),
        });
    }

    if blocks.is_empty() {
        return None;
    }
    Some(Message::assistant_blocks(blocks))
}

/// User message carrying tool results, text passed through unchanged
fn build_tool_result_message(results: &[(String, ToolResult)]) -> Message {
    let blocks: Vec<ContentBlock> = results
        .iter()
        .map(|(id, result)| ContentBlock::tool_result(id, &result.content, result.is_error()))
        .collect();

    Message::user_blocks(blocks)
}
