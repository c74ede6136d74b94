//! Google Gemini client (generateContent)
//!
//! Gemini identifies function calls by name rather than by id. Calls that come
//! back without an id get a generated one, and tool results are matched back
//! to a function name by scanning earlier `ToolUse` blocks.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use super::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmClient, LlmError, Message, Role, StopReason, TokenUsage,
    ToolCall,
};
use crate::config::ResolvedLlmConfig;

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "GeminiClient::from_config: called");
        let api_key = config.get_api_key().ok_or_else(|| LlmError::MissingApiKey {
            env: config.api_key_env.clone(),
        })?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http: super::build_http(config.timeout_ms)?,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the generateContent request body
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        let mut body = json!({
            "contents": convert_messages(&request.messages),
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.min(self.max_tokens),
            },
        });

        if !request.system_prompt.is_empty() {
            body["systemInstruction"] = json!({"parts": [{"text": request.system_prompt}]});
        }

        if !request.tools.is_empty() {
            let declarations: Vec<Value> = request.tools.iter().map(|t| t.to_gemini_declaration()).collect();
            body["tools"] = json!([{"functionDeclarations": declarations}]);
            body["toolConfig"] = json!({"functionCallingConfig": {"mode": "AUTO"}});
        }

        body
    }

    /// Parse the first candidate of a generateContent response
    fn parse_response(&self, api_response: GeminiResponse) -> Result<CompletionResponse, LlmError> {
        debug!(candidates = api_response.candidates.len(), "parse_response: called");
        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        let candidate = api_response.candidates.into_iter().next().ok_or_else(|| {
            let reason = api_response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            LlmError::InvalidResponse(format!("Gemini returned no candidates: {}", reason))
        })?;

        let mut texts = Vec::new();
        let mut tool_calls = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(text) = part.text {
                texts.push(text);
            }
            if let Some(call) = part.function_call {
                let id = call.id.unwrap_or_else(|| format!("call_{}", Uuid::now_v7().simple()));
                debug!(%id, name = %call.name, "parse_response: function call");
                tool_calls.push(ToolCall {
                    id,
                    name: call.name,
                    input: call.args.unwrap_or_else(|| json!({})),
                });
            }
        }

        let stop_reason = if tool_calls.is_empty() {
            StopReason::from_gemini(candidate.finish_reason.as_deref())
        } else {
            StopReason::ToolUse
        };

        Ok(CompletionResponse {
            content: if texts.is_empty() { None } else { Some(texts.join("")) },
            tool_calls,
            stop_reason,
            usage,
        })
    }
}

/// Convert internal messages to Gemini `contents`
fn convert_messages(messages: &[Message]) -> Vec<Value> {
    let mut call_names: HashMap<String, String> = HashMap::new();
    let mut contents = Vec::with_capacity(messages.len());

    for msg in messages {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "model",
        };

        let parts: Vec<Value> = msg
            .content
            .blocks()
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => json!({"text": text}),
                ContentBlock::ToolUse { id, name, input } => {
                    call_names.insert(id, name.clone());
                    json!({"functionCall": {"name": name, "args": input}})
                }
                ContentBlock::ToolResult {
                    tool_use_id, content, ..
                } => {
                    let name = call_names.get(&tool_use_id).cloned().unwrap_or(tool_use_id);
                    json!({"functionResponse": {"name": name, "response": {"result": content}}})
                }
            })
            .collect();

        if parts.is_empty() {
            debug!(%role, "convert_messages: skipping message with no parts");
            continue;
        }
        contents.push(json!({"role": role, "parts": parts}));
    }

    contents
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.clone())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        debug!("complete: success");
        let api_response: GeminiResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct GeminiFunctionCall {
    id: Option<String>,
    name: String,
    args: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}
