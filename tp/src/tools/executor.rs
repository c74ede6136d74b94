//! ToolExecutor - the capability registry the chat loop dispatches into

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::llm::{ToolCall, ToolDefinition};
use crate::providers::{HotelsClient, JsonTransport, KiwiClient, ReqwestTransport, TransportError};

use super::builtin::{FindActivitiesTool, SearchFlightsTool, SearchHotelsTool};
use super::{Tool, ToolContext, ToolRequest, ToolResult};

/// Maps tool names onto tool implementations
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the three travel tools
    pub fn travel(flights: Arc<KiwiClient>, hotels: Arc<HotelsClient>) -> Self {
        debug!("ToolExecutor::travel: called");
        let mut executor = Self::empty();
        executor.add_tool(Box::new(SearchFlightsTool::new(flights)));
        executor.add_tool(Box::new(SearchHotelsTool::new(hotels)));
        executor.add_tool(Box::new(FindActivitiesTool));
        executor
    }

    /// Create the travel tools wired to the real aggregators
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        debug!("ToolExecutor::from_config: called");
        let transport: Arc<dyn JsonTransport> = Arc::new(ReqwestTransport::new()?);
        let flights = KiwiClient::from_config(&config.flights, transport.clone());
        let hotels = HotelsClient::from_config(&config.hotels, transport);
        Ok(Self::travel(Arc::new(flights), Arc::new(hotels)))
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the LLM, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %tool_call.name, tool_id = %tool_call.id, "ToolExecutor::execute: called");
        match self.tools.get(&tool_call.name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(tool_call.input.clone(), ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                ToolResult::error(format!("Unknown tool: {}", tool_call.name))
            }
        }
    }

    /// Execute multiple tool calls, strictly one after another
    pub async fn execute_all(&self, tool_calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        debug!(count = %tool_calls.len(), "ToolExecutor::execute_all: called");
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            debug!(tool_name = %call.name, tool_id = %call.id, "ToolExecutor::execute_all: executing tool");
            let result = self.execute(call, ctx).await;
            results.push((call.id.clone(), result));
        }

        debug!("ToolExecutor::execute_all: completed all tools");
        results
    }

    /// Run a typed request without going through a model
    pub async fn dispatch(&self, request: &ToolRequest, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %request.tool_name(), "ToolExecutor::dispatch: called");
        let call = ToolCall {
            id: format!("direct-{}", request.tool_name()),
            name: request.tool_name().to_string(),
            input: request.arguments(),
        };
        self.execute(&call, ctx).await
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        debug!(%name, "ToolExecutor::has_tool: called");
        self.tools.contains_key(name)
    }

    /// Get tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        debug!("ToolExecutor::tool_names: called");
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}
