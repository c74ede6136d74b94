//! ToolContext - execution context for tools

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::SearchConfig;

/// Per-session settings shared by every tool call
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Fixed search constants (adults, currency, check-in offset, sort order)
    pub search: SearchConfig,

    /// Pinned "today"; `None` reads the local clock on every call
    fixed_today: Option<NaiveDate>,
}

impl ToolContext {
    /// Create a context that follows the local clock
    pub fn new(search: SearchConfig) -> Self {
        debug!(?search, "ToolContext::new: called");
        Self {
            search,
            fixed_today: None,
        }
    }

    /// Create a context with "today" pinned (for testing and replay)
    pub fn with_today(search: SearchConfig, today: NaiveDate) -> Self {
        debug!(%today, "ToolContext::with_today: called");
        Self {
            search,
            fixed_today: Some(today),
        }
    }

    /// The date relative searches are resolved against
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
