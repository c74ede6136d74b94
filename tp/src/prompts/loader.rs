//! PromptLoader - renders the system prompt with Handlebars

use chrono::NaiveDate;
use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::config::SearchConfig;
use crate::dates::ISO_FORMAT;

/// Variables available to the travel agent template
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub today: String,
    pub adults: u32,
    pub currency: String,
    pub checkin_offset_days: u32,
}

impl PromptContext {
    pub fn new(today: NaiveDate, search: &SearchConfig) -> Self {
        Self {
            today: today.format(ISO_FORMAT).to_string(),
            adults: search.adults,
            currency: search.currency.clone(),
            checkin_offset_days: search.checkin_offset_days,
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    hbs: Handlebars<'static>,
}

impl PromptLoader {
    pub fn new() -> Self {
        debug!("PromptLoader::new: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Render an embedded template by name
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template =
            embedded::get_embedded(template_name).ok_or_else(|| eyre!("Prompt template not found: {}", template_name))?;

        self.hbs
            .render_template(template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// The travel agent system prompt
    pub fn system_prompt(&self, context: &PromptContext) -> Result<String> {
        self.render("travel_agent", context)
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::new()
    }
}
