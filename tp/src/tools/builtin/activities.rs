//! find_activities tool - canned activity suggestions

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::tools::request::{FIND_ACTIVITIES, ToolRequest};
use crate::tools::{Tool, ToolContext, ToolResult};

const BEACHES: &str = "Found activities: Baga Beach, Calangute Beach, Anjuna Beach.";
const FOOD: &str = "Found local food spots: Fisherman's Wharf, Britto's, Martin's Corner.";
const NONE_FOUND: &str = "No activities found for that category.";

/// Static activity lookup keyed by category; makes no external call
pub struct FindActivitiesTool;

impl FindActivitiesTool {
    /// Look up activities for a category (case-insensitive)
    pub fn lookup(&self, destination: &str, category: &str) -> ToolResult {
        info!(%destination, %category, "Finding activities");
        match category.to_lowercase().as_str() {
            "beaches" => ToolResult::success(BEACHES),
            "food" => ToolResult::success(FOOD),
            _ => {
                debug!("FindActivitiesTool::lookup: no canned list for category");
                ToolResult::empty(NONE_FOUND)
            }
        }
    }
}

#[async_trait]
impl Tool for FindActivitiesTool {
    fn name(&self) -> &'static str {
        FIND_ACTIVITIES
    }

    fn description(&self) -> &'static str {
        "Find things to do at a destination for a category such as 'beaches' or 'food'. \
         Returns a short list of suggestions."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "Destination city or region, e.g. Goa"
                },
                "category": {
                    "type": "string",
                    "description": "Kind of activity, e.g. beaches or food"
                }
            },
            "required": ["destination", "category"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> ToolResult {
        debug!(?input, "FindActivitiesTool::execute: called");
        match ToolRequest::from_call(FIND_ACTIVITIES, &input) {
            Ok(ToolRequest::Activities { destination, category }) => self.lookup(&destination, &category),
            Ok(other) => ToolResult::error(format!("Unexpected request for {}", other.tool_name())),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolOutcome;
    use serde_json::json;

    #[tokio::test]
    async fn test_beaches_any_case() {
        let ctx = ToolContext::default();
        for category in ["Beaches", "beaches", "BEACHES"] {
            let result = FindActivitiesTool
                .execute(json!({"destination": "Goa", "category": category}), &ctx)
                .await;
            assert_eq!(result.outcome, ToolOutcome::Success);
            assert!(result.content.contains("Baga Beach"));
        }
    }

    #[tokio::test]
    async fn test_food() {
        let result = FindActivitiesTool
            .execute(json!({"destination": "Goa", "category": "food"}), &ToolContext::default())
            .await;
        assert_eq!(result.content, FOOD);
        assert!(result.content.contains("Fisherman's Wharf"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_empty() {
        let result = FindActivitiesTool
            .execute(json!({"destination": "Goa", "category": "nightlife"}), &ToolContext::default())
            .await;
        assert_eq!(result.outcome, ToolOutcome::Empty);
        assert_eq!(result.content, "No activities found for that category.");
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let first = FindActivitiesTool.lookup("Goa", "beaches");
        let second = FindActivitiesTool.lookup("Goa", "beaches");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_category_is_error() {
        let result = FindActivitiesTool
            .execute(json!({"destination": "Goa"}), &ToolContext::default())
            .await;
        assert!(result.is_error());
        assert!(result.content.contains("category"));
    }
}
