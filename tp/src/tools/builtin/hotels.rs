//! search_hotels tool - region lookup followed by a hotel search

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Days;
use serde_json::Value;
use tracing::{debug, info};

use crate::providers::{HotelQuery, HotelsClient};
use crate::tools::request::{SEARCH_HOTELS, ToolRequest};
use crate::tools::{Tool, ToolContext, ToolResult};

const NO_HOTELS: &str = "No hotels found for the specified destination and dates.";

/// Hotel search backed by [`HotelsClient`]
pub struct SearchHotelsTool {
    client: Arc<HotelsClient>,
}

impl SearchHotelsTool {
    pub fn new(client: Arc<HotelsClient>) -> Self {
        debug!("SearchHotelsTool::new: called");
        Self { client }
    }

    /// Resolve the region, then search a stay that starts `checkin-offset-days` from today
    pub async fn search(&self, destination: &str, nights: u32, ctx: &ToolContext) -> ToolResult {
        info!(%destination, nights, "Searching for hotels");

        let region_id = match self.client.resolve_region(destination).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!("SearchHotelsTool::search: no region, skipping hotel search");
                return ToolResult::empty(format!("Could not find a destination ID for {}.", destination));
            }
            Err(e) => return api_error(e),
        };

        let today = ctx.today();
        let stay = today
            .checked_add_days(Days::new(ctx.search.checkin_offset_days.into()))
            .and_then(|checkin| Some((checkin, checkin.checked_add_days(Days::new(nights.into()))?)));
        let Some((checkin, checkout)) = stay else {
            return api_error(format!("stay of {} nights from {} is out of range", nights, today));
        };

        let query = HotelQuery {
            region_id: &region_id,
            checkin,
            checkout,
            adults: ctx.search.adults,
            sort_order: &ctx.search.sort_order,
        };

        match self.client.first_hotel(&query).await {
            Ok(Some(hotel)) => ToolResult::success(format!(
                "Found hotel: '{}' with a price of {}.",
                hotel.name, hotel.price
            )),
            Ok(None) => ToolResult::empty(NO_HOTELS),
            Err(e) => api_error(e),
        }
    }
}

fn api_error(e: impl std::fmt::Display) -> ToolResult {
    debug!(%e, "SearchHotelsTool: aggregator call failed");
    ToolResult::error(format!("An error occurred while calling the hotel API: {}", e))
}

#[async_trait]
impl Tool for SearchHotelsTool {
    fn name(&self) -> &'static str {
        SEARCH_HOTELS
    }

    fn description(&self) -> &'static str {
        "Search for real hotels at a destination for a number of nights. \
         Finds the destination first, then returns a recommended hotel and its lead price."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "City or region to stay in, e.g. Goa"
                },
                "num_nights": {
                    "type": "integer",
                    "description": "Number of nights to stay"
                }
            },
            "required": ["destination", "num_nights"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "SearchHotelsTool::execute: called");
        match ToolRequest::from_call(SEARCH_HOTELS, &input) {
            Ok(ToolRequest::Hotels { destination, nights }) => self.search(&destination, nights, ctx).await,
            Ok(other) => ToolResult::error(format!("Unexpected request for {}", other.tool_name())),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
