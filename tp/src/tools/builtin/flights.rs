//! search_flights tool - cheapest round trip from the flight aggregator

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::dates;
use crate::providers::{FlightQuery, KiwiClient};
use crate::tools::request::{SEARCH_FLIGHTS, ToolRequest};
use crate::tools::{Tool, ToolContext, ToolResult};

const UNRECOGNIZED_DATE: &str = "Could not understand the date. Please use a format like 'YYYY-MM-DD' or a month name.";
const NO_FLIGHTS: &str = "No flights found for the specified route and date.";

/// Flight search backed by [`KiwiClient`]
pub struct SearchFlightsTool {
    client: Arc<KiwiClient>,
}

impl SearchFlightsTool {
    pub fn new(client: Arc<KiwiClient>) -> Self {
        debug!("SearchFlightsTool::new: called");
        Self { client }
    }

    /// Normalize the date, query the aggregator and summarize the first offer
    pub async fn search(&self, origin: &str, destination: &str, date: &str, ctx: &ToolContext) -> ToolResult {
        info!(%origin, %destination, %date, "Searching for flights");

        let window = match dates::normalize(date, ctx.today()) {
            Ok(window) => window,
            Err(e) => {
                debug!(%e, "SearchFlightsTool::search: date not understood, no request sent");
                return ToolResult::error(UNRECOGNIZED_DATE);
            }
        };
        debug!(date_from = %window.from_iso(), date_to = %window.to_iso(), "SearchFlightsTool::search: window resolved");

        let query = FlightQuery {
            origin,
            destination,
            window,
            adults: ctx.search.adults,
            currency: &ctx.search.currency,
        };

        match self.client.cheapest_round_trip(&query).await {
            Ok(Some(offer)) => ToolResult::success(format!(
                "Found a flight with airline(s) {} for {}{}.",
                offer.airlines.join(", "),
                ctx.search.currency_symbol,
                offer.price
            )),
            Ok(None) => ToolResult::empty(NO_FLIGHTS),
            Err(e) => {
                debug!(%e, "SearchFlightsTool::search: aggregator call failed");
                ToolResult::error(format!("An error occurred while calling the flight API: {}", e))
            }
        }
    }
}

#[async_trait]
impl Tool for SearchFlightsTool {
    fn name(&self) -> &'static str {
        SEARCH_FLIGHTS
    }

    fn description(&self) -> &'static str {
        "Search for real round-trip flights between two cities. \
         The date can be a specific date (YYYY-MM-DD) or a month name (e.g. \"December\"); \
         a month name means the first day of its next occurrence."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Departure city or airport, e.g. Mumbai"
                },
                "destination": {
                    "type": "string",
                    "description": "Arrival city or airport, e.g. Goa"
                },
                "date": {
                    "type": "string",
                    "description": "Departure date as YYYY-MM-DD or a month name"
                }
            },
            "required": ["origin", "destination", "date"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "SearchFlightsTool::execute: called");
        match ToolRequest::from_call(SEARCH_FLIGHTS, &input) {
            Ok(ToolRequest::Flights {
                origin,
                destination,
                date,
            }) => self.search(&origin, &destination, &date, ctx).await,
            Ok(other) => ToolResult::error(format!("Unexpected request for {}", other.tool_name())),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
