//! Hotels.com provider client (RapidAPI)
//!
//! Searching is a two-stage protocol: the destination name is first resolved
//! to a provider region id (`gaiaId`), then hotels are searched in that region.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::HotelsConfig;
use crate::dates::ISO_FORMAT;

use super::kiwi::display_scalar;
use super::transport::{GetRequest, JsonTransport, TransportError};

/// Region entries carry this `__typename`
const REGION_TYPENAME: &str = "Region";

/// Hotel search parameters for a resolved region
#[derive(Debug, Clone)]
pub struct HotelQuery<'a> {
    pub region_id: &'a str,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub adults: u32,
    pub sort_order: &'a str,
}

/// The first listed hotel and its lead price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelOffer {
    pub name: String,
    pub price: String,
}

/// Hotel aggregator client
pub struct HotelsClient {
    transport: Arc<dyn JsonTransport>,
    base_url: String,
    host: String,
    domain: String,
    locale: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl HotelsClient {
    /// Create a client; the API key is read from the configured env var
    pub fn from_config(config: &HotelsConfig, transport: Arc<dyn JsonTransport>) -> Self {
        debug!(base_url = %config.base_url, "HotelsClient::from_config: called");
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            domain: config.domain.clone(),
            locale: config.locale.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key: config.api_key(),
        }
    }

    /// Override the API key (used by tests and embedders)
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn authorized(&self, request: GetRequest) -> Result<GetRequest, TransportError> {
        let api_key = self.api_key.clone().ok_or_else(|| TransportError::MissingApiKey {
            env: self.api_key_env.clone(),
        })?;
        Ok(request
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", self.host.clone()))
    }

    /// Build the region lookup request
    pub fn region_request(&self, destination: &str) -> Result<GetRequest, TransportError> {
        self.authorized(
            GetRequest::new(format!("{}/v2/regions", self.base_url))
                .query("query", destination)
                .query("domain", self.domain.clone())
                .query("locale", self.locale.clone()),
        )
    }

    /// Build the hotel search request
    pub fn search_request(&self, query: &HotelQuery<'_>) -> Result<GetRequest, TransportError> {
        self.authorized(
            GetRequest::new(format!("{}/v2/hotels/search", self.base_url))
                .query("region_id", query.region_id)
                .query("locale", self.locale.clone())
                .query("checkin_date", query.checkin.format(ISO_FORMAT).to_string())
                .query("checkout_date", query.checkout.format(ISO_FORMAT).to_string())
                .query("domain", self.domain.clone())
                .query("adults_number", query.adults.to_string())
                .query("sort_order", query.sort_order),
        )
    }

    /// Resolve a destination name to a region id, `None` when no region matches
    pub async fn resolve_region(&self, destination: &str) -> Result<Option<String>, TransportError> {
        info!(%destination, "Resolving hotel region");
        let request = self.region_request(destination)?;
        let body = self.transport.get_json(request).await?;
        let region_id = parse_region_id(&body);
        debug!(?region_id, "resolve_region: parsed response");
        Ok(region_id)
    }

    /// Search hotels in a resolved region, `None` when the list is empty
    pub async fn first_hotel(&self, query: &HotelQuery<'_>) -> Result<Option<HotelOffer>, TransportError> {
        info!(region_id = %query.region_id, checkin = %query.checkin, checkout = %query.checkout, "Searching hotels");
        let request = self.search_request(query)?;
        let body = self.transport.get_json(request).await?;
        let offer = parse_first_hotel(&body);
        debug!(found = offer.is_some(), "first_hotel: parsed response");
        Ok(offer)
    }
}

/// `gaiaId` of the first `Region` entry in the `data` list
pub fn parse_region_id(body: &Value) -> Option<String> {
    body.get("data")?
        .as_array()?
        .iter()
        .find(|item| item.get("__typename").and_then(Value::as_str) == Some(REGION_TYPENAME))
        .and_then(|item| item.get("gaiaId"))
        .filter(|id| !id.is_null())
        .map(display_scalar)
        .filter(|id| !id.is_empty())
}

/// Name and `price.lead.formatted` of the first entry in `listResults.hotels`
pub fn parse_first_hotel(body: &Value) -> Option<HotelOffer> {
    let first = body.get("listResults")?.get("hotels")?.as_array()?.first()?;

    let name = first.get("name").map(display_scalar).unwrap_or_else(|| "unknown".to_string());
    let price = first
        .pointer("/price/lead/formatted")
        .map(display_scalar)
        .unwrap_or_else(|| "unknown".to_string());

    Some(HotelOffer { name, price })
}
