//! Kiwi.com cheap-flights client (RapidAPI)

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::FlightsConfig;
use crate::dates::DateWindow;

use super::transport::{GetRequest, JsonTransport, TransportError};

/// Round-trip search parameters
#[derive(Debug, Clone)]
pub struct FlightQuery<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub window: DateWindow,
    pub adults: u32,
    pub currency: &'a str,
}

/// The first (cheapest) offer returned by the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightOffer {
    pub price: String,
    pub airlines: Vec<String>,
}

/// Flight fare aggregator client
pub struct KiwiClient {
    transport: Arc<dyn JsonTransport>,
    base_url: String,
    host: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl KiwiClient {
    /// Create a client; the API key is read from the configured env var
    pub fn from_config(config: &FlightsConfig, transport: Arc<dyn JsonTransport>) -> Self {
        debug!(base_url = %config.base_url, "KiwiClient::from_config: called");
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key: config.api_key(),
        }
    }

    /// Override the API key (used by tests and embedders)
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Build the round-trip GET request
    pub fn build_request(&self, query: &FlightQuery<'_>) -> Result<GetRequest, TransportError> {
        let api_key = self.api_key.clone().ok_or_else(|| TransportError::MissingApiKey {
            env: self.api_key_env.clone(),
        })?;

        Ok(GetRequest::new(format!("{}/round-trip", self.base_url))
            .query("from", query.origin)
            .query("to", query.destination)
            .query("dateFrom", query.window.from_iso())
            .query("dateTo", query.window.to_iso())
            .query("adults", query.adults.to_string())
            .query("currency", query.currency)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", self.host.clone()))
    }

    /// Search and return the first offer, `None` when the result list is empty
    pub async fn cheapest_round_trip(&self, query: &FlightQuery<'_>) -> Result<Option<FlightOffer>, TransportError> {
        info!(
            origin = %query.origin,
            destination = %query.destination,
            date_from = %query.window.from_iso(),
            "Searching flights"
        );
        let request = self.build_request(query)?;
        let body = self.transport.get_json(request).await?;
        let offer = parse_first_offer(&body);
        debug!(found = offer.is_some(), "cheapest_round_trip: parsed response");
        Ok(offer)
    }
}

/// Extract the first entry of the `data` list
pub fn parse_first_offer(body: &Value) -> Option<FlightOffer> {
    let first = body.get("data")?.as_array()?.first()?;

    let price = first.get("price").map(display_scalar).unwrap_or_else(|| "unknown".to_string());
    let airlines = first
        .get("airlines")
        .and_then(Value::as_array)
        .map(|codes| codes.iter().map(display_scalar).collect())
        .unwrap_or_default();

    Some(FlightOffer { price, airlines })
}

/// Render a JSON scalar without surrounding quotes
pub(crate) fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "unknown".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlightsConfig;
    use crate::providers::transport::mock::MockTransport;
    use chrono::NaiveDate;
    use serde_json::json;

    fn window() -> DateWindow {
        DateWindow::starting(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()).unwrap()
    }

    fn query() -> FlightQuery<'static> {
        FlightQuery {
            origin: "Mumbai",
            destination: "Goa",
            window: window(),
            adults: 2,
            currency: "INR",
        }
    }

    fn client(transport: Arc<MockTransport>) -> KiwiClient {
        KiwiClient::from_config(&FlightsConfig::default(), transport).with_api_key(Some("test-key".to_string()))
    }

    #[test]
    fn test_build_request_parameters() {
        let client = client(Arc::new(MockTransport::new(vec![])));
        let req = client.build_request(&query()).unwrap();

        assert!(req.url.ends_with("/round-trip"));
        assert_eq!(req.query_value("from"), Some("Mumbai"));
        assert_eq!(req.query_value("to"), Some("Goa"));
        assert_eq!(req.query_value("dateFrom"), Some("2025-12-01"));
        assert_eq!(req.query_value("dateTo"), Some("2025-12-02"));
        assert_eq!(req.query_value("adults"), Some("2"));
        assert_eq!(req.query_value("currency"), Some("INR"));
        assert!(req.headers.iter().any(|(k, v)| k == "X-RapidAPI-Key" && v == "test-key"));
        assert!(req.headers.iter().any(|(k, _)| k == "X-RapidAPI-Host"));
    }

    #[test]
    fn test_build_request_without_key() {
        let client = client(Arc::new(MockTransport::new(vec![]))).with_api_key(None);
        let err = client.build_request(&query()).unwrap_err();
        assert!(matches!(err, TransportError::MissingApiKey { ref env } if env == "FLIGHT_API_KEY"));
    }

    #[test]
    fn test_parse_first_offer() {
        let body = json!({
            "data": [
                {"price": 5234, "airlines": ["6E", "AI"]},
                {"price": 9000, "airlines": ["UK"]}
            ]
        });
        let offer = parse_first_offer(&body).unwrap();
        assert_eq!(offer.price, "5234");
        assert_eq!(offer.airlines, vec!["6E".to_string(), "AI".to_string()]);
    }

    #[test]
    fn test_parse_empty_or_missing_data() {
        assert!(parse_first_offer(&json!({"data": []})).is_none());
        assert!(parse_first_offer(&json!({})).is_none());
        assert!(parse_first_offer(&json!({"data": null})).is_none());
    }

    #[test]
    fn test_parse_offer_with_missing_fields() {
        let offer = parse_first_offer(&json!({"data": [{}]})).unwrap();
        assert_eq!(offer.price, "unknown");
        assert!(offer.airlines.is_empty());
    }

    #[tokio::test]
    async fn test_cheapest_round_trip_sends_one_request() {
        let transport = Arc::new(MockTransport::with_json(vec![json!({"data": [{"price": 4100.5, "airlines": ["SG"]}]})]));
        let client = client(transport.clone());

        let offer = client.cheapest_round_trip(&query()).await.unwrap().unwrap();
        assert_eq!(offer.price, "4100.5");
        assert_eq!(transport.call_count(), 1);
    }
}
