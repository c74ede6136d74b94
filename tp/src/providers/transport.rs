//! JsonTransport - the HTTP seam shared by the aggregator clients

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors raised while talking to an aggregator
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("missing API key: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{status} for url: {url}")]
    Status { status: u16, url: String },

    #[error("invalid JSON in response: {0}")]
    Json(String),
}

/// A single outbound GET request with query parameters and headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl GetRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Performs a GET and decodes the body as JSON
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn get_json(&self, request: GetRequest) -> Result<Value, TransportError>;
}

/// reqwest-backed transport; uses the client's default timeouts
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        debug!("ReqwestTransport::new: called");
        let http = Client::builder()
            .user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Use a preconfigured client (proxies, timeouts, TLS)
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn get_json(&self, request: GetRequest) -> Result<Value, TransportError> {
        debug!(url = %request.url, params = request.query.len(), "ReqwestTransport::get_json: called");
        let mut builder = self.http.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "ReqwestTransport::get_json: HTTP error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        debug!(body_len = body.len(), "ReqwestTransport::get_json: body read");
        serde_json::from_str(&body).map_err(|e| TransportError::Json(e.to_string()))
    }
}
