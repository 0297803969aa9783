//! Overpass API HTTP client.
//!
//! Provides an async method for fetching fuel amenities around a point.
//! One outbound request per call; no retries and no caching.

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::debug;

use crate::domain::SearchArea;

use super::StationSource;
use super::error::OverpassError;
use super::query::build_query;
use super::types::{OverpassResponse, RawElement};

/// Default Overpass interpreter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default HTTP timeout for the outbound call, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default server-side query timeout, in seconds.
const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// `[timeout:N]` setting sent with each query
    pub query_timeout_secs: u32,
}

impl OverpassConfig {
    /// Create a new config pointing at the public Overpass instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    /// Set a custom interpreter URL (for testing or a private instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the server-side query timeout.
    pub fn with_query_timeout(mut self, secs: u32) -> Self {
        self.query_timeout_secs = secs;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Overpass API client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
    query_timeout_secs: u32,
}

impl OverpassClient {
    /// Create a new Overpass client with the given configuration.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fuel-server/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            query_timeout_secs: config.query_timeout_secs,
        })
    }

    /// Fetch fuel amenities within `area`.
    ///
    /// Elements are returned in the order Overpass sent them.
    pub async fn fetch(&self, area: &SearchArea) -> Result<Vec<RawElement>, OverpassError> {
        let query = build_query(area, self.query_timeout_secs);
        debug!(
            lat = area.center.lat,
            lon = area.center.lon,
            radius_m = area.radius_m,
            "querying Overpass"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        debug!(count = parsed.elements.len(), "Overpass returned elements");
        Ok(parsed.elements)
    }
}

impl StationSource for OverpassClient {
    fn fetch_elements<'a>(
        &'a self,
        area: &'a SearchArea,
    ) -> BoxFuture<'a, Result<Vec<RawElement>, OverpassError>> {
        self.fetch(area).boxed()
    }
}
