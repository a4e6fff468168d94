//! Backend Proxy Client
//!
//! HTTP client for the read-only analytics endpoints. Every call result is
//! normalized at the boundary: success deserializes the payload, an HTTP
//! failure routes the error body through [`normalize`], and a transport
//! failure becomes a `Network` error with the status sentinel. Callers only
//! ever see a uniform success/failure shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto::{AnalyticsBody, ChannelListBody, DateRangeBody, SummaryBody};
use super::error::{normalize, NormalizedError};
use crate::model::{ChannelDetail, ChannelSummary, Severity};
use crate::validate::AllowedDateRange;

/// Configuration for the proxy client
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the dashboard proxy (e.g. "http://127.0.0.1:8006")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8006".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Which channels a query asks for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChannelSelector {
    /// All channels (grid listing)
    #[default]
    All,
    /// A single channel by numeric id
    One(String),
}

impl std::fmt::Display for ChannelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelSelector::All => write!(f, "all"),
            ChannelSelector::One(id) => write!(f, "{}", id),
        }
    }
}

/// Validated query parameters shared by the analytics endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Start date, `YYYY-MM-DD`
    pub start: String,
    /// End date, `YYYY-MM-DD`
    pub end: String,
    pub severity: Severity,
    pub channel: ChannelSelector,
}

impl EventQuery {
    /// Query pairs for the summary/analytics/channel-list endpoints
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.clone()),
            ("end", self.end.clone()),
            ("severity", self.severity.to_string()),
            ("channel_id", self.channel.to_string()),
        ]
    }

    /// Query pairs for the single-channel detail endpoint. No channel_id:
    /// the id lives in the path.
    pub fn detail_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.clone()),
            ("end", self.end.clone()),
            ("severity", self.severity.to_string()),
        ]
    }
}

/// The backend the dashboard controller talks to.
///
/// The proxy endpoints are opaque external collaborators; this seam keeps
/// the controller testable against a stub.
#[async_trait]
pub trait EventBackend: Send + Sync {
    /// Server-declared allowed date range
    async fn date_range(&self) -> Result<AllowedDateRange, NormalizedError>;

    /// Event counts for the period
    async fn events_summary(&self, query: &EventQuery) -> Result<SummaryBody, NormalizedError>;

    /// Type distribution and hourly histogram for the period
    async fn events_analytics(&self, query: &EventQuery)
        -> Result<AnalyticsBody, NormalizedError>;

    /// Channel grid listing (single-channel selections are re-wrapped into a
    /// one-item list)
    async fn channels(&self, query: &EventQuery) -> Result<Vec<ChannelSummary>, NormalizedError>;

    /// Full detail for one channel
    async fn channel_detail(
        &self,
        channel_id: &str,
        query: &EventQuery,
    ) -> Result<ChannelDetail, NormalizedError>;
}

/// Reqwest-backed [`EventBackend`] implementation
pub struct ProxyClient {
    client: Client,
    config: ProxyConfig,
}

impl ProxyClient {
    /// Create a new proxy client with the given configuration
    pub fn new(config: ProxyConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Perform one GET and normalize the outcome
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, NormalizedError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "calling backend proxy");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| NormalizedError::network(path, e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .unwrap_or(Value::Null);

        if status.is_success() {
            serde_json::from_value(body)
                .map_err(|e| NormalizedError::unexpected(path, e.to_string()))
        } else {
            Err(normalize(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl EventBackend for ProxyClient {
    async fn date_range(&self) -> Result<AllowedDateRange, NormalizedError> {
        let body: DateRangeBody = self.get_json("/api/date-range", &[]).await?;
        AllowedDateRange::parse(&body.start, &body.end)
            .map_err(|e| NormalizedError::unexpected("/api/date-range", e.to_string()))
    }

    async fn events_summary(&self, query: &EventQuery) -> Result<SummaryBody, NormalizedError> {
        self.get_json("/api/proxy/events/summary", &query.params())
            .await
    }

    async fn events_analytics(
        &self,
        query: &EventQuery,
    ) -> Result<AnalyticsBody, NormalizedError> {
        self.get_json("/api/proxy/events/analytics", &query.params())
            .await
    }

    async fn channels(&self, query: &EventQuery) -> Result<Vec<ChannelSummary>, NormalizedError> {
        // Filtered to one channel, the endpoint returns a bare channel
        // object instead of an items list.
        match &query.channel {
            ChannelSelector::All => {
                let body: ChannelListBody =
                    self.get_json("/api/proxy/channels", &query.params()).await?;
                Ok(body.items)
            }
            ChannelSelector::One(_) => {
                let single: ChannelSummary =
                    self.get_json("/api/proxy/channels", &query.params()).await?;
                Ok(vec![single])
            }
        }
    }

    async fn channel_detail(
        &self,
        channel_id: &str,
        query: &EventQuery,
    ) -> Result<ChannelDetail, NormalizedError> {
        let path = format!("/api/proxy/channels/{}", channel_id);
        self.get_json(&path, &query.detail_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8006");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_query_params() {
        let query = EventQuery {
            start: "2025-08-01".to_string(),
            end: "2025-08-15".to_string(),
            severity: Severity::Critical,
            channel: ChannelSelector::All,
        };

        let params = query.params();
        assert!(params.contains(&("start", "2025-08-01".to_string())));
        assert!(params.contains(&("severity", "critical".to_string())));
        assert!(params.contains(&("channel_id", "all".to_string())));
    }

    #[test]
    fn test_detail_params_omit_channel() {
        let query = EventQuery {
            start: "2025-08-01".to_string(),
            end: "2025-08-15".to_string(),
            severity: Severity::All,
            channel: ChannelSelector::One("7".to_string()),
        };

        let params = query.detail_params();
        assert_eq!(params.len(), 3);
        assert!(params.iter().all(|(k, _)| *k != "channel_id"));
    }

    #[test]
    fn test_channel_selector_display() {
        assert_eq!(ChannelSelector::All.to_string(), "all");
        assert_eq!(ChannelSelector::One("7".to_string()).to_string(), "7");
    }
}
