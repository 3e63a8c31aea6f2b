//! High-level client: `MarketIqClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::domain::quote::client::Quotes;
use crate::error::SdkError;
use crate::http::{MarketIqHttp, QuoteEndpoint};
use crate::shared::Interval;

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::quote::client::Quotes as QuotesClient;

/// The primary entry point for fetching quotes.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct MarketIqClient {
    pub(crate) http: MarketIqHttp,
    pub(crate) interval: Interval,
}

impl MarketIqClient {
    pub fn builder() -> MarketIqClientBuilder {
        MarketIqClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn quotes(&self) -> Quotes<'_> {
        Quotes { client: self }
    }

    /// Interval whose series key the documents are read with.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn endpoint(&self) -> &QuoteEndpoint {
        self.http.endpoint()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketIqClientBuilder {
    base_url: String,
    api_key: Option<String>,
    interval: Interval,
    timeout: Option<Duration>,
}

impl Default for MarketIqClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            api_key: None,
            interval: Interval::default(),
            timeout: None,
        }
    }
}

impl MarketIqClientBuilder {
    /// Base URL of the dashboard backend.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Query Alpha Vantage directly with this key instead of the backend.
    pub fn alpha_vantage_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<MarketIqClient, SdkError> {
        let endpoint = match self.api_key {
            Some(key) if !key.trim().is_empty() => {
                QuoteEndpoint::alpha_vantage(key.trim(), self.interval)
            }
            _ => QuoteEndpoint::proxy(&self.base_url),
        };
        Ok(MarketIqClient {
            http: MarketIqHttp::new(endpoint, self.timeout)?,
            interval: self.interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_local_proxy() {
        let client = MarketIqClient::builder().build().unwrap();
        match client.endpoint() {
            QuoteEndpoint::Proxy { base_url } => assert_eq!(base_url, "http://127.0.0.1:8000"),
            other => panic!("unexpected endpoint: {other:?}"),
        }
        assert_eq!(client.interval(), Interval::Minute5);
    }

    #[test]
    fn test_builder_with_key_targets_alpha_vantage() {
        let client = MarketIqClient::builder()
            .alpha_vantage_key("abc")
            .interval(Interval::Minute1)
            .build()
            .unwrap();
        assert!(matches!(
            client.endpoint(),
            QuoteEndpoint::AlphaVantage { interval: Interval::Minute1, .. }
        ));
    }

    #[test]
    fn test_builder_ignores_blank_key() {
        let client = MarketIqClient::builder().alpha_vantage_key("  ").build().unwrap();
        assert!(matches!(client.endpoint(), QuoteEndpoint::Proxy { .. }));
    }
}
