//! Low-level HTTP client, `MarketIqHttp`.
//!
//! One method per endpoint. Returns wire types; conversion to display types
//! happens in the quote domain. A failed request is reported once and never
//! retried: the poller's next tick is the only retry path.

use crate::domain::quote::QuoteDocument;
use crate::error::HttpError;
use crate::shared::{Interval, Ticker};

use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Where quote documents come from.
#[derive(Clone)]
pub enum QuoteEndpoint {
    /// The dashboard backend: `GET {base_url}/stock/{TICKER}`.
    Proxy { base_url: String },
    /// Alpha Vantage `TIME_SERIES_INTRADAY`, queried directly.
    AlphaVantage {
        base_url: String,
        api_key: String,
        interval: Interval,
    },
}

impl QuoteEndpoint {
    pub fn proxy(base_url: &str) -> Self {
        Self::Proxy {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn alpha_vantage(api_key: &str, interval: Interval) -> Self {
        Self::AlphaVantage {
            base_url: crate::network::ALPHA_VANTAGE_URL.to_string(),
            api_key: api_key.to_string(),
            interval,
        }
    }

    /// Full request URL for a ticker.
    pub fn quote_url(&self, ticker: &Ticker) -> String {
        match self {
            Self::Proxy { base_url } => format!(
                "{}/stock/{}",
                base_url,
                urlencoding::encode(ticker.as_str())
            ),
            Self::AlphaVantage {
                base_url,
                api_key,
                interval,
            } => format!(
                "{}?function=TIME_SERIES_INTRADAY&symbol={}&interval={}&apikey={}",
                base_url,
                urlencoding::encode(ticker.as_str()),
                interval.as_str(),
                urlencoding::encode(api_key)
            ),
        }
    }
}

impl std::fmt::Debug for QuoteEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proxy { base_url } => f.debug_struct("Proxy").field("base_url", base_url).finish(),
            Self::AlphaVantage {
                base_url, interval, ..
            } => f
                .debug_struct("AlphaVantage")
                .field("base_url", base_url)
                .field("api_key", &"[REDACTED]")
                .field("interval", interval)
                .finish(),
        }
    }
}

/// Low-level HTTP client for quote endpoints.
#[derive(Clone)]
pub struct MarketIqHttp {
    endpoint: QuoteEndpoint,
    client: Client,
}

impl MarketIqHttp {
    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    pub fn new(endpoint: QuoteEndpoint, timeout: Option<std::time::Duration>) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(timeout.unwrap_or(crate::network::DEFAULT_REQUEST_TIMEOUT))
                .connect_timeout(Duration::from_secs(10))
                .pool_max_idle_per_host(2);
        }

        Ok(Self {
            endpoint,
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &QuoteEndpoint {
        &self.endpoint
    }

    // ── Quotes ───────────────────────────────────────────────────────────

    /// Fetch the time-series document for `ticker`.
    pub async fn get_quote(&self, ticker: &Ticker) -> Result<QuoteDocument, HttpError> {
        let url = self.endpoint.quote_url(ticker);
        tracing::debug!(ticker = %ticker, "GET quote");
        let document = self.get_document(&url).await?;
        if let Some(message) = document.upstream_message() {
            tracing::warn!(ticker = %ticker, "Upstream message: {}", message);
        }
        Ok(document)
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get_document(&self, url: &str) -> Result<QuoteDocument, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body_text = resp.text().await?;

        if status.is_success() {
            let value: Value = serde_json::from_str(&body_text)
                .map_err(|e| HttpError::Decode(e.to_string()))?;
            return QuoteDocument::from_value(value)
                .ok_or_else(|| HttpError::Decode("expected a JSON object".to_string()));
        }

        match status.as_u16() {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            status_code => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
