//! Quote polling: one repeating timer per ticker, one fetch per tick.
//!
//! The timer and fetch tasks are runtime-specific:
//! - `native` feature → tokio (native.rs)
//!
//! This module defines the shared source trait, config, and event types.

#[cfg(feature = "native")]
pub mod native;

use crate::domain::quote::QuoteDocument;
use crate::error::HttpError;
use crate::shared::Ticker;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "native")]
pub use native::QuotePoller;

// ─── QuoteSource ─────────────────────────────────────────────────────────────

/// Anything that can fetch one quote document for a ticker.
///
/// One call is one request: implementations must not retry.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait QuoteSource {
    async fn fetch(&self, ticker: &Ticker) -> Result<QuoteDocument, HttpError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: QuoteSource + Send + Sync + ?Sized> QuoteSource for Arc<T> {
    async fn fetch(&self, ticker: &Ticker) -> Result<QuoteDocument, HttpError> {
        (**self).fetch(ticker).await
    }
}

#[cfg(feature = "http")]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl QuoteSource for crate::http::MarketIqHttp {
    async fn fetch(&self, ticker: &Ticker) -> Result<QuoteDocument, HttpError> {
        self.get_quote(ticker).await
    }
}

#[cfg(feature = "http")]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl QuoteSource for crate::client::MarketIqClient {
    async fn fetch(&self, ticker: &Ticker) -> Result<QuoteDocument, HttpError> {
        self.http.get_quote(ticker).await
    }
}

// ─── PollConfig ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Period of the repeating timer. The first tick fires one period after arming.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: crate::network::DEFAULT_POLL_INTERVAL,
        }
    }
}

// ─── PollEvent ───────────────────────────────────────────────────────────────

/// Lifecycle of one fetch. `seq` increases with every fetch issued.
#[derive(Debug, Clone)]
pub enum PollEvent {
    FetchStarted {
        seq: u64,
        ticker: Ticker,
    },
    FetchSucceeded {
        seq: u64,
        ticker: Ticker,
        document: Arc<QuoteDocument>,
        received_at: DateTime<Utc>,
    },
    FetchFailed {
        seq: u64,
        ticker: Ticker,
        error: String,
    },
}

impl PollEvent {
    pub fn seq(&self) -> u64 {
        match self {
            Self::FetchStarted { seq, .. }
            | Self::FetchSucceeded { seq, .. }
            | Self::FetchFailed { seq, .. } => *seq,
        }
    }

    pub fn ticker(&self) -> &Ticker {
        match self {
            Self::FetchStarted { ticker, .. }
            | Self::FetchSucceeded { ticker, .. }
            | Self::FetchFailed { ticker, .. } => ticker,
        }
    }

    /// Whether this event resolves a fetch (success or failure).
    pub fn is_resolution(&self) -> bool {
        !matches!(self, Self::FetchStarted { .. })
    }
}

// ─── TimerStats ──────────────────────────────────────────────────────────────

/// Lifetime timer accounting for a poller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub armed: u64,
    pub cancelled: u64,
}

impl TimerStats {
    /// Timers armed and not yet cancelled. Never more than one.
    pub fn active(&self) -> u64 {
        self.armed.saturating_sub(self.cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_stats_active() {
        let stats = TimerStats { armed: 3, cancelled: 2 };
        assert_eq!(stats.active(), 1);
        assert_eq!(TimerStats::default().active(), 0);
    }

    #[test]
    fn test_poll_event_accessors() {
        let ticker = Ticker::parse("aapl").unwrap();
        let started = PollEvent::FetchStarted { seq: 4, ticker: ticker.clone() };
        assert_eq!(started.seq(), 4);
        assert!(!started.is_resolution());

        let failed = PollEvent::FetchFailed {
            seq: 4,
            ticker,
            error: "boom".into(),
        };
        assert_eq!(failed.ticker().as_str(), "AAPL");
        assert!(failed.is_resolution());
    }

    #[test]
    fn test_default_interval_is_ten_seconds() {
        assert_eq!(PollConfig::default().interval, Duration::from_secs(10));
    }
}
