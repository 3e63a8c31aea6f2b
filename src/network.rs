//! Endpoint and timing constants for the MarketIQ client.

use std::time::Duration;

/// Default quote proxy base URL (the dashboard's local backend).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Alpha Vantage query endpoint, used when fetching upstream directly.
pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// Default poll interval between quote fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ticker shown when nothing has been entered yet.
pub const DEFAULT_TICKER: &str = "AAPL";
