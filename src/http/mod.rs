//! HTTP client layer: `MarketIqHttp`, one request per call, no retries.

pub mod client;

pub use client::{MarketIqHttp, QuoteEndpoint};
