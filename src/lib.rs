//! # MarketIQ
//!
//! Client SDK for the MarketIQ quote dashboard, for native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: types, domain models, dashboard state (always available, WASM-safe)
//! 2. **Storage**: durable key/value backends and the presentation marker
//! 3. **HTTP API**: `MarketIqHttp`, one request per fetch, no retries
//! 4. **Polling**: repeating quote timer, tokio-backed on native
//! 5. **High-Level Client**: `MarketIqClient` with nested sub-clients, and the
//!    `Dashboard` controller
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketiq::prelude::*;
//!
//! let client = MarketIqClient::builder()
//!     .base_url("http://127.0.0.1:8000")
//!     .build()?;
//!
//! let ticker = Ticker::parse("aapl").unwrap();
//! let series = client.quotes().series(&ticker).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): quotes, theme, dashboard state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Endpoint and timing constants.
pub mod network;

/// Environment configuration.
pub mod config;

/// Chart and table render models.
pub mod render;

// ── Layer 2: Storage ─────────────────────────────────────────────────────────

/// Durable key/value storage and the presentation marker.
pub mod storage;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Low-level HTTP client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Polling ─────────────────────────────────────────────────────────

/// Quote polling: source trait, events, timer.
pub mod poll;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `MarketIqClient`, the primary entry point for fetching.
#[cfg(feature = "http")]
pub mod client;

/// `Dashboard`, the controller tying polling, theme and render state together.
#[cfg(feature = "native")]
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Interval, Ticker};

    // Domain types: quote
    pub use crate::domain::quote::{
        display_series, table_rows, try_display_series, DisplaySeries, QuoteDocument, QuoteRow,
        SeriesError, SeriesPoint,
    };

    // Domain types: theme
    pub use crate::domain::theme::{Palette, SubscriptionId, Theme, ThemeFlag, ThemeMirror};

    // Domain types: dashboard
    pub use crate::domain::dashboard::{DashboardEvent, DashboardState, StalePolicy, TickerInput};

    // Render models
    pub use crate::render::{view, ChartConfig, DashboardView, QuoteTable};

    // Storage
    pub use crate::storage::{KeyValueStore, MemoryStore, PresentationMarker, SharedMarker};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::storage::FileStore;

    // Polling
    pub use crate::poll::{PollConfig, PollEvent, QuoteSource, TimerStats};
    #[cfg(feature = "native")]
    pub use crate::poll::QuotePoller;

    // Errors
    pub use crate::error::{ConfigError, HttpError, SdkError, StorageError};

    // Config + network
    pub use crate::config::DashboardConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{MarketIqClient, MarketIqClientBuilder, QuotesClient};
    #[cfg(feature = "http")]
    pub use crate::http::{MarketIqHttp, QuoteEndpoint};

    // Controller
    #[cfg(feature = "native")]
    pub use crate::dashboard::{Dashboard, DashboardOptions};
}
