//! Quote domain: fetched documents, display series, table rows.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::{display_series, table_rows, try_display_series};
pub use wire::QuoteDocument;

/// One point on the price chart: a timestamp label and its closing price.
///
/// `close` is `None` when the record had no usable `"4. close"` value; the
/// point is kept so labels stay aligned with the source entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub close: Option<Decimal>,
}

/// Closing prices ordered oldest to newest. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySeries {
    points: Vec<SeriesPoint>,
}

impl DisplaySeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn closes(&self) -> Vec<Option<Decimal>> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent point with a known close.
    pub fn latest_close(&self) -> Option<&SeriesPoint> {
        self.points.iter().rev().find(|p| p.close.is_some())
    }

    /// Number of points whose close was missing or unparseable.
    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| p.close.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Raw per-timestamp OHLCV row for the table, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub timestamp: String,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub volume: Option<String>,
}

/// Why a document produced no series. Treated as "no data", never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("no quote document")]
    MissingDocument,
    #[error("series key {0:?} not present")]
    MissingKey(String),
    #[error("series under {0:?} is not a mapping")]
    NotAMapping(String),
}
