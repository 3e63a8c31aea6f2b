//! Conversion: QuoteDocument → DisplaySeries / table rows.
//!
//! Missing-close policy: a record without a parseable `"4. close"` is kept
//! with `close: None`. It is never coerced to zero and never aborts the
//! transformation.

use super::wire::{QuoteDocument, WireOhlcv};
use super::{DisplaySeries, QuoteRow, SeriesError, SeriesPoint};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

fn series_map<'a>(
    document: Option<&'a QuoteDocument>,
    series_key: &str,
) -> Result<&'a Map<String, Value>, SeriesError> {
    let document = document.ok_or(SeriesError::MissingDocument)?;
    let value = document
        .get(series_key)
        .ok_or_else(|| SeriesError::MissingKey(series_key.to_string()))?;
    value
        .as_object()
        .ok_or_else(|| SeriesError::NotAMapping(series_key.to_string()))
}

/// Derive the chronologically ascending display series, with diagnostics.
pub fn try_display_series(
    document: Option<&QuoteDocument>,
    series_key: &str,
) -> Result<DisplaySeries, SeriesError> {
    let series = series_map(document, series_key)?;

    let mut points: Vec<SeriesPoint> = series
        .iter()
        .map(|(timestamp, record)| {
            let close = WireOhlcv::from_value(record)
                .close
                .and_then(|raw| Decimal::from_str(raw.trim()).ok());
            SeriesPoint {
                label: timestamp.clone(),
                close,
            }
        })
        .collect();

    // Document order is newest first.
    points.reverse();

    let series = DisplaySeries::new(points);
    let missing = series.missing_count();
    if missing > 0 {
        tracing::debug!(missing, total = series.len(), "Records without a usable close");
    }
    Ok(series)
}

/// Derive the display series, or `None` ("no series") for any malformed input.
pub fn display_series(document: Option<&QuoteDocument>, series_key: &str) -> Option<DisplaySeries> {
    match try_display_series(document, series_key) {
        Ok(series) => Some(series),
        Err(e) => {
            tracing::debug!("No display series: {}", e);
            None
        }
    }
}

/// Raw OHLCV rows in document order, or `None` when there is no series.
pub fn table_rows(document: Option<&QuoteDocument>, series_key: &str) -> Option<Vec<QuoteRow>> {
    let series = series_map(document, series_key).ok()?;
    Some(
        series
            .iter()
            .map(|(timestamp, record)| {
                let wire = WireOhlcv::from_value(record);
                QuoteRow {
                    timestamp: timestamp.clone(),
                    open: wire.open,
                    high: wire.high,
                    low: wire.low,
                    close: wire.close,
                    volume: wire.volume,
                }
            })
            .collect(),
    )
}
