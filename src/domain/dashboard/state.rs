//! Dashboard state snapshot. The app owns it, the SDK provides update logic.

use super::{DashboardEvent, StalePolicy};
use crate::domain::quote::{display_series, DisplaySeries, QuoteDocument};
use crate::domain::theme::Theme;
use crate::shared::{Interval, Ticker};

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything a render needs, as of one point in time.
///
/// Snapshots are never mutated in place: [`DashboardState::apply`] returns
/// the next one. Quote documents and series are shared, not copied.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub ticker: Option<Ticker>,
    /// True while the most recently started fetch has not resolved.
    pub loading: bool,
    pub quote: Option<Arc<QuoteDocument>>,
    /// Ticker the displayed quote was fetched for.
    pub quote_ticker: Option<Ticker>,
    pub series: Option<Arc<DisplaySeries>>,
    pub theme: Theme,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Sequence number of the last fetch whose result was applied.
    pub applied_seq: u64,
    started_seq: u64,
    series_key: String,
}

impl DashboardState {
    pub fn new(ticker: Option<Ticker>, theme: Theme, interval: Interval) -> Self {
        Self {
            ticker,
            loading: false,
            quote: None,
            quote_ticker: None,
            series: None,
            theme,
            last_error: None,
            last_updated: None,
            applied_seq: 0,
            started_seq: 0,
            series_key: interval.series_key(),
        }
    }

    pub fn series_key(&self) -> &str {
        &self.series_key
    }

    /// Whether a quote is available to show.
    pub fn has_data(&self) -> bool {
        self.series.is_some()
    }

    /// Produce the snapshot that follows `event`.
    ///
    /// `loading` is cleared only when the latest started fetch resolves,
    /// whether or not its result is applied, or when the ticker changes.
    pub fn apply(&self, event: DashboardEvent, policy: StalePolicy) -> DashboardState {
        let mut next = self.clone();
        match event {
            DashboardEvent::TickerChanged(ticker) => {
                if ticker != self.ticker {
                    next.loading = false;
                }
                next.ticker = ticker;
            }
            DashboardEvent::FetchStarted { seq, ticker } => {
                if self.is_stale(seq, &ticker, policy) {
                    return next;
                }
                next.started_seq = next.started_seq.max(seq);
                next.loading = true;
            }
            DashboardEvent::FetchSucceeded {
                seq,
                ticker,
                document,
                received_at,
            } => {
                next.settle(seq);
                if self.is_stale(seq, &ticker, policy) {
                    tracing::debug!(seq, %ticker, applied = self.applied_seq, "Discarding stale quote");
                    return next;
                }
                next.series = display_series(Some(&document), &self.series_key).map(Arc::new);
                next.quote = Some(document);
                next.quote_ticker = Some(ticker);
                next.last_error = None;
                next.last_updated = Some(received_at);
                next.applied_seq = next.applied_seq.max(seq);
            }
            DashboardEvent::FetchFailed { seq, ticker, error } => {
                next.settle(seq);
                if self.is_stale(seq, &ticker, policy) {
                    tracing::debug!(seq, %ticker, applied = self.applied_seq, "Discarding stale failure");
                    return next;
                }
                // No staleness: a failed poll clears the display.
                next.quote = None;
                next.quote_ticker = None;
                next.series = None;
                next.last_error = Some(error);
                next.applied_seq = next.applied_seq.max(seq);
            }
            DashboardEvent::ThemeToggled(theme) => {
                next.theme = theme;
            }
        }
        next
    }

    fn settle(&mut self, seq: u64) {
        if seq >= self.started_seq {
            self.loading = false;
        }
    }

    fn is_stale(&self, seq: u64, ticker: &Ticker, policy: StalePolicy) -> bool {
        match policy {
            StalePolicy::LastResolvedWins => false,
            StalePolicy::DiscardStale => {
                seq < self.applied_seq || self.ticker.as_ref() != Some(ticker)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aapl() -> Ticker {
        Ticker::parse("AAPL").unwrap()
    }

    fn msft() -> Ticker {
        Ticker::parse("MSFT").unwrap()
    }

    fn document(close: &str) -> Arc<QuoteDocument> {
        Arc::new(
            QuoteDocument::from_value(json!({
                "Time Series (5min)": {
                    "2024-01-01 09:30:00": {"4. close": close},
                    "2024-01-01 09:25:00": {"4. close": "149.5"}
                }
            }))
            .unwrap(),
        )
    }

    fn succeeded(seq: u64, ticker: Ticker, close: &str) -> DashboardEvent {
        DashboardEvent::FetchSucceeded {
            seq,
            ticker,
            document: document(close),
            received_at: Utc::now(),
        }
    }

    fn failed(seq: u64, ticker: Ticker) -> DashboardEvent {
        DashboardEvent::FetchFailed {
            seq,
            ticker,
            error: "HTTP 500".to_string(),
        }
    }

    fn latest(state: &DashboardState) -> String {
        state
            .series
            .as_ref()
            .and_then(|s| s.latest_close())
            .and_then(|p| p.close)
            .map(|c| c.to_string())
            .unwrap_or_default()
    }

    fn loaded() -> DashboardState {
        let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5);
        state
            .apply(DashboardEvent::FetchStarted { seq: 1, ticker: aapl() }, StalePolicy::default())
            .apply(succeeded(1, aapl(), "150.0"), StalePolicy::default())
    }

    #[test]
    fn test_fetch_lifecycle() {
        let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5);
        let started = state.apply(
            DashboardEvent::FetchStarted { seq: 1, ticker: aapl() },
            StalePolicy::default(),
        );
        assert!(started.loading);
        assert!(!started.has_data());

        let done = started.apply(succeeded(1, aapl(), "150.0"), StalePolicy::default());
        assert!(!done.loading);
        assert_eq!(done.series.as_ref().unwrap().len(), 2);
        assert_eq!(latest(&done), "150.0");
        assert!(done.last_updated.is_some());
        assert_eq!(done.applied_seq, 1);
        // The previous snapshot is untouched.
        assert!(started.quote.is_none());
    }

    #[test]
    fn test_fetch_failed_clears_display() {
        let state = loaded();
        let next = state.apply(failed(2, aapl()), StalePolicy::default());
        assert!(next.quote.is_none());
        assert!(next.series.is_none());
        assert_eq!(next.last_error.as_deref(), Some("HTTP 500"));
        assert!(!next.loading);
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let state = loaded().apply(failed(2, aapl()), StalePolicy::default());
        let next = state.apply(succeeded(3, aapl(), "151.0"), StalePolicy::default());
        assert!(next.last_error.is_none());
        assert_eq!(latest(&next), "151.0");
    }

    #[test]
    fn test_blank_ticker_leaves_display_untouched() {
        let state = loaded();
        let next = state.apply(DashboardEvent::TickerChanged(None), StalePolicy::default());
        assert!(next.ticker.is_none());
        assert_eq!(next.quote, state.quote);
        assert_eq!(next.series, state.series);
        assert_eq!(next.loading, state.loading);
    }

    #[test]
    fn test_malformed_document_is_no_series() {
        let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5);
        let doc = Arc::new(QuoteDocument::from_value(json!({"Note": "rate limited"})).unwrap());
        let next = state.apply(
            DashboardEvent::FetchSucceeded {
                seq: 1,
                ticker: aapl(),
                document: doc,
                received_at: Utc::now(),
            },
            StalePolicy::default(),
        );
        assert!(next.quote.is_some());
        assert!(!next.has_data());
    }

    #[test]
    fn test_theme_toggled() {
        let next = loaded().apply(DashboardEvent::ThemeToggled(Theme::Dark), StalePolicy::default());
        assert_eq!(next.theme, Theme::Dark);
        assert!(next.has_data());
    }

    #[test]
    fn test_last_resolved_wins_applies_out_of_order_result() {
        let state = loaded().apply(succeeded(3, aapl(), "152.0"), StalePolicy::LastResolvedWins);
        let next = state.apply(succeeded(2, aapl(), "151.0"), StalePolicy::LastResolvedWins);
        assert_eq!(latest(&next), "151.0");
        assert_eq!(next.applied_seq, 3);
    }

    #[test]
    fn test_last_resolved_wins_applies_previous_ticker_result() {
        let state = loaded().apply(DashboardEvent::TickerChanged(Some(msft())), StalePolicy::LastResolvedWins);
        let next = state.apply(succeeded(2, aapl(), "151.0"), StalePolicy::LastResolvedWins);
        assert_eq!(latest(&next), "151.0");
    }

    #[test]
    fn test_discard_stale_drops_older_sequence() {
        let state = loaded().apply(succeeded(3, aapl(), "152.0"), StalePolicy::DiscardStale);
        let next = state.apply(succeeded(2, aapl(), "151.0"), StalePolicy::DiscardStale);
        assert_eq!(latest(&next), "152.0");

        let next = state.apply(failed(2, aapl()), StalePolicy::DiscardStale);
        assert!(next.has_data());
        assert!(next.last_error.is_none());
    }

    #[test]
    fn test_overlapping_fetches_stay_loading_until_latest_resolves() {
        for policy in [StalePolicy::LastResolvedWins, StalePolicy::DiscardStale] {
            let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5)
                .apply(DashboardEvent::FetchStarted { seq: 1, ticker: aapl() }, policy)
                .apply(DashboardEvent::FetchStarted { seq: 2, ticker: aapl() }, policy);

            let first = state.apply(succeeded(1, aapl(), "150.0"), policy);
            assert!(first.loading);

            let second = first.apply(succeeded(2, aapl(), "151.0"), policy);
            assert!(!second.loading);
            assert_eq!(latest(&second), "151.0");
        }
    }

    #[test]
    fn test_latest_resolving_first_clears_loading() {
        let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5)
            .apply(DashboardEvent::FetchStarted { seq: 1, ticker: aapl() }, StalePolicy::DiscardStale)
            .apply(DashboardEvent::FetchStarted { seq: 2, ticker: aapl() }, StalePolicy::DiscardStale)
            .apply(failed(2, aapl()), StalePolicy::DiscardStale);
        assert!(!state.loading);

        let next = state.apply(succeeded(1, aapl(), "150.0"), StalePolicy::DiscardStale);
        assert!(!next.loading);
        assert!(!next.has_data());
    }

    #[test]
    fn test_blank_ticker_during_fetch_clears_loading() {
        for policy in [StalePolicy::LastResolvedWins, StalePolicy::DiscardStale] {
            let state = DashboardState::new(Some(aapl()), Theme::Light, Interval::Minute5)
                .apply(DashboardEvent::FetchStarted { seq: 1, ticker: aapl() }, policy)
                .apply(DashboardEvent::TickerChanged(None), policy);
            assert!(!state.loading);

            let next = state.apply(succeeded(1, aapl(), "150.0"), policy);
            assert!(!next.loading);
            assert_ne!(crate::render::view(&next), crate::render::DashboardView::Loading);
        }
    }

    #[test]
    fn test_blank_ticker_keeps_quote_ticker() {
        let state = loaded().apply(DashboardEvent::TickerChanged(None), StalePolicy::default());
        assert_eq!(state.quote_ticker, Some(aapl()));

        let next = loaded()
            .apply(DashboardEvent::TickerChanged(Some(msft())), StalePolicy::default())
            .apply(succeeded(2, msft(), "410.0"), StalePolicy::default());
        assert_eq!(next.quote_ticker, Some(msft()));
    }

    #[test]
    fn test_discard_stale_drops_previous_ticker() {
        let state = loaded().apply(DashboardEvent::TickerChanged(Some(msft())), StalePolicy::DiscardStale);
        let next = state.apply(succeeded(2, aapl(), "151.0"), StalePolicy::DiscardStale);
        assert_eq!(latest(&next), "150.0");

        let next = state.apply(succeeded(3, msft(), "410.0"), StalePolicy::DiscardStale);
        assert_eq!(latest(&next), "410.0");
    }
}
