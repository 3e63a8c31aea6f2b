//! Dashboard domain: ticker input, transition events, render-ready state.

pub mod state;

use crate::domain::quote::QuoteDocument;
use crate::domain::theme::Theme;
use crate::poll::PollEvent;
use crate::shared::Ticker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub use state::DashboardState;

// ─── TickerInput ─────────────────────────────────────────────────────────────

/// The text field the user types a symbol into.
///
/// The draft is upper-cased on every edit. Confirming replaces the active
/// ticker wholesale; a blank draft confirms to "no ticker".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerInput {
    draft: String,
    confirmed: Option<Ticker>,
}

impl TickerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `ticker` both drafted and confirmed.
    pub fn with_ticker(ticker: Ticker) -> Self {
        Self {
            draft: ticker.as_str().to_string(),
            confirmed: Some(ticker),
        }
    }

    pub fn edit(&mut self, text: &str) {
        self.draft = text.to_uppercase();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn confirm(&mut self) -> Option<Ticker> {
        self.confirmed = Ticker::parse(&self.draft);
        self.confirmed.clone()
    }

    pub fn confirmed(&self) -> Option<&Ticker> {
        self.confirmed.as_ref()
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Discrete transitions applied to a [`DashboardState`].
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// `None` is a blank entry: no fetches until a real ticker arrives.
    TickerChanged(Option<Ticker>),
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
    ThemeToggled(Theme),
}

impl From<PollEvent> for DashboardEvent {
    fn from(event: PollEvent) -> Self {
        match event {
            PollEvent::FetchStarted { seq, ticker } => Self::FetchStarted { seq, ticker },
            PollEvent::FetchSucceeded {
                seq,
                ticker,
                document,
                received_at,
            } => Self::FetchSucceeded {
                seq,
                ticker,
                document,
                received_at,
            },
            PollEvent::FetchFailed { seq, ticker, error } => Self::FetchFailed { seq, ticker, error },
        }
    }
}

// ─── StalePolicy ─────────────────────────────────────────────────────────────

/// What to do with a fetch that resolves after a newer one was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Apply every resolution in arrival order.
    #[default]
    LastResolvedWins,
    /// Drop resolutions older than the last applied one, or for a ticker
    /// that is no longer current.
    DiscardStale,
}

impl StalePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastResolvedWins => "last-resolved-wins",
            Self::DiscardStale => "discard-stale",
        }
    }
}

impl std::fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-resolved-wins" => Ok(Self::LastResolvedWins),
            "discard-stale" => Ok(Self::DiscardStale),
            other => Err(format!("unknown stale policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_uppercases_draft() {
        let mut input = TickerInput::new();
        input.edit("msft");
        assert_eq!(input.draft(), "MSFT");
        assert!(input.confirmed().is_none());
    }

    #[test]
    fn test_confirm_replaces_ticker() {
        let mut input = TickerInput::with_ticker(Ticker::parse("AAPL").unwrap());
        input.edit(" tsla ");
        assert_eq!(input.confirm().unwrap().as_str(), "TSLA");
        assert_eq!(input.confirmed().unwrap().as_str(), "TSLA");
    }

    #[test]
    fn test_blank_confirm_is_no_ticker() {
        let mut input = TickerInput::with_ticker(Ticker::parse("AAPL").unwrap());
        input.edit("   ");
        assert!(input.confirm().is_none());
        assert!(input.confirmed().is_none());
    }

    #[test]
    fn test_stale_policy_parse() {
        assert_eq!("discard-stale".parse::<StalePolicy>().unwrap(), StalePolicy::DiscardStale);
        assert_eq!(
            "Last-Resolved-Wins".parse::<StalePolicy>().unwrap(),
            StalePolicy::LastResolvedWins
        );
        assert!("newest".parse::<StalePolicy>().is_err());
        assert_eq!(StalePolicy::default().to_string(), "last-resolved-wins");
    }
}
