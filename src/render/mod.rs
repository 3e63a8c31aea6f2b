//! Render models handed to the chart and table widgets.
//!
//! Drawing is not done here: these are the inputs a UI layer consumes.

pub mod chart;
pub mod table;

use crate::domain::dashboard::DashboardState;
use crate::domain::quote::table_rows;

pub use chart::ChartConfig;
pub use table::QuoteTable;

pub const LOADING_MESSAGE: &str = "Loading stock data...";
pub const NO_DATA_MESSAGE: &str = "No data available";

/// What the dashboard body should show for a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    NoData,
    Ready { chart: ChartConfig, table: QuoteTable },
}

impl DashboardView {
    /// Placeholder text, if this view is a placeholder.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::NoData => Some(NO_DATA_MESSAGE),
            Self::Ready { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Derive the view for `state`.
///
/// Data already on screen stays visible while a refresh is loading.
pub fn view(state: &DashboardState) -> DashboardView {
    match (&state.series, &state.quote) {
        (Some(series), Some(quote)) => {
            let rows = table_rows(Some(quote), state.series_key()).unwrap_or_default();
            DashboardView::Ready {
                chart: ChartConfig::line(state.quote_ticker.as_ref(), series, state.theme),
                table: QuoteTable::new(rows),
            }
        }
        _ if state.loading => DashboardView::Loading,
        _ => DashboardView::NoData,
    }
}
