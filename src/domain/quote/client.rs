//! Quotes sub-client: one fetch per call, plus derived views.

use super::{convert, DisplaySeries, QuoteDocument, QuoteRow};
use crate::client::MarketIqClient;
use crate::error::SdkError;
use crate::shared::Ticker;

/// Sub-client for quote operations.
pub struct Quotes<'a> {
    pub(crate) client: &'a MarketIqClient,
}

impl<'a> Quotes<'a> {
    /// Fetch the raw quote document for `ticker`.
    pub async fn get(&self, ticker: &Ticker) -> Result<QuoteDocument, SdkError> {
        Ok(self.client.http.get_quote(ticker).await?)
    }

    /// Fetch and derive the display series. `Ok(None)` means "no series".
    pub async fn series(&self, ticker: &Ticker) -> Result<Option<DisplaySeries>, SdkError> {
        let document = self.get(ticker).await?;
        Ok(convert::display_series(
            Some(&document),
            &self.client.interval.series_key(),
        ))
    }

    /// Fetch and return the raw table rows. `Ok(None)` means "no series".
    pub async fn rows(&self, ticker: &Ticker) -> Result<Option<Vec<QuoteRow>>, SdkError> {
        let document = self.get(ticker).await?;
        Ok(convert::table_rows(
            Some(&document),
            &self.client.interval.series_key(),
        ))
    }
}
