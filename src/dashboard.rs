//! `Dashboard` controller: poller, theme flag, ticker input and the current
//! snapshot, owned in one place.
//!
//! ```rust,ignore
//! let config = DashboardConfig::from_env()?;
//! let theme = ThemeFlag::load(config.file_store(), SharedMarker::new());
//! let mut dashboard = Dashboard::new(config.client()?, theme, DashboardOptions::from(&config));
//! dashboard.start();
//!
//! while let Some(state) = dashboard.next_update().await {
//!     let finished = done(state);
//!     render(dashboard.view());
//!     if finished {
//!         dashboard.shutdown();
//!     }
//! }
//! ```

use crate::config::DashboardConfig;
use crate::domain::dashboard::{DashboardEvent, DashboardState, StalePolicy, TickerInput};
use crate::domain::theme::{Theme, ThemeFlag};
use crate::error::StorageError;
use crate::poll::{PollConfig, QuotePoller, QuoteSource, TimerStats};
use crate::render::{self, DashboardView};
use crate::shared::{Interval, Ticker};
use crate::storage::{KeyValueStore, PresentationMarker};

/// Construction parameters for a [`Dashboard`].
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub poll: PollConfig,
    pub interval: Interval,
    pub stale_policy: StalePolicy,
    /// Ticker polled by [`Dashboard::start`].
    pub initial_ticker: Option<Ticker>,
}

impl From<&DashboardConfig> for DashboardOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            poll: config.poll_config(),
            interval: config.interval,
            stale_policy: config.stale_policy,
            initial_ticker: Some(config.default_ticker.clone()),
        }
    }
}

/// The single controller behind the dashboard UI.
///
/// Every state change goes through [`DashboardState::apply`]; the current
/// snapshot is replaced, never edited.
pub struct Dashboard<S, K, M> {
    poller: QuotePoller<S>,
    theme: ThemeFlag<K, M>,
    input: TickerInput,
    state: DashboardState,
    policy: StalePolicy,
}

impl<S, K, M> Dashboard<S, K, M>
where
    S: QuoteSource + Send + Sync + 'static,
    K: KeyValueStore,
    M: PresentationMarker,
{
    pub fn new(source: S, theme: ThemeFlag<K, M>, options: DashboardOptions) -> Self {
        let input = match &options.initial_ticker {
            Some(ticker) => TickerInput::with_ticker(ticker.clone()),
            None => TickerInput::new(),
        };
        let state = DashboardState::new(
            options.initial_ticker.clone(),
            theme.theme(),
            options.interval,
        );

        Self {
            poller: QuotePoller::new(source, options.poll),
            theme,
            input,
            state,
            policy: options.stale_policy,
        }
    }

    /// Begin polling the confirmed ticker, if there is one.
    pub fn start(&mut self) {
        let ticker = self.input.confirmed().cloned();
        self.change_ticker(ticker);
    }

    /// Update the draft without confirming it.
    pub fn edit_ticker(&mut self, text: &str) {
        self.input.edit(text);
    }

    /// Confirm the draft: restart polling for it.
    ///
    /// A blank draft stops all fetching but leaves the displayed quote.
    pub fn submit_ticker(&mut self) -> Option<Ticker> {
        let ticker = self.input.confirm();
        self.change_ticker(ticker.clone());
        ticker
    }

    /// Edit and confirm in one step.
    pub fn set_ticker(&mut self, raw: &str) -> Option<Ticker> {
        self.input.edit(raw);
        self.submit_ticker()
    }

    /// Flip and persist the theme.
    ///
    /// On a storage failure the snapshot keeps the old theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme.toggle()?;
        self.apply(DashboardEvent::ThemeToggled(theme));
        Ok(theme)
    }

    /// Wait for the next fetch event and apply it.
    pub async fn next_update(&mut self) -> Option<&DashboardState> {
        let event = self.poller.next_event().await?;
        self.apply(event.into());
        Some(&self.state)
    }

    /// Apply every event that has already arrived. Returns how many.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.poller.try_next_event() {
            self.apply(event.into());
            applied += 1;
        }
        applied
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.clone()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view(&self) -> DashboardView {
        render::view(&self.state)
    }

    pub fn input(&self) -> &TickerInput {
        &self.input
    }

    pub fn theme(&self) -> &ThemeFlag<K, M> {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeFlag<K, M> {
        &mut self.theme
    }

    pub fn timer_stats(&self) -> TimerStats {
        self.poller.stats()
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.policy
    }

    /// Stop polling and close the event channel.
    ///
    /// Updates already delivered are still returned by
    /// [`Dashboard::next_update`], which then returns `None`. Results of
    /// fetches still in flight are dropped.
    pub fn shutdown(&mut self) {
        self.poller.close();
        tracing::debug!("Dashboard shut down");
    }

    fn change_ticker(&mut self, ticker: Option<Ticker>) {
        self.apply(DashboardEvent::TickerChanged(ticker.clone()));
        self.poller.set_current(ticker);
    }

    fn apply(&mut self, event: DashboardEvent) {
        self.state = self.state.apply(event, self.policy);
    }
}
