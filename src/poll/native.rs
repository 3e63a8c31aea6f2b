//! Native quote poller: a tokio timer task plus one task per fetch.
//!
//! - At most one repeating timer is armed at a time
//! - Every ticker change cancels the timer, fetches immediately, re-arms
//! - Ticks read the ticker that is current when they fire
//! - Fetch results are delivered as a stream of [`PollEvent`]s
//!
//! Only the timer is cancellable. A fetch already in flight runs to
//! completion and still reports its result, unless the poller was closed.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::poll::{PollConfig, PollEvent, QuoteSource, TimerStats};
use crate::shared::Ticker;

const MIN_INTERVAL: Duration = Duration::from_millis(1);
const EVENT_BUFFER: usize = 256;

// ─── State shared with background tasks ──────────────────────────────────────

struct Shared<S> {
    source: S,
    current: RwLock<Option<Ticker>>,
    seq: AtomicU64,
    event_tx: mpsc::Sender<PollEvent>,
}

impl<S> Shared<S> {
    fn emit(&self, event: PollEvent) {
        if let Err(mpsc::error::TrySendError::Full(event)) = self.event_tx.try_send(event) {
            tracing::warn!(seq = event.seq(), "Poll event channel full, dropping event");
        }
    }

    fn current(&self) -> Option<Ticker> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_current(&self, ticker: Option<Ticker>) {
        match self.current.write() {
            Ok(mut guard) => *guard = ticker,
            Err(poisoned) => *poisoned.into_inner() = ticker,
        }
    }
}

// ─── Public QuotePoller ──────────────────────────────────────────────────────

/// Polls a [`QuoteSource`] for the current ticker on a fixed interval.
///
/// Must be used inside a tokio runtime. Dropping the poller cancels the
/// timer.
pub struct QuotePoller<S> {
    config: PollConfig,
    shared: Arc<Shared<S>>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<PollEvent>>,
    timer: Option<JoinHandle<()>>,
    stats: TimerStats,
    closed: bool,
}

impl<S> QuotePoller<S>
where
    S: QuoteSource + Send + Sync + 'static,
{
    /// Create an idle poller. Nothing is fetched until a ticker is set.
    pub fn new(source: S, config: PollConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        Self {
            config,
            shared: Arc::new(Shared {
                source,
                current: RwLock::new(None),
                seq: AtomicU64::new(0),
                event_tx,
            }),
            event_rx: tokio::sync::Mutex::new(event_rx),
            timer: None,
            stats: TimerStats::default(),
            closed: false,
        }
    }

    /// Switch to the ticker in `raw` (trimmed, upper-cased).
    ///
    /// Cancels the running timer, fetches once immediately and arms a new
    /// timer. Blank input records "no ticker": the timer is still re-armed
    /// but neither the immediate fetch nor any tick issues a request.
    pub fn set_ticker(&mut self, raw: &str) -> Option<Ticker> {
        let ticker = Ticker::parse(raw);
        self.set_current(ticker.clone());
        ticker
    }

    /// Same as [`QuotePoller::set_ticker`] with an already parsed ticker.
    ///
    /// Ignored once the poller is closed.
    pub fn set_current(&mut self, ticker: Option<Ticker>) {
        if self.closed {
            tracing::warn!("Ticker change on a closed poller ignored");
            return;
        }
        self.cancel_timer();
        self.shared.set_current(ticker.clone());

        match ticker {
            Some(ticker) => {
                tracing::debug!(%ticker, "Ticker changed");
                spawn_fetch(&self.shared, ticker);
            }
            None => tracing::debug!("Ticker cleared, fetches suppressed"),
        }

        self.arm_timer();
    }

    /// Cancel the timer. Idempotent; in-flight fetches still report.
    pub fn stop(&mut self) {
        self.cancel_timer();
    }

    /// Cancel the timer and close the event channel.
    ///
    /// Events already delivered can still be read; after that
    /// [`QuotePoller::next_event`] returns `None` and [`QuotePoller::events`]
    /// ends. Results of fetches still in flight are dropped.
    pub fn close(&mut self) {
        self.cancel_timer();
        if !self.closed {
            self.closed = true;
            self.event_rx.get_mut().close();
            tracing::debug!("Poller closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn current(&self) -> Option<Ticker> {
        self.shared.current()
    }

    pub fn stats(&self) -> TimerStats {
        self.stats
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// Wait for the next fetch event.
    pub async fn next_event(&self) -> Option<PollEvent> {
        self.event_rx.lock().await.recv().await
    }

    /// Take an already delivered event without waiting.
    pub fn try_next_event(&self) -> Option<PollEvent> {
        self.event_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Stream of fetch events.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = PollEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }

    fn arm_timer(&mut self) {
        let mut period = self.config.interval;
        if period < MIN_INTERVAL {
            tracing::warn!(?period, "Poll interval too small, using {:?}", MIN_INTERVAL);
            period = MIN_INTERVAL;
        }

        let handle = tokio::spawn(run_timer(Arc::clone(&self.shared), period));
        self.timer = Some(handle);
        self.stats.armed += 1;
        tracing::debug!(?period, armed = self.stats.armed, "Poll timer armed");
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
            self.stats.cancelled += 1;
            tracing::debug!(cancelled = self.stats.cancelled, "Poll timer cancelled");
        }
    }
}

impl<S> Drop for QuotePoller<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

// ─── Background tasks ────────────────────────────────────────────────────────

async fn run_timer<S>(shared: Arc<Shared<S>>, period: Duration)
where
    S: QuoteSource + Send + Sync + 'static,
{
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        match shared.current() {
            Some(ticker) => spawn_fetch(&shared, ticker),
            None => tracing::trace!("Poll tick without a ticker"),
        }
    }
}

fn spawn_fetch<S>(shared: &Arc<Shared<S>>, ticker: Ticker)
where
    S: QuoteSource + Send + Sync + 'static,
{
    let seq = shared.seq.fetch_add(1, Ordering::SeqCst) + 1;
    shared.emit(PollEvent::FetchStarted {
        seq,
        ticker: ticker.clone(),
    });

    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let event = match shared.source.fetch(&ticker).await {
            Ok(document) => PollEvent::FetchSucceeded {
                seq,
                ticker,
                document: Arc::new(document),
                received_at: Utc::now(),
            },
            Err(e) => {
                tracing::warn!(seq, %ticker, "Quote fetch failed: {}", e);
                PollEvent::FetchFailed {
                    seq,
                    ticker,
                    error: e.to_string(),
                }
            }
        };
        shared.emit(event);
    });
}
