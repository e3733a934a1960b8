//! Periodic refresh of the matches currently in play.
//!
//! [`LivePoller`] owns a background tokio task that re-fetches today's
//! fixtures on a fixed interval, keeps the live and half-time ones, and
//! publishes the current page through a [`watch`] channel. Every commit is
//! guarded by a generation counter, so a response that lands after
//! [`LivePoller::stop`] is discarded instead of overwriting newer state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::client::live_only;
use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL};
use crate::error::{MatchdayError, Result};
use crate::model::{Match, Pagination};
use crate::paginate::paginate;

/// Anything that can list every fixture of a given day.
pub trait MatchSource: Send + Sync + 'static {
    fn fetch_day(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<Match>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub page: usize,
    pub limit: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            page: 1,
            limit: 10,
        }
    }
}

impl From<&ClientConfig> for PollerConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            interval: config.poll_interval,
            ..Self::default()
        }
    }
}

/// What a live view renders.
///
/// After a failed refresh `matches` still holds the last good page; `stale`
/// tells the view to show a warning next to it instead of blanking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSnapshot {
    pub matches: Vec<Match>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
    pub stale: bool,
}

impl LiveSnapshot {
    fn empty(page: usize, limit: usize) -> Self {
        Self {
            matches: Vec::new(),
            pagination: Pagination::empty(page, limit),
            loading: false,
            error: None,
            stale: false,
        }
    }
}

/// A cancellable live-match refresher.
///
/// Idle until [`start`](Self::start); polling until [`stop`](Self::stop) or
/// drop. Starting fetches immediately, then once per interval. A failed tick
/// is published but never stops the timer.
pub struct LivePoller<S: MatchSource> {
    source: Arc<S>,
    interval: Duration,
    limit: usize,
    page: Arc<AtomicUsize>,
    today: fn() -> NaiveDate,
    state: Arc<watch::Sender<LiveSnapshot>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<S: MatchSource> LivePoller<S> {
    pub fn new(source: Arc<S>, config: PollerConfig) -> Result<Self> {
        if config.page == 0 || config.limit == 0 {
            return Err(MatchdayError::InvalidPagination {
                page: config.page,
                limit: config.limit,
            });
        }
        if config.interval.is_zero() {
            return Err(MatchdayError::Config {
                key: "poll_interval",
                reason: "must be greater than zero".to_string(),
            });
        }

        let (state, _) = watch::channel(LiveSnapshot::empty(config.page, config.limit));
        Ok(Self {
            source,
            interval: config.interval,
            limit: config.limit,
            page: Arc::new(AtomicUsize::new(config.page)),
            today: utc_today,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        })
    }

    /// Replace the function that decides which day counts as "today".
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn is_polling(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Receiver that wakes on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<LiveSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        self.state.borrow().clone()
    }

    /// Enter the polling state. A no-op when already polling.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.is_polling() {
            return;
        }

        let tick = self.tick(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.send_modify(|snapshot| snapshot.loading = true);

        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick.run().await;
            }
        }));
        info!(interval_s = period.as_secs(), "live polling started");
    }

    /// Leave the polling state and cancel the timer.
    ///
    /// Any fetch still in flight belongs to an old generation and will not be
    /// applied.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        let generation = &self.generation;
        self.state.send_modify(|snapshot| {
            generation.fetch_add(1, Ordering::SeqCst);
            snapshot.loading = false;
        });
        task.abort();
        info!("live polling stopped");
    }

    /// Run a single fetch now, outside the timer.
    pub async fn refresh(&self) {
        self.state.send_modify(|snapshot| snapshot.loading = true);
        self.tick(self.generation.load(Ordering::SeqCst)).run().await;
    }

    /// Show another page of the live list. When polling, the timer restarts
    /// so the new page is fetched right away.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(MatchdayError::InvalidPagination {
                page,
                limit: self.limit,
            });
        }
        self.page.store(page, Ordering::SeqCst);
        if self.is_polling() {
            self.stop();
            self.start();
        }
        Ok(())
    }

    fn tick(&self, generation: u64) -> Tick<S> {
        Tick {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            current: Arc::clone(&self.generation),
            generation,
            page: Arc::clone(&self.page),
            limit: self.limit,
            today: self.today,
        }
    }
}

impl<S: MatchSource> Drop for LivePoller<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            task.abort();
        }
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// One fetch-filter-paginate-commit cycle bound to a generation.
struct Tick<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<LiveSnapshot>>,
    current: Arc<AtomicU64>,
    generation: u64,
    page: Arc<AtomicUsize>,
    limit: usize,
    today: fn() -> NaiveDate,
}

impl<S: MatchSource> Tick<S> {
    async fn run(&self) {
        let date = (self.today)();
        let page = self.page.load(Ordering::SeqCst);
        let result = self
            .source
            .fetch_day(date)
            .await
            .and_then(|matches| paginate(live_only(matches), page, self.limit));

        let committed = self.state.send_if_modified(|snapshot| {
            if self.current.load(Ordering::SeqCst) != self.generation {
                return false;
            }
            match result {
                Ok(paginated) => {
                    debug!(count = paginated.data.len(), %date, "live matches refreshed");
                    snapshot.matches = paginated.data;
                    snapshot.pagination = paginated.pagination;
                    snapshot.error = None;
                    snapshot.stale = false;
                }
                Err(e) => {
                    warn!(error = %e, %date, "live refresh failed, keeping previous matches");
                    snapshot.stale = !snapshot.matches.is_empty();
                    snapshot.error = Some(e.to_string());
                }
            }
            snapshot.loading = false;
            true
        });
        if !committed {
            debug!(generation = self.generation, "discarding late live refresh");
        }
    }
}
