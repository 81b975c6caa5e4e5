//! The price refresh loop.
//!
//! A [`PriceRefreshLoop`] owns the current [`TokenMetrics`] and replaces it on
//! every successful fetch, then pushes the rendered values to its
//! [`DisplaySurface`]. Cycles are serialized: a tick that arrives while a
//! cycle is still running waits for it, and late ticks are delayed rather
//! than bunched.

use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use crate::api::{FetchOutcome, MetricsSource};
use crate::display::{render, DisplaySurface};
use crate::error::{Error, Result};
use crate::metrics::{FETCH_ATTEMPTS, FETCH_ERRORS, FETCH_LATENCY, PRICE_USD};
use crate::models::TokenMetrics;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

pub const STATUS_UPDATING: &str = "Updating price data...";
pub const STATUS_UPDATED: &str = "Price data updated";
pub const STATUS_NO_PAIRS: &str = "No trading pairs found";
pub const STATUS_FAILED: &str = "Price data unavailable, showing last known values";
pub const ERROR_NOTICE: &str = "Failed to update price data";

pub struct PriceRefreshLoop {
    source: Arc<dyn MetricsSource>,
    display: Arc<dyn DisplaySurface>,
    metrics: Arc<RwLock<TokenMetrics>>,
    interval: Duration,
}

impl PriceRefreshLoop {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        display: Arc<dyn DisplaySurface>,
        interval: Duration,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::ConfigError("refresh interval must be greater than zero".into()));
        }
        Ok(Self {
            source,
            display,
            metrics: Arc::new(RwLock::new(TokenMetrics::default())),
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Snapshot of the current metrics.
    pub async fn metrics(&self) -> TokenMetrics {
        *self.metrics.read().await
    }

    /// Shared read handle on the metrics, usable after the loop is spawned.
    pub fn metrics_handle(&self) -> Arc<RwLock<TokenMetrics>> {
        self.metrics.clone()
    }

    /// One fetch-then-render pass.
    ///
    /// On failure the previous metrics stay in place and the surface gets a
    /// single error notice. The error is returned for callers that care
    /// (`--once`); the scheduled loop ignores it.
    pub async fn run_cycle(&self) -> Result<TokenMetrics> {
        self.display.set_loading(true);
        self.display.set_status(STATUS_UPDATING);

        FETCH_ATTEMPTS.inc();
        let timer = FETCH_LATENCY.start_timer();
        let result = self.source.fetch_metrics().await;
        timer.observe_duration();

        let outcome = match result {
            Ok(fetched) => {
                let fresh = fetched.metrics();
                *self.metrics.write().await = fresh;
                PRICE_USD.set(fresh.price);

                self.display.show(&render(&fresh));
                if let FetchOutcome::NoPairs(_) = fetched {
                    info!("No trading pairs found, metrics reset to zero");
                    self.display.set_status(STATUS_NO_PAIRS);
                } else {
                    info!(
                        "Price updated: ${:.5} ({:+.2}%), mcap {:.0}, vol {:.0}",
                        fresh.price, fresh.price_change_24h, fresh.market_cap, fresh.volume_24h
                    );
                    self.display.set_status(STATUS_UPDATED);
                }
                Ok(fresh)
            }
            Err(e) => {
                FETCH_ERRORS.inc();
                error!("Error fetching token data: {}", e);
                self.display.notify_error(ERROR_NOTICE);
                self.display.set_status(STATUS_FAILED);
                Err(e)
            }
        };

        self.display.set_loading(false);
        outcome
    }

    /// Runs a cycle now and then once per interval until `token` is cancelled.
    pub async fn run(&self, token: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Starting price refresh loop every {:?}", self.interval);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            debug!("Refresh tick");
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Refresh cycle abandoned on shutdown");
                    self.display.set_loading(false);
                    break;
                }
                _ = self.run_cycle() => {}
            }
        }

        info!("Price refresh loop stopped");
    }

    /// Moves the loop onto its own task.
    pub fn spawn(self) -> RefreshHandle {
        let token = CancellationToken::new();
        let metrics = self.metrics.clone();
        let task_token = token.clone();
        let task = tokio::spawn(async move {
            self.run(task_token).await;
        });

        RefreshHandle { token, task, metrics }
    }
}

/// Control handle for a spawned refresh loop.
pub struct RefreshHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
    metrics: Arc<RwLock<TokenMetrics>>,
}

impl RefreshHandle {
    pub async fn metrics(&self) -> TokenMetrics {
        *self.metrics.read().await
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the loop and waits for its task to exit.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            error!("Refresh task ended abnormally: {}", e);
        }
    }
}
