//! Background price refresher.
//!
//! One tokio task derives a new [`MarketSnapshot`] every interval and
//! publishes it on a `watch` channel. Readers always see a complete snapshot;
//! nothing is updated in place. The first refresh happens one full interval
//! after start.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::domain::snapshot::MarketSnapshot;

/// Create the channel the refresher publishes on.
pub fn market_channel(
    initial: MarketSnapshot,
) -> (
    watch::Sender<Arc<MarketSnapshot>>,
    watch::Receiver<Arc<MarketSnapshot>>,
) {
    watch::channel(Arc::new(initial))
}

/// Handle to a running refresher. Dropping it also stops the task.
pub struct RefreshHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the task and wait for it to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "price refresher ended abnormally");
        }
    }
}

/// Spawn the refresher on the current tokio runtime.
pub fn start_price_refresher<R>(
    market: watch::Sender<Arc<MarketSnapshot>>,
    period: Duration,
    max_change: f64,
    mut rng: R,
) -> RefreshHandle
where
    R: Rng + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            interval_secs = period.as_secs_f64(),
            max_change, "price refresher started"
        );
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let next = market.borrow().refreshed(max_change, &mut rng, Utc::now());
                    debug!(generation = next.generation, quotes = next.quotes.len(), "published refreshed quotes");
                    market.send_replace(Arc::new(next));
                }
                _ = shutdown_rx.changed() => break,
            }
        }

        info!("price refresher stopped");
    });

    RefreshHandle { shutdown, task }
}
