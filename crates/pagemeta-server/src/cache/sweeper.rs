//! Background sweep of expired cache entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::cache::MetadataCache;

/// Handle for controlling a running sweep scheduler.
///
/// Dropping the handle stops the scheduler.
pub struct SweepHandle {
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
    /// Number of completed sweeps.
    sweeps_rx: watch::Receiver<u64>,
}

impl SweepHandle {
    /// Signals the scheduler to stop.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Returns true once the scheduler task has exited.
    pub fn is_stopped(&self) -> bool {
        self.shutdown_tx.is_closed()
    }

    /// Returns how many sweeps have completed so far.
    pub fn sweeps(&self) -> u64 {
        *self.sweeps_rx.borrow()
    }

    /// Waits until at least `count` sweeps have completed.
    ///
    /// Returns immediately if the scheduler already stopped.
    pub async fn wait_for_sweeps(&mut self, count: u64) {
        let _ = self.sweeps_rx.wait_for(|done| *done >= count).await;
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Background scheduler that sweeps expired entries from a [`MetadataCache`].
///
/// The first sweep runs one full interval after start.
pub struct SweepScheduler {
    /// The cache to sweep.
    cache: MetadataCache,
    /// Interval between sweeps.
    interval: Duration,
}

impl SweepScheduler {
    /// Creates a new sweep scheduler.
    pub fn new(cache: MetadataCache, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// Starts the background sweep task.
    ///
    /// Returns a handle that can be used to stop the scheduler.
    pub fn start(self) -> SweepHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sweeps_tx, sweeps_rx) = watch::channel(0u64);

        tokio::spawn(self.run(shutdown_rx, sweeps_tx));

        SweepHandle {
            shutdown_tx,
            sweeps_rx,
        }
    }

    /// Runs the scheduler loop.
    async fn run(self, mut shutdown_rx: watch::Receiver<bool>, sweeps_tx: watch::Sender<u64>) {
        let start = tokio::time::Instant::now() + self.interval;
        let mut ticker = interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Starting cache sweep scheduler with interval {:?}", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("Cache sweep started");
                    let removed = self.cache.sweep();
                    sweeps_tx.send_modify(|done| *done += 1);
                    debug!(removed, "Cache sweep completed");
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        info!("Cache sweep scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl MetadataCache {
    /// Starts sweeping this cache every `invalidation_interval`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pagemeta_server::cache::{CacheConfig, MetadataCache};
    /// # #[tokio::main]
    /// # async fn main() {
    /// let cache = MetadataCache::new(CacheConfig::default());
    /// let handle = cache.start_sweeper();
    /// // ...
    /// handle.stop();
    /// # }
    /// ```
    pub fn start_sweeper(&self) -> SweepHandle {
        SweepScheduler::new(self.clone(), self.config().invalidation_interval()).start()
    }
}
