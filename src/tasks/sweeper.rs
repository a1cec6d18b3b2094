//! Cache Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{deadline_after, CacheStore, FAR_FUTURE};

/// Spawns a background task that sweeps expired entries out of `cache`.
///
/// The first sweep happens one `sweep_interval` after this call, then once
/// per interval. Each sweep holds the write lock for the whole pass, so
/// foreground requests never see a partially swept store.
///
/// The task exits when `token` is cancelled. A sweep already holding the
/// lock always runs to completion first. Await the returned handle to wait
/// for the exit.
///
/// # Panics
/// Panics if `sweep_interval` is zero.
///
/// # Example
/// ```ignore
/// let token = CancellationToken::new();
/// let handle = spawn_sweeper_task(store.clone(), Duration::from_secs(1), token.clone());
/// // Later, during shutdown:
/// token.cancel();
/// handle.await?;
/// ```
pub fn spawn_sweeper_task(
    cache: Arc<RwLock<CacheStore>>,
    sweep_interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    // Created before spawning so the schedule starts now, not at first poll
    let period = sweep_interval.min(FAR_FUTURE);
    let mut ticker = interval_at(deadline_after(Instant::now(), period), period);

    tokio::spawn(async move {
        info!(
            "Starting cache sweeper with interval of {} ms",
            sweep_interval.as_millis()
        );

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    info!("Cache sweeper shutting down");
                    break;
                }
                tick = ticker.tick() => {
                    let removed = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.sweep_expired(tick)
                    };

                    if removed > 0 {
                        info!("Cache sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
            }
        }
    })
}
