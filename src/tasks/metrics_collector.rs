//! Cache Metrics Collector Task
//!
//! Copies the cache's element count and size into the Prometheus gauges at a
//! fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{deadline_after, CacheDecorator, FAR_FUTURE};
use crate::metrics::GatewayMetrics;

/// Spawns the collector. The first refresh runs one `interval` after this
/// call; the task exits when `token` is cancelled.
///
/// # Panics
/// Panics if `interval` is zero.
pub fn spawn_metrics_collector(
    cache: Arc<CacheDecorator>,
    metrics: Arc<GatewayMetrics>,
    interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    let period = interval.min(FAR_FUTURE);
    let mut ticker = interval_at(deadline_after(Instant::now(), period), period);

    tokio::spawn(async move {
        info!(
            "Starting cache metrics collector with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    info!("Cache metrics collector shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let stats = cache.stats().await;
                    metrics.observe_cache(&stats);
                    debug!(
                        element_count = stats.element_count,
                        size_bytes = stats.size_bytes,
                        "cache gauges refreshed"
                    );
                }
            }
        }
    })
}
