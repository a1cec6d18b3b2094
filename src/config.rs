//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheSettings;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_CACHE_TTL_MS: u64 = 60 * 60 * 1000;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 1000;
const DEFAULT_METRICS_INTERVAL_MS: u64 = 1000;
const DEFAULT_APP_NAME: &str = "user_gateway";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported at startup
    pub app_name: String,
    /// HTTP server port
    pub server_port: u16,
    /// Sliding lifetime of a cached user
    pub cache_ttl: Duration,
    /// How often the eviction sweeper runs
    pub sweep_interval: Duration,
    /// How often the cache gauges are refreshed
    pub metrics_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APP_NAME` - Name logged at startup (default: user_gateway)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_MS` - Cache entry TTL in milliseconds (default: 1 hour)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweeper period in milliseconds (default: 1000)
    /// - `METRICS_INTERVAL_MS` - Cache gauge refresh period in milliseconds (default: 1000)
    ///
    /// Unparseable values and zero durations fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            cache_ttl: millis_var("CACHE_TTL_MS", DEFAULT_CACHE_TTL_MS),
            sweep_interval: millis_var("CACHE_SWEEP_INTERVAL_MS", DEFAULT_SWEEP_INTERVAL_MS),
            metrics_interval: millis_var("METRICS_INTERVAL_MS", DEFAULT_METRICS_INTERVAL_MS),
        }
    }

    /// Builds the settings handed to the cache decorator.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            ttl: self.cache_ttl,
            sweep_interval: self.sweep_interval,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            sweep_interval: Duration::from_millis(DEFAULT_SWEEP_INTERVAL_MS),
            metrics_interval: Duration::from_millis(DEFAULT_METRICS_INTERVAL_MS),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

// tokio intervals panic on a zero period
fn millis_var(name: &str, default: u64) -> Duration {
    let ms = parse_var::<u64>(name)
        .filter(|ms| *ms > 0)
        .unwrap_or(default);
    Duration::from_millis(ms)
}
