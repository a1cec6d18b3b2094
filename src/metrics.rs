//! Prometheus Metrics Module
//!
//! Owns the gateway's Prometheus registry: a response counter labelled by
//! status, method and route, plus gauges mirroring the cache accounting.

use axum::http::{Method, StatusCode};
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::cache::CacheStats;
use crate::error::{GatewayError, Result};

/// Content type of the text exposition format served on `/metrics`.
pub const METRICS_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Metrics registered in a private registry, one set per [`crate::AppState`].
pub struct GatewayMetrics {
    registry: Registry,
    http_responses: IntCounterVec,
    cache_element_count: IntGauge,
    cache_size_bytes: IntGauge,
}

impl GatewayMetrics {
    /// Creates and registers every gateway metric.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_responses = IntCounterVec::new(
            Opts::new(
                "http_responses_total",
                "Count of http responses, labeled by status code and method",
            ),
            &["status", "method", "path"],
        )?;
        registry.register(Box::new(http_responses.clone()))?;

        let cache_element_count =
            IntGauge::new("cache_element_count", "Number of elements in the cache")?;
        registry.register(Box::new(cache_element_count.clone()))?;

        let cache_size_bytes = IntGauge::new("cache_size_bytes", "Size of cache in bytes")?;
        registry.register(Box::new(cache_size_bytes.clone()))?;

        Ok(Self {
            registry,
            http_responses,
            cache_element_count,
            cache_size_bytes,
        })
    }

    /// Counts one response. `path` should be the route template, not the raw
    /// URI, to keep label cardinality bounded.
    pub fn record_response(&self, status: StatusCode, method: &Method, path: &str) {
        let status = status.canonical_reason().unwrap_or(status.as_str());
        self.http_responses
            .with_label_values(&[status, method.as_str(), path])
            .inc();
    }

    /// Copies the cache accounting into the gauges.
    pub fn observe_cache(&self, stats: &CacheStats) {
        self.cache_element_count
            .set(i64::try_from(stats.element_count).unwrap_or(i64::MAX));
        self.cache_size_bytes
            .set(i64::try_from(stats.size_bytes).unwrap_or(i64::MAX));
    }

    /// Renders every registered metric in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| GatewayError::Internal(err.to_string()))
    }
}
