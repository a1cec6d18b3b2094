//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;

/// Response body for the CREATE operation (POST /user)
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    /// Identifier assigned by the provider
    pub id: Uuid,
}

impl CreateResponse {
    /// Creates a new CreateResponse
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Confirmation returned by DELETE /user/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("user {} removed", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Users currently cached
    pub element_count: usize,
    /// Approximate bytes held by cached users
    pub size_bytes: usize,
    /// Fetches served from cache
    pub hits: u64,
    /// Fetches that went to the provider
    pub misses: u64,
    /// Entries removed by the sweeper
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            element_count: stats.element_count,
            size_bytes: stats.size_bytes,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Liveness report for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}

/// Body of every non-2xx response: `{"error": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
