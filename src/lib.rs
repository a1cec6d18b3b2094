//! User Gateway - A REST gateway for user records
//!
//! Serves CRUD operations on users through a read-through cache with sliding
//! TTL expiration and a background eviction sweeper, with Prometheus metrics
//! for responses and cache size.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheDecorator, CacheSettings};
pub use config::Config;
pub use error::GatewayError;
pub use metrics::GatewayMetrics;
pub use provider::{InMemoryUserRepository, UserProvider};
pub use tasks::{spawn_metrics_collector, spawn_sweeper_task};
