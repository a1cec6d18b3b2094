//! Background Tasks Module
//!
//! Contains background tasks that run periodically during gateway operation.
//!
//! # Tasks
//! - Cache sweeper: Removes expired cached users at a fixed interval
//! - Metrics collector: Copies cache accounting into the Prometheus gauges

mod metrics_collector;
mod sweeper;

pub use metrics_collector::spawn_metrics_collector;
pub use sweeper::spawn_sweeper_task;
