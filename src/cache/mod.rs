//! Cache Module
//!
//! Read-through user cache with sliding TTL expiration and size accounting.

mod decorator;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use decorator::{CacheDecorator, CacheSettings};
pub use entry::CacheEntry;
pub(crate) use entry::{deadline_after, FAR_FUTURE};
pub use stats::CacheStats;
pub use store::CacheStore;
