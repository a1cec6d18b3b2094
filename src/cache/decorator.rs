//! Cache Decorator Module
//!
//! Read-through, write-invalidate caching in front of a [`UserProvider`].
//!
//! Lookups take the store's read lock; inserts, touches, removals and sweeps
//! take the write lock. The lock is never held across a provider call, so
//! every commit after one is checked against the store's write generation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{GatewayError, Result};
use crate::models::{User, UserRequest};
use crate::provider::UserProvider;
use crate::tasks::spawn_sweeper_task;

// == Cache Settings ==
/// Timing parameters for a [`CacheDecorator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Sliding lifetime of an entry after its last insert or read
    pub ttl: Duration,
    /// Period of the eviction sweeper
    pub sweep_interval: Duration,
}

// == Cache Decorator ==
/// A [`UserProvider`] that caches users returned by another provider.
///
/// Only values the wrapped provider produced are ever served from the cache.
/// Failed provider calls leave the cache untouched and return the provider's
/// error as-is.
pub struct CacheDecorator {
    provider: Arc<dyn UserProvider>,
    store: Arc<RwLock<CacheStore>>,
    settings: CacheSettings,
    hits: AtomicU64,
    misses: AtomicU64,
    sweeper_started: AtomicBool,
}

impl CacheDecorator {
    // == Constructor ==
    /// Wraps `provider` with an empty cache.
    pub fn new(provider: Arc<dyn UserProvider>, settings: CacheSettings) -> Self {
        Self {
            provider,
            store: Arc::new(RwLock::new(CacheStore::new(settings.ttl))),
            settings,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sweeper_started: AtomicBool::new(false),
        }
    }

    // == Sweeper ==
    /// Starts the eviction sweeper, bound to `token`.
    ///
    /// Only the first call spawns a task; later calls return `None`.
    pub fn start_sweeper(&self, token: CancellationToken) -> Option<JoinHandle<()>> {
        if self.sweeper_started.swap(true, Ordering::SeqCst) {
            warn!("Cache sweeper already running, ignoring second start");
            return None;
        }

        Some(spawn_sweeper_task(
            self.store.clone(),
            self.settings.sweep_interval,
            token,
        ))
    }

    // == Accessors ==
    /// Returns the number of cached users.
    pub async fn element_count(&self) -> usize {
        self.store.read().await.element_count()
    }

    /// Returns the approximate size of cached users in bytes.
    pub async fn size_bytes(&self) -> usize {
        self.store.read().await.size_bytes()
    }

    /// Returns the accounting snapshot including hit and miss counters.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.store.read().await.stats();
        stats.hits = self.hits.load(Ordering::Relaxed);
        stats.misses = self.misses.load(Ordering::Relaxed);
        stats
    }

    /// Returns true if `id` currently has an entry, expired or not.
    pub async fn is_cached(&self, id: &str) -> bool {
        self.store.read().await.contains_key(id)
    }

    /// Returns the number of entries actually held by the store.
    pub async fn cached_len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }
}

#[async_trait]
impl UserProvider for CacheDecorator {
    async fn get_user(&self, id: &str) -> Result<User> {
        let (cached, generation) = {
            let store = self.store.read().await;
            (store.get(id), store.generation())
        };

        if let Some(user) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.store.write().await.touch(id);
            debug!(id, "cache hit");
            return Ok(user);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(id, "cache miss");

        let user = self.provider.get_user(id).await.inspect_err(log_failure)?;
        let filled = self
            .store
            .write()
            .await
            .fill(id.to_string(), user.clone(), generation);
        if !filled {
            debug!(id, "read-through result superseded by a concurrent write");
        }

        Ok(user)
    }

    async fn create_user(&self, req: UserRequest) -> Result<Uuid> {
        self.provider.create_user(req).await
    }

    async fn update_user(&self, id: &str, req: UserRequest) -> Result<User> {
        let generation = self.store.read().await.generation();
        let user = self
            .provider
            .update_user(id, req)
            .await
            .inspect_err(log_failure)?;
        let stored = self
            .store
            .write()
            .await
            .write_through(id.to_string(), user.clone(), generation);
        if !stored {
            debug!(id, "concurrent write on update, cache entry dropped");
        }

        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.provider.delete_user(id).await.inspect_err(log_failure)?;
        if self.store.write().await.remove(id).is_some() {
            debug!(id, "cache entry invalidated");
        }

        Ok(())
    }
}

fn log_failure(err: &GatewayError) {
    match err {
        GatewayError::Provider(_) | GatewayError::Internal(_) => {
            warn!(error = %err, "provider call failed")
        }
        GatewayError::NotFound(_) | GatewayError::Validation(_) => {
            debug!(error = %err, "provider rejected request")
        }
    }
}
