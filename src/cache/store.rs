//! Cache Store Module
//!
//! Keyed storage for cached users with TTL bookkeeping and size accounting.
//! The store itself is not synchronized; callers share it as
//! `Arc<RwLock<CacheStore>>` and take the write lock for every mutation.
//!
//! Every invalidating write (a removal or a write-through) bumps a store-wide
//! generation. A read-through observes the generation together with its miss
//! and commits its provider result with [`CacheStore::fill`], which refuses
//! the commit if any invalidating write landed in between.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};
use crate::models::User;

// == Cache Store ==
/// Map from user id to cached entry, plus its accounting.
#[derive(Debug)]
pub struct CacheStore {
    /// Id to entry storage
    entries: HashMap<String, CacheEntry>,
    /// Count and size accounting, kept in step with `entries`
    stats: CacheStats,
    /// Lifetime granted on insert and on touch
    ttl: Duration,
    /// Bumped by every removal and write-through
    generation: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl` after their last
    /// insert or touch.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(100),
            stats: CacheStats::new(),
            ttl,
            generation: 0,
        }
    }

    // == Get ==
    /// Returns a copy of the cached user if present and not expired.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str) -> Option<User> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    // == Insert ==
    /// Stores `value` under `key` with a fresh expiry.
    ///
    /// An existing entry is replaced wholesale. Returns true if an entry was
    /// replaced.
    pub fn insert(&mut self, key: String, value: User) -> bool {
        let entry = CacheEntry::new(value, self.ttl);
        let new_size = entry.approx_size(&key);

        match self.entries.get_mut(&key) {
            Some(existing) => {
                let old_size = existing.approx_size(&key);
                *existing = entry;
                self.stats.record_replace(old_size, new_size);
                true
            }
            None => {
                self.entries.insert(key, entry);
                self.stats.record_insert(new_size);
                false
            }
        }
    }

    // == Touch ==
    /// Extends the expiry of `key` to a full TTL from now.
    ///
    /// Returns false if the key is no longer cached.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(self.ttl);
                true
            }
            None => false,
        }
    }

    // == Remove ==
    /// Removes `key`, returning the cached user if it was present.
    ///
    /// Always counts as an invalidating write, even for an absent key.
    pub fn remove(&mut self, key: &str) -> Option<User> {
        self.generation += 1;
        let entry = self.entries.remove(key)?;
        self.stats.record_removal(entry.approx_size(key));
        Some(entry.value)
    }

    // == Generation ==
    /// Returns the current write generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Fill ==
    /// Commits a read-through result observed at generation `observed`.
    ///
    /// Skips the commit if an invalidating write happened since, because
    /// `value` may predate it. Returns true if the value was stored.
    pub fn fill(&mut self, key: String, value: User, observed: u64) -> bool {
        if self.generation != observed {
            return false;
        }
        self.insert(key, value);
        true
    }

    // == Write Through ==
    /// Commits a provider write whose call started at generation `observed`.
    ///
    /// If another invalidating write landed while the call was in flight, the
    /// two may have reached the provider in either order, so the key is
    /// dropped instead of guessing. Returns true if the value was stored.
    pub fn write_through(&mut self, key: String, value: User, observed: u64) -> bool {
        if self.generation != observed {
            self.remove(&key);
            return false;
        }
        self.insert(key, value);
        self.generation += 1;
        true
    }

    // == Sweep Expired ==
    /// Removes every entry whose expiry is at or before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let stats = &mut self.stats;
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            if entry.is_expired_at(now) {
                stats.record_eviction(entry.approx_size(key));
                false
            } else {
                true
            }
        });

        before - self.entries.len()
    }

    // == Stats ==
    /// Returns the current accounting snapshot.
    ///
    /// Hit and miss counters are tracked by the decorator and are zero here.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Returns the tracked element count.
    pub fn element_count(&self) -> usize {
        self.stats.element_count
    }

    /// Returns the tracked approximate size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.stats.size_bytes
    }

    // == Inspection ==
    /// Returns the expiry instant of `key`, expired or not.
    pub fn expires_at(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    /// Returns true if `key` has an entry, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the number of entries actually held in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
