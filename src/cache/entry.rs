//! Cache Entry Module
//!
//! Defines the structure for individual cached users with sliding TTL support.

use std::time::Duration;

use tokio::time::Instant;

use crate::models::User;

// == Size Model ==
// Nominal byte costs used for size accounting. These approximate the
// footprint of a cached user; they are not a measurement of heap usage.
const UUID_BYTES: usize = 16;
const I32_BYTES: usize = 4;
const BOOL_BYTES: usize = 1;
const INSTANT_BYTES: usize = 16;
const STRING_HEADER_BYTES: usize = 24;

/// Stand-in for "never" when a duration would overflow the clock.
pub(crate) const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Returns `now + ttl`, capped at [`FAR_FUTURE`] from now.
pub(crate) fn deadline_after(now: Instant, ttl: Duration) -> Instant {
    now + ttl.min(FAR_FUTURE)
}

// == Cache Entry ==
/// A cached user and the instant after which it is considered stale.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached user, exactly as the provider returned it
    pub value: User,
    /// Expiration instant
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: User, ttl: Duration) -> Self {
        Self::with_expiry(value, deadline_after(Instant::now(), ttl))
    }

    /// Creates an entry with an explicit expiration instant.
    pub fn with_expiry(value: User, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry is expired at `now`.
    ///
    /// An entry whose expiration instant equals `now` counts as expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Touch ==
    /// Pushes the expiration out to `ttl` from now.
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at = deadline_after(Instant::now(), ttl);
    }

    // == Approximate Size ==
    /// Returns the nominal size in bytes of this entry stored under `key`.
    pub fn approx_size(&self, key: &str) -> usize {
        let user = &self.value;

        STRING_HEADER_BYTES
            + key.len()
            + UUID_BYTES
            + STRING_HEADER_BYTES
            + user.name.len()
            + I32_BYTES
            + BOOL_BYTES
            + STRING_HEADER_BYTES
            + user.password_hash.len()
            + INSTANT_BYTES
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(name: &str) -> User {
        User::new(Uuid::new_v4(), name, 30, false)
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_not_expired_before_ttl() {
        let entry = CacheEntry::new(user("Daniel"), Duration::from_secs(1));

        assert!(!entry.is_expired_at(Instant::now()));
        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(!entry.is_expired_at(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new(user("Daniel"), Duration::from_secs(1));

        tokio::time::advance(Duration::from_millis(1100)).await;
        assert!(entry.is_expired_at(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_extends_expiry() {
        let ttl = Duration::from_secs(1);
        let mut entry = CacheEntry::new(user("Daniel"), ttl);
        let original = entry.expires_at;

        tokio::time::advance(Duration::from_millis(300)).await;
        entry.touch(ttl);

        assert_eq!(entry.expires_at, original + Duration::from_millis(300));
        assert_eq!(entry.expires_at, Instant::now() + ttl);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        let now = Instant::now();
        let mut entry = CacheEntry::new(user("Daniel"), Duration::MAX);

        assert!(entry.expires_at > now + Duration::from_secs(86_400 * 365));
        assert!(!entry.is_expired_at(now));

        entry.touch(Duration::from_secs(u64::MAX));
        assert!(!entry.is_expired_at(Instant::now()));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::with_expiry(user("Daniel"), now);

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(!entry.is_expired_at(now - Duration::from_millis(1)));
    }

    #[test]
    fn test_approx_size_grows_with_text() {
        let short = CacheEntry::with_expiry(user("Al"), Instant::now());
        let long = CacheEntry::with_expiry(user("Alexander"), Instant::now());
        let key = "0f8fad5b-d9cb-469f-a165-70867728950e";

        assert_eq!(long.approx_size(key) - short.approx_size(key), 7);
        assert_eq!(short.approx_size(key), 24 + 36 + 16 + 24 + 2 + 4 + 1 + 24 + 16);
    }
}
