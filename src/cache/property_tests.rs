//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store accounting and decorator consistency over
//! arbitrary operation sequences.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::cache::{CacheDecorator, CacheEntry, CacheSettings, CacheStore};
use crate::models::{User, UserRequest};
use crate::provider::{InMemoryUserRepository, UserProvider};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates a small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

/// Generates valid user names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{2,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Insert { key: String, name: String },
    Touch { key: String },
    Remove { key: String },
    Sweep { offset_secs: u64 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), name_strategy()).prop_map(|(key, name)| StoreOp::Insert { key, name }),
        key_strategy().prop_map(|key| StoreOp::Touch { key }),
        key_strategy().prop_map(|key| StoreOp::Remove { key }),
        (0u64..600).prop_map(|offset_secs| StoreOp::Sweep { offset_secs }),
    ]
}

#[derive(Debug, Clone)]
enum DecoratorOp {
    Fetch { slot: usize },
    Update { slot: usize, name: String },
    Delete { slot: usize },
}

fn decorator_op_strategy() -> impl Strategy<Value = DecoratorOp> {
    prop_oneof![
        (0usize..4).prop_map(|slot| DecoratorOp::Fetch { slot }),
        (0usize..4, name_strategy()).prop_map(|(slot, name)| DecoratorOp::Update { slot, name }),
        (0usize..4).prop_map(|slot| DecoratorOp::Delete { slot }),
    ]
}

fn user(name: &str) -> User {
    User::new(Uuid::new_v4(), name, 30, false)
}

fn expected_size(model: &HashMap<String, User>) -> usize {
    model
        .iter()
        .map(|(key, value)| CacheEntry::with_expiry(value.clone(), Instant::now()).approx_size(key))
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of store mutations, the tracked element count and
    // size always match the entries actually held.
    #[test]
    fn prop_accounting_matches_membership(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_TTL);
        let mut model: HashMap<String, User> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Insert { key, name } => {
                    let value = user(&name);
                    let replaced = store.insert(key.clone(), value.clone());
                    prop_assert_eq!(replaced, model.insert(key, value).is_some());
                }
                StoreOp::Touch { key } => {
                    prop_assert_eq!(store.touch(&key), model.contains_key(&key));
                }
                StoreOp::Remove { key } => {
                    prop_assert_eq!(store.remove(&key), model.remove(&key));
                }
                StoreOp::Sweep { offset_secs } => {
                    let now = Instant::now() + Duration::from_secs(offset_secs);
                    let removed = store.sweep_expired(now);
                    if offset_secs >= TEST_TTL.as_secs() {
                        prop_assert_eq!(removed, model.len());
                        model.clear();
                    }
                }
            }

            prop_assert_eq!(store.element_count(), store.len());
            prop_assert_eq!(store.len(), model.len());
            prop_assert_eq!(store.size_bytes(), expected_size(&model));
        }
    }

    // Inserting V1 then V2 under one key serves V2 and holds a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        name1 in name_strategy(),
        name2 in name_strategy()
    ) {
        let mut store = CacheStore::new(TEST_TTL);
        let second = user(&name2);

        store.insert(key.clone(), user(&name1));
        store.insert(key.clone(), second.clone());

        prop_assert_eq!(store.get(&key), Some(second));
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.element_count(), 1);
    }

    // A sweep removes exactly the entries whose expiry is at or before the
    // sweep instant, and the count drops by exactly that many.
    #[test]
    fn prop_sweep_removes_exactly_expired(
        offsets in prop::collection::vec(0u64..1000, 1..30),
        sweep_at in 0u64..2000
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap();
        let mut offsets = offsets;
        offsets.sort_unstable();

        runtime.block_on(async {
            let ttl = Duration::from_millis(500);
            let base = Instant::now();
            let mut store = CacheStore::new(ttl);

            for (i, offset) in offsets.iter().enumerate() {
                let target = base + Duration::from_millis(*offset);
                tokio::time::advance(target.saturating_duration_since(Instant::now())).await;
                store.insert(format!("k{}", i), user("Daniel"));
            }

            let sweep_instant = base + Duration::from_millis(sweep_at);
            let expected_removed = offsets
                .iter()
                .filter(|offset| base + Duration::from_millis(**offset) + ttl <= sweep_instant)
                .count();
            let before = store.element_count();

            let removed = store.sweep_expired(sweep_instant);

            prop_assert_eq!(removed, expected_removed);
            prop_assert_eq!(store.element_count(), before - removed);
            prop_assert_eq!(store.element_count(), store.len());
            Ok::<(), TestCaseError>(())
        })?;
    }
}

// Decorator properties drive an async API from synchronous proptest cases
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // For any sequence of fetch/update/delete, a cached user always equals
    // what the provider holds, and the accounting matches the store.
    #[test]
    fn prop_cache_never_diverges_from_provider(ops in prop::collection::vec(decorator_op_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let repo = Arc::new(InMemoryUserRepository::new());
            let mut ids = Vec::new();
            for i in 0..4 {
                let id = repo
                    .create_user(UserRequest::new(format!("user{}", i), 20 + i, false))
                    .await
                    .unwrap();
                ids.push(id.to_string());
            }

            let cache = CacheDecorator::new(
                repo.clone(),
                CacheSettings { ttl: TEST_TTL, sweep_interval: Duration::from_secs(1) },
            );

            for op in ops {
                match op {
                    DecoratorOp::Fetch { slot } => {
                        let _ = cache.get_user(&ids[slot]).await;
                    }
                    DecoratorOp::Update { slot, name } => {
                        let _ = cache
                            .update_user(&ids[slot], UserRequest::new(name, 40, true))
                            .await;
                    }
                    DecoratorOp::Delete { slot } => {
                        let _ = cache.delete_user(&ids[slot]).await;
                    }
                }

                let store = cache.store();
                let store = store.read().await;
                prop_assert_eq!(store.element_count(), store.len());
                for id in &ids {
                    if let Some(cached) = store.get(id) {
                        let stored = repo.get_user(id).await.ok();
                        prop_assert_eq!(Some(cached), stored);
                    }
                }
            }

            Ok::<(), TestCaseError>(())
        })?;
    }
}
