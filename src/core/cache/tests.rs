//! Unit tests for the freshness cache

use super::*;
use crate::core::clock::ManualClock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

const TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TestKey(&'static str);

impl CacheKey for TestKey {
    fn to_file_key(&self) -> String {
        format!("test_{}", self.0)
    }
}

fn cache_at(start: u64) -> (Arc<ManualClock>, FreshnessCache<TestKey, u32>) {
    let clock = Arc::new(ManualClock::new(start));
    let cache = FreshnessCache::with_clock(8, clock.clone());
    (clock, cache)
}

#[cfg(test)]
mod helper_tests {
    use super::*;

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let dir = tempdir().unwrap();
        assert_eq!(try_read_to_string(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("subdir").join("output.json");

        write_string(&file_path, "{}").unwrap();

        assert_eq!(try_read_to_string(&file_path), Some("{}".to_string()));
    }

    #[test]
    fn test_default_cache_dir_ends_with_app_name() {
        if let Ok(dir) = default_cache_dir() {
            assert!(dir.ends_with(CACHE_DIR_NAME));
        }
    }

    #[test]
    fn test_cache_key_generation() {
        let park = ParkStatsKey::new("  Notch ", 2);
        assert_eq!(park.to_file_key(), "park_stats_notch_s2");

        let weird = ParkStatsKey::new("../etc/passwd", 1);
        assert!(!weird.to_file_key().contains('/'));

        let board = LeaderboardKey {
            metric: MetricKey::Assists,
            season: Some(Season::new("S3")),
            limit: 10,
        };
        assert_eq!(board.to_file_key(), "leaderboard_apg_s3_n10");

        let all_seasons = LeaderboardKey {
            season: None,
            ..board
        };
        assert_eq!(all_seasons.to_file_key(), "leaderboard_apg_all_n10");
        assert_eq!(AllParkStatsKey { season: 4 }.to_file_key(), "park_stats_all_s4");
    }

    #[test]
    fn test_entry_freshness_boundary() {
        let entry = CacheEntry {
            key: "k".to_string(),
            payload: 1u32,
            stored_at: 1_000,
        };
        assert!(entry.is_fresh(1_000, TTL));
        assert!(entry.is_fresh(60_999, TTL));
        assert!(!entry.is_fresh(61_000, TTL));
        assert!(!entry.is_fresh(1_000, Duration::ZERO));
    }
}

#[cfg(test)]
mod read_through_tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_hit_does_not_call_fetch() {
        let (clock, cache) = cache_at(10_000);
        let calls = &AtomicUsize::new(0);
        let key = TestKey("a");

        for _ in 0..3 {
            let v = cache
                .read_through(&key, TTL, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, MbaError>(7)
                })
                .await
                .unwrap();
            assert_eq!(v, 7);
            clock.advance(10_000);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched() {
        let (clock, cache) = cache_at(0);
        let key = TestKey("a");

        cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(1) })
            .await
            .unwrap();
        clock.advance(60_000);

        let v = cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(2) })
            .await
            .unwrap();
        assert_eq!(v, 2);
        assert_eq!(cache.lookup(&key).unwrap().stored_at, 60_000);
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_stale_value() {
        let (clock, cache) = cache_at(0);
        let key = TestKey("a");

        cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(41) })
            .await
            .unwrap();
        clock.advance(3_600_000);

        let v = cache
            .read_through(&key, TTL, || async {
                Err::<u32, _>(MbaError::Cache {
                    message: "offline".to_string(),
                })
            })
            .await
            .unwrap();

        assert_eq!(v, 41);
        // The stale entry is kept, not refreshed.
        assert_eq!(cache.lookup(&key).unwrap().stored_at, 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_without_entry_propagates() {
        let (_clock, cache) = cache_at(0);

        let err = cache
            .read_through(&TestKey("a"), TTL, || async {
                Err::<u32, _>(MbaError::Cache {
                    message: "offline".to_string(),
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MbaError::Cache { .. }));
        assert!(cache.lookup(&TestKey("a")).is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_always_fetches() {
        let (_clock, cache) = cache_at(0);
        let calls = &AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .read_through(&TestKey("a"), Duration::ZERO, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, MbaError>(1)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let (_clock, cache) = cache_at(0);
        let calls = &AtomicUsize::new(0);
        let key = TestKey("shared");

        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, MbaError>(99)
        };

        let (a, b, c) = tokio::join!(
            cache.read_through(&key, TTL, fetch),
            cache.read_through(&key, TTL, fetch),
            cache.read_through(&key, TTL, fetch),
        );

        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (99, 99, 99));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.in_flight.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_refetches_fresh_entry() {
        let (_clock, cache) = cache_at(0);
        let key = TestKey("a");

        cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(1) })
            .await
            .unwrap();
        let v = cache
            .refresh(&key, || async { Ok::<_, MbaError>(2) })
            .await
            .unwrap();

        assert_eq!(v, 2);
        assert_eq!(cache.get_fresh(&key, TTL), Some(2));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stored_value() {
        let (_clock, cache) = cache_at(0);
        let key = TestKey("a");

        cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(1) })
            .await
            .unwrap();
        let v = cache
            .refresh(&key, || async {
                Err(MbaError::Cache {
                    message: "offline".to_string(),
                })
            })
            .await
            .unwrap();

        assert_eq!(v, 1);
        let entry = cache.lookup(&key).unwrap();
        assert_eq!((entry.payload, entry.stored_at), (1, 0));
    }

    #[tokio::test]
    async fn test_cancelled_fetch_releases_key_lock() {
        let (_clock, cache) = cache_at(0);
        let key = TestKey("slow");

        let pending = cache.read_through(&key, TTL, || async {
            std::future::pending::<std::result::Result<u32, MbaError>>().await
        });
        let timed_out = tokio::time::timeout(Duration::from_millis(10), pending).await;

        assert!(timed_out.is_err());
        assert!(cache.in_flight.lock().unwrap().is_empty());

        let v = cache
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(5) })
            .await
            .unwrap();
        assert_eq!(v, 5);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_leaves_lock_for_holder() {
        let (_clock, cache) = cache_at(0);
        let key = TestKey("shared");

        let holder = cache.read_through(&key, TTL, || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, MbaError>(3)
        });
        let waiter = tokio::time::timeout(
            Duration::from_millis(5),
            cache.read_through(&key, TTL, || async { Ok::<_, MbaError>(4) }),
        );

        let (held, waited) = tokio::join!(holder, waiter);

        assert_eq!(held.unwrap(), 3);
        assert!(waited.is_err());
        assert!(cache.in_flight.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let (_clock, cache) = cache_at(0);

        let a = cache
            .read_through(&TestKey("a"), TTL, || async { Ok::<_, MbaError>(1) })
            .await
            .unwrap();
        let b = cache
            .read_through(&TestKey("b"), TTL, || async { Ok::<_, MbaError>(2) })
            .await
            .unwrap();

        assert_eq!((a, b), (1, 2));
        assert_eq!(cache.memory_stats(), (2, 8));
    }
}

#[cfg(test)]
mod tier_tests {
    use super::*;

    #[tokio::test]
    async fn test_disk_tier_survives_a_new_cache() {
        let dir = tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(5_000));
        let key = TestKey("persisted");

        let first: FreshnessCache<TestKey, u32> =
            FreshnessCache::with_clock(4, clock.clone()).with_disk_dir(dir.path());
        first
            .read_through(&key, TTL, || async { Ok::<_, MbaError>(12) })
            .await
            .unwrap();
        assert!(dir.path().join("test_persisted.json").exists());

        let second: FreshnessCache<TestKey, u32> =
            FreshnessCache::with_clock(4, clock.clone()).with_disk_dir(dir.path());
        let v = second
            .read_through(&key, TTL, || async {
                Err::<u32, _>(MbaError::Cache {
                    message: "should not be called".to_string(),
                })
            })
            .await
            .unwrap();

        assert_eq!(v, 12);
        assert_eq!(second.memory_stats().0, 1);
    }

    #[test]
    fn test_corrupt_disk_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("test_bad.json"), "not json").unwrap();

        let (_clock, cache) = cache_at(0);
        let cache = cache.with_disk_dir(dir.path());

        assert!(cache.lookup(&TestKey("bad")).is_none());
    }

    #[test]
    fn test_invalidate_removes_both_tiers() {
        let dir = tempdir().unwrap();
        let (_clock, cache) = cache_at(0);
        let cache = cache.with_disk_dir(dir.path());
        let key = TestKey("gone");

        cache.put(key.clone(), 3);
        assert!(dir.path().join("test_gone.json").exists());

        cache.invalidate(&key).unwrap();

        assert!(cache.lookup(&key).is_none());
        assert!(!dir.path().join("test_gone.json").exists());
    }

    #[test]
    fn test_clear_memory_keeps_disk() {
        let dir = tempdir().unwrap();
        let (_clock, cache) = cache_at(0);
        let cache = cache.with_disk_dir(dir.path());

        cache.put(TestKey("kept"), 8);
        cache.clear_memory();
        assert_eq!(cache.memory_stats().0, 0);

        assert_eq!(cache.lookup(&TestKey("kept")).unwrap().payload, 8);
    }

    #[test]
    fn test_memory_tier_is_bounded() {
        let clock = Arc::new(ManualClock::new(0));
        let cache: FreshnessCache<TestKey, u32> = FreshnessCache::with_clock(2, clock);

        cache.put(TestKey("a"), 1);
        cache.put(TestKey("b"), 2);
        cache.put(TestKey("c"), 3);

        assert_eq!(cache.memory_stats(), (2, 2));
        assert!(cache.lookup(&TestKey("a")).is_none());
    }

    #[test]
    fn test_cache_manager_starts_empty() {
        let manager = CacheManager::new(Arc::new(ManualClock::new(0)), None);
        let stats = manager.memory_stats();

        assert!(stats.contains_key("park_stats"));
        assert!(stats.contains_key("all_park_stats"));
        assert!(stats.contains_key("leaderboard"));
        for (_, (used, _capacity)) in stats {
            assert_eq!(used, 0);
        }
    }
}
