//! Read-through freshness cache with an in-memory LRU tier and a JSON disk tier
//!
//! - Memory tier: bounded LRU, lost when the process exits
//! - Disk tier: optional, one JSON file per key, survives restarts
//!
//! Entries carry the time they were stored. A fresh entry is served without
//! calling the fetcher; a stale one is kept and served again if a refetch
//! fails.

use lru::LruCache;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::Display,
    fs,
    future::Future,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use crate::api::types::{Fetched, LeaderboardRow, ParkGameStats};
use crate::cli::types::{MetricKey, Season};
use crate::error::{MbaError, Result};

#[cfg(test)]
mod tests;

/// Directory name used under the platform cache dir.
pub const CACHE_DIR_NAME: &str = "mba-stats";

/// `~/.cache/mba-stats` (or the platform equivalent).
pub fn default_cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .ok_or(MbaError::NoCacheDir)?;
    Ok(base.join(CACHE_DIR_NAME))
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Key usable for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// String form used as the disk file stem. Must be filesystem safe.
    fn to_file_key(&self) -> String;
}

fn file_safe(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Park stats for one player name or uuid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParkStatsKey {
    pub identifier: String,
    pub season: u16,
}

impl ParkStatsKey {
    pub fn new(identifier: &str, season: u16) -> Self {
        Self {
            identifier: identifier.trim().to_lowercase(),
            season,
        }
    }
}

impl CacheKey for ParkStatsKey {
    fn to_file_key(&self) -> String {
        format!("park_stats_{}_s{}", file_safe(&self.identifier), self.season)
    }
}

/// Every player's park stats for one season
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllParkStatsKey {
    pub season: u16,
}

impl CacheKey for AllParkStatsKey {
    fn to_file_key(&self) -> String {
        format!("park_stats_all_s{}", self.season)
    }
}

/// Remote leaderboard query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardKey {
    pub metric: MetricKey,
    pub season: Option<Season>,
    pub limit: usize,
}

impl CacheKey for LeaderboardKey {
    fn to_file_key(&self) -> String {
        let season = self
            .season
            .as_ref()
            .map(|s| file_safe(s.as_str()))
            .unwrap_or_else(|| "all".to_string());
        format!("leaderboard_{}_{}_n{}", self.metric.code(), season, self.limit)
    }
}

/// A cached value and when it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    pub key: String,
    pub payload: V,
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    /// Fresh while less than `ttl` has passed since it was stored.
    pub fn is_fresh(&self, now_millis: u64, ttl: Duration) -> bool {
        let age = now_millis.saturating_sub(self.stored_at);
        u128::from(age) < ttl.as_millis()
    }
}

type KeyLock = Arc<tokio::sync::Mutex<()>>;

/// Holds a key's in-flight lock and drops it from the map once the last
/// holder leaves, including when the owning future is cancelled.
struct KeyLockGuard<'a, K: CacheKey> {
    in_flight: &'a Mutex<HashMap<K, KeyLock>>,
    key: &'a K,
    lock: Option<KeyLock>,
}

impl<'a, K: CacheKey> KeyLockGuard<'a, K> {
    fn acquire(in_flight: &'a Mutex<HashMap<K, KeyLock>>, key: &'a K) -> Self {
        let lock = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone();
        Self {
            in_flight,
            key,
            lock: Some(lock),
        }
    }

    async fn wait(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}

impl<K: CacheKey> Drop for KeyLockGuard<'_, K> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.lock.take());
        // Only the map still holds it: nobody else is waiting.
        if in_flight
            .get(self.key)
            .is_some_and(|l| Arc::strong_count(l) == 1)
        {
            in_flight.remove(self.key);
        }
    }
}

/// Read-through cache keyed by `K` holding values of `V`.
pub struct FreshnessCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    memory_cache: Mutex<LruCache<K, CacheEntry<V>>>,
    memory_capacity: usize,
    disk_dir: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    in_flight: Mutex<HashMap<K, KeyLock>>,
}

impl<K, V> FreshnessCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Memory-only cache on the wall clock.
    pub fn new(memory_capacity: usize) -> Self {
        Self::with_clock(memory_capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(memory_capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(capacity)),
            memory_capacity: capacity.get(),
            disk_dir: None,
            clock,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Persist entries as JSON files under `dir`.
    pub fn with_disk_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.disk_dir = Some(dir.into());
        self
    }

    /// Return the cached value for `key` if fresh, otherwise call `fetch`.
    ///
    /// On fetch failure a previously stored value, however old, is returned
    /// instead of the error. Only when nothing was ever stored does the
    /// error reach the caller. Concurrent calls for the same key share one
    /// fetch.
    pub async fn read_through<F, Fut, E>(
        &self,
        key: &K,
        ttl: Duration,
        fetch: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: Display,
    {
        if let Some(value) = self.get_fresh(key, ttl) {
            return Ok(value);
        }

        let in_flight = KeyLockGuard::acquire(&self.in_flight, key);
        let _guard = in_flight.wait().await;

        // Another caller may have filled the entry while we waited.
        if let Some(value) = self.get_fresh(key, ttl) {
            return Ok(value);
        }

        match fetch().await {
            Ok(value) => {
                self.put(key.clone(), value.clone());
                Ok(value)
            }
            Err(e) => match self.lookup(key) {
                Some(entry) => {
                    warn!(
                        key = %key.to_file_key(),
                        error = %e,
                        "fetch failed, serving stale cache entry"
                    );
                    Ok(entry.payload)
                }
                None => Err(e),
            },
        }
    }

    /// Call `fetch` even if the stored value is fresh.
    ///
    /// A failed refetch still falls back to the stored value, which is kept.
    pub async fn refresh<F, Fut, E>(&self, key: &K, fetch: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: Display,
    {
        self.read_through(key, Duration::ZERO, fetch).await
    }

    /// Fresh value for `key`, if any.
    pub fn get_fresh(&self, key: &K, ttl: Duration) -> Option<V> {
        let now = self.clock.now_millis();
        self.lookup(key)
            .filter(|entry| entry.is_fresh(now, ttl))
            .map(|entry| entry.payload)
    }

    /// Store `value` for `key`, stamped with the current time.
    pub fn put(&self, key: K, value: V) {
        let entry = CacheEntry {
            key: key.to_file_key(),
            payload: value,
            stored_at: self.clock.now_millis(),
        };

        if let Err(e) = self.put_to_disk(&key, &entry) {
            debug!(key = %entry.key, error = %e, "disk cache write failed");
        }

        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, entry);
    }

    /// Entry for `key` regardless of age (memory first, then disk).
    pub fn lookup(&self, key: &K) -> Option<CacheEntry<V>> {
        if let Some(entry) = self
            .memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Some(entry.clone());
        }

        let entry = self.get_from_disk(key)?;
        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key.clone(), entry.clone());
        Some(entry)
    }

    fn disk_path(&self, key: &K) -> Option<PathBuf> {
        self.disk_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", key.to_file_key())))
    }

    fn get_from_disk(&self, key: &K) -> Option<CacheEntry<V>> {
        let path = self.disk_path(key)?;
        let content = try_read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable cache file");
                None
            }
        }
    }

    fn put_to_disk(&self, key: &K, entry: &CacheEntry<V>) -> Result<()> {
        let Some(path) = self.disk_path(key) else {
            return Ok(());
        };
        let content = serde_json::to_string(entry)?;
        write_string(&path, &content)?;
        Ok(())
    }

    /// Clear the memory tier only (disk entries stay).
    pub fn clear_memory(&self) {
        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drop `key` from both tiers.
    pub fn invalidate(&self, key: &K) -> Result<()> {
        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop(key);
        if let Some(path) = self.disk_path(key) {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// (entries in memory, memory capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        let cache = self.memory_cache.lock().unwrap_or_else(PoisonError::into_inner);
        (cache.len(), self.memory_capacity)
    }
}

/// The caches used by the CLI for remote reads.
pub struct CacheManager {
    pub park_stats: FreshnessCache<ParkStatsKey, Fetched<ParkGameStats>>,
    pub all_park_stats: FreshnessCache<AllParkStatsKey, Vec<ParkGameStats>>,
    pub leaderboard: FreshnessCache<LeaderboardKey, Vec<LeaderboardRow>>,
}

impl CacheManager {
    pub fn new(clock: Arc<dyn Clock>, disk_dir: Option<PathBuf>) -> Self {
        let park_stats = FreshnessCache::with_clock(200, clock.clone());
        let all_park_stats = FreshnessCache::with_clock(10, clock.clone());
        let leaderboard = FreshnessCache::with_clock(50, clock);
        match disk_dir {
            Some(dir) => Self {
                park_stats: park_stats.with_disk_dir(&dir),
                all_park_stats: all_park_stats.with_disk_dir(&dir),
                leaderboard: leaderboard.with_disk_dir(&dir),
            },
            None => Self {
                park_stats,
                all_park_stats,
                leaderboard,
            },
        }
    }

    /// Clear all memory tiers
    pub fn clear_all_memory(&self) {
        self.park_stats.clear_memory();
        self.all_park_stats.clear_memory();
        self.leaderboard.clear_memory();
    }

    /// Memory usage per cache
    pub fn memory_stats(&self) -> HashMap<String, (usize, usize)> {
        let mut stats = HashMap::new();
        stats.insert("park_stats".to_string(), self.park_stats.memory_stats());
        stats.insert(
            "all_park_stats".to_string(),
            self.all_park_stats.memory_stats(),
        );
        stats.insert("leaderboard".to_string(), self.leaderboard.memory_stats());
        stats
    }
}
