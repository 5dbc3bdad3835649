//! TTL cache with lazy expiry
//!
//! There is no background sweep. Every read path compares the entry's
//! expiry against the clock, so expired entries can linger in storage
//! but are never returned.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::clock::{duration_to_ms, Clock, SystemClock};
use crate::config::{clamp_lifetime, CacheConfig};
use crate::stats::CacheStats;

/// Stored value plus the instant it stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    value: V,
    expiry_ms: u64,
}

impl<V> CacheEntry<V> {
    /// Cached value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Absolute expiry time in clock milliseconds
    pub fn expiry_ms(&self) -> u64 {
        self.expiry_ms
    }

    /// Valid up to and including `expiry_ms`
    #[inline]
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        self.expiry_ms >= now_ms
    }
}

/// Keyed cache whose entries expire after a per-entry lifetime
///
/// Keys default to `String`, so `Cache<V>` is a string-keyed cache.
#[derive(Debug)]
pub struct Cache<V, K = String, C = SystemClock> {
    /// Entries, including expired ones nobody has looked at yet
    entries: HashMap<K, CacheEntry<V>, RandomState>,

    /// Per-instance settings
    config: CacheConfig,

    /// Time source for expiry checks
    clock: C,

    /// Cache statistics
    stats: CacheStats,
}

impl<V, K> Cache<V, K, SystemClock>
where
    K: Eq + Hash,
{
    /// Create a wall-clock cache with no default lifetime
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a wall-clock cache with the given config
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, K> Default for Cache<V, K, SystemClock>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K, C> Cache<V, K, C>
where
    K: Eq + Hash,
    C: Clock,
{
    /// Create a cache driven by `clock`
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: HashMap::with_hasher(RandomState::new()),
            config,
            clock,
            stats: CacheStats::new(),
        }
    }

    /// Get a value if it has not expired
    ///
    /// An expired entry found here is removed from the cache.
    pub fn get<Q>(&mut self, name: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();

        let valid = match self.entries.get(name) {
            Some(entry) => entry.is_valid_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !valid {
            self.entries.remove(name);
            self.stats.record_expiration();
            self.stats.record_miss();
            trace!(now_ms = now, "Evicted expired cache entry on read");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(name).map(|entry| &entry.value)
    }

    /// Insert or overwrite an entry
    ///
    /// `lifetime_ms` falls back to the configured default, then to zero.
    /// Negative lifetimes are clamped to zero.
    pub fn set(&mut self, name: K, value: V, lifetime_ms: Option<i64>) {
        let lifetime_ms = match lifetime_ms {
            Some(ms) => clamp_lifetime(ms),
            None => self.config.default_lifetime_ms.unwrap_or(0),
        };
        self.insert_entry(name, value, lifetime_ms);
    }

    /// Insert or overwrite an entry that lives for `lifetime`
    pub fn set_for(&mut self, name: K, value: V, lifetime: Duration) {
        self.insert_entry(name, value, duration_to_ms(lifetime));
    }

    /// Remove an entry whether or not it has expired
    pub fn remove<Q>(&mut self, name: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(name).map(|entry| entry.value)
    }

    /// Drop every expired entry and return how many were dropped
    pub fn purge(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| entry.is_valid_at(now));

        let removed = before - self.entries.len();
        self.stats.record_purged(removed as u64);
        debug!(removed, remaining = self.entries.len(), "Purged expired cache entries");
        removed
    }

    /// Drop every entry, valid or not
    pub fn wipe(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        debug!(count, "Wiped cache");
    }

    /// Iterate over the entries that are valid right now
    ///
    /// Unlike [`get`](Self::get), this never evicts.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let now = self.clock.now_ms();
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.is_valid_at(now))
            .map(|(name, entry)| (name, &entry.value))
    }

    /// Copy out the `(name, value)` pairs that are valid right now
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Check for a valid entry without evicting
    pub fn contains_key<Q>(&self, name: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.entries
            .get(name)
            .is_some_and(|entry| entry.is_valid_at(now))
    }

    /// Raw stored entry, expired or not; never evicts
    pub fn peek_entry<Q>(&self, name: &Q) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(name)
    }

    /// Whether any entry is still valid
    pub fn has_unexpired_entries(&self) -> bool {
        let now = self.clock.now_ms();
        self.entries.values().any(|entry| entry.is_valid_at(now))
    }

    /// True when no entry is valid, even if expired ones are still stored
    pub fn is_empty(&self) -> bool {
        !self.has_unexpired_entries()
    }

    /// Number of stored entries, counting expired ones not yet evicted
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get cache config
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get the clock driving expiry
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn insert_entry(&mut self, name: K, value: V, lifetime_ms: u64) {
        let expiry_ms = self.clock.now_ms().saturating_add(lifetime_ms);
        self.entries.insert(name, CacheEntry { value, expiry_ms });
        self.stats.record_insert();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn frozen_cache(config: CacheConfig) -> (Cache<i32, String, ManualClock>, ManualClock) {
        init_tracing();
        let clock = ManualClock::new(1_000_000);
        (Cache::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn test_existing_entry_is_returned() {
        let (mut cache, _) = frozen_cache(CacheConfig::new());

        cache.set("something".to_string(), 100, Some(10_000));

        assert_eq!(cache.get("something"), Some(&100));
        assert_eq!(cache.stats().hits(), 1);
    }

    #[test]
    fn test_missing_entry() {
        let (mut cache, _) = frozen_cache(CacheConfig::new());

        assert_eq!(cache.get("something"), None);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_get() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 7, Some(1_000));
        assert_eq!(cache.get("k"), Some(&7));

        clock.advance(1_001);

        assert_eq!(cache.stored_len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.stored_len(), 0);
        assert!(cache.peek_entry("k").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations(), 1);
    }

    #[test]
    fn test_entry_valid_at_exact_expiry() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 7, Some(1_000));
        clock.advance(1_000);

        assert_eq!(cache.get("k"), Some(&7));
    }

    #[test]
    fn test_overwrite_resets_lifetime() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, Some(100));
        clock.advance(50);
        cache.set("k".to_string(), 2, Some(100));
        clock.advance(80);

        assert_eq!(cache.get("k"), Some(&2));
        assert_eq!(cache.stored_len(), 1);
    }

    #[test]
    fn test_no_lifetime_no_default_expires_on_next_tick() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, None);
        assert_eq!(cache.peek_entry("k").map(CacheEntry::expiry_ms), Some(clock.now_ms()));

        // Still readable within the same millisecond.
        assert_eq!(cache.get("k"), Some(&1));

        clock.advance(1);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_default_lifetime_applies() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new().with_default_lifetime_ms(500));

        cache.set("k".to_string(), 1, None);
        clock.advance(500);
        assert_eq!(cache.get("k"), Some(&1));

        clock.advance(1);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_explicit_lifetime_beats_default() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new().with_default_lifetime_ms(10));

        cache.set("k".to_string(), 1, Some(1_000));
        clock.advance(100);

        assert_eq!(cache.get("k"), Some(&1));
    }

    #[test]
    fn test_negative_lifetime_clamps_to_zero() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, Some(-5_000));

        assert_eq!(cache.peek_entry("k").map(CacheEntry::expiry_ms), Some(clock.now_ms()));
        clock.advance(1);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_set_for_duration() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set_for("k".to_string(), 1, Duration::from_secs(2));
        clock.advance_by(Duration::from_millis(1_999));
        assert_eq!(cache.get("k"), Some(&1));

        clock.advance(2);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_remove() {
        let (mut cache, _) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, Some(1_000));

        assert_eq!(cache.remove("k"), Some(1));
        assert_eq!(cache.remove("k"), None);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_purge_removes_only_expired() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("something".to_string(), 100, Some(500));
        cache.set("else".to_string(), 50, Some(10_000));

        clock.advance(600);
        assert_eq!(cache.purge(), 1);

        assert_eq!(cache.stored_len(), 1);
        assert!(cache.peek_entry("something").is_none());
        assert_eq!(cache.get("else"), Some(&50));
        assert_eq!(cache.stats().purged(), 1);
        assert_eq!(cache.stats().expirations(), 0);
    }

    #[test]
    fn test_purge_keeps_entry_at_exact_expiry() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, Some(500));
        clock.advance(500);

        assert_eq!(cache.purge(), 0);
        assert_eq!(cache.get("k"), Some(&1));
    }

    #[test]
    fn test_wipe_removes_everything() {
        let (mut cache, _) = frozen_cache(CacheConfig::new());
        let keys = ["something", "else", "another", "thing"];

        for (i, key) in keys.iter().enumerate() {
            cache.set(key.to_string(), 100, Some(i as i64 * 1_000));
        }
        cache.wipe();

        assert_eq!(cache.stored_len(), 0);
        for key in keys {
            assert_eq!(cache.get(key), None);
        }
    }

    #[test]
    fn test_to_vec_lists_valid_without_evicting() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());

        cache.set("short".to_string(), 1, Some(100));
        cache.set("long".to_string(), 2, Some(10_000));
        clock.advance(200);

        let entries = cache.to_vec();

        assert_eq!(entries, vec![("long".to_string(), 2)]);
        assert_eq!(cache.stored_len(), 2);
        assert!(cache.contains_key("long"));
        assert!(!cache.contains_key("short"));
        assert_eq!(cache.stored_len(), 2);
    }

    #[test]
    fn test_is_empty_tracks_time() {
        let (mut cache, clock) = frozen_cache(CacheConfig::new());
        assert!(cache.is_empty());

        cache.set("a".to_string(), 1, Some(100));
        cache.set("b".to_string(), 2, Some(300));
        assert!(!cache.is_empty());
        assert!(cache.has_unexpired_entries());

        clock.advance(200);
        assert!(!cache.is_empty());

        clock.advance(200);
        assert!(cache.is_empty());
        assert!(!cache.has_unexpired_entries());
        assert_eq!(cache.stored_len(), 2);
    }

    #[test]
    fn test_integer_keys() {
        let clock = ManualClock::new(0);
        let mut cache: Cache<&str, u64, _> = Cache::with_clock(CacheConfig::new(), &clock);

        cache.set(1, "one", Some(10));
        clock.advance(5);

        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.clock().now_ms(), 5);
    }

    #[test]
    fn test_system_clock_cache() {
        let mut cache: Cache<i32> = Cache::new();

        cache.set("k".to_string(), 1, Some(60_000));

        assert_eq!(cache.get("k"), Some(&1));
        assert_eq!(cache.config(), &CacheConfig::default());
    }

    #[test]
    fn test_string_keys_by_default() {
        let clock = ManualClock::new(0);
        let mut cache: Cache<i32, String, _> = Cache::with_clock(CacheConfig::new(), &clock);
        cache.set("a".to_string(), 1, Some(100));

        let mut plain: Cache<i32> = Cache::default();
        plain.set(String::from("b"), 2, Some(60_000));

        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(plain.get("b"), Some(&2));
        assert!(plain.contains_key("b"));
        assert_eq!(plain.remove("b"), Some(2));
    }

    #[test]
    fn test_hit_ratio() {
        let (mut cache, _) = frozen_cache(CacheConfig::new());

        cache.set("k".to_string(), 1, Some(1_000));
        cache.get("k");
        cache.get("missing");

        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.stats().hit_ratio(), 0.5);
    }
}
