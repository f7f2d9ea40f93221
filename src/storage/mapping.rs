//! Expiring Mapping
//!
//! Key-value store whose entries expire after a per-entry time-to-live.

use crossbeam::channel::Receiver;
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::{Config, DEFAULT_MAPPING_NOTIFICATION_BUFFER};
use crate::entry::Entry;
use crate::error::{Result, TtlError};
use crate::metrics::{SweepStats, SweepStatsSnapshot};
use crate::sweeper::{Notifier, Sweep, Sweeper};

/// State shared between the mapping and its sweeper
struct MappingInner<K, V> {
    data: Mutex<HashMap<K, Entry<V>>>,
    notifier: Option<Notifier<(K, Entry<V>)>>,
    stats: Arc<SweepStats>,
}

impl<K, V> Sweep for MappingInner<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    fn sweep(&self) -> usize {
        let mut data = self.data.lock();
        let now = Instant::now();

        let mut removed = 0;
        for (key, entry) in data.extract_if(|_, entry| entry.is_expired_at(now)) {
            removed += 1;
            if let Some(notifier) = &self.notifier {
                notifier.push((key, entry));
            }
        }
        self.stats.record_sweep(removed);
        removed
    }
}

/// Key-value store whose entries expire after a time-to-live
///
/// Every entry carries its own expiry, so one mapping can hold values with
/// different lifetimes via [`add_with_duration`](Self::add_with_duration).
/// Expired entries are treated as absent by every read and removed by the
/// background sweeper, which also reports them on the
/// [`expired_entries`](Self::expired_entries) channel.
///
/// # Example
///
/// ```rust
/// use ttl_collections::{ExpiringMapping, TtlError};
/// use std::time::Duration;
///
/// let sessions = ExpiringMapping::new(Duration::from_secs(60));
/// sessions.add("alice", 1);
/// sessions.add_with_duration("bob", 2, Duration::from_secs(300));
///
/// assert_eq!(sessions.get(&"alice"), Ok(1));
/// assert!(sessions.contains(&"bob"));
/// assert_eq!(sessions.get(&"carol"), Err(TtlError::KeyNotFound));
///
/// sessions.discard();
/// ```
pub struct ExpiringMapping<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    inner: Arc<MappingInner<K, V>>,
    default_ttl: Duration,
    config: Config,
    sweeper: Sweeper,
}

impl<K, V> ExpiringMapping<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    /// Create a mapping with a 60 second sweep and a small notification buffer
    ///
    /// # Panics
    ///
    /// Panics if the sweeper thread cannot be spawned.
    pub fn new(default_ttl: Duration) -> Self {
        let config =
            Config::default().with_notification_buffer_size(DEFAULT_MAPPING_NOTIFICATION_BUFFER);
        Self::with_config(default_ttl, config)
    }

    /// Create a mapping with a custom sweep interval and notification buffer
    ///
    /// # Panics
    ///
    /// Panics if the sweeper thread cannot be spawned.
    pub fn with_config(default_ttl: Duration, config: Config) -> Self {
        let stats = Arc::new(SweepStats::new());
        let inner = Arc::new(MappingInner {
            data: Mutex::new(HashMap::new()),
            notifier: Notifier::from_config(&config, Arc::clone(&stats)),
            stats,
        });

        let sweeper = Sweeper::spawn(
            "ttl-sweeper-mapping",
            Arc::clone(&inner),
            config.sweep_interval,
        )
        .expect("Failed to spawn sweeper thread");

        Self {
            inner,
            default_ttl,
            config,
            sweeper,
        }
    }

    /// Insert or overwrite `key` using the default TTL
    pub fn add(&self, key: K, value: V) {
        self.add_with_duration(key, value, self.default_ttl);
    }

    /// Insert or overwrite `key` with its own TTL
    pub fn add_with_duration(&self, key: K, value: V, ttl: Duration) {
        let entry = Entry::with_ttl(value, ttl);
        self.inner.data.lock().insert(key, entry);
    }

    /// Remove a live key. Expired keys report `KeyNotFound` and are left to the sweeper.
    pub fn del(&self, key: &K) -> Result<()> {
        let mut data = self.inner.data.lock();
        let live = data
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(Instant::now()));
        if !live {
            return Err(TtlError::KeyNotFound);
        }
        data.remove(key);
        Ok(())
    }

    /// True if `key` is present and not expired
    pub fn contains(&self, key: &K) -> bool {
        let data = self.inner.data.lock();
        data.get(key)
            .is_some_and(|entry| !entry.is_expired_at(Instant::now()))
    }

    /// Number of live entries
    pub fn size(&self) -> usize {
        let data = self.inner.data.lock();
        let now = Instant::now();
        data.values().filter(|entry| !entry.is_expired_at(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of stored entries, including expired entries not yet swept
    pub fn raw_len(&self) -> usize {
        self.inner.data.lock().len()
    }

    /// Remove every entry, live or expired
    pub fn clear(&self) {
        self.inner.data.lock().clear();
    }

    /// Receiver for `(key, entry)` pairs removed by sweeps, `None` if notifications are disabled
    pub fn expired_entries(&self) -> Option<Receiver<(K, Entry<V>)>> {
        self.inner.notifier.as_ref().map(Notifier::subscribe)
    }

    /// Run a sweep on the calling thread, returning how many entries it removed
    pub fn sweep_now(&self) -> usize {
        self.inner.sweep()
    }

    pub fn stats(&self) -> SweepStatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stop the sweeper and release storage
    pub fn discard(mut self) {
        self.sweeper.stop();
        let mut data = self.inner.data.lock();
        *data = HashMap::new();
        debug!("Discarded mapping: {}", self.inner.stats.summary());
    }
}

impl<K, V> ExpiringMapping<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Get the value for `key`; expired and absent keys both fail with `KeyNotFound`
    pub fn get(&self, key: &K) -> Result<V> {
        let data = self.inner.data.lock();
        match data.get(key) {
            Some(entry) if !entry.is_expired_at(Instant::now()) => Ok(entry.value().clone()),
            _ => Err(TtlError::KeyNotFound),
        }
    }
}
