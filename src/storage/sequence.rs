//! Expiring Sequence
//!
//! Index-addressable list whose values expire after a time-to-live.

use crossbeam::channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::entry::Entry;
use crate::error::{Result, TtlError};
use crate::metrics::{SweepStats, SweepStatsSnapshot};
use crate::sweeper::{Notifier, Sweep, Sweeper};

/// State shared between the sequence and its sweeper
struct SequenceInner<V> {
    data: Mutex<Vec<Entry<V>>>,
    notifier: Option<Notifier<Entry<V>>>,
    stats: Arc<SweepStats>,
}

impl<V: Send + 'static> Sweep for SequenceInner<V> {
    fn sweep(&self) -> usize {
        let mut data = self.data.lock();
        let now = Instant::now();

        let (live, expired): (Vec<_>, Vec<_>) = std::mem::take(&mut *data)
            .into_iter()
            .partition(|entry| !entry.is_expired_at(now));
        *data = live;

        let removed = expired.len();
        if let Some(notifier) = &self.notifier {
            for entry in expired {
                notifier.push(entry);
            }
        }
        self.stats.record_sweep(removed);
        removed
    }
}

/// Ordered list of values that expire after a time-to-live
///
/// Expired values stay in their slot until the next sweep: they are hidden
/// from [`size`](Self::size) and [`get_all`](Self::get_all) but still occupy
/// an index, and [`get`](Self::get) reports them as [`TtlError::Expired`].
///
/// Each sequence runs its own sweeper thread, stopped by
/// [`discard`](Self::discard) or when the sequence is dropped.
///
/// # Example
///
/// ```rust
/// use ttl_collections::{ExpiringSequence, TtlError};
/// use std::time::Duration;
///
/// let list = ExpiringSequence::new(Duration::from_secs(30));
/// list.add("first");
/// list.add("second");
///
/// assert_eq!(list.get(1), Ok("second"));
/// list.del(0).unwrap();
/// assert_eq!(list.get(0), Ok("second"));
/// assert_eq!(list.get(1), Err(TtlError::IndexOutOfBound));
///
/// list.discard();
/// ```
pub struct ExpiringSequence<V: Send + 'static> {
    inner: Arc<SequenceInner<V>>,
    default_ttl: Duration,
    config: Config,
    sweeper: Sweeper,
}

impl<V: Send + 'static> ExpiringSequence<V> {
    /// Create a sequence with the default configuration
    ///
    /// # Panics
    ///
    /// Panics if the sweeper thread cannot be spawned.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_config(default_ttl, Config::default())
    }

    /// Create a sequence with a custom sweep interval and notification buffer
    ///
    /// # Panics
    ///
    /// Panics if the sweeper thread cannot be spawned.
    pub fn with_config(default_ttl: Duration, config: Config) -> Self {
        let stats = Arc::new(SweepStats::new());
        let inner = Arc::new(SequenceInner {
            data: Mutex::new(Vec::new()),
            notifier: Notifier::from_config(&config, Arc::clone(&stats)),
            stats,
        });

        let sweeper = Sweeper::spawn(
            "ttl-sweeper-sequence",
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

    /// Append a value at the tail
    pub fn add(&self, value: V) {
        let entry = Entry::with_ttl(value, self.default_ttl);
        self.inner.data.lock().push(entry);
    }

    /// Remove the slot at `index`, shifting later slots one position left
    pub fn del(&self, index: usize) -> Result<()> {
        let mut data = self.inner.data.lock();
        if index >= data.len() {
            return Err(TtlError::IndexOutOfBound);
        }
        data.remove(index);
        Ok(())
    }

    /// Remove every entry, live or expired
    pub fn clear(&self) {
        self.inner.data.lock().clear();
    }

    /// Number of live entries
    pub fn size(&self) -> usize {
        let data = self.inner.data.lock();
        let now = Instant::now();
        data.iter().filter(|entry| !entry.is_expired_at(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of occupied slots, including expired entries not yet swept
    pub fn raw_len(&self) -> usize {
        self.inner.data.lock().len()
    }

    /// Receiver for entries removed by sweeps, `None` if notifications are disabled
    pub fn expired_entries(&self) -> Option<Receiver<Entry<V>>> {
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
        *data = Vec::new();
        debug!("Discarded sequence: {}", self.inner.stats.summary());
    }
}

impl<V: Clone + Send + 'static> ExpiringSequence<V> {
    /// Get the value at `index`
    ///
    /// Fails with [`TtlError::IndexOutOfBound`] past the physical end and
    /// with [`TtlError::Expired`] when the slot is present but expired.
    pub fn get(&self, index: usize) -> Result<V> {
        let data = self.inner.data.lock();
        let entry = data.get(index).ok_or(TtlError::IndexOutOfBound)?;
        if entry.is_expired_at(Instant::now()) {
            return Err(TtlError::Expired);
        }
        Ok(entry.value().clone())
    }

    /// Snapshot of all live values in insertion order
    pub fn get_all(&self) -> Vec<V> {
        let data = self.inner.data.lock();
        let now = Instant::now();
        data.iter()
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value().clone())
            .collect()
    }
}
