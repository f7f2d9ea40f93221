//! Sweep Metrics
//!
//! Counters describing sweeper and notification activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sweep counters shared between a collection and its sweeper
#[derive(Debug, Default)]
pub struct SweepStats {
    /// Completed sweeps, background and manual
    sweeps: AtomicU64,
    /// Entries physically removed by sweeps
    evicted: AtomicU64,
    /// Notifications enqueued on the expired-entry channel
    notified: AtomicU64,
    /// Queued notifications discarded to make room for newer ones
    dropped: AtomicU64,
}

/// Point-in-time copy of [`SweepStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStatsSnapshot {
    pub sweeps: u64,
    pub evicted: u64,
    pub notified: u64,
    pub dropped: u64,
}

impl SweepStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished sweep and how many entries it removed
    pub fn record_sweep(&self, evicted: usize) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.evicted.fetch_add(evicted as u64, Ordering::Relaxed);
    }

    pub fn record_notified(&self) {
        self.notified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SweepStatsSnapshot {
        SweepStatsSnapshot {
            sweeps: self.sweeps.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            notified: self.notified.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }

    /// Get a summary line
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        format!(
            "Sweeps: {} | Evicted: {} | Notified: {} | Dropped: {}",
            s.sweeps, s.evicted, s.notified, s.dropped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = SweepStats::new();

        stats.record_sweep(3);
        stats.record_sweep(0);
        stats.record_notified();
        stats.record_notified();
        stats.record_dropped();

        let snap = stats.snapshot();
        assert_eq!(snap.sweeps, 2);
        assert_eq!(snap.evicted, 3);
        assert_eq!(snap.notified, 2);
        assert_eq!(snap.dropped, 1);
        assert!(stats.summary().contains("Evicted: 3"));
    }
}
