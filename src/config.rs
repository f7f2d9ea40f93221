//! Collection Configuration

use std::time::Duration;

/// How often the sweeper runs when no interval is configured
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Notification buffer used by `ExpiringMapping::new`
pub const DEFAULT_MAPPING_NOTIFICATION_BUFFER: usize = 100;

/// Per-collection configuration, fixed at construction
///
/// # Example
///
/// ```rust
/// use ttl_collections::Config;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_sweep_interval(Duration::from_millis(200))
///     .with_notification_buffer_size(16);
/// assert_eq!(config.notification_buffer_size, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval between sweeps of expired entries (default: 60 seconds).
    /// Very short intervals over large collections cost CPU while holding the lock.
    pub sweep_interval: Duration,

    /// Capacity of the expired-entry channel (0 = notifications disabled)
    pub notification_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            notification_buffer_size: 0,
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep interval
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Set the expired-entry channel capacity
    pub fn with_notification_buffer_size(mut self, size: usize) -> Self {
        self.notification_buffer_size = size;
        self
    }

    /// Whether swept entries are reported on a channel
    pub fn notifications_enabled(&self) -> bool {
        self.notification_buffer_size > 0
    }
}
