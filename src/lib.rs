//! ttl-collections - In-Memory Expiring Collections
//!
//! A sequence and a mapping whose entries expire after a time-to-live.
//! Expired entries disappear from reads immediately and are physically
//! removed by a per-collection sweeper thread, which can report them on a
//! bounded channel.
//!
//! ```rust
//! use ttl_collections::{Config, ExpiringMapping};
//! use std::time::Duration;
//!
//! let config = Config::default()
//!     .with_sweep_interval(Duration::from_secs(5))
//!     .with_notification_buffer_size(64);
//! let seen = ExpiringMapping::with_config(Duration::from_secs(30), config);
//!
//! seen.add("request-42", ());
//! assert!(seen.contains(&"request-42"));
//!
//! let _expired = seen.expired_entries();
//! seen.discard();
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod metrics;
pub mod storage;
pub mod sweeper;

pub use config::{Config, DEFAULT_MAPPING_NOTIFICATION_BUFFER, DEFAULT_SWEEP_INTERVAL};
pub use entry::Entry;
pub use error::{Result, TtlError};
pub use metrics::{SweepStats, SweepStatsSnapshot};
pub use storage::{ExpiringMapping, ExpiringSequence};
