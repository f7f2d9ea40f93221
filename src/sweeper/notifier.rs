//! Expired-Entry Notifier
//!
//! Bounded, lossy queue carrying swept entries to an observer.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError, TrySendError};
use std::sync::Arc;
use tracing::trace;

use crate::config::Config;
use crate::metrics::SweepStats;

/// Bounded notification queue with evict-oldest overflow
///
/// Uses a crossbeam bounded channel. The notifier keeps its own receiver
/// handle so that, when the channel is full, it can pull the oldest item
/// out before enqueueing the newest one. Pushing never blocks.
///
/// The sweep is the only producer and pushes while holding the collection
/// lock, so a slot freed by `try_recv` cannot be taken by anyone else.
pub struct Notifier<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
    capacity: usize,
    stats: Arc<SweepStats>,
}

impl<T> Notifier<T> {
    /// Create a notifier when `config` enables notifications
    pub fn from_config(config: &Config, stats: Arc<SweepStats>) -> Option<Self> {
        config
            .notifications_enabled()
            .then(|| Self::new(config.notification_buffer_size, stats))
    }

    /// Create a notifier holding at most `capacity` items (at least one)
    pub fn new(capacity: usize, stats: Arc<SweepStats>) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = channel::bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
            stats,
        }
    }

    /// Get a receiver handle for observers
    pub fn subscribe(&self) -> Receiver<T> {
        self.receiver.clone()
    }

    /// Enqueue an item, discarding the oldest queued items while full
    pub fn push(&self, mut item: T) {
        loop {
            match self.sender.try_send(item) {
                Ok(()) => {
                    self.stats.record_notified();
                    return;
                }
                Err(TrySendError::Full(rejected)) => {
                    item = rejected;
                    match self.receiver.try_recv() {
                        Ok(_oldest) => {
                            self.stats.record_dropped();
                            trace!(capacity = self.capacity, "Dropped oldest expired-entry notification");
                        }
                        // An observer drained it first; retry
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => return,
                    }
                }
                // Unreachable while we hold a receiver
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    /// Get current queue length (approximate)
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_from_config_respects_buffer_size() {
        let stats = Arc::new(SweepStats::new());
        assert!(Notifier::<u32>::from_config(&Config::default(), Arc::clone(&stats)).is_none());

        let config = Config::default().with_notification_buffer_size(5);
        let notifier = Notifier::<u32>::from_config(&config, stats).unwrap();
        assert_eq!(notifier.capacity(), 5);
    }

    #[test]
    fn test_overflow_keeps_most_recent() {
        let stats = Arc::new(SweepStats::new());
        let notifier = Notifier::new(3, Arc::clone(&stats));
        let rx = notifier.subscribe();

        for i in 0..10 {
            notifier.push(i);
        }

        assert_eq!(notifier.len(), 3);
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![7, 8, 9]);

        let snap = stats.snapshot();
        assert_eq!(snap.notified, 10);
        assert_eq!(snap.dropped, 7);
    }

    #[test]
    fn test_push_never_blocks_with_concurrent_consumer() {
        let stats = Arc::new(SweepStats::new());
        let notifier = Notifier::new(4, stats);
        let rx = notifier.subscribe();

        let consumer = thread::spawn(move || {
            let mut seen = 0;
            while rx.recv_timeout(std::time::Duration::from_millis(200)).is_ok() {
                seen += 1;
            }
            seen
        });

        for i in 0..1000 {
            notifier.push(i);
        }

        drop(notifier);
        let seen = consumer.join().unwrap();
        assert!(seen >= 1);
        assert!(seen <= 1000);
    }
}
