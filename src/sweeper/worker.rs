//! Sweeper Thread
//!
//! Background thread that periodically removes expired entries.

use crossbeam::channel::{self, select, Sender};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Smallest interval the ticker is driven with
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Storage that can evict its own expired entries
pub trait Sweep: Send + Sync + 'static {
    /// Remove expired entries, returning how many were removed
    fn sweep(&self) -> usize;
}

/// Handle to a running sweeper thread
///
/// The thread is stopped and joined by [`Sweeper::stop`] or when the handle
/// is dropped.
pub struct Sweeper {
    name: String,
    shutdown_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawn a named sweeper thread over `target`
    pub fn spawn<S: Sweep>(name: &str, target: Arc<S>, interval: Duration) -> io::Result<Self> {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let (shutdown_tx, shutdown_rx) = channel::bounded::<()>(1);

        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let ticker = channel::tick(interval);
                info!("{} started, interval: {:?}", thread_name, interval);

                loop {
                    select! {
                        recv(ticker) -> _ => {
                            let removed = target.sweep();
                            if removed > 0 {
                                debug!(removed = removed, "Swept expired entries");
                            }
                        }
                        recv(shutdown_rx) -> _ => break,
                    }
                }

                info!("{} stopped", thread_name);
            })?;

        Ok(Self {
            name: name.to_string(),
            shutdown_tx,
            handle: Some(handle),
        })
    }

    /// Signal the thread to exit and wait for it. Calling again is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.shutdown_tx.send(());
            if handle.join().is_err() {
                debug!("{} panicked before shutdown", self.name);
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingTarget {
        calls: AtomicUsize,
    }

    impl Sweep for CountingTarget {
        fn sweep(&self) -> usize {
            self.calls.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    #[test]
    fn test_sweeps_on_interval() {
        let target = Arc::new(CountingTarget::default());
        let mut sweeper =
            Sweeper::spawn("test-sweeper", Arc::clone(&target), Duration::from_millis(20)).unwrap();

        thread::sleep(Duration::from_millis(200));
        sweeper.stop();

        assert!(target.calls.load(Ordering::SeqCst) >= 2);
        assert!(sweeper.handle.is_none());
    }

    #[test]
    fn test_stop_halts_sweeping() {
        let target = Arc::new(CountingTarget::default());
        let mut sweeper =
            Sweeper::spawn("test-sweeper", Arc::clone(&target), Duration::from_millis(10)).unwrap();

        thread::sleep(Duration::from_millis(50));
        sweeper.stop();
        let after_stop = target.calls.load(Ordering::SeqCst);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(target.calls.load(Ordering::SeqCst), after_stop);

        // Second stop is harmless
        sweeper.stop();
    }

    #[test]
    fn test_drop_releases_target() {
        let target = Arc::new(CountingTarget::default());
        let sweeper =
            Sweeper::spawn("test-sweeper", Arc::clone(&target), Duration::from_secs(60)).unwrap();

        assert_eq!(Arc::strong_count(&target), 2);
        drop(sweeper);
        assert_eq!(Arc::strong_count(&target), 1);
    }
}
