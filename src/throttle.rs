//! Outbound request spacing for shared public services.
//!
//! Public Nominatim allows at most one request per second and the OSRM demo
//! server asks for similar restraint. A [`Throttle`] serializes callers and
//! sleeps so consecutive request starts are at least `min_interval` apart.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

/// Held for the duration of one outbound request. Other callers block in
/// [`Throttle::acquire`] until it is dropped.
pub struct ThrottlePermit<'a> {
    _guard: MutexGuard<'a, Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_start: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Blocks until this caller may start a request.
    pub fn acquire(&self) -> ThrottlePermit<'_> {
        // A poisoned lock only means another request panicked mid-flight;
        // the timestamp is still usable.
        let mut guard = self
            .last_start
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(last) = *guard {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "throttling outbound request");
                std::thread::sleep(wait);
            }
        }

        *guard = Some(Instant::now());
        ThrottlePermit { _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_acquire_does_not_wait() {
        let throttle = Throttle::new(Duration::from_millis(500));
        let start = Instant::now();
        drop(throttle.acquire());
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn test_consecutive_acquires_are_spaced() {
        let throttle = Throttle::new(Duration::from_millis(60));
        let start = Instant::now();
        drop(throttle.acquire());
        drop(throttle.acquire());
        drop(throttle.acquire());
        assert!(
            start.elapsed() >= Duration::from_millis(120),
            "three starts need two full intervals, got {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn test_zero_interval_never_sleeps() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            drop(throttle.acquire());
        }
        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn test_concurrent_callers_are_serialized() {
        let throttle = std::sync::Arc::new(Throttle::new(Duration::from_millis(40)));
        let start = Instant::now();
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let throttle = std::sync::Arc::clone(&throttle);
                std::thread::spawn(move || drop(throttle.acquire()))
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread");
        }
        assert!(start.elapsed() >= Duration::from_millis(80));
    }
}
