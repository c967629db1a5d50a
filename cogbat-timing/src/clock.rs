use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source. Timestamps are nanoseconds from an arbitrary
/// origin and only ever move forward.
pub trait Clock: Clone {
    fn now(&self) -> u64;

    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now().saturating_sub(since) / 1_000_000
    }
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone)]
pub struct MonoClock {
    start: Instant,
}

impl MonoClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonoClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonoClock {
    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}

/// Manually advanced clock for deterministic tests. Clones share the same
/// underlying time, so a test can hold one handle and advance the clock a
/// scheduler owns.
#[derive(Debug, Clone, Default)]
pub struct TestClock {
    now_ns: Arc<AtomicU64>,
}

impl TestClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now_ns.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ns.fetch_add(ms * 1_000_000, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_clock_moves_forward() {
        let clock = MonoClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_clock_clones_share_time() {
        let clock = TestClock::new();
        let handle = clock.clone();
        handle.advance_ms(250);
        assert_eq!(clock.now(), 250 * 1_000_000);
        assert_eq!(clock.elapsed_ms(0), 250);
    }
}
