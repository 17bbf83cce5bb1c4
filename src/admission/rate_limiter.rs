use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use crate::interfaces::clock::Clock;
use crate::types::timestamp::SystemClock;

/// Snapshot of one key's window, taken under a single lock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Admission {
    pub allowed: bool,
    pub remaining: usize,
    /// Seconds until the oldest stored entry leaves the window.
    pub retry_after: f64,
}

impl Admission {
    /// `retry_after` rounded up to whole seconds.
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after.max(0.0).ceil() as u64
    }
}

/// Request timestamps for one key, oldest at the front.
#[derive(Debug, Default)]
struct Window {
    timestamps: VecDeque<f64>,
}

impl Window {
    /// Evict everything older than `now - span`. Returns how many entries were dropped.
    fn purge(&mut self, now: f64, span: f64) -> usize {
        let before = self.timestamps.len();

        // Entries stamped after `now` mean the clock went backwards
        while let Some(&back) = self.timestamps.back() {
            if back > now {
                self.timestamps.pop_back();
            } else {
                break;
            }
        }
        if self.timestamps.len() != before {
            tracing::warn!(
                "Clock regression: dropped {} future entries (now={})",
                before - self.timestamps.len(),
                now
            );
        }

        // Remove old timestamps
        let cutoff = now - span;
        while let Some(&front) = self.timestamps.front() {
            if front < cutoff {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }

        before - self.timestamps.len()
    }

    fn len(&self) -> usize {
        self.timestamps.len()
    }

    fn block_time(&self, now: f64, span: f64) -> f64 {
        match self.timestamps.front() {
            Some(&oldest) => (span - (now - oldest)).max(0.0),
            None => 0.0,
        }
    }
}

/// Sliding-window rate limiter keyed by an opaque string.
///
/// Every key owns a FIFO of timestamps. Stale entries are evicted from the
/// front on every touch, so a window never holds more than `max_requests`
/// live entries after an admission check.
///
/// Keys live in a sharded concurrent map: each operation holds the shard lock
/// for its key for the whole read-modify-write, so operations on one key are
/// atomic with respect to each other and distinct keys rarely contend.
/// The clock is read only while that lock is held, so per key the order of
/// stored timestamps matches the order in which callers took the lock.
pub struct RateLimiter {
    name: String,
    windows: DashMap<String, Window>,
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(name: impl Into<String>, max_requests: usize, window: Duration) -> Self {
        RateLimiter::with_clock(name, max_requests, window, Arc::new(SystemClock))
    }

    pub fn with_clock(
        name: impl Into<String>,
        max_requests: usize,
        window: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        RateLimiter {
            name: name.into(),
            windows: DashMap::new(),
            max_requests,
            window,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of keys with a window, including ones that have decayed to empty.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn span(&self) -> f64 {
        self.window.as_secs_f64()
    }

    fn purge(&self, key: &str, window: &mut Window, now: f64) {
        let evicted = window.purge(now, self.span());
        if evicted > 0 {
            tracing::debug!(limiter = %self.name, key, evicted, "Purged stale entries");
        }
    }

    /// True iff the key's live entries have used up the budget.
    /// Does not record anything. An empty window is never blocked.
    pub fn is_blocked(&self, key: &str) -> bool {
        match self.windows.get_mut(key) {
            Some(mut window) => {
                let now = self.clock.now();
                self.purge(key, &mut window, now);
                !window.timestamps.is_empty() && window.len() >= self.max_requests
            }
            None => false,
        }
    }

    /// Record an event for `key` at the current time. Never fails.
    pub fn record_request(&self, key: &str) {
        let mut window = self.windows.entry(key.to_string()).or_default();
        let now = self.clock.now();
        self.purge(key, &mut window, now);
        window.timestamps.push_back(now);
    }

    pub fn get_remaining_requests(&self, key: &str) -> usize {
        match self.windows.get_mut(key) {
            Some(mut window) => {
                let now = self.clock.now();
                self.purge(key, &mut window, now);
                self.max_requests.saturating_sub(window.len())
            }
            None => self.max_requests,
        }
    }

    /// Seconds until the oldest live entry exits the window; 0 when there is none.
    pub fn get_block_time_remaining(&self, key: &str) -> f64 {
        match self.windows.get_mut(key) {
            Some(mut window) => {
                let now = self.clock.now();
                self.purge(key, &mut window, now);
                window.block_time(now, self.span())
            }
            None => 0.0,
        }
    }

    pub fn clear_requests(&self, key: &str) {
        self.windows.remove(key);
    }

    /// Check and record in one critical section.
    ///
    /// Records the event and returns true only if the key still had budget.
    /// Concurrent callers on the same key can never admit more than
    /// `max_requests` events per window between them.
    pub fn try_acquire(&self, key: &str) -> bool {
        self.acquire(key).allowed
    }

    /// Like [`RateLimiter::try_acquire`], but reports the resulting window state.
    pub fn acquire(&self, key: &str) -> Admission {
        let span = self.span();
        let mut window = self.windows.entry(key.to_string()).or_default();
        let now = self.clock.now();
        self.purge(key, &mut window, now);

        if window.len() >= self.max_requests {
            tracing::warn!(limiter = %self.name, key, "Rate limit reached");
            return Admission {
                allowed: false,
                remaining: 0,
                retry_after: window.block_time(now, span),
            };
        }

        window.timestamps.push_back(now);
        Admission {
            allowed: true,
            remaining: self.max_requests.saturating_sub(window.len()),
            retry_after: 0.0,
        }
    }

    /// Record an event unconditionally and report the window it leaves behind,
    /// all under one lock.
    pub fn record_and_check(&self, key: &str) -> Admission {
        let span = self.span();
        let mut window = self.windows.entry(key.to_string()).or_default();
        let now = self.clock.now();
        self.purge(key, &mut window, now);
        window.timestamps.push_back(now);

        let blocked = window.len() >= self.max_requests;
        Admission {
            allowed: !blocked,
            remaining: self.max_requests.saturating_sub(window.len()),
            retry_after: if blocked { window.block_time(now, span) } else { 0.0 },
        }
    }

    /// Read-only view of `key`: blocked state, remaining budget and wait time agree.
    pub fn check(&self, key: &str) -> Admission {
        match self.windows.get_mut(key) {
            Some(mut window) => {
                let now = self.clock.now();
                self.purge(key, &mut window, now);
                let blocked = !window.timestamps.is_empty() && window.len() >= self.max_requests;
                Admission {
                    allowed: !blocked,
                    remaining: self.max_requests.saturating_sub(window.len()),
                    retry_after: if blocked { window.block_time(now, self.span()) } else { 0.0 },
                }
            }
            None => Admission {
                allowed: true,
                remaining: self.max_requests,
                retry_after: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::ManualClock;

    fn limiter(max: usize, secs: u64) -> (RateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000.0));
        let limiter = RateLimiter::with_clock("test", max, Duration::from_secs(secs), clock.clone());
        (limiter, clock)
    }

    #[test]
    fn window_purge_stops_at_first_live_entry() {
        let mut window = Window::default();
        window.timestamps.extend([1.0, 2.0, 50.0, 55.0]);
        assert_eq!(window.purge(60.0, 10.0), 2);
        assert_eq!(window.timestamps, VecDeque::from(vec![50.0, 55.0]));
    }

    #[test]
    fn window_purge_keeps_entry_exactly_at_cutoff() {
        let mut window = Window::default();
        window.timestamps.push_back(50.0);
        assert_eq!(window.purge(60.0, 10.0), 0);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn window_purge_drops_entries_from_the_future() {
        let mut window = Window::default();
        window.timestamps.extend([10.0, 20.0, 30.0]);
        window.purge(15.0, 100.0);
        assert_eq!(window.timestamps, VecDeque::from(vec![10.0]));
    }

    #[test]
    fn is_blocked_does_not_create_state() {
        let (limiter, _) = limiter(3, 60);
        assert!(!limiter.is_blocked("nobody"));
        assert_eq!(limiter.get_remaining_requests("nobody"), 3);
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn acquire_reports_remaining_then_wait() {
        let (limiter, clock) = limiter(2, 60);
        let first = limiter.acquire("k");
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        clock.advance(10.0);
        assert!(limiter.acquire("k").allowed);

        clock.advance(5.0);
        let denied = limiter.acquire("k");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.retry_after, 45.0);
        assert_eq!(denied.retry_after_secs(), 45);
    }

    #[test]
    fn record_and_check_reports_the_state_it_left() {
        let (limiter, clock) = limiter(2, 60);
        let first = limiter.record_and_check("k");
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        clock.advance(20.0);
        let second = limiter.record_and_check("k");
        assert!(!second.allowed);
        assert_eq!(second.remaining, 0);
        assert_eq!(second.retry_after, 40.0);

        // Still records past the budget
        limiter.record_and_check("k");
        clock.advance(40.5);
        assert_eq!(limiter.get_remaining_requests("k"), 0);
    }

    #[test]
    fn retry_after_rounds_up() {
        let admission = Admission { allowed: false, remaining: 0, retry_after: 29.2 };
        assert_eq!(admission.retry_after_secs(), 30);
    }
}
