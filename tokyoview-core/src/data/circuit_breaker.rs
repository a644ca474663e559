//! Hard-stop guard for the quote provider.
//!
//! Yahoo answers abusive clients with HTTP 403 bans, so once the provider
//! returns 403 (or fails three times in a row) every further request is
//! refused for a cooldown window instead of retried. The remaining cooldown
//! is carried on the error so the UI can tell the reader how long to wait.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Inner {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Shared guard: one per provider, cloned behind an `Arc`.
#[derive(Debug)]
pub struct CircuitBreaker {
    inner: Mutex<Inner>,
    cooldown: Duration,
    failure_threshold: u32,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            cooldown,
            failure_threshold: 3,
        }
    }

    /// The production setting: 30-minute cooldown, trip after 3 straight failures.
    pub fn default_provider() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }

    /// Whether a request may go out right now. An expired cooldown closes
    /// the guard again as a side effect.
    pub fn is_allowed(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.opened_at {
            None => true,
            Some(opened) if opened.elapsed() >= self.cooldown => {
                *inner = Inner::default();
                true
            }
            Some(_) => false,
        }
    }

    /// A request succeeded; the failure streak starts over.
    pub fn record_success(&self) {
        self.inner.lock().unwrap().consecutive_failures = 0;
    }

    /// A request failed. The guard opens once the streak hits the threshold.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.consecutive_failures += 1;
        if inner.consecutive_failures >= self.failure_threshold {
            inner.opened_at = Some(Instant::now());
        }
    }

    /// Open the guard immediately, bypassing the failure streak. Used for
    /// HTTP 403 where retrying would only prolong the ban.
    pub fn trip(&self) {
        self.inner.lock().unwrap().opened_at = Some(Instant::now());
    }

    /// Seconds until requests are allowed again. Zero when closed.
    pub fn retry_in_secs(&self) -> u64 {
        let inner = self.inner.lock().unwrap();
        match inner.opened_at {
            None => 0,
            Some(opened) => self.cooldown.saturating_sub(opened.elapsed()).as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let cb = CircuitBreaker::new(Duration::from_secs(60));
        assert!(cb.is_allowed());
        assert_eq!(cb.retry_in_secs(), 0);
    }

    #[test]
    fn opens_after_three_straight_failures() {
        let cb = CircuitBreaker::new(Duration::from_secs(60));
        cb.record_failure();
        cb.record_failure();
        assert!(cb.is_allowed());
        cb.record_failure();
        assert!(!cb.is_allowed());
        assert!(cb.retry_in_secs() > 0);
    }

    #[test]
    fn success_breaks_the_streak() {
        let cb = CircuitBreaker::new(Duration::from_secs(60));
        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        assert!(cb.is_allowed());
    }

    #[test]
    fn trip_opens_immediately() {
        let cb = CircuitBreaker::new(Duration::from_secs(60));
        cb.trip();
        assert!(!cb.is_allowed());
    }

    #[test]
    fn closes_again_after_cooldown() {
        let cb = CircuitBreaker::new(Duration::from_millis(10));
        cb.trip();
        assert!(!cb.is_allowed());
        std::thread::sleep(Duration::from_millis(15));
        assert!(cb.is_allowed());
        assert_eq!(cb.retry_in_secs(), 0);
    }
}
