use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-email failed-login limiter using a fixed window.
pub struct LoginRateLimiter {
    /// lowercased email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_failures: u32,
    window: Duration,
}

impl LoginRateLimiter {
    /// 5 failures per 15 minutes.
    pub fn new() -> Self {
        Self::with_limits(5, Duration::from_secs(15 * 60))
    }

    pub fn with_limits(max_failures: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_failures,
            window,
        }
    }

    /// Check if a login attempt is allowed. Returns the seconds left in the
    /// window when blocked. Does not count the attempt; call
    /// `record_failure()` on a bad password.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };

        let (count, start) = *entry.value();
        let elapsed = Instant::now().duration_since(start);

        if elapsed > self.window || count < self.max_failures {
            return Ok(());
        }

        Err(self.window.saturating_sub(elapsed).as_secs())
    }

    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget failures after a successful login.
    pub fn reset(&self, email: &str) {
        self.entries.remove(&email.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::LoginRateLimiter;

    #[test]
    fn blocks_after_max_failures() {
        let limiter = LoginRateLimiter::with_limits(2, Duration::from_secs(60));
        assert!(limiter.check("a@test.com").is_ok());

        limiter.record_failure("a@test.com");
        assert!(limiter.check("a@test.com").is_ok());

        limiter.record_failure("A@Test.com");
        assert!(limiter.check("a@test.com").is_err());
        assert!(limiter.check("b@test.com").is_ok());
    }

    #[test]
    fn reset_clears_failures() {
        let limiter = LoginRateLimiter::with_limits(1, Duration::from_secs(60));
        limiter.record_failure("a@test.com");
        assert!(limiter.check("a@test.com").is_err());

        limiter.reset("a@test.com");
        assert!(limiter.check("a@test.com").is_ok());
    }

    #[test]
    fn window_expiry_lifts_block() {
        let limiter = LoginRateLimiter::with_limits(1, Duration::from_millis(10));
        limiter.record_failure("a@test.com");
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("a@test.com").is_ok());
    }
}
