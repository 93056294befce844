use std::time::{Duration, Instant};

use dashmap::DashMap;

const DEFAULT_MAX_FAILURES: u32 = 5;
const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-email login brute force limiter.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_failures: u32,
    window: Duration,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    /// 5 failures per 15 minutes.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_FAILURES, DEFAULT_WINDOW)
    }

    pub fn with_limits(max_failures: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_failures,
            window,
        }
    }

    /// Check if a login attempt is allowed. Returns retry-after seconds when blocked.
    /// Does NOT increment the counter; call `record_failure()` on a bad password.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > self.window {
            return Ok(());
        }

        if *count >= self.max_failures {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(self.window.as_secs().saturating_sub(elapsed));
        }

        Ok(())
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
    pub fn clear(&self, email: &str) {
        self.entries.remove(&email.to_lowercase());
    }

    /// Drop windows that have already elapsed.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) <= window);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
