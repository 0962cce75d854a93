//! Fixed-delay polling.
//!
//! Used to wait for eventually-consistent resources to become visible after
//! they are created. Every error is retried; only the last one is returned.

use log::warn;
use std::fmt;
use std::thread;
use std::time::Duration;

/// Configuration for [`poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of attempts (at least one attempt is always made).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for PollConfig {
    /// 40 attempts, 3 seconds apart.
    fn default() -> Self {
        Self {
            max_attempts: 40,
            delay: Duration::from_secs(3),
        }
    }
}

impl PollConfig {
    /// Create a poll configuration.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Poll without waiting between attempts.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Worst-case time spent sleeping.
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.delay * self.max_attempts.saturating_sub(1)
    }
}

/// Callback for poll progress notifications.
pub trait PollCallback {
    /// Called after a failed attempt that will be retried.
    ///
    /// # Arguments
    /// * `attempt` - The attempt that failed (1-indexed)
    /// * `max_attempts` - Maximum number of attempts
    /// * `error` - The error of the failed attempt
    /// * `delay` - Time until the next attempt
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &dyn fmt::Display, delay: Duration);
}

/// Callback that does nothing.
pub struct NoCallback;

impl PollCallback for NoCallback {
    fn on_retry(&self, _: u32, _: u32, _: &dyn fmt::Display, _: Duration) {}
}

/// Callback that logs each retry at warn level.
pub struct LogCallback;

impl PollCallback for LogCallback {
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &dyn fmt::Display, delay: Duration) {
        warn!(
            "Attempt {attempt}/{max_attempts} failed: {error}. Retrying in {}s...",
            delay.as_secs()
        );
    }
}

/// Run `operation` until it succeeds or the attempts are used up.
///
/// There is no backoff and no error classification.
pub fn poll<T, E, F>(
    config: &PollConfig,
    callback: Option<&dyn PollCallback>,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                if let Some(cb) = callback {
                    cb.on_retry(attempt, max_attempts, &e, config.delay);
                }
                thread::sleep(config.delay);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_budget() {
        let config = PollConfig::default();
        assert_eq!(config.max_attempts, 40);
        assert_eq!(config.delay, Duration::from_secs(3));
        assert_eq!(config.max_wait(), Duration::from_secs(117));
    }

    #[test]
    fn test_poll_success_first_try() {
        let result: Result<i32, String> = poll(&PollConfig::immediate(3), None, || Ok(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_poll_eventual_success() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();

        let result: Result<&str, String> = poll(&PollConfig::immediate(5), None, || {
            counter.set(counter.get() + 1);
            if counter.get() < 3 {
                Err("not yet visible".to_string())
            } else {
                Ok("found")
            }
        });

        assert_eq!(result.unwrap(), "found");
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn test_poll_returns_last_error() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();

        let result: Result<(), String> = poll(&PollConfig::immediate(4), None, || {
            counter.set(counter.get() + 1);
            Err(format!("failure {}", counter.get()))
        });

        assert_eq!(result.unwrap_err(), "failure 4");
        assert_eq!(attempts.get(), 4);
    }

    #[test]
    fn test_poll_zero_attempts_still_runs_once() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();
        let _: Result<(), String> = poll(&PollConfig::immediate(0), None, || {
            counter.set(counter.get() + 1);
            Err("x".to_string())
        });
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_callback_invoked_between_attempts() {
        struct CountingCallback(Arc<AtomicU32>);
        impl PollCallback for CountingCallback {
            fn on_retry(&self, _: u32, _: u32, _: &dyn fmt::Display, _: Duration) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let count = Arc::new(AtomicU32::new(0));
        let callback = CountingCallback(count.clone());
        let _: Result<(), String> =
            poll(&PollConfig::immediate(3), Some(&callback), || Err("x".to_string()));

        // Not after the final attempt.
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
