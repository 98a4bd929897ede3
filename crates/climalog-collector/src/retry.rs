use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Bounded retry with a fixed delay after each failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts per operation, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay after a failed attempt, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_ms: 500,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Runs `op` until it succeeds or the attempts are used up.
    ///
    /// `op` receives the 1-based attempt number. The clock sleeps for the
    /// backoff after every failure, the last one included. On exhaustion the
    /// last error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use climalog_collector::{clock::ManualClock, retry::RetryPolicy};
    ///
    /// let mut clock = ManualClock::new("2024-12-23T22:00:00".parse().unwrap());
    /// let policy = RetryPolicy { max_attempts: 3, backoff_ms: 500 };
    ///
    /// let result: Result<u32, &str> =
    ///     policy.retry(&mut clock, |attempt| if attempt < 3 { Err("busy") } else { Ok(attempt) });
    /// assert_eq!(result, Ok(3));
    /// assert_eq!(clock.sleeps().len(), 2);
    /// ```
    pub fn retry<C, T, E, F>(&self, clock: &mut C, mut op: F) -> Result<T, E>
    where
        C: Clock + ?Sized,
        E: fmt::Display,
        F: FnMut(u32) -> Result<T, E>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(attempt, max_attempts, error = %e, "attempt failed");
                    clock.sleep(self.backoff());
                    if attempt >= max_attempts {
                        return Err(e);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
