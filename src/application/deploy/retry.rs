//! Retry policy for transient ledger errors
//!
//! Only [`LedgerError::Transient`] is retried. Everything else (node
//! rejections, malformed answers, submissions whose fate is unknown) is
//! returned on first occurrence.

use std::thread;
use std::time::Duration;

use crate::domain::ports::{LedgerError, LedgerResult};

/// Exponential backoff with a cap and a bounded number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before attempt `failed_attempt + 1`
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `on_retry` sees the failed attempt number, the upcoming delay and the
    /// error, before the pause.
    pub fn run<T, F, R>(&self, mut op: F, mut on_retry: R) -> LedgerResult<T>
    where
        F: FnMut() -> LedgerResult<T>,
        R: FnMut(u32, Duration, &LedgerError),
    {
        let mut attempt = 1;
        loop {
            match op() {
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_after(attempt);
                    on_retry(attempt, delay, &err);
                    thread::sleep(delay);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
