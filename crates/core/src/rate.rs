//! Minimum-interval rate limiting for pipeline runs.
//!
//! A single global timer: once a run succeeds, further runs are rejected
//! until the minimum interval elapses. Rejections are not retried
//! automatically; they surface to the user immediately.

use std::time::Duration;

use tokio::time::Instant;

use crate::Error;

/// Single-timer rate limiter shared by all pipeline runs.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_success: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum interval between runs.
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_success: None }
    }

    /// Check whether a run is allowed now.
    ///
    /// # Errors
    ///
    /// Returns `Error::RateLimited` when the minimum interval since the
    /// last successful run has not elapsed.
    pub fn check(&self) -> Result<(), Error> {
        if let Some(last) = self.last_success {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                return Err(Error::RateLimited(format!("retry in {}s", remaining.as_secs().max(1))));
            }
        }
        Ok(())
    }

    /// Record a successful run, starting a new interval.
    pub fn mark(&mut self) {
        self.last_success = Some(Instant::now());
    }
}
