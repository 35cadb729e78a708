//! Per-workstream retry policy
//!
//! Transient transport and provider failures get a second attempt after a
//! linear backoff; parse and configuration failures never retry. Jitter is
//! on by default so concurrent workstreams do not re-hit a rate-limited
//! provider in lockstep.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::error::ExtractorResult;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_millis(2000),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, returns a non-retryable error, or the
    /// attempt budget is exhausted. Attempts are numbered from 1.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> ExtractorResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ExtractorResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying after transient failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay * attempt;
        if self.jitter {
            base + Duration::from_millis(rand::thread_rng().gen_range(0..250))
        } else {
            base
        }
    }
}
