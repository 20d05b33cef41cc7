//! Retry policy combinator
//!
//! External inference and search calls fail transiently; the affected
//! operation is re-executed from the same conversation state up to a
//! configured attempt cap. Precondition violations and other non-transient
//! errors surface immediately.

use std::time::Duration;
use tracing::warn;

/// Classifies whether an error is worth re-executing.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Bounded retry with an optional fixed delay between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Option<Duration>,
}

impl RetryPolicy {
    /// A policy that attempts an operation up to `max_attempts` times
    /// (minimum 1).
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: None,
        }
    }

    /// Wait `delay` between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Run `op`, re-executing on transient errors until it succeeds or the
    /// attempt cap is exhausted. The last error is returned unchanged.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        E: Transient + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        "{} failed (attempt {}/{}): {}",
                        label, attempt, self.max_attempts, e
                    );
                    if let Some(delay) = self.delay {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
