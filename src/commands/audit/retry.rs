use crate::error::{JustInstallError, Result};
use crate::ui as output;
use std::time::Duration;

/// Bounded retries with a doubling delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Three attempts, waiting 2s then 4s.
    pub const AUDIT: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_secs(2),
    };

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Run `operation` until it succeeds, fails with an error that is not
    /// retryable, or runs out of attempts.
    pub fn execute<F, S>(&self, operation_name: &str, mut operation: F, sleep: S) -> Result<()>
    where
        F: FnMut() -> Result<()>,
        S: Fn(Duration),
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match operation() {
                Ok(()) => return Ok(()),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    if attempt < self.max_attempts {
                        let delay = self.delay_after(attempt);
                        output::verbose(&format!(
                            "{} failed (attempt {}/{}): {}, retrying in {}s",
                            operation_name,
                            attempt,
                            self.max_attempts,
                            e,
                            delay.as_secs()
                        ));
                        sleep(delay);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            JustInstallError::Other(format!(
                "{} failed after {} attempts",
                operation_name, self.max_attempts
            ))
        }))
    }
}
