//! Linear retry loop.

use crate::{Error, Result};
use std::future::Future;
use tokio::time::Duration;
use tracing::warn;

/// Which failures earn another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryScope {
    /// Only failures where no usable response arrived ([`Error::is_network`]).
    NetworkOnly,
    /// Every failure.
    AnyFailure,
}

/// Decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Retry { delay: Duration },
    Exhausted,
    Fail,
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    scope: RetryScope,
}

impl RetryPolicy {
    /// 3 attempts, 1 s apart, retrying network failures only.
    pub fn network_only() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
            scope: RetryScope::NetworkOnly,
        }
    }

    /// 3 attempts, 1 s apart, retrying any failure.
    pub fn any_failure() -> Self {
        Self {
            scope: RetryScope::AnyFailure,
            ..Self::network_only()
        }
    }

    /// Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn scope(&self) -> RetryScope {
        self.scope
    }

    fn is_retryable(&self, error: &Error) -> bool {
        match self.scope {
            RetryScope::NetworkOnly => error.is_network(),
            RetryScope::AnyFailure => true,
        }
    }

    /// `attempt` is 1-based.
    fn decide(&self, attempt: u32, error: &Error) -> Decision {
        if !self.is_retryable(error) {
            return Decision::Fail;
        }
        if attempt >= self.max_attempts {
            return Decision::Exhausted;
        }
        Decision::Retry { delay: self.delay }
    }

    /// Run `op` until it succeeds, fails with an error outside this policy's scope, or the
    /// attempt budget runs out.
    ///
    /// `op` receives the 1-based attempt number. Errors outside the scope are returned
    /// unchanged; an exhausted budget wraps the last error in [`Error::RetriesExhausted`].
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            let err = match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            match self.decide(attempt, &err) {
                Decision::Fail => return Err(err),
                Decision::Exhausted => {
                    return Err(Error::RetriesExhausted {
                        operation: operation.to_string(),
                        attempts: attempt,
                        source: Box::new(err),
                    })
                }
                Decision::Retry { delay } => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::network_only()
    }
}
