use std::time::Duration;

use crate::config::RetryConfig;

/// Decision taken after a matching failure has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Limit reached; hand the failure back to the caller.
    GiveUp,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Retry limit and fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (not counting the first attempt).
    pub retry_limit: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_limit: 3,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(retry_limit: u32, delay: Duration) -> Self {
        Self { retry_limit, delay }
    }

    /// Build a policy from the `[retry]` config section.
    ///
    /// Negative or non-finite delays fall back to zero / the default delay.
    pub fn from_config(cfg: &RetryConfig) -> Self {
        let delay = Duration::try_from_secs_f64(cfg.delay_secs.max(0.0))
            .unwrap_or_else(|_| RetryPolicy::default().delay);
        Self {
            retry_limit: cfg.retry_limit,
            delay,
        }
    }
}

/// Per-call attempt counter.
///
/// Starts at zero. Every matching failure increments it; a recovered failure
/// takes that increment back. The limit check runs after both: with a limit
/// of `n` the call ends on the failure that would need retry `n + 1`.
#[derive(Debug, Clone, Copy)]
pub struct AttemptCounter {
    policy: RetryPolicy,
    failures: u32,
}

impl AttemptCounter {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            failures: 0,
        }
    }

    pub fn count(&self) -> u32 {
        self.failures
    }

    /// Record a matching failure and return the new count.
    pub fn record_failure(&mut self) -> u32 {
        self.failures = self.failures.saturating_add(1);
        self.failures
    }

    /// Undo the last increment after the recovery callback fixed the failure.
    pub fn forgive(&mut self) {
        self.failures = self.failures.saturating_sub(1);
    }

    pub fn decide(&self) -> RetryDecision {
        if self.failures > self.policy.retry_limit {
            RetryDecision::GiveUp
        } else {
            RetryDecision::RetryAfter(self.policy.delay)
        }
    }
}
