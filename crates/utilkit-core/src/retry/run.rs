//! Retry loop: run an operation until success, a non-matching failure, or
//! the limit is reached.

use std::future::Future;

use super::failure::{Failure, Recovery};
use super::policy::{AttemptCounter, RetryDecision, RetryPolicy};

type Matcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type Handler<A, E> = Box<dyn Fn(&Failure<'_, A, E>) -> Result<Recovery, E> + Send + Sync>;

/// Retry executor for operations taking `&A` and failing with `E`.
///
/// The retrier holds configuration only. Each [`call`](Retrier::call) gets
/// its own [`AttemptCounter`], so one retrier can be shared between threads.
pub struct Retrier<A: ?Sized, E> {
    name: String,
    policy: RetryPolicy,
    matcher: Option<Matcher<E>>,
    handler: Option<Handler<A, E>>,
}

impl<A: ?Sized, E> Retrier<A, E> {
    /// New retrier that retries every failure.
    pub fn new(name: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            matcher: None,
            handler: None,
        }
    }

    /// Only retry failures for which `matches` returns true. Everything else
    /// is returned on first occurrence.
    pub fn retry_if<M>(mut self, matches: M) -> Self
    where
        M: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Box::new(matches));
        self
    }

    /// Install a recovery callback, run on every matching failure before the
    /// limit check. An `Err` from the callback is returned as is.
    pub fn on_failure<H>(mut self, handler: H) -> Self
    where
        H: Fn(&Failure<'_, A, E>) -> Result<Recovery, E> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `op(args)` under this retrier, sleeping the thread between attempts.
    ///
    /// Once the limit is reached the last error is returned unchanged.
    pub fn call<T, F>(&self, args: &A, mut op: F) -> Result<T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        let mut counter = AttemptCounter::new(self.policy);
        loop {
            let err = match op(args) {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };
            match self.after_failure(&mut counter, args, &err)? {
                RetryDecision::GiveUp => return Err(err),
                RetryDecision::RetryAfter(d) => std::thread::sleep(d),
            }
        }
    }

    /// Async flavour of [`call`](Retrier::call); the delay is a
    /// `tokio::time::sleep` instead of a blocking sleep.
    pub async fn call_async<T, F, Fut>(&self, args: &A, mut op: F) -> Result<T, E>
    where
        F: FnMut(&A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut counter = AttemptCounter::new(self.policy);
        loop {
            let err = match op(args).await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };
            match self.after_failure(&mut counter, args, &err)? {
                RetryDecision::GiveUp => return Err(err),
                RetryDecision::RetryAfter(d) => tokio::time::sleep(d).await,
            }
        }
    }

    /// Wrap `op` into a closure with the same calling convention that runs
    /// every invocation under this retrier.
    pub fn wrap<T, F>(self, mut op: F) -> impl FnMut(&A) -> Result<T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        move |args: &A| self.call(args, &mut op)
    }

    fn matches(&self, err: &E) -> bool {
        self.matcher.as_ref().map_or(true, |m| m(err))
    }

    fn after_failure(
        &self,
        counter: &mut AttemptCounter,
        args: &A,
        err: &E,
    ) -> Result<RetryDecision, E> {
        if !self.matches(err) {
            tracing::debug!(operation = %self.name, "failure not retryable, giving up");
            return Ok(RetryDecision::GiveUp);
        }

        let attempt = counter.record_failure();
        if let Some(handler) = &self.handler {
            let failure = Failure {
                operation: &self.name,
                attempt,
                error: err,
                args,
            };
            if handler(&failure)?.is_recovered() {
                counter.forgive();
                tracing::debug!(operation = %self.name, attempt, "recovery callback fixed failure");
            }
        }

        let decision = counter.decide();
        match decision {
            RetryDecision::GiveUp => tracing::warn!(
                operation = %self.name,
                retry_limit = self.policy.retry_limit,
                "retry limit reached"
            ),
            RetryDecision::RetryAfter(d) => tracing::warn!(
                operation = %self.name,
                attempt = counter.count(),
                delay_ms = d.as_millis() as u64,
                "operation failed, retrying"
            ),
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests;
