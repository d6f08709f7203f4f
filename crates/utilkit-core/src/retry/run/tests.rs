//! Retry loop tests: attempt counts, callback interaction, async runner.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TestError {
    Transient(u32),
    Fatal,
}

fn policy(limit: u32) -> RetryPolicy {
    RetryPolicy::new(limit, Duration::ZERO)
}

fn transient_only(e: &TestError) -> bool {
    matches!(e, TestError::Transient(_))
}

#[test]
fn success_returns_first_result_without_callback() {
    let callback_calls = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&callback_calls);
    let retrier = Retrier::<(), TestError>::new("ok", policy(0)).on_failure(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Recovery::Recovered)
    });

    let mut calls = 0;
    let out = retrier.call(&(), |_| {
        calls += 1;
        Ok::<_, TestError>(42)
    });
    assert_eq!(out, Ok(42));
    assert_eq!(calls, 1);
    assert_eq!(callback_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn non_matching_failure_propagates_immediately() {
    let callback_calls = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&callback_calls);
    // A long delay would make the test hang if we slept.
    let retrier = Retrier::<(), TestError>::new("fatal", RetryPolicy::new(5, Duration::from_secs(60)))
        .retry_if(transient_only)
        .on_failure(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(Recovery::Unrecovered)
        });

    let mut calls = 0;
    let out: Result<(), _> = retrier.call(&(), |_| {
        calls += 1;
        Err(TestError::Fatal)
    });
    assert_eq!(out, Err(TestError::Fatal));
    assert_eq!(calls, 1);
    assert_eq!(callback_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn fails_k_times_then_succeeds() {
    for limit in 0..4u32 {
        for k in 0..=limit {
            let retrier = Retrier::<(), TestError>::new("flaky", policy(limit));
            let mut calls = 0u32;
            let out = retrier.call(&(), |_| {
                calls += 1;
                if calls <= k {
                    Err(TestError::Transient(calls))
                } else {
                    Ok(calls)
                }
            });
            assert_eq!(out, Ok(k + 1), "limit={limit} k={k}");
            assert_eq!(calls, k + 1);
        }
    }
}

#[test]
fn always_failing_gives_up_after_limit_plus_one_calls() {
    for limit in 0..5u32 {
        let retrier = Retrier::<(), TestError>::new("down", policy(limit));
        let mut calls = 0u32;
        let out: Result<(), _> = retrier.call(&(), |_| {
            calls += 1;
            Err(TestError::Transient(calls))
        });
        assert_eq!(out, Err(TestError::Transient(limit + 1)));
        assert_eq!(calls, limit + 1);
    }
}

#[test]
fn zero_limit_still_makes_first_attempt() {
    let retrier = Retrier::<(), TestError>::new("once", policy(0));
    let mut calls = 0u32;
    let out: Result<(), _> = retrier.call(&(), |_| {
        calls += 1;
        Err(TestError::Transient(calls))
    });
    assert_eq!(out, Err(TestError::Transient(1)));
    assert_eq!(calls, 1);
}

#[test]
fn recovered_callback_grants_unbounded_retries() {
    let limit = 2;
    let retrier =
        Retrier::<(), TestError>::new("healing", policy(limit)).on_failure(|_| Ok(Recovery::Recovered));
    let mut calls = 0u32;
    let out = retrier.call(&(), |_| {
        calls += 1;
        if calls < limit + 10 {
            Err(TestError::Transient(calls))
        } else {
            Ok(calls)
        }
    });
    assert_eq!(out, Ok(limit + 10));
    assert!(calls >= limit + 5);
}

#[test]
fn callback_receives_name_attempt_error_and_args() {
    let attempts = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&attempts);
    let retrier = Retrier::<str, TestError>::new("fetch", policy(3)).on_failure(move |f| {
        assert_eq!(f.operation, "fetch");
        assert_eq!(f.args, "select 1");
        log.lock().unwrap().push((f.attempt, f.error.clone()));
        Ok(Recovery::Unrecovered)
    });

    let mut calls = 0u32;
    let out: Result<(), _> = retrier.call("select 1", |_| {
        calls += 1;
        Err(TestError::Transient(calls))
    });
    assert_eq!(out, Err(TestError::Transient(4)));
    let attempts = attempts.lock().unwrap();
    assert_eq!(
        *attempts,
        vec![
            (1, TestError::Transient(1)),
            (2, TestError::Transient(2)),
            (3, TestError::Transient(3)),
            (4, TestError::Transient(4)),
        ]
    );
}

#[test]
fn recovered_attempt_reports_same_counter_next_time() {
    // First failure recovered, the rest not: counter sequence 1 (forgiven), 1, 2, 3.
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let retrier = Retrier::<(), TestError>::new("partial", policy(2)).on_failure(move |f| {
        let mut log = log.lock().unwrap();
        log.push(f.attempt);
        Ok(Recovery::from(log.len() == 1))
    });
    let mut calls = 0u32;
    let out: Result<(), _> = retrier.call(&(), |_| {
        calls += 1;
        Err(TestError::Transient(calls))
    });
    assert_eq!(out, Err(TestError::Transient(4)));
    assert_eq!(*seen.lock().unwrap(), vec![1, 1, 2, 3]);
}

#[test]
fn callback_error_propagates_unguarded() {
    let retrier = Retrier::<(), TestError>::new("broken-handler", policy(5))
        .on_failure(|_| Err(TestError::Fatal));
    let mut calls = 0u32;
    let out: Result<(), _> = retrier.call(&(), |_| {
        calls += 1;
        Err(TestError::Transient(calls))
    });
    assert_eq!(out, Err(TestError::Fatal));
    assert_eq!(calls, 1);
}

#[test]
fn wrapped_operation_keeps_calling_convention() {
    let mut remaining = 1;
    let mut double = Retrier::<u32, TestError>::new("double", policy(2)).wrap(move |n: &u32| {
        if remaining > 0 {
            remaining -= 1;
            Err(TestError::Transient(*n))
        } else {
            Ok(n * 2)
        }
    });
    assert_eq!(double(&21), Ok(42));
    assert_eq!(double(&5), Ok(10));
}

#[test]
fn shared_retrier_keeps_counters_per_call() {
    let retrier = Retrier::<u32, TestError>::new("threads", policy(2));
    std::thread::scope(|s| {
        for id in 0..4u32 {
            let retrier = &retrier;
            s.spawn(move || {
                let mut calls = 0;
                let out = retrier.call(&id, |id| {
                    calls += 1;
                    if calls == 1 {
                        Err(TestError::Transient(*id))
                    } else {
                        Ok(*id)
                    }
                });
                assert_eq!(out, Ok(id));
                assert_eq!(calls, 2);
            });
        }
    });
}

#[tokio::test]
async fn async_runner_follows_same_rules() {
    let calls = Arc::new(AtomicU32::new(0));
    let retrier = Retrier::<(), TestError>::new("async", RetryPolicy::new(3, Duration::from_millis(1)));

    let counter = Arc::clone(&calls);
    let out = retrier
        .call_async(&(), |_| {
            let counter = Arc::clone(&counter);
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(TestError::Transient(n))
                } else {
                    Ok(n)
                }
            }
        })
        .await;
    assert_eq!(out, Ok(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn async_runner_gives_up_at_limit() {
    let calls = Arc::new(AtomicU32::new(0));
    let retrier = Retrier::<(), TestError>::new("async-down", policy(2));
    let counter = Arc::clone(&calls);
    let out: Result<(), _> = retrier
        .call_async(&(), |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(TestError::Transient(n)) }
        })
        .await;
    assert_eq!(out, Err(TestError::Transient(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
