//! # Backoff runner: bounded retry with exponentially growing delays.
//!
//! Invokes a work item up to [`RetryPolicy::max_retries`] times, sleeping the
//! current backoff delay around each attempt, until an attempt produces a
//! usable value.
//!
//! ## Flow
//! ```text
//! loop (attempt = 1..=max_retries) {
//!   ├─► publish AttemptStarting
//!   ├─► [wait_before: publish BackoffScheduled, sleep(delay)]
//!   ├─► work.call(args.clone())
//!   │       ├─ Ok(Value(v))  ─► return Ok(v)
//!   │       ├─ Ok(Empty)     ─► publish AttemptEmpty, continue
//!   │       └─ Err(e)        ─► publish AttemptFailed
//!   │            ├─ ErrorPolicy::Propagate        ─► return Err(Aborted)
//!   │            ├─ ErrorPolicy::Retry, retryable ─► continue
//!   │            └─ Fatal / Canceled              ─► return Err(Aborted)
//!   └─► [!wait_before: publish BackoffScheduled, sleep(delay)]
//! }
//! publish RetriesExhausted ─► return Err(Exhausted)
//! ```
//!
//! ## Rules
//! - Attempts are strictly sequential; retries are never concurrent.
//! - The delay for attempt `n` is [`RetryPolicy::delay`]`(n)` — growth is a
//!   pure function of the attempt number, so nothing bleeds between two
//!   runner invocations with the same policy.
//! - The wait also runs after the final failed attempt when
//!   `wait_before = false`, matching the utility this crate grew out of.
//! - There is no external cancellation for this runner; the token handed to
//!   each attempt is fresh and never cancelled.

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    calls::Call,
    error::RetryError,
    events::{Event, EventKind},
    observers::Observers,
    outcome::Outcome,
    policies::{ErrorPolicy, RetryPolicy},
};

/// Runs `work` under the given retry policy until it yields a usable value.
///
/// `args` is cloned for every attempt. Returns:
/// - `Ok(v)` as soon as an attempt yields `Outcome::Value(v)`;
/// - `Err(RetryError::Exhausted)` when the attempt budget runs out;
/// - `Err(RetryError::Aborted)` when an attempt fails hard and the policy
///   (or the error kind) forbids continuing.
pub async fn run_with_backoff<C, A, T>(
    work: &C,
    args: A,
    policy: &RetryPolicy,
    observers: &Observers,
) -> Result<T, RetryError>
where
    C: Call<A, T> + ?Sized,
    A: Clone + Send + 'static,
    T: Send + 'static,
{
    let ctx = CancellationToken::new();

    for n in 0..policy.max_retries {
        let attempt = n + 1;
        observers
            .publish(
                Event::now(EventKind::AttemptStarting)
                    .with_call(work.name())
                    .with_attempt(attempt),
            )
            .await;

        if policy.wait_before {
            wait(work.name(), policy, n, observers).await;
        }

        match work.call(args.clone(), ctx.child_token()).await {
            Ok(Outcome::Value(v)) => return Ok(v),
            Ok(Outcome::Empty) => {
                observers
                    .publish(
                        Event::now(EventKind::AttemptEmpty)
                            .with_call(work.name())
                            .with_attempt(attempt),
                    )
                    .await;
            }
            Err(e) => {
                observers
                    .publish(
                        Event::now(EventKind::AttemptFailed)
                            .with_call(work.name())
                            .with_attempt(attempt)
                            .with_error(e.as_message()),
                    )
                    .await;

                let keep_going =
                    matches!(policy.on_error, ErrorPolicy::Retry) && e.is_retryable();
                if !keep_going {
                    return Err(RetryError::Aborted { attempt, source: e });
                }
            }
        }

        if !policy.wait_before {
            wait(work.name(), policy, n, observers).await;
        }
    }

    observers
        .publish(
            Event::now(EventKind::RetriesExhausted)
                .with_call(work.name())
                .with_attempt(policy.max_retries),
        )
        .await;
    Err(RetryError::Exhausted {
        attempts: policy.max_retries,
    })
}

/// Publishes the scheduled wait and sleeps it.
async fn wait(name: &str, policy: &RetryPolicy, n: u32, observers: &Observers) {
    let delay = policy.delay(n);
    observers
        .publish(
            Event::now(EventKind::BackoffScheduled)
                .with_call(name)
                .with_attempt(n + 1)
                .with_delay(delay),
        )
        .await;
    time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::CallFn;
    use crate::error::CallError;
    use crate::events::Event;
    use crate::observers::Observe;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records every published event for assertions.
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Observe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.events.lock().unwrap().push(event.clone());
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            first: Duration::from_millis(10),
            factor: 2.0,
            max_retries,
            max_delay: Duration::from_millis(50),
            ..RetryPolicy::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_first_usable_value() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let work = CallFn::new("flaky", move |(): (), _ctx: CancellationToken| {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Ok::<_, CallError>(Outcome::Empty)
                } else {
                    Ok(Outcome::Value("ok"))
                }
            }
        });

        let out = run_with_backoff(&work, (), &fast_policy(5), &Observers::none()).await;
        assert_eq!(out.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_attempt_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let work = CallFn::new("hopeless", move |(): (), _ctx: CancellationToken| {
            seen.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<Outcome<()>, CallError>(Outcome::Empty) }
        });

        let out = run_with_backoff(&work, (), &fast_policy(4), &Observers::none()).await;
        assert!(matches!(out, Err(RetryError::Exhausted { attempts: 4 })));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_sequence_one_two_four_five() {
        // first=1s, factor=2, retries=4, cap=5s: waits of 1, 2, 4, 5 seconds.
        let policy = RetryPolicy {
            first: Duration::from_secs(1),
            factor: 2.0,
            max_retries: 4,
            max_delay: Duration::from_secs(5),
            ..RetryPolicy::default()
        };
        let rec = Arc::new(Recorder::default());
        let obs = Observers::new(vec![rec.clone() as Arc<dyn Observe>]);

        let work = CallFn::new("empty", |(): (), _ctx: CancellationToken| async {
            Ok::<Outcome<()>, CallError>(Outcome::Empty)
        });
        let out = run_with_backoff(&work, (), &policy, &obs).await;
        assert!(matches!(out, Err(RetryError::Exhausted { .. })));

        let delays: Vec<_> = rec
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == EventKind::BackoffScheduled)
            .filter_map(|e| e.delay)
            .collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(5),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_before_sleeps_ahead_of_first_attempt() {
        let started = tokio::time::Instant::now();
        let policy = RetryPolicy {
            first: Duration::from_secs(3),
            wait_before: true,
            max_retries: 1,
            ..RetryPolicy::default()
        };
        let work = CallFn::new("instant", |(): (), _ctx: CancellationToken| async {
            Ok::<_, CallError>(Outcome::Value(42))
        });

        let out = run_with_backoff(&work, (), &policy, &Observers::none()).await;
        assert_eq!(out.unwrap(), 42);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_propagate_aborts_on_first_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let work = CallFn::new("boom", move |(): (), _ctx: CancellationToken| {
            seen.fetch_add(1, Ordering::SeqCst);
            async move { Err::<Outcome<()>, _>(CallError::fail("boom")) }
        });

        let out = run_with_backoff(&work, (), &fast_policy(5), &Observers::none()).await;
        match out {
            Err(RetryError::Aborted { attempt, source }) => {
                assert_eq!(attempt, 1);
                assert_eq!(source, CallError::fail("boom"));
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_policy_keeps_retrying_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let work = CallFn::new("flaky", move |(): (), _ctx: CancellationToken| {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(CallError::fail("transient"))
                } else {
                    Ok(Outcome::Value(7))
                }
            }
        });

        let policy = RetryPolicy {
            on_error: ErrorPolicy::Retry,
            ..fast_policy(5)
        };
        let out = run_with_backoff(&work, (), &policy, &Observers::none()).await;
        assert_eq!(out.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_aborts_even_when_retrying() {
        let work = CallFn::new("fatal", |(): (), _ctx: CancellationToken| async {
            Err::<Outcome<()>, _>(CallError::fatal("corrupt state"))
        });
        let policy = RetryPolicy {
            on_error: ErrorPolicy::Retry,
            ..fast_policy(5)
        };
        let out = run_with_backoff(&work, (), &policy, &Observers::none()).await;
        assert!(matches!(
            out,
            Err(RetryError::Aborted {
                attempt: 1,
                source: CallError::Fatal { .. }
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_invocations_are_independent() {
        let policy = fast_policy(3);
        let rec = Arc::new(Recorder::default());
        let obs = Observers::new(vec![rec.clone() as Arc<dyn Observe>]);
        let work = CallFn::new("empty", |(): (), _ctx: CancellationToken| async {
            Ok::<Outcome<()>, CallError>(Outcome::Empty)
        });

        let _ = run_with_backoff(&work, (), &policy, &obs).await;
        let first: Vec<_> = drain_delays(&rec);
        let _ = run_with_backoff(&work, (), &policy, &obs).await;
        let second: Vec<_> = drain_delays(&rec);

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    fn drain_delays(rec: &Recorder) -> Vec<Duration> {
        let mut events = rec.events.lock().unwrap();
        let delays = events
            .iter()
            .filter(|e| e.kind == EventKind::BackoffScheduled)
            .filter_map(|e| e.delay)
            .collect();
        events.clear();
        delays
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_value_returned_without_final_wait() {
        let started = tokio::time::Instant::now();
        let work = CallFn::new("instant", |(): (), _ctx: CancellationToken| async {
            Ok::<_, CallError>(Outcome::Value("ok"))
        });
        let out = run_with_backoff(&work, (), &fast_policy(5), &Observers::none()).await;
        assert_eq!(out.unwrap(), "ok");
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
