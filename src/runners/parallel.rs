//! # Parallel runner: bounded fan-out with deterministic result order.
//!
//! Invokes one work item once per dynamic argument set, concurrently, with at
//! most `max_workers` calls executing at any instant, and returns the
//! outcomes ordered by input position regardless of completion order.
//!
//! ## Flow
//! ```text
//! for (i, dynamic) in dynamic_args:            one tokio task per slot
//!   spawn {
//!     acquire semaphore permit                 bounds live calls
//!     work.call(static.clone().merge(dynamic), child_token)
//!   }
//!
//! for (i, handle) in handles:                  caller joins in index order
//!   ├─ Ok(Value(v)) ─► out[i] = Value(v), publish SlotFilled
//!   ├─ Ok(Empty)    ─► out[i] = Empty,    publish SlotEmpty
//!   ├─ Err(e)       ─► cancel batch token, publish BatchAborted,
//!   │                  return Err(CallFailed { index: i })
//!   └─ panic        ─► same, as WorkerPanicked
//! publish BatchCompleted ─► Ok(out)
//! ```
//!
//! ## Rules
//! - Output order always equals input order; completion order is
//!   unspecified and never observable through the result.
//! - Each slot has exactly one writer (its task); the caller reads a slot
//!   only through the join, which is the happens-before edge. No per-slot
//!   locks exist.
//! - Fail-fast: the first slot error in index order aborts the whole call.
//!   Already-running workers are signalled through the batch token and then
//!   abandoned, consistent with the rest of the crate: no preemption.
//! - An empty input returns `Ok(vec![])` without invoking the work item.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::{
    calls::{Call, MergeArgs},
    error::{BatchError, CallError},
    events::{Event, EventKind},
    observers::Observers,
    outcome::Outcome,
};

/// Runs `work` once per entry of `dynamic_args`, merging `static_args` into
/// each, with at most `max_workers` calls in flight.
///
/// Returns the slot outcomes in input order, or the first slot failure (in
/// index order) as a [`BatchError`]. `max_workers` is clamped to a minimum
/// of 1.
pub async fn parallel_call<C, A, T>(
    work: Arc<C>,
    dynamic_args: Vec<A>,
    static_args: A,
    max_workers: usize,
    observers: &Observers,
) -> Result<Vec<Outcome<T>>, BatchError>
where
    C: Call<A, T> + ?Sized,
    A: MergeArgs + Clone + Send + 'static,
    T: Send + 'static,
{
    let total = dynamic_args.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let name = work.name().to_string();
    let batch = CancellationToken::new();
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));

    let mut handles = Vec::with_capacity(total);
    for dynamic in dynamic_args {
        let merged = static_args.clone().merge(dynamic);
        let work = Arc::clone(&work);
        let permits = Arc::clone(&semaphore);
        let token = batch.child_token();

        handles.push(tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| CallError::Canceled)?;
            if token.is_cancelled() {
                return Err(CallError::Canceled);
            }
            work.call(merged, token).await
        }));
    }

    let mut out = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(Outcome::Value(v))) => {
                observers
                    .publish(
                        Event::now(EventKind::SlotFilled)
                            .with_call(&name)
                            .with_index(index),
                    )
                    .await;
                out.push(Outcome::Value(v));
            }
            Ok(Ok(Outcome::Empty)) => {
                observers
                    .publish(
                        Event::now(EventKind::SlotEmpty)
                            .with_call(&name)
                            .with_index(index),
                    )
                    .await;
                out.push(Outcome::Empty);
            }
            Ok(Err(source)) => {
                batch.cancel();
                observers
                    .publish(
                        Event::now(EventKind::BatchAborted)
                            .with_call(&name)
                            .with_index(index)
                            .with_error(source.as_message()),
                    )
                    .await;
                return Err(BatchError::CallFailed { index, source });
            }
            Err(join_err) => {
                batch.cancel();
                let error = join_err.to_string();
                observers
                    .publish(
                        Event::now(EventKind::BatchAborted)
                            .with_call(&name)
                            .with_index(index)
                            .with_error(&error),
                    )
                    .await;
                return Err(BatchError::WorkerPanicked { index, error });
            }
        }
    }

    observers
        .publish(
            Event::now(EventKind::BatchCompleted)
                .with_call(&name)
                .with_index(total),
        )
        .await;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::CallFn;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time;

    fn times_ten() -> Arc<dyn Call<HashMap<&'static str, i64>, i64>> {
        CallFn::arc(
            "times_ten",
            |args: HashMap<&'static str, i64>, _ctx: CancellationToken| async move {
                Ok::<_, CallError>(Outcome::Value(args["x"] * 10))
            },
        )
    }

    fn xs(values: &[i64]) -> Vec<HashMap<&'static str, i64>> {
        values.iter().map(|v| HashMap::from([("x", *v)])).collect()
    }

    #[tokio::test]
    async fn test_results_in_input_order_for_any_worker_count() {
        for max_workers in [1, 2, 3, 16] {
            let out = parallel_call(
                times_ten(),
                xs(&[1, 2, 3]),
                HashMap::new(),
                max_workers,
                &Observers::none(),
            )
            .await
            .unwrap();
            assert_eq!(
                out,
                vec![
                    Outcome::Value(10),
                    Outcome::Value(20),
                    Outcome::Value(30)
                ],
                "max_workers={max_workers}"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_invokes_work() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let work = CallFn::arc("counting", move |(): (), _ctx: CancellationToken| {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Ok::<Outcome<()>, CallError>(Outcome::Empty) }
        });

        let out = parallel_call(work, Vec::new(), (), 4, &Observers::none())
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_static_args_merged_with_dynamic_precedence() {
        let work = CallFn::arc(
            "merged",
            |args: HashMap<&'static str, i64>, _ctx: CancellationToken| async move {
                Ok::<_, CallError>(Outcome::Value(args["x"] * args["scale"]))
            },
        );
        // Slot 1 overrides the shared scale.
        let dynamic = vec![
            HashMap::from([("x", 1)]),
            HashMap::from([("x", 2), ("scale", 100)]),
        ];
        let static_args = HashMap::from([("scale", 10)]);

        let out = parallel_call(work, dynamic, static_args, 2, &Observers::none())
            .await
            .unwrap();
        assert_eq!(out, vec![Outcome::Value(10), Outcome::Value(200)]);
    }

    #[tokio::test]
    async fn test_completion_order_does_not_leak_into_output() {
        // Earlier slots sleep longer, so later slots finish first.
        let work = CallFn::arc("staggered", |x: Option<u64>, _ctx: CancellationToken| {
            let x = x.unwrap();
            async move {
                time::sleep(Duration::from_millis(30 - x * 10)).await;
                Ok::<_, CallError>(Outcome::Value(x))
            }
        });
        let out = parallel_call(work, vec![Some(0), Some(1), Some(2)], None, 3, &Observers::none())
            .await
            .unwrap();
        assert_eq!(
            out,
            vec![Outcome::Value(0), Outcome::Value(1), Outcome::Value(2)]
        );
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_max_workers() {
        let live = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (live_c, peak_c) = (live.clone(), peak.clone());

        let work = CallFn::arc("gauged", move |(): (), _ctx: CancellationToken| {
            let live = live_c.clone();
            let peak = peak_c.clone();
            async move {
                let now = live.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                time::sleep(Duration::from_millis(5)).await;
                live.fetch_sub(1, Ordering::SeqCst);
                Ok::<Outcome<()>, CallError>(Outcome::Empty)
            }
        });

        let out = parallel_call(work, vec![(); 12], (), 3, &Observers::none())
            .await
            .unwrap();
        assert_eq!(out.len(), 12);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_empty_outcome_leaves_slot_empty() {
        let work = CallFn::arc("sieve", |x: Option<i64>, _ctx: CancellationToken| async move {
            match x {
                Some(v) if v % 2 == 0 => Ok::<_, CallError>(Outcome::Value(v)),
                _ => Ok(Outcome::Empty),
            }
        });
        let out = parallel_call(
            work,
            vec![Some(1), Some(2), Some(3), Some(4)],
            None,
            2,
            &Observers::none(),
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            vec![
                Outcome::Empty,
                Outcome::Value(2),
                Outcome::Empty,
                Outcome::Value(4)
            ]
        );
    }

    #[tokio::test]
    async fn test_slot_failure_aborts_batch() {
        let work = CallFn::arc("fragile", |x: Option<i64>, _ctx: CancellationToken| async move {
            match x {
                Some(2) => Err(CallError::fail("slot two broke")),
                Some(v) => Ok(Outcome::Value(v)),
                None => Ok(Outcome::Empty),
            }
        });
        let out = parallel_call(
            work,
            vec![Some(1), Some(2), Some(3)],
            None,
            3,
            &Observers::none(),
        )
        .await;
        match out {
            Err(BatchError::CallFailed { index, source }) => {
                assert_eq!(index, 1);
                assert!(source.as_message().contains("slot two broke"));
            }
            other => panic!("expected fail-fast abort, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_worker_matches_sequential_output() {
        let sequential: Vec<_> = [5, 6, 7].iter().map(|x| Outcome::Value(x * 10)).collect();
        let out = parallel_call(times_ten(), xs(&[5, 6, 7]), HashMap::new(), 1, &Observers::none())
            .await
            .unwrap();
        assert_eq!(out, sequential);
    }
}
