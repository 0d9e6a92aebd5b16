//! # Timeout runner: deadline-bounded execution with a default result.
//!
//! Launches a work item on its own tokio task and waits at most the given
//! deadline for it to finish. A deadline miss is a normal return path, not an
//! error: the caller gets its default value back.
//!
//! ## Flow
//! ```text
//! spawn(work.call(args, child_token))
//!   ├─ finished in time:
//!   │    ├─ Ok(Value(v)) ─► Ok(v)
//!   │    ├─ Ok(Empty)    ─► Ok(default)
//!   │    ├─ Err(e)       ─► Err(e)
//!   │    └─ panic        ─► Err(Fatal)
//!   └─ deadline elapsed:
//!        ├─ cancel child token (cooperative stop signal)
//!        ├─ publish TimeoutHit, WorkerAbandoned
//!        └─ Ok(default)       (worker keeps running, result discarded)
//! ```
//!
//! ## Rules
//! - Single attempt per call; no retries.
//! - Abandonment is **not** cancellation: after the deadline the worker task
//!   runs to natural termination in the background and any side effect it
//!   performs can no longer be suppressed. Work items that need to stop
//!   promptly must watch the cancellation token they receive.
//! - The result hand-off rides on the task join: the worker writes once, the
//!   caller reads only after observing completion, so no extra locking is
//!   involved.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    calls::Call,
    error::CallError,
    events::{Event, EventKind},
    observers::Observers,
    outcome::Outcome,
};

/// Runs `work` with a deadline, substituting `default` when it is missed.
///
/// Returns:
/// - `Ok(v)` when the worker finishes in time with a usable value;
/// - `Ok(default)` when it finishes with `Outcome::Empty`, or when the
///   deadline elapses first (the worker is then abandoned);
/// - `Err(e)` when the worker finishes in time with a hard error, or
///   `Err(CallError::Fatal)` if it panicked.
pub async fn run_with_timeout<C, A, T>(
    work: Arc<C>,
    args: A,
    timeout: Duration,
    default: T,
    observers: &Observers,
) -> Result<T, CallError>
where
    C: Call<A, T> + ?Sized,
    A: Send + 'static,
    T: Send + 'static,
{
    let name = work.name().to_string();
    let ctx = CancellationToken::new();
    let child = ctx.child_token();

    let handle = tokio::spawn(async move { work.call(args, child).await });

    match time::timeout(timeout, handle).await {
        Ok(Ok(Ok(Outcome::Value(v)))) => Ok(v),
        Ok(Ok(Ok(Outcome::Empty))) => Ok(default),
        Ok(Ok(Err(e))) => Err(e),
        Ok(Err(join_err)) => Err(CallError::fatal(format!("worker panicked: {join_err}"))),
        Err(_elapsed) => {
            // Dropping the JoinHandle detaches the task; the token lets a
            // cooperative work item notice it has been given up on.
            ctx.cancel();
            observers
                .publish(
                    Event::now(EventKind::TimeoutHit)
                        .with_call(&name)
                        .with_timeout(timeout),
                )
                .await;
            observers
                .publish(
                    Event::now(EventKind::WorkerAbandoned)
                        .with_call(&name)
                        .with_timeout(timeout),
                )
                .await;
            Ok(default)
        }
    }
}
