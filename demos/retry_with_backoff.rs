//! # Demo: retry_with_backoff
//!
//! Demonstrates how [`run_with_backoff`] retries a call that comes back
//! empty a few times before producing a value, and how the [`LogWriter`]
//! observer surfaces each step.
//!
//! ## Flow
//! ```text
//! run_with_backoff()
//!   ├─► publish(AttemptStarting, attempt=1)
//!   ├─► call → Ok(Empty)
//!   ├─► publish(AttemptEmpty)
//!   ├─► publish(BackoffScheduled{delay=50ms})
//!   ├─► sleep(delay)
//!   ├─► attempt=2 → Ok(Empty) → delay≈100ms
//!   ├─► attempt=3 → Ok(Value("answer"))
//!   └─► Ok("answer")
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example retry_with_backoff --features logging
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use callvisor::{CallError, CallFn, LogWriter, Observe, Observers, Outcome, RetryPolicy, run_with_backoff};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let observers = Observers::new(vec![Arc::new(LogWriter::new()) as Arc<dyn Observe>]);

    let tries = Arc::new(AtomicU32::new(0));
    let seen = tries.clone();
    let lookup = CallFn::new("lookup", move |key: u32, _ctx: CancellationToken| {
        let n = seen.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Ok::<_, CallError>(Outcome::Empty) // not ready yet, retry
            } else {
                Ok(Outcome::Value(format!("answer-{key}")))
            }
        }
    });

    let policy = RetryPolicy {
        first: Duration::from_millis(50),
        factor: 2.0,
        max_retries: 5,
        max_delay: Duration::from_millis(400),
        ..RetryPolicy::default()
    };

    let answer = run_with_backoff(&lookup, 7, &policy, &observers).await?;
    println!("got: {answer}");
    Ok(())
}
