//! # callvisor
//!
//! **Callvisor** is a small library of call-level resilience primitives for
//! Rust: bounded exponential retry, deadline-bounded execution with a default
//! result, and ordered bounded fan-out. Each primitive wraps an arbitrary
//! async work function and is designed as a building block for application
//! code that has to survive flaky dependencies.
//!
//! ## Architecture
//! ```text
//!     ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐
//!     │  run_with_      │  │  run_with_      │  │  parallel_call  │
//!     │  backoff        │  │  timeout        │  │                 │
//!     │  (retry loop)   │  │  (deadline +    │  │  (bounded       │
//!     │                 │  │   abandonment)  │  │   fan-out)      │
//!     └───────┬─────────┘  └───────┬─────────┘  └───────┬─────────┘
//!             │ RetryPolicy        │ Duration +         │ Semaphore +
//!             │ (first/factor/     │ default value      │ index-ordered
//!             │  cap/jitter)       │                    │ joins
//!             ▼                    ▼                    ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Call<A, T>  (async, cancelable work item; CallFn for closures)   │
//! │  → Result<Outcome<T>, CallError>                                  │
//! └───────────────────────────────┬───────────────────────────────────┘
//!                                 │ Events (AttemptStarting, TimeoutHit,
//!                                 │         SlotFilled, BatchAborted, ...)
//!                                 ▼
//!                    Observers ──► Observe::on_event()
//! ```
//!
//! The three runners are independent: no shared state, no dependency order.
//! Composition happens at the call site — a backoff-wrapped call can be the
//! work item of a timeout wrapper, or one slot of a parallel batch.
//!
//! ## Semantics at a glance
//! | Runner              | Bound                      | On miss                          |
//! |---------------------|----------------------------|----------------------------------|
//! | `run_with_backoff`  | `max_retries` attempts     | `Err(RetryError::Exhausted)`     |
//! | `run_with_timeout`  | one attempt, one deadline  | `Ok(default)`, worker abandoned  |
//! | `parallel_call`     | `max_workers` live calls   | fail-fast `Err(BatchError)`      |
//!
//! Cancellation is cooperative everywhere: a runner that gives up on a call
//! cancels the [`CancellationToken`](tokio_util::sync::CancellationToken) it
//! handed to the work item and moves on. Nothing is preempted; a work item
//! that never checks its token simply runs to natural termination with its
//! result discarded.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use callvisor::{
//!     run_with_backoff, CallError, CallFn, Observers, Outcome, RetryPolicy,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetch = CallFn::new("fetch", |url: String, _ctx: CancellationToken| async move {
//!         // pretend this hits the network and sometimes comes back empty
//!         if url.ends_with("/ready") {
//!             Ok::<_, CallError>(Outcome::Value(format!("fetched {url}")))
//!         } else {
//!             Ok(Outcome::Empty)
//!         }
//!     });
//!
//!     let policy = RetryPolicy {
//!         first: Duration::from_millis(10),
//!         factor: 2.0,
//!         max_retries: 3,
//!         max_delay: Duration::from_millis(80),
//!         ..RetryPolicy::default()
//!     };
//!
//!     let body = run_with_backoff(
//!         &fetch,
//!         "https://example.com/ready".to_string(),
//!         &policy,
//!         &Observers::none(),
//!     )
//!     .await?;
//!     assert!(body.starts_with("fetched"));
//!     Ok(())
//! }
//! ```

mod calls;
mod error;
mod events;
mod observers;
mod outcome;
mod policies;
mod runners;

// ---- Public re-exports ----

pub use calls::{Call, CallFn, CallRef, MergeArgs};
pub use error::{BatchError, CallError, RetryError};
pub use events::{Event, EventKind};
pub use observers::{Observe, Observers};
pub use outcome::Outcome;
pub use policies::{ErrorPolicy, JitterPolicy, RetryPolicy};
pub use runners::{parallel_call, run_with_backoff, run_with_timeout};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
