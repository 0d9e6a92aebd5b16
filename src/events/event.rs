//! # Runtime events emitted by the runners.
//!
//! The [`EventKind`] enum classifies events across the three runners:
//! - **Retry events**: attempt flow in the backoff runner.
//! - **Deadline events**: timeout hits and worker abandonment.
//! - **Batch events**: per-slot results and batch termination.
//!
//! The [`Event`] struct carries the kind plus optional metadata such as the
//! call name, attempt number, delay, deadline, slot index, and error text.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events from several
//! concurrent runner invocations interleave.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use callvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::AttemptFailed)
//!     .with_call("fetch")
//!     .with_attempt(3)
//!     .with_error("boom");
//!
//! assert_eq!(ev.kind, EventKind::AttemptFailed);
//! assert_eq!(ev.call.as_deref(), Some("fetch"));
//! assert_eq!(ev.error.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runner events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Backoff runner ===
    /// An attempt is about to run.
    ///
    /// Sets: `call`, `attempt` (1-based), `at`, `seq`.
    AttemptStarting,

    /// An attempt completed without producing a usable value.
    ///
    /// Sets: `call`, `attempt`, `at`, `seq`.
    AttemptEmpty,

    /// An attempt failed hard.
    ///
    /// Sets: `call`, `attempt`, `error`, `at`, `seq`.
    AttemptFailed,

    /// A wait was scheduled around an attempt.
    ///
    /// Sets: `call`, `attempt`, `delay`, `at`, `seq`.
    BackoffScheduled,

    /// The attempt budget ran out without a usable value.
    ///
    /// Sets: `call`, `attempt` (total attempts), `at`, `seq`.
    RetriesExhausted,

    // === Timeout runner ===
    /// The deadline elapsed before the worker completed.
    ///
    /// Sets: `call`, `timeout`, `at`, `seq`.
    TimeoutHit,

    /// The worker was left running in the background after a timeout.
    ///
    /// Its cancellation token has been cancelled, but the stop is
    /// cooperative: the worker may keep producing side effects until it
    /// checks the token. Sets: `call`, `timeout`, `at`, `seq`.
    WorkerAbandoned,

    // === Parallel runner ===
    /// A slot produced a usable value.
    ///
    /// Sets: `call`, `index`, `at`, `seq`.
    SlotFilled,

    /// A slot completed without a usable value.
    ///
    /// Sets: `call`, `index`, `at`, `seq`.
    SlotEmpty,

    /// The batch was aborted by a slot failure (fail-fast).
    ///
    /// Sets: `call`, `index`, `error`, `at`, `seq`.
    BatchAborted,

    /// Every slot of the batch completed.
    ///
    /// Sets: `call`, `index` (slot count), `at`, `seq`.
    BatchCompleted,
}

/// Runner event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// What happened.
    pub kind: EventKind,

    /// Name of the call involved.
    pub call: Option<Arc<str>>,
    /// Attempt number (1-based) for retry events.
    pub attempt: Option<u32>,
    /// Backoff delay scheduled around an attempt.
    pub delay: Option<Duration>,
    /// Deadline for timeout events.
    pub timeout: Option<Duration>,
    /// Slot index for batch events.
    pub index: Option<usize>,
    /// Human-readable error text.
    pub error: Option<Arc<str>>,
}

impl Event {
    /// Creates an event stamped with the current time and next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            call: None,
            attempt: None,
            delay: None,
            timeout: None,
            index: None,
            error: None,
        }
    }

    /// Sets the call name.
    pub fn with_call(mut self, name: impl AsRef<str>) -> Self {
        self.call = Some(Arc::from(name.as_ref()));
        self
    }

    /// Sets the attempt number (1-based).
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Sets the scheduled backoff delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the slot index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the error text.
    pub fn with_error(mut self, error: impl AsRef<str>) -> Self {
        self.error = Some(Arc::from(error.as_ref()));
        self
    }
}
