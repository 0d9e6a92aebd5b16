//! # LogWriter — simple event printer
//!
//! A minimal observer that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//!
//! Fields are printed with `Debug`, so absent ones show up as `None`:
//! ```text
//! [starting] call=Some("fetch") attempt=Some(1)
//! [failed] call=Some("fetch") err=Some("connection refused") attempt=Some(1)
//! [backoff] call=Some("fetch") delay=Some(2s) attempt=Some(1)
//! [timeout] call=Some("fetch") timeout=Some(5s)
//! [abandoned] call=Some("fetch") timeout=Some(5s)
//! [slot-filled] call=Some("crawl") index=Some(0)
//! [batch-completed] call=Some("crawl") slots=Some(3)
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::observers::observe::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::AttemptStarting => {
                println!("[starting] call={:?} attempt={:?}", e.call, e.attempt);
            }
            EventKind::AttemptEmpty => {
                println!("[empty] call={:?} attempt={:?}", e.call, e.attempt);
            }
            EventKind::AttemptFailed => {
                println!(
                    "[failed] call={:?} err={:?} attempt={:?}",
                    e.call, e.error, e.attempt
                );
            }
            EventKind::BackoffScheduled => {
                println!(
                    "[backoff] call={:?} delay={:?} attempt={:?}",
                    e.call, e.delay, e.attempt
                );
            }
            EventKind::RetriesExhausted => {
                println!("[exhausted] call={:?} attempts={:?}", e.call, e.attempt);
            }
            EventKind::TimeoutHit => {
                println!("[timeout] call={:?} timeout={:?}", e.call, e.timeout);
            }
            EventKind::WorkerAbandoned => {
                println!("[abandoned] call={:?} timeout={:?}", e.call, e.timeout);
            }
            EventKind::SlotFilled => {
                println!("[slot-filled] call={:?} index={:?}", e.call, e.index);
            }
            EventKind::SlotEmpty => {
                println!("[slot-empty] call={:?} index={:?}", e.call, e.index);
            }
            EventKind::BatchAborted => {
                println!(
                    "[batch-aborted] call={:?} index={:?} err={:?}",
                    e.call, e.index, e.error
                );
            }
            EventKind::BatchCompleted => {
                println!("[batch-completed] call={:?} slots={:?}", e.call, e.index);
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
