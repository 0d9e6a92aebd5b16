//! # Observers: fan-out over multiple event sinks.
//!
//! [`Observers`] holds a fixed set of [`Observe`] sinks and delivers each
//! [`Event`] to all of them, awaited in registration order. The set is a
//! cheap `Arc`-backed handle: cloning shares the same sinks.
//!
//! A panicking observer is isolated: the panic is caught, reported to
//! stderr, and the remaining observers still receive the event.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use callvisor::{Observe, Observers, Event};
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl Observe for Printer {
//!     async fn on_event(&self, _ev: &Event) { /* println!(...) */ }
//!     fn name(&self) -> &'static str { "printer" }
//! }
//!
//! let obs = Observers::new(vec![Arc::new(Printer) as Arc<dyn Observe>]);
//! let silent = Observers::none();
//! assert!(silent.is_empty());
//! # let _ = obs;
//! ```

use std::sync::Arc;

use futures::FutureExt;

use crate::events::Event;
use crate::observers::observe::Observe;

/// Shared, immutable set of event sinks.
#[derive(Clone, Default)]
pub struct Observers {
    sinks: Arc<[Arc<dyn Observe>]>,
}

impl Observers {
    /// Creates a set from the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Observe>>) -> Self {
        Self {
            sinks: sinks.into(),
        }
    }

    /// Creates an empty set for callers that do not observe events.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if no sinks are registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Delivers an event to every sink, in registration order.
    ///
    /// A panic inside one sink is caught and reported to stderr; delivery
    /// continues with the next sink.
    pub(crate) async fn publish(&self, event: Event) {
        for sink in self.sinks.iter() {
            let fut = sink.on_event(&event);
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                let info = panic_message(&panic_err);
                eprintln!("[callvisor] observer {:?} panicked: {info}", sink.name());
            }
        }
    }
}

/// Renders a panic payload as text.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
