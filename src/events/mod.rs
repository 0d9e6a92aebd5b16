//! # Runner observability events.
//!
//! Every externally observable step of the runners (attempt starts, waits,
//! timeouts, slot results, batch termination) is reported as an [`Event`]
//! with an [`EventKind`] and optional metadata. Events are delivered to the
//! [`Observe`](crate::Observe) sinks registered in an
//! [`Observers`](crate::Observers) set.

mod event;

pub use event::{Event, EventKind};
