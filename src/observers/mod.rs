//! # Observability sinks.
//!
//! The runners report progress through an injected set of observers:
//! - [`Observe`] - trait for a single event sink
//! - [`Observers`] - cloneable fan-out set passed to each runner
//! - `LogWriter` - stdout printer for demos (behind the `logging` feature)

mod observe;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use observe::Observe;
pub use set::Observers;

#[cfg(feature = "logging")]
pub use log::LogWriter;
