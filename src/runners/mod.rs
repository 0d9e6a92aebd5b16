//! # The three runners.
//!
//! Each runner is a leaf utility: no shared state, freely composable by the
//! caller (e.g. a backoff-wrapped call can be one slot of a parallel batch).
//!
//! - [`run_with_backoff`] — bounded retry with exponentially growing delays
//! - [`run_with_timeout`] — deadline-bounded execution with a default result
//! - [`parallel_call`] — bounded fan-out with deterministic result order

mod backoff;
mod parallel;
mod timeout;

pub use backoff::run_with_backoff;
pub use parallel::parallel_call;
pub use timeout::run_with_timeout;
