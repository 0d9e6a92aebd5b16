//! Retry policies.
//!
//! This module groups the knobs that control **how many** attempts the
//! backoff runner makes and **how long** it waits between them.
//!
//! ## Contents
//! - [`RetryPolicy`] attempt budget and delay curve (first / factor / cap)
//! - [`JitterPolicy`] randomization strategy to avoid thundering herd
//! - [`ErrorPolicy`]  what to do when an attempt fails hard
//!
//! ## Quick wiring
//! ```text
//! RetryPolicy { first, factor, max_retries, max_delay, wait_before, jitter, on_error }
//!      └─► runners::run_with_backoff uses:
//!           - delay(attempt) to schedule the wait around each attempt
//!           - on_error to decide abort vs. keep retrying
//! ```
//!
//! ## Defaults
//! - `RetryPolicy::default()` → first=30s, factor=1.2, retries=5, cap=60s,
//!   wait after each attempt.
//! - `JitterPolicy::None` by default; consider `Equal` for balanced randomness.
//! - `ErrorPolicy::Propagate` (errors abort the loop).

mod jitter;
mod on_error;
mod retry;

pub use jitter::JitterPolicy;
pub use on_error::ErrorPolicy;
pub use retry::RetryPolicy;
