//! # Hard-failure policy for the backoff runner.
//!
//! [`ErrorPolicy`] decides what the retry loop does when an attempt returns
//! an error rather than an empty result. The original utility silently
//! swallowed such errors; here the behavior is an explicit choice:
//!
//! - [`ErrorPolicy::Propagate`] the error aborts the loop and reaches the
//!   caller as [`RetryError::Aborted`](crate::RetryError::Aborted) (default).
//! - [`ErrorPolicy::Retry`] the error is reported through the observers and
//!   the loop schedules another attempt, as if the call had produced no
//!   usable result.
//!
//! Under either policy, [`CallError::Fatal`](crate::CallError::Fatal) and
//! [`CallError::Canceled`](crate::CallError::Canceled) always abort.

/// Policy controlling how the backoff runner treats hard call errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the retry loop and surface the error to the caller (default).
    #[default]
    Propagate,

    /// Report the error and keep retrying until the attempt budget runs out.
    ///
    /// Only applies to retryable errors; fatal and cancellation errors abort
    /// regardless.
    Retry,
}
