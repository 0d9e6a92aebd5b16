//! # Retry policy for the backoff runner.
//!
//! [`RetryPolicy`] bundles everything the backoff runner needs to decide how
//! many attempts to make and how long to wait between them:
//! - [`RetryPolicy::first`] the initial delay;
//! - [`RetryPolicy::factor`] the multiplicative growth factor;
//! - [`RetryPolicy::max_delay`] the delay cap;
//! - [`RetryPolicy::max_retries`] the attempt budget;
//! - [`RetryPolicy::wait_before`] whether the wait precedes or follows each attempt;
//! - [`RetryPolicy::jitter`] randomization of the computed delay;
//! - [`RetryPolicy::on_error`] what to do with hard call errors.
//!
//! The delay for attempt `n` (0-indexed) is `first × factor^n`, clamped to
//! `max_delay`, then jitter is applied. Because the base delay derives purely
//! from the attempt number, jitter output never feeds back into subsequent
//! calculations, and two runner invocations with the same policy always walk
//! the same base sequence.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use callvisor::RetryPolicy;
//!
//! let policy = RetryPolicy {
//!     first: Duration::from_secs(1),
//!     factor: 2.0,
//!     max_retries: 4,
//!     max_delay: Duration::from_secs(5),
//!     ..RetryPolicy::default()
//! };
//!
//! // 1s, 2s, 4s, then capped at 5s.
//! assert_eq!(policy.delay(0), Duration::from_secs(1));
//! assert_eq!(policy.delay(1), Duration::from_secs(2));
//! assert_eq!(policy.delay(2), Duration::from_secs(4));
//! assert_eq!(policy.delay(3), Duration::from_secs(5));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;
use crate::policies::on_error::ErrorPolicy;

/// Immutable retry configuration for one backoff-runner invocation.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Initial delay (delay of attempt 0).
    pub first: Duration,
    /// Multiplicative growth factor (`> 1.0` for real backoff).
    pub factor: f64,
    /// Maximum number of attempts.
    pub max_retries: u32,
    /// Cap applied to every computed delay.
    pub max_delay: Duration,
    /// If `true`, the wait happens before each attempt; otherwise after it.
    pub wait_before: bool,
    /// Randomization applied to the clamped delay.
    pub jitter: JitterPolicy,
    /// What to do when an attempt fails hard (returns an error).
    pub on_error: ErrorPolicy,
}

impl Default for RetryPolicy {
    /// Returns the defaults of the original utility this crate grew out of:
    /// - `first = 30s`, `factor = 1.2`, `max_retries = 5`, `max_delay = 60s`;
    /// - `wait_before = false` (wait after each failed attempt);
    /// - `jitter = None`, `on_error = Propagate`.
    fn default() -> Self {
        Self {
            first: Duration::from_secs(30),
            factor: 1.2,
            max_retries: 5,
            max_delay: Duration::from_secs(60),
            wait_before: false,
            jitter: JitterPolicy::None,
            on_error: ErrorPolicy::Propagate,
        }
    }
}

impl RetryPolicy {
    /// Computes the (jittered) delay for the given attempt number (0-indexed).
    ///
    /// The base is `first × factor^attempt` clamped to
    /// [`max_delay`](RetryPolicy::max_delay). For `factor ≥ 1` this equals the
    /// recursive form `delay_{n+1} = min(delay_n × factor, max_delay)`: once
    /// the cap is reached the delay stays there and never shrinks.
    ///
    /// Overflowing or non-finite intermediate values clamp to the cap.
    pub fn delay(&self, attempt: u32) -> Duration {
        let max_secs = self.max_delay.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let raw_secs = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if !raw_secs.is_finite() || raw_secs < 0.0 || raw_secs > max_secs {
            self.max_delay
        } else {
            Duration::from_secs_f64(raw_secs)
        };

        self.jitter.apply(base)
    }
}
