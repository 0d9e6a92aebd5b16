//! # Jitter policy for retry delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays so that many callers
//! retrying the same dependency do not wake up in lockstep.
//!
//! - [`JitterPolicy::None`] — no randomization, exact delays
//! - [`JitterPolicy::Full`] — random delay in `[0, delay]`
//! - [`JitterPolicy::Equal`] — `delay/2 + random[0, delay/2]`

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
///
/// Applied after the exponential delay has been computed and clamped, so
/// jitter never feeds back into later delay calculations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use the exact computed delay.
    ///
    /// The right choice when only one caller is retrying, when timing must
    /// be predictable, and in tests.
    #[default]
    None,

    /// Full jitter: random delay in `[0, delay]`.
    ///
    /// Most aggressive spreading; can shrink an individual wait to zero.
    Full,

    /// Equal jitter: `delay/2 + random[0, delay/2]`.
    ///
    /// Keeps at least half of the computed delay while still decorrelating
    /// callers. A good default when jitter is wanted at all.
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    ///
    /// `None` returns the delay unchanged, whatever its resolution.
    /// Randomization works in nanoseconds, so sub-millisecond delays keep
    /// their bounds instead of truncating to zero.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => {
                let nanos = delay.as_nanos() as u64;
                let mut rng = rand::rng();
                Duration::from_nanos(rng.random_range(0..=nanos))
            }
            JitterPolicy::Equal => {
                let nanos = delay.as_nanos() as u64;
                let half = nanos / 2;
                let jitter = rand::rng().random_range(0..=half);
                Duration::from_nanos(half + jitter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(750);
        assert_eq!(JitterPolicy::None.apply(d), d);
    }

    #[test]
    fn test_none_preserves_submillisecond_delay() {
        let d = Duration::from_micros(500);
        assert_eq!(JitterPolicy::None.apply(d), d);
    }

    #[test]
    fn test_equal_keeps_half_of_submillisecond_delay() {
        let d = Duration::from_micros(400);
        for _ in 0..100 {
            let out = JitterPolicy::Equal.apply(d);
            assert!(out >= Duration::from_micros(200));
            assert!(out <= d);
        }
    }

    #[test]
    fn test_full_stays_within_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            assert!(JitterPolicy::Full.apply(d) <= d);
        }
    }

    #[test]
    fn test_equal_keeps_at_least_half() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            let out = JitterPolicy::Equal.apply(d);
            assert!(out >= Duration::from_millis(500));
            assert!(out <= d);
        }
    }

    #[test]
    fn test_zero_delay_stays_zero() {
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(JitterPolicy::Equal.apply(Duration::ZERO), Duration::ZERO);
    }
}
