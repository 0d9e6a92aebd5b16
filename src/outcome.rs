//! # Tagged result of a single call.
//!
//! [`Outcome`] separates "the call produced a usable value" from "the call
//! completed but produced nothing usable". The two are different control
//! signals: an [`Outcome::Empty`] tells the backoff runner to schedule another
//! attempt and leaves a parallel slot at its no-result marker, while a
//! legitimately-absent business value stays representable as
//! `Outcome::Value(None)` with `T = Option<_>`.
//!
//! ## Example
//! ```rust
//! use callvisor::Outcome;
//!
//! let hit: Outcome<u32> = Outcome::Value(7);
//! let miss: Outcome<u32> = Outcome::Empty;
//!
//! assert_eq!(hit.value(), Some(7));
//! assert!(miss.is_empty());
//! assert_eq!(miss.value_or(0), 0);
//! ```

/// Result of one completed call: a usable value, or nothing usable.
///
/// Returned by [`Call::call`](crate::Call::call) inside the `Ok` arm; errors
/// travel separately as [`CallError`](crate::CallError).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call produced a usable value.
    Value(T),
    /// The call completed but produced no usable value.
    ///
    /// For the backoff runner this is the transient-failure signal (retry);
    /// for the parallel runner it marks the slot as "no result".
    Empty,
}

impl<T> Outcome<T> {
    /// Returns `true` if the outcome carries no usable value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    /// Returns `true` if the outcome carries a value.
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Consumes the outcome, returning the value if present.
    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::Empty => None,
        }
    }

    /// Consumes the outcome, returning the value or the given fallback.
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Outcome::Value(v) => v,
            Outcome::Empty => fallback,
        }
    }

    /// Maps `Outcome<T>` to `Outcome<U>` by applying `f` to a carried value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Value(v) => Outcome::Value(f(v)),
            Outcome::Empty => Outcome::Empty,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    /// `Some(v)` becomes `Value(v)`, `None` becomes `Empty`.
    ///
    /// Convenient when porting code that used `None` as the retry signal.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Outcome::Value(v),
            None => Outcome::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let v: Outcome<&str> = Outcome::Value("ok");
        assert!(v.is_value());
        assert!(!v.is_empty());
        assert_eq!(v.value(), Some("ok"));
    }

    #[test]
    fn test_empty_accessors() {
        let e: Outcome<&str> = Outcome::Empty;
        assert!(e.is_empty());
        assert_eq!(e.value(), None);
        assert_eq!(e.value_or("fallback"), "fallback");
    }

    #[test]
    fn test_map_preserves_empty() {
        let e: Outcome<u32> = Outcome::Empty;
        assert_eq!(e.map(|x| x * 2), Outcome::Empty);
        assert_eq!(Outcome::Value(21).map(|x| x * 2), Outcome::Value(42));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Outcome::from(Some(1)), Outcome::Value(1));
        assert_eq!(Outcome::<u32>::from(None), Outcome::Empty);
    }

    #[test]
    fn test_null_business_value_is_distinguishable() {
        // A legitimate "absent" business value is Value(None), not Empty.
        let legit: Outcome<Option<u32>> = Outcome::Value(None);
        assert!(legit.is_value());
    }
}
