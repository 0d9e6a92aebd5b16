//! # Argument merging for fan-out calls.
//!
//! The parallel runner takes one static argument value shared by every slot
//! plus a per-slot dynamic value of the same type, and invokes the work item
//! with `static.clone().merge(dynamic)`. [`MergeArgs`] defines how the two
//! combine; the overlay (dynamic) side wins wherever the two conflict.
//!
//! Implementations are provided for `()` (no arguments) and for
//! `HashMap<K, V>` (overlay keys replace base keys). Typed argument structs
//! implement the trait themselves, typically by overwriting `Option` fields
//! that the overlay sets.

use std::collections::HashMap;
use std::hash::Hash;

/// Combines a base (static) argument value with an overlay (dynamic) one.
///
/// The overlay takes precedence on conflict.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use callvisor::MergeArgs;
///
/// let base: HashMap<&str, i64> = HashMap::from([("depth", 1), ("limit", 10)]);
/// let overlay = HashMap::from([("depth", 3)]);
///
/// let merged = base.merge(overlay);
/// assert_eq!(merged["depth"], 3);  // overlay wins
/// assert_eq!(merged["limit"], 10); // base preserved
/// ```
pub trait MergeArgs: Sized {
    /// Consumes `self` (the base) and the overlay, returning the merged value.
    fn merge(self, overlay: Self) -> Self;
}

impl MergeArgs for () {
    fn merge(self, _overlay: Self) -> Self {}
}

impl<K, V> MergeArgs for HashMap<K, V>
where
    K: Eq + Hash,
{
    /// Overlay entries replace base entries with the same key.
    fn merge(mut self, overlay: Self) -> Self {
        self.extend(overlay);
        self
    }
}

impl<T> MergeArgs for Option<T> {
    /// `Some` overlay replaces the base; `None` overlay keeps it.
    fn merge(self, overlay: Self) -> Self {
        overlay.or(self)
    }
}
