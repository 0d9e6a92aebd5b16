//! # Work-item abstractions.
//!
//! This module provides the call-related types:
//! - [`Call`] - trait for implementing async cancelable work items
//! - [`CallFn`] - function-backed work-item implementation
//! - [`CallRef`] - shared reference to a call (`Arc<dyn Call>`)
//! - [`MergeArgs`] - static/dynamic argument merging for fan-out

mod call;
mod call_fn;
mod merge;

pub use call::{Call, CallRef};
pub use call_fn::CallFn;
pub use merge::MergeArgs;
