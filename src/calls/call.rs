//! # Work-item abstraction.
//!
//! This module defines the [`Call`] trait: an async, cancelable unit of work
//! that takes one argument value and produces an [`Outcome`]. The common
//! handle type is [`CallRef`], an `Arc<dyn Call>` suitable for sharing with
//! the spawning runners.
//!
//! A call receives a [`CancellationToken`]; implementations that may be
//! wrapped by the timeout runner should check it periodically, because
//! abandonment after a deadline is cooperative, never preemptive.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::CallError;
use crate::outcome::Outcome;

/// Shared handle to a work item (`Arc<dyn Call>`).
pub type CallRef<A, T> = Arc<dyn Call<A, T>>;

/// # Asynchronous, cancelable unit of work.
///
/// A `Call` has a stable [`name`](Call::name) and an async
/// [`call`](Call::call) method that receives an argument value and a
/// [`CancellationToken`]. The token is cancelled when a runner gives up on
/// the call (timeout elapsed, batch aborted); implementations should notice
/// and return [`CallError::Canceled`] promptly.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use callvisor::{Call, CallError, Outcome};
///
/// struct Lookup;
///
/// #[async_trait]
/// impl Call<u32, String> for Lookup {
///     fn name(&self) -> &str { "lookup" }
///
///     async fn call(&self, key: u32, ctx: CancellationToken) -> Result<Outcome<String>, CallError> {
///         if ctx.is_cancelled() {
///             return Err(CallError::Canceled);
///         }
///         if key == 0 {
///             return Ok(Outcome::Empty); // nothing usable, retry signal
///         }
///         Ok(Outcome::Value(format!("row-{key}")))
///     }
/// }
/// ```
#[async_trait]
pub trait Call<A, T>: Send + Sync + 'static
where
    A: Send + 'static,
    T: Send + 'static,
{
    /// Returns a stable, human-readable call name (used in events).
    fn name(&self) -> &str;

    /// Executes the call once with the given arguments.
    ///
    /// Returning `Ok(Outcome::Empty)` means "completed, nothing usable";
    /// returning `Err` means the attempt failed hard. Implementations should
    /// check `ctx.is_cancelled()` at natural points and exit quickly.
    async fn call(&self, args: A, ctx: CancellationToken) -> Result<Outcome<T>, CallError>;
}
