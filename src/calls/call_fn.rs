//! # Function-backed work item (`CallFn`)
//!
//! [`CallFn`] wraps a closure `F: Fn(A, CancellationToken) -> Fut`, producing
//! a fresh future per invocation. This avoids shared mutable state between
//! attempts: each retry or slot gets a future that owns its own state. If a
//! call genuinely needs shared state, capture an `Arc<...>` inside the
//! closure explicitly.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use callvisor::{CallFn, CallRef, CallError, Outcome};
//!
//! let double: CallRef<u32, u32> = CallFn::arc("double", |x: u32, _ctx: CancellationToken| async move {
//!     Ok::<_, CallError>(Outcome::Value(x * 2))
//! });
//!
//! assert_eq!(double.name(), "double");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::calls::call::Call;
use crate::error::CallError;
use crate::outcome::Outcome;

/// Function-backed work-item implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct CallFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> CallFn<F> {
    /// Creates a new function-backed call.
    ///
    /// Prefer [`CallFn::arc`] when you immediately need a
    /// [`CallRef`](crate::CallRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the call and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut, A, T> Call<A, T> for CallFn<F>
where
    F: Fn(A, CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<Outcome<T>, CallError>> + Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, args: A, ctx: CancellationToken) -> Result<Outcome<T>, CallError> {
        (self.f)(args, ctx).await
    }
}
