//! # Event observer trait.
//!
//! Provides [`Observe`] — the extension point for plugging a logging or
//! metrics sink into the runners. The runners treat the sink as an opaque
//! injected dependency: they report what happened and never depend on what
//! the sink does with it.
//!
//! ## Rules
//! - `on_event` is awaited inline by the publishing runner: keep it cheap
//!   and non-blocking (hand heavy work to a channel of your own).
//! - Handle errors internally; do not panic.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use callvisor::{Observe, Event, EventKind};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Observe for Metrics {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::AttemptFailed) {
//!             // bump a counter, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event sink for runner observability.
///
/// Implementations receive every event a runner publishes, in publish order
/// for any single runner invocation.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Awaited by the publishing runner; keep it fast.
    async fn on_event(&self, event: &Event);

    /// Returns the observer name used in logs/diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "metrics", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
