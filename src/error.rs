//! Error types used by the callvisor runners and work items.
//!
//! This module defines three error enums:
//!
//! - [`CallError`] — errors raised by a single work-item execution.
//! - [`RetryError`] — terminal outcomes of the backoff runner.
//! - [`BatchError`] — terminal outcomes of the parallel runner.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging
//! and metrics; [`CallError`] additionally exposes
//! [`is_retryable`](CallError::is_retryable).

use thiserror::Error;

/// # Errors produced by a work-item execution.
///
/// These represent failures of a single call. Some are retryable (`Fail`),
/// others are terminal (`Fatal`, `Canceled`).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The call failed but may succeed if retried.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable fatal error (never retried).
    #[error("fatal error (no retry): {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// The call observed its cancellation token and stopped cooperatively.
    #[error("call cancelled")]
    Canceled,
}

impl CallError {
    /// Builds a retryable failure from any displayable error.
    pub fn fail(error: impl std::fmt::Display) -> Self {
        CallError::Fail {
            error: error.to_string(),
        }
    }

    /// Builds a fatal, never-retried failure from any displayable error.
    pub fn fatal(error: impl std::fmt::Display) -> Self {
        CallError::Fatal {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use callvisor::CallError;
    ///
    /// let err = CallError::fail("boom");
    /// assert_eq!(err.as_label(), "call_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CallError::Fail { .. } => "call_failed",
            CallError::Fatal { .. } => "call_fatal",
            CallError::Canceled => "call_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CallError::Fail { error } => format!("error: {error}"),
            CallError::Fatal { error } => format!("fatal: {error}"),
            CallError::Canceled => "call cancelled".to_string(),
        }
    }

    /// Indicates whether the error type is safe to retry.
    ///
    /// Returns `true` only for [`CallError::Fail`].
    ///
    /// # Example
    /// ```
    /// use callvisor::CallError;
    ///
    /// assert!(CallError::fail("boom").is_retryable());
    /// assert!(!CallError::fatal("nope").is_retryable());
    /// assert!(!CallError::Canceled.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, CallError::Fail { .. })
    }
}

/// # Terminal outcomes of the backoff runner.
///
/// The source utility reported retry exhaustion as an implicit absent result;
/// here both exhaustion and abort-on-error are explicit typed failures so the
/// caller can tell them apart from a legitimate empty business value.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError {
    /// Every attempt completed without producing a usable value.
    #[error("no usable result after {attempts} attempts")]
    Exhausted {
        /// Number of attempts that were made.
        attempts: u32,
    },

    /// An attempt raised a hard error and the policy chose not to continue.
    #[error("aborted on attempt {attempt}: {source}")]
    Aborted {
        /// The 1-based attempt on which the error occurred.
        attempt: u32,
        /// The work-item error that caused the abort.
        #[source]
        source: CallError,
    },
}

impl RetryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Exhausted { .. } => "retry_exhausted",
            RetryError::Aborted { .. } => "retry_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::Exhausted { attempts } => {
                format!("exhausted after {attempts} attempts")
            }
            RetryError::Aborted { attempt, source } => {
                format!("aborted on attempt {attempt}: {}", source.as_message())
            }
        }
    }
}

/// # Terminal outcomes of the parallel runner.
///
/// The batch is fail-fast: the first slot error (in index order) aborts the
/// whole call, so each variant carries the index of the slot that failed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BatchError {
    /// A work item returned an error for the slot at `index`.
    #[error("slot {index} failed: {source}")]
    CallFailed {
        /// Input position of the failing slot.
        index: usize,
        /// The work-item error.
        #[source]
        source: CallError,
    },

    /// The worker task for the slot at `index` panicked.
    #[error("worker for slot {index} panicked: {error}")]
    WorkerPanicked {
        /// Input position of the failing slot.
        index: usize,
        /// Panic payload rendered as text.
        error: String,
    },
}

impl BatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BatchError::CallFailed { .. } => "batch_call_failed",
            BatchError::WorkerPanicked { .. } => "batch_worker_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BatchError::CallFailed { index, source } => {
                format!("slot {index}: {}", source.as_message())
            }
            BatchError::WorkerPanicked { index, error } => {
                format!("slot {index} panicked: {error}")
            }
        }
    }

    /// Input position of the slot that aborted the batch.
    pub fn index(&self) -> usize {
        match self {
            BatchError::CallFailed { index, .. } => *index,
            BatchError::WorkerPanicked { index, .. } => *index,
        }
    }
}
