//! Retry-with-backoff guard for fallible filesystem operations.
//!
//! Notes:
//! - Operations report failures as `AttemptError`; only `Retryable` is retried.
//! - The policy is read-only input; each call keeps its own attempt counter.
//! - Exhaustion yields `RetryError::TriedTooOften` with the real cause as `source()`.

mod error;
mod guard;
mod policy;

pub use error::{AttemptError, PassThroughExt, RetryError};
pub use guard::{protect, protect_async, protect_with, protect_with_cancel};
pub use policy::{
    AttemptContext, DEFAULT_RETRY_COUNT, DEFAULT_SLEEP_DELAY_SECONDS, ExceptionHandler,
    MemoryReleaseHook, RetryPolicy,
};
