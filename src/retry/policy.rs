//! Retry policy and the per-attempt context handed to the exception handler.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::Config;

/// Fallback when no configuration supplies a retry count.
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// Fallback when no configuration supplies a delay.
pub const DEFAULT_SLEEP_DELAY_SECONDS: u64 = 2;

pub type ExceptionHandler = Arc<dyn Fn(&mut AttemptContext<'_>) + Send + Sync>;
pub type MemoryReleaseHook = Arc<dyn Fn() + Send + Sync>;

/// How a guarded operation is retried.
///
/// Cheap to clone; handler and hook are shared. A policy is read-only input to
/// the guard, every invocation keeps its own attempt counter.
#[derive(Clone)]
pub struct RetryPolicy {
    /// When false the operation runs exactly once and errors propagate as-is.
    pub enabled: bool,
    /// Free-form text carried into `RetryError::TriedTooOften` and the logs.
    pub label: Option<String>,
    pub max_retries: u32,
    pub delay: Duration,
    pub release_memory_before_sleep: bool,
    handler: Option<ExceptionHandler>,
    memory_release: Option<MemoryReleaseHook>,
    cancel: Option<CancellationToken>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            label: None,
            max_retries: DEFAULT_RETRY_COUNT,
            delay: Duration::from_secs(DEFAULT_SLEEP_DELAY_SECONDS),
            release_memory_before_sleep: true,
            handler: None,
            memory_release: None,
            cancel: None,
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("enabled", &self.enabled)
            .field("label", &self.label)
            .field("max_retries", &self.max_retries)
            .field("delay", &self.delay)
            .field("release_memory_before_sleep", &self.release_memory_before_sleep)
            .field("handler", &self.handler.is_some())
            .field("memory_release", &self.memory_release.is_some())
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that runs the operation once, unguarded.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Defaults taken from a loaded configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            max_retries: cfg.retry_count,
            delay: Duration::from_secs(cfg.sleep_delay_seconds),
            release_memory_before_sleep: cfg.release_memory_before_sleep,
            ..Self::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_delay_seconds(self, seconds: u64) -> Self {
        self.with_delay(Duration::from_secs(seconds))
    }

    pub fn with_release_memory_before_sleep(mut self, release: bool) -> Self {
        self.release_memory_before_sleep = release;
        self
    }

    /// Called on every failed attempt, including the last one.
    pub fn with_exception_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut AttemptContext<'_>) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Best-effort hook run before each sleep when
    /// `release_memory_before_sleep` is set. Panics inside it are swallowed.
    pub fn with_memory_release<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.memory_release = Some(Arc::new(hook));
        self
    }

    /// Token checked by `protect`/`protect_with` before each attempt and while sleeping.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    pub(crate) fn handler(&self) -> Option<&ExceptionHandler> {
        self.handler.as_ref()
    }

    pub(crate) fn release_memory(&self) {
        if !self.release_memory_before_sleep {
            return;
        }
        let Some(hook) = &self.memory_release else {
            return;
        };

        debug!(label = self.label_or_empty(), "releasing memory before retry");
        if panic::catch_unwind(AssertUnwindSafe(|| hook())).is_err() {
            warn!(label = self.label_or_empty(), "memory release hook panicked; ignoring");
        }
    }
}

/// What the exception handler sees for one failed attempt.
pub struct AttemptContext<'a> {
    error: anyhow::Error,
    attempt: u32,
    policy: &'a RetryPolicy,
    want_abort: bool,
}

impl<'a> AttemptContext<'a> {
    pub(crate) fn new(error: anyhow::Error, attempt: u32, policy: &'a RetryPolicy) -> Self {
        Self {
            error,
            attempt,
            policy,
            want_abort: false,
        }
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    /// Swap in a different error; it becomes the source of the terminal error.
    pub fn replace_error(&mut self, error: impl Into<anyhow::Error>) {
        self.error = error.into();
    }

    /// 1-based number of the attempt that just failed.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn policy(&self) -> &RetryPolicy {
        self.policy
    }

    /// Stop retrying after this attempt.
    pub fn abort(&mut self) {
        self.want_abort = true;
    }

    pub fn want_abort(&self) -> bool {
        self.want_abort
    }

    pub(crate) fn into_parts(self) -> (anyhow::Error, bool) {
        (self.error, self.want_abort)
    }
}
