//! The retry loop.
//!
//! Attempt(1) -> run -> Ok => done
//!                   -> PassThrough / Cancelled => returned as-is
//!                   -> Retryable => handler, budget check, memory hook, sleep, Attempt(n+1)
//!
//! The blocking entry points sleep on the calling thread; `protect_async`
//! suspends only between attempts and races the delay against a cancellation token.

use std::future::Future;
use std::thread;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::{AttemptError, RetryError};
use super::policy::{AttemptContext, RetryPolicy};

/// Granularity of the cancellable blocking sleep.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Run `op` until it succeeds, retrying failures according to `policy`.
/// A token attached with [`RetryPolicy::with_cancellation`] is honored.
pub fn protect<F>(policy: &RetryPolicy, op: F) -> Result<(), RetryError>
where
    F: FnMut() -> Result<(), AttemptError>,
{
    run_blocking(policy, policy.cancellation(), op)
}

/// Like [`protect`], returning the value of the first successful attempt.
///
/// ```
/// use std::time::Duration;
/// use safe_path_ops::retry::{protect_with, AttemptError, RetryPolicy};
///
/// let policy = RetryPolicy::new().with_delay(Duration::ZERO);
/// let mut calls = 0;
/// let v = protect_with(&policy, || {
///     calls += 1;
///     if calls < 2 {
///         return Err(AttemptError::retryable(anyhow::anyhow!("not yet")));
///     }
///     Ok(calls)
/// });
/// assert_eq!(v.unwrap(), 2);
/// ```
pub fn protect_with<T, F>(policy: &RetryPolicy, op: F) -> Result<T, RetryError>
where
    F: FnMut() -> Result<T, AttemptError>,
{
    run_blocking(policy, policy.cancellation(), op)
}

/// Blocking variant that checks `cancel` (instead of the policy's own token)
/// before every attempt and while sleeping.
pub fn protect_with_cancel<T, F>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    op: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Result<T, AttemptError>,
{
    run_blocking(policy, Some(cancel), op)
}

/// Async variant. The delay is interruptible: cancelling `cancel` ends the
/// loop with `RetryError::Cancelled`, never with `TriedTooOften`.
pub async fn protect_async<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    if !policy.enabled {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled);
        }
        return op().await.map_err(RetryError::unguarded);
    }

    let mut attempt: u32 = 0;
    loop {
        if cancel.is_cancelled() {
            debug!(label = policy.label_or_empty(), attempt, "cancelled before attempt");
            return Err(RetryError::Cancelled);
        }
        attempt = attempt.saturating_add(1);

        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => after_failure(policy, attempt, err)?,
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(label = policy.label_or_empty(), attempt, "cancelled during retry delay");
                return Err(RetryError::Cancelled);
            }
            _ = tokio::time::sleep(policy.delay) => {}
        }
    }
}

fn run_blocking<T, F>(
    policy: &RetryPolicy,
    cancel: Option<&CancellationToken>,
    mut op: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Result<T, AttemptError>,
{
    let is_cancelled = || cancel.is_some_and(CancellationToken::is_cancelled);

    if !policy.enabled {
        if is_cancelled() {
            return Err(RetryError::Cancelled);
        }
        return op().map_err(RetryError::unguarded);
    }

    let mut attempt: u32 = 0;
    loop {
        if is_cancelled() {
            debug!(label = policy.label_or_empty(), attempt, "cancelled before attempt");
            return Err(RetryError::Cancelled);
        }
        attempt = attempt.saturating_add(1);

        match op() {
            Ok(value) => return Ok(value),
            Err(err) => after_failure(policy, attempt, err)?,
        }

        if !sleep_blocking(policy.delay, cancel) {
            debug!(label = policy.label_or_empty(), attempt, "cancelled during retry delay");
            return Err(RetryError::Cancelled);
        }
    }
}

/// Classify a failed attempt. `Ok(())` means: sleep and try again.
fn after_failure(policy: &RetryPolicy, attempt: u32, err: AttemptError) -> Result<(), RetryError> {
    let error = match err {
        AttemptError::Retryable(e) => e,
        AttemptError::PassThrough(e) => {
            debug!(label = policy.label_or_empty(), attempt, error = %e, "passing error through");
            return Err(RetryError::PassThrough(e));
        }
        AttemptError::Cancelled => return Err(RetryError::Cancelled),
    };

    warn!(
        label = policy.label_or_empty(),
        attempt,
        max_retries = policy.max_retries,
        error = %error,
        "file operation failed"
    );

    let mut ctx = AttemptContext::new(error, attempt, policy);
    if let Some(handler) = policy.handler() {
        handler(&mut ctx);
    }
    let (error, want_abort) = ctx.into_parts();

    if attempt > policy.max_retries || want_abort {
        return Err(RetryError::TriedTooOften {
            label: policy.label.clone(),
            retries: policy.max_retries,
            attempts: attempt,
            source: error,
        });
    }

    policy.release_memory();
    debug!(
        label = policy.label_or_empty(),
        attempt,
        delay = ?policy.delay,
        "sleeping before retry"
    );
    Ok(())
}

/// Returns false when cancelled before the delay elapsed.
fn sleep_blocking(delay: Duration, cancel: Option<&CancellationToken>) -> bool {
    let Some(cancel) = cancel else {
        thread::sleep(delay);
        return true;
    };

    // None: the deadline is beyond what Instant can represent, so only cancel ends the wait
    let deadline = Instant::now().checked_add(delay);
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let slice = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return true;
                }
                SLEEP_SLICE.min(deadline - now)
            }
            None => SLEEP_SLICE,
        };
        thread::sleep(slice);
    }
}
