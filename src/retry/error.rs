//! Error types exchanged with the retry loop.
//!
//! An operation reports each failure as an [`AttemptError`]; the tag decides
//! whether the loop retries it. The loop itself ends in a single [`RetryError`].

use std::io;

use thiserror::Error;

/// Failure of one attempt, tagged with how the retry loop should treat it.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Ordinary failure; the loop sleeps and tries again.
    #[error(transparent)]
    Retryable(anyhow::Error),

    /// Returned to the caller immediately, without wrapping.
    #[error(transparent)]
    PassThrough(anyhow::Error),

    #[error("operation cancelled")]
    Cancelled,
}

impl AttemptError {
    pub fn retryable(err: impl Into<anyhow::Error>) -> Self {
        Self::Retryable(err.into())
    }

    pub fn pass_through(err: impl Into<anyhow::Error>) -> Self {
        Self::PassThrough(err.into())
    }
}

impl From<io::Error> for AttemptError {
    fn from(err: io::Error) -> Self {
        Self::Retryable(err.into())
    }
}

impl From<anyhow::Error> for AttemptError {
    fn from(err: anyhow::Error) -> Self {
        Self::Retryable(err)
    }
}

/// Tag the error of a `Result` so the retry loop does not retry it.
///
/// ```
/// use safe_path_ops::retry::{AttemptError, PassThroughExt};
///
/// let r: Result<(), std::io::Error> = Err(std::io::ErrorKind::AlreadyExists.into());
/// assert!(matches!(r.pass_through(), Err(AttemptError::PassThrough(_))));
/// ```
pub trait PassThroughExt<T> {
    fn pass_through(self) -> Result<T, AttemptError>;
}

impl<T, E> PassThroughExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pass_through(self) -> Result<T, AttemptError> {
        self.map_err(AttemptError::pass_through)
    }
}

/// Terminal failure of a guarded operation.
#[derive(Debug, Error)]
pub enum RetryError {
    /// Retry budget exhausted or the exception handler asked to stop.
    /// `source` is the last failure, possibly replaced by the handler.
    #[error("{}", tried_too_often(.label, .retries))]
    TriedTooOften {
        label: Option<String>,
        retries: u32,
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    PassThrough(anyhow::Error),

    #[error("operation cancelled")]
    Cancelled,
}

fn tried_too_often(label: &Option<String>, retries: &u32) -> String {
    let noun = if *retries == 1 { "time" } else { "times" };
    match label {
        Some(label) => format!("{label}: tried too often ({retries} {noun})"),
        None => format!("tried too often ({retries} {noun})"),
    }
}

impl RetryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_tried_too_often(&self) -> bool {
        matches!(self, Self::TriedTooOften { .. })
    }

    /// Caller-supplied label of the exhausted policy, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::TriedTooOften { label, .. } => label.as_deref(),
            _ => None,
        }
    }

    /// The underlying failure, for both exhausted and passed-through errors.
    pub fn inner(&self) -> Option<&anyhow::Error> {
        match self {
            Self::TriedTooOften { source, .. } | Self::PassThrough(source) => Some(source),
            Self::Cancelled => None,
        }
    }

    /// Result of running an operation with the guard switched off.
    pub(crate) fn unguarded(err: AttemptError) -> Self {
        match err {
            AttemptError::Retryable(e) | AttemptError::PassThrough(e) => Self::PassThrough(e),
            AttemptError::Cancelled => Self::Cancelled,
        }
    }
}
