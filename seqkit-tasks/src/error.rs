//! Error types for the for-each combinators.

use std::any::Any;

use thiserror::Error;
use tokio::task::JoinError;

/// Why a single unit of work did not produce a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError<E> {
    /// The callback returned an error
    #[error("Work item failed: {0}")]
    Failed(E),

    /// The callback panicked
    #[error("Work item panicked: {0}")]
    Panicked(String),

    /// Cancellation was requested before the work item started
    #[error("Work item was cancelled before it started")]
    Cancelled,
}

/// Per-item result of the "safe" combinators.
pub type Outcome<R, E> = Result<R, TaskError<E>>;

impl<E> TaskError<E> {
    /// Returns `true` if the item was skipped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskError::Cancelled)
    }

    /// Returns `true` if the callback panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked(_))
    }

    /// Returns the callback's own error, if that is what happened.
    pub fn failure(&self) -> Option<&E> {
        match self {
            TaskError::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        TaskError::Panicked(message)
    }

    /// Converts a failed join into an error. A join that did not panic means
    /// the runtime dropped the task, which counts as cancellation.
    pub(crate) fn from_join(err: JoinError) -> Self {
        if err.is_panic() {
            Self::from_panic(err.into_panic())
        } else {
            TaskError::Cancelled
        }
    }
}
