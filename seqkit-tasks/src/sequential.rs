//! One-at-a-time combinators.
//!
//! Items are awaited in order and the next item starts only after the
//! previous one finished.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::{Outcome, TaskError};

/// Runs `action` on each item in order, stopping at the first error.
///
/// Items after the failing one are never started.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use seqkit_tasks::for_each_async;
///
/// let result = for_each_async(vec![1, 2, 3], |n| async move {
///     if n == 2 { Err(format!("bad item {}", n)) } else { Ok(()) }
/// })
/// .await;
/// assert_eq!(result, Err("bad item 2".to_string()));
/// # }
/// ```
pub async fn for_each_async<I, F, Fut, E>(items: I, mut action: F) -> Result<(), E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for (index, item) in items.into_iter().enumerate() {
        if let Err(err) = action(item).await {
            tracing::debug!(index, "Sequential for-each stopped at failed item");
            return Err(err);
        }
    }
    Ok(())
}

/// Runs `action` on each item in order and reports one [`Outcome`] per item.
///
/// Failures and panics are captured and the loop carries on, so the result
/// always has as many entries as there were items.
pub async fn safe_for_each_async<I, F, Fut, E>(items: I, mut action: F) -> Vec<Outcome<(), E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let items = items.into_iter();
    let mut outcomes = Vec::with_capacity(items.size_hint().0);

    for (index, item) in items.enumerate() {
        // The future is built inside the guarded block so a panic while
        // creating it is captured too
        let guarded = AssertUnwindSafe(async { action(item).await }).catch_unwind();
        let outcome = match guarded.await {
            Ok(result) => result.map_err(TaskError::Failed),
            Err(payload) => Err(TaskError::from_panic(payload)),
        };

        match &outcome {
            Err(TaskError::Panicked(message)) => {
                tracing::warn!(index, %message, "Work item panicked")
            }
            Err(_) => tracing::warn!(index, "Work item failed"),
            Ok(()) => {}
        }
        outcomes.push(outcome);
    }

    outcomes
}
