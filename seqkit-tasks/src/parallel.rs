//! Fan-out combinators: one tokio task per item.
//!
//! Every combinator waits for all spawned items before returning and keeps
//! results in input order. The token is checked when an item is about to
//! start; an item that has not started once cancellation is requested is
//! skipped and reported as [`TaskError::Cancelled`]. Running callbacks are
//! never interrupted.
//!
//! Must be called from within a tokio runtime.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use crate::cancel::CancellationToken;
use crate::error::{Outcome, TaskError};
use crate::options::FanOutOptions;

async fn fan_out<I, R, E, F, Fut>(
    items: I,
    token: &CancellationToken,
    options: &FanOutOptions,
    action: F,
) -> Vec<Outcome<R, E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let action = Arc::new(action);
    let limiter = options
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.get())));

    let handles: Vec<JoinHandle<Outcome<R, E>>> = items
        .into_iter()
        .map(|item| {
            let action = Arc::clone(&action);
            let limiter = limiter.clone();
            let token = token.clone();

            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => match acquire(limiter, &token).await {
                        Some(permit) => Some(permit),
                        None => return Err(TaskError::Cancelled),
                    },
                    None => None,
                };

                if token.is_cancelled() {
                    return Err(TaskError::Cancelled);
                }
                action(item, token).await.map_err(TaskError::Failed)
            })
        })
        .collect();

    tracing::debug!(
        count = handles.len(),
        bounded = limiter.is_some(),
        "Dispatched work items"
    );

    join_all(handles)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, joined)| {
            let outcome = joined.unwrap_or_else(|err| Err(TaskError::from_join(err)));
            match &outcome {
                Err(TaskError::Failed(_)) => tracing::warn!(index, "Work item failed"),
                Err(TaskError::Panicked(message)) => {
                    tracing::warn!(index, %message, "Work item panicked")
                }
                Err(TaskError::Cancelled) => {
                    tracing::debug!(index, "Work item skipped after cancellation")
                }
                Ok(_) => {}
            }
            outcome
        })
        .collect()
}

/// Waits for a concurrency slot, giving up if cancellation comes first.
async fn acquire(limiter: Arc<Semaphore>, token: &CancellationToken) -> Option<OwnedSemaphorePermit> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        permit = limiter.acquire_owned() => permit.ok(),
    }
}

/// First failure in input order, or every value.
fn first_failure<R, E>(outcomes: Vec<Outcome<R, E>>) -> Result<Vec<R>, TaskError<E>> {
    outcomes.into_iter().collect()
}

/// Runs `action` on every item concurrently and waits for all of them.
///
/// Every item runs to completion even if another one fails. The returned
/// error is the failure of the earliest item in input order, not the
/// first one to finish.
///
/// # Example
///
/// ```rust
/// # #[tokio::main]
/// # async fn main() {
/// use seqkit_tasks::{parallel_for_each_async, CancellationToken};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let token = CancellationToken::new();
///
/// parallel_for_each_async(0..10, &token, move |_| {
///     let counter = Arc::clone(&counter);
///     async move {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok::<(), ()>(())
///     }
/// })
/// .await
/// .unwrap();
///
/// assert_eq!(hits.load(Ordering::SeqCst), 10);
/// # }
/// ```
pub async fn parallel_for_each_async<I, F, Fut, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Result<(), TaskError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    let outcomes = fan_out(items, token, &FanOutOptions::default(), move |item, _| action(item)).await;
    first_failure(outcomes).map(|_| ())
}

/// [`parallel_for_each_async`] whose callback also receives the token.
pub async fn parallel_for_each_async_with_cancellation<I, F, Fut, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Result<(), TaskError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    let outcomes = fan_out(items, token, &FanOutOptions::default(), action).await;
    first_failure(outcomes).map(|_| ())
}

/// Maps every item concurrently, returning the values in input order.
///
/// Fails like [`parallel_for_each_async`]: all items finish first, then the
/// earliest failure in input order is returned.
pub async fn parallel_map_async<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Result<Vec<R>, TaskError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let outcomes = fan_out(items, token, &FanOutOptions::default(), move |item, _| action(item)).await;
    first_failure(outcomes)
}

/// [`parallel_map_async`] whose callback also receives the token.
pub async fn parallel_map_async_with_cancellation<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Result<Vec<R>, TaskError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let outcomes = fan_out(items, token, &FanOutOptions::default(), action).await;
    first_failure(outcomes)
}

/// [`parallel_map_async_with_cancellation`] with bounded concurrency.
pub async fn parallel_map_async_with_options<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    options: &FanOutOptions,
    action: F,
) -> Result<Vec<R>, TaskError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let outcomes = fan_out(items, token, options, action).await;
    first_failure(outcomes)
}

/// Runs `action` on every item concurrently and reports one [`Outcome`]
/// per item.
///
/// Never fails as a whole: failures, panics and skipped items are all
/// captured, so the result has exactly as many entries as there were items.
pub async fn safe_parallel_for_each_async<I, F, Fut, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Vec<Outcome<(), E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    fan_out(items, token, &FanOutOptions::default(), move |item, _| action(item)).await
}

/// [`safe_parallel_for_each_async`] whose callback also receives the token.
pub async fn safe_parallel_for_each_async_with_cancellation<I, F, Fut, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Vec<Outcome<(), E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    fan_out(items, token, &FanOutOptions::default(), action).await
}

/// Maps every item concurrently and reports one [`Outcome`] per item.
pub async fn safe_parallel_map_async<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Vec<Outcome<R, E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    fan_out(items, token, &FanOutOptions::default(), move |item, _| action(item)).await
}

/// [`safe_parallel_map_async`] whose callback also receives the token.
pub async fn safe_parallel_map_async_with_cancellation<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    action: F,
) -> Vec<Outcome<R, E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    fan_out(items, token, &FanOutOptions::default(), action).await
}

/// [`safe_parallel_map_async_with_cancellation`] with bounded concurrency.
///
/// Items waiting for a slot when cancellation is requested are skipped.
pub async fn safe_parallel_map_async_with_options<I, F, Fut, R, E>(
    items: I,
    token: &CancellationToken,
    options: &FanOutOptions,
    action: F,
) -> Vec<Outcome<R, E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(I::Item, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    fan_out(items, token, options, action).await
}
