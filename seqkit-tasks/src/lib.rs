//! # Seqkit Tasks
//!
//! Async for-each combinators on tokio.
//!
//! ## Features
//!
//! - Sequential: [`for_each_async`], [`safe_for_each_async`]
//! - Fan-out with first-failure reporting: [`parallel_for_each_async`],
//!   [`parallel_map_async`]
//! - Fan-out that never fails as a whole: [`safe_parallel_for_each_async`],
//!   [`safe_parallel_map_async`], one [`Outcome`] per item
//! - `*_with_cancellation` variants hand the [`CancellationToken`] to the
//!   callback; `*_with_options` variants bound concurrency via [`FanOutOptions`]
//!
//! ## Example
//!
//! ```rust
//! use seqkit_tasks::{safe_parallel_map_async, CancellationToken, TaskError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let token = CancellationToken::new();
//!     let outcomes = safe_parallel_map_async(vec![4, 0, 2], &token, |n| async move {
//!         if n == 0 { Err("division by zero") } else { Ok(100 / n) }
//!     })
//!     .await;
//!
//!     assert_eq!(outcomes[0], Ok(25));
//!     assert_eq!(outcomes[1], Err(TaskError::Failed("division by zero")));
//!     assert_eq!(outcomes[2], Ok(50));
//! }
//! ```

mod cancel;
mod error;
mod options;
mod parallel;
mod sequential;

pub use cancel::CancellationToken;
pub use error::{Outcome, TaskError};
pub use options::{FanOutOptions, MAX_CONCURRENCY_ENV};
pub use parallel::{
    parallel_for_each_async, parallel_for_each_async_with_cancellation, parallel_map_async,
    parallel_map_async_with_cancellation, parallel_map_async_with_options,
    safe_parallel_for_each_async, safe_parallel_for_each_async_with_cancellation,
    safe_parallel_map_async, safe_parallel_map_async_with_cancellation,
    safe_parallel_map_async_with_options,
};
pub use sequential::{for_each_async, safe_for_each_async};
