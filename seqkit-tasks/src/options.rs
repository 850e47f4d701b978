//! Fan-out configuration.

use std::num::NonZeroUsize;

/// Environment variable read by [`FanOutOptions::from_env`]
pub const MAX_CONCURRENCY_ENV: &str = "SEQKIT_MAX_CONCURRENCY";

/// Options for the parallel combinators.
///
/// By default fan-out is unbounded: every element gets its own task right
/// away. Bounding it is the caller's choice.
///
/// # Example
///
/// ```rust
/// use seqkit_tasks::FanOutOptions;
/// use std::num::NonZeroUsize;
///
/// let options = FanOutOptions::new()
///     .with_max_concurrency(NonZeroUsize::new(8).unwrap());
/// assert_eq!(options.max_concurrency.map(|n| n.get()), Some(8));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FanOutOptions {
    /// Upper bound on work items running at the same time (`None` = unbounded)
    pub max_concurrency: Option<NonZeroUsize>,
}

impl FanOutOptions {
    /// Create unbounded options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many work items may run at once.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of concurrently running items
    pub fn with_max_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Create options from environment variables.
    ///
    /// Reads:
    /// - `SEQKIT_MAX_CONCURRENCY` - positive integer limit (unset, zero or
    ///   unparsable means unbounded)
    pub fn from_env() -> Self {
        Self {
            max_concurrency: parse_limit(std::env::var(MAX_CONCURRENCY_ENV).ok().as_deref()),
        }
    }
}

fn parse_limit(raw: Option<&str>) -> Option<NonZeroUsize> {
    raw.and_then(|value| value.trim().parse().ok())
}
