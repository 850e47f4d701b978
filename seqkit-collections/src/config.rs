use std::time::Duration;

/// Configuration for an [`ExpiringMap`](crate::ExpiringMap)
///
/// # Example
///
/// ```rust
/// use seqkit_collections::ExpiringMapConfig;
/// use std::time::Duration;
///
/// let config = ExpiringMapConfig::default()
///     .with_lifetime(Duration::from_secs(30))
///     .with_initial_capacity(1024);
/// ```
#[derive(Debug, Clone)]
pub struct ExpiringMapConfig {
    /// How long an entry stays visible after its creation timestamp (default: 60 seconds)
    pub lifetime: Duration,
    /// Number of entries to pre-allocate room for (default: 0)
    pub initial_capacity: usize,
}

impl Default for ExpiringMapConfig {
    fn default() -> Self {
        Self {
            lifetime: Duration::from_secs(60),
            initial_capacity: 0,
        }
    }
}

impl ExpiringMapConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry lifetime
    ///
    /// Entries whose age reaches this duration are swept on the next access.
    /// A zero lifetime is rejected when the map is built.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the initial capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
