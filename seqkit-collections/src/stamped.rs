use std::sync::Arc;
use std::time::{Duration, Instant};

/// A value that knows when it was created.
///
/// [`ExpiringMap`](crate::ExpiringMap) reads this timestamp to decide whether
/// an entry has outlived the map's lifetime.
pub trait Timestamped {
    /// The moment the value was created
    fn created_at(&self) -> Instant;

    /// Time elapsed since creation
    fn age(&self) -> Duration {
        self.created_at().elapsed()
    }
}

impl<T: Timestamped + ?Sized> Timestamped for Arc<T> {
    fn created_at(&self) -> Instant {
        (**self).created_at()
    }
}

impl<T: Timestamped + ?Sized> Timestamped for Box<T> {
    fn created_at(&self) -> Instant {
        (**self).created_at()
    }
}

/// Wraps a value together with its creation time
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<V> {
    value: V,
    created_at: Instant,
}

impl<V> Stamped<V> {
    /// Stamps `value` with the current time
    pub fn new(value: V) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Stamps `value` with an explicit creation time
    pub fn with_created_at(value: V, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// Returns a reference to the wrapped value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Unwraps the value, discarding the timestamp
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> Timestamped for Stamped<V> {
    fn created_at(&self) -> Instant {
        self.created_at
    }
}
