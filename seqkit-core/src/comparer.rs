//! Pluggable comparison strategies.
//!
//! Extrema and ordering helpers accept any [`Comparer`]. Plain closures of the
//! shape `Fn(&T, &T) -> Ordering` are comparers too, so callers can pass
//! `|a: &u32, b: &u32| a.cmp(b)` directly.

use std::cmp::Ordering;
use std::marker::PhantomData;

/// Compares two values of `T`.
pub trait Comparer<T: ?Sized> {
    /// Returns the ordering of `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Wraps this comparer so that it orders in the opposite direction.
    fn reversed(self) -> Inverse<Self>
    where
        Self: Sized,
    {
        Inverse::new(self)
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders values by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparer<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts the comparer it wraps.
///
/// # Example
///
/// ```rust
/// use seqkit_core::{Comparer, Inverse, Natural};
/// use std::cmp::Ordering;
///
/// let desc = Inverse::new(Natural);
/// assert_eq!(desc.compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Inverse<C> {
    inner: C,
}

impl<C> Inverse<C> {
    /// Creates a comparer ordering opposite to `inner`
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Returns the wrapped comparer
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Inverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.inner.compare(b, a)
    }
}

/// Orders values by a projected key.
pub struct ByKey<T: ?Sized, K, F> {
    key: F,
    _marker: PhantomData<fn(&T) -> K>,
}

impl<T: ?Sized, K, F> ByKey<T, K, F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    /// Creates a comparer that orders by `key(value)`
    pub fn new(key: F) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, K, F> Comparer<T> for ByKey<T, K, F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.key)(a).cmp(&(self.key)(b))
    }
}
