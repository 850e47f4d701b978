//! Default-returning accessors and ordering helpers for iterators.
//!
//! Every method consumes the iterator it is called on and leaves the
//! underlying collection untouched. "Not found" yields the caller's default;
//! only cardinality violations surface as [`SeqError`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::iter::{FusedIterator, Skip, Take};
use std::ops::{Bound, RangeBounds};

use crate::error::SeqError;

/// Extension methods available on every [`Iterator`].
///
/// # Example
///
/// ```rust
/// use seqkit_core::SequenceExt;
///
/// let empty: Vec<i32> = Vec::new();
/// assert_eq!(empty.into_iter().first_or(-1), -1);
/// assert_eq!(vec![3, 4].into_iter().single_or(0).unwrap_err().is_cardinality(), true);
/// ```
pub trait SequenceExt: Iterator + Sized {
    /// Returns the first element, or `default` if the sequence is empty.
    fn first_or(mut self, default: Self::Item) -> Self::Item {
        self.next().unwrap_or(default)
    }

    /// Returns the first element matching `predicate`, or `default`.
    fn first_where_or<P>(mut self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.find(predicate).unwrap_or(default)
    }

    /// Returns the last element, or `default` if the sequence is empty.
    fn last_or(self, default: Self::Item) -> Self::Item {
        self.last().unwrap_or(default)
    }

    /// Returns the last element matching `predicate`, or `default`.
    fn last_where_or<P>(self, mut predicate: P, default: Self::Item) -> Self::Item
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.fold(default, |acc, item| if predicate(&item) { item } else { acc })
    }

    /// Returns the only element, or `default` if the sequence is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::MoreThanOneElement`] if a second element exists.
    fn single_or(mut self, default: Self::Item) -> Result<Self::Item, SeqError> {
        match self.next() {
            None => Ok(default),
            Some(first) => {
                if self.next().is_some() {
                    Err(SeqError::MoreThanOneElement)
                } else {
                    Ok(first)
                }
            }
        }
    }

    /// Returns the only element matching `predicate`, or `default` if none does.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::MoreThanOneMatch`] if two or more elements match.
    fn single_where_or<P>(mut self, mut predicate: P, default: Self::Item) -> Result<Self::Item, SeqError>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        match self.find(&mut predicate) {
            None => Ok(default),
            Some(found) => {
                if self.any(|item| predicate(&item)) {
                    Err(SeqError::MoreThanOneMatch)
                } else {
                    Ok(found)
                }
            }
        }
    }

    /// Returns the only element.
    ///
    /// # Errors
    ///
    /// [`SeqError::NoElements`] for an empty sequence and
    /// [`SeqError::MoreThanOneElement`] for more than one element.
    fn single(mut self) -> Result<Self::Item, SeqError> {
        let first = self.next().ok_or(SeqError::NoElements)?;
        if self.next().is_some() {
            return Err(SeqError::MoreThanOneElement);
        }
        Ok(first)
    }

    /// Returns the position of the first element equal to `value`.
    fn index_of(mut self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.position(|item| &item == value)
    }

    /// Returns the position of the first element matching `predicate`.
    fn index_where<P>(mut self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.position(|item| predicate(&item))
    }

    /// Returns `true` if no element matches `predicate`.
    fn none<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        !self.any(|item| predicate(&item))
    }

    /// Lazily drops every element whose key was already produced by an
    /// earlier element. First occurrences keep their relative order.
    fn distinct_by<K, F>(self, key: F) -> DistinctBy<Self, K, F>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        DistinctBy {
            iter: self,
            key,
            seen: HashSet::new(),
        }
    }

    /// Yields at most `count` elements starting at index `start`.
    fn slice(self, start: usize, count: usize) -> Take<Skip<Self>> {
        self.skip(start).take(count)
    }

    /// Yields the elements whose indices fall inside `range`.
    ///
    /// A range whose end precedes its start yields nothing.
    fn slice_range<R>(self, range: R) -> Take<Skip<Self>>
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => usize::MAX,
        };
        self.slice(start, end.saturating_sub(start))
    }

    /// Reorders the sequence to follow `order`.
    ///
    /// This is an inner join on `key`: for every key yielded by `order`, all
    /// elements carrying that key are emitted in their original relative
    /// order. Elements whose key never appears in `order` are dropped, and a
    /// key repeated in `order` repeats its matches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seqkit_core::SequenceExt;
    ///
    /// let users = vec![(1, "ann"), (2, "bob"), (3, "cid")];
    /// let ordered = users.into_iter().order_by_sequence([3, 1], |u| u.0);
    /// assert_eq!(ordered, vec![(3, "cid"), (1, "ann")]);
    /// ```
    fn order_by_sequence<K, O, F>(self, order: O, mut key: F) -> Vec<Self::Item>
    where
        O: IntoIterator<Item = K>,
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
        Self::Item: Clone,
    {
        let mut groups: HashMap<K, Vec<Self::Item>> = HashMap::new();
        for item in self {
            groups.entry(key(&item)).or_default().push(item);
        }

        let mut ordered = Vec::new();
        for k in order {
            if let Some(matches) = groups.get(&k) {
                ordered.extend(matches.iter().cloned());
            }
        }
        ordered
    }
}

impl<I: Iterator> SequenceExt for I {}

/// Iterator returned by [`SequenceExt::distinct_by`].
#[derive(Debug, Clone)]
pub struct DistinctBy<I, K, F> {
    iter: I,
    key: F,
    seen: HashSet<K>,
}

impl<I, K, F> Iterator for DistinctBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        // Only the very first element is guaranteed to be unseen.
        let lower = if self.seen.is_empty() { lower.min(1) } else { 0 };
        (lower, upper)
    }
}

impl<I, K, F> FusedIterator for DistinctBy<I, K, F>
where
    I: FusedIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
}
