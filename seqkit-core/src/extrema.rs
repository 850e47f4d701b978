//! Minimum and maximum helpers.
//!
//! Three flavours cover the cases a caller runs into:
//!
//! - [`ExtremaExt`] for any element type. An empty sequence is an error
//!   ([`SeqError::NoElements`]) since there is no value to return.
//! - [`PresentExtremaExt`] for sequences of `Option<T>`. `None` items are
//!   skipped and an empty (or all-`None`) sequence yields `None` instead of an
//!   error.
//! - [`FloatExtremaExt`] for floating point sequences, with a fixed,
//!   position-dependent treatment of NaN.
//!
//! Ties always resolve to the element encountered first.

use num_traits::Float;

use crate::comparer::{Comparer, Inverse, Natural};
use crate::error::SeqError;

/// Smallest and largest value of a sequence, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinMax<T> {
    /// The smallest value
    pub min_value: T,
    /// The largest value
    pub max_value: T,
}

impl<T> MinMax<T> {
    /// Creates a pair from its bounds
    pub fn new(min_value: T, max_value: T) -> Self {
        Self {
            min_value,
            max_value,
        }
    }

    /// Converts into a `(min, max)` tuple
    pub fn into_tuple(self) -> (T, T) {
        (self.min_value, self.max_value)
    }
}

/// Returns the first element for which no later element compares `Less`.
fn first_least<I, C>(mut iter: I, comparer: &C) -> Result<I::Item, SeqError>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    let mut best = iter.next().ok_or(SeqError::NoElements)?;
    for item in iter {
        if comparer.compare(&item, &best).is_lt() {
            best = item;
        }
    }
    Ok(best)
}

/// Single-pass by-key minimum. Each key is computed exactly once.
fn first_least_by_key<I, K, F, C>(mut iter: I, mut key: F, comparer: &C) -> Result<I::Item, SeqError>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    C: Comparer<K>,
{
    let mut best = iter.next().ok_or(SeqError::NoElements)?;
    let mut best_key = key(&best);
    for item in iter {
        let item_key = key(&item);
        if comparer.compare(&item_key, &best_key).is_lt() {
            best = item;
            best_key = item_key;
        }
    }
    Ok(best)
}

/// Extrema over arbitrary element types.
///
/// # Example
///
/// ```rust
/// use seqkit_core::{ExtremaExt, MinMax};
///
/// let bounds = vec![4, -2, 9, 3].into_iter().min_max().unwrap();
/// assert_eq!(bounds, MinMax::new(-2, 9));
///
/// let empty: Vec<u8> = Vec::new();
/// assert!(empty.into_iter().min_value().unwrap_err().is_no_elements());
/// ```
pub trait ExtremaExt: Iterator + Sized {
    /// Returns the smallest element according to `comparer`.
    ///
    /// # Errors
    ///
    /// [`SeqError::NoElements`] if the sequence is empty.
    fn min_with<C>(self, comparer: C) -> Result<Self::Item, SeqError>
    where
        C: Comparer<Self::Item>,
    {
        first_least(self, &comparer)
    }

    /// Returns the largest element according to `comparer`.
    ///
    /// # Errors
    ///
    /// [`SeqError::NoElements`] if the sequence is empty.
    fn max_with<C>(self, comparer: C) -> Result<Self::Item, SeqError>
    where
        C: Comparer<Self::Item>,
    {
        first_least(self, &Inverse::new(comparer))
    }

    /// Returns the smallest element by natural order.
    fn min_value(self) -> Result<Self::Item, SeqError>
    where
        Self::Item: Ord,
    {
        self.min_with(Natural)
    }

    /// Returns the largest element by natural order.
    fn max_value(self) -> Result<Self::Item, SeqError>
    where
        Self::Item: Ord,
    {
        self.max_with(Natural)
    }

    /// Returns both extrema according to `comparer` in a single pass.
    fn min_max_with<C>(mut self, comparer: C) -> Result<MinMax<Self::Item>, SeqError>
    where
        C: Comparer<Self::Item>,
        Self::Item: Clone,
    {
        let first = self.next().ok_or(SeqError::NoElements)?;
        let mut min_value = first.clone();
        let mut max_value = first;
        for item in self {
            if comparer.compare(&item, &min_value).is_lt() {
                min_value = item;
            } else if comparer.compare(&item, &max_value).is_gt() {
                max_value = item;
            }
        }
        Ok(MinMax::new(min_value, max_value))
    }

    /// Returns both extrema by natural order in a single pass.
    fn min_max(self) -> Result<MinMax<Self::Item>, SeqError>
    where
        Self::Item: Ord + Clone,
    {
        self.min_max_with(Natural)
    }

    /// Projects every element through `selector` and returns the extrema of
    /// the projections.
    fn min_max_of<K, F>(self, selector: F) -> Result<MinMax<K>, SeqError>
    where
        F: FnMut(Self::Item) -> K,
        K: Ord + Clone,
    {
        self.map(selector).min_max()
    }

    /// Returns the first element whose key is smallest according to
    /// `comparer`. Each key is computed once.
    fn min_by_key_with<K, F, C>(self, key: F, comparer: C) -> Result<Self::Item, SeqError>
    where
        F: FnMut(&Self::Item) -> K,
        C: Comparer<K>,
    {
        first_least_by_key(self, key, &comparer)
    }

    /// Returns the first element whose key is largest according to `comparer`.
    fn max_by_key_with<K, F, C>(self, key: F, comparer: C) -> Result<Self::Item, SeqError>
    where
        F: FnMut(&Self::Item) -> K,
        C: Comparer<K>,
    {
        first_least_by_key(self, key, &Inverse::new(comparer))
    }

    /// Returns the first element with the smallest key.
    fn min_by_key_first<K, F>(self, key: F) -> Result<Self::Item, SeqError>
    where
        F: FnMut(&Self::Item) -> K,
        K: Ord,
    {
        self.min_by_key_with(key, Natural)
    }

    /// Returns the first element with the largest key.
    fn max_by_key_first<K, F>(self, key: F) -> Result<Self::Item, SeqError>
    where
        F: FnMut(&Self::Item) -> K,
        K: Ord,
    {
        self.max_by_key_with(key, Natural)
    }

    /// Returns the first element with the smallest key and the first element
    /// with the largest key, in a single pass.
    fn min_max_by_key<K, F>(mut self, mut key: F) -> Result<MinMax<Self::Item>, SeqError>
    where
        F: FnMut(&Self::Item) -> K,
        K: Ord + Clone,
        Self::Item: Clone,
    {
        let first = self.next().ok_or(SeqError::NoElements)?;
        let first_key = key(&first);
        let (mut min_item, mut min_key) = (first.clone(), first_key.clone());
        let (mut max_item, mut max_key) = (first, first_key);

        for item in self {
            let item_key = key(&item);
            if item_key < min_key {
                min_key = item_key;
                min_item = item;
            } else if item_key > max_key {
                max_key = item_key;
                max_item = item;
            }
        }
        Ok(MinMax::new(min_item, max_item))
    }
}

impl<I: Iterator> ExtremaExt for I {}

/// Extrema over sequences of optional values.
///
/// `None` plays the role of an absent value: it never wins and an input with
/// nothing present produces `None` rather than an error.
pub trait PresentExtremaExt<T>: Iterator<Item = Option<T>> + Sized {
    /// Smallest present value according to `comparer`.
    fn min_present_with<C>(self, comparer: C) -> Option<T>
    where
        C: Comparer<T>,
    {
        first_least(self.flatten(), &comparer).ok()
    }

    /// Largest present value according to `comparer`.
    fn max_present_with<C>(self, comparer: C) -> Option<T>
    where
        C: Comparer<T>,
    {
        first_least(self.flatten(), &Inverse::new(comparer)).ok()
    }

    /// Smallest present value by natural order.
    fn min_present(self) -> Option<T>
    where
        T: Ord,
    {
        self.min_present_with(Natural)
    }

    /// Largest present value by natural order.
    fn max_present(self) -> Option<T>
    where
        T: Ord,
    {
        self.max_present_with(Natural)
    }

    /// Both extrema of the present values.
    fn min_max_present(self) -> Option<MinMax<T>>
    where
        T: Ord + Clone,
    {
        self.flatten().min_max().ok()
    }
}

impl<T, I: Iterator<Item = Option<T>>> PresentExtremaExt<T> for I {}

/// Extrema over floating point sequences.
///
/// NaN does not take part in a total order, so these methods fix one:
///
/// - **min** replaces its running value only when `candidate < current`.
///   A NaN in the first position is therefore kept; a NaN anywhere else is
///   skipped.
/// - **max** keeps its running value only when `candidate <= current`.
///   A NaN candidate always replaces it, and a NaN running value is replaced
///   by whatever follows.
///
/// The outcome depends on where NaN appears: `[NaN, 5.0]` has a NaN minimum
/// while `[5.0, NaN]` has a NaN maximum.
///
/// ```rust
/// use seqkit_core::FloatExtremaExt;
///
/// assert!(vec![f64::NAN, 5.0].into_iter().float_min().unwrap().is_nan());
/// assert_eq!(vec![5.0, f64::NAN].into_iter().float_min().unwrap(), 5.0);
/// assert!(vec![5.0, f64::NAN].into_iter().float_max().unwrap().is_nan());
/// ```
pub trait FloatExtremaExt<F: Float>: Iterator<Item = F> + Sized {
    /// Smallest value under the NaN rules above.
    fn float_min(mut self) -> Result<F, SeqError> {
        let mut acc = self.next().ok_or(SeqError::NoElements)?;
        for value in self {
            if value < acc {
                acc = value;
            }
        }
        Ok(acc)
    }

    /// Largest value under the NaN rules above.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn float_max(mut self) -> Result<F, SeqError> {
        let mut acc = self.next().ok_or(SeqError::NoElements)?;
        for value in self {
            if !(value <= acc) {
                acc = value;
            }
        }
        Ok(acc)
    }

    /// Both extrema in a single pass under the NaN rules above.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn float_min_max(mut self) -> Result<MinMax<F>, SeqError> {
        let first = self.next().ok_or(SeqError::NoElements)?;
        let (mut min_value, mut max_value) = (first, first);
        for value in self {
            if value < min_value {
                min_value = value;
            }
            if !(value <= max_value) {
                max_value = value;
            }
        }
        Ok(MinMax::new(min_value, max_value))
    }
}

impl<F: Float, I: Iterator<Item = F>> FloatExtremaExt<F> for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_value() {
        let values = vec![5, 3, 8, 1, 9];
        assert_eq!(values.iter().copied().min_value(), Ok(1));
        assert_eq!(values.iter().copied().max_value(), Ok(9));
    }

    #[test]
    fn test_empty_value_sequence_is_error() {
        let empty: Vec<i64> = vec![];
        assert_eq!(empty.iter().copied().min_value(), Err(SeqError::NoElements));
        assert_eq!(empty.iter().copied().max_value(), Err(SeqError::NoElements));
        assert_eq!(empty.iter().copied().min_max(), Err(SeqError::NoElements));
    }

    #[test]
    fn test_min_max_bounds_are_members() {
        let samples: Vec<Vec<i32>> = vec![
            vec![7],
            vec![3, 3, 3],
            vec![-5, 10, 0, 4],
            vec![100, -100, 50, -50, 0],
            (0..50).map(|i| (i * 37) % 23 - 11).collect(),
        ];

        for sample in samples {
            let bounds = sample.iter().copied().min_max().unwrap();
            assert!(bounds.min_value <= bounds.max_value);
            assert!(sample.contains(&bounds.min_value));
            assert!(sample.contains(&bounds.max_value));
            assert_eq!(Some(&bounds.min_value), sample.iter().min());
            assert_eq!(Some(&bounds.max_value), sample.iter().max());
        }
    }

    #[test]
    fn test_min_with_custom_comparer_keeps_first_tie() {
        let words = vec!["bb", "a", "c", "dd"];
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(words.iter().copied().min_with(by_len), Ok("a"));
        assert_eq!(words.iter().copied().max_with(by_len), Ok("bb"));
    }

    #[test]
    fn test_min_max_with_comparer() {
        let reversed = |a: &i32, b: &i32| b.cmp(a);
        let bounds = vec![1, 5, 3].into_iter().min_max_with(reversed).unwrap();
        assert_eq!(bounds.into_tuple(), (5, 1));
    }

    #[test]
    fn test_min_max_of_selector() {
        let people = vec![("ann", 31), ("bob", 25), ("cid", 47)];
        let ages = people.into_iter().min_max_of(|p| p.1).unwrap();
        assert_eq!(ages, MinMax::new(25, 47));
    }

    #[test]
    fn test_by_key_first_encountered_wins_ties() {
        let items = vec![("a", 2), ("b", 1), ("c", 3), ("d", 1), ("e", 3)];
        assert_eq!(items.iter().min_by_key_first(|x| x.1), Ok(&("b", 1)));
        assert_eq!(items.iter().max_by_key_first(|x| x.1), Ok(&("c", 3)));

        let both = items.iter().min_max_by_key(|x| x.1).unwrap();
        assert_eq!(both.min_value, &("b", 1));
        assert_eq!(both.max_value, &("c", 3));
    }

    #[test]
    fn test_by_key_with_custom_comparer() {
        let words = vec!["pear", "fig", "kiwi", "plum", "date"];
        let by_last_char = |a: &char, b: &char| a.cmp(b);
        let last = |w: &&str| w.chars().last().unwrap_or(' ');

        // Last characters: r, g, i, m, e
        assert_eq!(words.iter().copied().min_by_key_with(last, by_last_char), Ok("date"));
        assert_eq!(words.iter().copied().max_by_key_with(last, by_last_char), Ok("pear"));

        // Reversed comparer flips the result, ties still keep the first element
        let lengths = |w: &&str| w.len();
        let longest_first = |a: &usize, b: &usize| b.cmp(a);
        assert_eq!(words.iter().copied().min_by_key_with(lengths, longest_first), Ok("pear"));
        assert_eq!(words.iter().copied().max_by_key_with(lengths, longest_first), Ok("fig"));
    }

    #[test]
    fn test_by_key_with_empty_is_error() {
        let empty: Vec<&str> = vec![];
        assert_eq!(
            empty.into_iter().max_by_key_with(|w| w.len(), Natural),
            Err(SeqError::NoElements)
        );
    }

    #[test]
    fn test_by_key_computes_each_key_once() {
        let mut calls = 0;
        let _ = (0..10).min_by_key_first(|v| {
            calls += 1;
            (v - 4i32).abs()
        });
        assert_eq!(calls, 10);
    }

    #[test]
    fn test_by_key_empty_is_error() {
        let empty: Vec<(u8, u8)> = vec![];
        assert_eq!(
            empty.iter().min_by_key_first(|x| x.0),
            Err(SeqError::NoElements)
        );
        assert_eq!(
            empty.iter().min_max_by_key(|x| x.0),
            Err(SeqError::NoElements)
        );
    }

    #[test]
    fn test_present_extrema_skip_none() {
        let values = vec![None, Some(4), None, Some(-1), Some(7)];
        assert_eq!(values.iter().cloned().min_present(), Some(-1));
        assert_eq!(values.iter().cloned().max_present(), Some(7));
        assert_eq!(
            values.iter().cloned().min_max_present(),
            Some(MinMax::new(-1, 7))
        );
    }

    #[test]
    fn test_present_extrema_empty_is_none() {
        let empty: Vec<Option<String>> = vec![];
        assert_eq!(empty.into_iter().min_present(), None);

        let all_none: Vec<Option<String>> = vec![None, None];
        assert_eq!(all_none.into_iter().max_present(), None);
    }

    #[test]
    fn test_present_with_comparer() {
        let values = vec![Some("ccc"), None, Some("a"), Some("bb")];
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(values.iter().cloned().min_present_with(by_len), Some("a"));
        assert_eq!(values.iter().cloned().max_present_with(by_len), Some("ccc"));
        assert_eq!(
            values
                .iter()
                .cloned()
                .max_present_with(|a: &&str, b: &&str| a.cmp(b)),
            Some("ccc")
        );
    }

    #[test]
    fn test_float_extrema_without_nan() {
        let values = vec![2.5f64, -1.0, 9.75, 0.0];
        assert_eq!(values.iter().copied().float_min(), Ok(-1.0));
        assert_eq!(values.iter().copied().float_max(), Ok(9.75));
        assert_eq!(
            values.iter().copied().float_min_max(),
            Ok(MinMax::new(-1.0, 9.75))
        );
    }

    #[test]
    fn test_float_nan_position_dependence() {
        let leading = vec![f64::NAN, 5.0].into_iter().float_min_max().unwrap();
        assert!(leading.min_value.is_nan());
        assert_eq!(leading.max_value, 5.0);

        let trailing = vec![5.0, f64::NAN].into_iter().float_min_max().unwrap();
        assert_eq!(trailing.min_value, 5.0);
        assert!(trailing.max_value.is_nan());
    }

    #[test]
    fn test_float_nan_in_the_middle() {
        let values = vec![3.0f32, f32::NAN, 1.0];
        assert_eq!(values.iter().copied().float_min(), Ok(1.0));
        // NaN replaced max, then 1.0 replaced NaN
        assert_eq!(values.iter().copied().float_max(), Ok(1.0));
    }

    #[test]
    fn test_float_empty_is_error() {
        let empty: Vec<f64> = vec![];
        assert_eq!(empty.iter().copied().float_min(), Err(SeqError::NoElements));
        assert_eq!(
            empty.iter().copied().float_min_max(),
            Err(SeqError::NoElements)
        );
    }

    #[test]
    fn test_float_all_nan() {
        let values = vec![f64::NAN, f64::NAN];
        let bounds = values.into_iter().float_min_max().unwrap();
        assert!(bounds.min_value.is_nan());
        assert!(bounds.max_value.is_nan());
    }
}
