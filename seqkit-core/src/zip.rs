//! Zip helpers beyond [`Iterator::zip`].

use std::iter::FusedIterator;

use crate::error::SeqError;

/// One step of [`ZipExt::zip_longest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipItem<A, B> {
    /// Both sequences produced an element
    Both(A, B),
    /// Only the left sequence still had elements
    Left(A),
    /// Only the right sequence still had elements
    Right(B),
}

impl<A, B> ZipItem<A, B> {
    /// Splits into the optional left and right halves.
    pub fn into_options(self) -> (Option<A>, Option<B>) {
        match self {
            ZipItem::Both(a, b) => (Some(a), Some(b)),
            ZipItem::Left(a) => (Some(a), None),
            ZipItem::Right(b) => (None, Some(b)),
        }
    }

    /// Fills a missing half with the supplied defaults.
    pub fn or(self, left: A, right: B) -> (A, B) {
        match self {
            ZipItem::Both(a, b) => (a, b),
            ZipItem::Left(a) => (a, right),
            ZipItem::Right(b) => (left, b),
        }
    }
}

/// Zip extensions available on every [`Iterator`].
pub trait ZipExt: Iterator + Sized {
    /// Pairs elements and maps each pair through `f`, stopping at the shorter
    /// sequence.
    fn zip_with<J, F, R>(self, other: J, mut f: F) -> impl Iterator<Item = R>
    where
        J: IntoIterator,
        F: FnMut(Self::Item, J::Item) -> R,
    {
        self.zip(other).map(move |(a, b)| f(a, b))
    }

    /// Pairs elements until both sequences are exhausted.
    fn zip_longest<J>(self, other: J) -> ZipLongest<Self, J::IntoIter>
    where
        J: IntoIterator,
    {
        ZipLongest {
            left: self.fuse(),
            right: other.into_iter().fuse(),
        }
    }

    /// Pairs elements, padding the shorter side with `Default::default()`.
    fn zip_or_default<J>(self, other: J) -> impl Iterator<Item = (Self::Item, J::Item)>
    where
        J: IntoIterator,
        Self::Item: Default,
        J::Item: Default,
    {
        self.zip_longest(other)
            .map(|step| step.or(Default::default(), Default::default()))
    }

    /// Pairs elements of two sequences that must have the same length.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::LengthMismatch`] with the full lengths of both
    /// sides when they differ.
    fn zip_strict<J>(self, other: J) -> Result<Vec<(Self::Item, J::Item)>, SeqError>
    where
        J: IntoIterator,
    {
        let mut pairs = Vec::new();
        let mut left_only = 0usize;
        let mut right_only = 0usize;

        for step in self.zip_longest(other) {
            match step {
                ZipItem::Both(a, b) => pairs.push((a, b)),
                ZipItem::Left(_) => left_only += 1,
                ZipItem::Right(_) => right_only += 1,
            }
        }

        if left_only > 0 || right_only > 0 {
            return Err(SeqError::LengthMismatch {
                left: pairs.len() + left_only,
                right: pairs.len() + right_only,
            });
        }
        Ok(pairs)
    }
}

impl<I: Iterator> ZipExt for I {}

/// Iterator returned by [`ZipExt::zip_longest`].
#[derive(Debug, Clone)]
pub struct ZipLongest<I, J> {
    left: std::iter::Fuse<I>,
    right: std::iter::Fuse<J>,
}

impl<I: Iterator, J: Iterator> Iterator for ZipLongest<I, J> {
    type Item = ZipItem<I::Item, J::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match (self.left.next(), self.right.next()) {
            (Some(a), Some(b)) => Some(ZipItem::Both(a, b)),
            (Some(a), None) => Some(ZipItem::Left(a)),
            (None, Some(b)) => Some(ZipItem::Right(b)),
            (None, None) => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (l_low, l_high) = self.left.size_hint();
        let (r_low, r_high) = self.right.size_hint();
        let high = match (l_high, r_high) {
            (Some(l), Some(r)) => Some(l.max(r)),
            _ => None,
        };
        (l_low.max(r_low), high)
    }
}

impl<I: Iterator, J: Iterator> FusedIterator for ZipLongest<I, J> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_with() {
        let sums: Vec<_> = vec![1, 2, 3].into_iter().zip_with(vec![10, 20], |a, b| a + b).collect();
        assert_eq!(sums, vec![11, 22]);
    }

    #[test]
    fn test_zip_longest() {
        let steps: Vec<_> = vec![1, 2, 3].into_iter().zip_longest(vec!["a"]).collect();
        assert_eq!(
            steps,
            vec![ZipItem::Both(1, "a"), ZipItem::Left(2), ZipItem::Left(3)]
        );

        let steps: Vec<_> = Vec::<i32>::new().into_iter().zip_longest(vec!['x']).collect();
        assert_eq!(steps, vec![ZipItem::Right('x')]);
    }

    #[test]
    fn test_zip_longest_size_hint() {
        let zipped = (0..3).zip_longest(0..5);
        assert_eq!(zipped.size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_zip_or_default() {
        let pairs: Vec<_> = vec![1, 2].into_iter().zip_or_default(vec![String::from("a")]).collect();
        assert_eq!(pairs, vec![(1, "a".to_string()), (2, String::new())]);
    }

    #[test]
    fn test_zip_strict() {
        assert_eq!(
            vec![1, 2].into_iter().zip_strict(vec!['a', 'b']),
            Ok(vec![(1, 'a'), (2, 'b')])
        );
        assert_eq!(
            vec![1, 2, 3].into_iter().zip_strict(vec!['a']),
            Err(SeqError::LengthMismatch { left: 3, right: 1 })
        );
        assert_eq!(
            Vec::<i32>::new().into_iter().zip_strict(vec!['a', 'b']),
            Err(SeqError::LengthMismatch { left: 0, right: 2 })
        );
    }

    #[test]
    fn test_zip_item_into_options() {
        assert_eq!(ZipItem::<i32, i32>::Left(1).into_options(), (Some(1), None));
        assert_eq!(ZipItem::<i32, i32>::Right(2).into_options(), (None, Some(2)));
    }
}
