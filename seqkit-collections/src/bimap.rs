use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// Pairs evicted by [`BiMap::insert`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overwritten<L, R> {
    /// Nothing was evicted
    Neither,
    /// The exact same pair was already present
    Pair(L, R),
    /// The pair that held the new left value
    Left(L, R),
    /// The pair that held the new right value
    Right(L, R),
    /// Two pairs: the one that held the left value and the one that held the right value
    Both((L, R), (L, R)),
}

impl<L, R> Overwritten<L, R> {
    /// Returns `true` if at least one pair was evicted
    pub fn did_overwrite(&self) -> bool {
        !matches!(self, Overwritten::Neither)
    }
}

/// One-to-one bidirectional map with overwrite semantics
///
/// Unlike [`TwoWayMap`](crate::TwoWayMap), inserting never fails: any pair
/// that already holds the new left or right value is evicted first, and the
/// evicted pairs are handed back.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::{BiMap, Overwritten};
///
/// let mut seats = BiMap::new();
/// seats.insert("ann", 1);
/// seats.insert("bob", 2);
///
/// // ann moves to bob's seat; bob loses his seat and ann's old seat is freed
/// let evicted = seats.insert("ann", 2);
/// assert_eq!(evicted, Overwritten::Both(("ann", 1), ("bob", 2)));
/// assert_eq!(seats.get_by_right(&2), Some(&"ann"));
/// assert_eq!(seats.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    left_to_right: HashMap<L, R>,
    right_to_left: HashMap<R, L>,
}

impl<L, R> Default for BiMap<L, R> {
    fn default() -> Self {
        Self {
            left_to_right: HashMap::new(),
            right_to_left: HashMap::new(),
        }
    }
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, evicting whatever held either side before
    pub fn insert(&mut self, left: L, right: R) -> Overwritten<L, R> {
        let by_left = self.remove_by_left(&left);
        let by_right = self.remove_by_right(&right);

        let evicted = match (by_left, by_right) {
            (None, None) => Overwritten::Neither,
            (Some((l, r)), None) if r == right => Overwritten::Pair(l, r),
            (Some((l, r)), None) => Overwritten::Left(l, r),
            (None, Some((l, r))) => Overwritten::Right(l, r),
            (Some(left_pair), Some(right_pair)) => Overwritten::Both(left_pair, right_pair),
        };

        self.left_to_right.insert(left.clone(), right.clone());
        self.right_to_left.insert(right, left);
        evicted
    }

    /// Looks up the right value paired with `left`
    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.left_to_right.get(left)
    }

    /// Looks up the left value paired with `right`
    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.right_to_left.get(right)
    }

    /// Checks if `left` is paired
    pub fn contains_left(&self, left: &L) -> bool {
        self.left_to_right.contains_key(left)
    }

    /// Checks if `right` is paired
    pub fn contains_right(&self, right: &R) -> bool {
        self.right_to_left.contains_key(right)
    }

    /// Removes the pair holding `left`
    pub fn remove_by_left(&mut self, left: &L) -> Option<(L, R)> {
        let right = self.left_to_right.remove(left)?;
        let left = self.right_to_left.remove(&right)?;
        Some((left, right))
    }

    /// Removes the pair holding `right`
    pub fn remove_by_right(&mut self, right: &R) -> Option<(L, R)> {
        let left = self.right_to_left.remove(right)?;
        let right = self.left_to_right.remove(&left)?;
        Some((left, right))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.left_to_right.len()
    }

    /// Returns `true` if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }

    /// Removes every pair
    pub fn clear(&mut self) {
        self.left_to_right.clear();
        self.right_to_left.clear();
    }

    /// Iterates over `(left, right)` pairs in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, L, R> {
        self.left_to_right.iter()
    }
}

impl<L, R> FromIterator<(L, R)> for BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    /// Later pairs overwrite earlier ones that share a side
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (left, right) in iter {
            map.insert(left, right);
        }
        map
    }
}
