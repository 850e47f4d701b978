//! Dictionary conveniences for `HashMap` and `BTreeMap`.

use std::collections::btree_map;
use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::SeqError;

/// Extension methods for the standard maps.
///
/// # Example
///
/// ```rust
/// use seqkit_core::MapExt;
/// use std::collections::HashMap;
///
/// let mut hits: HashMap<&str, u32> = HashMap::new();
/// hits.add_or_update("home", 1, |n| *n += 1);
/// hits.add_or_update("home", 1, |n| *n += 1);
/// assert_eq!(hits.value_or(&"home", 0), 2);
/// assert_eq!(hits.value_or(&"about", 0), 0);
/// ```
pub trait MapExt<K, V> {
    /// Returns a copy of the value for `key`, or `default`.
    fn value_or(&self, key: &K, default: V) -> V
    where
        V: Clone;

    /// Inserts only if `key` is absent.
    ///
    /// # Errors
    ///
    /// [`SeqError::DuplicateKey`] if `key` is already present; the map is
    /// left unchanged.
    fn try_add(&mut self, key: K, value: V) -> Result<(), SeqError>;

    /// Inserts `add` for a new key, or applies `update` to the existing value.
    fn add_or_update<F>(&mut self, key: K, add: V, update: F) -> &mut V
    where
        F: FnOnce(&mut V);

    /// Returns the value for `key`, inserting `create()` first if absent.
    fn get_or_add_with<F>(&mut self, key: K, create: F) -> &mut V
    where
        F: FnOnce() -> V;

    /// Removes every entry matching `predicate`, returning how many were removed.
    fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&K, &V) -> bool;
}

impl<K, V, S> MapExt<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn value_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    fn try_add(&mut self, key: K, value: V) -> Result<(), SeqError> {
        match self.entry(key) {
            hash_map::Entry::Occupied(_) => Err(SeqError::DuplicateKey),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn add_or_update<F>(&mut self, key: K, add: V, update: F) -> &mut V
    where
        F: FnOnce(&mut V),
    {
        match self.entry(key) {
            hash_map::Entry::Occupied(slot) => {
                let value = slot.into_mut();
                update(value);
                value
            }
            hash_map::Entry::Vacant(slot) => slot.insert(add),
        }
    }

    fn get_or_add_with<F>(&mut self, key: K, create: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.entry(key).or_insert_with(create)
    }

    fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&K, &V) -> bool,
    {
        let before = self.len();
        self.retain(|k, v| !predicate(k, v));
        before - self.len()
    }
}

impl<K, V> MapExt<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn value_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    fn try_add(&mut self, key: K, value: V) -> Result<(), SeqError> {
        match self.entry(key) {
            btree_map::Entry::Occupied(_) => Err(SeqError::DuplicateKey),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn add_or_update<F>(&mut self, key: K, add: V, update: F) -> &mut V
    where
        F: FnOnce(&mut V),
    {
        match self.entry(key) {
            btree_map::Entry::Occupied(slot) => {
                let value = slot.into_mut();
                update(value);
                value
            }
            btree_map::Entry::Vacant(slot) => slot.insert(add),
        }
    }

    fn get_or_add_with<F>(&mut self, key: K, create: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.entry(key).or_insert_with(create)
    }

    fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&K, &V) -> bool,
    {
        let before = self.len();
        self.retain(|k, v| !predicate(k, v));
        before - self.len()
    }
}
