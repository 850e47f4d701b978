use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::CollectionError;

/// Strict one-to-one dictionary that can be queried in both directions
///
/// Two maps are kept in sync: every `(key, value)` pair is present in both
/// the forward and the reverse map, or in neither. A key may map to only one
/// value and a value may be claimed by only one key; [`add`](Self::add)
/// refuses anything that would break that.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::TwoWayMap;
///
/// let mut codes = TwoWayMap::new();
/// codes.add("GB", 44).unwrap();
/// codes.add("PT", 351).unwrap();
///
/// assert_eq!(codes.get_by_key(&"PT"), Some(&351));
/// assert_eq!(codes.get_by_value(&44), Some(&"GB"));
/// assert!(codes.add("FR", 44).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TwoWayMap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Default for TwoWayMap<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }
}

impl<K, V> TwoWayMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from pairs, stopping at the first duplicate
    ///
    /// # Errors
    ///
    /// Returns the error of the first pair [`add`](Self::add) refuses.
    pub fn try_from_iter<I>(pairs: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.add(key, value)?;
        }
        Ok(map)
    }

    /// Adds a pair
    ///
    /// # Errors
    ///
    /// - `CollectionError::DuplicateKey` if `key` is already mapped
    /// - `CollectionError::DuplicateValue` if `value` is already claimed
    ///
    /// On error both directions are left exactly as they were.
    pub fn add(&mut self, key: K, value: V) -> Result<(), CollectionError> {
        match self.forward.entry(key.clone()) {
            Entry::Occupied(_) => return Err(CollectionError::DuplicateKey),
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
        }

        match self.reverse.entry(value) {
            Entry::Occupied(_) => {
                // Undo the forward half so both maps stay in sync
                self.forward.remove(&key);
                tracing::trace!("rolled back forward insert after duplicate value");
                Err(CollectionError::DuplicateValue)
            }
            Entry::Vacant(slot) => {
                slot.insert(key);
                Ok(())
            }
        }
    }

    /// Looks up the value mapped to `key`
    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Looks up the key that claimed `value`
    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    /// Checks if `key` is mapped
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Checks if `value` is claimed
    pub fn contains_value(&self, value: &V) -> bool {
        self.reverse.contains_key(value)
    }

    /// Removes the pair holding `key`, returning its value
    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.reverse.remove(&value);
        Some(value)
    }

    /// Removes the pair holding `value`, returning its key
    pub fn remove_by_value(&mut self, value: &V) -> Option<K> {
        let key = self.reverse.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Removes every pair
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Iterates over `(key, value)` pairs in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.forward.iter()
    }

    /// Iterates over the keys
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.forward.keys()
    }

    /// Iterates over the values
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.forward.values()
    }
}

impl<K, V> PartialEq for TwoWayMap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Eq for TwoWayMap<K, V> {}

impl<'a, K, V> IntoIterator for &'a TwoWayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TwoWayMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;
    use std::hash::Hash;

    impl<K, V> Serialize for TwoWayMap<K, V>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.forward.iter())
        }
    }

    impl<'de, K, V> Deserialize<'de> for TwoWayMap<K, V>
    where
        K: Deserialize<'de> + Eq + Hash + Clone,
        V: Deserialize<'de> + Eq + Hash + Clone,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let forward = HashMap::<K, V>::deserialize(deserializer)?;
            TwoWayMap::try_from_iter(forward).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_sync<K, V>(map: &TwoWayMap<K, V>)
    where
        K: Eq + Hash + Clone + std::fmt::Debug,
        V: Eq + Hash + Clone + std::fmt::Debug,
    {
        assert_eq!(map.forward.len(), map.reverse.len());
        for (k, v) in &map.forward {
            assert_eq!(map.reverse.get(v), Some(k));
        }
    }

    #[test]
    fn test_add_is_visible_both_ways() {
        let mut map = TwoWayMap::new();
        map.add(1, "one").unwrap();
        assert_eq!(map.get_by_key(&1), Some(&"one"));
        assert_eq!(map.get_by_value(&"one"), Some(&1));
        assert_in_sync(&map);
    }

    #[test]
    fn test_duplicate_key_leaves_map_unchanged() {
        let mut map = TwoWayMap::new();
        map.add(1, "one").unwrap();
        let before = map.clone();

        assert_eq!(map.add(1, "uno"), Err(CollectionError::DuplicateKey));
        assert_eq!(map, before);
        assert!(!map.contains_value(&"uno"));
        assert_in_sync(&map);
    }

    #[test]
    fn test_duplicate_value_rolls_back_forward_insert() {
        let mut map = TwoWayMap::new();
        map.add(1, "one").unwrap();

        assert_eq!(map.add(2, "one"), Err(CollectionError::DuplicateValue));
        assert!(!map.contains_key(&2));
        assert_eq!(map.get_by_value(&"one"), Some(&1));
        assert_eq!(map.len(), 1);
        assert_in_sync(&map);
    }

    #[test]
    fn test_remove_by_key_and_value() {
        let mut map = TwoWayMap::try_from_iter(vec![(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();

        assert_eq!(map.remove_by_key(&1), Some('a'));
        assert!(!map.contains_value(&'a'));

        assert_eq!(map.remove_by_value(&'c'), Some(3));
        assert!(!map.contains_key(&3));

        assert_eq!(map.remove_by_key(&42), None);
        assert_eq!(map.len(), 1);
        assert_in_sync(&map);
    }

    #[test]
    fn test_try_from_iter_rejects_duplicates() {
        let result = TwoWayMap::try_from_iter(vec![("a", 1), ("b", 1)]);
        assert_eq!(result.unwrap_err(), CollectionError::DuplicateValue);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut map = TwoWayMap::try_from_iter((0..5).map(|i| (i, i * 10))).unwrap();
        let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort();
        assert_eq!(pairs, vec![(0, 0), (1, 10), (2, 20), (3, 30), (4, 40)]);

        map.clear();
        assert!(map.is_empty());
        assert_in_sync(&map);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_rebuilds_reverse_map() {
        let map = TwoWayMap::try_from_iter(vec![("a".to_string(), 1), ("b".to_string(), 2)]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let back: TwoWayMap<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get_by_value(&2), Some(&"b".to_string()));
        assert_in_sync(&back);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_duplicate_values() {
        let result: Result<TwoWayMap<String, i32>, _> = serde_json::from_str(r#"{"a":1,"b":1}"#);
        assert!(result.is_err());
    }
}
