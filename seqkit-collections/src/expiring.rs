use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ExpiringMapConfig;
use crate::error::CollectionError;
use crate::stamped::Timestamped;

/// Internal shared state for the map
struct ExpiringMapInner<K, V> {
    data: DashMap<K, V>,
    lifetime: Duration,
}

/// Concurrent map whose entries disappear once they outlive a fixed lifetime
///
/// Values carry their own creation time through [`Timestamped`]. Expiry is
/// lazy: every public accessor first sweeps the whole map, removing entries
/// whose age has reached the lifetime, and only then performs the requested
/// operation. Nothing runs in the background.
///
/// The sweep is a linear scan and is not atomic with respect to other
/// threads. An entry may be swept by one thread while another is about to
/// read it; readers never observe an entry past its lifetime.
///
/// Cloning the map is cheap and the clones share the same entries.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::{ExpiringMap, Stamped};
/// use std::time::Duration;
///
/// let sessions = ExpiringMap::new(Duration::from_secs(300)).unwrap();
/// sessions.insert("alice", Stamped::new(42));
///
/// let session = sessions.get("alice").unwrap();
/// assert_eq!(*session.value(), 42);
/// ```
pub struct ExpiringMap<K, V> {
    inner: Arc<ExpiringMapInner<K, V>>,
}

impl<K, V> Clone for ExpiringMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> ExpiringMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Timestamped + Clone,
{
    /// Creates a map whose entries live for `lifetime`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `lifetime` is zero.
    pub fn new(lifetime: Duration) -> Result<Self, CollectionError> {
        Self::with_config(ExpiringMapConfig::default().with_lifetime(lifetime))
    }

    /// Creates a map from a full configuration
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the configured lifetime is zero.
    pub fn with_config(config: ExpiringMapConfig) -> Result<Self, CollectionError> {
        if config.lifetime.is_zero() {
            return Err(CollectionError::InvalidArgument(
                "lifetime must be greater than zero".to_string(),
            ));
        }

        let inner = Arc::new(ExpiringMapInner {
            data: DashMap::with_capacity(config.initial_capacity),
            lifetime: config.lifetime,
        });

        Ok(Self { inner })
    }

    /// Returns the configured lifetime
    pub fn lifetime(&self) -> Duration {
        self.inner.lifetime
    }

    fn is_expired(&self, value: &V) -> bool {
        value.age() >= self.inner.lifetime
    }

    /// Removes every entry that has outlived the lifetime
    ///
    /// Returns the number of entries removed. All other accessors call this
    /// first, so calling it directly is only needed to release memory early.
    pub fn purge_expired(&self) -> usize {
        let lifetime = self.inner.lifetime;
        let mut removed_count = 0;

        self.inner.data.retain(|_, value| {
            if value.age() >= lifetime {
                removed_count += 1;
                false
            } else {
                true
            }
        });

        if removed_count > 0 {
            tracing::debug!(removed = removed_count, "purged expired entries");
        }

        removed_count
    }

    /// Retrieves a copy of the value stored under `key`
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired();

        let entry = self.inner.data.get(key)?;
        if self.is_expired(entry.value()) {
            // Drop the read reference before removing
            drop(entry);
            // The entry crossed its lifetime after the sweep. remove_if
            // re-checks so that a fresh replacement is left alone.
            self.inner.data.remove_if(key, |_, v| self.is_expired(v));
            return None;
        }

        Some(entry.value().clone())
    }

    /// Stores `value` under `key`, returning the previous live value if any
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.purge_expired();
        self.inner.data.insert(key, value)
    }

    /// Stores `value` only if `key` is absent
    ///
    /// Returns `true` if the value was inserted.
    #[must_use = "returns whether the value was inserted"]
    pub fn try_insert(&self, key: K, value: V) -> bool {
        self.purge_expired();
        match self.inner.data.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Returns the live value for `key`, inserting `create()` first if absent
    ///
    /// `create` runs while the key's shard is write-locked, so it must not
    /// call back into this map.
    pub fn get_or_insert_with<F>(&self, key: K, create: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.purge_expired();
        self.inner
            .data
            .entry(key)
            .or_insert_with(create)
            .value()
            .clone()
    }

    /// Replaces the value for `key` with `new_value` if the current value
    /// equals `expected`
    ///
    /// Returns `true` if the replacement happened.
    #[must_use = "returns whether the value was replaced"]
    pub fn try_update<Q>(&self, key: &Q, new_value: V, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.purge_expired();
        match self.inner.data.get_mut(key) {
            Some(mut entry) if entry.value() == expected => {
                *entry.value_mut() = new_value;
                true
            }
            _ => false,
        }
    }

    /// Removes `key`, returning its value if it was still live
    pub fn try_remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.purge_expired();
        self.inner.data.remove(key).map(|(_, value)| value)
    }

    /// Checks if a live entry exists for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.purge_expired();
        self.inner.data.len()
    }

    /// Returns `true` if there are no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all live keys
    pub fn keys(&self) -> Vec<K> {
        self.purge_expired();
        self.inner
            .data
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Returns all live values
    pub fn values(&self) -> Vec<V> {
        self.purge_expired();
        self.inner
            .data
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns a point-in-time copy of all live entries
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.purge_expired();
        self.inner
            .data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Calls `f` on every live entry
    ///
    /// Shard locks are held while `f` runs, so `f` must not call back into
    /// this map.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.purge_expired();
        for entry in self.inner.data.iter() {
            f(entry.key(), entry.value());
        }
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.inner.data.clear();
    }
}

impl<K: Eq + Hash, V> fmt::Debug for ExpiringMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringMap")
            .field("lifetime", &self.inner.lifetime)
            .field("entries", &self.inner.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamped::Stamped;
    use std::thread;
    use std::time::Instant;

    fn expired<V>(value: V) -> Stamped<V> {
        Stamped::with_created_at(value, Instant::now() - Duration::from_secs(30))
    }

    fn create_test_map() -> ExpiringMap<String, Stamped<u32>> {
        ExpiringMap::new(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let result = ExpiringMap::<String, Stamped<u32>>::new(Duration::ZERO);
        assert!(matches!(result, Err(CollectionError::InvalidArgument(_))));
    }

    #[test]
    fn test_insert_and_get() {
        let map = create_test_map();
        assert!(map.insert("key1".to_string(), Stamped::new(1)).is_none());

        assert_eq!(map.get("key1").map(Stamped::into_value), Some(1));
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let map = create_test_map();
        map.insert("key1".to_string(), Stamped::new(1));
        let previous = map.insert("key1".to_string(), Stamped::new(2));

        assert_eq!(previous.map(Stamped::into_value), Some(1));
        assert_eq!(map.get("key1").map(Stamped::into_value), Some(2));
    }

    #[test]
    fn test_expired_entry_invisible_to_every_accessor() {
        let map = create_test_map();
        map.inner.data.insert("old".to_string(), expired(1));
        map.inner.data.insert("fresh".to_string(), Stamped::new(2));

        assert!(map.get("old").is_none());
        assert!(!map.contains_key("old"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.keys(), vec!["fresh".to_string()]);
        assert_eq!(map.values().len(), 1);
        assert!(map.try_remove("old").is_none());
    }

    #[test]
    fn test_entry_expires_after_lifetime() {
        let map = ExpiringMap::new(Duration::from_millis(50)).unwrap();
        map.insert("short", Stamped::new("lived"));
        assert!(map.contains_key("short"));

        thread::sleep(Duration::from_millis(80));

        assert!(map.get("short").is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_purge_expired_counts_removed() {
        let map = create_test_map();
        map.inner.data.insert("expired1".to_string(), expired(1));
        map.inner.data.insert("expired2".to_string(), expired(2));
        map.inner.data.insert("valid".to_string(), Stamped::new(3));

        assert_eq!(map.purge_expired(), 2);
        assert_eq!(map.purge_expired(), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_try_insert_respects_live_entries_only() {
        let map = create_test_map();
        assert!(map.try_insert("k".to_string(), Stamped::new(1)));
        assert!(!map.try_insert("k".to_string(), Stamped::new(2)));

        // An expired occupant does not block a new insert
        map.inner.data.insert("stale".to_string(), expired(9));
        assert!(map.try_insert("stale".to_string(), Stamped::new(10)));
        assert_eq!(map.get("stale").map(Stamped::into_value), Some(10));
    }

    #[test]
    fn test_get_or_insert_with() {
        let map = create_test_map();
        let first = map.get_or_insert_with("k".to_string(), || Stamped::new(5));
        let second = map.get_or_insert_with("k".to_string(), || Stamped::new(6));
        assert_eq!(first.into_value(), 5);
        assert_eq!(second.into_value(), 5);
    }

    #[test]
    fn test_get_or_insert_with_replaces_expired_occupant() {
        let map = create_test_map();
        map.inner.data.insert("k".to_string(), expired(1));

        let mut created = 0;
        let value = map.get_or_insert_with("k".to_string(), || {
            created += 1;
            Stamped::new(2)
        });
        assert_eq!(value.into_value(), 2);

        // A live value is returned without calling create again
        let again = map.get_or_insert_with("k".to_string(), || {
            created += 1;
            Stamped::new(3)
        });
        assert_eq!(again.into_value(), 2);
        assert_eq!(created, 1);
    }

    #[test]
    fn test_try_update_compares_current_value() {
        let map = create_test_map();
        let original = Stamped::new(1);
        map.insert("k".to_string(), original.clone());

        let wrong = Stamped::new(99);
        assert!(!map.try_update("k", Stamped::new(2), &wrong));
        assert!(map.try_update("k", Stamped::new(2), &original));
        assert_eq!(map.get("k").map(Stamped::into_value), Some(2));
    }

    #[test]
    fn test_try_remove() {
        let map = create_test_map();
        map.insert("k".to_string(), Stamped::new(1));
        assert_eq!(map.try_remove("k").map(Stamped::into_value), Some(1));
        assert!(map.try_remove("k").is_none());
    }

    #[test]
    fn test_snapshot_and_clear() {
        let map = create_test_map();
        map.insert("a".to_string(), Stamped::new(1));
        map.insert("b".to_string(), Stamped::new(2));

        let mut snapshot: Vec<_> = map
            .snapshot()
            .into_iter()
            .map(|(k, v)| (k, v.into_value()))
            .collect();
        snapshot.sort();
        assert_eq!(snapshot, vec![("a".to_string(), 1), ("b".to_string(), 2)]);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_sweeps_before_storing() {
        let map = create_test_map();
        map.inner.data.insert("stale".to_string(), expired(1));
        map.insert("fresh".to_string(), Stamped::new(2));

        // The sweep already ran inside insert
        assert_eq!(map.purge_expired(), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_for_each_skips_expired() {
        let map = create_test_map();
        map.inner.data.insert("old".to_string(), expired(1));
        map.insert("new".to_string(), Stamped::new(2));

        let mut seen = Vec::new();
        map.for_each(|k, v| seen.push((k.clone(), *v.value())));
        assert_eq!(seen, vec![("new".to_string(), 2)]);
    }

    #[test]
    fn test_clone_shares_data() {
        let map = create_test_map();
        let clone = map.clone();
        map.insert("shared".to_string(), Stamped::new(7));
        assert_eq!(clone.get("shared").map(Stamped::into_value), Some(7));
    }

    #[test]
    fn test_concurrent_inserts_and_reads() {
        let map = create_test_map();
        let mut handles = vec![];

        for i in 0..8 {
            let map = map.clone();
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key_{}_{}", i, j);
                    map.insert(key.clone(), Stamped::new(j));
                    assert!(map.get(&key).is_some());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.len(), 800);
    }
}
