use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe hash set
///
/// Every operation takes the set's lock for its whole duration, so each call
/// observes and leaves a consistent set. Readers share the lock; writers are
/// exclusive.
///
/// Iteration never exposes the live set: [`iter`](Self::iter) copies the
/// elements while the read lock is held and then walks the copy, so
/// concurrent mutation cannot affect an iteration in progress.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::ConcurrentHashSet;
/// use std::sync::Arc;
/// use std::thread;
///
/// let seen = Arc::new(ConcurrentHashSet::new());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let seen = Arc::clone(&seen);
///         thread::spawn(move || seen.insert(i % 2))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(seen.len(), 2);
/// ```
pub struct ConcurrentHashSet<T> {
    inner: RwLock<HashSet<T>>,
}

impl<T> ConcurrentHashSet<T>
where
    T: Eq + Hash,
{
    /// Creates an empty set
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashSet::new()),
        }
    }

    /// Creates an empty set with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashSet::with_capacity(capacity)),
        }
    }

    // A panic while holding the lock cannot leave the HashSet itself
    // half-updated, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashSet<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `value`, returning `true` if it was not already present
    pub fn insert(&self, value: T) -> bool {
        self.write().insert(value)
    }

    /// Removes `value`, returning `true` if it was present
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.write().remove(value)
    }

    /// Checks membership
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains(value)
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the set is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Removes every element
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Keeps only the elements matching `predicate`
    pub fn retain<F>(&self, predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.write().retain(predicate);
    }

    /// Adds every element of `values` under a single lock acquisition
    ///
    /// Returns how many elements were newly added.
    pub fn extend<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = self.write();
        let mut added = 0;
        for value in values {
            if set.insert(value) {
                added += 1;
            }
        }
        added
    }

    /// Returns a copy of the current elements
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.read().iter().cloned().collect()
    }

    /// Iterates over a copy of the elements taken under the read lock
    pub fn iter(&self) -> std::vec::IntoIter<T>
    where
        T: Clone,
    {
        self.snapshot().into_iter()
    }

    /// Consumes the set, returning the underlying `HashSet`
    pub fn into_inner(self) -> HashSet<T> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Eq + Hash> Default for ConcurrentHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for ConcurrentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a ConcurrentHashSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq + Hash> IntoIterator for ConcurrentHashSet<T> {
    type Item = T;
    type IntoIter = std::collections::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_inner().into_iter()
    }
}

impl<T: Eq + Hash + fmt::Debug> fmt::Debug for ConcurrentHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.read().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_contains_remove() {
        let set = ConcurrentHashSet::new();
        assert!(set.insert("a".to_string()));
        assert!(!set.insert("a".to_string()));
        assert!(set.contains("a"));
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_extend_counts_new_elements() {
        let set: ConcurrentHashSet<u32> = [1, 2].into_iter().collect();
        assert_eq!(set.extend(vec![2, 3, 4, 4]), 2);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_retain_and_clear() {
        let set: ConcurrentHashSet<u32> = (0..10).collect();
        set.retain(|v| v % 3 == 0);
        let mut left = set.snapshot();
        left.sort();
        assert_eq!(left, vec![0, 3, 6, 9]);

        set.clear();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_iteration_is_isolated_from_mutation() {
        let set: ConcurrentHashSet<u32> = (0..5).collect();
        let mut seen = 0;
        for value in &set {
            // Mutating while iterating neither deadlocks nor changes the walk
            set.insert(value + 100);
            seen += 1;
        }
        assert_eq!(seen, 5);
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn test_into_inner() {
        let set: ConcurrentHashSet<&str> = ["x", "y"].into_iter().collect();
        let inner = set.into_inner();
        assert!(inner.contains("x"));
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_concurrent_inserts() {
        let set = Arc::new(ConcurrentHashSet::new());
        let mut handles = vec![];

        for t in 0..8u32 {
            let set = Arc::clone(&set);
            handles.push(thread::spawn(move || {
                for i in 0..250u32 {
                    set.insert(t * 1000 + i);
                    // Every thread also races on the same shared keys
                    set.insert(i);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Thread 0's range overlaps the shared keys 0..250
        assert_eq!(set.len(), 8 * 250);
    }

    #[test]
    fn test_lock_recovers_from_poisoning() {
        let set = Arc::new(ConcurrentHashSet::new());
        set.insert(1);

        let poisoner = Arc::clone(&set);
        let result = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        assert!(set.contains(&1));
        assert!(set.insert(2));
    }
}
