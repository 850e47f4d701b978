use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A fieldless enum usable as an [`EnumMap`] key
///
/// `VARIANTS` lists every variant exactly once and `index` returns a
/// variant's position in that list.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::EnumKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// impl EnumKey for Level {
///     const VARIANTS: &'static [Self] = &[Level::Low, Level::High];
///
///     fn index(self) -> usize {
///         self as usize
///     }
/// }
/// ```
pub trait EnumKey: Copy + 'static {
    /// Every variant, in index order
    const VARIANTS: &'static [Self];

    /// Number of variants
    const COUNT: usize = Self::VARIANTS.len();

    /// Position of this variant in `VARIANTS`
    fn index(self) -> usize;

    /// Variant at `index`, if there is one
    fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }
}

/// Dictionary with exactly one value per enum variant
///
/// Storage is a flat array indexed by [`EnumKey::index`], so lookups never
/// fail and never hash.
///
/// # Example
///
/// ```rust
/// use seqkit_collections::{EnumKey, EnumMap};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Suit { Hearts, Spades }
///
/// impl EnumKey for Suit {
///     const VARIANTS: &'static [Self] = &[Suit::Hearts, Suit::Spades];
///     fn index(self) -> usize { self as usize }
/// }
///
/// let mut counts: EnumMap<Suit, u32> = EnumMap::default();
/// counts[Suit::Spades] += 3;
/// assert_eq!(counts[Suit::Hearts], 0);
/// assert_eq!(counts[Suit::Spades], 3);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EnumMap<K, V> {
    values: Box<[V]>,
    _key: PhantomData<K>,
}

impl<K: EnumKey, V> EnumMap<K, V> {
    /// Builds a map by computing the value of every variant
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(K) -> V,
    {
        Self {
            values: K::VARIANTS.iter().map(|&key| f(key)).collect(),
            _key: PhantomData,
        }
    }

    /// Number of variants, which is also the number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` unless the enum has no variants
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for `key`
    pub fn get(&self, key: K) -> &V {
        &self.values[key.index()]
    }

    /// Mutable value for `key`
    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.values[key.index()]
    }

    /// Replaces the value for `key`, returning the previous one
    pub fn insert(&mut self, key: K, value: V) -> V {
        std::mem::replace(self.get_mut(key), value)
    }

    /// Iterates over `(variant, value)` in variant order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        K::VARIANTS.iter().copied().zip(self.values.iter())
    }

    /// Iterates over `(variant, value)` with mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> + '_ {
        K::VARIANTS.iter().copied().zip(self.values.iter_mut())
    }

    /// Iterates over the values in variant order
    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }
}

impl<K: EnumKey, V: Default> Default for EnumMap<K, V> {
    fn default() -> Self {
        Self::from_fn(|_| V::default())
    }
}

impl<K: EnumKey, V> Index<K> for EnumMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        self.get(key)
    }
}

impl<K: EnumKey, V> IndexMut<K> for EnumMap<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        self.get_mut(key)
    }
}

impl<K: EnumKey + fmt::Debug, V: fmt::Debug> fmt::Debug for EnumMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
