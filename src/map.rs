use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::index::{DefaultIx, IndexType};
use crate::iter::{IntoIter, Iter};
use crate::node::Node;
use crate::tree::RbTree;

/// An ordered map: key-value pairs sorted by key, backed by [`RbTree`].
///
/// Keys are compared through their `Ord` instance; a key's ordering relative
/// to the other keys must not change while it is in the map.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderedMap<K, V, Ix = DefaultIx> {
    /// The tree that stores the entries
    pub(crate) tree: RbTree<K, V, Ix>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create an empty `OrderedMap`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite and return the previous value.
    ///
    /// # Panics
    ///
    /// This method panics when the map is at the maximum number of nodes for
    /// its index type.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.insert(1, "c"), Some("b"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let node_idx = self.tree.search(&key);
        if self.tree.is_sentinel(node_idx) {
            let _new_idx = self.tree.insert(key, value);
            None
        } else {
            Some(self.tree.node_mut(node_idx, Node::set_value(value)))
        }
    }

    /// Remove a key from the map, returning the value at the key if the key
    /// was present.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.remove(&2), Some("b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node_idx = self.tree.search(key);
        if self.tree.is_sentinel(node_idx) {
            return None;
        }
        let (_key, value) = self.tree.remove_at(node_idx);
        Some(value)
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 10);
    /// map.insert(7, 40);
    /// assert_eq!(map.get(&1), Some(&10));
    /// assert_eq!(map.get(&7), Some(&40));
    /// assert_eq!(map.get(&5), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree
            .key_value(self.tree.search(key))
            .map(|(_key, value)| value)
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(3, 0);
    /// map.get_mut(&3).map(|v| *v += 1);
    /// assert_eq!(map.get(&3), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node_idx = self.tree.search(key);
        self.tree.value_mut(node_idx)
    }

    /// Return `true` if the map contains the key.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        !self.tree.is_sentinel(self.tree.search(key))
    }

    /// The entry with the smallest key, `None` if the map is empty. O(1).
    #[inline]
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.key_value(self.tree.first())
    }

    /// The entry with the largest key, `None` if the map is empty. O(1).
    #[inline]
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.key_value(self.tree.last())
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        Iter::new(&self.tree)
    }

    /// Get the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(0);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// map.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, Ix> {
        let node_idx = self.tree.search(&key);
        if self.tree.is_sentinel(node_idx) {
            Entry::Vacant(VacantEntry { map_ref: self, key })
        } else {
            Entry::Occupied(OccupiedEntry {
                map_ref: self,
                node_idx,
            })
        }
    }

    /// Remove all entries from the map.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchange the contents of two maps in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Return the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Return `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl<K, V, Ix> Extend<(K, V)> for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ignore = self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, Ix> IntoIterator for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}
