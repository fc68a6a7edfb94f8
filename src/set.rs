use crate::index::{DefaultIx, IndexType};
use crate::iter::{SetIntoIter, SetIter};
use crate::map::OrderedMap;

/// An ordered set of unique items, backed by [`OrderedMap`] with unit
/// values.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderedSet<T, Ix = DefaultIx> {
    /// The map that stores the items
    map: OrderedMap<T, (), Ix>,
}

impl<T> OrderedSet<T>
where
    T: Ord,
{
    /// Create an empty `OrderedSet`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: OrderedMap::new(),
        }
    }
}

impl<T> Default for OrderedSet<T>
where
    T: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, Ix> OrderedSet<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedSet` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: OrderedMap::with_capacity(capacity),
        }
    }

    /// Add an item to the set.
    /// Returns whether the item was newly inserted.
    ///
    /// # Panics
    ///
    /// This method panics when the set is at the maximum number of nodes for
    /// its index type.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, item: T) -> bool {
        self.map.insert(item, ()).is_none()
    }

    /// Remove an item from the set.
    /// Returns whether the item was present.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(2);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    #[inline]
    pub fn remove(&mut self, item: &T) -> bool {
        self.map.remove(item).is_some()
    }

    /// Return `true` if the set contains the item.
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.map.contains_key(item)
    }

    /// The smallest item in the set, `None` if the set is empty. O(1).
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(item, _unit)| item)
    }

    /// The largest item in the set, `None` if the set is empty. O(1).
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(item, _unit)| item)
    }

    /// Get an iterator over the items of the set, sorted.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, T, Ix> {
        SetIter::new(&self.map.tree)
    }

    /// Remove all items from the set.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Exchange the contents of two sets in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.map.swap(&mut other.map);
    }

    /// Return the number of items in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Return `true` if the set contains no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T, Ix> Extend<T> for OrderedSet<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ignore = self.insert(item);
        }
    }
}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, Ix> IntoIterator for &'a OrderedSet<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = &'a T;
    type IntoIter = SetIter<'a, T, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, Ix> IntoIterator for OrderedSet<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = T;
    type IntoIter = SetIntoIter<T, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter::new(self.map.tree)
    }
}
