use crate::index::{IndexType, NodeIndex};
use crate::tree::RbTree;

/// An iterator over the entries of an `OrderedMap`, sorted by key.
///
/// Both ends advance by the tree's successor/predecessor links, so each step
/// is O(1) amortized and no auxiliary traversal state is kept beyond the two
/// cursors.
#[derive(Debug)]
pub struct Iter<'a, K, V, Ix>
where
    K: Ord,
{
    /// Reference to the tree
    tree_ref: &'a RbTree<K, V, Ix>,
    /// Next node yielded by `next`
    front: NodeIndex<Ix>,
    /// Next node yielded by `next_back`
    back: NodeIndex<Ix>,
    /// Set once the cursors have met
    finished: bool,
}

impl<'a, K, V, Ix> Iter<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, V, Ix>) -> Self {
        Iter {
            tree_ref,
            front: tree_ref.first(),
            back: tree_ref.last(),
            finished: tree_ref.is_empty(),
        }
    }
}

impl<'a, K, V, Ix> Iterator for Iter<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let x = self.front;
        if x == self.back {
            self.finished = true;
        } else {
            self.front = self.tree_ref.successor(x);
        }
        Some(self.tree_ref.node_ref(x, |xn| (xn.key(), xn.value())))
    }
}

impl<K, V, Ix> DoubleEndedIterator for Iter<'_, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let x = self.back;
        if x == self.front {
            self.finished = true;
        } else {
            self.back = self.tree_ref.predecessor(x);
        }
        Some(self.tree_ref.node_ref(x, |xn| (xn.key(), xn.value())))
    }
}

/// An owning iterator over the entries of an `OrderedMap`.
///
/// Payloads are taken out of the nodes as the cursor passes them; the link
/// structure stays intact until the tree is dropped with the iterator.
#[derive(Debug)]
pub struct IntoIter<K, V, Ix>
where
    K: Ord,
{
    tree: RbTree<K, V, Ix>,
    /// Next node to yield
    cursor: NodeIndex<Ix>,
}

impl<K, V, Ix> IntoIter<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree: RbTree<K, V, Ix>) -> Self {
        let cursor = tree.first();
        IntoIter { tree, cursor }
    }
}

impl<K, V, Ix> Iterator for IntoIter<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.cursor;
        if self.tree.is_sentinel(x) {
            return None;
        }
        // Advance first: the successor walk reads the payload-presence of
        // nodes after `x`, which have not been emptied yet.
        self.cursor = self.tree.successor(x);
        let node = &mut self.tree.nodes[x.index()];
        Some((node.take_key(), node.take_value()))
    }
}

/// An iterator over the items of an `OrderedSet`, sorted.
#[derive(Debug)]
pub struct SetIter<'a, T, Ix>
where
    T: Ord,
{
    inner: Iter<'a, T, (), Ix>,
}

impl<'a, T, Ix> SetIter<'a, T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<T, (), Ix>) -> Self {
        SetIter {
            inner: Iter::new(tree_ref),
        }
    }
}

impl<'a, T, Ix> Iterator for SetIter<'a, T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, _unit)| item)
    }
}

impl<T, Ix> DoubleEndedIterator for SetIter<'_, T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(item, _unit)| item)
    }
}

/// An owning iterator over the items of an `OrderedSet`.
#[derive(Debug)]
pub struct SetIntoIter<T, Ix>
where
    T: Ord,
{
    inner: IntoIter<T, (), Ix>,
}

impl<T, Ix> SetIntoIter<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree: RbTree<T, (), Ix>) -> Self {
        SetIntoIter {
            inner: IntoIter::new(tree),
        }
    }
}

impl<T, Ix> Iterator for SetIntoIter<T, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, _unit)| item)
    }
}
