use std::cmp::Ordering;
use std::mem;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node};

/// A red-black tree over an index-addressed node arena.
///
/// All parent/child references are `NodeIndex` handles into `nodes`; the
/// sentinel lives at index 0, is always black and never carries a payload.
/// The tree caches the indices of its smallest and largest nodes so that
/// both ends of the key order are reachable in O(1).
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RbTree<K, V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Node holding the smallest key, sentinel when empty
    first: NodeIndex<Ix>,
    /// Node holding the largest key, sentinel when empty
    last: NodeIndex<Ix>,
    /// Number of real nodes, sentinel excluded
    pub(crate) len: usize,
}

impl<K, V> RbTree<K, V>
where
    K: Ord,
{
    /// Create an empty `RbTree`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V> Default for RbTree<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, Ix> RbTree<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: Self::sentinel(),
            first: Self::sentinel(),
            last: Self::sentinel(),
            len: 0,
        }
    }

    /// The index of the shared sentinel node.
    #[inline]
    #[must_use]
    pub fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }

    /// Search for the node with the given key.
    ///
    /// Returns the sentinel index on a miss; identity against
    /// [`Self::sentinel`] distinguishes "not found" from any real node.
    #[inline]
    pub fn search(&self, key: &K) -> NodeIndex<Ix> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Equal => break,
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }
        x
    }

    /// Insert a key-value pair and return the index of the new node.
    ///
    /// The caller must have verified that the key is absent; how duplicate
    /// keys are resolved is the facade's concern, not the tree's.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes
    /// for its index type.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> NodeIndex<Ix> {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key, value));
        self.insert_inner(node_idx);
        self.len = self.len.wrapping_add(1);
        self.update_extrema();
        node_idx
    }

    /// Remove the node with the given key, returning whether it existed.
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        let node_idx = self.search(key);
        if self.node_ref(node_idx, Node::is_sentinel) {
            return false;
        }
        let _removed = self.remove_at(node_idx);
        true
    }

    /// Remove the node at `node_idx` and return its payload.
    ///
    /// The arena is kept dense by moving the highest-indexed node into the
    /// vacated slot, so indices handed out earlier are invalidated by this
    /// call.
    ///
    /// # Panics
    ///
    /// This method panics when `node_idx` is the sentinel.
    #[inline]
    pub fn remove_at(&mut self, node_idx: NodeIndex<Ix>) -> (K, V) {
        assert!(
            !self.node_ref(node_idx, Node::is_sentinel),
            "cannot remove the sentinel"
        );
        self.remove_inner(node_idx);
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(node_idx.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, node_idx);
        self.update_extrema();
        (node.take_key(), node.take_value())
    }

    /// Remove all nodes, resetting the arena to just the sentinel.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.first = Self::sentinel();
        self.last = Self::sentinel();
        self.len = 0;
    }

    /// Exchange the contents of two trees in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Return the number of nodes in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The index of the root node, sentinel when the tree is empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeIndex<Ix> {
        self.root
    }

    /// Check whether `node` is the sentinel.
    #[inline]
    #[must_use]
    pub fn is_sentinel(&self, node: NodeIndex<Ix>) -> bool {
        self.node_ref(node, Node::is_sentinel)
    }

    /// The node holding the smallest key, sentinel when empty. O(1).
    #[inline]
    #[must_use]
    pub fn first(&self) -> NodeIndex<Ix> {
        self.first
    }

    /// The node holding the largest key, sentinel when empty. O(1).
    #[inline]
    #[must_use]
    pub fn last(&self) -> NodeIndex<Ix> {
        self.last
    }

    /// Key and value stored at `node`, `None` for the sentinel.
    #[inline]
    pub fn key_value(&self, node: NodeIndex<Ix>) -> Option<(&K, &V)> {
        let n = &self.nodes[node.index()];
        n.key.as_ref().map(|key| (key, n.value()))
    }

    /// Mutable reference to the value stored at `node`, `None` for the
    /// sentinel.
    #[inline]
    pub fn value_mut(&mut self, node: NodeIndex<Ix>) -> Option<&mut V> {
        self.nodes[node.index()].value.as_mut()
    }

    /// Index of the node with the smallest key in the subtree rooted at `x`:
    /// `x` itself when it has no left child, the sentinel when `x` is the
    /// sentinel.
    #[inline]
    pub fn minimum(&self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if self.node_ref(x, Node::is_sentinel) {
            return x;
        }
        self.tree_minimum(x)
    }

    /// Index of the node with the largest key in the subtree rooted at `x`:
    /// `x` itself when it has no right child, the sentinel when `x` is the
    /// sentinel.
    #[inline]
    pub fn maximum(&self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if self.node_ref(x, Node::is_sentinel) {
            return x;
        }
        self.tree_maximum(x)
    }

    /// In-order successor of `x`: the next node in key order, or the
    /// sentinel when `x` holds the largest key.
    ///
    /// # Panics
    ///
    /// This method panics when `x` is the sentinel.
    #[inline]
    pub fn successor(&self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if !self.right_ref(x, Node::is_sentinel) {
            return self.tree_minimum(self.node_ref(x, Node::right));
        }
        let mut node = x;
        while self.is_right_child(node) {
            node = self.node_ref(node, Node::parent);
        }
        self.node_ref(node, Node::parent)
    }

    /// In-order predecessor of `x`: the previous node in key order, or the
    /// sentinel when `x` holds the smallest key.
    ///
    /// # Panics
    ///
    /// This method panics when `x` is the sentinel.
    #[inline]
    pub fn predecessor(&self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if !self.left_ref(x, Node::is_sentinel) {
            return self.tree_maximum(self.node_ref(x, Node::left));
        }
        let mut node = x;
        while self.is_left_child(node) {
            node = self.node_ref(node, Node::parent);
        }
        self.node_ref(node, Node::parent)
    }
}

impl<K, V, Ix> RbTree<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, V, Ix> {
        Node {
            key: None,
            value: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(key: K, value: V) -> Node<K, V, Ix> {
        Node {
            key: Some(key),
            value: Some(value),
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        }
    }

    /// Link a freshly allocated node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = Self::sentinel();
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            if self.node_ref(z, Node::key) < self.node_ref(x, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else if self.node_ref(z, Node::key) < self.node_ref(y, Node::key) {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        self.node_mut(z, Node::set_color(Color::Red));

        self.insert_fixup(z);
    }

    /// Unlink a node from the tree.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = z;
        let mut y_orig_color = self.node_ref(y, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
        } else {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key below `x`, which must be real.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key below `x`, which must be real.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent. False at the root,
    /// whose parent is the sentinel.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, |p| p.left) == Some(node)
    }

    /// Check if a node is a right child of its parent. False at the root.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, |p| p.right) == Some(node)
    }

    /// Refresh the cached extrema by walking from the root.
    fn update_extrema(&mut self) {
        if self.len == 0 {
            self.first = Self::sentinel();
            self.last = Self::sentinel();
            return;
        }
        self.first = self.tree_minimum(self.root);
        self.last = self.tree_maximum(self.root);
    }

    /// Patch references to the node relocated by `swap_remove`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, Ix> RbTree<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}
