//! `rb-ordered-map` provides an ordered map and set backed by a red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity,
//! and exposes the key order through O(1) first/last access and bidirectional
//! in-order iteration.
//!
//! To safely and efficiently handle insertion and deletion operations in Rust,
//! the tree uses an array to simulate pointers for managing the parent-child
//! references between nodes: every link is an index into one `Vec`, with a shared
//! sentinel node at index 0 standing in for "no child". This keeps the whole
//! structure free of `unsafe` and gives it the `Send` and `Unpin` traits. The
//! containers are single-owner values with no internal synchronization; sharing
//! one across threads requires external locking.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(1, 123456);
//! assert_eq!(map.get(&1), Some(&123456));
//! assert_eq!(map.first_key_value(), Some((&1, &123456)));
//! ```

mod entry;
mod index;
mod iter;
mod map;
mod node;
mod set;
mod tree;

#[cfg(test)]
mod tests;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter, SetIntoIter, SetIter};
pub use map::OrderedMap;
pub use set::OrderedSet;
pub use tree::RbTree;
