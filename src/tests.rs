use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;
use crate::node::{Color, Node};

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

impl<V> OrderedMap<i32, V> {
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves
    ///    contain the same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.tree.node_ref(self.tree.root(), Node::color),
            Color::Black
        ));
        self.check_children_color(self.tree.root());
        self.check_black_height(self.tree.root());
    }

    fn check_children_color(&self, x: NodeIndex<u32>) {
        if self.tree.node_ref(x, Node::is_sentinel) {
            return;
        }
        self.check_children_color(self.tree.node_ref(x, Node::left));
        self.check_children_color(self.tree.node_ref(x, Node::right));
        if self.tree.node_ref(x, Node::is_red) {
            assert!(matches!(self.tree.left_ref(x, Node::color), Color::Black));
            assert!(matches!(self.tree.right_ref(x, Node::color), Color::Black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
        if self.tree.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.check_black_height(self.tree.node_ref(x, Node::left));
        let righth = self.check_black_height(self.tree.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.tree.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }

    /// The cached ends agree with a walk from the root, and the arena holds
    /// exactly the live nodes plus the sentinel.
    fn check_extrema(&self) {
        assert_eq!(self.tree.first(), self.tree.minimum(self.tree.root()));
        assert_eq!(self.tree.last(), self.tree.maximum(self.tree.root()));
        assert_eq!(self.tree.nodes.len(), self.len() + 1);
    }

    fn height(&self, x: NodeIndex<u32>) -> usize {
        if self.tree.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.height(self.tree.node_ref(x, Node::left));
        let righth = self.height(self.tree.node_ref(x, Node::right));
        1 + lefth.max(righth)
    }
}

fn with_map_and_generator<V>(test_fn: impl Fn(OrderedMap<i32, V>, KeyGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let map = OrderedMap::new();
        test_fn(map, gen);
    }
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys {
            let _ignore = map.insert(key, ());
        }
        map.check_rb_properties();
        map.check_extrema();
    });
}

#[test]
fn rb_properties_hold_through_removals() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        for key in keys.clone() {
            let _ignore = map.insert(key, ());
            map.check_rb_properties();
            map.check_extrema();
        }
        for key in keys {
            let _ignore = map.remove(&key);
            map.check_rb_properties();
            map.check_extrema();
        }
        assert!(map.is_empty());
        assert!(map.tree.is_sentinel(map.tree.root()));
    });
}

#[test]
fn map_len_will_update() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(100)
            .collect();
        for key in keys.clone() {
            let _ignore = map.insert(key, ());
        }
        assert_eq!(map.len(), 100);
        for key in keys {
            let _ignore = map.remove(&key);
        }
        assert_eq!(map.len(), 0);
    });
}

#[test]
fn remove_missing_key_does_nothing() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys {
            let _ignore = map.insert(key, ());
        }
        assert_eq!(map.len(), 1000);
        let to_remove: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in to_remove {
            assert_eq!(map.remove(&key), None);
        }
        assert_eq!(map.len(), 1000);
    });
}

#[test]
fn iterate_through_map_is_sorted() {
    with_map_and_generator(|mut map, mut gen| {
        let mut pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .enumerate()
            .take(1000)
            .collect();
        for (value, key) in pairs.clone() {
            let _ignore = map.insert(key, value);
        }
        pairs.sort_unstable_by(|a, b| a.1.cmp(&b.1));

        for ((ek, ev), (value, key)) in map.iter().zip(pairs.iter()) {
            assert_eq!(ek, key);
            assert_eq!(ev, value);
        }
    });
}

#[test]
fn successor_walk_matches_iteration() {
    with_map_and_generator(|mut map, mut gen| {
        for _ in 0..200 {
            let _ignore = map.insert(gen.next_unique(), ());
        }
        let tree = &map.tree;
        let mut walked = Vec::new();
        let mut x = tree.minimum(tree.root());
        while !tree.is_sentinel(x) {
            walked.push(*tree.key_value(x).unwrap().0);
            x = tree.successor(x);
        }
        let keys: Vec<i32> = map.iter().map(|(key, _)| *key).collect();
        assert_eq!(walked, keys);
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
    });
}

#[test]
fn reverse_iteration_is_descending() {
    with_map_and_generator(|mut map, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        for key in keys.clone() {
            let _ignore = map.insert(key, ());
        }
        keys.sort_unstable_by(|a, b| b.cmp(a));
        let reversed: Vec<i32> = map.iter().rev().map(|(key, _)| *key).collect();
        assert_eq!(reversed, keys);
    });
}

#[test]
fn iteration_meets_in_the_middle() {
    let mut map = OrderedMap::new();
    for key in [1, 2, 3] {
        map.insert(key, ());
    }
    let mut it = map.iter();
    assert_eq!(it.next().map(|(key, _)| *key), Some(1));
    assert_eq!(it.next_back().map(|(key, _)| *key), Some(3));
    assert_eq!(it.next().map(|(key, _)| *key), Some(2));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);
}

#[test]
fn into_iter_yields_sorted_pairs() {
    with_map_and_generator(|mut map, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .collect();
        for key in keys.clone() {
            let _ignore = map.insert(key, key.wrapping_mul(2));
        }
        keys.sort_unstable();
        let pairs: Vec<_> = map.into_iter().collect();
        let expected: Vec<_> = keys.into_iter().map(|key| (key, key.wrapping_mul(2))).collect();
        assert_eq!(pairs, expected);
    });
}

#[test]
fn search_returns_the_same_node_until_mutation() {
    let mut map = OrderedMap::new();
    map.insert(7, "seven");
    map.insert(3, "three");
    let idx = map.tree.search(&7);
    assert_eq!(map.tree.key_value(idx), Some((&7, &"seven")));
    assert_eq!(map.tree.search(&7), idx);
    assert!(map.tree.is_sentinel(map.tree.search(&4)));
    assert_eq!(map.get(&7), Some(&"seven"));
    assert_eq!(map.get(&4), None);
}

#[test]
fn extremes_neighbor_the_sentinel() {
    let mut map = OrderedMap::new();
    for key in [4, 2, 6] {
        map.insert(key, ());
    }
    let tree = &map.tree;
    assert!(tree.is_sentinel(tree.predecessor(tree.first())));
    assert!(tree.is_sentinel(tree.successor(tree.last())));

    let mut map = OrderedMap::new();
    map.insert(1, ());
    assert_eq!(map.remove(&1), Some(()));
    assert_eq!(map.len(), 0);
    assert!(map.tree.is_sentinel(map.tree.root()));
    assert!(map.tree.is_sentinel(map.tree.first()));
    assert!(map.tree.is_sentinel(map.tree.last()));
}

#[test]
fn remove_keeps_traversal_and_balance() {
    let mut map = OrderedMap::new();
    for key in [10, 20, 5, 15, 25] {
        map.insert(key, ());
    }
    let keys: Vec<i32> = map.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![5, 10, 15, 20, 25]);

    assert_eq!(map.remove(&10), Some(()));
    let keys: Vec<i32> = map.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![5, 15, 20, 25]);
    assert_eq!(map.len(), 4);
    map.check_rb_properties();
}

#[test]
fn ascending_insert_stays_balanced() {
    let mut map = OrderedMap::new();
    for key in 1..=7 {
        map.insert(key, ());
    }
    assert!(map.height(map.tree.root()) <= 6);
    map.check_rb_properties();

    let mut map = OrderedMap::new();
    for key in 1..=1000 {
        map.insert(key, ());
    }
    assert!(map.height(map.tree.root()) <= 20);
    map.check_rb_properties();
}

#[test]
fn insert_overwrites_existing_value() {
    let mut map = OrderedMap::new();
    assert_eq!(map.insert(1, "a"), None);
    assert_eq!(map.insert(1, "b"), Some("a"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"b"));
    map.check_extrema();
}

#[test]
fn ordered_map_clear_is_ok() {
    let mut map = OrderedMap::new();
    map.insert(1, 1);
    map.insert(2, 2);
    map.insert(6, 3);
    assert_eq!(map.len(), 3);
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.tree.nodes.len(), 1);
    assert!(map.tree.nodes[0].is_sentinel());
    assert!(map.tree.is_sentinel(map.tree.first()));
}

#[test]
fn swap_exchanges_contents() {
    let mut a = OrderedMap::new();
    a.insert(1, "a");
    a.insert(2, "b");
    let mut b = OrderedMap::new();
    b.insert(9, "z");
    a.swap(&mut b);
    assert_eq!(a.len(), 1);
    assert_eq!(a.get(&9), Some(&"z"));
    assert_eq!(b.len(), 2);
    assert_eq!(b.get(&1), Some(&"a"));
    assert_eq!(b.get(&2), Some(&"b"));
}

#[test]
fn entry_or_insert_and_modify() {
    let mut map = OrderedMap::new();
    *map.entry(1).or_insert(10) += 5;
    assert_eq!(map.get(&1), Some(&15));
    let _ = map.entry(1).and_modify(|v| *v *= 2);
    assert_eq!(map.get(&1), Some(&30));
    let _ = map.entry(2).and_modify(|v| *v *= 2);
    assert_eq!(map.get(&2), None);
}

#[test]
fn set_rejects_duplicates_and_stays_sorted() {
    let mut set = OrderedSet::new();
    assert!(set.insert(3));
    assert!(set.insert(1));
    assert!(set.insert(2));
    assert!(!set.insert(2));
    assert_eq!(set.len(), 3);
    let items: Vec<i32> = set.iter().copied().collect();
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&3));
    assert!(set.remove(&2));
    assert!(!set.remove(&2));
    assert!(set.contains(&1));
    assert!(!set.contains(&2));
}

#[test]
fn set_round_trips_through_iterators() {
    let set: OrderedSet<i32> = [5, 3, 8, 1].into_iter().collect();
    let items: Vec<i32> = set.iter().copied().collect();
    assert_eq!(items, vec![1, 3, 5, 8]);
    let owned: Vec<i32> = set.into_iter().collect();
    assert_eq!(owned, vec![1, 3, 5, 8]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_ordered_map() {
    use serde_json::{json, Value};

    let mut map = OrderedMap::<i32, i32>::new();
    map.insert(1, 10);
    map.insert(2, 20);
    map.insert(3, 30);

    // Serialize the map to JSON
    let serialized = serde_json::to_string(&map).unwrap();
    let expected = json!({
        "nodes": [
            // sentinel node
            {
                "left": null,
                "right": null,
                "parent": null,
                "color": "Black",
                "key": null,
                "value": null
            },
            {
                "left": 0,
                "right": 0,
                "parent": 2,
                "color": "Red",
                "key": 1,
                "value": 10
            },
            {
                "left": 1,
                "right": 3,
                "parent": 0,
                "color": "Black",
                "key": 2,
                "value": 20
            },
            {
                "left": 0,
                "right": 0,
                "parent": 2,
                "color": "Red",
                "key": 3,
                "value": 30
            }
        ],
        "root": 2,
        "first": 1,
        "last": 3,
        "len": 3
    });
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    // Deserialize the map from JSON
    let deserialized: OrderedMap<i32, i32> = serde_json::from_str(&serialized).unwrap();
    let dv: Vec<_> = deserialized.iter().collect();
    let ev: Vec<_> = map.iter().collect();

    assert_eq!(ev, dv);
}
