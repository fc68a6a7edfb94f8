use rb_ordered_map::OrderedSet;

fn main() {
    let mut set = OrderedSet::new();
    for item in [42, 7, 19, 7, 3] {
        set.insert(item);
    }

    // Duplicates are rejected, so only four items remain.
    assert_eq!(set.len(), 4);
    assert_eq!(set.first(), Some(&3));
    assert_eq!(set.last(), Some(&42));

    let ascending: Vec<_> = set.iter().copied().collect();
    assert_eq!(ascending, vec![3, 7, 19, 42]);

    let descending: Vec<_> = set.iter().rev().copied().collect();
    assert_eq!(descending, vec![42, 19, 7, 3]);

    println!("{ascending:?}");
}
