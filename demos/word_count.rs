use rb_ordered_map::OrderedMap;

fn main() {
    let text = "the quick brown fox jumps over the lazy dog the fox";

    let mut counts = OrderedMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }

    assert_eq!(counts.get(&"the"), Some(&3));
    assert_eq!(counts.get(&"fox"), Some(&2));

    // Entries come out sorted by word.
    for (word, count) in counts.iter() {
        println!("{word}: {count}");
    }
}
