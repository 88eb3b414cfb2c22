use std::collections::HashSet;

use dsbench::{
    hash::{DoubleHashingSet, HashKey, LinearProbingHashMap, SeparateChainingHashMap, TableBuilder},
    Error, Result,
};
use paste::paste;

// Uniform view over the three tables, keyed by `i64`.
trait Table {
    fn add(&mut self, key: i64) -> Result<()>;
    fn has(&self, key: &i64) -> bool;
    fn delete(&mut self, key: &i64) -> bool;
    fn size(&self) -> usize;
}

impl Table for SeparateChainingHashMap<i64, i64> {
    fn add(&mut self, key: i64) -> Result<()> {
        self.put(key, key.wrapping_mul(2)).map(drop)
    }

    fn has(&self, key: &i64) -> bool {
        self.contains(key)
    }

    fn delete(&mut self, key: &i64) -> bool {
        self.remove(key).is_some()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Table for LinearProbingHashMap<i64, i64> {
    fn add(&mut self, key: i64) -> Result<()> {
        self.insert(key, key.wrapping_mul(2)).map(drop)
    }

    fn has(&self, key: &i64) -> bool {
        self.contains(key)
    }

    fn delete(&mut self, key: &i64) -> bool {
        self.remove(key)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Table for DoubleHashingSet<i64> {
    fn add(&mut self, key: i64) -> Result<()> {
        self.insert(key).map(drop)
    }

    fn has(&self, key: &i64) -> bool {
        self.contains(key)
    }

    fn delete(&mut self, key: &i64) -> bool {
        self.remove(key)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

macro_rules! generate_table_tests {
    ($name:ident, $table_init:expr) => {
        paste! {
            #[test]
            fn [<test_ $name _membership_follows_inserts_and_removes>]() {
                let mut table = $table_init;
                let mut model = HashSet::new();

                for key in (0..150).step_by(3) {
                    table.add(key).unwrap();
                    model.insert(key);
                }
                for key in (0..150).step_by(6) {
                    assert!(table.delete(&key));
                    model.remove(&key);
                }
                // Re-adding an existing key does not create a second entry.
                table.add(3).unwrap();

                assert_eq!(table.size(), model.len());
                for key in 0..160 {
                    assert_eq!(table.has(&key), model.contains(&key), "key {}", key);
                }
            }

            #[test]
            fn [<test_ $name _remove_then_insert_counts_once>]() {
                let mut table = $table_init;
                table.add(5).unwrap();
                assert!(table.delete(&5));
                assert!(!table.delete(&5));
                assert!(!table.has(&5));

                table.add(5).unwrap();
                assert!(table.has(&5));
                assert_eq!(table.size(), 1);
            }

            #[test]
            fn [<test_ $name _extreme_keys>]() {
                let keys = [i64::MIN, -1, 0, 1, i64::MAX];
                let mut table = $table_init;
                for key in keys {
                    table.add(key).unwrap();
                }
                assert_eq!(table.size(), keys.len());
                for key in keys {
                    assert!(table.has(&key));
                }
                assert!(!table.has(&2));
            }

            #[test]
            fn [<test_ $name _tombstones_do_not_hide_keys>]() {
                let mut table = $table_init;
                for key in 0..40 {
                    table.add(key * 11).unwrap();
                }
                for key in (0..40).filter(|k| k % 2 == 1) {
                    assert!(table.delete(&(key * 11)));
                }
                for key in 0..40 {
                    assert_eq!(table.has(&(key * 11)), key % 2 == 0);
                }
                for key in (0..40).filter(|k| k % 2 == 1) {
                    table.add(key * 11).unwrap();
                }
                assert_eq!(table.size(), 40);
            }
        }
    };
}

generate_table_tests!(chaining, SeparateChainingHashMap::<i64, i64>::new());
generate_table_tests!(
    linear_probing,
    LinearProbingHashMap::<i64, i64>::with_capacity(128)
);
generate_table_tests!(double_hashing, DoubleHashingSet::<i64>::new());
generate_table_tests!(
    chaining_built,
    TableBuilder::new()
        .initial_capacity(1)
        .load_factor(0.5)
        .build_chaining::<i64, i64>()
);
generate_table_tests!(
    double_hashing_built,
    TableBuilder::new()
        .initial_capacity(2)
        .load_factor(0.5)
        .build_double_hashing::<i64>()
);

#[test]
fn chaining_capacity_follows_growth_formula() {
    let mut map = SeparateChainingHashMap::<u32, u32>::with_capacity(3);
    let mut expected = 3;
    for key in 0..200 {
        if (map.len() + 1) as f64 / expected as f64 >= 0.75 {
            expected = expected * 2 + 1;
        }
        map.put(key, key).unwrap();
        assert_eq!(map.capacity(), expected);
    }
    assert!((0..200).all(|key| map.get(&key).ok() == Some(&key)));
}

#[test]
fn double_hashing_grows_past_load_factor() {
    let mut set = DoubleHashingSet::<u32>::with_capacity(11);
    for key in 0..9 {
        set.insert(key).unwrap();
    }
    // 9 / 11 is past 0.75, so the next insertion grows the table first.
    set.insert(100).unwrap();
    assert_eq!(set.capacity(), 23);
    assert!((0..9).all(|key| set.contains(&key)));
    assert!(set.contains(&100));
}

#[test]
fn text_keys() {
    let words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

    let mut chaining = SeparateChainingHashMap::new();
    let mut probing = LinearProbingHashMap::with_capacity(words.len());
    let mut set = DoubleHashingSet::new();
    for (i, word) in words.iter().enumerate() {
        chaining.put(word.to_string(), i).unwrap();
        probing.insert(word.to_string(), i).unwrap();
        set.insert(word.to_string()).unwrap();
    }

    for (i, word) in words.iter().enumerate() {
        let key = word.to_string();
        assert_eq!(chaining.get(&key).ok(), Some(&i));
        assert_eq!(probing.get(&key).ok(), Some(&i));
        assert!(set.contains(&key));
    }
    assert!(matches!(
        probing.insert("iota".to_string(), 8),
        Err(Error::TableFull { capacity: 8 })
    ));
}

#[derive(Clone, PartialEq, Eq)]
struct Opaque(u8);

impl HashKey for Opaque {}

#[test]
fn unsupported_key_type() {
    let mut chaining = SeparateChainingHashMap::new();
    let mut probing = LinearProbingHashMap::new();
    let mut set = DoubleHashingSet::new();

    assert!(matches!(
        chaining.put(Opaque(1), ()),
        Err(Error::UnsupportedKeyType { .. })
    ));
    assert!(matches!(
        probing.insert(Opaque(1), ()),
        Err(Error::UnsupportedKeyType { .. })
    ));
    assert!(matches!(
        set.insert(Opaque(1)),
        Err(Error::UnsupportedKeyType { .. })
    ));
    assert!(matches!(
        probing.get(&Opaque(1)),
        Err(Error::UnsupportedKeyType { .. })
    ));

    assert!(chaining.is_empty() && probing.is_empty() && set.is_empty());
    assert!(!set.contains(&Opaque(1)));
}
