use super::{
    builder::{TableBuilder, DEFAULT_LOAD_FACTOR},
    key::{fold_text, source_of, HashKey, HashSource},
};
use crate::{
    error::{Error, Result},
    linear::Array,
};

use std::fmt;

pub(crate) const DEFAULT_CAPACITY: usize = 11;
const MIN_CAPACITY: usize = 1;

const INTEGER_MULTIPLIER: u64 = 37;
const TEXT_MULTIPLIER: u64 = 31;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    // Unreduced hash, so that a rehash does not need to hash the key again.
    hash: u64,
    key: K,
    value: V,
    next: Link<K, V>,
}

/// A hash map resolving collisions with one singly linked chain per bucket.
///
/// New entries are prepended to their chain. Before an insertion of a new key
/// would bring `(len + 1) / capacity` to the load-factor threshold (0.75 by
/// default), the bucket count grows to `2 * capacity + 1` and every entry is
/// redistributed.
///
/// Integer keys hash to `k * 37 mod capacity`; text keys are folded with a
/// polynomial rolling hash (multiplier 31).
///
/// # Examples
///
/// ```rust
/// use dsbench::hash::SeparateChainingHashMap;
///
/// let mut map = SeparateChainingHashMap::with_capacity(3);
/// map.put(1, 10).unwrap();
/// map.put(2, 20).unwrap();
/// map.put(3, 30).unwrap();
///
/// assert_eq!(map.capacity(), 7);
/// assert_eq!(map.get(&3).ok(), Some(&30));
///
/// // Removing a missing key is a no-op.
/// assert_eq!(map.remove(&4), None);
/// ```
pub struct SeparateChainingHashMap<K, V> {
    buckets: Box<[Link<K, V>]>,
    len: usize,
    load_factor: f64,
}

impl<K, V> SeparateChainingHashMap<K, V>
where
    K: HashKey + Eq,
{
    /// Constructs an empty map with 11 buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs an empty map with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_everything(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Returns a [`TableBuilder`](./struct.TableBuilder.html) to configure the
    /// map.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub(crate) fn with_everything(capacity: usize, load_factor: f64) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(MIN_CAPACITY)),
            len: 0,
            load_factor,
        }
    }

    /// Inserts a key-value pair, overwriting the value of an existing key.
    ///
    /// Returns the previous value when the key was already present. Fails with
    /// `UnsupportedKeyType` when the key has no hash rule; the map is left
    /// untouched in that case.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = raw_hash(&key)?;
        if let Some(node) = self.find_node_mut(hash, &key) {
            return Ok(Some(std::mem::replace(&mut node.value, value)));
        }

        if (self.len + 1) as f64 / self.capacity() as f64 >= self.load_factor {
            self.rehash(self.capacity() * 2 + 1);
        }

        let index = self.bucket_index(hash);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Node {
            hash,
            key,
            value,
            next,
        }));
        self.len += 1;
        Ok(None)
    }

    /// Returns a reference to the value of `key`.
    ///
    /// Fails with `KeyNotFound` on a miss.
    pub fn get(&self, key: &K) -> Result<&V> {
        let hash = raw_hash(key)?;
        self.find_node(hash, key)
            .map(|node| &node.value)
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let hash = raw_hash(key)?;
        self.find_node_mut(hash, key)
            .map(|node| &mut node.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the map contains `key`. A key without a hash rule is
    /// never contained.
    pub fn contains(&self, key: &K) -> bool {
        match raw_hash(key) {
            Ok(hash) => self.find_node(hash, key).is_some(),
            Err(_) => false,
        }
    }

    /// Removes `key` and returns its value. Does nothing when the key is
    /// absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = raw_hash(key).ok()?;
        let index = self.bucket_index(hash);

        let mut link = &mut self.buckets[index];
        while link
            .as_ref()
            .map_or(false, |node| node.hash != hash || node.key != *key)
        {
            link = &mut link.as_mut()?.next;
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    /// Returns every key-value pair, in bucket order and then chain order.
    pub fn items(&self) -> Array<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, V> SeparateChainingHashMap<K, V> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.release_chains();
        self.len = 0;
    }

    /// Iterates over the entries in bucket order and then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
            remaining: self.len,
        }
    }
}

// Private methods
impl<K, V> SeparateChainingHashMap<K, V>
where
    K: Eq,
{
    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn find_node(&self, hash: u64, key: &K) -> Option<&Node<K, V>> {
        let mut link = self.buckets[self.bucket_index(hash)].as_deref();
        while let Some(node) = link {
            if node.hash == hash && node.key == *key {
                return Some(node);
            }
            link = node.next.as_deref();
        }
        None
    }

    fn find_node_mut(&mut self, hash: u64, key: &K) -> Option<&mut Node<K, V>> {
        let index = self.bucket_index(hash);
        let mut link = self.buckets[index].as_deref_mut();
        while let Some(node) = link {
            if node.hash == hash && node.key == *key {
                return Some(node);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));

        #[cfg(feature = "logging")]
        log::debug!(
            "Rehashing a separate-chaining map from {} to {} buckets ({} entries)",
            old_buckets.len(),
            new_capacity,
            self.len
        );

        for mut link in old_buckets.into_vec() {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = self.bucket_index(node.hash);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
            }
        }
    }
}

impl<K, V> SeparateChainingHashMap<K, V> {
    // Unlinks the chains one node at a time so that a long chain cannot
    // overflow the stack through recursive `Box` drops.
    fn release_chains(&mut self) {
        for bucket in self.buckets.iter_mut() {
            let mut link = bucket.take();
            while let Some(mut node) = link {
                link = node.next.take();
            }
        }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Link<K, V>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn raw_hash<K: HashKey + ?Sized>(key: &K) -> Result<u64> {
    Ok(match source_of(key)? {
        HashSource::Integer(k) => k.wrapping_mul(INTEGER_MULTIPLIER),
        HashSource::Text(bytes) => fold_text(bytes, TEXT_MULTIPLIER),
    })
}

impl<K, V> Drop for SeparateChainingHashMap<K, V> {
    fn drop(&mut self) {
        self.release_chains();
    }
}

impl<K, V> Default for SeparateChainingHashMap<K, V>
where
    K: HashKey + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy. Each chain keeps its order and the copy has the same bucket
/// count.
impl<K: Clone, V: Clone> Clone for SeparateChainingHashMap<K, V> {
    fn clone(&self) -> Self {
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| {
                let mut nodes = Vec::new();
                let mut link = bucket.as_deref();
                while let Some(node) = link {
                    nodes.push(node);
                    link = node.next.as_deref();
                }
                nodes.into_iter().rev().fold(None, |next, node| {
                    Some(Box::new(Node {
                        hash: node.hash,
                        key: node.key.clone(),
                        value: node.value.clone(),
                        next,
                    }))
                })
            })
            .collect();

        Self {
            buckets,
            len: self.len,
            load_factor: self.load_factor,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SeparateChainingHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lists every bucket on its own line, as `i: EMPTY` or as the chain
/// `i: (k -> v) -> (k -> v)`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for SeparateChainingHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{i}: ")?;
            let mut link = bucket.as_deref();
            if link.is_none() {
                write!(f, "EMPTY")?;
            }
            while let Some(node) = link {
                write!(f, "({} -> {})", node.key, node.value)?;
                link = node.next.as_deref();
                if link.is_some() {
                    write!(f, " -> ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// An iterator over the entries of a `SeparateChainingHashMap`.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    node: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> IntoIterator for &'a SeparateChainingHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::SeparateChainingHashMap;
    use crate::{error::Error, hash::HashKey};

    #[test]
    fn rehash_keeps_entries() {
        let mut map = SeparateChainingHashMap::with_capacity(3);
        assert_eq!(map.put(1, 10).unwrap(), None);
        assert_eq!(map.put(2, 20).unwrap(), None);
        assert_eq!(map.capacity(), 3);

        // (2 + 1) / 3 crosses 0.75.
        map.put(3, 30).unwrap();
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&1).ok(), Some(&10));
        assert_eq!(map.get(&2).ok(), Some(&20));
        assert_eq!(map.get(&3).ok(), Some(&30));
    }

    #[test]
    fn overwrite_does_not_grow() {
        let mut map = SeparateChainingHashMap::with_capacity(3);
        map.put("a".to_string(), 1).unwrap();
        map.put("b".to_string(), 2).unwrap();
        assert_eq!(map.put("a".to_string(), 3).unwrap(), Some(1));
        assert_eq!(map.capacity(), 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a".to_string()).ok(), Some(&3));
    }

    #[test]
    fn missing_keys() {
        let mut map: SeparateChainingHashMap<i32, i32> = SeparateChainingHashMap::new();
        assert!(matches!(map.get(&7), Err(Error::KeyNotFound)));
        assert!(matches!(map.get_mut(&7), Err(Error::KeyNotFound)));
        assert!(!map.contains(&7));
        assert_eq!(map.remove(&7), None);
        assert!(map.is_empty());
    }

    #[test]
    fn remove_from_chain() {
        // 1, 8 and 15 share a bucket when there are 7 of them.
        let mut map = SeparateChainingHashMap::with_capacity(7);
        for (key, value) in [(1, 'a'), (8, 'b'), (15, 'c')] {
            map.put(key, value).unwrap();
        }
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![15, 8, 1]);

        assert_eq!(map.remove(&8), Some('b'));
        assert_eq!(map.remove(&8), None);
        assert_eq!(map.len(), 2);
        assert!(map.contains(&1));
        assert!(map.contains(&15));

        assert_eq!(map.remove(&1), Some('a'));
        assert_eq!(map.remove(&15), Some('c'));
        assert!(map.is_empty());
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = SeparateChainingHashMap::new();
        map.put(-5i64, vec![1]).unwrap();
        map.get_mut(&-5).unwrap().push(2);
        assert_eq!(map.get(&-5).unwrap(), &vec![1, 2]);
    }

    #[test]
    fn items_and_clear() {
        let mut map = SeparateChainingHashMap::new();
        for i in 0..20u32 {
            map.put(i, i * 2).unwrap();
        }
        let capacity = map.capacity();

        let mut items: Vec<_> = map.items().into_iter().collect();
        items.sort_unstable();
        assert_eq!(items, (0..20).map(|i| (i, i * 2)).collect::<Vec<_>>());
        assert_eq!(map.iter().len(), 20);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn clone_is_deep() {
        let mut map = SeparateChainingHashMap::with_capacity(5);
        map.put(1, "one".to_string()).unwrap();
        map.put(6, "six".to_string()).unwrap();

        let mut copy = map.clone();
        copy.get_mut(&1).unwrap().push('!');
        copy.put(2, "two".to_string()).unwrap();

        assert_eq!(map.get(&1).unwrap(), "one");
        assert!(!map.contains(&2));
        assert_eq!(copy.get(&1).unwrap(), "one!");
        assert_eq!(copy.capacity(), map.capacity());

        // 1 and 6 share a chain; the copy keeps its order.
        let same = map.clone();
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            same.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn display_buckets() {
        let mut map = SeparateChainingHashMap::with_capacity(2);
        // 37 is odd.
        map.put(1, 'a').unwrap();
        assert_eq!(map.to_string(), "0: EMPTY\n1: (1 -> a)\n");
    }

    #[test]
    fn unsupported_key_type() {
        #[derive(PartialEq, Eq)]
        struct Point(i32, i32);
        impl HashKey for Point {}

        let mut map = SeparateChainingHashMap::new();
        assert!(matches!(
            map.put(Point(1, 2), 0),
            Err(Error::UnsupportedKeyType { .. })
        ));
        assert!(map.is_empty());
        assert!(!map.contains(&Point(1, 2)));
        assert!(matches!(
            map.get(&Point(1, 2)),
            Err(Error::UnsupportedKeyType { .. })
        ));
    }

    #[test]
    fn large_map_drops() {
        let mut map = SeparateChainingHashMap::<u64, u64>::builder()
            .initial_capacity(1)
            .load_factor(1.0)
            .build_chaining();
        for i in 0..10_000u64 {
            map.put(i, i).unwrap();
        }
        assert_eq!(map.len(), 10_000);
        drop(map);
    }
}
