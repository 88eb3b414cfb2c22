use super::{
    builder::TableBuilder,
    key::{fold_text, source_of, HashKey, HashSource},
    slot::Slot,
};
use crate::error::{Error, Result};

use std::fmt;

pub(crate) const DEFAULT_CAPACITY: usize = 20;
const MIN_CAPACITY: usize = 1;

const TEXT_MULTIPLIER: u64 = 31;

/// A fixed-capacity hash map using open addressing with linear probing.
///
/// The map never grows: once every slot is occupied, inserting a new key
/// fails with [`Error::TableFull`][table-full]. Removed entries leave a
/// tombstone behind so that keys further along the same probe run stay
/// reachable; a later insertion may reuse it.
///
/// Integer keys hash to `k mod capacity`; text keys are folded with a
/// polynomial rolling hash (multiplier 31).
///
/// [table-full]: ../enum.Error.html#variant.TableFull
///
/// # Examples
///
/// ```rust
/// use dsbench::{hash::LinearProbingHashMap, Error};
///
/// let mut map = LinearProbingHashMap::with_capacity(2);
/// map.insert(1, "one").unwrap();
/// map.insert(3, "three").unwrap();
///
/// assert!(matches!(map.insert(5, "five"), Err(Error::TableFull { capacity: 2 })));
///
/// assert!(map.remove(&1));
/// map.insert(5, "five").unwrap();
/// assert_eq!(map.get(&3).ok(), Some(&"three"));
/// ```
#[derive(Clone)]
pub struct LinearProbingHashMap<K, V> {
    table: Box<[Slot<(K, V)>]>,
    len: usize,
}

impl<K, V> LinearProbingHashMap<K, V>
where
    K: HashKey + Eq,
{
    /// Constructs an empty map with 20 slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs an empty map with `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: std::iter::repeat_with(|| Slot::Empty)
                .take(capacity.max(MIN_CAPACITY))
                .collect(),
            len: 0,
        }
    }

    /// Returns a [`TableBuilder`](./struct.TableBuilder.html) to configure the
    /// map.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Inserts a key-value pair, overwriting the value of an existing key.
    ///
    /// The whole probe run is scanned for the key before the first free slot
    /// (empty or tombstone) is taken, so a key is never stored twice. Returns
    /// the previous value when the key was present.
    ///
    /// Fails with `TableFull` when the key is new and no slot is free.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let home = self.home_index(&key)?;

        let mut existing = None;
        let mut landing = None;
        for index in probe_sequence(home, self.capacity()) {
            match &self.table[index] {
                Slot::Occupied((k, _)) => {
                    if *k == key {
                        existing = Some(index);
                        break;
                    }
                }
                Slot::Deleted => {
                    landing.get_or_insert(index);
                }
                Slot::Empty => {
                    landing.get_or_insert(index);
                    break;
                }
            }
        }

        if let Some((_, v)) = existing.and_then(|index| self.table[index].occupied_mut()) {
            return Ok(Some(std::mem::replace(v, value)));
        }

        match landing {
            Some(index) => {
                #[cfg(feature = "logging")]
                self.table[index].log_landing(index);

                self.table[index] = Slot::Occupied((key, value));
                self.len += 1;
                Ok(None)
            }
            None => {
                #[cfg(feature = "logging")]
                log::warn!(
                    "Linear-probing map is full (capacity {})",
                    self.capacity()
                );

                Err(Error::TableFull {
                    capacity: self.capacity(),
                })
            }
        }
    }

    /// Returns a reference to the value of `key`.
    ///
    /// Fails with `KeyNotFound` when the probe reaches an empty slot or
    /// completes a full cycle without a match.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.home_index(key)?;
        self.find_index(key)
            .and_then(|index| self.table[index].occupied())
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.home_index(key)?;
        match self.find_index(key) {
            Some(index) => self.table[index]
                .occupied_mut()
                .map(|(_, v)| v)
                .ok_or(Error::KeyNotFound),
            None => Err(Error::KeyNotFound),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot. Returns `true` if the
    /// key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self
            .find_index(key)
            .and_then(|index| self.table[index].take())
            .is_some();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Drops every entry and clears all tombstones.
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
    }
}

impl<K, V> LinearProbingHashMap<K, V> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.table.iter(),
        }
    }
}

// Private methods
impl<K, V> LinearProbingHashMap<K, V>
where
    K: HashKey + Eq,
{
    fn home_index(&self, key: &K) -> Result<usize> {
        let hash = match source_of(key)? {
            HashSource::Integer(k) => k,
            HashSource::Text(bytes) => fold_text(bytes, TEXT_MULTIPLIER),
        };
        Ok((hash % self.capacity() as u64) as usize)
    }

    fn find_index(&self, key: &K) -> Option<usize> {
        let home = self.home_index(key).ok()?;
        for index in probe_sequence(home, self.capacity()) {
            match &self.table[index] {
                Slot::Empty => return None,
                Slot::Occupied((k, _)) if k == key => return Some(index),
                _ => (),
            }
        }
        None
    }
}

fn probe_sequence(home: usize, capacity: usize) -> impl Iterator<Item = usize> {
    (0..capacity).map(move |i| (home + i) % capacity)
}

impl<K, V> Default for LinearProbingHashMap<K, V>
where
    K: HashKey + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LinearProbingHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lists the occupied slots, one `key : value` line each.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for LinearProbingHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.iter() {
            writeln!(f, "{k} : {v}")?;
        }
        Ok(())
    }
}

/// An iterator over the entries of a `LinearProbingHashMap`.
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<(K, V)>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot.occupied().map(|(k, v)| (k, v)))
    }
}

impl<'a, K, V> IntoIterator for &'a LinearProbingHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
