use super::{
    builder::{TableBuilder, DEFAULT_LOAD_FACTOR},
    key::{fold_text, source_of, HashKey, HashSource},
    slot::Slot,
};
use crate::{
    error::{Error, Result},
    linear::Array,
};

use std::fmt;

pub(crate) const DEFAULT_CAPACITY: usize = 11;
// The step hash takes a remainder modulo `capacity - 1`.
const MIN_CAPACITY: usize = 2;
// Growths an insertion may trigger when the probe cycle of its key is full.
const MAX_CYCLE_GROWTHS: usize = 8;

const PRIMARY_MULTIPLIER: u64 = 2_654_435_761;
const STEP_MULTIPLIER: u64 = 40_503;
const PRIMARY_TEXT_MULTIPLIER: u64 = 31;
const STEP_TEXT_MULTIPLIER: u64 = 17;

/// Both hashes of a key before they are reduced by the table capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ProbeHash {
    primary: u64,
    step: u64,
}

impl ProbeHash {
    fn of<K: HashKey + ?Sized>(key: &K) -> Result<Self> {
        Ok(match source_of(key)? {
            HashSource::Integer(k) => Self {
                primary: (k ^ (k >> 4)).wrapping_mul(PRIMARY_MULTIPLIER),
                step: (k ^ (k >> 3)).wrapping_mul(STEP_MULTIPLIER),
            },
            HashSource::Text(bytes) => Self {
                primary: fold_text(bytes, PRIMARY_TEXT_MULTIPLIER),
                step: fold_text(bytes, STEP_TEXT_MULTIPLIER),
            },
        })
    }

    /// Slot indices `(h1 + i * h2) mod capacity` for `i` in `0..capacity`,
    /// where `h1` is in `[0, capacity)` and `h2` is in `[1, capacity - 1]`.
    fn probe_sequence(self, capacity: usize) -> impl Iterator<Item = usize> {
        let capacity = capacity as u64;
        let start = self.primary % capacity;
        let step = 1 + self.step % (capacity - 1);
        (0..capacity).scan(start, move |index, _| {
            let current = *index;
            *index = (*index + step) % capacity;
            Some(current as usize)
        })
    }
}

#[derive(Clone)]
struct Entry<K> {
    hash: ProbeHash,
    key: K,
}

// Outcome of walking the probe cycle of a key that is about to be inserted.
enum Probe {
    Present,
    Landing(usize),
    Exhausted,
}

/// A hash set using open addressing with double hashing.
///
/// The probe sequence of a key steps through the table by a second,
/// key-dependent hash, which spreads out keys that collide on their first
/// slot. When an insertion finds `len / capacity` at the load-factor
/// threshold (0.75 by default), the table grows to `2 * capacity + 1` slots
/// first and every live key is placed again.
///
/// Removed keys leave a tombstone behind. An insertion probes past
/// tombstones to make sure the key is not already stored further along, then
/// takes the first tombstone it passed.
///
/// # Examples
///
/// ```rust
/// use dsbench::hash::DoubleHashingSet;
///
/// let mut set = DoubleHashingSet::with_capacity(5);
/// set.insert(1).unwrap();
/// set.insert(6).unwrap();
/// assert!(set.remove(&1));
/// set.insert(11).unwrap();
///
/// assert!(set.contains(&6));
/// assert!(set.contains(&11));
/// assert!(!set.contains(&1));
/// ```
#[derive(Clone)]
pub struct DoubleHashingSet<K> {
    table: Array<Slot<Entry<K>>>,
    len: usize,
    load_factor: f64,
}

impl<K> DoubleHashingSet<K>
where
    K: HashKey + Eq,
{
    /// Constructs an empty set with 11 slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs an empty set with `capacity` slots (at least two).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_everything(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Returns a [`TableBuilder`](./struct.TableBuilder.html) to configure the
    /// set.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub(crate) fn with_everything(capacity: usize, load_factor: f64) -> Self {
        Self {
            table: empty_table(capacity.max(MIN_CAPACITY)),
            len: 0,
            load_factor,
        }
    }

    /// Adds `key` to the set. Returns `false` if it was already present.
    ///
    /// When the probe cycle of `key` finds neither the key, an empty slot,
    /// nor a tombstone, the table grows to `2 * capacity + 1` slots and the
    /// insertion is tried again. Fails with `SetFull` only if that still
    /// leaves no slot after several growths. A resize triggered by this call
    /// is kept even when the insertion fails.
    pub fn insert(&mut self, key: K) -> Result<bool> {
        let hash = ProbeHash::of(&key)?;

        if self.len as f64 / self.capacity() as f64 >= self.load_factor {
            self.resize(self.capacity() * 2 + 1);
        }

        for _ in 0..=MAX_CYCLE_GROWTHS {
            match self.probe_for_insert(hash, &key) {
                Probe::Present => return Ok(false),
                Probe::Landing(index) => {
                    #[cfg(feature = "logging")]
                    self.table[index].log_landing(index);

                    self.table[index] = Slot::Occupied(Entry { hash, key });
                    self.len += 1;
                    return Ok(true);
                }
                Probe::Exhausted => {
                    #[cfg(feature = "logging")]
                    log::warn!(
                        "Probe cycle exhausted in a double-hashing set (capacity {}); growing",
                        self.capacity()
                    );

                    self.resize(self.capacity() * 2 + 1);
                }
            }
        }

        Err(Error::SetFull {
            capacity: self.capacity(),
        })
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

    /// Drops every key and clears all tombstones. The capacity is kept.
    pub fn clear(&mut self) {
        self.table = empty_table(self.capacity());
        self.len = 0;
    }
}

impl<K> DoubleHashingSet<K> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the keys in slot order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: self.table.iter(),
        }
    }
}

// Private methods
impl<K> DoubleHashingSet<K>
where
    K: HashKey + Eq,
{
    fn find_index(&self, key: &K) -> Option<usize> {
        let hash = ProbeHash::of(key).ok()?;
        for index in hash.probe_sequence(self.capacity()) {
            match &self.table[index] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == *key => return Some(index),
                _ => (),
            }
        }
        None
    }

    fn probe_for_insert(&self, hash: ProbeHash, key: &K) -> Probe {
        let mut landing = None;
        for index in hash.probe_sequence(self.capacity()) {
            match &self.table[index] {
                Slot::Occupied(entry) => {
                    if entry.key == *key {
                        return Probe::Present;
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
        landing.map_or(Probe::Exhausted, Probe::Landing)
    }

    fn resize(&mut self, new_capacity: usize) {
        #[cfg(feature = "logging")]
        let old_capacity = self.capacity();

        let entries: Vec<Entry<K>> = std::mem::take(&mut self.table)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(entry) => Some(entry),
                _ => None,
            })
            .collect();

        // A step that shares a factor with the capacity only visits part of
        // the table. If that leaves some key without a slot, grow again.
        let mut capacity = new_capacity;
        let layout = loop {
            match plan_layout(&entries, capacity) {
                Some(layout) => break layout,
                None => {
                    #[cfg(feature = "logging")]
                    log::warn!(
                        "Could not place {} keys into {} slots; growing again",
                        entries.len(),
                        capacity
                    );

                    capacity = capacity * 2 + 1;
                }
            }
        };

        let mut table = empty_table(capacity);
        for (entry, index) in entries.into_iter().zip(layout) {
            table[index] = Slot::Occupied(entry);
        }
        self.table = table;

        #[cfg(feature = "logging")]
        log::debug!(
            "Resized a double-hashing set from {} to {} slots ({} keys)",
            old_capacity,
            capacity,
            self.len
        );
    }
}

fn empty_table<K>(capacity: usize) -> Array<Slot<Entry<K>>> {
    Array::from_fn(capacity, |_| Slot::Empty)
}

/// Picks a slot for every entry in a fresh table of `capacity` slots, or
/// returns `None` if some entry's probe cycle is already full.
fn plan_layout<K>(entries: &[Entry<K>], capacity: usize) -> Option<Vec<usize>> {
    let mut taken = vec![false; capacity];
    entries
        .iter()
        .map(|entry| {
            let index = entry
                .hash
                .probe_sequence(capacity)
                .find(|&index| !taken[index])?;
            taken[index] = true;
            Some(index)
        })
        .collect()
}

impl<K> Default for DoubleHashingSet<K>
where
    K: HashKey + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for DoubleHashingSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Lists every slot on its own line as `i: key`, `i: DELETED` or `i: EMPTY`.
impl<K: fmt::Display> fmt::Display for DoubleHashingSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.table.iter().enumerate() {
            match slot {
                Slot::Occupied(entry) => writeln!(f, "{i}: {}", entry.key)?,
                Slot::Deleted => writeln!(f, "{i}: DELETED")?,
                Slot::Empty => writeln!(f, "{i}: EMPTY")?,
            }
        }
        Ok(())
    }
}

/// An iterator over the keys of a `DoubleHashingSet`.
pub struct Iter<'a, K> {
    slots: std::slice::Iter<'a, Slot<Entry<K>>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot.occupied().map(|entry| &entry.key))
    }
}

impl<'a, K> IntoIterator for &'a DoubleHashingSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
