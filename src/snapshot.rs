//! Structural snapshots of every container in this crate.
//!
//! A snapshot lists the live entries of a structure in a defined order: slot
//! or bucket order for the hash tables, ascending order for the AVL tree and
//! front-to-back order for the sequential containers (a stack is listed from
//! its top). Importing a snapshot rebuilds the structure through its regular
//! insertion path.
//!
//! Snapshots can be written as JSON (`serde_json`) or in a compact binary
//! form with fixed-width integers (`bincode`).
//!
//! # Examples
//!
//! ```rust
//! use dsbench::{hash::SeparateChainingHashMap, snapshot::Snapshot};
//!
//! let mut map = SeparateChainingHashMap::new();
//! map.put(1, 2).unwrap();
//!
//! let json = map.to_json().unwrap();
//! assert_eq!(json, r#"{"capacity":11,"items":[{"key":1,"value":2}]}"#);
//!
//! let copy = SeparateChainingHashMap::<i32, i32>::from_json(&json).unwrap();
//! assert_eq!(copy.get(&1).ok(), Some(&2));
//! ```

use crate::{
    error::Result,
    hash::{DoubleHashingSet, HashKey, LinearProbingHashMap, SeparateChainingHashMap},
    linear::{Array, ForwardList, LinkedList, Queue, Stack},
    tree::AvlTree,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::{Read, Write};

/// Export and import of a structure's live content.
pub trait Snapshot: Sized {
    /// The serializable form of the structure.
    type Record: Serialize + DeserializeOwned;

    fn export(&self) -> Self::Record;

    /// Rebuilds a structure by inserting every entry of `record`.
    fn import(record: Self::Record) -> Result<Self>;

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export())?)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    fn from_json(json: &str) -> Result<Self> {
        Self::import(serde_json::from_str(json)?)
    }

    fn write_binary<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, &self.export())?;
        Ok(())
    }

    fn read_binary<R: Read>(reader: R) -> Result<Self> {
        Self::import(bincode::deserialize_from(reader)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord<K, V> {
    pub key: K,
    pub value: V,
}

/// Snapshot of a hash map: its capacity and its entries in slot order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord<K, V> {
    pub capacity: usize,
    pub items: Vec<ItemRecord<K, V>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord<K> {
    pub capacity: usize,
    pub keys: Vec<K>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord<T> {
    pub keys: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord<T> {
    pub data: Vec<T>,
}

fn map_record<'a, K, V, I>(capacity: usize, items: I) -> MapRecord<K, V>
where
    K: Clone + 'a,
    V: Clone + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    MapRecord {
        capacity,
        items: items
            .map(|(key, value)| ItemRecord {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
    }
}

impl<K, V> Snapshot for SeparateChainingHashMap<K, V>
where
    K: HashKey + Eq + Clone + Serialize + DeserializeOwned,
    V: Clone + Serialize + DeserializeOwned,
{
    type Record = MapRecord<K, V>;

    fn export(&self) -> Self::Record {
        map_record(self.capacity(), self.iter())
    }

    fn import(record: Self::Record) -> Result<Self> {
        let mut map = Self::with_capacity(record.capacity);
        for ItemRecord { key, value } in record.items {
            map.put(key, value)?;
        }
        Ok(map)
    }
}

impl<K, V> Snapshot for LinearProbingHashMap<K, V>
where
    K: HashKey + Eq + Clone + Serialize + DeserializeOwned,
    V: Clone + Serialize + DeserializeOwned,
{
    type Record = MapRecord<K, V>;

    fn export(&self) -> Self::Record {
        map_record(self.capacity(), self.iter())
    }

    fn import(record: Self::Record) -> Result<Self> {
        let mut map = Self::with_capacity(record.capacity);
        for ItemRecord { key, value } in record.items {
            map.insert(key, value)?;
        }
        Ok(map)
    }
}

impl<K> Snapshot for DoubleHashingSet<K>
where
    K: HashKey + Eq + Clone + Serialize + DeserializeOwned,
{
    type Record = SetRecord<K>;

    fn export(&self) -> Self::Record {
        SetRecord {
            capacity: self.capacity(),
            keys: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        let mut set = Self::with_capacity(record.capacity);
        for key in record.keys {
            set.insert(key)?;
        }
        Ok(set)
    }
}

impl<T> Snapshot for AvlTree<T>
where
    T: Ord + Clone + Serialize + DeserializeOwned,
{
    type Record = TreeRecord<T>;

    fn export(&self) -> Self::Record {
        TreeRecord {
            keys: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        Ok(record.keys.into_iter().collect())
    }
}

impl<T> Snapshot for Array<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    type Record = SequenceRecord<T>;

    fn export(&self) -> Self::Record {
        SequenceRecord {
            data: self.as_slice().to_vec(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        Ok(record.data.into_iter().collect())
    }
}

impl<T> Snapshot for ForwardList<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    type Record = SequenceRecord<T>;

    fn export(&self) -> Self::Record {
        SequenceRecord {
            data: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        Ok(record.data.into_iter().collect())
    }
}

impl<T> Snapshot for LinkedList<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    type Record = SequenceRecord<T>;

    fn export(&self) -> Self::Record {
        SequenceRecord {
            data: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        Ok(record.data.into_iter().collect())
    }
}

impl<T> Snapshot for Queue<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    type Record = SequenceRecord<T>;

    fn export(&self) -> Self::Record {
        SequenceRecord {
            data: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        Ok(record.data.into_iter().collect())
    }
}

impl<T> Snapshot for Stack<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    type Record = SequenceRecord<T>;

    /// Lists the stack from its top.
    fn export(&self) -> Self::Record {
        SequenceRecord {
            data: self.iter().cloned().collect(),
        }
    }

    fn import(record: Self::Record) -> Result<Self> {
        let mut stack = Stack::new();
        for value in record.data.into_iter().rev() {
            stack.push(value);
        }
        Ok(stack)
    }
}

#[cfg(test)]
mod tests {
    use super::{SequenceRecord, Snapshot};
    use crate::{
        error::Error,
        hash::{DoubleHashingSet, LinearProbingHashMap},
        linear::Stack,
        tree::AvlTree,
    };

    #[test]
    fn stack_is_listed_from_top() {
        let mut stack = Stack::new();
        for value in 1..=3 {
            stack.push(value);
        }
        assert_eq!(
            stack.export(),
            SequenceRecord {
                data: vec![3, 2, 1]
            }
        );
        assert_eq!(stack.to_json().unwrap(), r#"{"data":[3,2,1]}"#);

        let mut copy = Stack::<i32>::from_json(r#"{"data":[3,2,1]}"#).unwrap();
        assert_eq!(copy.pop().unwrap(), 3);
        assert_eq!(copy.pop().unwrap(), 2);
    }

    #[test]
    fn tree_binary_round_trip() {
        let tree: AvlTree<u32> = [5, 3, 8, 1].into_iter().collect();
        let mut bytes = Vec::new();
        tree.write_binary(&mut bytes).unwrap();

        // A u64 length prefix followed by four fixed-width u32 keys.
        assert_eq!(bytes.len(), 8 + 4 * 4);

        let copy = AvlTree::<u32>::read_binary(bytes.as_slice()).unwrap();
        assert_eq!(copy.in_order().as_slice(), &[1, 3, 5, 8]);
        assert!(copy.is_balanced());
    }

    #[test]
    fn set_keeps_capacity() {
        let mut set = DoubleHashingSet::with_capacity(7);
        set.insert("x".to_string()).unwrap();
        set.insert("y".to_string()).unwrap();

        let copy = DoubleHashingSet::<String>::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(copy.capacity(), 7);
        assert_eq!(copy.len(), 2);
        assert!(copy.contains(&"x".to_string()));
        assert!(copy.contains(&"y".to_string()));
    }

    #[test]
    fn import_failures() {
        let json = r#"{"capacity":1,"items":[{"key":1,"value":1},{"key":2,"value":2}]}"#;
        assert!(matches!(
            LinearProbingHashMap::<i32, i32>::from_json(json),
            Err(Error::TableFull { capacity: 1 })
        ));

        assert!(matches!(
            AvlTree::<i32>::from_json("{"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            AvlTree::<i32>::read_binary(&[1u8, 0][..]),
            Err(Error::Binary(_))
        ));
    }
}
