#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

//! Generic teaching data structures and a harness to benchmark them.
//!
//! - [`hash`] provides three hash tables keyed by integers or text: a
//!   separate-chaining map, a fixed-capacity linear-probing map and a
//!   double-hashing set.
//! - [`tree`] provides a self-balancing AVL tree.
//! - [`linear`] provides a growable array, a doubly linked list, a queue and a
//!   stack.
//! - [`snapshot`] exports and imports the content of any of them as JSON or
//!   as compact binary.
//! - [`bench`] times insertion, lookup and removal over seeded random
//!   workloads and keeps a JSON history of the results.
//!
//! None of the structures is synchronized; share them between threads behind
//! a lock.
//!
//! # Example
//!
//! ```rust
//! use dsbench::{hash::SeparateChainingHashMap, tree::AvlTree, Error};
//!
//! let mut map = SeparateChainingHashMap::new();
//! map.put("apple".to_string(), 3).unwrap();
//! assert_eq!(map.get(&"apple".to_string()).ok(), Some(&3));
//! assert!(matches!(map.get(&"pear".to_string()), Err(Error::KeyNotFound)));
//!
//! let tree: AvlTree<i32> = [30, 20, 40, 10].into_iter().collect();
//! assert_eq!(tree.in_order().as_slice(), &[10, 20, 30, 40]);
//! ```
//!
//! # Optional features
//!
//! - `logging` (off by default): emits `log` records when hash tables resize
//!   or run out of slots and when the benchmark history is loaded or saved.
//! - `quanta` (on by default): times benchmarks with the `quanta` clock
//!   instead of `std::time::Instant`.

pub mod bench;
pub mod hash;
pub mod linear;
pub mod snapshot;
pub mod tree;

mod error;

pub use error::{Error, Result};
