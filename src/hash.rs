//! Hash tables keyed by integers or text.
//!
//! Three collision-resolution strategies are provided:
//!
//! - [`SeparateChainingHashMap`][chaining]: one singly linked chain per
//!   bucket, rehashed into `2 * capacity + 1` buckets by load factor.
//! - [`LinearProbingHashMap`][linear]: open addressing with a fixed capacity.
//! - [`DoubleHashingSet`][double]: open addressing probing by a second hash,
//!   resized by load factor.
//!
//! Keys implement [`HashKey`][hash-key], which exposes the integer or text
//! representation the tables hash.
//!
//! [chaining]: ./struct.SeparateChainingHashMap.html
//! [linear]: ./struct.LinearProbingHashMap.html
//! [double]: ./struct.DoubleHashingSet.html
//! [hash-key]: ./trait.HashKey.html

pub(crate) mod builder;
pub mod double_hashing;
pub(crate) mod key;
pub mod linear_probing;
pub mod separate_chaining;
pub(crate) mod slot;

pub use builder::TableBuilder;
pub use double_hashing::DoubleHashingSet;
pub use key::{HashKey, HashSource};
pub use linear_probing::LinearProbingHashMap;
pub use separate_chaining::SeparateChainingHashMap;
