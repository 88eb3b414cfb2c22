/// The error type for every fallible operation in this crate.
///
/// None of the structures retry internally. An operation that returns an
/// `Err` has not mutated the structure, except for insertions into a
/// growable hash table: a resize triggered by the load factor completes
/// before the insertion itself is attempted, so a failed insertion may still
/// leave the table at its grown capacity.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An index or position argument lies outside the valid bounds of a
    /// sequential structure.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A map lookup that requires a value missed.
    #[error("key not found")]
    KeyNotFound,

    /// An open-addressing insertion into a fixed-capacity table found no
    /// available slot.
    #[error("hash table is full (capacity {capacity})")]
    TableFull { capacity: usize },

    /// A double-hashing insertion kept finding its probe cycle full, even
    /// after growing the table several times.
    #[error("set is full (capacity {capacity})")]
    SetFull { capacity: usize },

    /// A hash was requested for a key kind that has no hash rule. Only
    /// integers and text can be hashed.
    #[error("unsupported key type for hash: {type_name}")]
    UnsupportedKeyType { type_name: &'static str },

    /// A removal or access was attempted on an empty structure.
    #[error("structure is empty")]
    Underflow,

    /// The benchmark harness was given a structure name it does not know.
    #[error("unknown structure: {0}")]
    UnknownStructure(String),

    /// The benchmark harness was given an operation name it does not know.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary snapshot error: {0}")]
    Binary(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
