use super::{
    double_hashing::{self, DoubleHashingSet},
    linear_probing::{self, LinearProbingHashMap},
    separate_chaining::{self, SeparateChainingHashMap},
    HashKey,
};

pub(crate) const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Builds one of the hash tables of this crate with various configuration
/// knobs.
///
/// # Examples
///
/// ```rust
/// use dsbench::hash::TableBuilder;
///
/// let mut map = TableBuilder::new()
///     // Start with 3 buckets.
///     .initial_capacity(3)
///     // Grow once the table would become half full.
///     .load_factor(0.5)
///     .build_chaining();
///
/// map.put(1, "one").unwrap();
/// map.put(2, "two").unwrap();
/// assert_eq!(map.capacity(), 7);
/// assert_eq!(map.get(&1).ok(), Some(&"one"));
/// ```
///
#[derive(Clone, Debug)]
pub struct TableBuilder {
    initial_capacity: Option<usize>,
    load_factor: f64,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self {
            initial_capacity: None,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableBuilder {
    /// Construct a new `TableBuilder` with each table's default capacity and a
    /// load-factor threshold of 0.75.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of buckets or slots the table starts with.
    ///
    /// The value is clamped to the smallest capacity the table supports.
    pub fn initial_capacity(self, capacity: usize) -> Self {
        Self {
            initial_capacity: Some(capacity),
            ..self
        }
    }

    /// Sets the load-factor threshold that triggers a resize.
    ///
    /// The linear-probing map never grows and ignores this setting.
    ///
    /// # Panics
    ///
    /// `TableBuilder::build_*` methods will panic if `load_factor` is not in
    /// `(0.0, 1.0]`.
    pub fn load_factor(self, load_factor: f64) -> Self {
        Self {
            load_factor,
            ..self
        }
    }

    /// Builds a `SeparateChainingHashMap<K, V>`.
    ///
    /// # Panics
    ///
    /// Panics if the configured load factor is not in `(0.0, 1.0]`.
    pub fn build_chaining<K, V>(self) -> SeparateChainingHashMap<K, V>
    where
        K: HashKey + Eq,
    {
        ensure_load_factor_or_panic(self.load_factor);
        SeparateChainingHashMap::with_everything(
            self.initial_capacity
                .unwrap_or(separate_chaining::DEFAULT_CAPACITY),
            self.load_factor,
        )
    }

    /// Builds a `LinearProbingHashMap<K, V>`.
    ///
    /// # Panics
    ///
    /// Panics if the configured load factor is not in `(0.0, 1.0]`.
    pub fn build_linear_probing<K, V>(self) -> LinearProbingHashMap<K, V>
    where
        K: HashKey + Eq,
    {
        ensure_load_factor_or_panic(self.load_factor);
        LinearProbingHashMap::with_capacity(
            self.initial_capacity
                .unwrap_or(linear_probing::DEFAULT_CAPACITY),
        )
    }

    /// Builds a `DoubleHashingSet<K>`.
    ///
    /// # Panics
    ///
    /// Panics if the configured load factor is not in `(0.0, 1.0]`.
    pub fn build_double_hashing<K>(self) -> DoubleHashingSet<K>
    where
        K: HashKey + Eq,
    {
        ensure_load_factor_or_panic(self.load_factor);
        DoubleHashingSet::with_everything(
            self.initial_capacity
                .unwrap_or(double_hashing::DEFAULT_CAPACITY),
            self.load_factor,
        )
    }
}

fn ensure_load_factor_or_panic(load_factor: f64) {
    assert!(
        load_factor > 0.0 && load_factor <= 1.0,
        "load_factor must be in (0.0, 1.0]"
    );
}
