use super::{
    history::BenchmarkResult,
    target::BenchTarget,
    time::{self, Clock},
    workload::Workload,
};
use crate::{
    error::{Error, Result},
    hash::{DoubleHashingSet, LinearProbingHashMap, SeparateChainingHashMap},
    linear::{Array, ForwardList, LinkedList, Queue, Stack},
    tree::AvlTree,
};

use std::{fmt, str::FromStr, time::Duration};

pub(crate) const DEFAULT_ELEMENTS: usize = 50_000;
pub(crate) const DEFAULT_SEED: u64 = 42;

/// The structures the runner knows how to benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Structure {
    Array,
    ForwardList,
    LinkedList,
    Queue,
    Stack,
    AvlTree,
    DoubleHash,
    LinearProbingHash,
    SeparateChainingHash,
}

impl Structure {
    pub const ALL: [Structure; 9] = [
        Structure::Array,
        Structure::ForwardList,
        Structure::LinkedList,
        Structure::Queue,
        Structure::Stack,
        Structure::AvlTree,
        Structure::DoubleHash,
        Structure::LinearProbingHash,
        Structure::SeparateChainingHash,
    ];

    /// The name the structure is parsed from and recorded under.
    pub fn name(self) -> &'static str {
        match self {
            Structure::Array => "array",
            Structure::ForwardList => "forwardlist",
            Structure::LinkedList => "linkedlist",
            Structure::Queue => "queue",
            Structure::Stack => "stack",
            Structure::AvlTree => "avltree",
            Structure::DoubleHash => "doublehash",
            Structure::LinearProbingHash => "linearprobinghash",
            Structure::SeparateChainingHash => "separatechaininghash",
        }
    }

    /// Sequential structures are also timed on a single key picked from the
    /// middle of the structure.
    pub fn is_sequential(self) -> bool {
        matches!(
            self,
            Structure::Array
                | Structure::ForwardList
                | Structure::LinkedList
                | Structure::Queue
                | Structure::Stack
        )
    }
}

impl FromStr for Structure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Structure::ALL
            .into_iter()
            .find(|structure| structure.name() == s)
            .ok_or_else(|| Error::UnknownStructure(s.to_string()))
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Insert,
    Find,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Find, Operation::Remove];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Find => "find",
            Operation::Remove => "remove",
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|operation| operation.name() == s)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a benchmark run measures.
///
/// # Examples
///
/// ```rust
/// use dsbench::bench::{self, BenchConfig, Operation, Structure};
///
/// let config = BenchConfig::new(Structure::AvlTree, Operation::Find).elements(1_000);
/// let result = bench::run(&config).unwrap();
///
/// assert_eq!(result.structure, "avltree");
/// assert_eq!(result.operation, "find");
/// assert_eq!(result.elements_count, 1_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub structure: Structure,
    pub operation: Operation,
    /// Number of generated values, 50,000 by default.
    pub elements: usize,
    /// Seed of the workload generator, 42 by default.
    pub seed: u64,
}

impl BenchConfig {
    pub fn new(structure: Structure, operation: Operation) -> Self {
        Self {
            structure,
            operation,
            elements: DEFAULT_ELEMENTS,
            seed: DEFAULT_SEED,
        }
    }

    pub fn elements(self, elements: usize) -> Self {
        Self { elements, ..self }
    }

    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}

#[derive(Default)]
struct Timings {
    once: Option<Duration>,
    series: Duration,
}

/// Runs one benchmark and returns its timestamped result.
///
/// For `find` and `remove`, the structure is first filled with the whole
/// workload. Sequential structures are additionally timed on the element at
/// the middle position; the series that follows a single removal skips every
/// occurrence of the removed value.
pub fn run(config: &BenchConfig) -> Result<BenchmarkResult> {
    let workload = Workload::generate(config.elements, config.seed);

    let timings = match config.structure {
        Structure::Array => drive(Array::<i32>::new(), config, &workload),
        Structure::ForwardList => drive(ForwardList::<i32>::new(), config, &workload),
        Structure::LinkedList => drive(LinkedList::<i32>::new(), config, &workload),
        Structure::Queue => drive(Queue::<i32>::new(), config, &workload),
        Structure::Stack => drive(Stack::<i32>::new(), config, &workload),
        Structure::AvlTree => drive(AvlTree::<i32>::new(), config, &workload),
        Structure::DoubleHash => drive(DoubleHashingSet::<i32>::new(), config, &workload),
        Structure::LinearProbingHash => drive(
            LinearProbingHashMap::<i32, i32>::with_capacity(config.elements),
            config,
            &workload,
        ),
        Structure::SeparateChainingHash => drive(
            SeparateChainingHashMap::<i32, i32>::new(),
            config,
            &workload,
        ),
    }?;

    Ok(BenchmarkResult::new(
        config.structure.name(),
        config.operation.name(),
        config.elements,
        timings.once.map_or(0.0, time::as_millis),
        time::as_millis(timings.series),
    ))
}

fn drive<T: BenchTarget>(
    mut target: T,
    config: &BenchConfig,
    workload: &Workload,
) -> Result<Timings> {
    let clock = Clock::new();
    let values = workload.values();

    if config.operation != Operation::Insert {
        fill(&mut target, values)?;
    }

    let single_key = if config.structure.is_sequential() {
        target.at(config.elements / 2)
    } else {
        None
    };

    let mut timings = Timings::default();
    match config.operation {
        Operation::Insert => {
            let (filled, elapsed) = time::timed(&clock, || fill(&mut target, values));
            filled?;
            timings.series = elapsed;
        }
        Operation::Find => {
            if let Some(key) = single_key {
                let (_, elapsed) = time::timed(&clock, || target.find(&key));
                timings.once = Some(elapsed);
            }
            let (_, elapsed) = time::timed(&clock, || {
                values.iter().filter(|value| target.find(value)).count()
            });
            timings.series = elapsed;
        }
        Operation::Remove => {
            let rest = match single_key {
                Some(key) => {
                    let (removed, elapsed) = time::timed(&clock, || target.remove(&key));
                    removed?;
                    timings.once = Some(elapsed);
                    workload.without(key)
                }
                None => values.to_vec(),
            };
            let (removed, elapsed) = time::timed(&clock, || {
                rest.iter().try_for_each(|value| target.remove(value))
            });
            removed?;
            timings.series = elapsed;
        }
    }

    #[cfg(feature = "logging")]
    log::debug!(
        "{} {} over {} elements: series {:?}, single {:?}",
        config.structure,
        config.operation,
        config.elements,
        timings.series,
        timings.once
    );

    Ok(timings)
}

fn fill<T: BenchTarget>(target: &mut T, values: &[i32]) -> Result<()> {
    values.iter().try_for_each(|value| target.push_back(*value))
}

#[cfg(test)]
mod tests {
    use super::{run, BenchConfig, Operation, Structure};
    use crate::error::Error;

    #[test]
    fn parse_names() {
        for structure in Structure::ALL {
            assert_eq!(structure.name().parse::<Structure>().unwrap(), structure);
        }
        assert_eq!("remove".parse::<Operation>().unwrap(), Operation::Remove);

        assert!(matches!(
            "heap".parse::<Structure>(),
            Err(Error::UnknownStructure(name)) if name == "heap"
        ));
        assert!(matches!(
            "sort".parse::<Operation>(),
            Err(Error::UnknownOperation(name)) if name == "sort"
        ));
    }

    #[test]
    fn every_structure_and_operation() {
        for structure in Structure::ALL {
            for operation in Operation::ALL {
                let config = BenchConfig::new(structure, operation).elements(500).seed(1);
                let result = run(&config).unwrap();

                assert_eq!(result.structure, structure.name());
                assert_eq!(result.operation, operation.name());
                assert_eq!(result.elements_count, 500);
                assert!(result.time_series_ms >= 0.0);
                if !(structure.is_sequential() && operation != Operation::Insert) {
                    assert_eq!(result.time_once_ms, 0.0);
                }
            }
        }
    }

    #[test]
    fn double_hash_runs_on_any_seed() {
        let config = BenchConfig::new(Structure::DoubleHash, Operation::Insert).seed(4);
        assert!(run(&config).is_ok());

        for seed in 0..10 {
            for operation in Operation::ALL {
                let config = BenchConfig::new(Structure::DoubleHash, operation)
                    .elements(1_000)
                    .seed(seed);
                assert!(run(&config).is_ok(), "seed {seed}, {operation}");
            }
        }
    }

    #[test]
    fn forward_list_is_sequential() {
        assert_eq!("forwardlist".parse::<Structure>().unwrap(), Structure::ForwardList);
        assert!(Structure::ForwardList.is_sequential());

        let config = BenchConfig::new(Structure::ForwardList, Operation::Remove).elements(300);
        let result = run(&config).unwrap();
        assert_eq!(result.structure, "forwardlist");
        assert!(result.time_once_ms >= 0.0);
    }

    #[test]
    fn empty_workload() {
        let config = BenchConfig::new(Structure::Stack, Operation::Remove).elements(0);
        let result = run(&config).unwrap();
        assert_eq!(result.time_once_ms, 0.0);
    }

    #[test]
    fn defaults() {
        let config = BenchConfig::new(Structure::Array, Operation::Insert);
        assert_eq!(config.elements, 50_000);
        assert_eq!(config.seed, 42);
    }
}
