//! Benchmark harness.
//!
//! A run fills a structure with a seeded random workload of integers and
//! times bulk insertion, lookup or removal. Sequential structures are also
//! timed on a single element picked from their middle position. Results can
//! be kept in a JSON [`BenchmarkHistory`](./struct.BenchmarkHistory.html).
//!
//! Timing uses `quanta` when the `quanta` feature is enabled (the default)
//! and `std::time::Instant` otherwise.

mod history;
mod runner;
mod target;
pub(crate) mod time;
mod workload;

pub use history::{
    BenchmarkHistory, BenchmarkResult, HistorySummary, SearchResult, StructureStats,
};
pub use runner::{run, BenchConfig, Operation, Structure};
pub use target::BenchTarget;
pub use workload::Workload;
