use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RECENT_RECORDS: usize = 10;

pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One benchmark measurement, stamped with the local time it was taken at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub structure: String,
    pub operation: String,
    pub elements_count: usize,
    /// Time of the single-element operation; zero when none was timed.
    pub time_once_ms: f64,
    pub time_series_ms: f64,
    /// Local time as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl BenchmarkResult {
    pub fn new(
        structure: impl Into<String>,
        operation: impl Into<String>,
        elements_count: usize,
        time_once_ms: f64,
        time_series_ms: f64,
    ) -> Self {
        Self {
            structure: structure.into(),
            operation: operation.into(),
            elements_count,
            time_once_ms,
            time_series_ms,
            timestamp: now_timestamp(),
        }
    }
}

// The on-disk layout of a history file.
#[derive(Serialize, Deserialize)]
struct HistoryDocument {
    results: Vec<BenchmarkResult>,
    #[serde(default)]
    total_records: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cleared_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
}

impl HistoryDocument {
    fn new(results: Vec<BenchmarkResult>) -> Self {
        Self {
            total_records: results.len(),
            results,
            last_update: None,
            cleared_at: None,
            generated_at: None,
        }
    }
}

/// A list of benchmark results persisted as a JSON file.
///
/// # Examples
///
/// ```rust
/// use dsbench::bench::{BenchmarkHistory, BenchmarkResult};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("history.json");
///
/// let mut history = BenchmarkHistory::open(&path).unwrap();
/// history
///     .add_result(BenchmarkResult::new("array", "insert", 100, 0.0, 1.5))
///     .unwrap();
///
/// let reopened = BenchmarkHistory::open(&path).unwrap();
/// assert_eq!(reopened.results().len(), 1);
/// ```
#[derive(Debug)]
pub struct BenchmarkHistory {
    path: PathBuf,
    results: Vec<BenchmarkResult>,
}

impl BenchmarkHistory {
    /// Loads the history stored at `path`.
    ///
    /// A missing file gives an empty history. So does a file that is not a
    /// valid history document: it is first renamed to `<path>.corrupt`, so
    /// the next save starts a fresh file without losing the old content.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                results: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let results = match serde_json::from_str::<HistoryDocument>(&content) {
            Ok(document) => {
                #[cfg(feature = "logging")]
                log::info!(
                    "Loaded {} benchmark records from {}",
                    document.results.len(),
                    path.display()
                );
                document.results
            }
            Err(_e) => {
                let aside = corrupt_path(&path);
                std::fs::rename(&path, &aside)?;

                #[cfg(feature = "logging")]
                log::warn!(
                    "Moved unreadable benchmark history {} to {}: {}",
                    path.display(),
                    aside.display(),
                    _e
                );
                Vec::new()
            }
        };

        Ok(Self { path, results })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Appends `result` and saves the history.
    pub fn add_result(&mut self, result: BenchmarkResult) -> Result<()> {
        self.results.push(result);
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let mut document = HistoryDocument::new(self.results.clone());
        document.last_update = Some(now_timestamp());
        self.write_document(&document)?;

        #[cfg(feature = "logging")]
        log::info!(
            "Saved {} benchmark records to {}",
            self.results.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Drops every record and saves the empty history.
    pub fn clear(&mut self) -> Result<()> {
        self.results.clear();
        let mut document = HistoryDocument::new(Vec::new());
        document.cleared_at = Some(now_timestamp());
        self.write_document(&document)
    }

    /// Summarises the last ten records and the per-structure averages of the
    /// series time.
    pub fn summary(&self) -> HistorySummary {
        let start = self.results.len().saturating_sub(RECENT_RECORDS);
        let recent = self.results[start..]
            .iter()
            .enumerate()
            .map(|(i, result)| (start + i + 1, result.clone()))
            .collect();

        let mut totals: BTreeMap<String, (usize, f64)> = BTreeMap::new();
        for result in &self.results {
            let (count, total) = totals.entry(result.structure.clone()).or_default();
            *count += 1;
            *total += result.time_series_ms;
        }
        let per_structure = totals
            .into_iter()
            .map(|(structure, (count, total))| {
                (
                    structure,
                    StructureStats {
                        count,
                        average_series_ms: total / count as f64,
                    },
                )
            })
            .collect();

        HistorySummary {
            total_records: self.results.len(),
            recent,
            per_structure,
        }
    }

    /// Returns the records of `structure`, in the order they were added.
    pub fn find_by_structure(&self, structure: &str) -> SearchResult {
        let results: Vec<_> = self
            .results
            .iter()
            .filter(|result| result.structure == structure)
            .cloned()
            .collect();
        SearchResult {
            search_query: structure.to_string(),
            found_count: results.len(),
            results,
        }
    }

    /// Serializes the whole history, stamped with the current time.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let mut document = HistoryDocument::new(self.results.clone());
        document.generated_at = Some(now_timestamp());
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Writes a pretty-printed copy of the history to `path`.
    pub fn export_backup(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string(true)?)?;

        #[cfg(feature = "logging")]
        log::info!("Exported benchmark history to {}", path.as_ref().display());

        Ok(())
    }

    fn write_document(&self, document: &HistoryDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Where an unreadable history file is moved to.
fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// The records of one structure, as returned by
/// [`BenchmarkHistory::find_by_structure`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub search_query: String,
    pub found_count: usize,
    pub results: Vec<BenchmarkResult>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructureStats {
    pub count: usize,
    pub average_series_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistorySummary {
    pub total_records: usize,
    /// The last ten records with their one-based positions in the history.
    pub recent: Vec<(usize, BenchmarkResult)>,
    pub per_structure: BTreeMap<String, StructureStats>,
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark history ({} records)", self.total_records)?;
        if self.recent.is_empty() {
            return writeln!(f, "History is empty.");
        }

        writeln!(f, "Last {} results:", self.recent.len())?;
        for (position, result) in &self.recent {
            writeln!(
                f,
                "{}. {} - {} [{} elements] - {} ms ({})",
                position,
                result.structure,
                result.operation,
                result.elements_count,
                result.time_series_ms,
                result.timestamp
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Per structure:")?;
        for (structure, stats) in &self.per_structure {
            writeln!(
                f,
                "{}: {} runs, average {:.3} ms",
                structure, stats.count, stats.average_series_ms
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{now_timestamp, BenchmarkHistory, BenchmarkResult};

    fn result(structure: &str, series: f64) -> BenchmarkResult {
        BenchmarkResult::new(structure, "insert", 10, 0.0, series)
    }

    #[test]
    fn timestamp_format() {
        let stamp = now_timestamp();
        assert_eq!(stamp.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn summary_keeps_last_ten() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = BenchmarkHistory::open(dir.path().join("h.json")).unwrap();
        for i in 0..12 {
            let structure = if i % 2 == 0 { "array" } else { "stack" };
            history.add_result(result(structure, i as f64)).unwrap();
        }

        let summary = history.summary();
        assert_eq!(summary.total_records, 12);
        assert_eq!(summary.recent.len(), 10);
        assert_eq!(summary.recent[0].0, 3);
        assert_eq!(summary.recent[9].0, 12);

        // 0 + 2 + ... + 10 over six runs.
        let array = summary.per_structure["array"];
        assert_eq!(array.count, 6);
        assert_eq!(array.average_series_ms, 5.0);
        assert_eq!(summary.per_structure["stack"].average_series_ms, 6.0);

        let text = summary.to_string();
        assert!(text.starts_with("Benchmark history (12 records)\n"));
        assert!(text.contains("stack: 6 runs, average 6.000 ms"));
    }

    #[test]
    fn empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let history = BenchmarkHistory::open(dir.path().join("none.json")).unwrap();
        assert!(history.summary().to_string().ends_with("History is empty.\n"));
    }
}
