use dsbench::bench::{self, BenchConfig, BenchmarkHistory, BenchmarkResult, Operation, Structure};

use std::fs;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn missing_file_opens_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let history = BenchmarkHistory::open(dir.path().join("absent.json"))?;
    assert!(history.results().is_empty());
    assert!(!history.path().exists());
    Ok(())
}

#[test]
fn results_survive_reopening() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.json");

    let mut history = BenchmarkHistory::open(&path)?;
    history.add_result(BenchmarkResult::new("array", "find", 100, 0.25, 1.5))?;
    history.add_result(BenchmarkResult::new("avltree", "insert", 200, 0.0, 3.0))?;

    let reopened = BenchmarkHistory::open(&path)?;
    assert_eq!(reopened.results(), history.results());

    let document: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(document["total_records"], 2);
    assert!(document["last_update"].is_string());
    assert_eq!(document["results"][0]["structure"], "array");
    assert_eq!(document["results"][1]["elements_count"], 200);
    Ok(())
}

#[test]
fn corrupt_file_is_moved_aside() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.json");
    fs::write(&path, "{ not json")?;

    let mut history = BenchmarkHistory::open(&path)?;
    assert!(history.results().is_empty());
    assert!(!path.exists());

    // The unreadable content is kept next to the history.
    let aside = dir.path().join("history.json.corrupt");
    assert_eq!(fs::read_to_string(&aside)?, "{ not json");

    history.add_result(BenchmarkResult::new("stack", "remove", 10, 0.0, 0.5))?;
    assert_eq!(BenchmarkHistory::open(&path)?.results().len(), 1);
    assert_eq!(fs::read_to_string(&aside)?, "{ not json");
    Ok(())
}

#[test]
fn clear_stamps_the_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.json");

    let mut history = BenchmarkHistory::open(&path)?;
    history.add_result(BenchmarkResult::new("queue", "insert", 10, 0.0, 0.1))?;
    history.clear()?;
    assert!(history.results().is_empty());

    let document: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(document["total_records"], 0);
    assert!(document["cleared_at"].is_string());
    assert!(BenchmarkHistory::open(&path)?.results().is_empty());
    Ok(())
}

#[test]
fn search_and_summary() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut history = BenchmarkHistory::open(dir.path().join("history.json"))?;
    for series in [1.0, 2.0, 3.0] {
        history.add_result(BenchmarkResult::new("array", "insert", 10, 0.0, series))?;
    }
    history.add_result(BenchmarkResult::new("doublehash", "find", 10, 0.0, 8.0))?;

    let found = history.find_by_structure("array");
    assert_eq!(found.search_query, "array");
    assert_eq!(found.found_count, 3);
    assert!(found.results.iter().all(|r| r.structure == "array"));
    assert_eq!(history.find_by_structure("heap").found_count, 0);

    let summary = history.summary();
    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.recent.len(), 4);
    assert_eq!(summary.recent[0].0, 1);
    assert_eq!(summary.per_structure["array"].count, 3);
    assert!((summary.per_structure["array"].average_series_ms - 2.0).abs() < 1e-9);
    assert!(summary.to_string().contains("doublehash: 1 runs"));
    Ok(())
}

#[test]
fn export_backup_is_pretty_and_stamped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut history = BenchmarkHistory::open(dir.path().join("history.json"))?;
    history.add_result(BenchmarkResult::new("linkedlist", "find", 10, 0.0, 0.2))?;

    let compact = history.to_json_string(false)?;
    assert!(compact.contains("\"generated_at\""));
    assert!(!compact.contains('\n'));

    let backup = dir.path().join("backup.json");
    history.export_backup(&backup)?;
    let content = fs::read_to_string(&backup)?;
    assert!(content.contains('\n'));
    let document: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(document["results"][0]["structure"], "linkedlist");
    assert_eq!(document["total_records"], 1);
    Ok(())
}

#[test]
fn recorded_runs() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let mut history = BenchmarkHistory::open(dir.path().join("history.json"))?;

    for structure in [Structure::Queue, Structure::SeparateChainingHash] {
        let config = BenchConfig::new(structure, Operation::Find).elements(200);
        history.add_result(bench::run(&config)?)?;
    }

    let results = history.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].structure, "queue");
    assert_eq!(results[0].operation, "find");
    assert_eq!(results[1].structure, "separatechaininghash");
    assert_eq!(results[1].time_once_ms, 0.0);
    assert!(results.iter().all(|r| r.elements_count == 200));
    Ok(())
}
