//! The `run` subcommand: execute the full benchmark × representation matrix.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::engine::{ShellConfig, ShellEngine};
use crate::pipeline::compress2rs;
use crate::repr::ReprType;
use crate::runner::run_suite;
use crate::storage::{CsvExporter, JsonlWriter};
use crate::suite::{Benchmark, RunPaths, default_suite, load_suite};
use crate::verify::{AbcChecker, VerificationOutcome};
use crate::{BenchError, BenchResult};

fn resolve_suite(
    config: Option<PathBuf>,
    benchmark_filter: &[String],
) -> BenchResult<Vec<Benchmark>> {
    let suite = match config {
        Some(path) => load_suite(&path)?,
        None => default_suite(),
    };
    if benchmark_filter.is_empty() {
        return Ok(suite);
    }
    for name in benchmark_filter {
        if !suite.iter().any(|b| b.name == *name) {
            return Err(BenchError::Message(format!("benchmark '{}' not in suite", name)));
        }
    }
    Ok(suite.into_iter().filter(|b| benchmark_filter.contains(&b.name)).collect())
}

fn resolve_reprs(repr_filter: &[String]) -> BenchResult<Vec<ReprType>> {
    if repr_filter.is_empty() {
        return Ok(ReprType::ALL.to_vec());
    }
    repr_filter.iter().map(|s| s.parse()).collect()
}

pub fn run(
    benchmarks_dir: PathBuf,
    results_dir: PathBuf,
    config: Option<PathBuf>,
    engine_path: Option<PathBuf>,
    engine_args: Vec<String>,
    abc_path: Option<PathBuf>,
    benchmark_filter: Vec<String>,
    repr_filter: Vec<String>,
    no_verify: bool,
    jsonl_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
) -> BenchResult<()> {
    let suite = resolve_suite(config, &benchmark_filter)?;
    let reprs = resolve_reprs(&repr_filter)?;

    std::fs::create_dir_all(&results_dir)
        .map_err(|e| BenchError::Message(format!("failed to create results dir: {e}")))?;
    let paths = RunPaths::new(benchmarks_dir, results_dir);

    let shell = engine_path.unwrap_or_else(|| PathBuf::from("cirkit"));
    let engine = ShellEngine::spawn(ShellConfig::new(shell).with_args(engine_args))?;
    let checker = AbcChecker::new(abc_path.unwrap_or_else(|| PathBuf::from("abc")));

    let outcome =
        run_suite(engine, &checker, &suite, &reprs, &paths, &compress2rs(), !no_verify)?;

    if let Some(path) = jsonl_out {
        let writer = JsonlWriter::new(&path);
        for record in &outcome.records {
            writer.append(record)?;
        }
        info!("wrote {} records to {}", outcome.records.len(), path.display());
    }
    if let Some(path) = csv_out {
        CsvExporter::new().export(&outcome.records, &path)?;
        info!("wrote CSV export to {}", path.display());
    }

    let failed = outcome
        .records
        .iter()
        .filter(|r| r.outcome == VerificationOutcome::Failed)
        .count();
    if failed > 0 {
        warn!("{failed} run(s) failed equivalence checking");
    }

    print!("{}", outcome.table.render());
    Ok(())
}

/// List the suite that a run would use.
pub fn list(config: Option<PathBuf>) -> BenchResult<()> {
    let suite = match config {
        Some(path) => load_suite(&path)?,
        None => default_suite(),
    };
    for benchmark in suite {
        if benchmark.verify {
            println!("{}", benchmark.name);
        } else {
            println!("{} (not verified)", benchmark.name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reprs_defaults_to_all() {
        assert_eq!(resolve_reprs(&[]).unwrap(), ReprType::ALL.to_vec());
    }

    #[test]
    fn test_resolve_reprs_parses_filter() {
        let reprs = resolve_reprs(&["mig".to_string(), "xag".to_string()]).unwrap();
        assert_eq!(reprs, vec![ReprType::Mig, ReprType::Xag]);
        assert!(resolve_reprs(&["klut".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_suite_rejects_unknown_filter_names() {
        let err = resolve_suite(None, &["nosuch".to_string()]).unwrap_err();
        assert!(err.to_string().contains("nosuch"));
    }

    #[test]
    fn test_resolve_suite_filters_by_name() {
        let suite = resolve_suite(None, &["adder".to_string(), "hyp".to_string()]).unwrap();
        assert_eq!(suite.len(), 2);
        assert!(suite.iter().any(|b| b.name == "adder" && b.verify));
        assert!(suite.iter().any(|b| b.name == "hyp" && !b.verify));
    }
}
