//! Suite orchestration.
//!
//! One iteration per (benchmark, representation) pair, strictly sequential:
//! load, baseline snapshot, clear and reload (the snapshot's mapping pass
//! has mutated the network), pipeline, post snapshot, persist, verify,
//! record. Iterations share one engine session, so nothing here may
//! interleave.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::SynthesisEngine;
use crate::pipeline::{self, TransformStep};
use crate::report::ResultsTable;
use crate::repr::ReprType;
use crate::stats::{self, Snapshot};
use crate::store::NetworkStore;
use crate::suite::{Benchmark, RunPaths};
use crate::verify::{EquivalenceCheck, VerificationOutcome};
use crate::{BenchResult, SystemInfo};

fn now_string() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".to_string())
}

/// Everything measured for one (benchmark, representation) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    pub benchmark: String,
    pub representation: ReprType,
    pub baseline: Snapshot,
    pub optimized: Snapshot,
    /// Engine time accumulated over the full transformation sequence.
    pub time_total_secs: f64,
    pub outcome: VerificationOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemInfo>,
}

impl RunRecord {
    pub fn pipeline_time(&self) -> Duration {
        Duration::from_secs_f64(self.time_total_secs)
    }
}

/// Output of a full suite run.
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub table: ResultsTable,
    pub records: Vec<RunRecord>,
}

/// Execute one (benchmark, representation) iteration.
pub fn run_benchmark<E: SynthesisEngine>(
    store: &mut NetworkStore<E>,
    checker: &dyn EquivalenceCheck,
    benchmark: &Benchmark,
    repr: ReprType,
    paths: &RunPaths,
    steps: &[TransformStep],
    verify: bool,
) -> BenchResult<RunRecord> {
    info!("run {} with {}", benchmark.name, repr);
    let source = paths.source(&benchmark.name);

    store.clear_all()?;
    store.load(repr, &source)?;
    let baseline = stats::snapshot(store, repr)?;

    // The baseline snapshot's mapping pass altered the network; start the
    // pipeline from a fresh copy.
    store.clear_all()?;
    store.load(repr, &source)?;
    let run = pipeline::run(store, repr, steps)?;
    let optimized = stats::snapshot(store, repr)?;

    let destination = paths.result(&benchmark.name, repr);
    store.save(repr, &destination)?;

    let outcome = if verify && benchmark.verify {
        checker.check(&source, &destination)?
    } else {
        VerificationOutcome::NotChecked
    };
    if outcome == VerificationOutcome::Failed {
        warn!(
            "equivalence check failed for {} ({}): {} vs {}",
            benchmark.name,
            repr,
            source.display(),
            destination.display()
        );
    }

    let source_sha256 = std::fs::read(&source).ok().map(|bytes| crate::sha256_hex(&bytes));

    Ok(RunRecord {
        timestamp: now_string(),
        benchmark: benchmark.name.clone(),
        representation: repr,
        baseline,
        optimized,
        time_total_secs: run.total.as_secs_f64(),
        outcome,
        source_sha256,
        engine_version: store.engine().version(),
        system: None,
    })
}

/// Run the full (benchmark × representation) matrix sequentially.
///
/// A benchmark whose description cannot be read aborts the whole run; there
/// is no recovery path for a missing source. Verification failures and
/// ineligible steps do not abort.
pub fn run_suite<E: SynthesisEngine>(
    engine: E,
    checker: &dyn EquivalenceCheck,
    suite: &[Benchmark],
    reprs: &[ReprType],
    paths: &RunPaths,
    steps: &[TransformStep],
    verify: bool,
) -> BenchResult<SuiteOutcome> {
    let system = crate::collect_system_info();
    let mut store = NetworkStore::new(engine);
    let mut table = ResultsTable::new();
    let mut records = Vec::with_capacity(suite.len() * reprs.len());

    for benchmark in suite {
        for &repr in reprs {
            let mut record =
                run_benchmark(&mut store, checker, benchmark, repr, paths, steps, verify)?;
            record.system = Some(system.clone());
            table.record(
                &record.benchmark,
                repr,
                &record.baseline,
                &record.optimized,
                record.pipeline_time(),
            );
            records.push(record);
        }
    }

    Ok(SuiteOutcome { table, records })
}
