//! The `table` subcommand: re-render the comparison table from stored
//! records without re-running the suite.

use std::path::PathBuf;

use crate::report::ResultsTable;
use crate::storage::JsonlWriter;
use crate::{BenchError, BenchResult};

pub fn run(jsonl: PathBuf) -> BenchResult<()> {
    let records = JsonlWriter::new(&jsonl).read_all()?;
    if records.is_empty() {
        return Err(BenchError::Message(format!("no records in {}", jsonl.display())));
    }

    let mut table = ResultsTable::new();
    for record in &records {
        table.record(
            &record.benchmark,
            record.representation,
            &record.baseline,
            &record.optimized,
            record.pipeline_time(),
        );
    }

    print!("{}", table.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::ReprType;
    use crate::runner::RunRecord;
    use crate::stats::Snapshot;
    use crate::verify::VerificationOutcome;

    #[test]
    fn test_table_from_stored_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let writer = JsonlWriter::new(&path);
        writer
            .append(&RunRecord {
                timestamp: "2026-08-05T12:00:00Z".to_string(),
                benchmark: "adder".to_string(),
                representation: ReprType::Aig,
                baseline: Snapshot { inputs: 10, outputs: 6, gates: 100, depth: 8, luts: 30 },
                optimized: Snapshot { inputs: 10, outputs: 6, gates: 85, depth: 7, luts: 25 },
                time_total_secs: 1.5,
                outcome: VerificationOutcome::Verified,
                source_sha256: None,
                engine_version: None,
                system: None,
            })
            .unwrap();

        // Rendering itself is covered in report.rs; here we only need the
        // records to load and group.
        assert!(run(path).is_ok());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        std::fs::write(&path, "").unwrap();
        assert!(run(path).is_err());
    }
}
