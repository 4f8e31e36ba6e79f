//! CSV export for run records.

use std::io::Write;
use std::path::Path;

use crate::BenchError;
use crate::runner::RunRecord;

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[
    "timestamp",
    "benchmark",
    "representation",
    "baseline_inputs",
    "baseline_outputs",
    "baseline_gates",
    "baseline_depth",
    "baseline_luts",
    "opt_gates",
    "opt_depth",
    "opt_luts",
    "time_total_secs",
    "outcome",
    "source_sha256",
    "engine_version",
];

/// CSV exporter for run records.
///
/// Flat column structure with deterministic order for easy comparison and
/// analysis.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CsvExporter.
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export records to a CSV file.
    pub fn export(&self, records: &[RunRecord], output: &Path) -> Result<(), BenchError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| BenchError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| BenchError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(records, file)
    }

    /// Export records to any writer implementing Write.
    pub fn export_to_writer<W: Write>(
        &self,
        records: &[RunRecord],
        writer: W,
    ) -> Result<(), BenchError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| BenchError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            let row = self.record_to_row(record);
            csv_writer
                .write_record(&row)
                .map_err(|e| BenchError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| BenchError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    /// Convert a RunRecord to a row of CSV values.
    fn record_to_row(&self, record: &RunRecord) -> Vec<String> {
        vec![
            record.timestamp.clone(),
            record.benchmark.clone(),
            record.representation.to_string(),
            record.baseline.inputs.to_string(),
            record.baseline.outputs.to_string(),
            record.baseline.gates.to_string(),
            record.baseline.depth.to_string(),
            record.baseline.luts.to_string(),
            record.optimized.gates.to_string(),
            record.optimized.depth.to_string(),
            record.optimized.luts.to_string(),
            format!("{:.3}", record.time_total_secs),
            record.outcome.to_string(),
            record.source_sha256.clone().unwrap_or_default(),
            record.engine_version.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::ReprType;
    use crate::stats::Snapshot;
    use crate::verify::VerificationOutcome;

    fn make_test_record() -> RunRecord {
        RunRecord {
            timestamp: "2026-08-05T12:00:00Z".to_string(),
            benchmark: "adder".to_string(),
            representation: ReprType::Xmg,
            baseline: Snapshot { inputs: 10, outputs: 6, gates: 100, depth: 8, luts: 30 },
            optimized: Snapshot { inputs: 10, outputs: 6, gates: 85, depth: 7, luts: 25 },
            time_total_secs: 1.5,
            outcome: VerificationOutcome::NotChecked,
            source_sha256: Some("abc123".to_string()),
            engine_version: None,
            system: None,
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let mut buf = Vec::new();
        CsvExporter::new().export_to_writer(&[make_test_record()], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("timestamp,benchmark,representation"));
        assert!(lines[1].contains("adder,xmg,10,6,100,8,30,85,7,25,1.500,not-checked"));
    }

    #[test]
    fn test_header_count_matches_row_width() {
        let row = CsvExporter::new().record_to_row(&make_test_record());
        assert_eq!(row.len(), CSV_HEADERS.len());
    }
}
