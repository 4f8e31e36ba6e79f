//! Results table.
//!
//! One row per benchmark: baseline columns (inputs, outputs, gates, depth,
//! luts) followed by, for each representation in `ReprType::ALL` order,
//! optimized gates, depth, luts and pipeline time. Fields are joined with
//! ` & ` and rows end with ` \\`, so the output drops straight into a
//! typeset table.
//!
//! The baseline cells for a benchmark are written exactly once, on the first
//! representation processed. Primary input and output counts are
//! representation-independent, so later representations reuse the stored
//! baseline verbatim instead of recomputing it.

use std::time::Duration;

use crate::repr::ReprType;
use crate::stats::Snapshot;

#[derive(Debug, Clone, Copy)]
struct OptimizedCells {
    gates: u64,
    depth: u64,
    luts: u64,
    elapsed: Duration,
}

#[derive(Debug, Clone)]
struct BenchmarkRow {
    name: String,
    baseline: Snapshot,
    optimized: [Option<OptimizedCells>; ReprType::ALL.len()],
}

/// Accumulates per-run metrics and renders the final comparison table.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    rows: Vec<BenchmarkRow>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one (benchmark, representation) run.
    ///
    /// The first call for a benchmark fixes its baseline cells; subsequent
    /// calls only contribute the optimized cells for their representation.
    pub fn record(
        &mut self,
        benchmark: &str,
        repr: ReprType,
        baseline: &Snapshot,
        optimized: &Snapshot,
        pipeline_time: Duration,
    ) {
        let row = match self.rows.iter_mut().find(|r| r.name == benchmark) {
            Some(row) => row,
            None => {
                self.rows.push(BenchmarkRow {
                    name: benchmark.to_string(),
                    baseline: *baseline,
                    optimized: [None; ReprType::ALL.len()],
                });
                self.rows.last_mut().unwrap()
            }
        };
        row.optimized[repr.index()] = Some(OptimizedCells {
            gates: optimized.gates,
            depth: optimized.depth,
            luts: optimized.luts,
            elapsed: pipeline_time,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one line per benchmark in recording order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let b = &row.baseline;
            out.push_str(&format!(
                "{} & {:>4} & {:>4} & {:>4} & {:>4} & {:>4}",
                row.name, b.inputs, b.outputs, b.gates, b.depth, b.luts
            ));
            for repr in ReprType::ALL {
                if let Some(o) = row.optimized[repr.index()] {
                    out.push_str(&format!(
                        " & {:>5} & {:>5} & {:>5} & {:>8.2}s",
                        o.gates,
                        o.depth,
                        o.luts,
                        o.elapsed.as_secs_f64()
                    ));
                }
            }
            out.push_str(" \\\\\n");
        }
        out
    }
}
