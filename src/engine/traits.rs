//! Engine trait and output types for the external synthesis engine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BenchResult;
use crate::repr::ReprType;

/// Structural statistics reported by the engine for one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Primary input count
    pub inputs: u64,
    /// Primary output count
    pub outputs: u64,
    /// Gate count
    pub gates: u64,
    /// Logic depth
    pub depth: u64,
}

/// Result of one mutating engine operation.
///
/// The runtime is the engine's own measurement of the operation, not wall
/// time spent in this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpReport {
    pub runtime: Duration,
}

impl OpReport {
    pub fn new(runtime: Duration) -> Self {
        OpReport { runtime }
    }
}

/// Contract consumed from the external logic-synthesis engine.
///
/// The engine owns all network state; every operation addresses it through a
/// representation handle. Implementations are not required to survive
/// concurrent use — callers serialize access per representation.
pub trait SynthesisEngine {
    /// Returns the engine name (e.g., "cirkit", "mock").
    fn name(&self) -> &str;

    /// Returns the engine version, if available.
    fn version(&self) -> Option<String>;

    /// Load a circuit description into the store entry for `repr`.
    fn read_network(&mut self, repr: ReprType, source: &Path) -> BenchResult<()>;

    /// Discard all loaded network state, every representation plus the
    /// mapped-network store.
    fn clear_store(&mut self) -> BenchResult<()>;

    /// Query structural statistics for the network loaded under `repr`.
    fn network_stats(&mut self, repr: ReprType) -> BenchResult<NetworkStats>;

    /// Query statistics of the collapsed LUT network produced by the most
    /// recent `lut_map` + `collapse_mapping` pair. Its gate count is the LUT
    /// count of the mapped network.
    fn mapped_stats(&mut self) -> BenchResult<NetworkStats>;

    /// Cover the network under `repr` with LUT-sized cells. Mutates the
    /// network's internal representation.
    fn lut_map(&mut self, repr: ReprType) -> BenchResult<OpReport>;

    /// Flatten the current mapping into a directly countable network.
    fn collapse_mapping(&mut self, repr: ReprType) -> BenchResult<OpReport>;

    /// Area-aware global restructuring. Only meaningful for the
    /// majority-inverter representation; callers gate eligibility.
    fn area_restructure(&mut self) -> BenchResult<OpReport>;

    /// Resubstitution over a bounded window.
    fn resubstitute(&mut self, max_pis: u32, depth: u32, zero_gain: bool) -> BenchResult<OpReport>;

    /// Cut-based rewriting routed to the type-specific operation for `repr`.
    fn cut_rewrite(&mut self, repr: ReprType, lut_size: u32, zero_gain: bool)
    -> BenchResult<OpReport>;

    /// Local logic-cone refactoring. Only meaningful for the
    /// majority-inverter representation; callers gate eligibility.
    fn refactor(&mut self, zero_gain: bool) -> BenchResult<OpReport>;

    /// Serialize the network loaded under `repr` to a circuit description.
    fn write_network(&mut self, repr: ReprType, destination: &Path) -> BenchResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_report_default_is_zero() {
        let report = OpReport::default();
        assert_eq!(report.runtime, Duration::ZERO);
    }

    #[test]
    fn test_network_stats_serde_round_trip() {
        let stats = NetworkStats { inputs: 10, outputs: 6, gates: 100, depth: 8 };
        let json = serde_json::to_string(&stats).unwrap();
        let back: NetworkStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
