//! Mock engine for testing.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::BenchResult;
use crate::repr::ReprType;

use super::traits::{NetworkStats, OpReport, SynthesisEngine};

/// One recorded engine invocation, with the parameters as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Read(ReprType, PathBuf),
    Clear,
    NetworkStats(ReprType),
    MappedStats,
    LutMap(ReprType),
    CollapseMapping(ReprType),
    AreaRestructure,
    Resub { max_pis: u32, depth: u32, zero_gain: bool },
    CutRewrite { repr: ReprType, lut_size: u32, zero_gain: bool },
    Refactor { zero_gain: bool },
    Write(ReprType, PathBuf),
}

/// Mock engine that records every call and replays scripted statistics.
///
/// `network_stats` and `mapped_stats` pop from their queues in call order
/// and fall back to a fixed default once the queue is exhausted.
pub struct MockEngine {
    pub calls: Vec<EngineCall>,
    op_runtime: Duration,
    network_stats: VecDeque<NetworkStats>,
    mapped_stats: VecDeque<NetworkStats>,
    fail_reads: bool,
}

pub const DEFAULT_NETWORK_STATS: NetworkStats =
    NetworkStats { inputs: 10, outputs: 6, gates: 100, depth: 8 };
pub const DEFAULT_MAPPED_STATS: NetworkStats =
    NetworkStats { inputs: 10, outputs: 6, gates: 30, depth: 3 };

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    pub fn new() -> Self {
        MockEngine {
            calls: Vec::new(),
            op_runtime: Duration::from_millis(250),
            network_stats: VecDeque::new(),
            mapped_stats: VecDeque::new(),
            fail_reads: false,
        }
    }

    /// Set the runtime reported by every transformation and mapping op.
    pub fn with_op_runtime(mut self, runtime: Duration) -> Self {
        self.op_runtime = runtime;
        self
    }

    /// Queue responses for `network_stats`, returned in call order.
    pub fn with_network_stats(mut self, stats: Vec<NetworkStats>) -> Self {
        self.network_stats = stats.into();
        self
    }

    /// Queue responses for `mapped_stats`, returned in call order.
    pub fn with_mapped_stats(mut self, stats: Vec<NetworkStats>) -> Self {
        self.mapped_stats = stats.into();
        self
    }

    /// Make `read_network` fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    fn report(&self) -> OpReport {
        OpReport::new(self.op_runtime)
    }
}

impl SynthesisEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn version(&self) -> Option<String> {
        Some("mock-1.0.0".to_string())
    }

    fn read_network(&mut self, repr: ReprType, source: &Path) -> BenchResult<()> {
        if self.fail_reads {
            return Err(crate::BenchError::Engine("mock read failed".into()));
        }
        self.calls.push(EngineCall::Read(repr, source.to_path_buf()));
        Ok(())
    }

    fn clear_store(&mut self) -> BenchResult<()> {
        self.calls.push(EngineCall::Clear);
        Ok(())
    }

    fn network_stats(&mut self, repr: ReprType) -> BenchResult<NetworkStats> {
        self.calls.push(EngineCall::NetworkStats(repr));
        Ok(self.network_stats.pop_front().unwrap_or(DEFAULT_NETWORK_STATS))
    }

    fn mapped_stats(&mut self) -> BenchResult<NetworkStats> {
        self.calls.push(EngineCall::MappedStats);
        Ok(self.mapped_stats.pop_front().unwrap_or(DEFAULT_MAPPED_STATS))
    }

    fn lut_map(&mut self, repr: ReprType) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::LutMap(repr));
        Ok(self.report())
    }

    fn collapse_mapping(&mut self, repr: ReprType) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::CollapseMapping(repr));
        Ok(self.report())
    }

    fn area_restructure(&mut self) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::AreaRestructure);
        Ok(self.report())
    }

    fn resubstitute(&mut self, max_pis: u32, depth: u32, zero_gain: bool) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::Resub { max_pis, depth, zero_gain });
        Ok(self.report())
    }

    fn cut_rewrite(
        &mut self,
        repr: ReprType,
        lut_size: u32,
        zero_gain: bool,
    ) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::CutRewrite { repr, lut_size, zero_gain });
        Ok(self.report())
    }

    fn refactor(&mut self, zero_gain: bool) -> BenchResult<OpReport> {
        self.calls.push(EngineCall::Refactor { zero_gain });
        Ok(self.report())
    }

    fn write_network(&mut self, repr: ReprType, destination: &Path) -> BenchResult<()> {
        self.calls.push(EngineCall::Write(repr, destination.to_path_buf()));
        Ok(())
    }
}
