//! Quality snapshots.
//!
//! A snapshot combines the structural statistics of the loaded network with
//! the gate count of its collapsed LUT cover. The mapping pass mutates the
//! network as a side effect of measurement, so a network that has been
//! snapshotted must be cleared and reloaded before optimization — the store
//! API makes a silent reload impossible.

use serde::{Deserialize, Serialize};

use crate::BenchResult;
use crate::engine::SynthesisEngine;
use crate::repr::ReprType;
use crate::store::NetworkStore;

/// Circuit-quality metrics for one network at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub inputs: u64,
    pub outputs: u64,
    pub gates: u64,
    pub depth: u64,
    pub luts: u64,
}

/// Take a quality snapshot of the network loaded under `repr`.
///
/// Structural statistics are queried first; the LUT mapping and collapse run
/// afterwards so they cannot skew the gate and depth figures.
pub fn snapshot<E: SynthesisEngine>(
    store: &mut NetworkStore<E>,
    repr: ReprType,
) -> BenchResult<Snapshot> {
    store.with_network(repr, |engine| {
        let network = engine.network_stats(repr)?;
        engine.lut_map(repr)?;
        engine.collapse_mapping(repr)?;
        let mapped = engine.mapped_stats()?;
        Ok(Snapshot {
            inputs: network.inputs,
            outputs: network.outputs,
            gates: network.gates,
            depth: network.depth,
            luts: mapped.gates,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineCall, MockEngine, NetworkStats};

    #[test]
    fn test_snapshot_combines_network_and_mapped_stats() {
        let engine = MockEngine::new()
            .with_network_stats(vec![NetworkStats { inputs: 10, outputs: 6, gates: 100, depth: 8 }])
            .with_mapped_stats(vec![NetworkStats { inputs: 10, outputs: 6, gates: 27, depth: 3 }]);
        let mut store = NetworkStore::new(engine);
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("adder.aig");
        std::fs::write(&source, b"aig").unwrap();
        store.load(ReprType::Aig, &source).unwrap();

        let snap = snapshot(&mut store, ReprType::Aig).unwrap();
        assert_eq!(
            snap,
            Snapshot { inputs: 10, outputs: 6, gates: 100, depth: 8, luts: 27 }
        );
    }

    #[test]
    fn test_snapshot_queries_structure_before_mapping() {
        let mut store = NetworkStore::new(MockEngine::new());
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bar.aig");
        std::fs::write(&source, b"aig").unwrap();
        store.load(ReprType::Mig, &source).unwrap();

        snapshot(&mut store, ReprType::Mig).unwrap();

        let calls = &store.engine().calls;
        let stats_at = calls.iter().position(|c| *c == EngineCall::NetworkStats(ReprType::Mig));
        let map_at = calls.iter().position(|c| *c == EngineCall::LutMap(ReprType::Mig));
        let collapse_at =
            calls.iter().position(|c| *c == EngineCall::CollapseMapping(ReprType::Mig));
        let mapped_at = calls.iter().position(|c| *c == EngineCall::MappedStats);
        assert!(stats_at < map_at);
        assert!(map_at < collapse_at);
        assert!(collapse_at < mapped_at);
    }

    #[test]
    fn test_snapshot_without_loaded_network_fails() {
        let mut store = NetworkStore::new(MockEngine::new());
        assert!(snapshot(&mut store, ReprType::Xmg).is_err());
    }
}
