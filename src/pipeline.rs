//! Transformation pipeline.
//!
//! A pipeline is a fixed, ordered list of transformation steps executed as a
//! straight-line fold over the loaded network. Order is significant: later
//! steps assume the network state left by earlier ones. The only conditional
//! behavior is per-step representation eligibility — an ineligible step
//! degrades to a zero-cost no-op, it never fails the run.
//!
//! Eligibility per operation family:
//! - area-aware restructuring: mig only
//! - refactoring (plain and zero-gain): mig only
//! - cut rewriting (plain and zero-gain): all four types, routed per type
//! - resubstitution: all four types; for mig, depth is clamped to 1 whenever
//!   the cut size exceeds 8

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::BenchResult;
use crate::engine::SynthesisEngine;
use crate::repr::ReprType;
use crate::store::NetworkStore;

/// LUT size used by every cut-rewriting step of the recipe.
pub const REWRITE_LUT_SIZE: u32 = 4;

/// Operation selector plus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Area-aware global restructuring.
    Restructure,
    /// Resubstitution within a bounded window.
    Resub { cut_size: u32, depth: u32, zero_gain: bool },
    /// Cut-based rewriting.
    Rewrite { zero_gain: bool },
    /// Local logic-cone refactoring.
    Refactor { zero_gain: bool },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Restructure => write!(f, "restructure"),
            Op::Resub { cut_size, depth, zero_gain } => {
                write!(f, "resub(cut_size={cut_size}, depth={depth})")?;
                if *zero_gain {
                    write!(f, "[zero-gain]")?;
                }
                Ok(())
            }
            Op::Rewrite { zero_gain } => {
                write!(f, "rewrite")?;
                if *zero_gain {
                    write!(f, "[zero-gain]")?;
                }
                Ok(())
            }
            Op::Refactor { zero_gain } => {
                write!(f, "refactor")?;
                if *zero_gain {
                    write!(f, "[zero-gain]")?;
                }
                Ok(())
            }
        }
    }
}

/// One entry of a transformation sequence: an operation and an optional
/// cut-size override applied before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformStep {
    pub op: Op,
    pub cut_override: Option<u32>,
}

impl TransformStep {
    pub fn new(op: Op) -> Self {
        TransformStep { op, cut_override: None }
    }

    pub fn with_cut_override(mut self, cut_size: u32) -> Self {
        self.cut_override = Some(cut_size);
        self
    }
}

/// Whether a step ran or degraded to a no-op for the active representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    Skipped,
}

/// Per-step timing, kept for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub op: Op,
    pub status: StepStatus,
    pub elapsed: Duration,
}

/// Result of one traversal of a transformation sequence.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Engine time accumulated across all steps.
    pub total: Duration,
    pub steps: Vec<StepOutcome>,
}

/// The published optimization recipe, run identically for every benchmark
/// and representation.
pub fn compress2rs() -> Vec<TransformStep> {
    use Op::*;
    let rs = |cut_size, depth| TransformStep::new(Resub { cut_size, depth, zero_gain: false });
    let rw = TransformStep::new(Rewrite { zero_gain: false });
    let rwz = TransformStep::new(Rewrite { zero_gain: true });
    let rf = TransformStep::new(Refactor { zero_gain: false });
    let rfz = TransformStep::new(Refactor { zero_gain: true });
    let bz = TransformStep::new(Restructure);

    vec![
        bz,
        rs(6, 1),
        rw,
        rs(6, 2),
        rf,
        rs(8, 1).with_cut_override(8),
        bz,
        rs(8, 2),
        rw,
        rs(10, 1),
        rwz,
        rs(10, 2),
        bz,
        rs(12, 1),
        rfz,
        rs(12, 2),
        rwz,
        bz,
    ]
}

/// Effective resubstitution depth for `repr`.
///
/// The majority-inverter engine is unstable for windows combining a cut size
/// above 8 with depth above 1; the depth is pinned to 1 there. The thresholds
/// are empirical constants, not a general rule.
pub fn effective_resub_depth(repr: ReprType, cut_size: u32, depth: u32) -> u32 {
    if repr == ReprType::Mig && cut_size > 8 && depth > 1 { 1 } else { depth }
}

/// Execute `steps` in order against the network loaded under `repr`,
/// accumulating the engine-reported time of each step.
pub fn run<E: SynthesisEngine>(
    store: &mut NetworkStore<E>,
    repr: ReprType,
    steps: &[TransformStep],
) -> BenchResult<PipelineRunResult> {
    let mut total = Duration::ZERO;
    let mut outcomes = Vec::with_capacity(steps.len());

    for step in steps {
        let outcome = apply_step(store, repr, step)?;
        debug!(
            op = %outcome.op,
            status = ?outcome.status,
            elapsed_s = outcome.elapsed.as_secs_f64(),
            "pipeline step"
        );
        total += outcome.elapsed;
        outcomes.push(outcome);
    }

    Ok(PipelineRunResult { total, steps: outcomes })
}

fn apply_step<E: SynthesisEngine>(
    store: &mut NetworkStore<E>,
    repr: ReprType,
    step: &TransformStep,
) -> BenchResult<StepOutcome> {
    let applied = |op, elapsed| StepOutcome { op, status: StepStatus::Applied, elapsed };
    let skipped = |op| {
        debug!(op = %op, %repr, "step not applicable, skipping");
        StepOutcome { op, status: StepStatus::Skipped, elapsed: Duration::ZERO }
    };

    match step.op {
        Op::Restructure => match repr {
            ReprType::Mig => {
                let report = store.with_network(repr, |engine| engine.area_restructure())?;
                Ok(applied(step.op, report.runtime))
            }
            ReprType::Aig | ReprType::Xag | ReprType::Xmg => Ok(skipped(step.op)),
        },
        Op::Refactor { zero_gain } => match repr {
            ReprType::Mig => {
                let report = store.with_network(repr, |engine| engine.refactor(zero_gain))?;
                Ok(applied(step.op, report.runtime))
            }
            ReprType::Aig | ReprType::Xag | ReprType::Xmg => Ok(skipped(step.op)),
        },
        Op::Rewrite { zero_gain } => {
            let report = store.with_network(repr, |engine| {
                engine.cut_rewrite(repr, REWRITE_LUT_SIZE, zero_gain)
            })?;
            Ok(applied(step.op, report.runtime))
        }
        Op::Resub { cut_size, depth, zero_gain } => {
            let cut_size = step.cut_override.unwrap_or(cut_size);
            let depth = effective_resub_depth(repr, cut_size, depth);
            let report = store.with_network(repr, |engine| {
                engine.resubstitute(cut_size, depth, zero_gain)
            })?;
            Ok(applied(step.op, report.runtime))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineCall, MockEngine};

    fn loaded_store(
        repr: ReprType,
        engine: MockEngine,
    ) -> (NetworkStore<MockEngine>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("net.aig");
        std::fs::write(&source, b"aig").unwrap();
        let mut store = NetworkStore::new(engine);
        store.load(repr, &source).unwrap();
        (store, dir)
    }

    #[test]
    fn test_restructure_and_refactor_are_mig_only() {
        for repr in [ReprType::Aig, ReprType::Xag, ReprType::Xmg] {
            let (mut store, _) = loaded_store(repr, MockEngine::new());
            let steps = [
                TransformStep::new(Op::Restructure),
                TransformStep::new(Op::Refactor { zero_gain: false }),
                TransformStep::new(Op::Refactor { zero_gain: true }),
            ];
            let result = run(&mut store, repr, &steps).unwrap();
            assert_eq!(result.total, Duration::ZERO);
            assert!(result.steps.iter().all(|s| s.status == StepStatus::Skipped));
            assert!(!store.engine().calls.contains(&EngineCall::AreaRestructure));
            assert!(
                !store
                    .engine()
                    .calls
                    .iter()
                    .any(|c| matches!(c, EngineCall::Refactor { .. }))
            );
        }
    }

    #[test]
    fn test_restructure_and_refactor_apply_for_mig() {
        let (mut store, _) = loaded_store(ReprType::Mig, MockEngine::new());
        let steps = [
            TransformStep::new(Op::Restructure),
            TransformStep::new(Op::Refactor { zero_gain: true }),
        ];
        let result = run(&mut store, ReprType::Mig, &steps).unwrap();
        assert!(result.steps.iter().all(|s| s.status == StepStatus::Applied));
        assert!(store.engine().calls.contains(&EngineCall::AreaRestructure));
        assert!(store.engine().calls.contains(&EngineCall::Refactor { zero_gain: true }));
    }

    #[test]
    fn test_rewrite_routes_to_every_representation() {
        for repr in ReprType::ALL {
            let (mut store, _) = loaded_store(repr, MockEngine::new());
            let steps = [TransformStep::new(Op::Rewrite { zero_gain: false })];
            let result = run(&mut store, repr, &steps).unwrap();
            assert_eq!(result.steps[0].status, StepStatus::Applied);
            assert!(store.engine().calls.contains(&EngineCall::CutRewrite {
                repr,
                lut_size: REWRITE_LUT_SIZE,
                zero_gain: false,
            }));
        }
    }

    #[test]
    fn test_resub_depth_clamp() {
        // Clamped: mig, cut size above 8, depth above 1.
        assert_eq!(effective_resub_depth(ReprType::Mig, 10, 2), 1);
        assert_eq!(effective_resub_depth(ReprType::Mig, 12, 3), 1);
        // Unclamped: at or below the cut-size threshold, or depth 1, or any
        // other representation.
        assert_eq!(effective_resub_depth(ReprType::Mig, 8, 2), 2);
        assert_eq!(effective_resub_depth(ReprType::Mig, 10, 1), 1);
        assert_eq!(effective_resub_depth(ReprType::Aig, 10, 2), 2);
        assert_eq!(effective_resub_depth(ReprType::Xmg, 12, 2), 2);
    }

    #[test]
    fn test_resub_clamp_reaches_the_engine() {
        let (mut store, _) = loaded_store(ReprType::Mig, MockEngine::new());
        let steps =
            [TransformStep::new(Op::Resub { cut_size: 10, depth: 2, zero_gain: false })];
        run(&mut store, ReprType::Mig, &steps).unwrap();
        assert!(store.engine().calls.contains(&EngineCall::Resub {
            max_pis: 10,
            depth: 1,
            zero_gain: false,
        }));

        let (mut store, _) = loaded_store(ReprType::Aig, MockEngine::new());
        run(&mut store, ReprType::Aig, &steps).unwrap();
        assert!(store.engine().calls.contains(&EngineCall::Resub {
            max_pis: 10,
            depth: 2,
            zero_gain: false,
        }));
    }

    #[test]
    fn test_cut_override_replaces_cut_size() {
        let (mut store, _) = loaded_store(ReprType::Xag, MockEngine::new());
        let steps = [
            TransformStep::new(Op::Resub { cut_size: 6, depth: 1, zero_gain: false })
                .with_cut_override(8),
        ];
        run(&mut store, ReprType::Xag, &steps).unwrap();
        assert!(store.engine().calls.contains(&EngineCall::Resub {
            max_pis: 8,
            depth: 1,
            zero_gain: false,
        }));
    }

    #[test]
    fn test_total_is_sum_of_step_times() {
        let engine = MockEngine::new().with_op_runtime(Duration::from_millis(100));
        let (mut store, _) = loaded_store(ReprType::Mig, engine);
        let result = run(&mut store, ReprType::Mig, &compress2rs()).unwrap();

        let sum: Duration = result.steps.iter().map(|s| s.elapsed).sum();
        assert_eq!(result.total, sum);
        // Every compress2rs step applies for mig.
        assert_eq!(result.total, Duration::from_millis(100) * 18);
    }

    #[test]
    fn test_all_noop_sequence_totals_zero() {
        let engine = MockEngine::new().with_op_runtime(Duration::from_millis(100));
        let (mut store, _) = loaded_store(ReprType::Aig, engine);
        let steps = [
            TransformStep::new(Op::Restructure),
            TransformStep::new(Op::Refactor { zero_gain: false }),
            TransformStep::new(Op::Refactor { zero_gain: true }),
        ];
        let result = run(&mut store, ReprType::Aig, &steps).unwrap();
        assert_eq!(result.total, Duration::ZERO);
    }

    #[test]
    fn test_compress2rs_shape() {
        let steps = compress2rs();
        assert_eq!(steps.len(), 18);
        assert_eq!(steps[0].op, Op::Restructure);
        assert_eq!(steps[17].op, Op::Restructure);
        // The single override entry.
        let overridden: Vec<_> = steps.iter().filter(|s| s.cut_override.is_some()).collect();
        assert_eq!(overridden.len(), 1);
        assert_eq!(overridden[0].cut_override, Some(8));
        // Zero-gain rewriting appears twice, zero-gain refactoring once.
        let rwz = steps.iter().filter(|s| s.op == Op::Rewrite { zero_gain: true }).count();
        let rfz = steps.iter().filter(|s| s.op == Op::Refactor { zero_gain: true }).count();
        assert_eq!(rwz, 2);
        assert_eq!(rfz, 1);
    }

    #[test]
    fn test_steps_execute_in_published_order() {
        let (mut store, _) = loaded_store(ReprType::Mig, MockEngine::new());
        let steps = [
            TransformStep::new(Op::Restructure),
            TransformStep::new(Op::Resub { cut_size: 6, depth: 1, zero_gain: false }),
            TransformStep::new(Op::Rewrite { zero_gain: false }),
        ];
        run(&mut store, ReprType::Mig, &steps).unwrap();
        let calls = &store.engine().calls;
        let restructure_at =
            calls.iter().position(|c| *c == EngineCall::AreaRestructure).unwrap();
        let resub_at = calls
            .iter()
            .position(|c| matches!(c, EngineCall::Resub { .. }))
            .unwrap();
        let rewrite_at = calls
            .iter()
            .position(|c| matches!(c, EngineCall::CutRewrite { .. }))
            .unwrap();
        assert!(restructure_at < resub_at);
        assert!(resub_at < rewrite_at);
    }
}
