//! Combinational equivalence checking.
//!
//! The check is delegated to an external tool (`abc cec`) whose report is
//! free-form text. All knowledge of that format lives in
//! `classify_equivalence_report`: the third line of the report must begin
//! with the literal text "Networks are equivalent". Anything else — a
//! shorter report, a different prefix, no report at all — is a failure;
//! a malformed report is indistinguishable from a genuine inequivalence and
//! must never be reported as a pass.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::{BenchError, BenchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationOutcome {
    Verified,
    Failed,
    NotChecked,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationOutcome::Verified => "verified",
            VerificationOutcome::Failed => "failed",
            VerificationOutcome::NotChecked => "not-checked",
        };
        f.write_str(s)
    }
}

/// Classify the textual report of the equivalence checker.
pub fn classify_equivalence_report(report: &str) -> VerificationOutcome {
    match report.lines().nth(2) {
        Some(line) if line.starts_with("Networks are equivalent") => {
            VerificationOutcome::Verified
        }
        _ => VerificationOutcome::Failed,
    }
}

/// Equivalence check between an original and an optimized circuit
/// description.
pub trait EquivalenceCheck {
    fn check(&self, original: &Path, optimized: &Path) -> BenchResult<VerificationOutcome>;
}

/// Checker backed by the `abc` binary.
#[derive(Debug, Clone)]
pub struct AbcChecker {
    abc_path: PathBuf,
}

impl Default for AbcChecker {
    fn default() -> Self {
        AbcChecker { abc_path: PathBuf::from("abc") }
    }
}

impl AbcChecker {
    pub fn new(abc_path: impl Into<PathBuf>) -> Self {
        AbcChecker { abc_path: abc_path.into() }
    }
}

impl EquivalenceCheck for AbcChecker {
    fn check(&self, original: &Path, optimized: &Path) -> BenchResult<VerificationOutcome> {
        let output = Command::new(&self.abc_path)
            .arg("-c")
            .arg(format!("cec {} {}", original.display(), optimized.display()))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BenchError::Message(format!("failed to run abc cec: {e}")))?;

        // The exit status carries no signal here; the report text is the
        // whole contract.
        let report = String::from_utf8_lossy(&output.stdout);
        Ok(classify_equivalence_report(&report))
    }
}

/// Mock checker for testing. Counts invocations.
pub struct MockChecker {
    outcome: VerificationOutcome,
    calls: std::cell::Cell<usize>,
}

impl MockChecker {
    pub fn new(outcome: VerificationOutcome) -> Self {
        MockChecker { outcome, calls: std::cell::Cell::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl EquivalenceCheck for MockChecker {
    fn check(&self, _original: &Path, _optimized: &Path) -> BenchResult<VerificationOutcome> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.outcome)
    }
}
