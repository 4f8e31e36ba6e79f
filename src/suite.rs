//! Benchmark suite definition.
//!
//! The built-in suite is the EPFL combinational benchmark set. A TOML file
//! with `[[benchmark]]` entries can replace it; `verify` defaults to true
//! per entry.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::repr::ReprType;
use crate::{BenchError, BenchResult};

#[derive(Debug, Clone)]
pub struct Benchmark {
    pub name: String,
    /// Whether the optimized result must pass equivalence checking.
    pub verify: bool,
}

impl Benchmark {
    pub fn new(name: impl Into<String>) -> Self {
        Benchmark { name: name.into(), verify: true }
    }

    pub fn unverified(name: impl Into<String>) -> Self {
        Benchmark { name: name.into(), verify: false }
    }
}

/// The default suite. `hyp` is too large for the equivalence checker and is
/// never verified.
pub fn default_suite() -> Vec<Benchmark> {
    let verified = [
        "adder", "arbiter", "bar", "cavlc", "ctrl", "dec", "div", "i2c", "int2float", "log2",
        "max", "mem_ctrl", "multiplier", "priority", "router", "sin", "sqrt", "square", "voter",
    ];
    let mut suite: Vec<Benchmark> = verified.into_iter().map(Benchmark::new).collect();
    suite.push(Benchmark::unverified("hyp"));
    suite
}

#[derive(Debug, Deserialize)]
struct RawBenchmark {
    name: String,
    #[serde(default = "default_verify")]
    verify: bool,
}

fn default_verify() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SuiteConfig {
    #[serde(rename = "benchmark")]
    benchmarks: Vec<RawBenchmark>,
}

pub fn load_suite(path: &Path) -> BenchResult<Vec<Benchmark>> {
    let s = std::fs::read_to_string(path).map_err(|e| BenchError::Message(e.to_string()))?;
    let cfg: SuiteConfig = toml::from_str(&s).map_err(|e| BenchError::Message(e.to_string()))?;
    Ok(cfg
        .benchmarks
        .into_iter()
        .map(|b| Benchmark { name: b.name, verify: b.verify })
        .collect())
}

/// Input and output locations for one suite run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub benchmarks_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl RunPaths {
    pub fn new(benchmarks_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        RunPaths { benchmarks_dir: benchmarks_dir.into(), results_dir: results_dir.into() }
    }

    /// `<benchmarks>/<name>.aig`
    pub fn source(&self, name: &str) -> PathBuf {
        self.benchmarks_dir.join(format!("{}.aig", name))
    }

    /// `<results>/<name>_<repr>.aig`
    pub fn result(&self, name: &str, repr: ReprType) -> PathBuf {
        self.results_dir.join(format!("{}_{}.aig", name, repr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suite_has_twenty_benchmarks() {
        let suite = default_suite();
        assert_eq!(suite.len(), 20);
        assert!(suite.iter().filter(|b| !b.verify).count() == 1);
        assert_eq!(suite.last().unwrap().name, "hyp");
        assert!(!suite.last().unwrap().verify);
    }

    #[test]
    fn test_load_suite_defaults_verify_to_true() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.toml");
        std::fs::write(
            &path,
            r#"
[[benchmark]]
name = "adder"

[[benchmark]]
name = "hyp"
verify = false
"#,
        )
        .unwrap();

        let suite = load_suite(&path).unwrap();
        assert_eq!(suite.len(), 2);
        assert!(suite[0].verify);
        assert_eq!(suite[1].name, "hyp");
        assert!(!suite[1].verify);
    }

    #[test]
    fn test_run_paths_layout() {
        let paths = RunPaths::new("benchmarks", "results");
        assert_eq!(paths.source("adder"), PathBuf::from("benchmarks/adder.aig"));
        assert_eq!(
            paths.result("adder", ReprType::Xmg),
            PathBuf::from("results/adder_xmg.aig")
        );
    }
}
