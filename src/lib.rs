pub mod engine;
pub mod pipeline;
pub mod report;
pub mod repr;
pub mod run_cmd;
pub mod runner;
pub mod stats;
pub mod storage;
pub mod store;
pub mod suite;
pub mod table_cmd;
pub mod verify;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::repr::ReprType;

#[derive(Debug, Error)]
pub enum BenchError {
    /// A benchmark description could not be read. Fatal to the iteration.
    #[error("source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },
    /// A network is already loaded for this representation; the store must
    /// be cleared before reloading.
    #[error("network already loaded for {0}")]
    AlreadyLoaded(ReprType),
    /// An operation was requested against a representation with no loaded
    /// network.
    #[error("no network loaded for {0}")]
    NotLoaded(ReprType),
    /// The external synthesis engine failed or broke protocol.
    #[error("engine: {0}")]
    Engine(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SystemInfo {
    pub cpu_model: Option<String>,
    pub cpu_cores_logical: Option<usize>,
    pub cpu_cores_physical: Option<usize>,
    pub total_ram_bytes: Option<u64>,
    pub os: Option<String>,
}

// Shared helpers
pub fn collect_system_info() -> SystemInfo {
    use sysinfo::System;
    let mut sys = System::new_all();
    sys.refresh_all();
    let cpu_model = sys.cpus().get(0).map(|c| c.brand().to_string());
    let cpu_cores_logical = Some(sys.cpus().len());
    let cpu_cores_physical = sys.physical_core_count();
    let total_ram_bytes = Some(sys.total_memory());
    let os = System::name();
    SystemInfo { cpu_model, cpu_cores_logical, cpu_cores_physical, total_ram_bytes, os }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha256::digest;
    digest(bytes)
}
