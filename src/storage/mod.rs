//! Storage layer for run records.
//!
//! This module provides persistence for `RunRecord` data: JSONL for
//! appending and re-reading full records, CSV for flat exports.

pub mod csv;
pub mod jsonl;

// Re-export key types
pub use csv::CsvExporter;
pub use jsonl::JsonlWriter;
