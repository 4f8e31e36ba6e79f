//! Representation store.
//!
//! The external engine keeps one shared store of network state across all
//! representation types, with no isolation of its own. `NetworkStore` is the
//! single owner of the engine handle and tracks which representations hold a
//! live network: loading over a live handle is an error, so the
//! clear-before-reload discipline is enforced here rather than by caller
//! convention.

use std::path::Path;

use crate::engine::SynthesisEngine;
use crate::repr::ReprType;
use crate::{BenchError, BenchResult};

pub struct NetworkStore<E> {
    engine: E,
    active: [bool; ReprType::ALL.len()],
}

impl<E: SynthesisEngine> NetworkStore<E> {
    pub fn new(engine: E) -> Self {
        NetworkStore { engine, active: [false; ReprType::ALL.len()] }
    }

    /// Load a circuit description into the network state for `repr`.
    ///
    /// Fails with `SourceUnavailable` if the description cannot be read and
    /// with `AlreadyLoaded` if a handle for `repr` is still active.
    pub fn load(&mut self, repr: ReprType, source: &Path) -> BenchResult<()> {
        if self.active[repr.index()] {
            return Err(BenchError::AlreadyLoaded(repr));
        }
        std::fs::metadata(source).map_err(|e| BenchError::SourceUnavailable {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.engine.read_network(repr, source)?;
        self.active[repr.index()] = true;
        Ok(())
    }

    /// Discard all loaded network state across every representation.
    pub fn clear_all(&mut self) -> BenchResult<()> {
        self.engine.clear_store()?;
        self.active = [false; ReprType::ALL.len()];
        Ok(())
    }

    /// Serialize the network loaded under `repr` to `destination`.
    pub fn save(&mut self, repr: ReprType, destination: &Path) -> BenchResult<()> {
        if !self.active[repr.index()] {
            return Err(BenchError::NotLoaded(repr));
        }
        self.engine.write_network(repr, destination)
    }

    pub fn is_loaded(&self, repr: ReprType) -> bool {
        self.active[repr.index()]
    }

    /// Run engine operations against the live network for `repr`.
    ///
    /// Fails with `NotLoaded` before touching the engine if no handle is
    /// active for `repr`.
    pub fn with_network<R>(
        &mut self,
        repr: ReprType,
        f: impl FnOnce(&mut E) -> BenchResult<R>,
    ) -> BenchResult<R> {
        if !self.active[repr.index()] {
            return Err(BenchError::NotLoaded(repr));
        }
        f(&mut self.engine)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
