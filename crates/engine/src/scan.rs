//! Full-scan aggregator: every member against one movie
//!
//! Walks the whole members namespace in id order, scoring each record
//! against a single target movie vector fetched once up front. A hard cap
//! from [`EngineConfig`] bounds the walk on very large namespaces; hitting
//! the cap truncates the result and is logged, not an error.

use crate::config::EngineConfig;
use propensity_core::{Namespace, Output, Result};
use propensity_storage::VectorStore;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::warn;

/// Capped full-namespace scorer over a shared storage backend
pub struct FullScanAggregator<B: ?Sized> {
    backend: Arc<B>,
    scan_cap: usize,
}

impl<B: VectorStore + ?Sized> FullScanAggregator<B> {
    /// Create an aggregator over `backend` with the configured scan cap
    pub fn new(backend: Arc<B>, config: &EngineConfig) -> Self {
        FullScanAggregator {
            backend,
            scan_cap: config.scan_cap,
        }
    }

    /// Score every stored member against `movie`
    ///
    /// Returns one output per member in ascending member-id order, stopping
    /// at the scan cap. A result shorter than the namespace is a deliberate
    /// truncation, not a failure.
    ///
    /// # Errors
    ///
    /// Fails if the movie lookup fails or the scan hits a storage or
    /// decode error.
    pub fn member_propensities(&self, movie: u32) -> Result<Vec<Output>> {
        let movie_vector = self.backend.get(Namespace::Movies, movie)?;
        let mut outputs = Vec::new();
        let mut truncated = false;
        self.backend.scan_all(Namespace::Members, &mut |member, member_vector| {
            if outputs.len() >= self.scan_cap {
                truncated = true;
                return ControlFlow::Break(());
            }
            outputs.push(Output {
                member,
                movie,
                propensity: member_vector.dot(&movie_vector),
            });
            ControlFlow::Continue(())
        })?;
        if truncated {
            warn!(
                movie,
                cap = self.scan_cap,
                "full scan truncated at cap"
            );
        }
        Ok(outputs)
    }
}
