//! Bulk loader for synthetic benchmark data
//!
//! Fills a namespace with vectors whose components are drawn independently
//! and uniformly from `[0, 1)`, keyed by the dense id range `0..n`. Load
//! duration is measured and reported for benchmarking; it carries no
//! correctness meaning.

use propensity_core::{Namespace, Result, Vector, DIM};
use propensity_storage::VectorStore;
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy)]
pub struct LoadReport {
    /// Records written
    pub records: u32,
    /// Wall-clock duration of the load
    pub elapsed: Duration,
}

/// Synthetic-data loader over a shared storage backend
pub struct BulkLoader<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: VectorStore + ?Sized> BulkLoader<B> {
    /// Create a loader over `backend`
    pub fn new(backend: Arc<B>) -> Self {
        BulkLoader { backend }
    }

    /// Write `count` random vectors under ids `0..count`
    ///
    /// # Errors
    ///
    /// Propagates the first write error, aborting remaining writes. A
    /// failed load leaves the namespace indeterminate; re-run the load
    /// from scratch.
    pub fn load_random(&self, ns: Namespace, count: u32) -> Result<LoadReport> {
        let mut rng = rand::thread_rng();
        let start = Instant::now();
        self.backend
            .bulk_load(ns, count, &mut |_| random_vector(&mut rng))?;
        let elapsed = start.elapsed();
        info!(
            engine = self.backend.name(),
            namespace = %ns,
            records = count,
            elapsed_ms = elapsed.as_millis() as u64,
            "bulk load finished"
        );
        Ok(LoadReport {
            records: count,
            elapsed,
        })
    }
}

/// One vector with components drawn uniformly from `[0, 1)`
pub fn random_vector(rng: &mut impl Rng) -> Vector {
    let mut c = [0.0; DIM];
    for v in c.iter_mut() {
        *v = rng.gen::<f64>();
    }
    Vector::new(c)
}
