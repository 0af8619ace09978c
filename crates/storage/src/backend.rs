//! Storage abstraction for vector records
//!
//! This module defines the `VectorStore` trait that every concrete engine
//! implements once. Scoring components depend only on this trait, never on
//! an engine type, so engines can be swapped without touching upper layers.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync). The scoring path is read-only;
//! bulk loads assume no concurrent readers.

use propensity_core::{Namespace, Result, Vector};
use std::ops::ControlFlow;

/// Capability set implemented once per storage engine
///
/// A backend owns two independent namespaces (members, movies). Keys are
/// `u32` ids; on disk they use the big-endian encoding from
/// `propensity_core::key` so byte order equals numeric order.
///
/// # Range convention
///
/// All scans are **inclusive-low, exclusive-high** and yield ids in strictly
/// ascending order with no duplicates.
pub trait VectorStore: Send + Sync {
    /// Short static engine name for benchmark and log output
    fn name(&self) -> &'static str;

    /// Fetch the vector stored under `id`
    ///
    /// # Errors
    ///
    /// - [`propensity_core::Error::NotFound`] if the id is absent
    /// - [`propensity_core::Error::Decode`] if the stored bytes are malformed
    fn get(&self, ns: Namespace, id: u32) -> Result<Vector>;

    /// Upsert the vector under `id`; idempotent
    ///
    /// # Errors
    ///
    /// Returns [`propensity_core::Error::Write`] if the engine rejects the
    /// write.
    fn set(&self, ns: Namespace, id: u32, vector: &Vector) -> Result<()>;

    /// Ordered scan of `[low, high)`
    ///
    /// Returns `(id, vector)` pairs in ascending id order. `low == high`
    /// yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or a stored vector is malformed.
    fn scan_range(&self, ns: Namespace, low: u32, high: u32) -> Result<Vec<(u32, Vector)>>;

    /// Ordered traversal of the whole namespace
    ///
    /// Drives `visit` with each record in ascending id order until the
    /// namespace is exhausted or the visitor returns
    /// [`ControlFlow::Break`]. Breaking stops the underlying read; the
    /// traversal itself imposes no cap, callers do.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or a stored vector is malformed.
    fn scan_all(
        &self,
        ns: Namespace,
        visit: &mut dyn FnMut(u32, Vector) -> ControlFlow<()>,
    ) -> Result<()>;

    /// Write `count` generated records under dense ids `0..count`
    ///
    /// `gen` produces the vector for each id. Writes are batched internally
    /// for throughput. There is no partial-success contract: on error a
    /// prefix may remain written, and callers must treat the namespace as
    /// indeterminate and reload from scratch.
    ///
    /// # Errors
    ///
    /// Propagates the first write error, aborting remaining writes.
    fn bulk_load(
        &self,
        ns: Namespace,
        count: u32,
        gen: &mut dyn FnMut(u32) -> Vector,
    ) -> Result<()>;
}
