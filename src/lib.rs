//! Propensity - storage-backend benchmark for vector propensity scoring
//!
//! Propensity scores are dot products between fixed-dimension member and
//! movie vectors. The interesting part is not the arithmetic but the
//! plumbing: a backend-agnostic storage contract for fixed-width vectors
//! keyed by integer id, and the fan-out/fan-in engine that scores id cross
//! products concurrently over whichever engine is plugged in.
//!
//! # Quick Start
//!
//! ```
//! use propensity::{
//!     BulkLoader, EngineConfig, FanoutScorer, MemoryBackend, Namespace,
//! };
//! use std::sync::Arc;
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let loader = BulkLoader::new(Arc::clone(&backend));
//! loader.load_random(Namespace::Members, 1000).unwrap();
//! loader.load_random(Namespace::Movies, 50).unwrap();
//!
//! let scorer = FanoutScorer::new(backend, &EngineConfig::default());
//! let members: Vec<u32> = (0..1000).collect();
//! let report = scorer.query(&members, &[0, 1, 2, 3, 4]);
//! assert_eq!(report.outputs.len(), 5000);
//! ```
//!
//! # Architecture
//!
//! Scoring components ([`FanoutScorer`], [`RangeScorer`],
//! [`FullScanAggregator`], [`ModelAggregator`], [`BulkLoader`]) depend only
//! on the [`VectorStore`] trait; [`MemoryBackend`], [`RedbBackend`], and
//! [`SqliteBackend`] implement it once each.

// Re-export the public API from the component crates
pub use propensity_core::{
    decode_id, encode_id, Error, MovieModel, Namespace, Output, Result, Vector, DIM, KEY_LEN,
    MODEL_ID, VECTOR_LEN,
};
pub use propensity_engine::{
    random_vector, BulkLoader, EngineConfig, FanoutScorer, FullScanAggregator, LoadReport,
    LookupFailure, ModelAggregator, QueryReport, RangeScorer, DEFAULT_SCAN_CAP,
};
pub use propensity_storage::{MemoryBackend, RedbBackend, SqliteBackend, VectorStore};
