//! Error types for the propensity core
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::Namespace;
use std::io;
use thiserror::Error;

/// Result type alias for propensity operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by codecs, storage backends, and scorers
#[derive(Debug, Error)]
pub enum Error {
    /// Key absent in a namespace
    #[error("id {id} not found in {namespace}")]
    NotFound {
        /// Namespace that was probed
        namespace: Namespace,
        /// The missing id
        id: u32,
    },

    /// Stored bytes have the wrong length for the fixed-width format
    #[error("cannot decode {actual} bytes, expected {expected}")]
    Decode {
        /// Length the codec requires
        expected: usize,
        /// Length actually found
        actual: usize,
    },

    /// Aggregation over zero inputs (mean of an empty model)
    #[error("cannot aggregate zero vectors")]
    EmptyInput,

    /// Backend rejected a write
    #[error("write failed: {0}")]
    Write(String),

    /// Storage engine failure outside the write path
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
