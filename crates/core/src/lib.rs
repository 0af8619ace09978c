//! Core types and codecs for the propensity benchmark
//!
//! This crate defines the foundational pieces shared by every storage
//! backend and scoring component:
//! - Vector: fixed-width f64 vector with its little-endian binary codec
//! - Key codec: big-endian, order-preserving u32 encoding
//! - Namespace: the two record spaces (members, movies)
//! - Output: one (member, movie, propensity) score
//! - MovieModel: a movie-id set averaged into a synthetic vector
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod types;
pub mod vector;

// Re-export commonly used types
pub use error::{Error, Result};
pub use key::{decode_id, encode_id, KEY_LEN};
pub use types::{MovieModel, Namespace, Output, MODEL_ID};
pub use vector::{Vector, DIM, VECTOR_LEN};
