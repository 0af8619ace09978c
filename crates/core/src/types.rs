//! Shared types: namespaces, score outputs, movie models
//!
//! A backend instance owns two disjoint record spaces, `members` and
//! `movies`. An id is only meaningful within one space.

use std::fmt;

/// Sentinel movie id on outputs scored against a synthesized model vector.
///
/// A model is an aggregate of several movies, so there is no real movie id
/// to report; `u32::MAX` is reserved to mean "not a stored movie".
pub const MODEL_ID: u32 = u32::MAX;

/// The two record spaces within a storage backend
///
/// Namespaces are independently addressable: the same id may exist in both
/// with unrelated vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Member vectors
    Members,
    /// Movie vectors
    Movies,
}

impl Namespace {
    /// Stable name used for table/tree identifiers and log output
    pub fn name(&self) -> &'static str {
        match self {
            Namespace::Members => "members",
            Namespace::Movies => "movies",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One propensity score: member x movie -> dot product
///
/// Ephemeral result of a scoring pass; never persisted. `movie` is
/// [`MODEL_ID`] when the score was computed against a model vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Output {
    /// Member id the score belongs to
    pub member: u32,
    /// Movie id, or [`MODEL_ID`] for model scores
    pub movie: u32,
    /// Dot product of the two vectors
    pub propensity: f64,
}

/// A set of movie ids used to derive one synthetic mean vector at query time
///
/// Models have no stored identity; they exist only for the duration of a
/// `query_model` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieModel {
    /// Movie ids whose vectors are averaged
    pub movies: Vec<u32>,
}

impl MovieModel {
    /// Create a model over the given movie ids
    pub fn new(movies: Vec<u32>) -> Self {
        MovieModel { movies }
    }
}
