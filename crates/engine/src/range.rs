//! Range scorer: ordered member ranges against a movie list
//!
//! Sequential counterpart to the fan-out scorer. The member range
//! `[low, high)` is scanned once and reused for every movie, so the cost is
//! one range read plus one movie fetch per movie id. Results keep ascending
//! member-id order within each movie's pass, passes concatenated in the
//! order the movie ids were given.

use propensity_core::{Namespace, Output, Result};
use propensity_storage::VectorStore;
use std::sync::Arc;

/// Sequential range scorer over a shared storage backend
pub struct RangeScorer<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: VectorStore + ?Sized> RangeScorer<B> {
    /// Create a scorer over `backend`
    pub fn new(backend: Arc<B>) -> Self {
        RangeScorer { backend }
    }

    /// Score every member in `[low, high)` against each movie id
    ///
    /// For a dense member range the result holds exactly
    /// `(high - low) * movie_ids.len()` records. `low == high` yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first lookup or scan error aborts the query.
    pub fn query_range(&self, low: u32, high: u32, movie_ids: &[u32]) -> Result<Vec<Output>> {
        let members = self.backend.scan_range(Namespace::Members, low, high)?;
        let mut outputs = Vec::with_capacity(members.len() * movie_ids.len());
        for &movie in movie_ids {
            let movie_vector = self.backend.get(Namespace::Movies, movie)?;
            for (member, member_vector) in &members {
                outputs.push(Output {
                    member: *member,
                    movie,
                    propensity: member_vector.dot(&movie_vector),
                });
            }
        }
        Ok(outputs)
    }
}
