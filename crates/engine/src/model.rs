//! Model aggregator: synthetic mean vectors scored against members
//!
//! A model is a set of movie ids. Each model collapses to one synthetic
//! vector (the elementwise mean of its movies) before scoring, so outputs
//! carry the [`MODEL_ID`] sentinel instead of a real movie id.

use propensity_core::{Namespace, Output, Result, Vector, MovieModel, MODEL_ID};
use propensity_storage::VectorStore;
use std::sync::Arc;

/// Model scorer over a shared storage backend
pub struct ModelAggregator<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: VectorStore + ?Sized> ModelAggregator<B> {
    /// Create an aggregator over `backend`
    pub fn new(backend: Arc<B>) -> Self {
        ModelAggregator { backend }
    }

    /// Score every member against every model's mean vector
    ///
    /// Members iterate in the given order, models inner; each member vector
    /// is fetched once. The result holds exactly
    /// `member_ids.len() * models.len()` records.
    ///
    /// # Errors
    ///
    /// Fails if a referenced movie or member is missing, or if a model's
    /// movie set is empty (the mean of zero vectors is refused).
    pub fn query_model(&self, member_ids: &[u32], models: &[MovieModel]) -> Result<Vec<Output>> {
        let mut model_vectors = Vec::with_capacity(models.len());
        for model in models {
            let mut movie_vectors = Vec::with_capacity(model.movies.len());
            for &movie in &model.movies {
                movie_vectors.push(self.backend.get(Namespace::Movies, movie)?);
            }
            model_vectors.push(Vector::mean(&movie_vectors)?);
        }

        let mut outputs = Vec::with_capacity(member_ids.len() * models.len());
        for &member in member_ids {
            let member_vector = self.backend.get(Namespace::Members, member)?;
            for model_vector in &model_vectors {
                outputs.push(Output {
                    member,
                    movie: MODEL_ID,
                    propensity: model_vector.dot(&member_vector),
                });
            }
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propensity_core::{Error, DIM};
    use propensity_storage::MemoryBackend;

    fn vec2(a: f64, b: f64) -> Vector {
        let mut c = [0.0; DIM];
        c[0] = a;
        c[1] = b;
        Vector::new(c)
    }

    fn backend_with_movies(movies: &[(u32, Vector)]) -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        for (id, v) in movies {
            backend.set(Namespace::Movies, *id, v).unwrap();
        }
        Arc::new(backend)
    }

    #[test]
    fn test_two_movie_model_scores_against_member() {
        // Movies [2,0] and [0,2] average to [1,1]; against member [1,1]
        // the propensity is 2.0.
        let backend = backend_with_movies(&[(10, vec2(2.0, 0.0)), (11, vec2(0.0, 2.0))]);
        backend.set(Namespace::Members, 0, &vec2(1.0, 1.0)).unwrap();
        let aggregator = ModelAggregator::new(backend);
        let outputs = aggregator
            .query_model(&[0], &[MovieModel::new(vec![10, 11])])
            .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].member, 0);
        assert_eq!(outputs[0].movie, MODEL_ID);
        assert_eq!(outputs[0].propensity, 2.0);
    }

    #[test]
    fn test_cardinality_is_members_times_models() {
        let backend = backend_with_movies(&[(0, vec2(1.0, 0.0)), (1, vec2(0.0, 1.0))]);
        for id in 0..4 {
            backend.set(Namespace::Members, id, &vec2(1.0, 1.0)).unwrap();
        }
        let aggregator = ModelAggregator::new(backend);
        let models = vec![
            MovieModel::new(vec![0]),
            MovieModel::new(vec![1]),
            MovieModel::new(vec![0, 1]),
        ];
        let outputs = aggregator.query_model(&[0, 1, 2, 3], &models).unwrap();
        assert_eq!(outputs.len(), 4 * 3);
        assert!(outputs.iter().all(|o| o.movie == MODEL_ID));
    }

    #[test]
    fn test_empty_model_is_refused() {
        let backend = backend_with_movies(&[]);
        backend.set(Namespace::Members, 0, &vec2(1.0, 0.0)).unwrap();
        let aggregator = ModelAggregator::new(backend);
        let result = aggregator.query_model(&[0], &[MovieModel::new(vec![])]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_missing_model_movie_aborts() {
        let backend = backend_with_movies(&[(0, vec2(1.0, 0.0))]);
        backend.set(Namespace::Members, 0, &vec2(1.0, 0.0)).unwrap();
        let aggregator = ModelAggregator::new(backend);
        let result = aggregator.query_model(&[0], &[MovieModel::new(vec![0, 404])]);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_no_models_yields_no_outputs() {
        let backend = backend_with_movies(&[]);
        backend.set(Namespace::Members, 0, &vec2(1.0, 0.0)).unwrap();
        let aggregator = ModelAggregator::new(backend);
        assert!(aggregator.query_model(&[0], &[]).unwrap().is_empty());
    }
}
