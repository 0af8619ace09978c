//! Fan-out/fan-in scorer for member x movie cross products
//!
//! Movie ids are distributed over a bounded pool of worker threads; each
//! worker fetches its movie vector once, scores it against every member,
//! and sends results into a shared unordered collector. The pool is joined
//! structurally (`thread::scope`), and the drain loop ends when every
//! worker has hung up, never by counting results, so a worker that dies
//! early cannot hang the drain.
//!
//! Lookup failures are captured per task instead of aborting the query: a
//! failed movie fetch voids that movie's whole pass, a failed member fetch
//! voids one pair, and everything else still scores.

use crate::config::EngineConfig;
use propensity_core::{Error, Namespace, Output};
use propensity_storage::VectorStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// A lookup that could not be scored
#[derive(Debug)]
pub struct LookupFailure {
    /// Member id, or `None` when the movie fetch itself failed and no
    /// member pair was attempted
    pub member: Option<u32>,
    /// Movie id whose task hit the failure
    pub movie: u32,
    /// The underlying storage error
    pub error: Error,
}

/// Result of a fan-out query: resolved scores plus captured failures
///
/// When every id resolves, `outputs` holds exactly
/// `member_ids.len() * movie_ids.len()` records and `failures` is empty.
/// Output order is unspecified; sort explicitly if order matters.
#[derive(Debug, Default)]
pub struct QueryReport {
    /// Scores that resolved
    pub outputs: Vec<Output>,
    /// Lookups that failed, with the ids that could not be scored
    pub failures: Vec<LookupFailure>,
}

impl QueryReport {
    /// True when no lookup failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Concurrent scorer over a shared storage backend
pub struct FanoutScorer<B: ?Sized> {
    backend: Arc<B>,
    workers: usize,
}

impl<B: VectorStore + ?Sized> FanoutScorer<B> {
    /// Create a scorer over `backend` with the configured pool width
    pub fn new(backend: Arc<B>, config: &EngineConfig) -> Self {
        FanoutScorer {
            backend,
            workers: config.workers.max(1),
        }
    }

    /// Score every member id against every movie id
    ///
    /// One pool task per movie id; the movie vector is fetched once per
    /// task, the member vector once per pair. Empty inputs produce an
    /// empty report.
    pub fn query(&self, member_ids: &[u32], movie_ids: &[u32]) -> QueryReport {
        let mut report = QueryReport::default();
        if member_ids.is_empty() || movie_ids.is_empty() {
            return report;
        }

        let backend = &*self.backend;
        let workers = self.workers.min(movie_ids.len());
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<Result<Output, LookupFailure>>();

        thread::scope(|s| {
            for _ in 0..workers {
                let tx = tx.clone();
                let cursor = &cursor;
                s.spawn(move || loop {
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    if i >= movie_ids.len() {
                        break;
                    }
                    let movie = movie_ids[i];
                    let movie_vector = match backend.get(Namespace::Movies, movie) {
                        Ok(v) => v,
                        Err(error) => {
                            // Whole task is void; one failure covers it.
                            let _ = tx.send(Err(LookupFailure {
                                member: None,
                                movie,
                                error,
                            }));
                            continue;
                        }
                    };
                    for &member in member_ids {
                        let msg = match backend.get(Namespace::Members, member) {
                            Ok(v) => Ok(Output {
                                member,
                                movie,
                                propensity: v.dot(&movie_vector),
                            }),
                            Err(error) => Err(LookupFailure {
                                member: Some(member),
                                movie,
                                error,
                            }),
                        };
                        if tx.send(msg).is_err() {
                            return;
                        }
                    }
                });
            }
            drop(tx);

            // Fan-in: terminates when the last worker drops its sender.
            for msg in rx {
                match msg {
                    Ok(output) => report.outputs.push(output),
                    Err(failure) => report.failures.push(failure),
                }
            }
        });

        report
    }
}
