//! In-memory backend: BTreeMap per namespace behind a RwLock
//!
//! The reference engine. Records are stored in their encoded byte form so
//! the read path exercises the same decode step as the on-disk engines
//! (a corrupt entry surfaces as a decode error, not a panic).
//!
//! Reads take the shared lock and can run concurrently; bulk loads take the
//! exclusive lock once for the whole batch.

use crate::backend::VectorStore;
use parking_lot::RwLock;
use propensity_core::{Error, Namespace, Result, Vector};
use std::collections::BTreeMap;
use std::ops::ControlFlow;

/// In-memory storage backend
///
/// One ordered map per namespace. Keys are kept as plain `u32` because
/// `BTreeMap`'s numeric order equals the byte-lexicographic order of the
/// big-endian key encoding, so scans come back in the contract order.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    members: RwLock<BTreeMap<u32, Vec<u8>>>,
    movies: RwLock<BTreeMap<u32, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    fn tree(&self, ns: Namespace) -> &RwLock<BTreeMap<u32, Vec<u8>>> {
        match ns {
            Namespace::Members => &self.members,
            Namespace::Movies => &self.movies,
        }
    }

    /// Store raw bytes under `id`, bypassing the vector codec
    ///
    /// Test hook for corruption scenarios: lets a test plant bytes of the
    /// wrong length and assert that `get` reports a decode error.
    pub fn insert_raw(&self, ns: Namespace, id: u32, bytes: Vec<u8>) {
        self.tree(ns).write().insert(id, bytes);
    }
}

impl VectorStore for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, ns: Namespace, id: u32) -> Result<Vector> {
        let tree = self.tree(ns).read();
        let bytes = tree
            .get(&id)
            .ok_or(Error::NotFound { namespace: ns, id })?;
        Vector::from_bytes(bytes)
    }

    fn set(&self, ns: Namespace, id: u32, vector: &Vector) -> Result<()> {
        self.tree(ns).write().insert(id, vector.to_bytes().to_vec());
        Ok(())
    }

    fn scan_range(&self, ns: Namespace, low: u32, high: u32) -> Result<Vec<(u32, Vector)>> {
        if low >= high {
            return Ok(Vec::new());
        }
        let tree = self.tree(ns).read();
        tree.range(low..high)
            .map(|(&id, bytes)| Vector::from_bytes(bytes).map(|v| (id, v)))
            .collect()
    }

    fn scan_all(
        &self,
        ns: Namespace,
        visit: &mut dyn FnMut(u32, Vector) -> ControlFlow<()>,
    ) -> Result<()> {
        let tree = self.tree(ns).read();
        for (&id, bytes) in tree.iter() {
            let vector = Vector::from_bytes(bytes)?;
            if visit(id, vector).is_break() {
                break;
            }
        }
        Ok(())
    }

    fn bulk_load(
        &self,
        ns: Namespace,
        count: u32,
        gen: &mut dyn FnMut(u32) -> Vector,
    ) -> Result<()> {
        let mut tree = self.tree(ns).write();
        for id in 0..count {
            tree.insert(id, gen(id).to_bytes().to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propensity_core::DIM;

    fn vec_with(first: f64) -> Vector {
        let mut c = [0.0; DIM];
        c[0] = first;
        Vector::new(c)
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = MemoryBackend::new();
        let result = store.get(Namespace::Members, 7);
        assert!(matches!(
            result,
            Err(Error::NotFound {
                namespace: Namespace::Members,
                id: 7
            })
        ));
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryBackend::new();
        let v = vec_with(0.5);
        store.set(Namespace::Members, 1, &v).unwrap();
        assert_eq!(store.get(Namespace::Members, 1).unwrap(), v);
    }

    #[test]
    fn test_set_is_an_upsert() {
        let store = MemoryBackend::new();
        store.set(Namespace::Movies, 1, &vec_with(1.0)).unwrap();
        store.set(Namespace::Movies, 1, &vec_with(2.0)).unwrap();
        assert_eq!(store.get(Namespace::Movies, 1).unwrap(), vec_with(2.0));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let store = MemoryBackend::new();
        store.set(Namespace::Members, 1, &vec_with(1.0)).unwrap();
        assert!(store.get(Namespace::Movies, 1).is_err());
    }

    #[test]
    fn test_corrupt_bytes_surface_as_decode_error() {
        let store = MemoryBackend::new();
        store.insert_raw(Namespace::Members, 3, vec![0xAB; 11]);
        assert!(matches!(
            store.get(Namespace::Members, 3),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_scan_range_is_half_open_and_ordered() {
        let store = MemoryBackend::new();
        for id in [4u32, 1, 3, 2, 0] {
            store.set(Namespace::Members, id, &vec_with(id as f64)).unwrap();
        }
        let hits = store.scan_range(Namespace::Members, 1, 4).unwrap();
        let ids: Vec<u32> = hits.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_scan_range_empty_when_low_equals_high() {
        let store = MemoryBackend::new();
        store.set(Namespace::Members, 5, &vec_with(1.0)).unwrap();
        assert!(store.scan_range(Namespace::Members, 5, 5).unwrap().is_empty());
    }

    #[test]
    fn test_scan_all_respects_break() {
        let store = MemoryBackend::new();
        for id in 0..10u32 {
            store.set(Namespace::Members, id, &vec_with(id as f64)).unwrap();
        }
        let mut seen = 0;
        store
            .scan_all(Namespace::Members, &mut |_, _| {
                seen += 1;
                if seen == 4 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_bulk_load_writes_dense_ids() {
        let store = MemoryBackend::new();
        store
            .bulk_load(Namespace::Movies, 5, &mut |id| vec_with(id as f64))
            .unwrap();
        for id in 0..5 {
            assert_eq!(
                store.get(Namespace::Movies, id).unwrap(),
                vec_with(id as f64)
            );
        }
        assert!(store.get(Namespace::Movies, 5).is_err());
    }
}
