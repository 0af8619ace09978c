//! Embedded KV backend on redb
//!
//! One redb database file holds both namespaces as separate tables. Keys
//! are stored in their 4-byte big-endian form, so redb's byte-lexicographic
//! table order is exactly ascending id order and range scans need no
//! engine-side comparator.

use crate::backend::VectorStore;
use propensity_core::{decode_id, encode_id, Error, Namespace, Result, Vector};
use ::redb::{Database, ReadableTable, TableDefinition};
use std::fmt::Display;
use std::ops::ControlFlow;
use std::path::Path;
use tracing::trace;

const MEMBERS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("members");
const MOVIES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("movies");

/// Records per write transaction during bulk loads
const BULK_BATCH: u32 = 10_000;

fn table_def(ns: Namespace) -> TableDefinition<'static, &'static [u8], &'static [u8]> {
    match ns {
        Namespace::Members => MEMBERS,
        Namespace::Movies => MOVIES,
    }
}

fn storage_err(e: impl Display) -> Error {
    Error::Storage(e.to_string())
}

fn write_err(e: impl Display) -> Error {
    Error::Write(e.to_string())
}

/// Storage backend on a single redb database file
pub struct RedbBackend {
    db: Database,
}

impl RedbBackend {
    /// Create (or open) the database at `path` and provision both tables
    ///
    /// Tables are created up front so read transactions never race table
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the database cannot be opened.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path).map_err(storage_err)?;
        let txn = db.begin_write().map_err(storage_err)?;
        txn.open_table(MEMBERS).map_err(storage_err)?;
        txn.open_table(MOVIES).map_err(storage_err)?;
        txn.commit().map_err(storage_err)?;
        Ok(RedbBackend { db })
    }
}

impl VectorStore for RedbBackend {
    fn name(&self) -> &'static str {
        "redb"
    }

    fn get(&self, ns: Namespace, id: u32) -> Result<Vector> {
        let txn = self.db.begin_read().map_err(storage_err)?;
        let table = txn.open_table(table_def(ns)).map_err(storage_err)?;
        let key = encode_id(id);
        match table.get(key.as_slice()).map_err(storage_err)? {
            Some(guard) => Vector::from_bytes(guard.value()),
            None => Err(Error::NotFound { namespace: ns, id }),
        }
    }

    fn set(&self, ns: Namespace, id: u32, vector: &Vector) -> Result<()> {
        let txn = self.db.begin_write().map_err(write_err)?;
        {
            let mut table = txn.open_table(table_def(ns)).map_err(write_err)?;
            let key = encode_id(id);
            let value = vector.to_bytes();
            table
                .insert(key.as_slice(), value.as_slice())
                .map_err(write_err)?;
        }
        txn.commit().map_err(write_err)?;
        Ok(())
    }

    fn scan_range(&self, ns: Namespace, low: u32, high: u32) -> Result<Vec<(u32, Vector)>> {
        if low >= high {
            return Ok(Vec::new());
        }
        let txn = self.db.begin_read().map_err(storage_err)?;
        let table = txn.open_table(table_def(ns)).map_err(storage_err)?;
        let low_key = encode_id(low);
        let high_key = encode_id(high);
        let mut out = Vec::new();
        let range = table
            .range(low_key.as_slice()..high_key.as_slice())
            .map_err(storage_err)?;
        for item in range {
            let (key, value) = item.map_err(storage_err)?;
            let id = decode_id(key.value())?;
            out.push((id, Vector::from_bytes(value.value())?));
        }
        Ok(out)
    }

    fn scan_all(
        &self,
        ns: Namespace,
        visit: &mut dyn FnMut(u32, Vector) -> ControlFlow<()>,
    ) -> Result<()> {
        let txn = self.db.begin_read().map_err(storage_err)?;
        let table = txn.open_table(table_def(ns)).map_err(storage_err)?;
        for item in table.iter().map_err(storage_err)? {
            let (key, value) = item.map_err(storage_err)?;
            let id = decode_id(key.value())?;
            let vector = Vector::from_bytes(value.value())?;
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
        let def = table_def(ns);
        let mut next = 0u32;
        while next < count {
            let end = count.min(next + BULK_BATCH);
            let txn = self.db.begin_write().map_err(write_err)?;
            {
                let mut table = txn.open_table(def).map_err(write_err)?;
                for id in next..end {
                    let key = encode_id(id);
                    let value = gen(id).to_bytes();
                    table
                        .insert(key.as_slice(), value.as_slice())
                        .map_err(write_err)?;
                }
            }
            txn.commit().map_err(write_err)?;
            trace!(namespace = %ns, upto = end, "redb bulk load batch committed");
            next = end;
        }
        Ok(())
    }
}
