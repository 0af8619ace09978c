//! Relational backend on SQLite
//!
//! The two-table schema from the storage contract: `members(id integer
//! primary key, vector blob not null)` and `movies(id integer primary key,
//! vector blob)`, with the vector column holding the exact fixed-width
//! binary encoding. SQLite `BLOB` plays the role the original schema gives
//! `bytea`.
//!
//! `rusqlite::Connection` is not `Sync`, so the connection sits behind a
//! mutex and concurrent readers serialize on it. Acceptable for a benchmark
//! subject; it is the documented concurrency floor of this engine.

use crate::backend::VectorStore;
use parking_lot::Mutex;
use propensity_core::{Error, Namespace, Result, Vector};
use rusqlite::{params, Connection};
use std::fmt::Display;
use std::ops::ControlFlow;
use std::path::Path;

fn storage_err(e: impl Display) -> Error {
    Error::Storage(e.to_string())
}

fn write_err(e: impl Display) -> Error {
    Error::Write(e.to_string())
}

fn id_from_row(raw: i64) -> Result<u32> {
    u32::try_from(raw).map_err(|_| Error::Storage(format!("stored id {raw} out of u32 range")))
}

/// Storage backend on a SQLite database
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open (or create) the database at `path` and provision the schema
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the database cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(storage_err)?;
        Self::init(conn)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS members (id INTEGER PRIMARY KEY, vector BLOB NOT NULL);
             CREATE TABLE IF NOT EXISTS movies (id INTEGER PRIMARY KEY, vector BLOB);",
        )
        .map_err(storage_err)?;
        Ok(SqliteBackend {
            conn: Mutex::new(conn),
        })
    }
}

impl VectorStore for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn get(&self, ns: Namespace, id: u32) -> Result<Vector> {
        let conn = self.conn.lock();
        let sql = format!("SELECT vector FROM {} WHERE id = ?1", ns.name());
        let row = conn.query_row(&sql, params![i64::from(id)], |row| row.get::<_, Vec<u8>>(0));
        match row {
            Ok(bytes) => Vector::from_bytes(&bytes),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(Error::NotFound { namespace: ns, id })
            }
            Err(e) => Err(storage_err(e)),
        }
    }

    fn set(&self, ns: Namespace, id: u32, vector: &Vector) -> Result<()> {
        let conn = self.conn.lock();
        let sql = format!(
            "INSERT INTO {} (id, vector) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET vector = excluded.vector",
            ns.name()
        );
        conn.execute(&sql, params![i64::from(id), vector.to_bytes().as_slice()])
            .map_err(write_err)?;
        Ok(())
    }

    fn scan_range(&self, ns: Namespace, low: u32, high: u32) -> Result<Vec<(u32, Vector)>> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT id, vector FROM {} WHERE id >= ?1 AND id < ?2 ORDER BY id",
            ns.name()
        );
        let mut stmt = conn.prepare(&sql).map_err(storage_err)?;
        let rows = stmt
            .query_map(params![i64::from(low), i64::from(high)], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(storage_err)?;
        let mut out = Vec::new();
        for row in rows {
            let (raw, bytes) = row.map_err(storage_err)?;
            out.push((id_from_row(raw)?, Vector::from_bytes(&bytes)?));
        }
        Ok(out)
    }

    fn scan_all(
        &self,
        ns: Namespace,
        visit: &mut dyn FnMut(u32, Vector) -> ControlFlow<()>,
    ) -> Result<()> {
        let conn = self.conn.lock();
        let sql = format!("SELECT id, vector FROM {} ORDER BY id", ns.name());
        let mut stmt = conn.prepare(&sql).map_err(storage_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(storage_err)?;
        for row in rows {
            let (raw, bytes) = row.map_err(storage_err)?;
            let id = id_from_row(raw)?;
            let vector = Vector::from_bytes(&bytes)?;
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
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(write_err)?;
        {
            let sql = format!(
                "INSERT INTO {} (id, vector) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET vector = excluded.vector",
                ns.name()
            );
            let mut stmt = tx.prepare(&sql).map_err(write_err)?;
            for id in 0..count {
                stmt.execute(params![i64::from(id), gen(id).to_bytes().as_slice()])
                    .map_err(write_err)?;
            }
        }
        tx.commit().map_err(write_err)?;
        Ok(())
    }
}
