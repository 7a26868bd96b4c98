use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::traits::{KvPairs, KvStore};

/// SQLite-backed key-value store.
/// Uses a single `kv` table with BLOB key and BLOB value columns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store at the given path.
    /// Use `:memory:` for an in-memory database (useful for tests).
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key BLOB PRIMARY KEY, value BLOB NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            reason: e.to_string(),
        })?;
        let mut stmt = conn.prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => {
                let value: Vec<u8> = row.get(0)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::WriteError {
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            reason: e.to_string(),
        })?;
        let mut stmt = conn.prepare_cached("SELECT 1 FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        Ok(rows.next()?.is_some())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<KvPairs, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            reason: e.to_string(),
        })?;

        // Compute the upper bound for the prefix range.
        // Increment the last byte of the prefix; if it overflows, drop it and increment the
        // previous byte, etc. If all bytes overflow we just scan to the end.
        let upper_bound = increment_prefix(prefix);

        let mut results = Vec::new();
        match upper_bound {
            Some(ref ub) => {
                let mut stmt = conn.prepare_cached(
                    "SELECT key, value FROM kv WHERE key >= ?1 AND key < ?2 ORDER BY key",
                )?;
                let mut rows = stmt.query(params![prefix, ub])?;
                while let Some(row) = rows.next()? {
                    let k: Vec<u8> = row.get(0)?;
                    let v: Vec<u8> = row.get(1)?;
                    results.push((k, v));
                }
            }
            None => {
                let mut stmt =
                    conn.prepare_cached("SELECT key, value FROM kv WHERE key >= ?1 ORDER BY key")?;
                let mut rows = stmt.query(params![prefix])?;
                while let Some(row) = rows.next()? {
                    let k: Vec<u8> = row.get(0)?;
                    if !k.starts_with(prefix) {
                        break;
                    }
                    let v: Vec<u8> = row.get(1)?;
                    results.push((k, v));
                }
            }
        }

        Ok(results)
    }
}

/// Increment a byte prefix to compute an exclusive upper bound.
/// Returns None if the prefix is all 0xFF bytes (no upper bound).
fn increment_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut result = prefix.to_vec();
    for i in (0..result.len()).rev() {
        if result[i] < 0xFF {
            result[i] += 1;
            result.truncate(i + 1);
            return Some(result);
        }
    }
    None
}
