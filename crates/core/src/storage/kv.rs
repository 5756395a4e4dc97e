//! Key-value table access
//!
//! Thin wrapper over the `kv_store` table; each value replaces the
//! previous one for its key in a single statement.

use chrono::Utc;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;

/// Key-value store over a borrowed connection
pub struct KvStore<'a> {
    conn: &'a Connection,
}

impl<'a> KvStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read the raw bytes stored under `key`. Values are read as bytes so
    /// that text which is not valid UTF-8 still comes back to the caller.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| {
                    Ok(match row.get_ref(0)? {
                        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
                        _ => None,
                    })
                },
            )
            .optional()?;
        Ok(value.flatten())
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_put_get() {
        let db = Database::open_in_memory("friends").unwrap();
        let kv = db.kv();
        kv.put("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn test_put_replaces() {
        let db = Database::open_in_memory("friends").unwrap();
        let kv = db.kv();
        kv.put("a", "1").unwrap();
        kv.put("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_missing_key() {
        let db = Database::open_in_memory("friends").unwrap();
        assert!(db.kv().get("nope").unwrap().is_none());
    }

    #[test]
    fn test_non_text_value_is_absent() {
        let db = Database::open_in_memory("friends").unwrap();
        db.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES ('a', 42, 'now')",
                [],
            )
            .unwrap();
        assert!(db.kv().get("a").unwrap().is_none());
    }
}
