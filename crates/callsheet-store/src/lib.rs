//! Callsheet Storage Layer
//!
//! Implements the `RecordStore` trait on top of SQLite.
//!
//! Scalar fields map to TEXT columns; the two list fields are stored as JSON
//! arrays. Records are insert-only and listed newest first.
//!
//! # Examples
//!
//! ```no_run
//! use callsheet_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use callsheet_domain::{CanonicalRecord, RecordId, RecordStore, StoredRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// List field could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_COLUMNS: &str = "SELECT id, received_at, caller_name, caller_email, caller_number,
        call_timing, brief_summary, detailed_summary, questions_asked, action_items
     FROM summaries";

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not `Sync`. Share a store between tasks behind a
/// `Mutex`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            ))
        })?;
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_record_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let questions: String = row.get(8)?;
        let actions: String = row.get(9)?;

        Ok(StoredRecord {
            id,
            received_at: row.get::<_, i64>(1)? as u64,
            record: CanonicalRecord {
                caller_name: row.get(2)?,
                caller_email: row.get(3)?,
                caller_number: row.get(4)?,
                call_timing: row.get(5)?,
                brief_summary: row.get(6)?,
                detailed_summary: row.get(7)?,
                questions_asked: decode_list(8, &questions)?,
                action_items: decode_list(9, &actions)?,
            },
        })
    }
}

fn decode_list(column: usize, text: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn insert(&mut self, record: CanonicalRecord) -> Result<RecordId, Self::Error> {
        let id = RecordId::new();
        let questions = serde_json::to_string(&record.questions_asked)?;
        let actions = serde_json::to_string(&record.action_items)?;

        self.conn.execute(
            "INSERT INTO summaries (id, received_at, caller_name, caller_email, caller_number,
                call_timing, brief_summary, detailed_summary, questions_asked, action_items)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                Self::record_id_to_bytes(id),
                Self::now_millis() as i64,
                &record.caller_name,
                &record.caller_email,
                &record.caller_number,
                &record.call_timing,
                &record.brief_summary,
                &record.detailed_summary,
                questions,
                actions,
            ],
        )?;

        Ok(id)
    }

    fn list(&self, limit: usize, skip: usize) -> Result<Vec<StoredRecord>, Self::Error> {
        let sql = format!("{} ORDER BY rowid DESC LIMIT ?1 OFFSET ?2", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);

        let records = stmt
            .query_map(params![limit, skip], Self::row_to_stored)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get(&self, id: RecordId) -> Result<Option<StoredRecord>, Self::Error> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let record = self
            .conn
            .query_row(&sql, params![Self::record_id_to_bytes(id)], Self::row_to_stored)
            .optional()?;

        Ok(record)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM summaries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_bytes_roundtrip() {
        let id = RecordId::new();
        let bytes = SqliteStore::record_id_to_bytes(id);
        assert_eq!(SqliteStore::bytes_to_record_id(&bytes).unwrap(), id);
    }

    #[test]
    fn test_short_id_bytes_rejected() {
        let result = SqliteStore::bytes_to_record_id(&[1, 2, 3]);
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_corrupt_list_column_surfaces_error() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let id = store.insert(CanonicalRecord::default()).unwrap();
        store
            .conn
            .execute("UPDATE summaries SET questions_asked = 'not json'", [])
            .unwrap();

        assert!(matches!(store.get(id), Err(StoreError::Database(_))));
    }
}
