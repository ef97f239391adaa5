//! Trait definitions for external interactions
//!
//! Infrastructure implementations live in other crates.

use crate::{CanonicalRecord, RecordId, StoredRecord};

/// Persistence gateway for canonical records
///
/// Implemented by the infrastructure layer (callsheet-store). Records are
/// insert-only: there is no update or delete.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Store a record and return its newly assigned id
    fn insert(&mut self, record: CanonicalRecord) -> Result<RecordId, Self::Error>;

    /// List stored records, most recently inserted first
    fn list(&self, limit: usize, skip: usize) -> Result<Vec<StoredRecord>, Self::Error>;

    /// Get a single record by id
    fn get(&self, id: RecordId) -> Result<Option<StoredRecord>, Self::Error>;

    /// Number of stored records
    fn count(&self) -> Result<usize, Self::Error>;
}
