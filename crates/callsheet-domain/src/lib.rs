//! Callsheet Domain Layer
//!
//! Core types shared by every other crate in the workspace. Like any domain
//! layer it performs no I/O and knows nothing about HTTP, JSON or SQLite.
//!
//! ## Key Concepts
//!
//! - **CanonicalRecord**: the fixed eight-field summary of one finished call
//! - **RecordId**: time-ordered identifier assigned when a record is stored
//! - **StoredRecord**: a record together with its id and receive time
//! - **RecordStore**: the persistence boundary, implemented by `callsheet-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod traits;

// Re-exports for convenience
pub use record::{CanonicalRecord, RecordId, StoredRecord};
pub use traits::RecordStore;
