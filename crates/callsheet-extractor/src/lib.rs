//! Callsheet Extractor
//!
//! Normalizes loosely-structured call webhook payloads into a
//! [`CanonicalRecord`](callsheet_domain::CanonicalRecord).
//!
//! # Architecture
//!
//! ```text
//! raw body → parse_payload → FieldLocator (per field) → to_str / to_str_list → CanonicalRecord
//! ```
//!
//! - **Field Locator**: finds the first non-empty value under any of a field's
//!   candidate keys, preferring the top level, then known containers
//!   (`data`, `extracted`, ...), then any nested mapping.
//! - **Value Coercer**: turns a scalar, wrapper object or list into one
//!   trimmed string.
//! - **List Coercer**: turns anything into an ordered, deduplicated list of
//!   strings, splitting bullet, numbered and multi-line text.
//! - **Record Assembler**: applies the above to the eight canonical fields.
//!
//! Everything in this crate is pure and never fails on malformed input: the
//! worst case is an all-empty record.
//!
//! # Example Usage
//!
//! ```
//! use callsheet_extractor::RecordAssembler;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "data": {
//!         "caller_name": {"value": "Jane"},
//!         "questions_asked": {"value": "- Q1\n- Q2"}
//!     }
//! });
//!
//! let record = RecordAssembler::default().assemble(&payload);
//! assert_eq!(record.caller_name, "Jane");
//! assert_eq!(record.questions_asked, vec!["Q1", "Q2"]);
//! assert_eq!(record.caller_email, "");
//! ```

#![warn(missing_docs)]

mod assembler;
mod coerce;
mod config;
mod error;
mod list;
mod locator;
mod payload;
mod timing;


pub use assembler::{keys, RecordAssembler};
pub use coerce::{to_str, to_str_bounded, PREFERRED_VALUE_KEYS};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use list::{split_items, to_str_list, to_str_list_bounded, LIST_HOLDER_KEYS};
pub use locator::{locate, FieldLocator, CONTAINER_KEYS};
pub use payload::{parse_payload, RAW_TEXT_KEY};
pub use timing::{detect_unit, format_epoch, join_timing, EpochUnit};

/// Nesting depth the locator and coercers descend to unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 32;
