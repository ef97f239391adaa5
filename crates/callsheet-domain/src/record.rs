//! Canonical call record and its identifier

use std::fmt;

/// Unique identifier for a stored record, backed by a UUIDv7
///
/// The top 48 bits carry the Unix millisecond timestamp, so ids sort
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use callsheet_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value (storage deserialization)
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its hyphenated UUID form
    ///
    /// # Examples
    ///
    /// ```
    /// use callsheet_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the id
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Normalized summary of one completed call
///
/// Every field is always present. Scalar fields default to `""` and list
/// fields to an empty vector when the webhook payload carried nothing usable,
/// so the shape of a record never varies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRecord {
    /// Caller's name
    pub caller_name: String,

    /// Caller's email address
    pub caller_email: String,

    /// Caller's phone number
    pub caller_number: String,

    /// Start and end of the call joined with `" - "`
    pub call_timing: String,

    /// One or two sentence summary
    pub brief_summary: String,

    /// Longer summary of the conversation
    pub detailed_summary: String,

    /// Questions the caller asked, deduplicated, in order
    pub questions_asked: Vec<String>,

    /// Follow-ups agreed during the call, deduplicated, in order
    pub action_items: Vec<String>,
}

impl CanonicalRecord {
    /// True when no field carries any content
    pub fn is_empty(&self) -> bool {
        self.caller_name.is_empty()
            && self.caller_email.is_empty()
            && self.caller_number.is_empty()
            && self.call_timing.is_empty()
            && self.brief_summary.is_empty()
            && self.detailed_summary.is_empty()
            && self.questions_asked.is_empty()
            && self.action_items.is_empty()
    }
}

/// A record as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Identifier assigned on insert
    pub id: RecordId,

    /// When the record was stored (milliseconds since Unix epoch)
    pub received_at: u64,

    /// The normalized content
    pub record: CanonicalRecord,
}
