//! JSON wire types
//!
//! Record keys keep the human-readable names the stored documents have
//! always used ("Caller Name", "Call timing", ...).

use callsheet_domain::{CanonicalRecord, StoredRecord};
use serde::{Deserialize, Serialize};

/// A canonical record on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDto {
    /// Caller's name
    #[serde(rename = "Caller Name")]
    pub caller_name: String,

    /// Caller's email address
    #[serde(rename = "Caller Email")]
    pub caller_email: String,

    /// Caller's phone number
    #[serde(rename = "Caller Number")]
    pub caller_number: String,

    /// Call start and end
    #[serde(rename = "Call timing")]
    pub call_timing: String,

    /// Short summary
    #[serde(rename = "Brief Summary")]
    pub brief_summary: String,

    /// Long summary
    #[serde(rename = "Detailed Summary")]
    pub detailed_summary: String,

    /// Questions asked by the caller
    #[serde(rename = "Questions asked during call")]
    pub questions_asked: Vec<String>,

    /// Follow-ups
    #[serde(rename = "Action Items")]
    pub action_items: Vec<String>,
}

impl From<CanonicalRecord> for RecordDto {
    fn from(record: CanonicalRecord) -> Self {
        Self {
            caller_name: record.caller_name,
            caller_email: record.caller_email,
            caller_number: record.caller_number,
            call_timing: record.call_timing,
            brief_summary: record.brief_summary,
            detailed_summary: record.detailed_summary,
            questions_asked: record.questions_asked,
            action_items: record.action_items,
        }
    }
}

/// A stored record with its id and receive time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecordDto {
    /// Record id (UUID)
    pub id: String,

    /// Milliseconds since the Unix epoch
    pub received_at: u64,

    /// Record fields, inlined
    #[serde(flatten)]
    pub record: RecordDto,
}

impl From<StoredRecord> for StoredRecordDto {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id.to_string(),
            received_at: stored.received_at,
            record: stored.record.into(),
        }
    }
}

/// Response to a processed webhook call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Always "success"
    pub status: String,

    /// Id of the stored record
    pub id: String,

    /// The record as stored
    pub saved: RecordDto,
}
