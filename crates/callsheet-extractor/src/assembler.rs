//! Record Assembler: build a CanonicalRecord from a raw payload

use crate::coerce::to_str_bounded;
use crate::config::ExtractorConfig;
use crate::list::to_str_list_bounded;
use crate::locator::FieldLocator;
use crate::timing::{format_epoch, join_timing};
use callsheet_domain::CanonicalRecord;
use serde_json::Value;
use tracing::debug;

/// Candidate key sets, one per canonical field, highest priority first
pub mod keys {
    /// Caller name aliases
    pub const CALLER_NAME: &[&str] = &[
        "caller_name",
        "Caller Name",
        "name",
        "caller",
        "full_name",
        "user_name",
        "user",
        "caller name",
    ];

    /// Caller email aliases
    pub const CALLER_EMAIL: &[&str] = &[
        "caller_email",
        "Caller Email",
        "email",
        "user_email",
        "userEmail",
        "caller email",
    ];

    /// Caller phone number aliases
    pub const CALLER_NUMBER: &[&str] = &[
        "caller_number",
        "Caller Number",
        "phone",
        "phone_number",
        "phoneNumber",
        "caller number",
    ];

    /// Call start aliases
    pub const CALL_START: &[&str] = &[
        "call_start",
        "call_start_time",
        "start_time",
        "start",
        "callStart",
        "start_time_unix_secs",
    ];

    /// Call end aliases
    pub const CALL_END: &[&str] = &[
        "call_end",
        "call_end_time",
        "end_time",
        "end",
        "callEnd",
        "end_time_unix_secs",
    ];

    /// Brief summary aliases
    pub const BRIEF_SUMMARY: &[&str] = &[
        "brief_summary",
        "brief",
        "summary",
        "briefSummary",
        "Brief Summary",
    ];

    /// Detailed summary aliases
    pub const DETAILED_SUMMARY: &[&str] = &[
        "detailed_summary",
        "detailed",
        "detailedSummary",
        "Detailed Summary",
        "transcript_summary",
    ];

    /// Questions asked aliases
    pub const QUESTIONS_ASKED: &[&str] = &[
        "questions",
        "questions_asked",
        "Questions Asked",
        "data_questions",
        "questionsAsked",
    ];

    /// Action item aliases
    pub const ACTION_ITEMS: &[&str] = &["action_items", "Action Items", "actionItems", "actions"];
}

/// Maps a raw webhook payload onto the eight canonical fields
///
/// Stateless once built; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    locator: FieldLocator,
    config: ExtractorConfig,
}

impl RecordAssembler {
    /// Create an assembler with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            locator: FieldLocator::new(config.max_depth),
            config,
        }
    }

    /// The configuration this assembler was built with
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Assemble a record; fields with no usable value come back empty
    pub fn assemble(&self, payload: &Value) -> CanonicalRecord {
        CanonicalRecord {
            caller_name: self.scalar(payload, "caller_name", keys::CALLER_NAME),
            caller_email: self.scalar(payload, "caller_email", keys::CALLER_EMAIL),
            caller_number: self.scalar(payload, "caller_number", keys::CALLER_NUMBER),
            call_timing: self.call_timing(payload),
            brief_summary: self.scalar(payload, "brief_summary", keys::BRIEF_SUMMARY),
            detailed_summary: self.scalar(payload, "detailed_summary", keys::DETAILED_SUMMARY),
            questions_asked: self.list(payload, "questions_asked", keys::QUESTIONS_ASKED),
            action_items: self.list(payload, "action_items", keys::ACTION_ITEMS),
        }
    }

    fn find<'a>(&self, payload: &'a Value, field: &str, candidates: &[&str]) -> Option<&'a Value> {
        let found = self.locator.locate(payload, candidates);
        if found.is_none() {
            debug!(field, "No candidate key matched");
        }
        found
    }

    fn scalar(&self, payload: &Value, field: &str, candidates: &[&str]) -> String {
        self.find(payload, field, candidates)
            .map(|value| to_str_bounded(value, self.config.max_depth))
            .unwrap_or_default()
    }

    fn list(&self, payload: &Value, field: &str, candidates: &[&str]) -> Vec<String> {
        self.find(payload, field, candidates)
            .map(|value| to_str_list_bounded(value, self.config.max_depth))
            .unwrap_or_default()
    }

    fn call_timing(&self, payload: &Value) -> String {
        let start = self.timestamp(payload, "call_start", keys::CALL_START);
        let end = self.timestamp(payload, "call_end", keys::CALL_END);
        join_timing(&start, &end)
    }

    fn timestamp(&self, payload: &Value, field: &str, candidates: &[&str]) -> String {
        let Some(value) = self.find(payload, field, candidates) else {
            return String::new();
        };

        if self.config.normalize_timestamps {
            let scalar = match value {
                Value::Object(_) | Value::Array(_) => {
                    Value::String(to_str_bounded(value, self.config.max_depth))
                }
                _ => value.clone(),
            };
            if let Some(formatted) = format_epoch(&scalar) {
                return formatted;
            }
        }

        to_str_bounded(value, self.config.max_depth)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
