//! Turn a raw webhook body into a JSON tree

use serde_json::{json, Value};
use tracing::debug;

/// Key that holds the body text when it is not valid JSON
pub const RAW_TEXT_KEY: &str = "raw_text";

/// Parse a webhook body, never failing
///
/// Bodies that are not valid JSON are wrapped as `{"raw_text": "<body>"}`
/// (lossy UTF-8) so they can still flow through the normal pipeline.
///
/// # Examples
///
/// ```
/// use callsheet_extractor::parse_payload;
/// use serde_json::json;
///
/// assert_eq!(parse_payload(br#"{"a": 1}"#), json!({"a": 1}));
/// assert_eq!(parse_payload(b"hello"), json!({"raw_text": "hello"}));
/// ```
pub fn parse_payload(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Body is not JSON ({}), storing as raw text", e);
            json!({ RAW_TEXT_KEY: String::from_utf8_lossy(body) })
        }
    }
}
