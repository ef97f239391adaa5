//! Value Coercer: reduce any JSON value to one clean string

use crate::DEFAULT_MAX_DEPTH;
use serde_json::Value;

/// Inner keys of a wrapper object, in the order they are tried
pub const PREFERRED_VALUE_KEYS: [&str; 8] = [
    "value", "text", "string", "content", "email", "name", "phone", "number",
];

/// Coerce a value to a trimmed string with the default depth limit
///
/// # Examples
///
/// ```
/// use callsheet_extractor::to_str;
/// use serde_json::json;
///
/// assert_eq!(to_str(&json!(null)), "");
/// assert_eq!(to_str(&json!("  Jane ")), "Jane");
/// assert_eq!(to_str(&json!({"value": {"value": "x"}})), "x");
/// assert_eq!(to_str(&json!(["", {"text": "first"}, "second"])), "first");
/// ```
pub fn to_str(value: &Value) -> String {
    to_str_bounded(value, DEFAULT_MAX_DEPTH)
}

/// Coerce a value to a trimmed string, descending at most `depth` levels
///
/// - scalars: their trimmed text form (`true`/`false` for booleans)
/// - mappings: the first non-empty coercion among [`PREFERRED_VALUE_KEYS`],
///   then among all values in order
/// - arrays: the first element that coerces to a non-empty string
///
/// Anything nested deeper than `depth` coerces to `""`.
pub fn to_str_bounded(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ if depth == 0 => String::new(),
        Value::Object(map) => PREFERRED_VALUE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .chain(map.values())
            .map(|inner| to_str_bounded(inner, depth - 1))
            .find(|s| !s.is_empty())
            .unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .map(|item| to_str_bounded(item, depth - 1))
            .find(|s| !s.is_empty())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert_eq!(to_str(&Value::Null), "");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_str(&json!("  padded\n")), "padded");
        assert_eq!(to_str(&json!(42)), "42");
        assert_eq!(to_str(&json!(1.5)), "1.5");
        assert_eq!(to_str(&json!(true)), "true");
        assert_eq!(to_str(&json!(false)), "false");
    }

    #[test]
    fn test_wrapper_unwrapping_is_idempotent() {
        assert_eq!(to_str(&json!({"value": {"value": "x"}})), "x");
        assert_eq!(to_str(&json!({"value": "x"})), "x");
    }

    #[test]
    fn test_preferred_key_order() {
        let wrapped = json!({"name": "by name", "text": "by text"});
        assert_eq!(to_str(&wrapped), "by text");

        let wrapped = json!({"phone": "+15550100", "email": "jane@example.com"});
        assert_eq!(to_str(&wrapped), "jane@example.com");
    }

    #[test]
    fn test_empty_preferred_key_falls_through() {
        let wrapped = json!({"value": "", "text": "  ", "content": "real"});
        assert_eq!(to_str(&wrapped), "real");
    }

    #[test]
    fn test_falls_back_to_first_non_empty_value() {
        let wrapped = json!({"rationale": "", "answer": "Jane", "other": "Bob"});
        assert_eq!(to_str(&wrapped), "Jane");
    }

    #[test]
    fn test_null_value_falls_back_to_other_fields() {
        let wrapped = json!({"data_collection_id": "caller_name", "value": null});
        assert_eq!(to_str(&wrapped), "caller_name");
    }

    #[test]
    fn test_list_picks_first_non_empty() {
        assert_eq!(to_str(&json!([null, "", [], "second"])), "second");
        assert_eq!(to_str(&json!([])), "");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_str(&json!({})), "");
        assert_eq!(to_str(&json!({"value": null})), "");
    }

    #[test]
    fn test_depth_bound() {
        let nested = json!({"value": {"value": {"value": "x"}}});
        assert_eq!(to_str_bounded(&nested, 2), "");
        assert_eq!(to_str_bounded(&nested, 3), "x");
        assert_eq!(to_str_bounded(&json!("scalar"), 0), "scalar");
    }
}
