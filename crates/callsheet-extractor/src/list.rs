//! List Coercer: reduce any JSON value to a clean list of strings

use crate::coerce::{to_str, to_str_bounded};
use crate::DEFAULT_MAX_DEPTH;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Keys of a mapping that may hold the list itself, tried after `value`
pub const LIST_HOLDER_KEYS: [&str; 4] = ["items", "list", "questions", "action_items"];

/// Line break followed by a `-` or `*` bullet
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r\n|\n|\r)\s*[*\-]\s+").unwrap());

/// Line break followed by `1.`, `2.`, ...
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r\n|\n|\r)\s*\d+\.\s+").unwrap());

static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\n|\r").unwrap());

/// Coerce a value to a list of strings with the default depth limit
///
/// # Examples
///
/// ```
/// use callsheet_extractor::to_str_list;
/// use serde_json::json;
///
/// assert!(to_str_list(&json!(null)).is_empty());
/// assert_eq!(to_str_list(&json!({"value": "- a\n- b"})), vec!["a", "b"]);
/// assert_eq!(to_str_list(&json!(["x", {"value": "y"}, "x"])), vec!["x", "y"]);
/// ```
pub fn to_str_list(value: &Value) -> Vec<String> {
    to_str_list_bounded(value, DEFAULT_MAX_DEPTH)
}

/// Coerce a value to an ordered list of non-empty, unique strings
///
/// - mappings: recurse into `value`, else the first of [`LIST_HOLDER_KEYS`],
///   else coerce the whole mapping to one string and split it
/// - arrays: wrapper elements (`{"value": ...}`) are list-coerced, other
///   elements are coerced to one string each and split
/// - scalars: split
///
/// Entries are trimmed and the first occurrence of each is kept.
pub fn to_str_list_bounded(value: &Value, depth: usize) -> Vec<String> {
    let mut items = Vec::new();
    collect(value, depth, &mut items);
    dedupe(items)
}

fn collect(value: &Value, depth: usize, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            out.extend(split_items(&to_str(value)));
        }
        _ if depth == 0 => {}
        Value::Object(map) => {
            let holder = map
                .get("value")
                .or_else(|| LIST_HOLDER_KEYS.iter().find_map(|key| map.get(*key)));

            match holder {
                Some(inner) => collect(inner, depth - 1, out),
                None => out.extend(split_items(&to_str_bounded(value, depth))),
            }
        }
        Value::Array(elements) => {
            for element in elements {
                match element.get("value") {
                    Some(inner) => collect(inner, depth - 1, out),
                    None => out.extend(split_items(&to_str_bounded(element, depth - 1))),
                }
            }
        }
    }
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

/// Split free text into list items
///
/// Bullets (`- a` / `* a`) are tried first, then numbered lines (`1. a`),
/// then plain line breaks. The first rule that yields more than one
/// non-empty item wins; otherwise the whole trimmed text is a single item.
/// Empty or whitespace-only text yields no items.
///
/// # Examples
///
/// ```
/// use callsheet_extractor::split_items;
///
/// assert_eq!(split_items("- a\n- b\n- c"), vec!["a", "b", "c"]);
/// assert_eq!(split_items("1. a\n2. b"), vec!["a", "b"]);
/// assert_eq!(split_items("single line"), vec!["single line"]);
/// assert!(split_items("").is_empty());
/// ```
pub fn split_items(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    // A marker on the first line has no line break in front of it
    let marked = format!("\n{}", text);
    for pattern in [&*BULLET_RE, &*NUMBERED_RE] {
        let parts = segments(pattern.split(&marked));
        if parts.len() > 1 {
            return parts;
        }
    }

    let lines = segments(LINE_BREAK_RE.split(text));
    if lines.len() > 1 {
        return lines;
    }

    vec![text.to_string()]
}

fn segments<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_bullets() {
        assert_eq!(split_items("- a\n- b\n- c"), vec!["a", "b", "c"]);
        assert_eq!(split_items("* a\r\n* b"), vec!["a", "b"]);
        assert_eq!(split_items("  - a\n   - b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_split_numbered() {
        assert_eq!(split_items("1. a\n2. b"), vec!["a", "b"]);
        assert_eq!(split_items("1. a\n  10. b\n11. c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_items("first\n\nsecond\r\nthird"), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_split_single_and_empty() {
        assert_eq!(split_items("single line"), vec!["single line"]);
        assert_eq!(split_items("- lonely bullet"), vec!["- lonely bullet"]);
        assert!(split_items("").is_empty());
        assert!(split_items(" \n\t ").is_empty());
    }

    #[test]
    fn test_bullets_win_over_lines() {
        let text = "Questions:\n- What are the hours?\n- Is parking free?";
        assert_eq!(
            split_items(text),
            vec!["Questions:", "What are the hours?", "Is parking free?"]
        );
    }

    #[test]
    fn test_hyphenated_words_are_not_bullets() {
        assert_eq!(split_items("follow-up call"), vec!["follow-up call"]);
        assert_eq!(split_items("a\n-5 degrees"), vec!["a", "-5 degrees"]);
    }

    #[test]
    fn test_null_is_empty() {
        assert!(to_str_list(&Value::Null).is_empty());
    }

    #[test]
    fn test_value_wrapper() {
        assert_eq!(to_str_list(&json!({"value": ["a", "b"]})), vec!["a", "b"]);
        assert_eq!(to_str_list(&json!({"value": "- Q1\n- Q2"})), vec!["Q1", "Q2"]);
        assert!(to_str_list(&json!({"value": null})).is_empty());
    }

    #[test]
    fn test_holder_keys() {
        assert_eq!(to_str_list(&json!({"items": ["a"]})), vec!["a"]);
        assert_eq!(
            to_str_list(&json!({"action_items": "1. call\n2. email", "list": ["x"]})),
            vec!["x"]
        );
    }

    #[test]
    fn test_plain_mapping_is_coerced_then_split() {
        let value = json!({"rationale": "", "answer": "a\nb"});
        assert_eq!(to_str_list(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_array_elements() {
        let value = json!([
            "- one\n- two",
            {"value": ["three", ""]},
            {"text": "four"},
            null,
            "",
            5
        ]);
        assert_eq!(to_str_list(&value), vec!["one", "two", "three", "four", "5"]);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_case_sensitive() {
        let value = json!(["a", "b", " a ", "A", "b"]);
        assert_eq!(to_str_list(&value), vec!["a", "b", "A"]);
    }

    #[test]
    fn test_duplicates_inside_text_removed() {
        assert_eq!(to_str_list(&json!("- a\n- a\n- b")), vec!["a", "b"]);
    }

    #[test]
    fn test_scalar_number() {
        assert_eq!(to_str_list(&json!(3)), vec!["3"]);
    }
}
