//! Field Locator: find a field's value under any of its candidate keys

use crate::DEFAULT_MAX_DEPTH;
use serde_json::{Map, Value};

/// Wrapper keys under which the real fields are commonly nested, in the
/// order they are searched
pub const CONTAINER_KEYS: [&str; 9] = [
    "data",
    "extracted",
    "extraction",
    "result",
    "payload",
    "data_collection",
    "analysis",
    "data_collection_results",
    "metadata",
];

/// Locate with the default depth limit
///
/// See [`FieldLocator::locate`].
pub fn locate<'a>(tree: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    FieldLocator::default().locate(tree, candidates)
}

/// Depth-limited search over a JSON tree for the first non-empty value whose
/// key matches one of a field's aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLocator {
    max_depth: usize,
}

impl FieldLocator {
    /// Create a locator that descends at most `max_depth` mapping levels
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Find the raw value of the first candidate key present in `tree`
    ///
    /// Search order at each mapping:
    /// 1. exact key match, candidates in priority order
    /// 2. case-insensitive key match, candidates in priority order
    /// 3. the same two checks inside each known container (see
    ///    [`CONTAINER_KEYS`]), recursively
    /// 4. the whole procedure inside every nested mapping value, depth-first
    /// 5. only if all of the above fail, the same walk again but also entering
    ///    the elements of lists
    ///
    /// Null, `""` and `[]` never count as a match. Returns `None` when no
    /// candidate has a usable value anywhere in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use callsheet_extractor::locate;
    /// use serde_json::json;
    ///
    /// let payload = json!({"Caller_Name": "Jane"});
    /// assert_eq!(locate(&payload, &["caller_name"]), Some(&json!("Jane")));
    /// assert_eq!(locate(&payload, &["email"]), None);
    /// ```
    pub fn locate<'a>(&self, tree: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
        let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
        self.search(tree, candidates, &lowered, 0, false)
            .or_else(|| self.search(tree, candidates, &lowered, 0, true))
    }

    fn search<'a>(
        &self,
        node: &'a Value,
        candidates: &[&str],
        lowered: &[String],
        depth: usize,
        into_lists: bool,
    ) -> Option<&'a Value> {
        let map = match node {
            Value::Object(map) => map,
            Value::Array(items) if into_lists && depth < self.max_depth => {
                return items
                    .iter()
                    .find_map(|item| self.search(item, candidates, lowered, depth + 1, true));
            }
            _ => return None,
        };

        if let Some(found) = self.search_containers(map, candidates, lowered, depth) {
            return Some(found);
        }

        if depth >= self.max_depth {
            return None;
        }

        map.values()
            .find_map(|child| self.search(child, candidates, lowered, depth + 1, into_lists))
    }

    fn search_containers<'a>(
        &self,
        map: &'a Map<String, Value>,
        candidates: &[&str],
        lowered: &[String],
        depth: usize,
    ) -> Option<&'a Value> {
        if let Some(found) = match_keys(map, candidates, lowered) {
            return Some(found);
        }

        if depth >= self.max_depth {
            return None;
        }

        CONTAINER_KEYS.iter().find_map(|name| {
            map.iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                .filter_map(|(_, value)| value.as_object())
                .find_map(|inner| self.search_containers(inner, candidates, lowered, depth + 1))
        })
    }
}

impl Default for FieldLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Match the keys of one mapping, exact pass first
fn match_keys<'a>(
    map: &'a Map<String, Value>,
    candidates: &[&str],
    lowered: &[String],
) -> Option<&'a Value> {
    let exact = candidates
        .iter()
        .filter_map(|candidate| map.get(*candidate))
        .find(|value| is_present(value));

    exact.or_else(|| {
        lowered.iter().find_map(|candidate| {
            map.iter()
                .find(|(key, value)| key.to_lowercase() == *candidate && is_present(value))
                .map(|(_, value)| value)
        })
    })
}

/// A value counts as a match unless it is null, an empty string or an empty list
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
