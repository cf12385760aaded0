//! Dotted field-path resolution against nested document data.

use serde_json::Value;

/// Resolve a dotted field path (e.g. `"stats.lastUpdated"`) against `data`.
///
/// Object keys are matched by segment; a numeric segment indexes into an
/// array. Any missing intermediate yields `None`. An empty path resolves to
/// `data` itself.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }

    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
