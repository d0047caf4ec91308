//! Dotted-path traversal over nested JSON values.
//!
//! A missing segment never raises: the whole lookup simply yields `None`.

use serde_json::{Map, Value};

/// Resolve a dotted `path` starting at `value`.
///
/// Objects are indexed by key, arrays by a decimal position.
/// Scalars cannot be descended into.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(values) => segment.parse::<usize>().ok().and_then(|i| values.get(i)),
        _ => None,
    })
}

/// Resolve a dotted `path` starting at a data bag.
pub fn lookup_in<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        Some((head, rest)) => lookup(map.get(head)?, rest),
        None => map.get(path),
    }
}

/// Turn a scalar value into a bucket key.
///
/// Strings are used verbatim, numbers and booleans through their display form.
/// Null, arrays and objects have no key.
pub fn value_to_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_lookup_nested_object() {
        let data = bag(json!({ "address": { "city": "Cincinnati", "state": "OH" } }));
        assert_eq!(lookup_in(&data, "address.city"), Some(&json!("Cincinnati")));
        assert_eq!(lookup_in(&data, "address"), Some(&json!({ "city": "Cincinnati", "state": "OH" })));
    }

    #[test]
    fn test_lookup_array_index() {
        let data = bag(json!({ "tags": ["a", "b"], "authors": [{ "name": "kaw" }] }));
        assert_eq!(lookup_in(&data, "tags.1"), Some(&json!("b")));
        assert_eq!(lookup_in(&data, "authors.0.name"), Some(&json!("kaw")));
        assert_eq!(lookup_in(&data, "tags.2"), None);
        assert_eq!(lookup_in(&data, "tags.first"), None);
    }

    #[test]
    fn test_lookup_missing_segment() {
        let data = bag(json!({ "address": { "city": "Cincinnati" } }));
        assert_eq!(lookup_in(&data, "address.zip"), None);
        assert_eq!(lookup_in(&data, "location.city"), None);
        // descending into a scalar
        assert_eq!(lookup_in(&data, "address.city.name"), None);
    }

    #[test]
    fn test_value_to_key() {
        assert_eq!(value_to_key(&json!("feature")), Some("feature".to_string()));
        assert_eq!(value_to_key(&json!(2014)), Some("2014".to_string()));
        assert_eq!(value_to_key(&json!(true)), Some("true".to_string()));
        assert_eq!(value_to_key(&json!(null)), None);
        assert_eq!(value_to_key(&json!(["a"])), None);
    }
}
