//! Default-merge decoding for saved blobs
//!
//! A saved object is overlaid on the serialized defaults one field at a time.
//! Unknown fields are dropped and a field whose value no longer decodes keeps
//! its default, so a damaged save degrades instead of resetting everything.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode `json` as `T`, falling back to `T::default()` field by field
pub fn merge_over_defaults<T>(json: &str) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let saved = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::warn!("Saved blob is not an object, using defaults");
            return T::default();
        }
        Err(e) => {
            log::warn!("Saved blob is not valid JSON ({e}), using defaults");
            return T::default();
        }
    };

    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => return T::default(),
    };

    for (key, value) in saved {
        if !merged.contains_key(&key) {
            log::debug!("Ignoring unknown saved field `{key}`");
            continue;
        }
        let previous = merged.insert(key.clone(), value);
        if decode::<T>(&merged).is_none() {
            log::warn!("Ignoring malformed saved field `{key}`");
            if let Some(previous) = previous {
                merged.insert(key, previous);
            }
        }
    }

    decode(&merged).unwrap_or_default()
}

/// Decode a JSON array element by element, skipping entries that fail
pub fn decode_list<T: DeserializeOwned>(json: &str) -> Vec<T> {
    let items = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::warn!("Saved list is not an array, starting empty");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("Saved list is not valid JSON ({e}), starting empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping malformed saved entry: {e}");
                None
            }
        })
        .collect()
}

fn decode<T: DeserializeOwned>(map: &Map<String, Value>) -> Option<T> {
    serde_json::from_value(Value::Object(map.clone())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        level: u32,
        badge: Option<String>,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                name: "pet".to_string(),
                level: 1,
                badge: None,
            }
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let sample: Sample = merge_over_defaults(r#"{"level": 7}"#);
        assert_eq!(sample.name, "pet");
        assert_eq!(sample.level, 7);
    }

    #[test]
    fn test_bad_field_keeps_default() {
        let sample: Sample = merge_over_defaults(r#"{"level": "high", "name": "rex"}"#);
        assert_eq!(sample.level, 1);
        assert_eq!(sample.name, "rex");
    }

    #[test]
    fn test_optional_field_round_trips() {
        let sample: Sample = merge_over_defaults(r#"{"badge": "gold"}"#);
        assert_eq!(sample.badge.as_deref(), Some("gold"));
    }

    #[test]
    fn test_garbage_is_default() {
        assert_eq!(merge_over_defaults::<Sample>("not json"), Sample::default());
        assert_eq!(merge_over_defaults::<Sample>("[1, 2]"), Sample::default());
    }

    #[test]
    fn test_decode_list_skips_bad_entries() {
        let values: Vec<u32> = decode_list(r#"[1, "two", 3]"#);
        assert_eq!(values, vec![1, 3]);
        assert!(decode_list::<u32>("{}").is_empty());
    }
}
