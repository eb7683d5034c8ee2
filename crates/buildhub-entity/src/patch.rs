//! Helpers for partial-update commands.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicit null".
///
/// Used with `#[serde(default, deserialize_with = "double_option")]`:
/// a missing key yields `None`, `null` yields `Some(None)`, and a value
/// yields `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let cleared: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description":"rev B"}"#).unwrap();
        assert_eq!(set.description, Some(Some("rev B".to_string())));
    }
}
