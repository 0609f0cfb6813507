//! Serde helpers for fields the API does not type consistently.
//!
//! Use with `#[serde(default, deserialize_with = "lenient::...")]`. Each
//! helper accepts any JSON value and maps values of the wrong shape to the
//! field's default instead of failing the enclosing record.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Record {
//!     #[serde(default, deserialize_with = "lenient::number")]
//!     order: u32,
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Unsigned number; numeric strings are parsed, anything else is `0`.
pub(crate) fn number<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let value = match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(value
        .and_then(|v| T::try_from(v).ok())
        .unwrap_or_default())
}

/// Optional text; numbers and booleans are stringified, anything else is `None`.
pub(crate) fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Value parsed from JSON, or its default when it does not match.
pub(crate) fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(d)?).unwrap_or_default())
}

/// Array whose elements are decoded one at a time; undecodable elements are
/// logged and skipped so their siblings survive. `null` is an empty array.
pub(crate) fn elements<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(values) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable element");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Record {
        #[serde(default, deserialize_with = "number")]
        order: u32,
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "elements")]
        items: Vec<u8>,
    }

    fn decode(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number() {
        assert_eq!(decode(r#"{"order": 3}"#).order, 3);
        assert_eq!(decode(r#"{"order": " 4 "}"#).order, 4);
        assert_eq!(decode(r#"{"order": null}"#).order, 0);
        assert_eq!(decode(r#"{"order": -1}"#).order, 0);
        assert_eq!(decode(r#"{"order": 5000000000}"#).order, 0);
        assert_eq!(decode("{}").order, 0);
    }

    #[test]
    fn test_text() {
        assert_eq!(decode(r#"{"label": "a"}"#).label.as_deref(), Some("a"));
        assert_eq!(decode(r#"{"label": 42}"#).label.as_deref(), Some("42"));
        assert_eq!(decode(r#"{"label": {"x": 1}}"#).label, None);
    }

    #[test]
    fn test_elements_skip_bad_entries() {
        assert_eq!(decode(r#"{"items": [1, "x", 2, null, 300]}"#).items, vec![1, 2]);
        assert_eq!(decode(r#"{"items": null}"#).items, Vec::<u8>::new());
    }
}
