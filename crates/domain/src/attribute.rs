//! Loosely typed field values carried by creation parameters and
//! modification requests.
//!
//! Callers (a CLI, a config file, an HTTP body) hand over field names and
//! raw values; each device type decides what the values mean.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named fields of a creation or modification request.
///
/// Ordered by name so validation reports errors deterministically.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single raw field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view, widening integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Build an [`Attributes`] map from `(name, value)` pairs.
pub fn attributes<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_integer_as_int_variant() {
        let val: AttributeValue = serde_json::from_str("50").unwrap();
        assert_eq!(val, AttributeValue::Int(50));
    }

    #[test]
    fn should_deserialize_fraction_as_float_variant() {
        let val: AttributeValue = serde_json::from_str("68.5").unwrap();
        assert_eq!(val, AttributeValue::Float(68.5));
    }

    #[test]
    fn should_deserialize_string_variant() {
        let val: AttributeValue = serde_json::from_str("\"on\"").unwrap();
        assert_eq!(val.as_str(), Some("on"));
    }

    #[test]
    fn should_widen_int_when_read_as_float() {
        assert_eq!(AttributeValue::Int(68).as_f64(), Some(68.0));
        assert_eq!(AttributeValue::from("68").as_f64(), None);
    }

    #[test]
    fn should_not_read_float_as_int() {
        assert_eq!(AttributeValue::Float(50.0).as_i64(), None);
    }

    #[test]
    fn should_build_request_from_pairs() {
        let request = attributes([("power", "on")]);
        assert_eq!(request.get("power"), Some(&AttributeValue::from("on")));
    }

    #[test]
    fn should_deserialize_request_from_json_object() {
        let request: Attributes =
            serde_json::from_str(r#"{"power": "on", "brightness": 75}"#).unwrap();
        assert_eq!(request.len(), 2);
        assert_eq!(request["brightness"], AttributeValue::Int(75));
    }
}
