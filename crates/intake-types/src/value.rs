//! Runtime values entered into a form and the payload sent on submit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator used when a multi-value selection is flattened to one string.
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Current value of a field.
///
/// Single-value inputs (text, select, radio, ...) hold a string; checkbox
/// groups hold the selected option values in option declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Empty string, empty selection, or whitespace only.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(s) => s.trim().is_empty(),
            FieldValue::Multi(items) => items.is_empty(),
        }
    }

    /// Flatten to the string form used for comparisons and transport.
    pub fn as_joined(&self) -> String {
        match self {
            FieldValue::Single(s) => s.clone(),
            FieldValue::Multi(items) => items.join(MULTI_VALUE_SEPARATOR),
        }
    }

    /// The empty value of the same shape.
    pub fn cleared(&self) -> FieldValue {
        match self {
            FieldValue::Single(_) => FieldValue::Single(String::new()),
            FieldValue::Multi(_) => FieldValue::Multi(Vec::new()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Single(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Single(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Multi(items)
    }
}

/// Field id → flattened value, for every visible non-empty field, in form
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(IndexMap<String, String>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field_id.into(), value.into());
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(FieldValue::from("   \t").is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" x ").is_empty());
        assert!(FieldValue::Multi(vec![]).is_empty());
        assert!(!FieldValue::Multi(vec!["a".to_string()]).is_empty());
    }

    #[test]
    fn test_multi_value_joins_with_comma() {
        let value = FieldValue::Multi(vec!["youth".to_string(), "choir".to_string()]);
        assert_eq!(value.as_joined(), "youth, choir");
    }

    #[test]
    fn test_cleared_keeps_shape() {
        assert_eq!(FieldValue::from("abc").cleared(), FieldValue::from(""));
        assert_eq!(
            FieldValue::Multi(vec!["a".to_string()]).cleared(),
            FieldValue::Multi(vec![])
        );
    }

    #[test]
    fn test_untagged_deserialize() {
        let single: FieldValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(single, FieldValue::from("hello"));
        let multi: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(multi, FieldValue::Multi(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_payload_serializes_as_flat_object() {
        let mut payload = Payload::new();
        payload.insert("name", "Ada");
        payload.insert("email", "ada@example.org");
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"name":"Ada","email":"ada@example.org"}"#
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["email"], "ada@example.org");
        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["name", "email"]);
    }
}
