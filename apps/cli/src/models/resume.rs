use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Location members that make up a street address.
pub const STREET_ADDRESS_MEMBERS: [&str; 2] = ["address", "postalCode"];

/// A loaded resume document.
///
/// Only `basics` and the seven list sections are read. Section entries stay verbatim JSON
/// because their shape varies from resume to resume. A `basics` that is not an object, or
/// a section that is not a list, is treated as absent. Every other top-level field is
/// skipped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "object_or_absent")]
    pub basics: Option<Basics>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub work: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub education: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub publications: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub projects: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub skills: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub languages: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "list_or_absent")]
    pub interests: Option<Vec<Value>>,
}

/// The filter output, written in field order.
///
/// `Some(vec![])` on a section means "chosen but emptied"; `None` means "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basics: Option<Basics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<Value>>,
}

fn object_or_absent<'de, D>(deserializer: D) -> Result<Option<Basics>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(members)) => Some(Basics(members)),
        _ => None,
    })
}

fn list_or_absent<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => Some(entries),
        _ => None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Basics
// ────────────────────────────────────────────────────────────────────────────

/// The `basics` object, members kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Basics(Map<String, Value>);

impl Basics {
    /// A member that is set to a meaningful value. `null`, `""`, `0` and `false` count as unset.
    pub fn member(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_set(value))
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(text_of)
    }

    /// The location object. Any other shape counts as no location.
    pub fn location(&self) -> Option<&Map<String, Value>> {
        self.member("location").and_then(Value::as_object)
    }

    pub fn profiles(&self) -> &[Value] {
        self.0
            .get("profiles")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn has_street_address(location: &Map<String, Value>) -> bool {
    location.get("address").is_some_and(is_set)
}

/// Copy of `location` without `address` and `postalCode`. Every other member survives in
/// its original position.
pub fn without_street_address(location: &Map<String, Value>) -> Map<String, Value> {
    location
        .iter()
        .filter(|(key, _)| !STREET_ADDRESS_MEMBERS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Field lookups
// ────────────────────────────────────────────────────────────────────────────

/// Whether a member carries a usable value.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display text of a set member. Strings show as-is, anything else as compact JSON.
pub fn text_of(value: &Value) -> Option<String> {
    if !is_set(value) {
        return None;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Walks an ordered fallback chain of member names on `entry` and returns the first set
/// value as text, or `default`. Entries that are not objects have no members.
pub fn first_present(entry: &Value, chain: &[&str], default: &str) -> String {
    chain
        .iter()
        .find_map(|key| entry.get(*key).and_then(text_of))
        .unwrap_or_else(|| default.to_string())
}
