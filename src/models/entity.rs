use serde::Serialize;
use serde_json::{Map, Value};

use super::kind::EntityKind;

/// Placeholder for display fields the backend did not send
pub const MISSING: &str = "N/A";

/// An opaque backend record, passed through unchanged.
///
/// Only the display layer looks inside, and every read has a fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    #[serde(skip)]
    kind: EntityKind,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Entity {
    pub fn new(kind: EntityKind, fields: Map<String, Value>) -> Self {
        Self { kind, fields }
    }

    /// Wrap a JSON value; non-objects become an empty record
    pub fn from_value(kind: EntityKind, value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(kind, fields),
            _ => Self::new(kind, Map::new()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Opaque id: `_id` when present, else `id`
    pub fn id(&self) -> Option<&str> {
        ["_id", "id"]
            .iter()
            .filter_map(|k| self.fields.get(*k).and_then(Value::as_str))
            .next()
    }

    /// Raw value at a dotted path such as `landlord.name`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.fields.get(first)?, |value, segment| value.get(segment))
    }

    /// Display text for a column key
    pub fn display(&self, key: &str) -> String {
        match (self.kind, key) {
            (_, "id") => self.id().unwrap_or(MISSING).to_string(),
            (EntityKind::Property, "bhk") => match self.get("bhk_type") {
                Some(Value::Array(items)) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
                Some(value) => text_or_missing(Some(value)),
                None => MISSING.to_string(),
            },
            (EntityKind::Property, "rent") => match self.get("rent_amount") {
                Some(Value::Null) | None => "0".to_string(),
                value => text_or_missing(value),
            },
            (EntityKind::Property, "status") => {
                let deleted = self.get("is_deleted").and_then(Value::as_bool).unwrap_or(false);
                let status = if deleted { "Inactive" } else { "Active" };
                status.to_string()
            }
            _ => text_or_missing(self.get(key)),
        }
    }

    /// Case-insensitive substring match over the kind's searchable columns.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.kind
            .search_keys()
            .any(|key| self.display(key).to_lowercase().contains(needle))
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn text_or_missing(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING.to_string(),
        Some(value) => scalar_text(value),
    }
}
