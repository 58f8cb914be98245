//! Record rows returned by a record-collection backend.
//!
//! A [`Record`] is a stable identity plus a set of named attribute values.
//! Attribute values are [`serde_json::Value`]s so backends can carry
//! whatever column types they have without the lookup core caring.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Record
// ============================================================================

/// One row of a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    values: Map<String, Value>,
}

impl Record {
    /// Creates a record with the given identity and no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Map::new(),
        }
    }

    /// Creates a record from an identity and a prebuilt attribute map.
    #[must_use]
    pub fn with_values(id: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// Sets an attribute value, replacing any prior value under that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The stable identity of this row.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All attribute values, keyed by name.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Raw attribute value, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Text projection of an attribute, used for matching and display.
    ///
    /// Strings come back verbatim; numbers and booleans are formatted;
    /// null and missing attributes yield `None`.
    #[must_use]
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
