//! One titled unit of guide content, as returned by the text model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_CONTENT: &str = "No content";

/// Wraps whatever JSON value the model produced for a segment. Nothing about
/// the shape is checked, so every accessor tolerates missing or odd fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuideSegment(Value);

impl GuideSegment {
    pub fn new(title: &str, content: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.to_string()));
        fields.insert("content".to_string(), Value::String(content.to_string()));
        Self(Value::Object(fields))
    }

    pub fn with_description(mut self, description: &str) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(
                "description".to_string(),
                Value::String(description.to_string()),
            );
        }
        self
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Text of a field. Strings come back verbatim, other non-null values as
    /// their JSON text. Missing or null fields yield `None`.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.field("title")
    }

    pub fn description(&self) -> Option<String> {
        self.field("description")
    }

    pub fn content(&self) -> Option<String> {
        self.field("content")
    }

    pub fn display_title(&self) -> String {
        self.title().unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn display_description(&self) -> String {
        self.description()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }

    pub fn display_content(&self) -> String {
        self.content().unwrap_or_else(|| NO_CONTENT.to_string())
    }
}
