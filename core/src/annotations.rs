//! Annotation support for LinkML schemas
//!
//! Annotations are arbitrary key-value pairs that can be attached to any
//! LinkML schema element. The key is the annotation *tag*; the usage report
//! turns every tag found in a schema into an extra column.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value types for annotations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// String value
    String(String),
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(serde_json::Number),
    /// Array of values
    Array(Vec<AnnotationValue>),
    /// Object/map of values, including the expanded `{tag, value}` form
    Object(IndexMap<String, AnnotationValue>),
    /// Null value
    Null,
}

/// A collection of annotations keyed by tag
pub type Annotations = IndexMap<String, AnnotationValue>;

impl AnnotationValue {
    /// The effective value of the annotation.
    ///
    /// LinkML allows both `tag: value` and `tag: {tag: ..., value: ...}`; the
    /// expanded form is unwrapped to its `value`.
    #[must_use]
    pub fn effective(&self) -> &AnnotationValue {
        match self {
            AnnotationValue::Object(map) => map.get("value").unwrap_or(self),
            other => other,
        }
    }
}

/// Trait for elements that can have annotations
pub trait Annotatable {
    /// Get the annotations for this element
    fn annotations(&self) -> Option<&Annotations>;

    /// Get a specific annotation value
    fn get_annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations()?.get(key)
    }

    /// Check if an annotation exists
    fn has_annotation(&self, key: &str) -> bool {
        self.annotations().is_some_and(|a| a.contains_key(key))
    }

    /// Tags of all annotations on this element, in declaration order
    fn annotation_tags(&self) -> Vec<&str> {
        self.annotations()
            .map(|a| a.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::String(s.to_string())
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Bool(b)
    }
}

impl From<i32> for AnnotationValue {
    fn from(n: i32) -> Self {
        AnnotationValue::Number(n.into())
    }
}

impl From<AnnotationValue> for Value {
    fn from(value: AnnotationValue) -> Self {
        match value {
            AnnotationValue::String(s) => Value::String(s),
            AnnotationValue::Bool(b) => Value::Bool(b),
            AnnotationValue::Number(n) => Value::Number(n),
            AnnotationValue::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            AnnotationValue::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            AnnotationValue::Null => Value::Null,
        }
    }
}
