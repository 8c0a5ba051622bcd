//! Input normalization.
//!
//! The service accepts one thing on the wire: a flat ordered list of
//! `{id, text}` documents. Callers hand us anything from a single string
//! to arbitrarily nested collections of records; this module folds all of
//! it into that flat list. The shapes are a closed sum type, so the typed
//! path cannot fail; the dynamic JSON boundary (`from_value`) is where
//! unsupported shapes are rejected.

use crate::types::Document;
use crate::{Error, Result};
use serde_json::Value;

/// Caller-supplied input in any of its accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisInput {
    /// A bare string, assigned id 1.
    Text(String),
    /// A single ready-made document.
    Record(Document),
    /// A collection of inputs, flattened depth-first.
    Many(Vec<AnalysisInput>),
}

impl AnalysisInput {
    /// Flatten into the wire-level document list, preserving left-to-right
    /// depth-first order.
    pub fn convert(self) -> Vec<Document> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Document>) {
        match self {
            AnalysisInput::Text(text) => out.push(Document::new(1, text)),
            AnalysisInput::Record(doc) => out.push(doc),
            AnalysisInput::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Convert untyped JSON into an input.
    ///
    /// Strings and `{id, text}` objects map to their typed shapes; arrays
    /// recurse with null elements dropped silently. Anything else is an
    /// `UnsupportedInput` naming the offending JSON type.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(AnalysisInput::Text(s.clone())),
            Value::Object(_) => {
                let doc: Document = serde_json::from_value(value.clone()).map_err(|_| {
                    Error::UnsupportedInput {
                        type_name: "object (expected {id, text})".to_string(),
                    }
                })?;
                Ok(AnalysisInput::Record(doc))
            }
            Value::Array(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    converted.push(Self::from_value(item)?);
                }
                Ok(AnalysisInput::Many(converted))
            }
            Value::Number(_) => Err(Error::UnsupportedInput {
                type_name: "number".to_string(),
            }),
            Value::Bool(_) => Err(Error::UnsupportedInput {
                type_name: "boolean".to_string(),
            }),
            Value::Null => Err(Error::UnsupportedInput {
                type_name: "null".to_string(),
            }),
        }
    }
}

impl From<&str> for AnalysisInput {
    fn from(text: &str) -> Self {
        AnalysisInput::Text(text.to_string())
    }
}

impl From<String> for AnalysisInput {
    fn from(text: String) -> Self {
        AnalysisInput::Text(text)
    }
}

impl From<Document> for AnalysisInput {
    fn from(doc: Document) -> Self {
        AnalysisInput::Record(doc)
    }
}

impl From<Vec<Document>> for AnalysisInput {
    fn from(docs: Vec<Document>) -> Self {
        AnalysisInput::Many(docs.into_iter().map(AnalysisInput::Record).collect())
    }
}
