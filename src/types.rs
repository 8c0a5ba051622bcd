//! Core wire and caller-facing types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single document submitted for analysis.
///
/// `id` is caller-assigned (typically the identity of the originating
/// entity) and must be unique within a batch; the service echoes it back
/// so responses can be re-associated with their source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub text: String,
}

impl Document {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// One record returned by the service for one document.
///
/// The per-document fields are open-ended (scores, phrases, recognized
/// entities, ...) so the record stays a raw JSON map; only the `id` field
/// has a contract, enforced during correlation.
pub type ResponseRecord = serde_json::Map<String, serde_json::Value>;

/// The seam to the caller's record store.
///
/// Callers supply anything with a numeric identity and named string
/// properties; the batcher pulls the text to analyze out of one named
/// property, and the correlator finds entities back by identity.
pub trait Entity {
    fn identity(&self) -> i64;
    fn property(&self, name: &str) -> Option<&str>;
}

/// Plain owned entity for tests and callers without their own store.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub id: i64,
    pub properties: HashMap<String, String>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl Entity for Record {
    fn identity(&self) -> i64 {
        self.id
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
