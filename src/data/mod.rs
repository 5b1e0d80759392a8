//! Structured side-file keyed by canonical element identifier.

mod resolve;

use std::collections::BTreeMap;

use crate::foundation::error::{AnimapperError, AnimapperResult};

pub use resolve::{canonical_candidates, resolve};

/// One entry of the data resource. Any JSON value is accepted; only `title` is interpreted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DataRecord(pub serde_json::Value);

impl DataRecord {
    /// Human-readable hint used as the element tooltip.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(serde_json::Value::as_str)
    }

    /// Arbitrary field lookup for click handlers.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Mapping from canonical identifier to record. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DataRecords(BTreeMap<String, DataRecord>);

impl DataRecords {
    /// Parse the data resource. The top level must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> AnimapperResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| AnimapperError::data_parse(format!("parse data JSON: {e}")))
    }

    pub fn from_str_json(text: &str) -> AnimapperResult<Self> {
        Self::from_slice(text.as_bytes())
    }

    pub fn get(&self, key: &str) -> Option<&DataRecord> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, DataRecord)> for DataRecords {
    fn from_iter<I: IntoIterator<Item = (String, DataRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/records.rs"]
mod tests;
