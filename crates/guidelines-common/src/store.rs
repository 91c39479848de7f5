//! File-backed guideline store.
//!
//! The store is a JSON object mapping disaster type to guideline content of any shape.
//! It is re-read on every call; nothing is cached, so edits to the file are visible to
//! the next lookup. Concurrent callers each do their own read.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::StoreError;

pub const DEFAULT_STORE_PATH: &str = "gov_guidelines.json";
pub const FALLBACK_MESSAGE: &str = "No official guidelines available for this disaster.";

/// The record returned for a disaster type the store does not contain.
pub fn fallback_record() -> Value {
    json!({ "message": FALLBACK_MESSAGE })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Value),
    Missing,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Stored content, or the fallback record when missing.
    pub fn into_value(self) -> Value {
        match self {
            Self::Found(value) => value,
            Self::Missing => fallback_record(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuidelineStore {
    path: PathBuf,
}

impl GuidelineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up `disaster_type` by exact key match.
    pub fn lookup(&self, disaster_type: &str) -> Result<Lookup, StoreError> {
        let mut entries = self.load()?;
        let lookup = match entries.remove(disaster_type) {
            Some(value) => Lookup::Found(value),
            None => Lookup::Missing,
        };
        debug!(disaster_type, found = lookup.is_found(), "guideline lookup");
        Ok(lookup)
    }

    pub fn get_guidelines(&self, disaster_type: &str) -> Result<Value, StoreError> {
        self.lookup(disaster_type).map(Lookup::into_value)
    }

    /// All disaster types present in the store, sorted.
    pub fn disaster_types(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.load()?.into_iter().map(|(k, _)| k).collect();
        keys.sort_unstable();
        Ok(keys)
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read guideline store");

        // Decoding straight into a map rejects a top-level array or scalar.
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for GuidelineStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

/// One-shot lookup against the store at `path`.
pub fn get_guidelines(path: impl AsRef<Path>, disaster_type: &str) -> Result<Value, StoreError> {
    GuidelineStore::new(path.as_ref()).get_guidelines(disaster_type)
}
