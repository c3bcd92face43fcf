//! Enumerated raw value ↔ label tables
//!
//! A mapping is built once from the register table entry (`"10": "Off"`)
//! into two lookup tables:
//!
//! - raw integer → canonical upper-case label, for decoding
//! - lower-cased label → raw integer, for case-insensitive assignment

use std::collections::{BTreeMap, HashMap};

use crate::error::{CoilflowError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoilMapping {
    by_raw: BTreeMap<i64, String>,
    by_label: HashMap<String, i64>,
}

impl CoilMapping {
    /// Build the lookup tables from `(raw key, display label)` pairs
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a key is not an integer, if two keys
    /// denote the same integer (`"10"` and `"010"`), or if two keys share a
    /// label once case is ignored.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::default();

        for (key, label) in entries {
            let key = key.as_ref();
            let label = label.as_ref();
            let raw: i64 = key.trim().parse().map_err(|_| {
                CoilflowError::ConfigError(format!("Mapping key '{key}' is not an integer"))
            })?;

            if let Some(previous) = mapping.by_label.insert(label.to_lowercase(), raw) {
                return Err(CoilflowError::ConfigError(format!(
                    "Mapping label '{label}' is used by both {previous} and {raw}"
                )));
            }
            if let Some(previous) = mapping.by_raw.insert(raw, label.to_uppercase()) {
                return Err(CoilflowError::ConfigError(format!(
                    "Mapping key '{key}' aliases raw value {raw} already labelled '{previous}'"
                )));
            }
        }

        Ok(mapping)
    }

    pub fn len(&self) -> usize {
        self.by_raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_raw.is_empty()
    }

    /// Canonical label for a raw integer
    pub fn label_for(&self, raw: i64) -> Option<&str> {
        self.by_raw.get(&raw).map(String::as_str)
    }

    /// Raw integer for a label, ignoring case
    pub fn raw_for(&self, label: &str) -> Option<i64> {
        self.by_label.get(&label.to_lowercase()).copied()
    }

    /// Canonical form of a label given in any case
    pub fn canonical_label(&self, label: &str) -> Option<&str> {
        self.raw_for(label).and_then(|raw| self.label_for(raw))
    }

    /// Raw integer for an already canonical (upper-case) label
    pub fn raw_for_canonical(&self, label: &str) -> Option<i64> {
        self.by_raw
            .iter()
            .find(|(_, canonical)| canonical.as_str() == label)
            .map(|(raw, _)| *raw)
    }

    /// Canonical labels in raw value order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_raw.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.by_raw.iter().map(|(raw, label)| (*raw, label.as_str()))
    }
}
