use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use coilflow_raw::WidthClass;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::coil::{Coil, CoilDefinition};
use crate::error::{CoilflowError, Result};

fn default_factor() -> u32 {
    1
}

fn default_word_swap() -> bool {
    true
}

/// One entry of a register table, keyed by address in the enclosing object
///
/// ```json
/// "40004": {
///     "title": "BT1 Outdoor Temperature",
///     "unit": "°C",
///     "factor": 10,
///     "size": "s16",
///     "name": "bt1-outdoor-temperature-40004"
/// }
/// ```
///
/// Keys not listed here are kept verbatim as extensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilConfig {
    pub name: String,
    pub title: String,
    pub size: String,
    #[serde(default = "default_factor")]
    pub factor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub write: bool,
    #[serde(default = "default_word_swap")]
    pub word_swap: bool,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl CoilConfig {
    /// Validate the entry and turn it into a definition
    pub fn into_definition(self, address: u32) -> Result<CoilDefinition> {
        let width: WidthClass = self.size.parse().map_err(|e| {
            CoilflowError::ConfigError(format!("Coil {address} ({}): {e}", self.name))
        })?;

        let mut builder = CoilDefinition::builder(address, self.name, self.title, width)
            .factor(self.factor)
            .writable(self.write)
            .word_swap(self.word_swap)
            .extensions(self.extensions);

        if let Some(min) = self.min {
            builder = builder.min(min);
        }
        if let Some(max) = self.max {
            builder = builder.max(max);
        }
        if let Some(unit) = self.unit.filter(|u| !u.is_empty()) {
            builder = builder.unit(unit);
        }
        if let Some(info) = self.info.filter(|i| !i.is_empty()) {
            builder = builder.info(info);
        }
        if let Some(mappings) = self.mappings {
            builder = builder.mappings(mappings);
        }

        builder.build()
    }
}

/// Table entries in document order, repeated keys included
struct TableEntries(Vec<(String, CoilConfig)>);

impl<'de> Deserialize<'de> for TableEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TableEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of coil entries keyed by address")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, CoilConfig>()? {
                    entries.push(entry);
                }
                Ok(TableEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Register definitions keyed by address
#[derive(Debug, Clone, Default)]
pub struct CoilTable {
    coils: BTreeMap<u32, Arc<CoilDefinition>>,
}

impl CoilTable {
    /// Load a table from a JSON object of `"address": { entry }` pairs
    ///
    /// An address given twice, literally or as an alias such as `"1"` and
    /// `"01"`, is a configuration error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let TableEntries(entries) = serde_json::from_str(json)?;
        let mut coils = BTreeMap::new();

        for (key, entry) in entries {
            let address: u32 = key.trim().parse().map_err(|_| {
                CoilflowError::ParseError(format!("Invalid coil address '{key}'"))
            })?;

            let definition = entry.into_definition(address)?;
            if coils.insert(address, Arc::new(definition)).is_some() {
                return Err(CoilflowError::ConfigError(format!(
                    "Duplicate coil address {address}"
                )));
            }
        }

        tracing::info!("Loaded {} coil definitions", coils.len());
        Ok(Self { coils })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading coil table from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, definition: CoilDefinition) -> Option<Arc<CoilDefinition>> {
        self.coils.insert(definition.address(), Arc::new(definition))
    }

    pub fn get(&self, address: u32) -> Option<&CoilDefinition> {
        self.coils.get(&address).map(Arc::as_ref)
    }

    /// Look a definition up by its unique name
    pub fn find(&self, name: &str) -> Option<&CoilDefinition> {
        self.coils
            .values()
            .map(Arc::as_ref)
            .find(|definition| definition.name() == name)
    }

    /// A fresh, empty coil for the given address
    pub fn coil(&self, address: u32) -> Result<Coil> {
        self.coils
            .get(&address)
            .map(|definition| Coil::from_shared(Arc::clone(definition)))
            .ok_or(CoilflowError::UnknownAddress(address))
    }

    pub fn len(&self) -> usize {
        self.coils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coils.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoilDefinition> {
        self.coils.values().map(Arc::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_and_extensions() {
        let config: CoilConfig = serde_json::from_str(
            r#"{"name": "test_name", "title": "test_title", "size": "u8", "unknown": "some other"}"#,
        )
        .unwrap();

        assert_eq!(config.factor, 1);
        assert!(config.word_swap);
        assert!(!config.write);
        assert_eq!(
            config.extensions.get("unknown"),
            Some(&serde_json::json!("some other"))
        );

        let definition = config.into_definition(123).unwrap();
        assert_eq!(definition.address(), 123);
        assert_eq!(definition.width(), WidthClass::U8);
        assert_eq!(
            definition.extension("unknown"),
            Some(&serde_json::json!("some other"))
        );
    }

    #[test]
    fn test_empty_unit_is_dropped() {
        let config: CoilConfig =
            serde_json::from_str(r#"{"name": "a", "title": "A", "size": "s16", "unit": ""}"#)
                .unwrap();
        assert_eq!(config.into_definition(1).unwrap().unit(), None);
    }

    #[test]
    fn test_unknown_size_is_config_error() {
        let config: CoilConfig =
            serde_json::from_str(r#"{"name": "a", "title": "A", "size": "f32"}"#).unwrap();
        let err = config.into_definition(1).unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(msg) if msg.contains("f32")));
    }

    #[test]
    fn test_table_rejects_bad_address() {
        let err = CoilTable::from_json_str(r#"{"abc": {"name": "a", "title": "A", "size": "u8"}}"#)
            .unwrap_err();
        assert!(matches!(err, CoilflowError::ParseError(_)));
    }

    #[test]
    fn test_table_rejects_repeated_address() {
        let json = r#"{
            "40004": {"name": "a", "title": "A", "size": "s16"},
            "40004": {"name": "b", "title": "B", "size": "u8"}
        }"#;
        let err = CoilTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(msg) if msg.contains("40004")));
    }

    #[test]
    fn test_table_rejects_aliased_address() {
        let json = r#"{
            "1": {"name": "a", "title": "A", "size": "u8"},
            "01": {"name": "b", "title": "B", "size": "u8"}
        }"#;
        assert!(matches!(
            CoilTable::from_json_str(json),
            Err(CoilflowError::ConfigError(_))
        ));
    }

    #[test]
    fn test_table_rejects_non_object() {
        assert!(matches!(
            CoilTable::from_json_str("[]"),
            Err(CoilflowError::JsonError(_))
        ));
    }

    #[test]
    fn test_table_rejects_malformed_json() {
        assert!(matches!(
            CoilTable::from_json_str("{"),
            Err(CoilflowError::JsonError(_))
        ));
    }

    #[test]
    fn test_coil_for_unknown_address() {
        let table = CoilTable::default();
        assert!(table.is_empty());
        assert!(matches!(
            table.coil(40004),
            Err(CoilflowError::UnknownAddress(40004))
        ));
    }

    #[test]
    fn test_insert() {
        let mut table = CoilTable::default();
        let definition = CoilDefinition::builder(5, "five", "Five", WidthClass::U8)
            .build()
            .unwrap();
        assert!(table.insert(definition).is_none());
        assert_eq!(table.len(), 1);
        assert_eq!(table.find("five").map(CoilDefinition::address), Some(5));
    }
}
