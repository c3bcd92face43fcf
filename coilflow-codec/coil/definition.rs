use std::collections::BTreeMap;

use coilflow_raw::WidthClass;

use super::mapping::CoilMapping;
use crate::error::{CoilflowError, Result};

/// Static description of a single register
///
/// Built once through [`CoilDefinition::builder`] (or from a register
/// table entry) and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CoilDefinition {
    pub(super) address: u32,
    pub(super) name: String,
    pub(super) title: String,
    pub(super) width: WidthClass,
    pub(super) factor: u32,
    pub(super) raw_min: Option<i64>,
    pub(super) raw_max: Option<i64>,
    pub(super) unit: Option<String>,
    pub(super) info: Option<String>,
    pub(super) mappings: Option<CoilMapping>,
    pub(super) writable: bool,
    pub(super) word_swap: bool,
    pub(super) extensions: BTreeMap<String, serde_json::Value>,
}

impl CoilDefinition {
    pub fn builder(
        address: u32,
        name: impl Into<String>,
        title: impl Into<String>,
        width: WidthClass,
    ) -> CoilDefinitionBuilder {
        CoilDefinitionBuilder {
            address,
            name: name.into(),
            title: title.into(),
            width,
            factor: 1,
            raw_min: None,
            raw_max: None,
            unit: None,
            info: None,
            mappings: None,
            writable: false,
            word_swap: true,
            extensions: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> WidthClass {
        self.width
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn raw_min(&self) -> Option<i64> {
        self.raw_min
    }

    pub fn raw_max(&self) -> Option<i64> {
        self.raw_max
    }

    /// Lower engineering bound (raw minimum ÷ factor)
    pub fn min(&self) -> Option<f64> {
        self.raw_min.map(|raw| self.scale(raw))
    }

    /// Upper engineering bound (raw maximum ÷ factor)
    pub fn max(&self) -> Option<f64> {
        self.raw_max.map(|raw| self.scale(raw))
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn mappings(&self) -> Option<&CoilMapping> {
        self.mappings.as_ref()
    }

    pub fn has_mappings(&self) -> bool {
        self.mappings.is_some()
    }

    /// Label for a raw integer, if the register is mapped
    pub fn mapping_for(&self, raw: i64) -> Option<&str> {
        self.mappings.as_ref().and_then(|m| m.label_for(raw))
    }

    /// Raw integer for a label (any case), if the register is mapped
    pub fn reverse_mapping_for(&self, label: &str) -> Option<i64> {
        self.mappings.as_ref().and_then(|m| m.raw_for(label))
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn word_swap(&self) -> bool {
        self.word_swap
    }

    /// Two-state register: a two-entry mapping or raw bounds of exactly 0..=1
    pub fn is_boolean(&self) -> bool {
        self.mappings.as_ref().is_some_and(|m| m.len() == 2) || self.has_bit_bounds()
    }

    pub fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extensions
    }

    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.get(key)
    }

    pub(super) fn has_bit_bounds(&self) -> bool {
        self.raw_min == Some(0) && self.raw_max == Some(1)
    }

    /// Whether stored bytes carry the two 16-bit words in swapped order
    pub(super) fn swaps_words(&self) -> bool {
        self.word_swap && self.width.is_32bit()
    }

    #[allow(clippy::cast_precision_loss)]
    pub(super) fn scale(&self, raw: i64) -> f64 {
        raw as f64 / f64::from(self.factor)
    }
}

/// Builder for [`CoilDefinition`]
#[derive(Debug, Clone)]
pub struct CoilDefinitionBuilder {
    address: u32,
    name: String,
    title: String,
    width: WidthClass,
    factor: u32,
    raw_min: Option<i64>,
    raw_max: Option<i64>,
    unit: Option<String>,
    info: Option<String>,
    mappings: Option<Vec<(String, String)>>,
    writable: bool,
    word_swap: bool,
    extensions: BTreeMap<String, serde_json::Value>,
}

impl CoilDefinitionBuilder {
    pub fn factor(mut self, factor: u32) -> Self {
        self.factor = factor;
        self
    }

    /// Inclusive lower bound on the raw integer
    pub fn min(mut self, raw_min: i64) -> Self {
        self.raw_min = Some(raw_min);
        self
    }

    /// Inclusive upper bound on the raw integer
    pub fn max(mut self, raw_max: i64) -> Self {
        self.raw_max = Some(raw_max);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn mappings<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.mappings = Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Word order of 32-bit registers on the wire
    ///
    /// `true` (the default) means the device sends the high 16-bit word
    /// first, so `00 00 28 06` holds 1576; `false` means plain little-endian,
    /// so `28 06 00 00` holds 1576. Ignored for 1 and 2 byte registers.
    pub fn word_swap(mut self, word_swap: bool) -> Self {
        self.word_swap = word_swap;
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn extensions(mut self, extensions: BTreeMap<String, serde_json::Value>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Validate and freeze the definition
    ///
    /// # Errors
    ///
    /// Returns [`CoilflowError::ConfigError`] for a zero factor, inverted
    /// bounds, or an invalid mapping.
    pub fn build(self) -> Result<CoilDefinition> {
        if self.factor == 0 {
            return Err(CoilflowError::ConfigError(format!(
                "Coil {} ({}): factor must be positive",
                self.address, self.name
            )));
        }

        if let (Some(min), Some(max)) = (self.raw_min, self.raw_max) {
            if min > max {
                return Err(CoilflowError::ConfigError(format!(
                    "Coil {} ({}): min {min} is greater than max {max}",
                    self.address, self.name
                )));
            }
        }

        let mappings = match self.mappings {
            Some(entries) if !entries.is_empty() => Some(CoilMapping::new(entries).map_err(
                |e| match e {
                    CoilflowError::ConfigError(msg) => CoilflowError::ConfigError(format!(
                        "Coil {} ({}): {msg}",
                        self.address, self.name
                    )),
                    other => other,
                },
            )?),
            _ => None,
        };

        Ok(CoilDefinition {
            address: self.address,
            name: self.name,
            title: self.title,
            width: self.width,
            factor: self.factor,
            raw_min: self.raw_min,
            raw_max: self.raw_max,
            unit: self.unit,
            info: self.info,
            mappings,
            writable: self.writable,
            word_swap: self.word_swap,
            extensions: self.extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create() {
        let def = CoilDefinition::builder(123, "test_name", "test_title", WidthClass::U8)
            .extension("unknown", "some other")
            .build()
            .unwrap();

        assert_eq!(def.address(), 123);
        assert_eq!(def.name(), "test_name");
        assert_eq!(def.title(), "test_title");
        assert_eq!(def.width(), WidthClass::U8);
        assert_eq!(def.factor(), 1);
        assert!(def.word_swap());
        assert!(!def.is_writable());
        assert_eq!(def.extension("unknown"), Some(&serde_json::json!("some other")));
        assert_eq!(def.extension("missing"), None);
    }

    #[test]
    fn test_engineering_bounds() {
        let def = CoilDefinition::builder(123, "test", "test", WidthClass::S16)
            .factor(10)
            .min(50)
            .max(300)
            .build()
            .unwrap();

        assert_eq!(def.min(), Some(5.0));
        assert_eq!(def.max(), Some(30.0));
        assert_eq!(def.raw_min(), Some(50));
        assert_eq!(def.raw_max(), Some(300));
        assert!(!def.is_boolean());
        assert!(!def.is_writable());
    }

    #[test]
    fn test_no_bounds() {
        let def = CoilDefinition::builder(1, "a", "a", WidthClass::U16)
            .build()
            .unwrap();
        assert_eq!(def.min(), None);
        assert_eq!(def.max(), None);
    }

    #[test]
    fn test_is_boolean() {
        let mapped = CoilDefinition::builder(43024, "status-cooling-43024", "Status Cooling", WidthClass::U8)
            .mappings([("0", "Off"), ("1", "On")])
            .build()
            .unwrap();
        assert!(mapped.is_boolean());

        let bounded = CoilDefinition::builder(47050, "periodic-hw-47050", "Periodic HW", WidthClass::S8)
            .min(0)
            .max(1)
            .writable(true)
            .build()
            .unwrap();
        assert!(bounded.is_boolean());
        assert!(bounded.is_writable());

        let three = CoilDefinition::builder(1, "a", "a", WidthClass::U8)
            .mappings([("0", "A"), ("1", "B"), ("2", "C")])
            .build()
            .unwrap();
        assert!(!three.is_boolean());

        let wider = CoilDefinition::builder(1, "a", "a", WidthClass::U8)
            .min(0)
            .max(2)
            .build()
            .unwrap();
        assert!(!wider.is_boolean());
    }

    #[test]
    fn test_mapping_accessors() {
        let def = CoilDefinition::builder(1, "a", "a", WidthClass::U8)
            .mappings([("10", "Off"), ("20", "Hot Water")])
            .build()
            .unwrap();
        assert!(def.has_mappings());
        assert_eq!(def.mapping_for(20), Some("HOT WATER"));
        assert_eq!(def.reverse_mapping_for("hot water"), Some(20));
        assert_eq!(def.reverse_mapping_for("beer"), None);
    }

    #[test]
    fn test_empty_mapping_is_unmapped() {
        let def = CoilDefinition::builder(1, "a", "a", WidthClass::U8)
            .mappings(Vec::<(String, String)>::new())
            .build()
            .unwrap();
        assert!(!def.has_mappings());
    }

    #[test]
    fn test_build_rejects_zero_factor() {
        let err = CoilDefinition::builder(7, "a", "a", WidthClass::U8)
            .factor(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(msg) if msg.contains("factor")));
    }

    #[test]
    fn test_build_rejects_inverted_bounds() {
        let err = CoilDefinition::builder(7, "a", "a", WidthClass::U8)
            .min(10)
            .max(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(_)));
    }

    #[test]
    fn test_build_rejects_bad_mapping() {
        let err = CoilDefinition::builder(7, "prio", "Prio", WidthClass::U8)
            .mappings([("x", "Off")])
            .build()
            .unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(msg) if msg.starts_with("Coil 7 (prio)")));
    }

    #[test]
    fn test_build_rejects_aliased_mapping_keys() {
        let err = CoilDefinition::builder(123, "prio-43086", "Prio", WidthClass::U8)
            .mappings([("10", "Off"), ("010", "Heat")])
            .build()
            .unwrap_err();
        assert!(matches!(err, CoilflowError::ConfigError(msg) if msg.contains("aliases raw value 10")));
    }
}
