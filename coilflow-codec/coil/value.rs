use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical value of a coil
///
/// Numeric registers carry engineering units (raw ÷ factor); mapped
/// registers carry the upper-cased display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoilValue {
    Number(f64),
    Label(String),
}

impl CoilValue {
    /// Parse user input: anything that reads as a number is numeric
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<f64>() {
            Ok(n) => CoilValue::Number(n),
            Err(_) => CoilValue::Label(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoilValue::Number(n) => Some(*n),
            CoilValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            CoilValue::Number(_) => None,
            CoilValue::Label(label) => Some(label),
        }
    }
}

impl fmt::Display for CoilValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoilValue::Number(n) => write!(f, "{n}"),
            CoilValue::Label(label) => f.write_str(label),
        }
    }
}

impl From<f64> for CoilValue {
    fn from(value: f64) -> Self {
        CoilValue::Number(value)
    }
}

impl From<i64> for CoilValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        CoilValue::Number(value as f64)
    }
}

impl From<i32> for CoilValue {
    fn from(value: i32) -> Self {
        CoilValue::Number(f64::from(value))
    }
}

impl From<&str> for CoilValue {
    fn from(value: &str) -> Self {
        CoilValue::Label(value.to_string())
    }
}

impl From<String> for CoilValue {
    fn from(value: String) -> Self {
        CoilValue::Label(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(CoilValue::parse("15.1"), CoilValue::Number(15.1));
        assert_eq!(CoilValue::parse(" -4 "), CoilValue::Number(-4.0));
        assert_eq!(CoilValue::parse("Hot Water"), CoilValue::Label("Hot Water".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(CoilValue::Number(-4.0).to_string(), "-4");
        assert_eq!(CoilValue::Number(15.1).to_string(), "15.1");
        assert_eq!(CoilValue::from("OFF").to_string(), "OFF");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CoilValue::from(30).as_f64(), Some(30.0));
        assert_eq!(CoilValue::from(30).as_label(), None);
        assert_eq!(CoilValue::from("ON").as_label(), Some("ON"));
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_string(&CoilValue::Number(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&CoilValue::from("OFF")).unwrap(), "\"OFF\"");
    }
}
