use std::fmt::Display;
use std::io;

use coilflow_raw::RawError;
use thiserror::Error;

/// Render an optional inclusive range as `min..=max`, `min..` or `..=max`
pub(crate) fn fmt_bounds<T: Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min}..={max}"),
        (Some(min), None) => format!("{min}.."),
        (None, Some(max)) => format!("..={max}"),
        (None, None) => "..".to_string(),
    }
}

/// A logical value was rejected at assignment time
///
/// The caller broke the coil's contract; the assignment did not take effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Coil {address}: '{label}' is not one of {expected:?}")]
    UnknownLabel {
        address: u32,
        label: String,
        expected: Vec<String>,
    },

    #[error("Coil {address}: value {value} is outside {}", fmt_bounds(.min, .max))]
    OutOfRange {
        address: u32,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("Coil {address}: expected a {expected} value, got '{got}'")]
    TypeMismatch {
        address: u32,
        expected: &'static str,
        got: String,
    },

    #[error("Coil {address}: value {value} is not a finite number")]
    NotFinite { address: u32, value: f64 },
}

/// Raw bytes read from a device could not be turned into a logical value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Coil {address}: {source}")]
    Raw {
        address: u32,
        #[source]
        source: RawError,
    },

    #[error("Coil {address}: raw value {value} has no mapping")]
    UnmappedValue { address: u32, value: i64 },

    #[error("Coil {address}: raw value {value} is out of bounds {}", fmt_bounds(.min, .max))]
    OutOfRange {
        address: u32,
        value: i64,
        min: Option<i64>,
        max: Option<i64>,
    },
}

/// The stored logical value cannot be represented in the register
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Coil {address}: no value has been set")]
    NoValue { address: u32 },

    #[error("Coil {address}: {source}")]
    Overflow {
        address: u32,
        #[source]
        source: RawError,
    },

    #[error("Coil {address}: label '{label}' has no raw mapping")]
    UnknownLabel { address: u32, label: String },

    #[error("Coil {address}: '{value}' does not match the register's value domain")]
    TypeMismatch { address: u32, value: String },
}

#[derive(Error, Debug)]
pub enum CoilflowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Raw register error: {0}")]
    RawError(#[from] RawError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown coil address: {0}")]
    UnknownAddress(u32),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoilflowError>;
