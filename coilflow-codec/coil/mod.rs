//! Register definitions and the stateful coil codec
//!
//! A [`Coil`] pairs an immutable [`CoilDefinition`] with the most recently
//! assigned representation: either bytes read from the device or a
//! logical value set by the application. The other representation is
//! derived on demand and never cached.
//!
//! ```
//! use coilflow::{Coil, CoilDefinition, CoilValue};
//! use coilflow_raw::WidthClass;
//!
//! let definition = CoilDefinition::builder(40004, "bt1-outdoor-temperature-40004", "BT1 Outdoor Temperature", WidthClass::S16)
//!     .factor(10)
//!     .unit("°C")
//!     .build()?;
//! let mut coil = Coil::new(definition);
//!
//! coil.set_raw_value(&[0x97, 0x00])?;
//! assert_eq!(coil.value(), Some(&CoilValue::Number(15.1)));
//!
//! coil.set_value(-4.5)?;
//! assert_eq!(coil.raw_value()?, [0xd3, 0xff, 0x00, 0x00]);
//! # Ok::<(), coilflow::CoilflowError>(())
//! ```

mod codec;
mod definition;
mod mapping;
mod value;

use std::sync::Arc;

use coilflow_raw::REGISTER_BUFFER_LEN;

pub use definition::{CoilDefinition, CoilDefinitionBuilder};
pub use mapping::CoilMapping;
pub use value::CoilValue;

use crate::error::{DecodeError, EncodeError, ValidationError};

/// Most recently assigned representation
#[derive(Debug, Clone, PartialEq)]
enum CoilState {
    Empty,
    /// Bytes from the device, kept as the validated raw integer
    Raw { raw: i64, value: CoilValue },
    /// Value set by the application, already validated
    Value(CoilValue),
}

/// A register definition plus its current value
#[derive(Debug, Clone)]
pub struct Coil {
    definition: Arc<CoilDefinition>,
    state: CoilState,
}

impl Coil {
    pub fn new(definition: CoilDefinition) -> Self {
        Self::from_shared(Arc::new(definition))
    }

    /// Create a coil over a definition shared with other instances
    pub fn from_shared(definition: Arc<CoilDefinition>) -> Self {
        Self {
            definition,
            state: CoilState::Empty,
        }
    }

    pub fn definition(&self) -> &CoilDefinition {
        &self.definition
    }

    pub fn address(&self) -> u32 {
        self.definition.address()
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn title(&self) -> &str {
        self.definition.title()
    }

    pub fn min(&self) -> Option<f64> {
        self.definition.min()
    }

    pub fn max(&self) -> Option<f64> {
        self.definition.max()
    }

    pub fn raw_min(&self) -> Option<i64> {
        self.definition.raw_min()
    }

    pub fn raw_max(&self) -> Option<i64> {
        self.definition.raw_max()
    }

    pub fn is_boolean(&self) -> bool {
        self.definition.is_boolean()
    }

    pub fn is_writable(&self) -> bool {
        self.definition.is_writable()
    }

    /// Current logical value, `None` until something has been assigned
    pub fn value(&self) -> Option<&CoilValue> {
        match &self.state {
            CoilState::Empty => None,
            CoilState::Raw { value, .. } | CoilState::Value(value) => Some(value),
        }
    }

    pub fn has_value(&self) -> bool {
        !matches!(self.state, CoilState::Empty)
    }

    /// Assign a logical value
    ///
    /// Labels are matched case-insensitively and stored upper-cased;
    /// numbers are checked against the engineering bounds. Whether the
    /// value fits the register width is only checked by
    /// [`raw_value`](Self::raw_value).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] and leaves the coil unchanged if the
    /// value is outside the register's domain.
    pub fn set_value(&mut self, value: impl Into<CoilValue>) -> Result<(), ValidationError> {
        let value = self.definition.validate(value.into())?;
        tracing::debug!(
            "Coil {} ({}) set value {}",
            self.definition.address(),
            self.definition.name(),
            value
        );
        self.state = CoilState::Value(value);
        Ok(())
    }

    /// Assign bytes read from the device
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] and leaves the coil unchanged if the bytes
    /// have an invalid length, denote an unmapped value, or fall outside
    /// the raw bounds.
    pub fn set_raw_value(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        match self.definition.decode_raw(bytes) {
            Ok((raw, value)) => {
                tracing::debug!(
                    "Coil {} ({}) decoded {:02x?} -> {}",
                    self.definition.address(),
                    self.definition.name(),
                    bytes,
                    value
                );
                self.state = CoilState::Raw { raw, value };
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected register data {:02x?}: {}", bytes, e);
                Err(e)
            }
        }
    }

    /// Encode the current value into a 4-byte register buffer
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NoValue`] before any assignment, and
    /// [`EncodeError::Overflow`] if the scaled value does not fit the
    /// register width.
    pub fn raw_value(&self) -> Result<[u8; REGISTER_BUFFER_LEN], EncodeError> {
        let encoded = match &self.state {
            CoilState::Empty => {
                return Err(EncodeError::NoValue {
                    address: self.definition.address(),
                })
            }
            CoilState::Raw { raw, .. } => self.definition.encode_raw(*raw),
            CoilState::Value(value) => self.definition.encode(value),
        }?;

        tracing::debug!(
            "Coil {} ({}) encoded -> {:02x?}",
            self.definition.address(),
            self.definition.name(),
            encoded
        );
        Ok(encoded)
    }

    /// Forget the current value
    pub fn clear(&mut self) {
        self.state = CoilState::Empty;
    }
}
