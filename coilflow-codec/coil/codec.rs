//! Conversions between register bytes and logical values
//!
//! Read path: bytes → word unswap → fixed-width decode → bounds / mapping
//! → logical value. Write path: logical value → mapping / scaling →
//! fixed-width encode → word swap → bytes.
//!
//! Every function here is pure over the definition; [`Coil`](super::Coil)
//! owns the state.

use coilflow_raw::{swap_word_array, swap_words, REGISTER_BUFFER_LEN};

use super::definition::CoilDefinition;
use super::value::CoilValue;
use crate::error::{DecodeError, EncodeError, ValidationError};

const BOOLEAN_ON: &str = "ON";
const BOOLEAN_OFF: &str = "OFF";

impl CoilDefinition {
    /// Decode register bytes into a logical value
    ///
    /// Accepts 1, 2 or 4 bytes; shorter input is extended to the register
    /// width according to its signedness.
    pub fn decode(&self, bytes: &[u8]) -> Result<CoilValue, DecodeError> {
        self.decode_raw(bytes).map(|(_, value)| value)
    }

    /// Decode register bytes, keeping the raw integer alongside the value
    pub(super) fn decode_raw(&self, bytes: &[u8]) -> Result<(i64, CoilValue), DecodeError> {
        let raw = self.raw_integer(bytes)?;

        let value = match &self.mappings {
            Some(mapping) => {
                let label = mapping
                    .label_for(raw)
                    .ok_or(DecodeError::UnmappedValue {
                        address: self.address,
                        value: raw,
                    })?;
                CoilValue::Label(label.to_string())
            }
            None => {
                self.check_raw_bounds(raw)?;
                CoilValue::Number(self.scale(raw))
            }
        };

        Ok((raw, value))
    }

    fn raw_integer(&self, bytes: &[u8]) -> Result<i64, DecodeError> {
        let ordered = if self.swaps_words() {
            swap_words(bytes)
        } else {
            bytes.to_vec()
        };

        self.width
            .decode(&ordered)
            .map_err(|source| DecodeError::Raw {
                address: self.address,
                source,
            })
    }

    fn check_raw_bounds(&self, raw: i64) -> Result<(), DecodeError> {
        let below = self.raw_min.is_some_and(|min| raw < min);
        let above = self.raw_max.is_some_and(|max| raw > max);

        if below || above {
            return Err(DecodeError::OutOfRange {
                address: self.address,
                value: raw,
                min: self.raw_min,
                max: self.raw_max,
            });
        }

        Ok(())
    }

    /// Check a logical value against the register's domain
    ///
    /// Returns the normalized value to store: labels are upper-cased, and
    /// `ON`/`OFF` given to an unmapped 0..=1 register become numbers.
    pub fn validate(&self, value: CoilValue) -> Result<CoilValue, ValidationError> {
        match (&self.mappings, value) {
            (Some(mapping), CoilValue::Label(label)) => mapping
                .canonical_label(&label)
                .map(|canonical| CoilValue::Label(canonical.to_string()))
                .ok_or_else(|| ValidationError::UnknownLabel {
                    address: self.address,
                    expected: mapping.labels().map(str::to_string).collect(),
                    label,
                }),
            (Some(_), CoilValue::Number(n)) => Err(ValidationError::TypeMismatch {
                address: self.address,
                expected: "label",
                got: n.to_string(),
            }),
            (None, CoilValue::Label(label)) => match self.boolean_label(&label) {
                Some(n) => self.validate_number(n),
                None => Err(ValidationError::TypeMismatch {
                    address: self.address,
                    expected: "numeric",
                    got: label,
                }),
            },
            (None, CoilValue::Number(n)) => self.validate_number(n),
        }
    }

    fn validate_number(&self, n: f64) -> Result<CoilValue, ValidationError> {
        if !n.is_finite() {
            return Err(ValidationError::NotFinite {
                address: self.address,
                value: n,
            });
        }

        let (min, max) = (self.min(), self.max());
        let below = min.is_some_and(|min| n < min);
        let above = max.is_some_and(|max| n > max);

        if below || above {
            return Err(ValidationError::OutOfRange {
                address: self.address,
                value: n,
                min,
                max,
            });
        }

        Ok(CoilValue::Number(n))
    }

    /// Engineering value for `ON`/`OFF` on an unmapped bit register
    fn boolean_label(&self, label: &str) -> Option<f64> {
        if !self.has_bit_bounds() {
            return None;
        }

        let label = label.trim();
        if label.eq_ignore_ascii_case(BOOLEAN_ON) {
            Some(self.scale(1))
        } else if label.eq_ignore_ascii_case(BOOLEAN_OFF) {
            Some(self.scale(0))
        } else {
            None
        }
    }

    /// Encode a stored logical value into a 4-byte register buffer
    ///
    /// Numbers are scaled by the factor and rounded; labels are reverse
    /// mapped. The value is not re-validated against engineering bounds,
    /// only against what the register width can hold.
    pub fn encode(&self, value: &CoilValue) -> Result<[u8; REGISTER_BUFFER_LEN], EncodeError> {
        let raw = match (&self.mappings, value) {
            (Some(mapping), CoilValue::Label(label)) => mapping
                .raw_for_canonical(label)
                .ok_or_else(|| EncodeError::UnknownLabel {
                    address: self.address,
                    label: label.clone(),
                })?,
            (None, CoilValue::Number(n)) => self.unscale(*n),
            (_, other) => {
                return Err(EncodeError::TypeMismatch {
                    address: self.address,
                    value: other.to_string(),
                })
            }
        };

        self.encode_raw(raw)
    }

    pub(super) fn encode_raw(&self, raw: i64) -> Result<[u8; REGISTER_BUFFER_LEN], EncodeError> {
        let buf = self
            .width
            .encode(raw)
            .map_err(|source| EncodeError::Overflow {
                address: self.address,
                source,
            })?;

        Ok(if self.swaps_words() {
            swap_word_array(buf)
        } else {
            buf
        })
    }

    /// Engineering value → raw integer, saturating outside the `i64` range
    #[allow(clippy::cast_possible_truncation)]
    fn unscale(&self, value: f64) -> i64 {
        (value * f64::from(self.factor)).round() as i64
    }
}
