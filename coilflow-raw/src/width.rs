//! Register storage classes
//!
//! A [`WidthClass`] fixes how many bytes a register occupies and whether
//! its content is two's complement. Decoding accepts minimal-width input
//! as well as a padded 4-byte container; encoding always yields the
//! padded container.

use std::fmt;
use std::str::FromStr;

use crate::error::{RawError, Result};
use crate::words::REGISTER_BUFFER_LEN;

width_class_enum! {
    /// Storage class of a register
    ///
    /// | Class | Bytes | Signed |
    /// |-------|-------|--------|
    /// | `s8`  | 1     | yes    |
    /// | `u8`  | 1     | no     |
    /// | `s16` | 2     | yes    |
    /// | `u16` | 2     | no     |
    /// | `s32` | 4     | yes    |
    /// | `u32` | 4     | no     |
    pub enum WidthClass {
        S8 => ("s8", i8),
        U8 => ("u8", u8),
        S16 => ("s16", i16),
        U16 => ("u16", u16),
        S32 => ("s32", i32),
        U32 => ("u32", u32),
    }
}

impl WidthClass {
    /// Whether the class spans two 16-bit registers
    pub fn is_32bit(&self) -> bool {
        self.byte_width() == REGISTER_BUFFER_LEN
    }

    /// Extend a 1, 2 or 4 byte buffer to a full register buffer
    ///
    /// Input shorter than the class width holds the low-order bytes of the
    /// integer: unsigned classes are zero-extended, signed classes are
    /// sign-extended from the last supplied byte.
    pub fn widen(&self, bytes: &[u8]) -> Result<[u8; REGISTER_BUFFER_LEN]> {
        if !matches!(bytes.len(), 1 | 2 | REGISTER_BUFFER_LEN) {
            return Err(RawError::InvalidLength { len: bytes.len() });
        }

        let mut buf = [0u8; REGISTER_BUFFER_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);

        if self.is_signed() && bytes.len() < self.byte_width() {
            if let Some(&last) = bytes.last() {
                if last & 0x80 != 0 {
                    buf[bytes.len()..].fill(0xff);
                }
            }
        }

        Ok(buf)
    }

    /// Interpret a 1, 2 or 4 byte buffer as a raw integer of this class
    ///
    /// # Example
    ///
    /// ```
    /// use coilflow_raw::WidthClass;
    ///
    /// assert_eq!(WidthClass::S8.decode(&[0xfc, 0x00, 0x00, 0x00])?, -4);
    /// assert_eq!(WidthClass::U16.decode(&[0x97, 0x00])?, 151);
    /// # Ok::<(), coilflow_raw::RawError>(())
    /// ```
    pub fn decode(&self, bytes: &[u8]) -> Result<i64> {
        let buf = self.widen(bytes)?;
        Ok(self.unpack(&buf))
    }

    /// Pack a raw integer into a zero-filled 4-byte little-endian buffer
    ///
    /// # Errors
    ///
    /// Returns [`RawError::Overflow`] if the integer is outside
    /// [`raw_range`](Self::raw_range).
    pub fn encode(&self, raw: i64) -> Result<[u8; REGISTER_BUFFER_LEN]> {
        self.pack(raw).ok_or_else(|| {
            let (min, max) = self.raw_range();
            RawError::Overflow {
                value: raw,
                width: *self,
                min,
                max,
            }
        })
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidthClass {
    type Err = RawError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|class| class.name() == normalized)
            .ok_or_else(|| RawError::UnknownWidth(s.to_string()))
    }
}
