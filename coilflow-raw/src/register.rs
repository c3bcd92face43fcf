//! Typed fixed-width integers stored in a register buffer

use crate::words::REGISTER_BUFFER_LEN;

/// Trait for integer types that can be converted to/from a register buffer
///
/// A register buffer is always [`REGISTER_BUFFER_LEN`] bytes long. The
/// integer occupies its natural width at the start of the buffer in
/// little-endian order; the remaining high-order bytes are zero on output
/// and ignored on input.
///
/// All classes share `i64` as their raw domain, which is wide enough for
/// both `i32` and `u32`.
///
/// # Example
///
/// ```
/// use coilflow_raw::RawInteger;
///
/// assert_eq!((-4i8).to_register(), [0xfc, 0x00, 0x00, 0x00]);
/// assert_eq!(u16::from_register(&[0x97, 0x00, 0xaa, 0xbb]), 0x97);
/// assert_eq!(u8::from_raw(256), None);
/// ```
pub trait RawInteger: Sized + Copy {
    /// Storage width in bytes
    const WIDTH: usize;
    const SIGNED: bool;
    const MIN: i64;
    const MAX: i64;

    /// Read the leading `WIDTH` bytes of the buffer
    fn from_register(buf: &[u8; REGISTER_BUFFER_LEN]) -> Self;

    /// Write this value into a zero-filled register buffer
    fn to_register(self) -> [u8; REGISTER_BUFFER_LEN];

    fn to_raw(self) -> i64;

    /// Narrow a raw integer, `None` if it does not fit
    fn from_raw(raw: i64) -> Option<Self>;
}

impl_raw_integer!(i8, u8, i16, u16, i32, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(<i8 as RawInteger>::WIDTH, 1);
        assert_eq!(<u16 as RawInteger>::WIDTH, 2);
        assert_eq!(<i32 as RawInteger>::WIDTH, 4);
        assert!(<i16 as RawInteger>::SIGNED);
        assert!(!<u32 as RawInteger>::SIGNED);
    }

    #[test]
    fn test_from_register_ignores_high_bytes() {
        let buf = [0xfc, 0xff, 0x12, 0x34];
        assert_eq!(i8::from_register(&buf), -4);
        assert_eq!(i16::from_register(&buf), -4);
        assert_eq!(u8::from_register(&buf), 0xfc);
        assert_eq!(u32::from_register(&buf), 0x3412_fffc);
    }

    #[test]
    fn test_to_register_zero_fills() {
        assert_eq!((-4i16).to_register(), [0xfc, 0xff, 0x00, 0x00]);
        assert_eq!(255u8.to_register(), [0xff, 0x00, 0x00, 0x00]);
        assert_eq!((-1i32).to_register(), [0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_from_raw_bounds() {
        assert_eq!(i8::from_raw(-128), Some(-128));
        assert_eq!(i8::from_raw(-129), None);
        assert_eq!(u32::from_raw(i64::from(u32::MAX)), Some(u32::MAX));
        assert_eq!(u32::from_raw(-1), None);
        assert_eq!(<u32 as RawInteger>::MAX, 4_294_967_295);
    }
}
