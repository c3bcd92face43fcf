use crate::width::WidthClass;

pub type Result<T> = std::result::Result<T, RawError>;

/// Errors raised by the fixed-width primitives
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawError {
    #[error("Unknown width class '{0}' (expected one of s8, u8, s16, u16, s32, u32)")]
    UnknownWidth(String),

    #[error("Value {value} does not fit in {width} (range {min}..={max})")]
    Overflow {
        value: i64,
        width: WidthClass,
        min: i64,
        max: i64,
    },

    #[error("Invalid register buffer length {len} (expected 1, 2 or 4 bytes)")]
    InvalidLength { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_error_display() {
        let err = RawError::Overflow {
            value: 256,
            width: WidthClass::U8,
            min: 0,
            max: 255,
        };
        assert_eq!(err.to_string(), "Value 256 does not fit in u8 (range 0..=255)");

        let err = RawError::UnknownWidth("f32".to_string());
        assert!(err.to_string().contains("Unknown width class 'f32'"));
    }
}
