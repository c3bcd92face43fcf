//! Declarative macros for the fixed-width integer table

/// Implement [`RawInteger`](crate::register::RawInteger) for primitive integers
///
/// Every implementation shares the same little-endian layout inside a
/// 4-byte register buffer, so only the type differs.
macro_rules! impl_raw_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::register::RawInteger for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const SIGNED: bool = <$ty>::MIN != 0;
                const MIN: i64 = <$ty>::MIN as i64;
                const MAX: i64 = <$ty>::MAX as i64;

                fn from_register(buf: &[u8; $crate::words::REGISTER_BUFFER_LEN]) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    bytes.copy_from_slice(&buf[..Self::WIDTH]);
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_register(self) -> [u8; $crate::words::REGISTER_BUFFER_LEN] {
                    let mut buf = [0u8; $crate::words::REGISTER_BUFFER_LEN];
                    buf[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
                    buf
                }

                fn to_raw(self) -> i64 {
                    i64::from(self)
                }

                fn from_raw(raw: i64) -> Option<Self> {
                    <$ty>::try_from(raw).ok()
                }
            }
        )*
    };
}

/// Define the width class enum with its backing integer type per variant
///
/// # Example
/// ```ignore
/// width_class_enum! {
///     pub enum WidthClass {
///         S8 => ("s8", i8),
///         U8 => ("u8", u8),
///     }
/// }
///
/// assert_eq!(WidthClass::S8.name(), "s8");
/// assert_eq!(WidthClass::U8.byte_width(), 1);
/// ```
///
/// Expands to:
/// - An enum with Debug, Clone, Copy, PartialEq, Eq, Hash derives
/// - `name()`, `all()`, `byte_width()`, `is_signed()` and `raw_range()`
/// - private `unpack()`/`pack()` dispatching to the variant's `RawInteger` impl
macro_rules! width_class_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($str:literal, $ty:ty)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)*
                }
            }

            pub fn all() -> Vec<$name> {
                vec![$($name::$variant,)*]
            }

            /// Storage width in bytes
            pub fn byte_width(&self) -> usize {
                match self {
                    $($name::$variant => <$ty as $crate::register::RawInteger>::WIDTH,)*
                }
            }

            pub fn is_signed(&self) -> bool {
                match self {
                    $($name::$variant => <$ty as $crate::register::RawInteger>::SIGNED,)*
                }
            }

            /// Inclusive range of raw integers representable by this class
            pub fn raw_range(&self) -> (i64, i64) {
                match self {
                    $($name::$variant => (
                        <$ty as $crate::register::RawInteger>::MIN,
                        <$ty as $crate::register::RawInteger>::MAX,
                    ),)*
                }
            }

            fn unpack(&self, buf: &[u8; $crate::words::REGISTER_BUFFER_LEN]) -> i64 {
                match self {
                    $($name::$variant => $crate::register::RawInteger::to_raw(
                        <$ty as $crate::register::RawInteger>::from_register(buf),
                    ),)*
                }
            }

            fn pack(&self, raw: i64) -> Option<[u8; $crate::words::REGISTER_BUFFER_LEN]> {
                match self {
                    $($name::$variant => <$ty as $crate::register::RawInteger>::from_raw(raw)
                        .map($crate::register::RawInteger::to_register),)*
                }
            }
        }
    };
}
