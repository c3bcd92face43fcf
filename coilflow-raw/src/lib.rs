//! # coilflow-raw
//!
//! Fixed-width register primitives for heat pump style register tables.
//!
//! Devices on register-oriented buses expose every value as a small signed
//! or unsigned integer stored in 1, 2 or 4 bytes. This crate owns the
//! byte-level half of the conversion:
//!
//! - [`WidthClass`] - the six storage classes (`s8`, `u8`, `s16`, `u16`,
//!   `s32`, `u32`) with their width and signedness
//! - [`swap_words`] - exchange of the two 16-bit halves of a 4-byte buffer
//! - [`WidthClass::decode`] / [`WidthClass::encode`] - little-endian,
//!   two's complement packing into a uniform 4-byte register buffer
//!
//! ## Usage
//!
//! ```
//! use coilflow_raw::{swap_words, WidthClass};
//!
//! let class: WidthClass = "s16".parse()?;
//! assert_eq!(class.decode(&[0xfc])?, -4);
//! assert_eq!(class.encode(-4)?, [0xfc, 0xff, 0x00, 0x00]);
//!
//! assert_eq!(swap_words(b"abcd"), b"cdab");
//! # Ok::<(), coilflow_raw::RawError>(())
//! ```

// Macros (must be first for visibility)
#[macro_use]
mod macros;

pub mod error;
pub mod register;
pub mod width;
pub mod words;

pub use error::{RawError, Result};
pub use register::RawInteger;
pub use width::WidthClass;
pub use words::{swap_word_array, swap_words, REGISTER_BUFFER_LEN};
